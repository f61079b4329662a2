use std::io::{self, Stdout};

use crossterm::style::Print;
use crossterm::QueueableCommand;

const BELL: &str = "\x07";

/// Step and win cues as terminal BEL writes: one on every accepted
/// move, one on the win transition. `MAZE_SOUND=0` silences both.
pub struct Sounds {
    enabled: bool,
}

impl Sounds {
    pub fn from_env() -> Self {
        let enabled = std::env::var("MAZE_SOUND")
            .map(|v| v != "0")
            .unwrap_or(true);
        Self { enabled }
    }

    pub fn step(&self, stdout: &mut Stdout) -> io::Result<()> {
        if self.enabled {
            stdout.queue(Print(BELL))?;
        }
        Ok(())
    }

    pub fn win(&self, stdout: &mut Stdout) -> io::Result<()> {
        if self.enabled {
            stdout.queue(Print(BELL))?;
        }
        Ok(())
    }
}
