use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::Rng;

mod difficulty;
mod error;
mod maze;
mod render;
mod session;
mod sound;

use difficulty::{Difficulty, DIFFICULTIES};
use render::Renderer;
use session::{Dir, MoveOutcome, Session, SessionState};
use sound::Sounds;

const DEFAULT_RENDER_FPS: u64 = 60;
const WIN_SCREEN_MS: u64 = 3000;

#[derive(Clone, Copy, PartialEq)]
enum PlayEnd {
    Menu,
    Exit,
}

fn main() -> io::Result<()> {
    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let sounds = Sounds::from_env();
    let frame_time = Duration::from_micros(1_000_000 / read_render_fps().max(1));

    loop {
        let Some(profile) = home_screen(stdout, &DIFFICULTIES)? else {
            return Ok(());
        };
        if play(stdout, &mut rng, &sounds, profile, frame_time)? == PlayEnd::Exit {
            return Ok(());
        }
    }
}

fn read_render_fps() -> u64 {
    std::env::var("MAZE_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS)
}

fn home_screen(stdout: &mut Stdout, options: &[Difficulty]) -> io::Result<Option<Difficulty>> {
    if options.is_empty() {
        return Ok(None);
    }

    let mut selected = 0usize;
    render::draw_menu(stdout, options, selected)?;
    loop {
        match event::read()? {
            Event::Key(key) => {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                    KeyCode::Up | KeyCode::Char('k') => {
                        selected = selected.checked_sub(1).unwrap_or(options.len() - 1);
                        render::draw_menu(stdout, options, selected)?;
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        selected = (selected + 1) % options.len();
                        render::draw_menu(stdout, options, selected)?;
                    }
                    KeyCode::Enter => return Ok(Some(options[selected])),
                    _ => {}
                }
            }
            Event::Resize(_, _) => render::draw_menu(stdout, options, selected)?,
            _ => {}
        }
    }
}

fn play(
    stdout: &mut Stdout,
    rng: &mut impl Rng,
    sounds: &Sounds,
    profile: Difficulty,
    frame_time: Duration,
) -> io::Result<PlayEnd> {
    log::debug!(
        "starting {} maze: size {}, density {}",
        profile.name,
        profile.size,
        profile.density
    );
    let maze = maze::generate(rng, profile.size).map_err(io::Error::other)?;
    let mut session = Session::new(maze);
    let mut renderer = Renderer::new(profile.size);

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => {
                    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') => {
                            session.quit();
                            return Ok(PlayEnd::Exit);
                        }
                        KeyCode::Esc => session.quit(),
                        code => {
                            if let Some(dir) = dir_for_key(code) {
                                match session.try_move(dir) {
                                    MoveOutcome::Stepped => sounds.step(stdout)?,
                                    MoveOutcome::Won => sounds.win(stdout)?,
                                    MoveOutcome::Blocked | MoveOutcome::Ignored => {}
                                }
                            }
                        }
                    }
                }
                Event::Resize(_, _) => renderer.invalidate(),
                _ => {}
            }
        }

        match session.state() {
            SessionState::Playing => {}
            SessionState::Won => {
                render::render(stdout, &session, &profile, &mut renderer)?;
                win_screen(stdout)?;
                return Ok(PlayEnd::Menu);
            }
            SessionState::Quit => return Ok(PlayEnd::Menu),
        }

        render::render(stdout, &session, &profile, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn dir_for_key(code: KeyCode) -> Option<Dir> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Dir::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Dir::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Dir::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Dir::Right),
        _ => None,
    }
}

/// Hold the win screen for a few seconds, swallowing any keys pressed
/// in the meantime so they do not leak into the menu.
fn win_screen(stdout: &mut Stdout) -> io::Result<()> {
    render::draw_win_screen(stdout)?;
    let deadline = Instant::now() + Duration::from_millis(WIN_SCREEN_MS);
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(());
        }
        if event::poll(remaining)? {
            let _ = event::read()?;
        }
    }
}
