use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::difficulty::Difficulty;
use crate::maze::{Cell, Pos};
use crate::session::Session;

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Wall,
    Floor,
    Exit,
    FakeExit,
}

#[derive(Clone, Copy, PartialEq)]
struct CellView {
    glyph: Glyph,
    color: Color,
}

/// Damage-tracked terminal renderer: remembers the last frame per cell
/// and only repaints what changed. A full repaint happens on the first
/// frame, on resize, and whenever the centered origin moves.
pub struct Renderer {
    last: Vec<CellView>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(size: usize) -> Self {
        Self {
            last: vec![
                CellView {
                    glyph: Glyph::Floor,
                    color: Color::Reset,
                };
                size * size
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn invalidate(&mut self) {
        self.needs_full = true;
    }
}

pub fn render(
    stdout: &mut Stdout,
    session: &Session,
    profile: &Difficulty,
    renderer: &mut Renderer,
) -> io::Result<()> {
    let size = session.maze().size();
    let needed_h = (size + 2) as u16;
    let needed_w = (size * CELL_W) as u16;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        stdout.queue(MoveTo(0, 0))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    if renderer.needs_full {
        stdout.queue(Clear(ClearType::All))?;
    }

    let hud = format!(
        "{}  {}x{}  (arrows/hjkl move, Esc menu, q quit)",
        profile.name, size, size
    );
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for row in 0..size {
        for col in 0..size {
            let view = cell_view(session, Pos { row, col });
            let idx = row * size + col;
            if renderer.needs_full || view != renderer.last[idx] {
                renderer.last[idx] = view;
                draw_cell(stdout, renderer, row, col, view)?;
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn cell_view(session: &Session, pos: Pos) -> CellView {
    if pos == session.player() {
        return CellView {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    match session.maze().cell(pos) {
        Cell::Wall => CellView {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Cell::Path => CellView {
            glyph: Glyph::Floor,
            color: Color::Reset,
        },
        Cell::Exit => CellView {
            glyph: Glyph::Exit,
            color: Color::Green,
        },
        Cell::FakeExit => CellView {
            glyph: Glyph::FakeExit,
            color: Color::Cyan,
        },
    }
}

fn draw_cell(
    stdout: &mut Stdout,
    renderer: &Renderer,
    row: usize,
    col: usize,
    view: CellView,
) -> io::Result<()> {
    let (text, color) = match view.glyph {
        Glyph::Player => ("🏃", view.color),
        Glyph::Wall => ("██", view.color),
        Glyph::Floor => ("  ", view.color),
        Glyph::Exit => ("🚪", view.color),
        Glyph::FakeExit => ("▓▓", view.color),
    };
    let x_pos = renderer.origin_x + (col * CELL_W) as u16;
    let y_pos = renderer.origin_y + row as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}

fn centered_x(term_w: u16, text: &str) -> u16 {
    let w = UnicodeWidthStr::width(text) as u16;
    term_w.saturating_sub(w) / 2
}

pub fn draw_menu(stdout: &mut Stdout, options: &[Difficulty], selected: usize) -> io::Result<()> {
    let (term_w, term_h) = terminal::size()?;
    let block_h = (options.len() + 4) as u16;
    let top = term_h.saturating_sub(block_h) / 2;

    stdout.queue(Clear(ClearType::All))?;

    let title = "MAZE RUNNER";
    stdout.queue(MoveTo(centered_x(term_w, title), top))?;
    stdout.queue(SetForegroundColor(Color::Magenta))?;
    stdout.queue(Print(title))?;

    for (i, profile) in options.iter().enumerate() {
        let marker = if i == selected { "> " } else { "  " };
        let line = format!("{}{:<8}{}x{}", marker, profile.name, profile.size, profile.size);
        let color = if i == selected {
            Color::Green
        } else {
            Color::White
        };
        stdout.queue(MoveTo(centered_x(term_w, &line), top + 2 + i as u16))?;
        stdout.queue(SetForegroundColor(color))?;
        stdout.queue(Print(line))?;
    }

    let hint = "Up/Down select, Enter start, q quit";
    stdout.queue(MoveTo(
        centered_x(term_w, hint),
        top + 3 + options.len() as u16,
    ))?;
    stdout.queue(SetForegroundColor(Color::DarkGrey))?;
    stdout.queue(Print(hint))?;

    stdout.queue(ResetColor)?;
    stdout.flush()?;
    Ok(())
}

pub fn draw_win_screen(stdout: &mut Stdout) -> io::Result<()> {
    let (term_w, term_h) = terminal::size()?;
    let msg = "🎉 Congratulations! You Escaped!";

    stdout.queue(Clear(ClearType::All))?;
    stdout.queue(MoveTo(centered_x(term_w, msg), term_h / 2))?;
    stdout.queue(SetForegroundColor(Color::Green))?;
    stdout.queue(Print(msg))?;
    stdout.queue(ResetColor)?;
    stdout.flush()?;
    Ok(())
}
