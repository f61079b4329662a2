use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{GameError, Result};

/// The player always enters the maze at the top-left interior cell.
pub const START: Pos = Pos { row: 1, col: 1 };

const MIN_SIZE: usize = 5;

/// Carve steps jump two cells so that passages stay separated by
/// single-cell walls.
const CARVE_STEPS: [(isize, isize); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Wall,
    Path,
    Exit,
    FakeExit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

/// Square grid of cell states, immutable once generated. Cells are
/// stored row-major in a flat vec; the border stays `Wall` because the
/// carver never touches it.
#[derive(Clone, Debug, PartialEq)]
pub struct Maze {
    size: usize,
    cells: Vec<Cell>,
}

impl Maze {
    fn filled(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Wall; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    pub fn cell(&self, pos: Pos) -> Cell {
        debug_assert!(self.in_bounds(pos));
        self.cells[pos.row * self.size + pos.col]
    }

    fn set(&mut self, pos: Pos, cell: Cell) {
        debug_assert!(self.in_bounds(pos));
        self.cells[pos.row * self.size + pos.col] = cell;
    }

    #[cfg(test)]
    pub(crate) fn parse(art: &[&str]) -> Self {
        let size = art.len();
        let mut maze = Self::filled(size);
        for (row, line) in art.iter().enumerate() {
            assert_eq!(line.len(), size, "maze art must be square");
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Wall,
                    '.' => Cell::Path,
                    'E' => Cell::Exit,
                    'F' => Cell::FakeExit,
                    other => panic!("unknown maze art cell {other:?}"),
                };
                maze.set(Pos { row, col }, cell);
            }
        }
        maze
    }
}

/// Generates a maze by depth-first carving from the start cell, then
/// places the exit in the bottom-right interior corner and at most one
/// decoy exit on a carved near-edge cell.
pub fn generate(rng: &mut impl Rng, size: usize) -> Result<Maze> {
    if size < MIN_SIZE {
        return Err(GameError::SizeTooSmall(size));
    }
    if size % 2 == 0 {
        return Err(GameError::SizeNotOdd(size));
    }

    let mut maze = Maze::filled(size);
    maze.set(START, Cell::Path);
    carve_from(&mut maze, rng, START);

    // The carve spans every odd-coordinate interior cell, so this cell
    // is already Path and reachable from the start.
    let exit = Pos {
        row: size - 2,
        col: size - 2,
    };
    maze.set(exit, Cell::Exit);

    place_fake_exit(&mut maze, rng);
    Ok(maze)
}

struct Frame {
    pos: Pos,
    steps: [(isize, isize); 4],
    next: usize,
}

impl Frame {
    fn open(pos: Pos, rng: &mut impl Rng) -> Self {
        let mut steps = CARVE_STEPS;
        steps.shuffle(rng);
        Self {
            pos,
            steps,
            next: 0,
        }
    }
}

/// Iterative depth-first backtracker. Each frame holds one cell and its
/// per-cell shuffled step order, so exploration matches the recursive
/// formulation without recursion depth tied to maze size.
fn carve_from(maze: &mut Maze, rng: &mut impl Rng, start: Pos) {
    let mut stack = vec![Frame::open(start, rng)];
    loop {
        let Some(frame) = stack.last_mut() else {
            return;
        };
        if frame.next == frame.steps.len() {
            stack.pop();
            continue;
        }
        let (dr, dc) = frame.steps[frame.next];
        frame.next += 1;
        let pos = frame.pos;

        let Some(target) = carve_target(pos, dr, dc, maze.size) else {
            continue;
        };
        if maze.cell(target) != Cell::Wall {
            continue;
        }
        let between = Pos {
            row: (pos.row as isize + dr / 2) as usize,
            col: (pos.col as isize + dc / 2) as usize,
        };
        maze.set(between, Cell::Path);
        maze.set(target, Cell::Path);
        stack.push(Frame::open(target, rng));
    }
}

/// Returns the step target if it lies strictly inside the border.
fn carve_target(pos: Pos, dr: isize, dc: isize, size: usize) -> Option<Pos> {
    let nr = pos.row as isize + dr;
    let nc = pos.col as isize + dc;
    let limit = (size - 1) as isize;
    if nr <= 0 || nc <= 0 || nr >= limit || nc >= limit {
        return None;
    }
    Some(Pos {
        row: nr as usize,
        col: nc as usize,
    })
}

/// Marks the first carved cell from a shuffled near-edge candidate list
/// as a decoy exit. The decoy plays like an ordinary path cell; if no
/// candidate was carved the maze simply has none.
fn place_fake_exit(maze: &mut Maze, rng: &mut impl Rng) {
    let size = maze.size;
    let mut candidates = [
        Pos { row: 1, col: size - 2 },
        Pos { row: size - 2, col: 1 },
        Pos { row: 1, col: 1 },
        Pos {
            row: size - 2,
            col: size - 3,
        },
    ];
    candidates.shuffle(rng);
    for pos in candidates {
        if maze.cell(pos) == Cell::Path {
            maze.set(pos, Cell::FakeExit);
            return;
        }
    }
    log::debug!("no carved decoy candidate, maze gets no fake exit");
}
