use crate::maze::{Cell, Maze, Pos, START};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionState {
    Playing,
    Won,
    Quit,
}

/// What a single move request did. The caller maps `Stepped` and `Won`
/// to feedback cues; the session itself never touches the terminal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// A wall was in the way; position and state are unchanged.
    Blocked,
    /// The player advanced one cell.
    Stepped,
    /// The player advanced onto the exit.
    Won,
    /// The session is no longer accepting moves.
    Ignored,
}

/// One play-through: the generated maze plus the player position.
/// Position only ever changes through accepted moves, so it always
/// names an in-bounds, non-wall cell.
pub struct Session {
    maze: Maze,
    player: Pos,
    state: SessionState,
}

impl Session {
    pub fn new(maze: Maze) -> Self {
        Self {
            maze,
            player: START,
            state: SessionState::Playing,
        }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn try_move(&mut self, dir: Dir) -> MoveOutcome {
        if self.state != SessionState::Playing {
            return MoveOutcome::Ignored;
        }

        let (dr, dc) = dir.delta();
        let nr = self.player.row as isize + dr;
        let nc = self.player.col as isize + dc;
        if nr < 0 || nc < 0 {
            return MoveOutcome::Blocked;
        }
        let candidate = Pos {
            row: nr as usize,
            col: nc as usize,
        };
        if !self.maze.in_bounds(candidate) || self.maze.cell(candidate) == Cell::Wall {
            return MoveOutcome::Blocked;
        }

        self.player = candidate;
        if self.maze.cell(candidate) == Cell::Exit {
            self.state = SessionState::Won;
            MoveOutcome::Won
        } else {
            MoveOutcome::Stepped
        }
    }

    pub fn quit(&mut self) {
        self.state = SessionState::Quit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    fn corridor_maze() -> Maze {
        Maze::parse(&[
            "#####", //
            "#.#.#",
            "#.#.#",
            "#F.E#",
            "#####",
        ])
    }

    #[test]
    fn wall_move_is_a_silent_no_op() {
        let mut session = Session::new(corridor_maze());
        let before = session.player();
        assert_eq!(session.try_move(Dir::Up), MoveOutcome::Blocked);
        assert_eq!(session.try_move(Dir::Right), MoveOutcome::Blocked);
        assert_eq!(session.player(), before);
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn accepted_move_steps_one_cell() {
        let mut session = Session::new(corridor_maze());
        assert_eq!(session.try_move(Dir::Down), MoveOutcome::Stepped);
        assert_eq!(session.player(), Pos { row: 2, col: 1 });
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn fake_exit_plays_like_path() {
        let mut session = Session::new(corridor_maze());
        session.try_move(Dir::Down);
        assert_eq!(session.try_move(Dir::Down), MoveOutcome::Stepped);
        assert_eq!(session.player(), Pos { row: 3, col: 1 });
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn reaching_the_exit_wins() {
        let mut session = Session::new(corridor_maze());
        for dir in [Dir::Down, Dir::Down, Dir::Right] {
            assert_eq!(session.try_move(dir), MoveOutcome::Stepped);
        }
        assert_eq!(session.try_move(Dir::Right), MoveOutcome::Won);
        assert_eq!(session.player(), Pos { row: 3, col: 3 });
        assert_eq!(session.state(), SessionState::Won);
    }

    #[test]
    fn moves_after_winning_are_ignored() {
        let mut session = Session::new(corridor_maze());
        for dir in [Dir::Down, Dir::Down, Dir::Right, Dir::Right] {
            session.try_move(dir);
        }
        assert_eq!(session.state(), SessionState::Won);
        let at_exit = session.player();
        assert_eq!(session.try_move(Dir::Left), MoveOutcome::Ignored);
        assert_eq!(session.player(), at_exit);
    }

    /// Breadth-first search over non-wall cells, replayed as moves.
    fn path_to_exit(maze: &Maze) -> Vec<Dir> {
        let size = maze.size();
        let exit = Pos {
            row: size - 2,
            col: size - 2,
        };
        let idx = |pos: Pos| pos.row * size + pos.col;
        let mut parent: Vec<Option<(Pos, Dir)>> = vec![None; size * size];
        let mut seen = vec![false; size * size];
        let mut queue = VecDeque::from([START]);
        seen[idx(START)] = true;
        while let Some(pos) = queue.pop_front() {
            if pos == exit {
                break;
            }
            for dir in [Dir::Up, Dir::Down, Dir::Left, Dir::Right] {
                let (dr, dc) = dir.delta();
                let nr = pos.row as isize + dr;
                let nc = pos.col as isize + dc;
                if nr < 0 || nc < 0 || nr >= size as isize || nc >= size as isize {
                    continue;
                }
                let next = Pos {
                    row: nr as usize,
                    col: nc as usize,
                };
                if seen[idx(next)] || maze.cell(next) == Cell::Wall {
                    continue;
                }
                seen[idx(next)] = true;
                parent[idx(next)] = Some((pos, dir));
                queue.push_back(next);
            }
        }

        let mut dirs = Vec::new();
        let mut cursor = exit;
        while cursor != START {
            let (prev, dir) = parent[idx(cursor)].expect("exit must be reachable");
            dirs.push(dir);
            cursor = prev;
        }
        dirs.reverse();
        dirs
    }

    #[test]
    fn generated_maze_is_winnable_end_to_end() {
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut session = Session::new(maze::generate(&mut rng, 5).unwrap());
            let path = path_to_exit(session.maze());
            let (last, walk) = path.split_last().unwrap();
            for &dir in walk {
                assert_eq!(session.try_move(dir), MoveOutcome::Stepped);
                assert_eq!(session.state(), SessionState::Playing);
            }
            assert_eq!(session.try_move(*last), MoveOutcome::Won);
            assert_eq!(session.state(), SessionState::Won);
        }
    }

    #[test]
    fn border_blocks_up_from_the_start() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = Session::new(maze::generate(&mut rng, 15).unwrap());
        assert_eq!(session.try_move(Dir::Up), MoveOutcome::Blocked);
        assert_eq!(session.player(), START);
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn quit_is_unconditional() {
        let mut session = Session::new(corridor_maze());
        session.quit();
        assert_eq!(session.state(), SessionState::Quit);
        assert_eq!(session.try_move(Dir::Down), MoveOutcome::Ignored);

        let mut won = Session::new(corridor_maze());
        for dir in [Dir::Down, Dir::Down, Dir::Right, Dir::Right] {
            won.try_move(dir);
        }
        won.quit();
        assert_eq!(won.state(), SessionState::Quit);
    }
}
