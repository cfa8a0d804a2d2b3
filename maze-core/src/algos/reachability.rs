use crate::{
    constants::DIRECTIONS,
    types::{Cell, Maze},
};

use std::collections::{HashSet, VecDeque};

/// Answers whether the exit can still be reached.
///
/// Closed and locked doors count as traversable here, since a correct answer can
/// still open them. Only permanently locked doors cut the grid.
pub struct ReachabilityAnalyzer;

impl ReachabilityAnalyzer {
    pub fn exit_reachable(maze: &Maze, from: Cell) -> bool {
        let exit = maze.exit_cell();

        Self::search(maze, from, |cell| cell == exit).0
    }

    pub fn reachable_cells(maze: &Maze, from: Cell) -> HashSet<Cell> {
        Self::search(maze, from, |_| false).1
    }

    // Breadth-first flood from `from`, stopping early once `target` matches.
    fn search(
        maze: &Maze,
        from: Cell,
        target: impl Fn(Cell) -> bool,
    ) -> (bool, HashSet<Cell>) {
        let mut visited = HashSet::with_capacity(maze.rows() * maze.cols());

        if !maze.contains(from) {
            return (false, visited);
        }

        let mut cells_to_visit = VecDeque::from([from]);
        visited.insert(from);

        while let Some(cell) = cells_to_visit.pop_front() {
            if target(cell) {
                return (true, visited);
            }

            let Ok(room) = maze.room(cell) else {
                continue;
            };

            for direction in DIRECTIONS {
                if room.door(direction).is_permanently_locked() {
                    continue;
                }

                if let Some(neighbour) = maze.neighbour(cell, direction) {
                    if visited.insert(neighbour) {
                        cells_to_visit.push_back(neighbour);
                    }
                }
            }
        }

        (false, visited)
    }
}
