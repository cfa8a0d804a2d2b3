use super::MazeBuilder;
use crate::{
    constants::DIRECTIONS,
    error::MazeError,
    types::{Cell, Direction, Maze},
};

use rand::Rng;
use tracing::event;

impl MazeBuilder {
    /// Randomized depth-first backtracking over the whole grid.
    ///
    /// Returns the amount of carved passages, which is always `rows * cols - 1`.
    pub(super) fn carve_passages<R: Rng + ?Sized>(
        maze: &mut Maze,
        rng: &mut R,
    ) -> Result<usize, MazeError> {
        let initial_cell = Cell::new(
            rng.random_range(0..maze.rows()),
            rng.random_range(0..maze.cols()),
        );

        maze.room_mut(initial_cell)?.mark_visited()?;

        let mut cell_stack = vec![initial_cell];
        let mut carved = 0;

        while let Some(cell) = cell_stack.last().copied() {
            let unvisited = Self::unvisited_neighbours(maze, cell)?;

            if unvisited.is_empty() {
                cell_stack.pop();
                continue;
            }

            let (direction, neighbour) = unvisited[rng.random_range(0..unvisited.len())];

            Self::remove_wall(maze, cell, direction, neighbour)?;
            maze.room_mut(neighbour)?.mark_visited()?;

            cell_stack.push(neighbour);
            carved += 1;
        }

        Ok(carved)
    }

    fn unvisited_neighbours(
        maze: &Maze,
        cell: Cell,
    ) -> Result<Vec<(Direction, Cell)>, MazeError> {
        let mut unvisited = Vec::with_capacity(DIRECTIONS.len());

        for direction in DIRECTIONS {
            if let Some(neighbour) = maze.neighbour(cell, direction) {
                if !maze.room(neighbour)?.is_visited() {
                    unvisited.push((direction, neighbour));
                }
            }
        }

        Ok(unvisited)
    }

    // The door of `cell` facing `direction` and the door of `neighbour` facing
    // back both open up.
    fn remove_wall(
        maze: &mut Maze,
        cell: Cell,
        direction: Direction,
        neighbour: Cell,
    ) -> Result<(), MazeError> {
        maze.room_mut(cell)?.carve_passage(direction)?;
        maze.room_mut(neighbour)?.carve_passage(direction.opposite())?;

        event!(
            tracing::Level::TRACE,
            "Carved passage {} -- {} ({})",
            cell,
            neighbour,
            direction
        );

        Ok(())
    }
}
