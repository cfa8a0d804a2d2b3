use super::MazeBuilder;
use crate::{
    constants::DIRECTIONS,
    error::MazeError,
    types::{Cell, Maze, Room, room_count},
};

impl MazeBuilder {
    // Every room gets its four closed doors. Doors facing the outside of the
    // grid are sealed for good, since there is no room behind them.
    pub(super) fn initialize_rooms(&self) -> Result<Maze, MazeError> {
        let mut rooms = Vec::with_capacity(room_count(self.rows, self.cols)?);

        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = Cell::new(row, col);
                let mut room = Room::new(cell);

                for direction in DIRECTIONS {
                    if cell.step(direction, self.rows, self.cols).is_none() {
                        room.seal(direction);
                    }
                }

                rooms.push(room);
            }
        }

        let mut maze = Maze::from_rooms(self.rows, self.cols, rooms);

        let start = maze.start_cell();
        let exit = maze.exit_cell();
        maze.room_mut(start)?.mark_start()?;
        maze.room_mut(exit)?.mark_exit()?;

        Ok(maze)
    }
}
