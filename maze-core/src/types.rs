use crate::{
    constants::{DIRECTIONS, MAX_ROOM_COUNT, MIN_ROOM_COUNT},
    error::MazeError,
    questions::Question,
};

use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::event;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, Display,
)]
#[display("[{row}, {col}]")]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    // The cell one step away towards `direction`, as long as it stays
    // inside a grid of `rows` x `cols`.
    pub fn step(&self, direction: Direction, rows: usize, cols: usize) -> Option<Cell> {
        let (d_row, d_col) = direction.delta();

        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;

        if row < rows && col < cols {
            Some(Cell::new(row, col))
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Row and column offsets of a single step in this direction.
    pub const fn delta(&self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    pub const fn opposite(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    // Slot of this direction inside a room's door array. Must follow the
    // order of `DIRECTIONS`.
    pub(crate) const fn index(&self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }
}

/// The four observable states of a [Door].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum DoorState {
    Open,
    Closed,
    Locked,
    PermanentlyLocked,
}

/// Result of asking a door (or a wall) to change state.
///
/// Refusals are not errors: a permanently locked door simply answers
/// [DoorTransition::NotPermitted] and keeps its state.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum DoorTransition {
    Applied,
    NotPermitted,
}

impl DoorTransition {
    pub fn is_applied(&self) -> bool {
        matches!(self, DoorTransition::Applied)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    direction: Direction,
    locked: bool,
    closed: bool,
    permanently_locked: bool,
    questions: Vec<Question>,
}

impl Door {
    pub fn new(direction: Direction) -> Self {
        Door {
            direction,
            locked: false,
            closed: true,
            permanently_locked: false,
            questions: Vec::new(),
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_locked(&self) -> bool {
        self.locked || self.permanently_locked
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_permanently_locked(&self) -> bool {
        self.permanently_locked
    }

    pub fn is_passable(&self) -> bool {
        !self.locked && !self.closed && !self.permanently_locked
    }

    pub fn state(&self) -> DoorState {
        if self.permanently_locked {
            DoorState::PermanentlyLocked
        } else if self.locked {
            DoorState::Locked
        } else if self.closed {
            DoorState::Closed
        } else {
            DoorState::Open
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
    }

    pub fn lock(&mut self) -> DoorTransition {
        if self.permanently_locked {
            return DoorTransition::NotPermitted;
        }

        self.locked = true;
        DoorTransition::Applied
    }

    pub fn open(&mut self) -> DoorTransition {
        if self.permanently_locked {
            return DoorTransition::NotPermitted;
        }

        self.locked = false;
        self.closed = false;
        DoorTransition::Applied
    }

    // Idempotent, there is no way back from here.
    pub fn permanently_lock(&mut self) -> DoorTransition {
        self.permanently_locked = true;
        self.locked = true;
        DoorTransition::Applied
    }

    /// Puts the door back to closed and unlocked.
    ///
    /// A permanent lock survives the reset: a wall that has been sealed stays sealed.
    /// Starting a new game builds a brand new grid instead of resetting doors in place.
    pub fn reset(&mut self) {
        self.locked = self.permanently_locked;
        self.closed = true;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    cell: Cell,
    doors: [Door; 4],
    passages: [bool; 4],
    visited: bool,
    start: bool,
    exit: bool,
}

impl Room {
    pub fn new(cell: Cell) -> Self {
        Room {
            cell,
            doors: DIRECTIONS.map(Door::new),
            passages: [false; 4],
            visited: false,
            start: false,
            exit: false,
        }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn row(&self) -> usize {
        self.cell.row
    }

    pub fn col(&self) -> usize {
        self.cell.col
    }

    pub fn door(&self, direction: Direction) -> &Door {
        &self.doors[direction.index()]
    }

    pub(crate) fn door_mut(&mut self, direction: Direction) -> &mut Door {
        &mut self.doors[direction.index()]
    }

    pub fn iter_doors(&self) -> impl Iterator<Item = &Door> {
        self.doors.iter()
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn mark_visited(&mut self) -> Result<(), MazeError> {
        if self.visited {
            return Err(MazeError::AlreadyVisited(self.cell));
        }

        self.visited = true;
        Ok(())
    }

    pub fn is_start(&self) -> bool {
        self.start
    }

    pub fn mark_start(&mut self) -> Result<(), MazeError> {
        if self.start {
            return Err(MazeError::AlreadyStart(self.cell));
        }

        self.start = true;
        Ok(())
    }

    pub fn is_exit(&self) -> bool {
        self.exit
    }

    pub fn mark_exit(&mut self) -> Result<(), MazeError> {
        if self.exit {
            return Err(MazeError::AlreadyExit(self.cell));
        }

        self.exit = true;
        Ok(())
    }

    /// Whether the generator carved a passage through this side of the room.
    pub fn has_passage(&self, direction: Direction) -> bool {
        self.passages[direction.index()]
    }

    // Carving is a one-shot operation per side; carving twice means the
    // generator walked into an already visited room.
    pub(crate) fn carve_passage(&mut self, direction: Direction) -> Result<(), MazeError> {
        if self.passages[direction.index()] {
            return Err(MazeError::PassageAlreadyOpen {
                cell: self.cell,
                direction,
            });
        }

        if !self.door_mut(direction).open().is_applied() {
            return Err(MazeError::SealedWall {
                cell: self.cell,
                direction,
            });
        }

        self.passages[direction.index()] = true;
        Ok(())
    }

    // Walls facing the outside of the grid.
    pub(crate) fn seal(&mut self, direction: Direction) {
        let _ = self.door_mut(direction).permanently_lock();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WallOp {
    Open,
    Lock,
    PermanentlyLock,
}

impl WallOp {
    fn apply(&self, door: &mut Door) -> DoorTransition {
        match self {
            WallOp::Open => door.open(),
            WallOp::Lock => door.lock(),
            WallOp::PermanentlyLock => door.permanently_lock(),
        }
    }
}

/// Number of rooms of a `rows` x `cols` grid, if it is a size the game supports.
pub(crate) fn room_count(rows: usize, cols: usize) -> Result<usize, MazeError> {
    rows.checked_mul(cols)
        .filter(|count| (MIN_ROOM_COUNT..=MAX_ROOM_COUNT).contains(count))
        .ok_or(MazeError::InvalidDimensions { rows, cols })
}

/// A `rows` x `cols` grid of rooms plus the position of the player.
///
/// Rooms are stored row-major and never point at each other: adjacency is
/// always derived from coordinates, see [Maze::neighbour].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MazeRecord")]
pub struct Maze {
    rows: usize,
    cols: usize,
    rooms: Vec<Room>,
    player: Cell,
}

// Unchecked wire shape of a [Maze].
#[derive(Deserialize)]
struct MazeRecord {
    rows: usize,
    cols: usize,
    rooms: Vec<Room>,
    player: Cell,
}

impl TryFrom<MazeRecord> for Maze {
    type Error = MazeError;

    fn try_from(record: MazeRecord) -> Result<Self, Self::Error> {
        let maze = Maze {
            rows: record.rows,
            cols: record.cols,
            rooms: record.rooms,
            player: record.player,
        };

        maze.validate()?;

        Ok(maze)
    }
}

impl Maze {
    pub(crate) fn from_rooms(rows: usize, cols: usize, rooms: Vec<Room>) -> Self {
        Maze {
            rows,
            cols,
            rooms,
            player: Cell::new(0, 0),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    fn index_of(&self, cell: Cell) -> Result<usize, MazeError> {
        if !self.contains(cell) {
            return Err(MazeError::OutOfBounds {
                row: cell.row,
                col: cell.col,
                rows: self.rows,
                cols: self.cols,
            });
        }

        Ok(cell.row * self.cols + cell.col)
    }

    pub fn room(&self, cell: Cell) -> Result<&Room, MazeError> {
        let idx = self.index_of(cell)?;
        Ok(&self.rooms[idx])
    }

    pub(crate) fn room_mut(&mut self, cell: Cell) -> Result<&mut Room, MazeError> {
        let idx = self.index_of(cell)?;
        Ok(&mut self.rooms[idx])
    }

    pub fn iter_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn neighbour(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        if !self.contains(cell) {
            return None;
        }

        cell.step(direction, self.rows, self.cols)
    }

    pub fn start_cell(&self) -> Cell {
        Cell::new(0, 0)
    }

    pub fn exit_cell(&self) -> Cell {
        Cell::new(self.rows - 1, self.cols - 1)
    }

    pub fn player(&self) -> Cell {
        self.player
    }

    pub fn set_player(&mut self, cell: Cell) -> Result<(), MazeError> {
        self.index_of(cell)?;
        self.player = cell;
        Ok(())
    }

    pub fn current_room(&self) -> &Room {
        // The player position is validated on every write.
        &self.rooms[self.player.row * self.cols + self.player.col]
    }

    pub fn can_move(&self, direction: Direction) -> bool {
        self.neighbour(self.player, direction).is_some()
            && self.current_room().door(direction).is_passable()
    }

    /// Moves the player through an open door. Returns the new position, or `None`
    /// when the move is not allowed, in which case nothing changes.
    pub fn move_player(&mut self, direction: Direction) -> Option<Cell> {
        if !self.can_move(direction) {
            return None;
        }

        let target = self.neighbour(self.player, direction)?;
        self.player = target;

        event!(tracing::Level::TRACE, "Player moved {} to {}", direction, target);

        Some(target)
    }

    pub fn has_possible_moves(&self) -> bool {
        DIRECTIONS
            .iter()
            .any(|direction| self.can_move(*direction))
    }

    pub fn is_at_exit(&self) -> bool {
        self.player == self.exit_cell()
    }

    pub fn open_door(
        &mut self,
        cell: Cell,
        direction: Direction,
    ) -> Result<DoorTransition, MazeError> {
        self.mutate_wall(cell, direction, WallOp::Open)
    }

    pub fn lock_door(
        &mut self,
        cell: Cell,
        direction: Direction,
    ) -> Result<DoorTransition, MazeError> {
        self.mutate_wall(cell, direction, WallOp::Lock)
    }

    pub fn permanently_lock_door(
        &mut self,
        cell: Cell,
        direction: Direction,
    ) -> Result<DoorTransition, MazeError> {
        self.mutate_wall(cell, direction, WallOp::PermanentlyLock)
    }

    pub(crate) fn attach_question(
        &mut self,
        cell: Cell,
        direction: Direction,
        question: Question,
    ) -> Result<(), MazeError> {
        self.room_mut(cell)?.door_mut(direction).add_question(question);
        Ok(())
    }

    // Applies `op` to both sides of the wall between `cell` and its neighbour.
    // Either both doors change or neither does.
    fn mutate_wall(
        &mut self,
        cell: Cell,
        direction: Direction,
        op: WallOp,
    ) -> Result<DoorTransition, MazeError> {
        let far_cell = self
            .neighbour(cell, direction)
            .ok_or(MazeError::NoNeighbour { cell, direction })?;
        let opposite = direction.opposite();

        let sealed = self.room(cell)?.door(direction).is_permanently_locked()
            || self.room(far_cell)?.door(opposite).is_permanently_locked();

        if sealed && op != WallOp::PermanentlyLock {
            event!(
                tracing::Level::WARN,
                "Refused {:?} on sealed wall {} of room {}",
                op,
                direction,
                cell
            );

            return Ok(DoorTransition::NotPermitted);
        }

        let near = op.apply(self.room_mut(cell)?.door_mut(direction));
        let far = op.apply(self.room_mut(far_cell)?.door_mut(opposite));
        debug_assert_eq!(near, far);

        event!(
            tracing::Level::TRACE,
            "{:?} applied to wall {} -- {}, now {}",
            op,
            cell,
            far_cell,
            self.room(cell)?.door(direction).state()
        );

        Ok(near)
    }

    /// Checks every structural invariant of a grid that did not come from the builder,
    /// e.g. one restored from a snapshot.
    pub fn validate(&self) -> Result<(), MazeError> {
        let expected_rooms = room_count(self.rows, self.cols)?;

        if self.rooms.len() != expected_rooms {
            return Err(MazeError::CorruptSnapshot(
                "room count does not match the grid size",
            ));
        }

        if !self.contains(self.player) {
            return Err(MazeError::CorruptSnapshot("player is outside of the grid"));
        }

        for (idx, room) in self.rooms.iter().enumerate() {
            let expected = Cell::new(idx / self.cols, idx % self.cols);
            if room.cell() != expected {
                return Err(MazeError::CorruptSnapshot("room coordinates are out of order"));
            }

            if room.is_start() != (expected == self.start_cell()) {
                return Err(MazeError::CorruptSnapshot("start room is misplaced"));
            }

            if room.is_exit() != (expected == self.exit_cell()) {
                return Err(MazeError::CorruptSnapshot("exit room is misplaced"));
            }

            for (direction, door) in DIRECTIONS.into_iter().zip(room.iter_doors()) {
                if door.direction() != direction {
                    return Err(MazeError::CorruptSnapshot("door is filed under the wrong direction"));
                }

                match self.neighbour(expected, direction) {
                    None if !door.is_permanently_locked() => {
                        return Err(MazeError::CorruptSnapshot("boundary door is not sealed"));
                    }
                    None => {}
                    Some(far_cell) => {
                        let far = self.room(far_cell)?.door(direction.opposite());
                        if far.state() != door.state() {
                            return Err(MazeError::CorruptSnapshot(
                                "the two sides of a wall disagree",
                            ));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
