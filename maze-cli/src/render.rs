use maze_core::{Direction, DoorState, Maze};

use std::fmt::Write;

// Wall glyphs: open, closed, locked, sealed.
fn horizontal(state: DoorState) -> &'static str {
    match state {
        DoorState::Open => "   ",
        DoorState::Closed => "---",
        DoorState::Locked => "===",
        DoorState::PermanentlyLocked => "###",
    }
}

fn vertical(state: DoorState) -> char {
    match state {
        DoorState::Open => ' ',
        DoorState::Closed => '|',
        DoorState::Locked => ':',
        DoorState::PermanentlyLocked => '#',
    }
}

/// Draws the grid as text, one room per 3x1 block.
///
/// `@` marks the player, `S` the start room and `E` the exit room.
pub fn render(maze: &Maze) -> String {
    let mut out = String::new();

    for room_row in maze.iter_rooms().collect::<Vec<_>>().chunks(maze.cols()) {
        out.push('+');
        for room in room_row {
            out.push_str(horizontal(room.door(Direction::North).state()));
            out.push('+');
        }
        out.push('\n');

        if let Some(first) = room_row.first() {
            out.push(vertical(first.door(Direction::West).state()));
        }
        for room in room_row {
            let marker = if room.cell() == maze.player() {
                '@'
            } else if room.is_exit() {
                'E'
            } else if room.is_start() {
                'S'
            } else {
                ' '
            };
            let _ = write!(out, " {marker} ");
            out.push(vertical(room.door(Direction::East).state()));
        }
        out.push('\n');
    }

    out.push('+');
    for room in maze.iter_rooms().skip(maze.rows().saturating_sub(1) * maze.cols()) {
        out.push_str(horizontal(room.door(Direction::South).state()));
        out.push('+');
    }
    out.push('\n');

    out
}
