use std::io::{self, Write};

use colored::Colorize;
use itertools::Itertools;
use libgame::{Board, CellState};

use crate::State;

pub const ALIVE_MARKER: char = 'x';
pub const DEAD_MARKER: char = '.';

const CLEAR_SCREEN: &str = "\x1B[H\x1B[2J";
const BOARD_GAP: &str = "  ";

pub fn board_lines(board: &Board) -> Vec<String> {
    board
        .render()
        .iter()
        .map(|row| {
            row.iter()
                .map(|state| match state {
                    CellState::Alive => ALIVE_MARKER,
                    CellState::Dead => DEAD_MARKER,
                })
                .collect()
        })
        .collect()
}

/// Lays every board out side by side with a status line below.
pub fn draw(state: &State) -> String {
    let boards = state.boards.iter().map(board_lines).collect_vec();
    let row_count = boards.iter().map(Vec::len).max().unwrap_or(0);

    let mut frame = String::new();

    for row in 0..row_count {
        let line = boards
            .iter()
            .filter_map(|lines| lines.get(row))
            .join(BOARD_GAP);

        frame.push_str(&line);
        frame.push('\n');
    }

    let live_counts = state
        .boards
        .iter()
        .map(|board| format!("{} alive", board.live_cell_count()).green())
        .join(" | ");

    frame.push_str(&format!("{} | {}\n", format!("turn {}", state.turn).bold(), live_counts));

    frame
}

pub fn present(frame: &str) {
    let mut stdout = io::stdout().lock();

    // A closed stdout only means nobody is watching.
    let _ = write!(stdout, "{CLEAR_SCREEN}{frame}");
    let _ = stdout.flush();
}
