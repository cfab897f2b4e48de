use std::{
    io,
    sync::{Arc, RwLock},
};

use anyhow::{Context, bail, ensure};
use libgame::{CellState, Position};
use tracing::debug;

use crate::{State, renderer, ticker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Reads commands from stdin until `exit` or end of input.
pub fn run_cli(state_arc: Arc<RwLock<State>>) -> anyhow::Result<()> {
    for line_res in io::stdin().lines() {
        let line = line_res.context("Couldn't read command")?;
        let args = line.split_whitespace();

        match handle_cmd(&state_arc, args) {
            Ok(Flow::Continue) => println!("OK"),
            Ok(Flow::Exit) => break,
            Err(e) => eprintln!("! {e:?}"),
        }
    }

    ticker::stop_ticker(&state_arc);
    Ok(())
}

pub fn handle_cmd<'a, I>(state_arc: &Arc<RwLock<State>>, mut args: I) -> anyhow::Result<Flow>
where
    I: Iterator<Item = &'a str>,
{
    let cmd = args.next().context("No command")?;
    debug!(cmd, "handling command");

    match cmd {
        "step" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            let mut state = state_arc.write().unwrap();
            for _ in 0..times {
                state.advance();
            }
        }

        "run" => {
            let rate = args.next().map(str::parse::<u64>).transpose()?;
            ticker::spawn_ticker(state_arc, rate)?;
            return Ok(Flow::Continue);
        }

        "stop" => {
            ensure!(ticker::stop_ticker(state_arc), "Not running");
            return Ok(Flow::Continue);
        }

        "clear" => {
            let mut state = state_arc.write().unwrap();
            for board in &mut state.boards {
                board.clear();
            }
        }

        "random" => {
            let mut state = state_arc.write().unwrap();

            let density = match args.next() {
                Some(density) => {
                    let density = density.parse::<f64>()?;
                    ensure!((0.0..=1.0).contains(&density), "density must be within 0 and 1");
                    density
                }
                None => state.config.density,
            };

            let (rows, columns) = (state.config.rows, state.config.columns);
            state.reseed(rows, columns, density)?;
        }

        "resize" => {
            let rows = args.next().context("missing rows")?.parse::<usize>()?;
            let columns = args.next().context("missing columns")?.parse::<usize>()?;

            let mut state = state_arc.write().unwrap();
            let density = state.config.density;
            state.reseed(rows, columns, density)?;
        }

        "toggle" => {
            let board_index = args.next().context("missing board")?.parse::<usize>()?;
            let x = args.next().context("missing column")?.parse::<usize>()?;
            let y = args.next().context("missing row")?.parse::<usize>()?;

            let mut state = state_arc.write().unwrap();
            let board = state
                .boards
                .get_mut(board_index)
                .context("No such board")?;

            let position = Position { x, y };
            let toggled = match board.cell(position).context("No such cell")?.state() {
                CellState::Alive => CellState::Dead,
                CellState::Dead => CellState::Alive,
            };

            board.set_state(position, toggled)?;
        }

        "exit" => {
            return Ok(Flow::Exit);
        }

        _ => bail!("Unknown command"),
    }

    redraw(state_arc);
    Ok(Flow::Continue)
}

fn redraw(state_arc: &Arc<RwLock<State>>) {
    let frame = renderer::draw(&state_arc.read().unwrap());
    renderer::present(&frame);
}
