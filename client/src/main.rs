use std::{
    env,
    sync::{Arc, RwLock},
    time::Duration,
};

use config::Config;
use libgame::Board;
use ticker::TickerHost;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod renderer;
mod sleeper;
mod ticker;

pub struct State {
    config: Config,
    boards: Vec<Board>,
    turn: u64,
    ticker: Option<TickerHost>,
}

impl State {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let boards = seed_boards(&config, config.rows, config.columns, config.density)?;

        Ok(Self {
            config,
            boards,
            turn: 0,
            ticker: None,
        })
    }

    /// Advances every board by one generation.
    pub fn advance(&mut self) {
        for board in &mut self.boards {
            board.advance_generation();
        }

        self.turn += 1;
    }

    pub fn finished(&self) -> bool {
        self.config
            .max_turns
            .is_some_and(|max_turns| self.turn >= max_turns)
    }

    /// Replaces every board with a freshly seeded one and restarts the turn counter.
    pub fn reseed(&mut self, rows: usize, columns: usize, density: f64) -> anyhow::Result<()> {
        self.boards = seed_boards(&self.config, rows, columns, density)?;
        self.config.rows = rows;
        self.config.columns = columns;
        self.config.density = density;
        self.turn = 0;
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_millis)
    }
}

fn seed_boards(
    config: &Config,
    rows: usize,
    columns: usize,
    density: f64,
) -> anyhow::Result<Vec<Board>> {
    let rule = config.parsed_rule()?;

    (0..config.boards)
        .map(|_| -> anyhow::Result<Board> {
            Ok(Board::new(rows, columns, density)?.with_rule(rule))
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = match env::args().nth(1).filter(|path| path != "-") {
        Some(config_path) => Config::load(config_path)?,
        None => Config::default(),
    }
    .validated()?;

    info!(
        rows = config.rows,
        columns = config.columns,
        density = config.density,
        boards = config.boards,
        rule = %config.rule,
        "starting"
    );

    let autostart = config.autostart;
    let state_arc = Arc::new(RwLock::new(State::new(config)?));

    if autostart {
        ticker::spawn_ticker(&state_arc, None)?;
    } else {
        renderer::present(&renderer::draw(&state_arc.read().unwrap()));
    }

    cli::run_cli(state_arc)
}
