use std::{fs, path::Path};

use anyhow::{Context, ensure};
use libgame::Rule;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub rows: usize,
    pub columns: usize,

    /// Fraction of cells alive at turn zero, clamped into `[0, 1]` on validation.
    pub density: f64,

    /// Number of independent boards drawn side by side.
    pub boards: usize,

    pub tick_millis: u64,

    /// Stop the ticker after this many turns. Runs forever when absent.
    pub max_turns: Option<u64>,

    /// Life-like rule in B/S notation.
    pub rule: String,

    /// Start ticking right away instead of waiting for a `run` command.
    pub autostart: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 20,
            columns: 40,
            density: 0.3,
            boards: 1,
            tick_millis: 250,
            max_turns: None,
            rule: Rule::default().to_string(),
            autostart: true,
        }
    }
}

impl Config {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let config_serialized = fs::read(path).context("Couldn't read config")?;
        let config =
            serde_json::from_slice(&config_serialized).context("Couldn't deserialize config")?;
        Ok(config)
    }

    pub fn validated(mut self) -> anyhow::Result<Self> {
        ensure!(self.rows > 0, "rows must be positive");
        ensure!(self.columns > 0, "columns must be positive");
        ensure!(self.boards > 0, "at least one board is needed");

        self.density = clamp_density(self.density);
        self.parsed_rule()?;

        Ok(self)
    }

    pub fn parsed_rule(&self) -> anyhow::Result<Rule> {
        self.rule
            .parse()
            .with_context(|| format!("Invalid rule {:?}", self.rule))
    }
}

pub fn clamp_density(density: f64) -> f64 {
    if density.is_nan() {
        warn!("density is NaN, using 0");
        return 0.0;
    }

    let clamped = density.clamp(0.0, 1.0);
    if clamped != density {
        warn!(density, clamped, "density out of range, clamping");
    }

    clamped
}
