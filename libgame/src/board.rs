use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    cell::{Cell, CellState},
    pos::Position,
    rule::Rule,
    sampler::{RandomSampler, Sampler},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("invalid board dimensions {rows}x{columns}, both must be positive")]
    InvalidDimension { rows: usize, columns: usize },

    #[error("position {position} is outside the {rows}x{columns} board")]
    OutOfBounds {
        position: Position,
        rows: usize,
        columns: usize,
    },

    #[error("sampler produced {actual} distinct live cells out of {population}, expected {expected}")]
    BadSample {
        expected: usize,
        actual: usize,
        population: usize,
    },
}

/// A finite, edge-clipped Game of Life grid.
///
/// Cells live in a flat arena indexed by `row * columns + column`. Generations advance in
/// three passes (count, compute, commit), so no cell ever observes a neighbor's next state
/// while the current generation is still being evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
    live_cell_count: usize,
    rule: Rule,
}

impl Board {
    /// Seeds `floor(rows * columns * density)` live cells at random.
    pub fn new(rows: usize, columns: usize, density: f64) -> Result<Self, BoardError> {
        Self::with_sampler(rows, columns, density, &mut RandomSampler::thread_local())
    }

    pub fn with_sampler<S>(
        rows: usize,
        columns: usize,
        density: f64,
        sampler: &mut S,
    ) -> Result<Self, BoardError>
    where
        S: Sampler + ?Sized,
    {
        let mut board = Self::empty(rows, columns)?;

        let initial_live_count = initial_live_count(board.population(), density);

        let population = board.population();

        for index in sampler.sample_distinct(population, initial_live_count) {
            let Some(cell) = board.cells.get_mut(index) else {
                return Err(BoardError::BadSample {
                    expected: initial_live_count,
                    actual: board.live_cell_count,
                    population,
                });
            };

            let previous = cell.set_state(CellState::Alive);
            board.track_transition(previous, CellState::Alive);
        }

        // Short or repeating samples leave too few live cells behind.
        if board.live_cell_count != initial_live_count {
            return Err(BoardError::BadSample {
                expected: initial_live_count,
                actual: board.live_cell_count,
                population,
            });
        }

        debug!(
            rows,
            columns,
            density,
            live_cells = board.live_cell_count,
            "seeded board"
        );

        Ok(board)
    }

    /// A board with every cell dead.
    pub fn empty(rows: usize, columns: usize) -> Result<Self, BoardError> {
        let population = rows
            .checked_mul(columns)
            .filter(|population| *population > 0)
            .ok_or(BoardError::InvalidDimension { rows, columns })?;

        let mut cells = Vec::with_capacity(population);
        for (y, x) in (0..rows).cartesian_product(0..columns) {
            cells.push(Cell::new(Position { x, y }, columns, rows));
        }

        Ok(Self {
            rows,
            columns,
            cells,
            live_cell_count: 0,
            rule: Rule::default(),
        })
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = rule;
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn population(&self) -> usize {
        self.cells.len()
    }

    pub fn live_cell_count(&self) -> usize {
        self.live_cell_count
    }

    pub fn dead_cell_count(&self) -> usize {
        self.population() - self.live_cell_count
    }

    pub fn cell<P>(&self, pos: P) -> Option<&Cell>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.cells.get(index)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn set_state<P>(&mut self, pos: P, state: CellState) -> Result<(), BoardError>
    where
        P: Into<Position>,
    {
        let position = pos.into();
        let index = self.pos_to_index(position).ok_or(BoardError::OutOfBounds {
            position,
            rows: self.rows,
            columns: self.columns,
        })?;

        let previous = self.cells[index].set_state(state);
        self.track_transition(previous, state);

        Ok(())
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.set_state(CellState::Dead);
        }

        self.live_cell_count = 0;
    }

    /// First pass: stores every cell's live neighbor count, read from current states only.
    /// Running it again before a commit yields the same counts.
    pub fn count_live_neighbors(&mut self) {
        let counts = self
            .cells
            .iter()
            .map(|cell| {
                cell.neighbor_positions()
                    .iter()
                    .filter(|neighbor| self.cells[self.index_of(**neighbor)].is_alive())
                    .count()
            })
            .collect_vec();

        for (cell, count) in self.cells.iter_mut().zip(counts) {
            cell.set_live_neighbor_count(count);
        }
    }

    /// Second pass: every cell prepares its next state. Nothing is applied yet.
    pub fn compute_next_states(&mut self) {
        let rule = self.rule;

        for cell in &mut self.cells {
            cell.prepare_next_state(&rule);
        }
    }

    /// Final pass: applies all prepared states at once and updates the live cell counter.
    pub fn commit(&mut self) {
        let mut born = 0;
        let mut died = 0;

        for cell in &mut self.cells {
            let previous = cell.commit_next_state();

            match (previous, cell.state()) {
                (CellState::Dead, CellState::Alive) => born += 1,
                (CellState::Alive, CellState::Dead) => died += 1,
                _ => {}
            }
        }

        self.live_cell_count = self.live_cell_count + born - died;

        trace!(born, died, live_cells = self.live_cell_count, "committed generation");
    }

    pub fn advance_generation(&mut self) {
        self.count_live_neighbors();
        self.compute_next_states();
        self.commit();
    }

    /// Row-major snapshot of the current states.
    pub fn render(&self) -> Vec<Vec<CellState>> {
        self.cells
            .chunks(self.columns)
            .map(|row| row.iter().map(Cell::state).collect_vec())
            .collect_vec()
    }

    pub fn enumerate_cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.cells.iter().map(|cell| (cell.position(), cell))
    }

    fn track_transition(&mut self, previous: CellState, next: CellState) {
        match (previous, next) {
            (CellState::Dead, CellState::Alive) => self.live_cell_count += 1,
            (CellState::Alive, CellState::Dead) => self.live_cell_count -= 1,
            _ => {}
        }
    }

    fn pos_to_index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<Position>,
    {
        let Position { x, y } = pos.into();

        if x >= self.columns {
            return None;
        }

        if y >= self.rows {
            return None;
        }

        Some(self.index_of(Position { x, y }))
    }

    /// Only valid for in-bounds positions, such as cached neighbor positions.
    fn index_of(&self, pos: Position) -> usize {
        pos.x + (pos.y * self.columns)
    }
}

fn initial_live_count(population: usize, density: f64) -> usize {
    // Float to int casts saturate, NaN and negatives land on zero.
    let live = (population as f64 * density).floor() as usize;
    live.min(population)
}
