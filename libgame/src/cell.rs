use itertools::Itertools;

use crate::{pos::Position, rule::Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    Alive,

    #[default]
    Dead,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

/// One grid position together with its cached neighborhood.
///
/// Only `state` and the per-generation scratch values (`live_neighbor_count`, `next_state`)
/// change after construction. The neighborhood is fixed for the cell's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    state: CellState,
    neighbor_positions: Vec<Position>,
    live_neighbor_count: usize,
    next_state: CellState,
}

impl Cell {
    pub(crate) fn new(position: Position, columns: usize, rows: usize) -> Self {
        Self {
            position,
            state: CellState::Dead,
            neighbor_positions: position.neighbors(columns, rows).collect_vec(),
            live_neighbor_count: 0,
            next_state: CellState::Dead,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    pub fn neighbor_positions(&self) -> &[Position] {
        &self.neighbor_positions
    }

    /// The count stored by the most recent counting phase.
    pub fn live_neighbor_count(&self) -> usize {
        self.live_neighbor_count
    }

    /// Conway's transition: a live cell survives with 2 or 3 live neighbors,
    /// a dead cell is born with exactly 3. Does not touch `self`.
    pub fn compute_next_state(&self, live_neighbor_count: usize) -> CellState {
        self.compute_next_state_with(&Rule::CONWAY, live_neighbor_count)
    }

    pub fn compute_next_state_with(&self, rule: &Rule, live_neighbor_count: usize) -> CellState {
        rule.next_state(self.state, live_neighbor_count)
    }

    pub(crate) fn set_live_neighbor_count(&mut self, live_neighbor_count: usize) {
        self.live_neighbor_count = live_neighbor_count;
    }

    pub(crate) fn prepare_next_state(&mut self, rule: &Rule) {
        self.next_state = self.compute_next_state_with(rule, self.live_neighbor_count);
    }

    /// Applies the prepared next state and returns the previous one.
    pub(crate) fn commit_next_state(&mut self) -> CellState {
        std::mem::replace(&mut self.state, self.next_state)
    }

    /// Overwrites the state, returning the previous one. The prepared next state follows along
    /// so a stale commit can't resurrect an old value.
    pub(crate) fn set_state(&mut self, state: CellState) -> CellState {
        self.next_state = state;
        std::mem::replace(&mut self.state, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell_with_state(state: CellState) -> Cell {
        let mut cell = Cell::new(Position::new(1, 1), 3, 3);
        cell.set_state(state);
        cell
    }

    #[test]
    fn live_cell_with_fewer_than_two_neighbors_dies() {
        let cell = cell_with_state(CellState::Alive);
        assert_eq!(cell.compute_next_state(0), CellState::Dead);
        assert_eq!(cell.compute_next_state(1), CellState::Dead);
    }

    #[test]
    fn live_cell_with_two_or_three_neighbors_survives() {
        let cell = cell_with_state(CellState::Alive);
        assert_eq!(cell.compute_next_state(2), CellState::Alive);
        assert_eq!(cell.compute_next_state(3), CellState::Alive);
    }

    #[test]
    fn live_cell_with_more_than_three_neighbors_dies() {
        let cell = cell_with_state(CellState::Alive);
        for count in 4..=8 {
            assert_eq!(cell.compute_next_state(count), CellState::Dead, "count {count}");
        }
    }

    #[test]
    fn dead_cell_with_exactly_three_neighbors_is_born() {
        let cell = cell_with_state(CellState::Dead);
        assert_eq!(cell.compute_next_state(3), CellState::Alive);
    }

    #[test]
    fn dead_cell_with_any_other_count_stays_dead() {
        let cell = cell_with_state(CellState::Dead);
        for count in (0..=8).filter(|count| *count != 3) {
            assert_eq!(cell.compute_next_state(count), CellState::Dead, "count {count}");
        }
    }

    #[test]
    fn computing_next_state_does_not_mutate() {
        let cell = cell_with_state(CellState::Alive);
        let before = cell.clone();
        let _ = cell.compute_next_state(0);
        assert_eq!(cell, before);
    }

    #[test]
    fn commit_applies_prepared_state() {
        let mut cell = cell_with_state(CellState::Dead);
        cell.set_live_neighbor_count(3);
        cell.prepare_next_state(&Rule::CONWAY);
        assert_eq!(cell.state(), CellState::Dead);

        assert_eq!(cell.commit_next_state(), CellState::Dead);
        assert_eq!(cell.state(), CellState::Alive);
    }

    #[test]
    fn neighborhood_is_computed_at_construction() {
        let corner = Cell::new(Position::new(0, 0), 5, 4);
        assert_eq!(corner.neighbor_positions().len(), 3);

        let edge = Cell::new(Position::new(2, 0), 5, 4);
        assert_eq!(edge.neighbor_positions().len(), 5);

        let interior = Cell::new(Position::new(2, 2), 5, 4);
        assert_eq!(interior.neighbor_positions().len(), 8);
    }
}
