use std::fmt;

/// A grid coordinate, `x` is the column and `y` is the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The Moore neighborhood of this position, clipped to a `columns` x `rows` grid.
    /// Offsets landing outside the grid are dropped, never wrapped.
    pub fn neighbors(self, columns: usize, rows: usize) -> impl Iterator<Item = Position> {
        const NEIGHBOR_RELATIVE_POSITIONS: &[[isize; 2]] = &[
            [-1, -1],
            [0, -1],
            [1, -1],
            [-1, 0],
            [1, 0],
            [-1, 1],
            [0, 1],
            [1, 1],
        ];

        fn abs_pos(center_pos: usize, offset_pos: isize, limit: usize) -> Option<usize> {
            let abs_pos = center_pos.checked_add_signed(offset_pos)?;
            (abs_pos < limit).then_some(abs_pos)
        }

        NEIGHBOR_RELATIVE_POSITIONS.iter().filter_map(move |rel_pos| {
            Some(Position {
                x: abs_pos(self.x, rel_pos[0], columns)?,
                y: abs_pos(self.y, rel_pos[1], rows)?,
            })
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<[usize; 2]> for Position {
    fn from(value: [usize; 2]) -> Self {
        Self {
            x: value[0],
            y: value[1],
        }
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl From<Position> for [usize; 2] {
    fn from(value: Position) -> Self {
        [value.x, value.y]
    }
}
