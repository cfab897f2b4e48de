use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::cell::CellState;

/// Neighbor counts range from 0 to 8 in a Moore neighborhood.
const COUNT_SLOTS: usize = 9;

/// A life-like transition table in birth/survival form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub birth: [bool; COUNT_SLOTS],
    pub survive: [bool; COUNT_SLOTS],
}

impl Rule {
    /// Conway's rule, B3/S23.
    pub const CONWAY: Rule = Rule {
        birth: [false, false, false, true, false, false, false, false, false],
        survive: [false, false, true, true, false, false, false, false, false],
    };

    pub fn new<B, S>(birth: B, survive: S) -> Self
    where
        B: IntoIterator<Item = usize>,
        S: IntoIterator<Item = usize>,
    {
        let mut rule = Self {
            birth: [false; COUNT_SLOTS],
            survive: [false; COUNT_SLOTS],
        };

        for count in birth.into_iter().filter(|count| *count < COUNT_SLOTS) {
            rule.birth[count] = true;
        }

        for count in survive.into_iter().filter(|count| *count < COUNT_SLOTS) {
            rule.survive[count] = true;
        }

        rule
    }

    pub fn next_state(&self, state: CellState, alive_neighbor_count: usize) -> CellState {
        let table = match state {
            CellState::Alive => &self.survive,
            CellState::Dead => &self.birth,
        };

        let alive = table.get(alive_neighbor_count).copied().unwrap_or(false);

        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::CONWAY
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn digits(table: &[bool; COUNT_SLOTS]) -> String {
            table
                .iter()
                .enumerate()
                .filter(|(_, enabled)| **enabled)
                .map(|(count, _)| char::from(b'0' + count as u8))
                .collect()
        }

        write!(f, "B{}/S{}", digits(&self.birth), digits(&self.survive))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleParseError {
    #[error("expected B<digits>/S<digits>, got {0:?}")]
    Malformed(String),

    #[error("invalid neighbor count {0:?}, counts must be digits 0 to 8")]
    InvalidCount(char),
}

impl FromStr for Rule {
    type Err = RuleParseError;

    /// Parses `B3/S23` style notation. Parts may come in either order and are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || RuleParseError::Malformed(s.to_owned());

        let (first, second) = s.trim().split_once('/').ok_or_else(malformed)?;

        let mut birth = None;
        let mut survive = None;

        for part in [first, second] {
            let mut chars = part.trim().chars();
            let slot = match chars.next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => &mut birth,
                Some('S') => &mut survive,
                _ => return Err(malformed()),
            };

            if slot.is_some() {
                return Err(malformed());
            }

            let counts = chars
                .map(|c| match c.to_digit(10) {
                    Some(count) if (count as usize) < COUNT_SLOTS => Ok(count as usize),
                    _ => Err(RuleParseError::InvalidCount(c)),
                })
                .collect::<Result<Vec<_>, _>>()?;

            *slot = Some(counts);
        }

        match (birth, survive) {
            (Some(birth), Some(survive)) => Ok(Rule::new(birth, survive)),
            _ => Err(malformed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_conway() {
        assert_eq!(Rule::default(), Rule::new([3], [2, 3]));
        assert_eq!(Rule::default().to_string(), "B3/S23");
    }

    #[test]
    fn parses_notation() {
        assert_eq!("B3/S23".parse::<Rule>().unwrap(), Rule::CONWAY);
        assert_eq!("s23/b3".parse::<Rule>().unwrap(), Rule::CONWAY);
        assert_eq!("B36/S23".parse::<Rule>().unwrap(), Rule::new([3, 6], [2, 3]));
        assert_eq!("B/S".parse::<Rule>().unwrap(), Rule::new([], []));
    }

    #[test]
    fn display_round_trips() {
        let highlife = Rule::new([3, 6], [2, 3]);
        assert_eq!(highlife.to_string().parse::<Rule>().unwrap(), highlife);
    }

    #[test]
    fn rejects_malformed_notation() {
        assert!(matches!(
            "B3S23".parse::<Rule>(),
            Err(RuleParseError::Malformed(_))
        ));
        assert!(matches!(
            "B3/B23".parse::<Rule>(),
            Err(RuleParseError::Malformed(_))
        ));
        assert_eq!(
            "B9/S23".parse::<Rule>(),
            Err(RuleParseError::InvalidCount('9'))
        );
        assert_eq!(
            "B3/S2x".parse::<Rule>(),
            Err(RuleParseError::InvalidCount('x'))
        );
    }

    #[test]
    fn counts_beyond_the_neighborhood_are_dead() {
        let everything = Rule::new(0..9, 0..9);
        assert_eq!(everything.next_state(CellState::Alive, 9), CellState::Dead);
        assert_eq!(everything.next_state(CellState::Dead, 8), CellState::Alive);
    }
}
