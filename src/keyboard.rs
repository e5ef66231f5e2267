use rand::Rng;

use crate::error::{Result, TypoError};
use crate::layout::{Hand, KeyboardLayout};

/// Relative likelihood of picking a horizontal vs. a vertical neighbour.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NeighborRatio {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Default for NeighborRatio {
    fn default() -> Self {
        Self {
            horizontal: 9.0,
            vertical: 1.0,
        }
    }
}

impl NeighborRatio {
    /// Largest accepted weight; each neighbour is repeated at most this many times.
    pub const MAX_WEIGHT: f64 = u16::MAX as f64;

    pub fn new(horizontal: f64, vertical: f64) -> Result<Self> {
        let ratio = Self {
            horizontal,
            vertical,
        };
        ratio.validate()?;
        Ok(ratio)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("horizontal", self.horizontal), ("vertical", self.vertical)] {
            if !value.is_finite() || !(0.0..=Self::MAX_WEIGHT).contains(&value) {
                return Err(TypoError::InvalidNeighborRatio(format!(
                    "{name} weight must be between 0 and {}, got {value}",
                    Self::MAX_WEIGHT
                )));
            }
        }
        Ok(())
    }

    fn repeats(weight: f64) -> usize {
        // Unvalidated ratios are clamped.
        (weight.min(Self::MAX_WEIGHT).round_ties_even() as usize).max(1)
    }
}

/// Keyboard-adjacency lookups against one layout.
#[derive(Debug, Clone, Copy)]
pub struct NeighborResolver<'a> {
    layout: &'a KeyboardLayout,
    horizontal: usize,
    vertical: usize,
}

impl<'a> NeighborResolver<'a> {
    pub fn new(layout: &'a KeyboardLayout, ratio: NeighborRatio) -> Self {
        Self {
            layout,
            horizontal: NeighborRatio::repeats(ratio.horizontal),
            vertical: NeighborRatio::repeats(ratio.vertical),
        }
    }

    pub fn layout(&self) -> &'a KeyboardLayout {
        self.layout
    }

    /// Multiset of keys adjacent to `c` (expected lowercase).
    ///
    /// Row neighbours are repeated `horizontal` times and column neighbours
    /// `vertical` times, for every cell holding `c`. Characters absent from the
    /// layout (punctuation, digits on letter-only grids) have no neighbours.
    pub fn neighbors(&self, c: char) -> Vec<char> {
        let grid = self.layout.grid_for(c);
        let mut out = Vec::new();

        for (row, col) in grid.positions(c) {
            let horizontal = [col.checked_sub(1), Some(col + 1)]
                .into_iter()
                .flatten()
                .filter_map(|cc| grid.cell(row, cc));
            for key in horizontal {
                out.extend(std::iter::repeat(key).take(self.horizontal));
            }

            let vertical = [row.checked_sub(1), Some(row + 1)]
                .into_iter()
                .flatten()
                .filter_map(|rr| grid.cell(rr, col));
            for key in vertical {
                out.extend(std::iter::repeat(key).take(self.vertical));
            }
        }

        out
    }

    /// A random neighbour of `c`, carrying over its case.
    pub fn adjacent_char(&self, c: char, rng: &mut impl Rng) -> Option<char> {
        let neighbors = self.neighbors(to_lower(c));
        if neighbors.is_empty() {
            return None;
        }
        let chosen = neighbors[rng.gen_range(0..neighbors.len())];
        Some(if c.is_uppercase() {
            to_upper(chosen)
        } else {
            chosen
        })
    }

    pub fn hand_of(&self, c: char) -> Option<Hand> {
        self.layout.hand_of(to_lower(c))
    }
}

fn to_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn to_upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeats_round_half_to_even_with_floor_of_one() {
        assert_eq!(NeighborRatio::repeats(9.0), 9);
        assert_eq!(NeighborRatio::repeats(2.5), 2);
        assert_eq!(NeighborRatio::repeats(3.5), 4);
        assert_eq!(NeighborRatio::repeats(0.0), 1);
        assert_eq!(NeighborRatio::repeats(0.4), 1);
        assert_eq!(NeighborRatio::repeats(1e30), u16::MAX as usize);
    }
}
