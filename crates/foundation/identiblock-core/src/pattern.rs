//! Pattern Deriver - Digest → mirrored 5x5 grid
//!
//! The first 15 hex characters each drive one cell of the center and right
//! columns (even value = on). Columns 3 and 4 are then mirrored onto 1 and 0.

use crate::digest::Digest;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Rows and columns in the grid
pub const GRID_SIZE: usize = 5;

/// Hex characters consumed (center column plus right half)
const CONTROL_BITS: usize = 15;

/// First column written directly from the digest
const FIRST_SOURCE_COLUMN: usize = 2;

/// (destination, source) column pairs for the mirror step
const MIRROR: [(usize, usize); 2] = [(0, 4), (1, 3)];

/// 5x5 boolean grid, row-major
///
/// Deserialization rejects grids that break the mirror invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPattern")]
pub struct Pattern {
    cells: [[bool; GRID_SIZE]; GRID_SIZE],
}

#[derive(Deserialize)]
struct RawPattern {
    cells: [[bool; GRID_SIZE]; GRID_SIZE],
}

impl TryFrom<RawPattern> for Pattern {
    type Error = Error;

    fn try_from(raw: RawPattern) -> Result<Self, Error> {
        let pattern = Self { cells: raw.cells };
        if pattern.is_symmetric() {
            Ok(pattern)
        } else {
            Err(Error::AsymmetricPattern)
        }
    }
}

impl Pattern {
    pub fn from_digest(digest: &Digest) -> Self {
        let mut cells = [[false; GRID_SIZE]; GRID_SIZE];

        for i in 0..CONTROL_BITS {
            let row = i % GRID_SIZE;
            let col = FIRST_SOURCE_COLUMN + i / GRID_SIZE;
            cells[row][col] = digest.nibble(i) % 2 == 0;
        }

        for row in cells.iter_mut() {
            for (dst, src) in MIRROR {
                row[dst] = row[src];
            }
        }

        let pattern = Self { cells };
        tracing::debug!(%digest, filled = pattern.count(), "derived pattern");
        pattern
    }

    pub fn cell(&self, row: usize, col: usize) -> bool {
        self.cells[row][col]
    }

    pub fn rows(&self) -> &[[bool; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Mirror invariant: column 0 == 4 and column 1 == 3 on every row
    pub fn is_symmetric(&self) -> bool {
        self.cells
            .iter()
            .all(|row| MIRROR.iter().all(|&(dst, src)| row[dst] == row[src]))
    }

    /// `(row, col)` of every on cell, row-major
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, on)| **on)
                .map(move |(c, _)| (r, c))
        })
    }

    pub fn count(&self) -> usize {
        self.cells.iter().flatten().filter(|on| **on).count()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &on in row {
                f.write_str(if on { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}
