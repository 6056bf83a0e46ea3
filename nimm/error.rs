//! Errors reported by the game library.

use std::error::Error as StdError;
use std::fmt::{self, Display};

/// Invalid setup or an illegal human move.
///
/// Engine invariant violations are not represented here: a move engine that
/// produces an illegal move has a broken nim-sum computation and panics
/// rather than returning an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Error {
    /// Setup requested a game with no heaps
    NoHeaps,
    /// Setup requested heaps that start with no stones
    EmptyHeaps,
    /// Random heap sizing range is empty or permits empty heaps
    HeapSizeRange {
        /// Smallest requested heap size
        min: u32,
        /// Largest requested heap size
        max: u32,
    },
    /// Mistake window must satisfy `0 < min <= max < 1`
    MistakeWindow {
        /// Lower fraction of the initial stone total
        min: f64,
        /// Upper fraction of the initial stone total
        max: f64,
    },
    /// Human move targets a missing heap, removes no stones, or removes
    /// more stones than remain
    IllegalMove {
        /// Index of the targeted heap
        heap: usize,
        /// Requested number of stones to remove
        stones: u32,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoHeaps => write!(f, "at least one heap is required"),
            Error::EmptyHeaps => write!(f, "heaps must start with at least one stone"),
            Error::HeapSizeRange { min, max } => {
                write!(f, "invalid heap size range {min}..={max}, expected 1 <= min <= max")
            }
            Error::MistakeWindow { min, max } => {
                write!(f, "invalid mistake window ({min}, {max}), expected 0 < min <= max < 1")
            }
            Error::IllegalMove { heap, stones } => {
                write!(f, "cannot remove {stones} stones from heap {heap}")
            }
        }
    }
}

impl StdError for Error {}
