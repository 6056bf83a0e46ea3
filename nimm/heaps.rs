//! Heap state and moves.

use std::fmt::Display;
use std::ops::RangeInclusive;

use rand::Rng;

use crate::{display, nimber::Nimber};

/// Removal of stones from a single heap.
///
/// Legal only when the target heap still holds at least [`stones`](Self::stones)
/// stones; a move always removes at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    /// Index of the heap to remove from
    pub heap: usize,
    /// Number of stones to remove
    pub stones: u32,
}

/// Ordered sequence of Nim heaps.
///
/// The heap count is fixed at construction; play only ever shrinks heaps,
/// and the game ends exactly when every heap reaches zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heaps {
    stones: Vec<u32>,
}

impl Display for Heaps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Heaps")?;
        display::brackets(f, |f| display::commas(f, &self.stones))
    }
}

impl Heaps {
    /// Create heaps with the given stone counts
    #[inline]
    pub fn new(stones: Vec<u32>) -> Self {
        Self { stones }
    }

    /// Create `count` heaps of `size` stones each
    pub fn uniform(count: usize, size: u32) -> Self {
        Self {
            stones: vec![size; count],
        }
    }

    /// Create `count` heaps with sizes drawn uniformly from `sizes`
    pub fn random(count: usize, sizes: RangeInclusive<u32>, rng: &mut impl Rng) -> Self {
        Self {
            stones: (0..count).map(|_| rng.random_range(sizes.clone())).collect(),
        }
    }

    /// Get the stone counts of all heaps, in heap order
    #[inline]
    pub fn stones(&self) -> &[u32] {
        &self.stones
    }

    /// Get the number of heaps
    #[inline]
    pub fn count(&self) -> usize {
        self.stones.len()
    }

    /// Get the stones remaining in heap `heap`
    #[inline]
    pub fn size(&self, heap: usize) -> u32 {
        self.stones[heap]
    }

    /// Total stones remaining across all heaps
    pub fn total(&self) -> u32 {
        self.stones.iter().sum()
    }

    /// Check if every heap is empty
    pub fn is_cleared(&self) -> bool {
        self.stones.iter().all(|&stones| stones == 0)
    }

    /// Nim-sum of the position
    pub fn nim_sum(&self) -> Nimber {
        Nimber::sum(self.stones.iter().copied())
    }

    /// Check whether `m` removes at least one stone and no more than remain
    pub fn is_legal(&self, m: Move) -> bool {
        m.heap < self.count() && m.stones >= 1 && m.stones <= self.stones[m.heap]
    }

    /// Remove the stones described by `m`.
    ///
    /// # Panics
    /// Panics on an illegal move. Both engines produce only legal moves and
    /// human moves are validated first, so this is an internal fault.
    pub fn apply(&mut self, m: Move) {
        assert!(
            self.is_legal(m),
            "illegal move: remove {} stones from heap {} of {}",
            m.stones,
            m.heap,
            self
        );
        self.stones[m.heap] -= m.stones;
    }
}

#[cfg(any(test, feature = "quickcheck"))]
impl quickcheck::Arbitrary for Heaps {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        use quickcheck::Arbitrary;

        let count = usize::arbitrary(g) % 4 + 1;
        Heaps::new((0..count).map(|_| u32::arbitrary(g) % 32).collect())
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        use quickcheck::Arbitrary;

        Box::new(
            self.stones
                .clone()
                .shrink()
                .filter(|stones| !stones.is_empty())
                .map(Heaps::new),
        )
    }
}
