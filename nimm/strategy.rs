//! Move selection for the computer opponents.
//!
//! [`winning_move`] is the perfect engine: it reduces some heap so that the
//! nim-sum of the position becomes zero, which forces a win whenever the
//! nim-sum was nonzero to begin with. [`blunder_move`] deliberately leaves
//! the nim-sum nonzero instead, handing the opponent a winning position.
//! Both are pure functions of the current heaps; the one-shot trigger that
//! decides *when* to blunder lives in [`crate::session`].

use rand::Rng;

use crate::heaps::{Heaps, Move};

/// Find the move that zeroes the nim-sum, if one exists.
///
/// Returns `None` when the nim-sum is already zero: every move then loses
/// against perfect play, and the caller decides how to flail (see
/// [`largest_heap_move`]). Heaps are scanned in index order, so ties break
/// towards the lowest-indexed heap that can be reduced to its target size
/// `size ^ nim_sum`.
#[must_use]
pub fn winning_move(heaps: &Heaps) -> Option<Move> {
    let nim_sum = heaps.nim_sum();
    if nim_sum.is_zero() {
        return None;
    }
    for (heap, &size) in heaps.stones().iter().enumerate() {
        let target = size ^ nim_sum.value();
        if target < size {
            return Some(Move {
                heap,
                stones: size - target,
            });
        }
    }
    // The heap contributing the highest set bit of a nonzero nim-sum always
    // shrinks when xored with it.
    unreachable!("no reducible heap despite nonzero nim-sum {nim_sum}")
}

/// Find a legal move that leaves the nim-sum nonzero.
///
/// Perturbs the correct move at the first reducible heap: one stone fewer
/// when the correct amount exceeds one, otherwise one stone more when the
/// heap survives it. When every reducible heap can only be emptied outright,
/// or no heap is reducible at all, falls back to [`largest_heap_move`].
#[must_use]
pub fn blunder_move(heaps: &Heaps, rng: &mut impl Rng) -> Move {
    let nim_sum = heaps.nim_sum();
    for (heap, &size) in heaps.stones().iter().enumerate() {
        let target = size ^ nim_sum.value();
        if target < size {
            let correct = size - target;
            if correct > 1 {
                return Move {
                    heap,
                    stones: correct - 1,
                };
            }
            if correct < size {
                return Move {
                    heap,
                    stones: correct + 1,
                };
            }
        }
    }
    largest_heap_move(heaps, rng)
}

/// Remove a uniformly random number of stones from the largest heap, first
/// heap on ties.
///
/// This is the shared fallback for positions where no winning move exists,
/// reachable in play only after the human correctly exploits an induced
/// blunder.
pub fn largest_heap_move(heaps: &Heaps, rng: &mut impl Rng) -> Move {
    let mut heap = 0;
    for (idx, &size) in heaps.stones().iter().enumerate() {
        if size > heaps.size(heap) {
            heap = idx;
        }
    }
    Move {
        heap,
        stones: rng.random_range(1..=heaps.size(heap)),
    }
}
