//! Nim-sum arithmetic.

use auto_ops::impl_op_ex;
use std::fmt::Display;

/// Value of a Nim position, with addition overloaded to the nim-sum.
///
/// The nim-sum of a set of heaps is the bitwise XOR of their sizes. The
/// player to move loses against perfect play if and only if it is zero.
#[repr(transparent)]
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nimber(u32);

impl Nimber {
    /// Construct new nimber
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the underlying nimber value
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Check if the nimber is zero, i.e. the position is lost for the mover
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Nim-sum of a sequence of heap sizes
    pub fn sum(heaps: impl IntoIterator<Item = u32>) -> Self {
        Self(heaps.into_iter().fold(0, |acc, heap| acc ^ heap))
    }
}

impl From<u32> for Nimber {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

// xor is correct, that's how nimber addition works
impl_op_ex!(+|lhs: &Nimber, rhs: &Nimber| -> Nimber { Nimber(lhs.0 ^ rhs.0) });
impl_op_ex!(+=|lhs: &mut Nimber, rhs: &Nimber| { lhs.0 ^= rhs.0 });

impl Display for Nimber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            write!(f, "0")
        } else if self.0 == 1 {
            write!(f, "*")
        } else {
            write!(f, "*{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_is_xor() {
        assert_eq!(Nimber::sum([1, 2, 3]), Nimber::new(0));
        assert_eq!(Nimber::sum([5, 3]), Nimber::new(6));
        assert_eq!(Nimber::sum([15, 21, 25]), Nimber::new(3));
        assert_eq!(Nimber::sum([]), Nimber::new(0));
    }

    #[test]
    fn addition_cancels() {
        let mut acc = Nimber::new(0);
        for heap in [7, 11, 7, 11] {
            acc += Nimber::new(heap);
        }
        assert!(acc.is_zero());
        assert_eq!(Nimber::new(4) + Nimber::new(6), Nimber::new(2));
    }

    #[test]
    fn star_notation() {
        assert_eq!(Nimber::new(0).to_string(), "0");
        assert_eq!(Nimber::new(1).to_string(), "*");
        assert_eq!(Nimber::new(6).to_string(), "*6");
    }
}
