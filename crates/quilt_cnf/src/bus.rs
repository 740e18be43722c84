//! Multi-bit signal busses.

use crate::lit::Lit;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// An ordered, fixed-width sequence of literals, least significant bit
/// first.
///
/// A bus is either a *signal* bus whose bits are freshly allocated
/// variables (see [`VarAlloc`](crate::alloc::VarAlloc)) or a *constant*
/// bus built from an integer's bit pattern with the truth sentinels.
/// Busses are plain values: cloning one duplicates the literal sequence,
/// never the underlying variables, so two clones always denote the same
/// wires.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bus {
    bits: Vec<Lit>,
}

impl Bus {
    /// Wraps an explicit literal sequence.
    pub fn new(bits: Vec<Lit>) -> Self {
        Self { bits }
    }

    /// Builds a constant bus from the two's-complement pattern of `value`.
    ///
    /// The width is the minimal number of significant bits, at least 1
    /// (so `0` becomes a 1-bit all-false bus, and negative values carry
    /// their full 64-bit pattern). No variables are allocated.
    pub fn from_value(value: i64) -> Self {
        let pattern = value as u64;
        let width = (64 - pattern.leading_zeros()).max(1) as usize;
        let bits = (0..width)
            .map(|i| {
                if pattern >> i & 1 == 1 {
                    Lit::TRUE
                } else {
                    Lit::FALSE
                }
            })
            .collect();
        Self { bits }
    }

    /// The fixed width of the bus.
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// The bit at `index`, or [`Lit::FALSE`] past the end.
    ///
    /// Binary operators use this to conceptually zero-pad the narrower
    /// operand to the wider operand's width.
    pub fn get(&self, index: usize) -> Lit {
        self.bits.get(index).copied().unwrap_or(Lit::FALSE)
    }

    /// The underlying literal sequence.
    pub fn bits(&self) -> &[Lit] {
        &self.bits
    }
}

impl Index<usize> for Bus {
    type Output = Lit;

    fn index(&self, index: usize) -> &Lit {
        &self.bits[index]
    }
}
