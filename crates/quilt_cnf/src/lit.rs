//! Boolean literals over the shared variable space.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;

/// Variable id reserved for the constant-truth sentinel.
const SENTINEL_VAR: u32 = 1;

/// A Boolean literal: a variable with a polarity.
///
/// Encoded as a nonzero `i32` in the DIMACS convention — positive asserts
/// the variable, negative negates it. Variable 1 is reserved: its asserted
/// form is [`Lit::TRUE`] and its negated form is [`Lit::FALSE`], so plain
/// negation maps each constant onto the other.
///
/// Literals are immutable values; they are copied freely and never
/// individually released.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lit(i32);

impl Lit {
    /// The always-true constant.
    pub const TRUE: Lit = Lit(SENTINEL_VAR as i32);

    /// The always-false constant.
    pub const FALSE: Lit = Lit(-(SENTINEL_VAR as i32));

    /// The asserted literal of `var`.
    ///
    /// # Panics
    ///
    /// Panics if `var` is zero or exceeds the signed 32-bit literal space.
    pub fn positive(var: u32) -> Self {
        assert!(
            var != 0 && var <= i32::MAX as u32,
            "variable id {var} out of range"
        );
        Lit(var as i32)
    }

    /// The variable this literal refers to.
    pub fn var(self) -> u32 {
        self.0.unsigned_abs()
    }

    /// `true` if the literal negates its variable.
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// `true` for [`Lit::TRUE`] and [`Lit::FALSE`].
    pub fn is_const(self) -> bool {
        self.var() == SENTINEL_VAR
    }

    /// The signed DIMACS code of the literal.
    pub fn code(self) -> i32 {
        self.0
    }
}

impl Neg for Lit {
    type Output = Lit;

    fn neg(self) -> Lit {
        Lit(-self.0)
    }
}

impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lit({})", self.0)
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
