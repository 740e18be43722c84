//! Interned names with O(1) equality and copying.

use lasso::ThreadedRodeo;
use serde::{Deserialize, Serialize};

/// An interned name.
///
/// Scope keys, component-type names, instance labels, and expression
/// references are all `Ident`s: a `u32` index into the session's
/// [`Interner`]. Comparing or copying one never touches string data.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Ident(u32);

impl Ident {
    /// Reconstructs an `Ident` from its raw index.
    ///
    /// Useful for deserialization and for building fixtures in tests; code
    /// paths that have an [`Interner`] at hand should intern instead.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// The raw interner index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: the wrapped `u32` round-trips losslessly through `usize` on all
// supported targets; `try_from_usize` rejects indices above `u32::MAX`.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// A string interner shared by one compilation session.
///
/// Backed by [`lasso::ThreadedRodeo`], so interning takes `&self` and the
/// interner can be handed around by shared reference alongside the other
/// session-wide state.
pub struct Interner {
    names: ThreadedRodeo<Ident>,
}

impl Interner {
    /// Creates an empty interner.
    pub fn new() -> Self {
        Self {
            names: ThreadedRodeo::new(),
        }
    }

    /// Interns `s`, reusing the existing [`Ident`] if it was seen before.
    pub fn get_or_intern(&self, s: &str) -> Ident {
        self.names.get_or_intern(s)
    }

    /// Returns the [`Ident`] of `s` without interning it.
    pub fn get(&self, s: &str) -> Option<Ident> {
        self.names.get(s)
    }

    /// Recovers the text of an interned name.
    ///
    /// # Panics
    ///
    /// Panics if `ident` did not come from this interner.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.names.resolve(&ident)
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let interner = Interner::new();
        let id = interner.get_or_intern("half_adder");
        assert_eq!(interner.resolve(id), "half_adder");
    }

    #[test]
    fn interning_is_idempotent() {
        let interner = Interner::new();
        assert_eq!(
            interner.get_or_intern("carry"),
            interner.get_or_intern("carry")
        );
    }

    #[test]
    fn distinct_names_get_distinct_idents() {
        let interner = Interner::new();
        assert_ne!(interner.get_or_intern("a"), interner.get_or_intern("b"));
    }

    #[test]
    fn get_does_not_intern() {
        let interner = Interner::new();
        assert!(interner.get("missing").is_none());
        let id = interner.get_or_intern("present");
        assert_eq!(interner.get("present"), Some(id));
    }

    #[test]
    fn ident_serde_roundtrip() {
        let id = Ident::from_raw(7);
        let json = serde_json::to_string(&id).unwrap();
        let back: Ident = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
