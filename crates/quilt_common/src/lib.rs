//! Shared foundational types for the quilt CNF compiler.
//!
//! Currently this is the interned-identifier machinery: every name that
//! flows through declarations, scopes, and expressions is an [`Ident`],
//! resolved back to text only at error-reporting and logging sites.

#![warn(missing_docs)]

pub mod ident;

pub use ident::{Ident, Interner};
