//! The CNF data model of the quilt compiler.
//!
//! This crate defines the value types a compilation produces and consumes:
//! Boolean literals ([`Lit`]), multi-bit signal busses ([`Bus`]), clauses and
//! the ordered clause list ([`Clause`], [`Cnf`]) with a DIMACS writer, and
//! the three-range variable allocator ([`VarAlloc`]) owned by the hierarchy
//! root. Everything here is plain serializable data; clause *synthesis*
//! lives in `quilt_elaborate`.

#![warn(missing_docs)]

pub mod alloc;
pub mod bus;
pub mod formula;
pub mod lit;

pub use alloc::VarAlloc;
pub use bus::Bus;
pub use formula::{Clause, Cnf};
pub use lit::Lit;
