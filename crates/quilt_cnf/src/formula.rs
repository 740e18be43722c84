//! Clauses, the ordered clause list, and DIMACS output.

use crate::lit::Lit;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// A disjunction of literals.
///
/// Literal order within a clause is the order the encoder supplied and is
/// preserved verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clause {
    lits: Vec<Lit>,
}

impl Clause {
    /// Wraps a literal sequence as a clause.
    pub fn new(lits: Vec<Lit>) -> Self {
        Self { lits }
    }

    /// The literals of the clause, in emission order.
    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    /// Number of literals.
    pub fn len(&self) -> usize {
        self.lits.len()
    }

    /// `true` for the (unsatisfiable) empty clause.
    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<I: IntoIterator<Item = Lit>>(iter: I) -> Self {
        Self {
            lits: iter.into_iter().collect(),
        }
    }
}

/// An append-only conjunction of clauses.
///
/// Clauses are stored in the exact order they were pushed; for identical
/// inputs a compilation therefore reproduces the identical clause list,
/// which downstream solvers may rely on for problem structure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cnf {
    clauses: Vec<Clause>,
}

impl Cnf {
    /// Creates an empty clause list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one clause.
    pub fn push<I: IntoIterator<Item = Lit>>(&mut self, lits: I) {
        self.clauses.push(lits.into_iter().collect());
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// `true` if no clause has been appended.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// The clauses in emission order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// The highest variable id referenced, at least the sentinel's id 1.
    pub fn max_var(&self) -> u32 {
        self.clauses
            .iter()
            .flat_map(|c| c.lits())
            .map(|l| l.var())
            .max()
            .unwrap_or(0)
            .max(1)
    }

    /// Writes the formula in DIMACS-CNF form.
    ///
    /// Synthesized clauses may reference the truth sentinel (variable 1),
    /// so the writer emits a leading unit clause pinning it true; the
    /// header's clause count includes that extra clause.
    pub fn write_dimacs<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "p cnf {} {}", self.max_var(), self.len() + 1)?;
        writeln!(out, "{} 0", Lit::TRUE.code())?;
        for clause in &self.clauses {
            for lit in clause.lits() {
                write!(out, "{} ", lit.code())?;
            }
            writeln!(out, "0")?;
        }
        Ok(())
    }
}
