//! Root-owned compilation state threaded through the hierarchy.

use crate::registry::Library;
use quilt_cnf::{Bus, Cnf, Lit, VarAlloc};
use quilt_common::Interner;

/// The mutable state every component of one compilation shares: the
/// declaration library, the interner, the variable allocator, and the
/// growing clause list.
///
/// The context is created once at the root and passed down explicitly to
/// every child instantiation, so all allocation and clause emission funnels
/// through a single owner and stays globally ordered. Compilation is
/// single-threaded and synchronous; no locking is involved.
pub struct CompileContext<'a> {
    lib: &'a Library,
    interner: &'a Interner,
    vars: VarAlloc,
    cnf: Cnf,
}

impl<'a> CompileContext<'a> {
    /// Creates a fresh context over a declaration library.
    pub fn new(lib: &'a Library, interner: &'a Interner) -> Self {
        Self {
            lib,
            interner,
            vars: VarAlloc::new(),
            cnf: Cnf::new(),
        }
    }

    /// The declaration library compiled against.
    pub fn library(&self) -> &'a Library {
        self.lib
    }

    /// The interner shared with the declarations.
    pub fn interner(&self) -> &'a Interner {
        self.interner
    }

    /// Allocates a configuration-range bus.
    pub fn alloc_config(&mut self, width: usize) -> Bus {
        self.vars.alloc_config(width)
    }

    /// Allocates an input-range bus.
    pub fn alloc_input(&mut self, width: usize) -> Bus {
        self.vars.alloc_input(width)
    }

    /// Allocates an internal-signal-range bus.
    pub fn alloc_signal(&mut self, width: usize) -> Bus {
        self.vars.alloc_signal(width)
    }

    /// Appends one clause to the global clause list.
    pub fn add_clause<I: IntoIterator<Item = Lit>>(&mut self, lits: I) {
        self.cnf.push(lits);
    }

    /// Number of clauses emitted so far.
    pub fn clause_count(&self) -> usize {
        self.cnf.len()
    }

    /// Consumes the context, yielding the allocator and the clause list.
    pub(crate) fn finish(self) -> (VarAlloc, Cnf) {
        (self.vars, self.cnf)
    }
}
