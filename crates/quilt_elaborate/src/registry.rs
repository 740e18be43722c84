//! The component library: declared types by name.

use crate::decl::ComponentDecl;
use crate::errors::{CompileError, CompileResult};
use quilt_common::{Ident, Interner};
use std::collections::HashMap;

/// All component types of one description, keyed by name.
///
/// Populated by the (external) front end before compilation starts; the
/// engine only looks declarations up. Call sites convert a failed lookup
/// into [`CompileError::UndefinedComponentType`] with their own instance
/// context.
#[derive(Default)]
pub struct Library {
    decls: HashMap<Ident, ComponentDecl>,
}

impl Library {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration; each type name may be declared at most once.
    pub fn declare(&mut self, decl: ComponentDecl, interner: &Interner) -> CompileResult<()> {
        let name = decl.name();
        if self.decls.contains_key(&name) {
            return Err(CompileError::DuplicateDefinition {
                name: interner.resolve(name).to_string(),
                component: "<library>".to_string(),
            });
        }
        self.decls.insert(name, decl);
        Ok(())
    }

    /// Looks up a declaration by type name.
    pub fn lookup(&self, name: Ident) -> Option<&ComponentDecl> {
        self.decls.get(&name)
    }

    /// Number of declared types.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    /// `true` if nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_then_lookup() {
        let interner = Interner::new();
        let mut lib = Library::new();
        let name = interner.get_or_intern("full_adder");
        lib.declare(ComponentDecl::new(name), &interner).unwrap();
        assert!(lib.lookup(name).is_some());
        assert_eq!(lib.len(), 1);
    }

    #[test]
    fn lookup_miss_returns_none() {
        let interner = Interner::new();
        let lib = Library::new();
        assert!(lib.lookup(interner.get_or_intern("ghost")).is_none());
        assert!(lib.is_empty());
    }

    #[test]
    fn redeclaring_a_type_fails() {
        let interner = Interner::new();
        let mut lib = Library::new();
        let name = interner.get_or_intern("mux2");
        lib.declare(ComponentDecl::new(name), &interner).unwrap();
        let err = lib
            .declare(ComponentDecl::new(name), &interner)
            .unwrap_err();
        assert!(matches!(
            err,
            CompileError::DuplicateDefinition { ref name, .. } if name == "mux2"
        ));
    }
}
