//! Compilation engine: hierarchical component descriptions to CNF.
//!
//! A [`Library`] of component declarations goes in; an ordered clause list
//! and the per-range variable counts come out. Expression widths and
//! generics are reduced by [`const_eval`], signal-level operators are
//! Tseitin-encoded by [`encode`], and every instantiation recurses through
//! [`component`] while sharing one [`CompileContext`].
//!
//! ```ignore
//! let compiled = quilt_elaborate::compile(&lib, &interner, "top")?;
//! compiled.cnf.write_dimacs(&mut out)?;
//! ```

#![warn(missing_docs)]

pub mod component;
pub mod const_eval;
pub mod context;
pub mod decl;
pub mod encode;
pub mod errors;
pub mod expr;
pub mod registry;
pub mod stmt;

pub use component::Component;
pub use context::CompileContext;
pub use errors::{CompileError, CompileResult};
pub use registry::Library;

use quilt_cnf::{Cnf, VarAlloc};
use quilt_common::Interner;

/// The label under which the hierarchy root is registered.
pub const TOP_LABEL: &str = "<top>";

/// The finished compilation artifact.
#[derive(Debug)]
pub struct Compiled {
    /// The fully compiled hierarchy root.
    pub top: Component,
    /// The ordered clause list.
    pub cnf: Cnf,
    /// The allocator holding the final per-range variable counts.
    pub vars: VarAlloc,
}

/// Compiles the named top-level declaration into a CNF problem.
///
/// The whole hierarchy is built depth-first in one synchronous pass; any
/// failure aborts the compilation and nothing partial is returned.
pub fn compile(lib: &Library, interner: &Interner, top: &str) -> CompileResult<Compiled> {
    let name = interner.get_or_intern(top);
    let decl = lib
        .lookup(name)
        .ok_or_else(|| CompileError::UndefinedComponentType {
            name: top.to_string(),
            component: TOP_LABEL.to_string(),
        })?;
    let mut ctx = CompileContext::new(lib, interner);
    let label = interner.get_or_intern(TOP_LABEL);
    let top = component::elaborate_root(decl, label, &mut ctx)?;
    let (vars, cnf) = ctx.finish();
    Ok(Compiled { top, cnf, vars })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{ComponentDecl, PortDecl, PortDirection};
    use crate::expr::{BinOp, Expr};
    use crate::stmt::{Assign, Config, Constant, Equate, Instance, Signal};
    use quilt_common::Ident;

    fn id(interner: &Interner, s: &str) -> Ident {
        interner.get_or_intern(s)
    }

    #[test]
    fn and_of_two_inputs() {
        let interner = Interner::new();
        let mut lib = Library::new();
        let mut decl = ComponentDecl::new(id(&interner, "main"));
        decl.add_port(PortDecl::new(
            id(&interner, "x"),
            PortDirection::Input,
            Expr::number(1),
        ));
        decl.add_port(PortDecl::new(
            id(&interner, "y"),
            PortDirection::Input,
            Expr::number(1),
        ));
        decl.add_statement(Assign::new(
            id(&interner, "z"),
            Expr::binary(
                BinOp::And,
                Expr::name(id(&interner, "x")),
                Expr::name(id(&interner, "y")),
            ),
        ));
        lib.declare(decl, &interner).unwrap();

        let compiled = compile(&lib, &interner, "main").unwrap();
        assert_eq!(compiled.cnf.len(), 3);
        assert_eq!(compiled.vars.input_count(), 2);
        assert_eq!(compiled.vars.signal_count(), 1);
        assert_eq!(compiled.vars.config_count(), 0);
        assert!(compiled.top.bus(id(&interner, "z")).is_some());
    }

    #[test]
    fn four_line_selector() {
        let interner = Interner::new();
        let mut lib = Library::new();
        let mut decl = ComponentDecl::new(id(&interner, "main"));
        decl.add_port(PortDecl::new(
            id(&interner, "lines"),
            PortDirection::Input,
            Expr::number(4),
        ));
        decl.add_port(PortDecl::new(
            id(&interner, "idx"),
            PortDirection::Input,
            Expr::number(2),
        ));
        decl.add_statement(Assign::new(
            id(&interner, "out"),
            Expr::binary(
                BinOp::Sel,
                Expr::name(id(&interner, "lines")),
                Expr::name(id(&interner, "idx")),
            ),
        ));
        lib.declare(decl, &interner).unwrap();

        let compiled = compile(&lib, &interner, "main").unwrap();
        // two clauses per line, no padding for a full 2-bit index
        assert_eq!(compiled.cnf.len(), 8);
        assert_eq!(compiled.vars.input_count(), 6);
        assert_eq!(compiled.vars.signal_count(), 1);
    }

    #[test]
    fn unknown_top_fails() {
        let interner = Interner::new();
        let lib = Library::new();
        let err = compile(&lib, &interner, "nonexistent").unwrap_err();
        match err {
            CompileError::UndefinedComponentType { name, component } => {
                assert_eq!(name, "nonexistent");
                assert_eq!(component, TOP_LABEL);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn output_ports_draw_from_the_signal_range() {
        let interner = Interner::new();
        let mut lib = Library::new();
        let mut decl = ComponentDecl::new(id(&interner, "main"));
        decl.add_port(PortDecl::new(
            id(&interner, "a"),
            PortDirection::Input,
            Expr::number(1),
        ));
        decl.add_port(PortDecl::new(
            id(&interner, "q"),
            PortDirection::Output,
            Expr::number(1),
        ));
        decl.add_statement(Equate::new(
            Expr::name(id(&interner, "q")),
            Expr::name(id(&interner, "a")),
        ));
        lib.declare(decl, &interner).unwrap();

        let compiled = compile(&lib, &interner, "main").unwrap();
        assert_eq!(compiled.vars.input_count(), 1);
        assert_eq!(compiled.vars.signal_count(), 1);
        // two equivalence clauses over a 1-bit equate
        assert_eq!(compiled.cnf.len(), 2);
    }

    #[test]
    fn config_and_constant_statements() {
        let interner = Interner::new();
        let mut lib = Library::new();
        let mut decl = ComponentDecl::new(id(&interner, "main"));
        decl.add_statement(Constant::new(id(&interner, "N"), Expr::number(3)));
        decl.add_statement(Config::new(
            id(&interner, "cfg"),
            Expr::name(id(&interner, "N")),
        ));
        decl.add_statement(Signal::new(
            id(&interner, "scratch"),
            Expr::binary(
                BinOp::Add,
                Expr::name(id(&interner, "N")),
                Expr::number(1),
            ),
        ));
        lib.declare(decl, &interner).unwrap();

        let compiled = compile(&lib, &interner, "main").unwrap();
        assert_eq!(compiled.vars.config_count(), 3);
        assert_eq!(compiled.vars.signal_count(), 4);
        assert_eq!(compiled.top.constant(id(&interner, "N")), Some(3));
    }

    /// Declares `cell`: one connected port `p`, computing `q = p xor p`.
    fn declare_cell(lib: &mut Library, interner: &Interner) {
        let mut cell = ComponentDecl::new(id(interner, "cell"));
        cell.add_statement(Assign::new(
            id(interner, "q"),
            Expr::binary(
                BinOp::Xor,
                Expr::name(id(interner, "p")),
                Expr::name(id(interner, "p")),
            ),
        ));
        lib.declare(cell, interner).unwrap();
    }

    #[test]
    fn sibling_instances_get_independent_busses() {
        let interner = Interner::new();
        let mut lib = Library::new();
        declare_cell(&mut lib, &interner);

        let mut main = ComponentDecl::new(id(&interner, "main"));
        main.add_port(PortDecl::new(
            id(&interner, "a"),
            PortDirection::Input,
            Expr::number(1),
        ));
        main.add_port(PortDecl::new(
            id(&interner, "b"),
            PortDirection::Input,
            Expr::number(1),
        ));
        for (label, port) in [("u0", "a"), ("u1", "b")] {
            let mut inst = Instance::new(id(&interner, label), id(&interner, "cell"));
            inst.connect(id(&interner, "p"), Expr::name(id(&interner, port)));
            main.add_statement(inst);
        }
        lib.declare(main, &interner).unwrap();

        let compiled = compile(&lib, &interner, "main").unwrap();
        let u0 = compiled.top.child(id(&interner, "u0")).unwrap();
        let u1 = compiled.top.child(id(&interner, "u1")).unwrap();
        // each child computed its own q from its own p
        assert_ne!(
            u0.bus(id(&interner, "p")).unwrap(),
            u1.bus(id(&interner, "p")).unwrap()
        );
        assert_ne!(
            u0.bus(id(&interner, "q")).unwrap(),
            u1.bus(id(&interner, "q")).unwrap()
        );
        // 4 clauses per XOR, two instances
        assert_eq!(compiled.cnf.len(), 8);
        assert_eq!(compiled.vars.signal_count(), 2);
    }

    #[test]
    fn explicitly_shared_bus_aliases() {
        let interner = Interner::new();
        let mut lib = Library::new();
        declare_cell(&mut lib, &interner);

        let mut main = ComponentDecl::new(id(&interner, "main"));
        main.add_port(PortDecl::new(
            id(&interner, "a"),
            PortDirection::Input,
            Expr::number(1),
        ));
        for label in ["u0", "u1"] {
            let mut inst = Instance::new(id(&interner, label), id(&interner, "cell"));
            inst.connect(id(&interner, "p"), Expr::name(id(&interner, "a")));
            main.add_statement(inst);
        }
        lib.declare(main, &interner).unwrap();

        let compiled = compile(&lib, &interner, "main").unwrap();
        let u0 = compiled.top.child(id(&interner, "u0")).unwrap();
        let u1 = compiled.top.child(id(&interner, "u1")).unwrap();
        // same expression over the same port: structural sharing by intent
        assert_eq!(
            u0.bus(id(&interner, "p")).unwrap(),
            u1.bus(id(&interner, "p")).unwrap()
        );
    }

    #[test]
    fn generics_size_child_allocations() {
        let interner = Interner::new();
        let mut lib = Library::new();
        let mut cell = ComponentDecl::new(id(&interner, "ram"));
        cell.add_statement(Config::new(
            id(&interner, "bits"),
            Expr::name(id(&interner, "DEPTH")),
        ));
        lib.declare(cell, &interner).unwrap();

        let mut main = ComponentDecl::new(id(&interner, "main"));
        let mut inst = Instance::new(id(&interner, "mem"), id(&interner, "ram"));
        inst.bind_generic(
            id(&interner, "DEPTH"),
            Expr::binary(BinOp::Pow, Expr::number(2), Expr::number(3)),
        );
        main.add_statement(inst);
        lib.declare(main, &interner).unwrap();

        let compiled = compile(&lib, &interner, "main").unwrap();
        assert_eq!(compiled.vars.config_count(), 8);
        let mem = compiled.top.child(id(&interner, "mem")).unwrap();
        assert_eq!(mem.constant(id(&interner, "DEPTH")), Some(8));
        assert_eq!(mem.bus(id(&interner, "bits")).unwrap().width(), 8);
    }

    #[test]
    fn deep_hierarchy_keeps_ids_monotonic() {
        let interner = Interner::new();
        let mut lib = Library::new();

        // leaf allocates one signal; each level above wraps the next
        let mut leaf = ComponentDecl::new(id(&interner, "leaf"));
        leaf.add_statement(Signal::new(id(&interner, "s"), Expr::number(1)));
        lib.declare(leaf, &interner).unwrap();
        for (name, inner) in [("mid", "leaf"), ("outer", "mid")] {
            let mut decl = ComponentDecl::new(id(&interner, name));
            decl.add_statement(Signal::new(id(&interner, "s"), Expr::number(1)));
            decl.add_statement(Instance::new(id(&interner, "u"), id(&interner, inner)));
            lib.declare(decl, &interner).unwrap();
        }

        let compiled = compile(&lib, &interner, "outer").unwrap();
        assert_eq!(compiled.vars.signal_count(), 3);
        let outer_s = compiled.top.bus(id(&interner, "s")).unwrap()[0].var();
        let mid = compiled.top.child(id(&interner, "u")).unwrap();
        let mid_s = mid.bus(id(&interner, "s")).unwrap()[0].var();
        let leaf_s = mid.child(id(&interner, "u")).unwrap().bus(id(&interner, "s")).unwrap()[0].var();
        assert!(outer_s < mid_s);
        assert!(mid_s < leaf_s);
    }

    #[test]
    fn duplicate_instance_label_fails() {
        let interner = Interner::new();
        let mut lib = Library::new();
        declare_cell(&mut lib, &interner);

        let mut main = ComponentDecl::new(id(&interner, "main"));
        main.add_port(PortDecl::new(
            id(&interner, "a"),
            PortDirection::Input,
            Expr::number(1),
        ));
        for _ in 0..2 {
            let mut inst = Instance::new(id(&interner, "u0"), id(&interner, "cell"));
            inst.connect(id(&interner, "p"), Expr::name(id(&interner, "a")));
            main.add_statement(inst);
        }
        lib.declare(main, &interner).unwrap();

        let err = compile(&lib, &interner, "main").unwrap_err();
        assert!(matches!(err, CompileError::DuplicateDefinition { .. }));
    }

    #[test]
    fn unconnected_child_port_surfaces_as_undefined_name() {
        let interner = Interner::new();
        let mut lib = Library::new();
        declare_cell(&mut lib, &interner);

        let mut main = ComponentDecl::new(id(&interner, "main"));
        main.add_statement(Instance::new(id(&interner, "u0"), id(&interner, "cell")));
        lib.declare(main, &interner).unwrap();

        let err = compile(&lib, &interner, "main").unwrap_err();
        match err {
            CompileError::UndefinedName { name, component } => {
                assert_eq!(name, "p");
                assert_eq!(component, "u0");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn port_width_forward_reference_fails() {
        let interner = Interner::new();
        let mut lib = Library::new();
        let mut decl = ComponentDecl::new(id(&interner, "main"));
        decl.add_port(PortDecl::new(
            id(&interner, "a"),
            PortDirection::Input,
            Expr::name(id(&interner, "W")),
        ));
        decl.add_statement(Constant::new(id(&interner, "W"), Expr::number(4)));
        lib.declare(decl, &interner).unwrap();

        let err = compile(&lib, &interner, "main").unwrap_err();
        assert!(matches!(err, CompileError::UndefinedName { .. }));
    }

    #[test]
    fn dimacs_of_a_compiled_design() {
        let interner = Interner::new();
        let mut lib = Library::new();
        let mut decl = ComponentDecl::new(id(&interner, "main"));
        decl.add_port(PortDecl::new(
            id(&interner, "x"),
            PortDirection::Input,
            Expr::number(1),
        ));
        decl.add_statement(Assign::new(
            id(&interner, "z"),
            Expr::binary(
                BinOp::Xor,
                Expr::name(id(&interner, "x")),
                Expr::number(1),
            ),
        ));
        lib.declare(decl, &interner).unwrap();

        let compiled = compile(&lib, &interner, "main").unwrap();
        let mut out = Vec::new();
        compiled.cnf.write_dimacs(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // header + sentinel pin + 4 XOR clauses
        assert_eq!(text.lines().count(), 6);
        assert!(text.starts_with("p cnf "));
        assert_eq!(text.lines().nth(1).unwrap(), "1 0");
    }
}
