//! The statement kinds that drive component compilation.
//!
//! The engine itself never interprets statement kinds: a declaration's
//! body is a sequence of [`Statement`] trait objects executed in order
//! against the component under compilation. The concrete kinds here are
//! the imperative mini-language of a component description — constant
//! bindings, bus declarations, assignments, equivalence constraints, and
//! child instantiation.

use crate::component::{self, Component};
use crate::const_eval;
use crate::context::CompileContext;
use crate::encode;
use crate::errors::{CompileError, CompileResult};
use crate::expr::ExprRef;
use quilt_common::{Ident, Interner};
use std::collections::HashMap;

/// One executable step of a component declaration.
pub trait Statement {
    /// Applies the statement's effect to the component under compilation.
    fn execute(&self, comp: &mut Component, ctx: &mut CompileContext<'_>) -> CompileResult<()>;

    /// Renders the statement for trace logging.
    fn describe(&self, interner: &Interner) -> String;
}

/// Binds a named compile-time constant.
pub struct Constant {
    name: Ident,
    value: ExprRef,
}

impl Constant {
    /// `constant name = value`
    pub fn new(name: Ident, value: ExprRef) -> Self {
        Self { name, value }
    }
}

impl Statement for Constant {
    fn execute(&self, comp: &mut Component, ctx: &mut CompileContext<'_>) -> CompileResult<()> {
        let value = const_eval::eval(&self.value, comp, ctx.interner())?;
        comp.define_constant(self.name, value, ctx.interner())
    }

    fn describe(&self, interner: &Interner) -> String {
        format!(
            "constant {} = {}",
            interner.resolve(self.name),
            self.value.render(interner)
        )
    }
}

/// Allocates a configuration-range bus: the bits a downstream solver is
/// free to choose.
pub struct Config {
    name: Ident,
    width: ExprRef,
}

impl Config {
    /// `config name[width]`
    pub fn new(name: Ident, width: ExprRef) -> Self {
        Self { name, width }
    }
}

impl Statement for Config {
    fn execute(&self, comp: &mut Component, ctx: &mut CompileContext<'_>) -> CompileResult<()> {
        let width = const_eval::eval(&self.width, comp, ctx.interner())?.max(0) as usize;
        let bus = ctx.alloc_config(width);
        comp.register_bus(self.name, bus, ctx.interner())
    }

    fn describe(&self, interner: &Interner) -> String {
        format!(
            "config {}[{}]",
            interner.resolve(self.name),
            self.width.render(interner)
        )
    }
}

/// Allocates an internal-signal-range bus with no driver.
pub struct Signal {
    name: Ident,
    width: ExprRef,
}

impl Signal {
    /// `signal name[width]`
    pub fn new(name: Ident, width: ExprRef) -> Self {
        Self { name, width }
    }
}

impl Statement for Signal {
    fn execute(&self, comp: &mut Component, ctx: &mut CompileContext<'_>) -> CompileResult<()> {
        let width = const_eval::eval(&self.width, comp, ctx.interner())?.max(0) as usize;
        let bus = ctx.alloc_signal(width);
        comp.register_bus(self.name, bus, ctx.interner())
    }

    fn describe(&self, interner: &Interner) -> String {
        format!(
            "signal {}[{}]",
            interner.resolve(self.name),
            self.width.render(interner)
        )
    }
}

/// Encodes an expression and registers the produced bus under a new name.
pub struct Assign {
    name: Ident,
    value: ExprRef,
}

impl Assign {
    /// `name = value`
    pub fn new(name: Ident, value: ExprRef) -> Self {
        Self { name, value }
    }
}

impl Statement for Assign {
    fn execute(&self, comp: &mut Component, ctx: &mut CompileContext<'_>) -> CompileResult<()> {
        let bus = encode::encode(&self.value, comp, ctx)?;
        comp.register_bus(self.name, bus, ctx.interner())
    }

    fn describe(&self, interner: &Interner) -> String {
        format!(
            "{} = {}",
            interner.resolve(self.name),
            self.value.render(interner)
        )
    }
}

/// Constrains two encoded busses to carry equal values, bit for bit over
/// the wider width. This is how an already-allocated port bus gets tied
/// to a computed value.
pub struct Equate {
    lhs: ExprRef,
    rhs: ExprRef,
}

impl Equate {
    /// `lhs == rhs`
    pub fn new(lhs: ExprRef, rhs: ExprRef) -> Self {
        Self { lhs, rhs }
    }
}

impl Statement for Equate {
    fn execute(&self, comp: &mut Component, ctx: &mut CompileContext<'_>) -> CompileResult<()> {
        let lhs = encode::encode(&self.lhs, comp, ctx)?;
        let rhs = encode::encode(&self.rhs, comp, ctx)?;
        for i in 0..lhs.width().max(rhs.width()) {
            let (a, b) = (lhs.get(i), rhs.get(i));
            ctx.add_clause([-a, b]);
            ctx.add_clause([a, -b]);
        }
        Ok(())
    }

    fn describe(&self, interner: &Interner) -> String {
        format!(
            "{} == {}",
            self.lhs.render(interner),
            self.rhs.render(interner)
        )
    }
}

/// Instantiates a child component under a label.
///
/// Generic bindings are constant-evaluated and connection expressions
/// symbolically encoded in the *parent's* scope; the finished maps are
/// then handed to the child wholesale.
pub struct Instance {
    label: Ident,
    component: Ident,
    generics: Vec<(Ident, ExprRef)>,
    connections: Vec<(Ident, ExprRef)>,
}

impl Instance {
    /// `label: component(...)` with no bindings yet.
    pub fn new(label: Ident, component: Ident) -> Self {
        Self {
            label,
            component,
            generics: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Binds a generic parameter of the child.
    pub fn bind_generic(&mut self, name: Ident, value: ExprRef) {
        self.generics.push((name, value));
    }

    /// Connects a child port to an expression over the parent's scope.
    pub fn connect(&mut self, port: Ident, value: ExprRef) {
        self.connections.push((port, value));
    }
}

impl Statement for Instance {
    fn execute(&self, comp: &mut Component, ctx: &mut CompileContext<'_>) -> CompileResult<()> {
        let interner = ctx.interner();
        let decl = ctx.library().lookup(self.component).ok_or_else(|| {
            CompileError::UndefinedComponentType {
                name: interner.resolve(self.component).to_string(),
                component: interner.resolve(comp.label()).to_string(),
            }
        })?;

        if comp.child(self.label).is_some() {
            return Err(CompileError::DuplicateDefinition {
                name: interner.resolve(self.label).to_string(),
                component: interner.resolve(comp.label()).to_string(),
            });
        }

        let mut params = HashMap::new();
        for (name, value) in &self.generics {
            let value = const_eval::eval(value, comp, interner)?;
            if params.insert(*name, value).is_some() {
                return Err(CompileError::DuplicateDefinition {
                    name: interner.resolve(*name).to_string(),
                    component: interner.resolve(self.label).to_string(),
                });
            }
        }
        let mut connects = HashMap::new();
        for (port, value) in &self.connections {
            let bus = encode::encode(value, comp, ctx)?;
            if connects.insert(*port, bus).is_some() {
                return Err(CompileError::DuplicateDefinition {
                    name: interner.resolve(*port).to_string(),
                    component: interner.resolve(self.label).to_string(),
                });
            }
        }

        let child = component::instantiate(decl, self.label, params, connects, ctx)?;
        comp.add_child(self.label, child, ctx.interner())
    }

    fn describe(&self, interner: &Interner) -> String {
        format!(
            "{}: {} ({} generics, {} connections)",
            interner.resolve(self.label),
            interner.resolve(self.component),
            self.generics.len(),
            self.connections.len()
        )
    }
}
