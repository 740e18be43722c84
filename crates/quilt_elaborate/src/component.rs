//! Component instances: scoped names, hierarchy, and compilation.

use crate::const_eval;
use crate::context::CompileContext;
use crate::decl::{ComponentDecl, PortDirection};
use crate::errors::{CompileError, CompileResult};
use log::{debug, trace};
use quilt_cnf::Bus;
use quilt_common::{Ident, Interner};
use std::collections::HashMap;

/// One instantiated component of the hierarchy.
///
/// A component owns its local scopes — named constants, named busses, and
/// labelled children — and nothing else; the variable allocator and clause
/// list live in the [`CompileContext`] shared by the whole hierarchy.
/// Every name is defined at most once per scope, and a scope is populated
/// exactly once: directly from the port list at the root, or by taking
/// ownership of the caller's binding maps on instantiation. After its
/// statements have run, a component is never mutated again; children live
/// exactly as long as their parent.
#[derive(Debug)]
pub struct Component {
    label: Ident,
    decl_name: Ident,
    constants: HashMap<Ident, i64>,
    busses: HashMap<Ident, Bus>,
    children: HashMap<Ident, Component>,
}

impl Component {
    pub(crate) fn new(label: Ident, decl_name: Ident) -> Self {
        Self::with_scopes(label, decl_name, HashMap::new(), HashMap::new())
    }

    pub(crate) fn with_scopes(
        label: Ident,
        decl_name: Ident,
        constants: HashMap<Ident, i64>,
        busses: HashMap<Ident, Bus>,
    ) -> Self {
        Self {
            label,
            decl_name,
            constants,
            busses,
            children: HashMap::new(),
        }
    }

    /// The instantiation label of this instance.
    pub fn label(&self) -> Ident {
        self.label
    }

    /// The name of the declaration this instance was compiled from.
    pub fn decl_name(&self) -> Ident {
        self.decl_name
    }

    /// Binds a compile-time constant. Names are single-assignment per
    /// scope; rebinding is an error, never an overwrite.
    pub fn define_constant(
        &mut self,
        name: Ident,
        value: i64,
        interner: &Interner,
    ) -> CompileResult<()> {
        if self.constants.contains_key(&name) {
            return Err(self.duplicate(name, interner));
        }
        self.constants.insert(name, value);
        Ok(())
    }

    /// Looks up a constant. The bus scope is never consulted — a bus
    /// cannot silently degrade to an integer.
    pub fn resolve_constant(&self, name: Ident, interner: &Interner) -> CompileResult<i64> {
        self.constants
            .get(&name)
            .copied()
            .ok_or_else(|| self.undefined(name, interner))
    }

    /// Registers a bus under a new name.
    pub fn register_bus(
        &mut self,
        name: Ident,
        bus: Bus,
        interner: &Interner,
    ) -> CompileResult<()> {
        if self.busses.contains_key(&name) {
            return Err(self.duplicate(name, interner));
        }
        self.busses.insert(name, bus);
        Ok(())
    }

    /// Resolves a name to a bus: the bus scope first, then a constant
    /// reinterpreted as a fixed-literal bus.
    pub fn resolve_bus(&self, name: Ident, interner: &Interner) -> CompileResult<Bus> {
        if let Some(bus) = self.busses.get(&name) {
            return Ok(bus.clone());
        }
        Ok(Bus::from_value(self.resolve_constant(name, interner)?))
    }

    /// The bus registered under `name`, if any.
    pub fn bus(&self, name: Ident) -> Option<&Bus> {
        self.busses.get(&name)
    }

    /// The constant bound to `name`, if any.
    pub fn constant(&self, name: Ident) -> Option<i64> {
        self.constants.get(&name).copied()
    }

    /// The child registered under `label`, if any.
    pub fn child(&self, label: Ident) -> Option<&Component> {
        self.children.get(&label)
    }

    /// Iterates over the direct children, in no particular order.
    pub fn children(&self) -> impl Iterator<Item = &Component> {
        self.children.values()
    }

    pub(crate) fn add_child(
        &mut self,
        label: Ident,
        child: Component,
        interner: &Interner,
    ) -> CompileResult<()> {
        if self.children.contains_key(&label) {
            return Err(self.duplicate(label, interner));
        }
        self.children.insert(label, child);
        Ok(())
    }

    fn duplicate(&self, name: Ident, interner: &Interner) -> CompileError {
        CompileError::DuplicateDefinition {
            name: interner.resolve(name).to_string(),
            component: interner.resolve(self.label).to_string(),
        }
    }

    fn undefined(&self, name: Ident, interner: &Interner) -> CompileError {
        CompileError::UndefinedName {
            name: interner.resolve(name).to_string(),
            component: interner.resolve(self.label).to_string(),
        }
    }
}

/// Builds and compiles the hierarchy root from a top-level declaration.
///
/// Every port allocates a fresh bus — input-range for input ports,
/// signal-range otherwise — with its width constant-evaluated against the
/// scope as it grows, so a width may only reference names established
/// before it, never a forward reference.
pub(crate) fn elaborate_root(
    decl: &ComponentDecl,
    label: Ident,
    ctx: &mut CompileContext<'_>,
) -> CompileResult<Component> {
    let mut comp = Component::new(label, decl.name());
    for port in decl.ports() {
        let width = const_eval::eval(port.width(), &comp, ctx.interner())?.max(0) as usize;
        let bus = match port.direction() {
            PortDirection::Input => ctx.alloc_input(width),
            PortDirection::Output => ctx.alloc_signal(width),
        };
        comp.register_bus(port.name(), bus, ctx.interner())?;
    }
    run(decl, &mut comp, ctx)?;
    Ok(comp)
}

/// Builds and compiles a child instance from caller-evaluated bindings.
///
/// The generic and connection maps are consumed: the child's scopes take
/// ownership of the caller-built maps in one transfer, and no port
/// allocation happens here.
pub(crate) fn instantiate(
    decl: &ComponentDecl,
    label: Ident,
    generics: HashMap<Ident, i64>,
    connections: HashMap<Ident, Bus>,
    ctx: &mut CompileContext<'_>,
) -> CompileResult<Component> {
    let mut comp = Component::with_scopes(label, decl.name(), generics, connections);
    run(decl, &mut comp, ctx)?;
    Ok(comp)
}

/// Replays the declaration's statement sequence against the component.
fn run(
    decl: &ComponentDecl,
    comp: &mut Component,
    ctx: &mut CompileContext<'_>,
) -> CompileResult<()> {
    debug!("compiling {} ...", ctx.interner().resolve(comp.label()));
    for stmt in decl.statements() {
        trace!("{}", stmt.describe(ctx.interner()));
        stmt.execute(comp, ctx)?;
    }
    debug!("compiling {} done", ctx.interner().resolve(comp.label()));
    Ok(())
}
