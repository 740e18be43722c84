//! Component declarations: the port list and statement sequence the
//! engine replays for every instance of a type.

use crate::expr::ExprRef;
use crate::stmt::Statement;
use quilt_common::Ident;

/// The direction of a declared port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    /// Data flows into the component; top-level input ports draw their
    /// variables from the input range.
    Input,
    /// Data flows out of the component; allocated from the signal range.
    Output,
}

/// One port of a component declaration.
///
/// The width is an expression evaluated per instance, so a generic
/// parameter can size the port.
pub struct PortDecl {
    name: Ident,
    direction: PortDirection,
    width: ExprRef,
}

impl PortDecl {
    /// Declares a port.
    pub fn new(name: Ident, direction: PortDirection, width: ExprRef) -> Self {
        Self {
            name,
            direction,
            width,
        }
    }

    /// The port name.
    pub fn name(&self) -> Ident {
        self.name
    }

    /// The port direction.
    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    /// The width expression.
    pub fn width(&self) -> &ExprRef {
        &self.width
    }
}

/// A declared component type: name, ports, and the statement sequence
/// executed against every instance, in declaration order.
pub struct ComponentDecl {
    name: Ident,
    ports: Vec<PortDecl>,
    statements: Vec<Box<dyn Statement>>,
}

impl ComponentDecl {
    /// Creates a declaration with no ports or statements yet.
    pub fn new(name: Ident) -> Self {
        Self {
            name,
            ports: Vec::new(),
            statements: Vec::new(),
        }
    }

    /// The declared type name.
    pub fn name(&self) -> Ident {
        self.name
    }

    /// Appends a port; ports keep their declaration order.
    pub fn add_port(&mut self, port: PortDecl) {
        self.ports.push(port);
    }

    /// Appends a statement; statements keep their declaration order.
    pub fn add_statement(&mut self, stmt: impl Statement + 'static) {
        self.statements.push(Box::new(stmt));
    }

    /// The ports in declaration order.
    pub fn ports(&self) -> &[PortDecl] {
        &self.ports
    }

    /// The statements in declaration order.
    pub fn statements(&self) -> &[Box<dyn Statement>] {
        &self.statements
    }
}
