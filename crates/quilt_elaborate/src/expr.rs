//! Expression trees consumed by the two evaluators.
//!
//! An [`Expr`] is an immutable sum type with exactly three variants —
//! integer constant, late-bound named reference, binary operation — walked
//! by pattern matching in [`const_eval`](crate::const_eval) and
//! [`encode`](crate::encode). Operands are shared [`ExprRef`] handles: the
//! same subexpression may appear under several parents, the tree is
//! acyclic, and no evaluation state is ever stored in a node.

use quilt_common::{Ident, Interner};
use std::fmt;
use std::rc::Rc;

/// A shared handle to an immutable expression node.
pub type ExprRef = Rc<Expr>;

/// The binary operator tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    /// Bitwise AND (signal-level only).
    And,
    /// Bitwise OR (signal-level only).
    Or,
    /// Bitwise XOR (signal-level only).
    Xor,
    /// Addition (constant-level only).
    Add,
    /// Subtraction (constant-level only).
    Sub,
    /// Multiplication (constant-level only).
    Mul,
    /// Truncating division (constant-level only).
    Div,
    /// Truncating remainder (constant-level only).
    Mod,
    /// Exponentiation (constant-level only).
    Pow,
    /// Indexed line selection — a multiplexer (signal-level only).
    Sel,
}

impl BinOp {
    /// The operator's surface spelling, used in renderings and errors.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::And => "and",
            BinOp::Or => "or",
            BinOp::Xor => "xor",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
            BinOp::Sel => "sel",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One node of an expression tree.
#[derive(Debug, Clone)]
pub enum Expr {
    /// A fixed integer value.
    Const(i64),
    /// A reference resolved against the enclosing component's scopes at
    /// evaluation time, not at construction time.
    Name(Ident),
    /// An operator applied to two operands.
    Binary {
        /// The operator tag.
        op: BinOp,
        /// The left operand.
        lhs: ExprRef,
        /// The right operand.
        rhs: ExprRef,
    },
}

impl Expr {
    /// Wraps an integer literal.
    pub fn number(value: i64) -> ExprRef {
        Rc::new(Expr::Const(value))
    }

    /// Wraps a named reference.
    pub fn name(name: Ident) -> ExprRef {
        Rc::new(Expr::Name(name))
    }

    /// Combines two operands under an operator.
    pub fn binary(op: BinOp, lhs: ExprRef, rhs: ExprRef) -> ExprRef {
        Rc::new(Expr::Binary { op, lhs, rhs })
    }

    /// Renders the expression for logs and statement descriptions.
    pub fn render(&self, interner: &Interner) -> String {
        match self {
            Expr::Const(value) => value.to_string(),
            Expr::Name(name) => interner.resolve(*name).to_string(),
            Expr::Binary { op, lhs, rhs } => format!(
                "({} {} {})",
                lhs.render(interner),
                op,
                rhs.render(interner)
            ),
        }
    }
}
