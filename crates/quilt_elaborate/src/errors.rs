//! The closed error set of the compilation engine.

use crate::expr::BinOp;

/// The standard result type of every fallible compilation step.
pub type CompileResult<T> = Result<T, CompileError>;

/// Fatal compilation failures.
///
/// Every error aborts the enclosing compilation immediately — a partially
/// generated CNF is never usable, so nothing is caught or retried
/// internally. Each variant carries the offending name or operator and the
/// label of the component instance whose compilation raised it, so the
/// author can locate the defect in the source description.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A constant, bus, child label, or component type was defined twice
    /// in the same scope.
    #[error("duplicate definition of `{name}` in `{component}`")]
    DuplicateDefinition {
        /// The name that was already taken.
        name: String,
        /// The instance (or registry) holding the scope.
        component: String,
    },

    /// A named reference resolved against no applicable scope.
    #[error("`{name}` is not defined in `{component}`")]
    UndefinedName {
        /// The unresolved name.
        name: String,
        /// The instance whose scopes were searched.
        component: String,
    },

    /// An operator reached an evaluator that does not implement it.
    #[error("operator `{op}` is not supported in {position} (in `{component}`)")]
    UnsupportedOperation {
        /// The offending operator.
        op: BinOp,
        /// Which evaluator rejected it.
        position: &'static str,
        /// The instance being compiled.
        component: String,
    },

    /// An instantiation referenced a component type the library does not
    /// declare.
    #[error("unknown component type `{name}` (instantiated in `{component}`)")]
    UndefinedComponentType {
        /// The unknown type name.
        name: String,
        /// The instance that requested it.
        component: String,
    },

    /// Division or modulo by zero, or an exponentiation outside the exact
    /// integer range, during constant evaluation.
    #[error("arithmetic fault in `{component}`: {reason}")]
    ArithmeticFault {
        /// What went wrong, including the operands.
        reason: String,
        /// The instance being compiled.
        component: String,
    },
}
