//! Compile-time integer evaluation of expressions.
//!
//! Generic parameters and port widths are plain integers. This evaluator
//! reduces an expression against a component's constant scope only — names
//! never fall back to the bus scope here — and has no side effects, so it
//! may be invoked any number of times during a compilation.

use crate::component::Component;
use crate::errors::{CompileError, CompileResult};
use crate::expr::{BinOp, Expr};
use quilt_common::Interner;

/// Evaluates `expr` to a signed integer against `comp`'s constant scope.
pub fn eval(expr: &Expr, comp: &Component, interner: &Interner) -> CompileResult<i64> {
    match expr {
        Expr::Const(value) => Ok(*value),
        Expr::Name(name) => comp.resolve_constant(*name, interner),
        Expr::Binary { op, lhs, rhs } => {
            let lhs = eval(lhs, comp, interner)?;
            let rhs = eval(rhs, comp, interner)?;
            apply(*op, lhs, rhs, comp, interner)
        }
    }
}

/// Applies an arithmetic operator to two reduced operands.
fn apply(
    op: BinOp,
    lhs: i64,
    rhs: i64,
    comp: &Component,
    interner: &Interner,
) -> CompileResult<i64> {
    let fault = |reason: String| CompileError::ArithmeticFault {
        reason,
        component: interner.resolve(comp.label()).to_string(),
    };
    match op {
        BinOp::Add => Ok(lhs.wrapping_add(rhs)),
        BinOp::Sub => Ok(lhs.wrapping_sub(rhs)),
        BinOp::Mul => Ok(lhs.wrapping_mul(rhs)),
        BinOp::Div => {
            if rhs == 0 {
                Err(fault(format!("division by zero in `{lhs} / {rhs}`")))
            } else {
                Ok(lhs / rhs)
            }
        }
        BinOp::Mod => {
            if rhs == 0 {
                Err(fault(format!("modulo by zero in `{lhs} % {rhs}`")))
            } else {
                Ok(lhs % rhs)
            }
        }
        BinOp::Pow => {
            if rhs >= 0 {
                // exact integer exponentiation; anything past i64 faults
                // instead of inheriting float rounding
                u32::try_from(rhs)
                    .ok()
                    .and_then(|exp| lhs.checked_pow(exp))
                    .ok_or_else(|| fault(format!("exponent overflow in `{lhs} ** {rhs}`")))
            } else if lhs == 0 {
                Err(fault(format!(
                    "zero base with negative exponent in `{lhs} ** {rhs}`"
                )))
            } else {
                // rounded real-valued result for negative exponents
                Ok(match lhs {
                    1 => 1,
                    -1 if rhs % 2 == 0 => 1,
                    -1 => -1,
                    _ => 0,
                })
            }
        }
        BinOp::And | BinOp::Or | BinOp::Xor | BinOp::Sel => {
            Err(CompileError::UnsupportedOperation {
                op,
                position: "constant evaluation",
                component: interner.resolve(comp.label()).to_string(),
            })
        }
    }
}
