//! Symbolic expression encoding: bus synthesis and clause emission.
//!
//! The encoder is the signal-level counterpart of
//! [`const_eval`](crate::const_eval): it reduces an expression to a
//! [`Bus`], allocating fresh signal variables and appending definitional
//! clauses for every compound operator. Only the bitwise gates and line
//! selection are meaningful on signals; arithmetic stays constant-level.

use crate::component::Component;
use crate::context::CompileContext;
use crate::errors::{CompileError, CompileResult};
use crate::expr::{BinOp, Expr};
use quilt_cnf::{Bus, Lit};

/// Evaluates `expr` to a bus against `comp`'s scopes, emitting clauses
/// into `ctx` as a side effect.
pub fn encode(expr: &Expr, comp: &Component, ctx: &mut CompileContext<'_>) -> CompileResult<Bus> {
    match expr {
        Expr::Const(value) => Ok(Bus::from_value(*value)),
        Expr::Name(name) => comp.resolve_bus(*name, ctx.interner()),
        Expr::Binary { op, lhs, rhs } => {
            let lhs = encode(lhs, comp, ctx)?;
            let rhs = encode(rhs, comp, ctx)?;
            match op {
                BinOp::And => Ok(bitwise(ctx, &lhs, &rhs, and_gate)),
                BinOp::Or => Ok(bitwise(ctx, &lhs, &rhs, or_gate)),
                BinOp::Xor => Ok(bitwise(ctx, &lhs, &rhs, xor_gate)),
                BinOp::Sel => Ok(select(ctx, &lhs, &rhs)),
                BinOp::Add
                | BinOp::Sub
                | BinOp::Mul
                | BinOp::Div
                | BinOp::Mod
                | BinOp::Pow => Err(CompileError::UnsupportedOperation {
                    op: *op,
                    position: "signal encoding",
                    component: ctx.interner().resolve(comp.label()).to_string(),
                }),
            }
        }
    }
}

/// Allocates the result bus of a bitwise gate and defines every bit.
///
/// The result is as wide as the wider operand; missing operand bits read
/// as the false sentinel.
fn bitwise(
    ctx: &mut CompileContext<'_>,
    lhs: &Bus,
    rhs: &Bus,
    gate: fn(&mut CompileContext<'_>, Lit, Lit, Lit),
) -> Bus {
    let result = ctx.alloc_signal(lhs.width().max(rhs.width()));
    for i in (0..result.width()).rev() {
        gate(ctx, result[i], lhs.get(i), rhs.get(i));
    }
    result
}

/// y ↔ (a ∧ b)
fn and_gate(ctx: &mut CompileContext<'_>, y: Lit, a: Lit, b: Lit) {
    ctx.add_clause([y, -a, -b]);
    ctx.add_clause([-y, a]);
    ctx.add_clause([-y, b]);
}

/// y ↔ (a ∨ b)
fn or_gate(ctx: &mut CompileContext<'_>, y: Lit, a: Lit, b: Lit) {
    ctx.add_clause([-y, a, b]);
    ctx.add_clause([y, -a]);
    ctx.add_clause([y, -b]);
}

/// y ↔ (a ⊕ b)
fn xor_gate(ctx: &mut CompileContext<'_>, y: Lit, a: Lit, b: Lit) {
    ctx.add_clause([-y, -a, -b]);
    ctx.add_clause([-y, a, b]);
    ctx.add_clause([y, -a, b]);
    ctx.add_clause([y, a, -b]);
}

/// Encodes a multiplexer: the 1-bit result follows the line addressed by
/// the binary-encoded selector.
///
/// For each line L two clauses tie the output to `lines[L]` whenever the
/// selector encodes L; every index pattern past the last line gets one
/// padding clause forbidding it, and selector bits past the index width
/// are pinned low. A single line needs no index at all: the output is
/// bound to it directly and the selector is left unconstrained.
fn select(ctx: &mut CompileContext<'_>, lines: &Bus, selector: &Bus) -> Bus {
    let result = ctx.alloc_signal(1);
    let y = result[0];
    let range = lines.width();

    if range == 1 {
        ctx.add_clause([lines.get(0), -y]);
        ctx.add_clause([-lines.get(0), y]);
        return result;
    }

    let width = index_width(range);
    for line in 0..range {
        let prefix: Vec<Lit> = (0..width).map(|bit| escape_lit(selector, line, bit)).collect();
        let mut clause = prefix.clone();
        clause.push(lines.get(line));
        clause.push(-y);
        ctx.add_clause(clause);
        let mut clause = prefix;
        clause.push(-lines.get(line));
        clause.push(y);
        ctx.add_clause(clause);
    }
    for line in range..(1usize << width) {
        ctx.add_clause((0..width).map(|bit| escape_lit(selector, line, bit)));
    }
    for bit in width..selector.width() {
        ctx.add_clause([-selector.get(bit)]);
    }
    result
}

/// The selector literal that is falsified when selector bit `bit` matches
/// `line`'s bit — so a clause prefixed with these literals collapses to
/// its remaining literals exactly when the selector encodes `line`.
fn escape_lit(selector: &Bus, line: usize, bit: usize) -> Lit {
    if line & (1 << bit) == 0 {
        selector.get(bit)
    } else {
        -selector.get(bit)
    }
}

/// Bits needed to address `range` lines: ceil(log2(range)).
fn index_width(range: usize) -> usize {
    let mut width = 0;
    let mut span = 1usize;
    while span < range {
        width += 1;
        span <<= 1;
    }
    width
}
