//! The wiring DSL: a minimal parenthesized prefix language used inside
//! interface implementations to describe port values, parameter values,
//! and output projections.
//!
//! Grammar: `(bv v w)`, `(bit i e)`, `(concat e ...)`, or a bare `name`.

use crate::error::ArchError;
use aion_common::BitVec;
use aion_ir::Expr;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A parsed wiring-DSL term, not yet resolved against a symbol scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WiringExpr {
    /// `(bv value width)` — a literal constant.
    Bv {
        /// The constant's value.
        value: u64,
        /// The constant's width, in bits.
        width: u32,
    },
    /// `(bit i e)` — the single bit at index `i` of `e`.
    Bit {
        /// The bit index.
        index: u32,
        /// The expression being indexed.
        expr: Box<WiringExpr>,
    },
    /// `(concat e ...)` — concatenation, first operand most significant.
    Concat(Vec<WiringExpr>),
    /// A bare symbol, resolved against the caller-supplied port map or the
    /// implementation's internal-state map.
    Symbol(String),
}

/// Parses a wiring-DSL term from its surface syntax.
pub fn parse(input: &str) -> Result<WiringExpr, ArchError> {
    let tokens = tokenize(input);
    let mut pos = 0;
    let expr = parse_tokens(&tokens, &mut pos)?;
    if pos != tokens.len() {
        return Err(ArchError::WiringSyntax(format!(
            "trailing tokens after expression in {input:?}"
        )));
    }
    Ok(expr)
}

fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in input.chars() {
        match c {
            '(' | ')' => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                tokens.push(c.to_string());
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn parse_tokens(tokens: &[String], pos: &mut usize) -> Result<WiringExpr, ArchError> {
    let tok = tokens
        .get(*pos)
        .ok_or_else(|| ArchError::WiringSyntax("unexpected end of input".to_string()))?;
    if tok == "(" {
        *pos += 1;
        let head = tokens
            .get(*pos)
            .ok_or_else(|| ArchError::WiringSyntax("expected form head".to_string()))?;
        let result = match head.as_str() {
            "bv" => {
                *pos += 1;
                let value = parse_u64(next_token(tokens, pos)?)?;
                let width = parse_u32(next_token(tokens, pos)?)?;
                WiringExpr::Bv { value, width }
            }
            "bit" => {
                *pos += 1;
                let index = parse_u32(next_token(tokens, pos)?)?;
                let expr = parse_tokens(tokens, pos)?;
                WiringExpr::Bit {
                    index,
                    expr: Box::new(expr),
                }
            }
            "concat" => {
                *pos += 1;
                let mut parts = Vec::new();
                while tokens.get(*pos).map(String::as_str) != Some(")") {
                    parts.push(parse_tokens(tokens, pos)?);
                }
                WiringExpr::Concat(parts)
            }
            other => {
                return Err(ArchError::WiringSyntax(format!(
                    "unknown wiring form: {other}"
                )))
            }
        };
        expect(tokens, pos, ")")?;
        Ok(result)
    } else if tok == ")" {
        Err(ArchError::WiringSyntax("unexpected ')'".to_string()))
    } else {
        *pos += 1;
        Ok(WiringExpr::Symbol(tok.clone()))
    }
}

fn next_token<'a>(tokens: &'a [String], pos: &mut usize) -> Result<&'a str, ArchError> {
    let tok = tokens
        .get(*pos)
        .ok_or_else(|| ArchError::WiringSyntax("unexpected end of input".to_string()))?;
    *pos += 1;
    Ok(tok.as_str())
}

fn expect(tokens: &[String], pos: &mut usize, expected: &str) -> Result<(), ArchError> {
    let tok = next_token(tokens, pos)?;
    if tok != expected {
        return Err(ArchError::WiringSyntax(format!(
            "expected {expected:?}, found {tok:?}"
        )));
    }
    Ok(())
}

fn parse_u64(tok: &str) -> Result<u64, ArchError> {
    tok.parse()
        .map_err(|_| ArchError::WiringSyntax(format!("expected integer, found {tok:?}")))
}

fn parse_u32(tok: &str) -> Result<u32, ArchError> {
    tok.parse()
        .map_err(|_| ArchError::WiringSyntax(format!("expected integer, found {tok:?}")))
}

/// Resolves a parsed wiring-DSL term into an [`Expr`] against a symbol
/// scope (the union of the caller's port map and internal-state map).
pub fn eval(expr: &WiringExpr, scope: &HashMap<String, Expr>) -> Result<Expr, ArchError> {
    match expr {
        WiringExpr::Bv { value, width } => Ok(Expr::literal(BitVec::from_u64(*value, *width))),
        WiringExpr::Bit { index, expr } => {
            let inner = eval(expr, scope)?;
            Ok(Expr::extract(inner, *index, *index)?)
        }
        WiringExpr::Concat(parts) => {
            let evaluated = parts
                .iter()
                .map(|p| eval(p, scope))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::concat(evaluated)?)
        }
        WiringExpr::Symbol(name) => scope
            .get(name)
            .cloned()
            .ok_or_else(|| ArchError::UnresolvedSymbol { name: name.clone() }),
    }
}
