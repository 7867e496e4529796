//! The abstract netlist expression IR.
//!
//! [`Expr`] is the closed set of constructors described in the data model:
//! constants, variables, bit-range extracts, concatenation, boolean
//! combinators, multiplexing, registers, extension, the hash-map and list
//! container forms used by output projections, hardware-module instances,
//! and symbolic hole placeholders. Every constructor that combines operands
//! with widths that must agree is width-checked eagerly and returns
//! [`IrError::WidthMismatch`] on failure rather than producing an
//! ill-typed tree.

use crate::error::IrError;
use crate::ids::HoleId;
use crate::port::{Parameter, Port};
use aion_common::{BitVec, Ident};
use serde::{Deserialize, Serialize};

/// An expression in the abstract netlist IR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    /// A literal, fully-defined bit-vector constant.
    Literal(BitVec),
    /// A named free variable of a declared width.
    Var {
        /// The variable's name.
        name: Ident,
        /// The variable's width, in bits.
        width: u32,
    },
    /// A bit-range extract `expr[hi:lo]`, inclusive on both ends.
    Extract {
        /// The expression being sliced.
        expr: Box<Expr>,
        /// The high bit bound (inclusive).
        hi: u32,
        /// The low bit bound (inclusive).
        lo: u32,
    },
    /// Concatenation of bit-vector expressions, first element most significant.
    Concat(Vec<Expr>),
    /// Pairwise equality, producing a 1-bit result.
    Eq(Box<Expr>, Box<Expr>),
    /// Boolean OR.
    Or(Box<Expr>, Box<Expr>),
    /// Boolean AND.
    And(Box<Expr>, Box<Expr>),
    /// A multiplexer: `if cond { then_branch } else { else_branch }`.
    Mux {
        /// The 1-bit selector.
        cond: Box<Expr>,
        /// The value when `cond` is true.
        then_branch: Box<Expr>,
        /// The value when `cond` is false.
        else_branch: Box<Expr>,
    },
    /// A register whose output is `data`, delayed one cycle, with the given
    /// reset value.
    Register {
        /// The expression driving the register's input.
        data: Box<Expr>,
        /// The value the register takes on reset.
        reset: BitVec,
    },
    /// Zero-extension to a wider width.
    ZeroExtend {
        /// The expression being extended.
        expr: Box<Expr>,
        /// The target width.
        width: u32,
    },
    /// Extension by replicating the most significant bit ("dup-extend").
    DupExtend {
        /// The expression being extended.
        expr: Box<Expr>,
        /// The target width.
        width: u32,
    },
    /// A hash-map literal mapping symbolic key expressions to value expressions.
    HashMapLit(Vec<(Expr, Expr)>),
    /// A lookup into a hash-map expression by key expression.
    HashMapGet {
        /// The hash-map expression.
        map: Box<Expr>,
        /// The key expression.
        key: Box<Expr>,
    },
    /// A list literal.
    ListLit(Vec<Expr>),
    /// Indexing into a list expression.
    ListIndex {
        /// The list expression.
        list: Box<Expr>,
        /// The index expression.
        index: Box<Expr>,
    },
    /// An instance of a hardware module: module name, ordered ports,
    /// ordered parameters, and the source file it came from.
    HwInstance {
        /// The module's name.
        module_name: Ident,
        /// The module's ports, in declaration order.
        ports: Vec<Port>,
        /// The module's compile-time parameters, in declaration order.
        parameters: Vec<Parameter>,
        /// An identifier for the source file the module was declared in.
        filepath: Ident,
    },
    /// A symbolic hole to be filled in by an external solver.
    Hole {
        /// The hole's identity within its allocating session.
        id: HoleId,
        /// The hole's width (1 for a boolean hole).
        width: u32,
    },
}

impl Expr {
    /// The inferred width of this expression, if it denotes a single
    /// bit-vector value. Composite forms (hash-maps, lists, module
    /// instances) have no single width and return `None`.
    pub fn width(&self) -> Option<u32> {
        match self {
            Expr::Literal(bv) => Some(bv.width()),
            Expr::Var { width, .. } => Some(*width),
            Expr::Extract { hi, lo, .. } => Some(hi - lo + 1),
            Expr::Concat(parts) => parts.iter().map(Expr::width).sum(),
            Expr::Eq(_, _) => Some(1),
            Expr::Or(lhs, _) => lhs.width(),
            Expr::And(lhs, _) => lhs.width(),
            Expr::Mux { then_branch, .. } => then_branch.width(),
            Expr::Register { data, .. } => data.width(),
            Expr::ZeroExtend { width, .. } => Some(*width),
            Expr::DupExtend { width, .. } => Some(*width),
            Expr::Hole { width, .. } => Some(*width),
            Expr::HashMapLit(_)
            | Expr::HashMapGet { .. }
            | Expr::ListLit(_)
            | Expr::ListIndex { .. }
            | Expr::HwInstance { .. } => None,
        }
    }

    /// Builds a literal bit-vector constant.
    pub fn literal(value: BitVec) -> Expr {
        Expr::Literal(value)
    }

    /// Builds a named free variable of the given width.
    pub fn var(name: Ident, width: u32) -> Expr {
        Expr::Var { name, width }
    }

    /// Builds a bit-range extract, checking that `[lo, hi]` lies within
    /// `expr`'s width.
    pub fn extract(expr: Expr, hi: u32, lo: u32) -> Result<Expr, IrError> {
        let found = expr.width().ok_or_else(|| IrError::WidthMismatch {
            expected: hi + 1,
            found: 0,
            context: "extract operand has no bit-vector width".to_string(),
        })?;
        if lo > hi || hi >= found {
            return Err(IrError::WidthMismatch {
                expected: hi + 1,
                found,
                context: "extract range exceeds operand width".to_string(),
            });
        }
        Ok(Expr::Extract {
            expr: Box::new(expr),
            hi,
            lo,
        })
    }

    /// Concatenates bit-vector expressions, most significant first.
    pub fn concat(parts: Vec<Expr>) -> Result<Expr, IrError> {
        for part in &parts {
            if part.width().is_none() {
                return Err(IrError::WidthMismatch {
                    expected: 1,
                    found: 0,
                    context: "concat operand has no bit-vector width".to_string(),
                });
            }
        }
        Ok(Expr::Concat(parts))
    }

    /// Builds a pairwise equality check.
    pub fn eq(lhs: Expr, rhs: Expr) -> Result<Expr, IrError> {
        require_equal_width(&lhs, &rhs, "eq")?;
        Ok(Expr::Eq(Box::new(lhs), Box::new(rhs)))
    }

    /// Builds a boolean OR.
    pub fn or(lhs: Expr, rhs: Expr) -> Result<Expr, IrError> {
        require_equal_width(&lhs, &rhs, "or")?;
        Ok(Expr::Or(Box::new(lhs), Box::new(rhs)))
    }

    /// Builds a boolean AND.
    pub fn and(lhs: Expr, rhs: Expr) -> Result<Expr, IrError> {
        require_equal_width(&lhs, &rhs, "and")?;
        Ok(Expr::And(Box::new(lhs), Box::new(rhs)))
    }

    /// Builds a multiplexer. `cond` must be 1 bit wide; the two branches
    /// must agree in width.
    pub fn mux(cond: Expr, then_branch: Expr, else_branch: Expr) -> Result<Expr, IrError> {
        match cond.width() {
            Some(1) => {}
            other => {
                return Err(IrError::WidthMismatch {
                    expected: 1,
                    found: other.unwrap_or(0),
                    context: "mux selector".to_string(),
                })
            }
        }
        require_equal_width(&then_branch, &else_branch, "mux branches")?;
        Ok(Expr::Mux {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    /// Builds a register with the given reset value, checking that `data`
    /// and `reset` agree in width.
    pub fn register(data: Expr, reset: BitVec) -> Result<Expr, IrError> {
        let found = data.width().ok_or_else(|| IrError::WidthMismatch {
            expected: reset.width(),
            found: 0,
            context: "register data has no bit-vector width".to_string(),
        })?;
        if found != reset.width() {
            return Err(IrError::WidthMismatch {
                expected: reset.width(),
                found,
                context: "register data/reset width".to_string(),
            });
        }
        Ok(Expr::Register {
            data: Box::new(data),
            reset,
        })
    }

    /// Zero-extends `expr` to `width` bits.
    pub fn zero_extend(expr: Expr, width: u32) -> Result<Expr, IrError> {
        let found = expr.width().ok_or_else(|| IrError::WidthMismatch {
            expected: width,
            found: 0,
            context: "zero_extend operand has no bit-vector width".to_string(),
        })?;
        if width < found {
            return Err(IrError::WidthMismatch {
                expected: width,
                found,
                context: "zero_extend cannot shrink a value".to_string(),
            });
        }
        Ok(Expr::ZeroExtend {
            expr: Box::new(expr),
            width,
        })
    }

    /// Extends `expr` to `width` bits by replicating its most significant bit.
    pub fn dup_extend(expr: Expr, width: u32) -> Result<Expr, IrError> {
        let found = expr.width().ok_or_else(|| IrError::WidthMismatch {
            expected: width,
            found: 0,
            context: "dup_extend operand has no bit-vector width".to_string(),
        })?;
        if width < found {
            return Err(IrError::WidthMismatch {
                expected: width,
                found,
                context: "dup_extend cannot shrink a value".to_string(),
            });
        }
        Ok(Expr::DupExtend {
            expr: Box::new(expr),
            width,
        })
    }

    /// Builds a hash-map literal.
    pub fn hash_map_literal(entries: Vec<(Expr, Expr)>) -> Expr {
        Expr::HashMapLit(entries)
    }

    /// Builds a hash-map lookup.
    pub fn hash_map_get(map: Expr, key: Expr) -> Expr {
        Expr::HashMapGet {
            map: Box::new(map),
            key: Box::new(key),
        }
    }

    /// Builds a list literal.
    pub fn list_literal(items: Vec<Expr>) -> Expr {
        Expr::ListLit(items)
    }

    /// Builds a list index.
    pub fn list_index(list: Expr, index: Expr) -> Expr {
        Expr::ListIndex {
            list: Box::new(list),
            index: Box::new(index),
        }
    }

    /// Builds a hardware-module instance, checking that each port's bound
    /// expression width matches its declared width.
    pub fn hw_instance(
        module_name: Ident,
        ports: Vec<Port>,
        parameters: Vec<Parameter>,
        filepath: Ident,
    ) -> Result<Expr, IrError> {
        for port in &ports {
            let found = port.value.width().ok_or_else(|| IrError::WidthMismatch {
                expected: port.width,
                found: 0,
                context: "port value has no bit-vector width".to_string(),
            })?;
            if found != port.width {
                return Err(IrError::WidthMismatch {
                    expected: port.width,
                    found,
                    context: "port value width".to_string(),
                });
            }
        }
        Ok(Expr::HwInstance {
            module_name,
            ports,
            parameters,
            filepath,
        })
    }
}

fn require_equal_width(lhs: &Expr, rhs: &Expr, context: &str) -> Result<(), IrError> {
    let lhs_width = lhs.width().ok_or_else(|| IrError::WidthMismatch {
        expected: 0,
        found: 0,
        context: format!("{context}: left operand has no bit-vector width"),
    })?;
    let rhs_width = rhs.width().ok_or_else(|| IrError::WidthMismatch {
        expected: lhs_width,
        found: 0,
        context: format!("{context}: right operand has no bit-vector width"),
    })?;
    if lhs_width != rhs_width {
        return Err(IrError::WidthMismatch {
            expected: lhs_width,
            found: rhs_width,
            context: context.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aion_common::Interner;

    fn ident(interner: &Interner, s: &str) -> Ident {
        interner.get_or_intern(s)
    }

    #[test]
    fn literal_width() {
        let e = Expr::literal(BitVec::from_u64(5, 8));
        assert_eq!(e.width(), Some(8));
    }

    #[test]
    fn var_width() {
        let interner = Interner::new();
        let e = Expr::var(ident(&interner, "a"), 4);
        assert_eq!(e.width(), Some(4));
    }

    #[test]
    fn extract_in_range() {
        let e = Expr::literal(BitVec::from_u64(0b1011, 4));
        let sliced = Expr::extract(e, 2, 1).unwrap();
        assert_eq!(sliced.width(), Some(2));
    }

    #[test]
    fn extract_out_of_range_errors() {
        let e = Expr::literal(BitVec::from_u64(0b1011, 4));
        assert!(Expr::extract(e, 4, 0).is_err());
    }

    #[test]
    fn concat_sums_widths() {
        let a = Expr::literal(BitVec::from_u64(0, 4));
        let b = Expr::literal(BitVec::from_u64(0, 3));
        let c = Expr::concat(vec![a, b]).unwrap();
        assert_eq!(c.width(), Some(7));
    }

    #[test]
    fn eq_requires_equal_width() {
        let a = Expr::literal(BitVec::from_u64(0, 4));
        let b = Expr::literal(BitVec::from_u64(0, 3));
        assert!(Expr::eq(a, b).is_err());
    }

    #[test]
    fn eq_produces_one_bit() {
        let a = Expr::literal(BitVec::from_u64(0, 4));
        let b = Expr::literal(BitVec::from_u64(1, 4));
        let e = Expr::eq(a, b).unwrap();
        assert_eq!(e.width(), Some(1));
    }

    #[test]
    fn mux_requires_one_bit_selector() {
        let cond = Expr::literal(BitVec::from_u64(0, 2));
        let t = Expr::literal(BitVec::from_u64(0, 4));
        let f = Expr::literal(BitVec::from_u64(1, 4));
        assert!(Expr::mux(cond, t, f).is_err());
    }

    #[test]
    fn mux_requires_matching_branches() {
        let cond = Expr::literal(BitVec::from_u64(1, 1));
        let t = Expr::literal(BitVec::from_u64(0, 4));
        let f = Expr::literal(BitVec::from_u64(1, 3));
        assert!(Expr::mux(cond, t, f).is_err());
    }

    #[test]
    fn mux_ok() {
        let cond = Expr::literal(BitVec::from_u64(1, 1));
        let t = Expr::literal(BitVec::from_u64(0, 4));
        let f = Expr::literal(BitVec::from_u64(1, 4));
        let m = Expr::mux(cond, t, f).unwrap();
        assert_eq!(m.width(), Some(4));
    }

    #[test]
    fn register_width_matches_reset() {
        let data = Expr::literal(BitVec::from_u64(3, 4));
        let reset = BitVec::from_u64(0, 4);
        let r = Expr::register(data, reset).unwrap();
        assert_eq!(r.width(), Some(4));
    }

    #[test]
    fn register_width_mismatch_errors() {
        let data = Expr::literal(BitVec::from_u64(3, 4));
        let reset = BitVec::from_u64(0, 3);
        assert!(Expr::register(data, reset).is_err());
    }

    #[test]
    fn zero_extend_widens() {
        let e = Expr::literal(BitVec::from_u64(0b101, 3));
        let widened = Expr::zero_extend(e, 8).unwrap();
        assert_eq!(widened.width(), Some(8));
    }

    #[test]
    fn zero_extend_cannot_shrink() {
        let e = Expr::literal(BitVec::from_u64(0, 8));
        assert!(Expr::zero_extend(e, 4).is_err());
    }

    #[test]
    fn dup_extend_widens() {
        let e = Expr::literal(BitVec::from_u64(0b101, 3));
        let widened = Expr::dup_extend(e, 8).unwrap();
        assert_eq!(widened.width(), Some(8));
    }

    #[test]
    fn hw_instance_checks_port_widths() {
        let interner = Interner::new();
        let port = Port {
            name: ident(&interner, "i0"),
            value: Expr::literal(BitVec::from_u64(0, 4)),
            direction: crate::port::Direction::Input,
            width: 1,
        };
        let result = Expr::hw_instance(
            ident(&interner, "LUT4"),
            vec![port],
            vec![],
            ident(&interner, "lut4.rkt"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn hw_instance_ok() {
        let interner = Interner::new();
        let port = Port {
            name: ident(&interner, "i0"),
            value: Expr::literal(BitVec::from_u64(0, 1)),
            direction: crate::port::Direction::Input,
            width: 1,
        };
        let result = Expr::hw_instance(
            ident(&interner, "LUT4"),
            vec![port],
            vec![],
            ident(&interner, "lut4.rkt"),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn hole_width_is_reported() {
        let e = Expr::Hole {
            id: crate::ids::HoleId::from_raw(0),
            width: 6,
        };
        assert_eq!(e.width(), Some(6));
    }

    #[test]
    fn composite_forms_have_no_width() {
        let list = Expr::list_literal(vec![Expr::literal(BitVec::from_u64(0, 1))]);
        assert_eq!(list.width(), None);
    }
}
