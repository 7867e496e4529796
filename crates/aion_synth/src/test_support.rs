//! Test-only tooling: a minimal completed-IR interpreter and a brute-force
//! [`HoleSolver`], so integration tests can drive a realization or sketch
//! end to end without depending on an actual SMT solver.
//!
//! This module is not `#[cfg(test)]`-gated because integration tests under
//! `tests/` compile as a separate crate from this library's own
//! `#[cfg(test)]` code and cannot see it; it is demo/test infrastructure,
//! not part of the production synthesis path.

use crate::solver::{HoleSolver, Model, SketchQuery, SolveOutcome};
use aion_common::{BitVec, Ident, Interner};
use aion_ir::{Expr, HoleId};
use std::collections::HashMap;

/// A fully-evaluated value: either a bit-vector or one of the IR's
/// composite container forms.
#[derive(Debug, Clone)]
pub enum Value {
    /// A concrete bit-vector.
    Bits(BitVec),
    /// A hash-map of evaluated key/value pairs.
    Map(Vec<(Value, Value)>),
    /// A list of evaluated elements.
    List(Vec<Value>),
    /// A hardware-module instance with its evaluated port bindings.
    Instance {
        /// The module's name.
        module_name: String,
        /// Evaluated port values, by port name.
        ports: HashMap<String, Value>,
    },
}

impl Value {
    /// Unwraps a [`Value::Bits`], panicking otherwise. Test-only tooling:
    /// callers are expected to know the shape of what they are
    /// interpreting.
    pub fn bits(&self) -> &BitVec {
        match self {
            Value::Bits(bv) => bv,
            _ => panic!("expected a bit-vector value, found {self:?}"),
        }
    }
}

/// Behavioral model for a hardware-module instance's named ports,
/// dispatched purely by module-name convention (`LUT{k}`, `MUX2`,
/// `CARRY{w}`). Sufficient for the interface catalog this crate
/// generates; not a general Verilog/wiring-DSL primitive library.
pub fn behave(module_name: &str, inputs: &HashMap<String, Value>, parameters: &HashMap<String, Value>) -> HashMap<String, Value> {
    if let Some(k) = module_name.strip_prefix("LUT").and_then(|s| s.parse::<u32>().ok()) {
        let init = parameters
            .get("INIT")
            .map(|v| v.bits().clone())
            .unwrap_or_else(|| BitVec::zero(1u32 << k));
        let mut index = 0u64;
        for i in 0..k {
            let bit = inputs.get(&format!("I{i}")).expect("LUT input bound").bits();
            if bit.get(0) {
                index |= 1 << i;
            }
        }
        let out = init.get(index as u32);
        let mut result = HashMap::new();
        result.insert("O".to_string(), Value::Bits(BitVec::from_bool(out)));
        return result;
    }
    if module_name == "MUX2" {
        let i0 = inputs.get("I0").expect("MUX2 I0 bound").bits();
        let i1 = inputs.get("I1").expect("MUX2 I1 bound").bits();
        let s = inputs.get("S").expect("MUX2 S bound").bits();
        let out = if s.get(0) { i1.get(0) } else { i0.get(0) };
        let mut result = HashMap::new();
        result.insert("O".to_string(), Value::Bits(BitVec::from_bool(out)));
        return result;
    }
    if let Some(w) = module_name.strip_prefix("CARRY").and_then(|s| s.parse::<u32>().ok()) {
        let ci0 = inputs.get("CI").expect("carry CI bound").bits();
        let di = inputs.get("DI").expect("carry DI bound").bits();
        let s = inputs.get("S").expect("carry S bound").bits();
        let mut out = BitVec::zero(w);
        let mut ci = ci0.get(0);
        for i in 0..w {
            let s_bit = s.get(i);
            let di_bit = di.get(i);
            out.set(i, s_bit ^ ci);
            ci = if s_bit { ci } else { di_bit };
        }
        let mut result = HashMap::new();
        result.insert("O".to_string(), Value::Bits(out));
        result.insert("CO".to_string(), Value::Bits(BitVec::from_bool(ci)));
        return result;
    }
    panic!("test_support::behave has no behavioral model for module {module_name}");
}

/// Evaluates a completed (hole-free) IR expression to a [`Value`].
pub fn eval(expr: &Expr, interner: &Interner, frees: &HashMap<Ident, BitVec>, model: &Model) -> Value {
    match expr {
        Expr::Literal(bv) => Value::Bits(bv.clone()),
        Expr::Var { name, .. } => Value::Bits(
            frees
                .get(name)
                .unwrap_or_else(|| panic!("unbound free variable {}", interner.resolve(*name)))
                .clone(),
        ),
        Expr::Extract { expr, hi, lo } => {
            let bv = eval(expr, interner, frees, model);
            Value::Bits(bv.bits().extract(*hi, *lo))
        }
        Expr::Concat(parts) => {
            let evaluated: Vec<BitVec> = parts.iter().map(|p| eval(p, interner, frees, model).bits().clone()).collect();
            Value::Bits(BitVec::concat(&evaluated))
        }
        Expr::Eq(lhs, rhs) => {
            let l = eval(lhs, interner, frees, model);
            let r = eval(rhs, interner, frees, model);
            Value::Bits(BitVec::from_bool(l.bits() == r.bits()))
        }
        Expr::Or(lhs, rhs) => {
            let l = eval(lhs, interner, frees, model);
            let r = eval(rhs, interner, frees, model);
            Value::Bits(l.bits() | r.bits())
        }
        Expr::And(lhs, rhs) => {
            let l = eval(lhs, interner, frees, model);
            let r = eval(rhs, interner, frees, model);
            Value::Bits(l.bits() & r.bits())
        }
        Expr::Mux { cond, then_branch, else_branch } => {
            let c = eval(cond, interner, frees, model);
            if c.bits().get(0) {
                eval(then_branch, interner, frees, model)
            } else {
                eval(else_branch, interner, frees, model)
            }
        }
        Expr::Register { data, .. } => eval(data, interner, frees, model),
        Expr::ZeroExtend { expr, width } => Value::Bits(eval(expr, interner, frees, model).bits().zero_extend(*width)),
        Expr::DupExtend { expr, width } => Value::Bits(eval(expr, interner, frees, model).bits().dup_extend(*width)),
        Expr::HashMapLit(entries) => Value::Map(
            entries
                .iter()
                .map(|(k, v)| (eval(k, interner, frees, model), eval(v, interner, frees, model)))
                .collect(),
        ),
        Expr::HashMapGet { map, key } => {
            let map_val = eval(map, interner, frees, model);
            let key_val = eval(key, interner, frees, model);
            match map_val {
                Value::Map(entries) => entries
                    .into_iter()
                    .find(|(k, _)| matches!((k, &key_val), (Value::Bits(a), Value::Bits(b)) if a == b))
                    .map(|(_, v)| v)
                    .expect("hash-map key present"),
                Value::Instance { ports, .. } => {
                    let name = key_to_port_name(&key_val, interner);
                    ports.get(&name).cloned().expect("instance port present")
                }
                other => panic!("hash-map-get on non-map value {other:?}"),
            }
        }
        Expr::ListLit(items) => Value::List(items.iter().map(|e| eval(e, interner, frees, model)).collect()),
        Expr::ListIndex { list, index } => {
            let list_val = eval(list, interner, frees, model);
            let idx = eval(index, interner, frees, model);
            match list_val {
                Value::List(items) => items
                    .into_iter()
                    .nth(idx.bits().to_u64().expect("index fits u64") as usize)
                    .expect("index in range"),
                other => panic!("list-index on non-list value {other:?}"),
            }
        }
        Expr::HwInstance { module_name, ports, parameters, .. } => {
            let mut input_vals = HashMap::new();
            let mut param_vals = HashMap::new();
            for port in ports {
                if port.direction == aion_ir::Direction::Input {
                    input_vals.insert(interner.resolve(port.name).to_string(), eval(&port.value, interner, frees, model));
                }
            }
            for param in parameters {
                param_vals.insert(interner.resolve(param.name).to_string(), eval(&param.value, interner, frees, model));
            }
            let name = interner.resolve(*module_name).to_string();
            let outputs = behave(&name, &input_vals, &param_vals);
            Value::Instance { module_name: name, ports: outputs }
        }
        Expr::Hole { id, .. } => Value::Bits(model.get(*id).cloned().unwrap_or_else(|| panic!("hole {id:?} unassigned"))),
    }
}

fn key_to_port_name(key: &Value, interner: &Interner) -> String {
    let raw = key.bits().to_u64().expect("output-map key fits u64") as u32;
    interner.resolve(Ident::from_raw(raw)).to_string()
}

/// Collects every [`HoleId`] reachable from `expr`.
pub fn collect_holes(expr: &Expr) -> Vec<HoleId> {
    let mut out = Vec::new();
    collect_holes_into(expr, &mut out);
    out
}

fn collect_holes_into(expr: &Expr, out: &mut Vec<HoleId>) {
    match expr {
        Expr::Literal(_) | Expr::Var { .. } => {}
        Expr::Extract { expr, .. } => collect_holes_into(expr, out),
        Expr::Concat(parts) | Expr::ListLit(parts) => parts.iter().for_each(|p| collect_holes_into(p, out)),
        Expr::Eq(a, b) | Expr::Or(a, b) | Expr::And(a, b) => {
            collect_holes_into(a, out);
            collect_holes_into(b, out);
        }
        Expr::Mux { cond, then_branch, else_branch } => {
            collect_holes_into(cond, out);
            collect_holes_into(then_branch, out);
            collect_holes_into(else_branch, out);
        }
        Expr::Register { data, .. } => collect_holes_into(data, out),
        Expr::ZeroExtend { expr, .. } | Expr::DupExtend { expr, .. } => collect_holes_into(expr, out),
        Expr::HashMapLit(entries) => entries.iter().for_each(|(k, v)| {
            collect_holes_into(k, out);
            collect_holes_into(v, out);
        }),
        Expr::HashMapGet { map, key } => {
            collect_holes_into(map, out);
            collect_holes_into(key, out);
        }
        Expr::ListIndex { list, index } => {
            collect_holes_into(list, out);
            collect_holes_into(index, out);
        }
        Expr::HwInstance { ports, parameters, .. } => {
            ports.iter().for_each(|p| collect_holes_into(&p.value, out));
            parameters.iter().for_each(|p| collect_holes_into(&p.value, out));
        }
        Expr::Hole { id, .. } => out.push(*id),
    }
}

/// A brute-force [`HoleSolver`] that enumerates every assignment to the
/// query's holes and free variables. Only viable for small total bit
/// width (a handful of single-bit holes and narrow free variables); bails
/// out to [`SolveOutcome::Unknown`] past a fixed enumeration budget.
pub struct BruteForceSolver {
    interner: Interner,
    max_combinations: u64,
}

impl BruteForceSolver {
    /// Builds a solver that resolves `Expr::Var`/output-map-key names
    /// through `interner` and gives up past `max_combinations` total
    /// enumerated assignments (holes × free-variable valuations).
    pub fn new(interner: Interner, max_combinations: u64) -> Self {
        Self { interner, max_combinations }
    }

    /// The interner this solver resolves `Expr::Var`/output-map-key names
    /// through — the same one a caller must have used to build the query's
    /// spec and sketch, needed again to `eval` a returned [`Model`].
    pub fn interner(&self) -> &Interner {
        &self.interner
    }
}

impl HoleSolver for BruteForceSolver {
    fn solve(&self, query: &SketchQuery) -> SolveOutcome {
        let hole_widths: Vec<(HoleId, u32)> = query
            .holes
            .iter()
            .map(|&id| {
                let width = collect_holes(&query.sketch)
                    .into_iter()
                    .find(|h| *h == id)
                    .map(|_| hole_width(&query.sketch, id))
                    .unwrap_or(1);
                (id, width)
            })
            .collect();
        let free_names: Vec<Ident> = query
            .free_variables
            .iter()
            .filter_map(|e| match e {
                Expr::Var { name, .. } => Some(*name),
                _ => None,
            })
            .collect();
        let free_widths: Vec<u32> = query.free_variables.iter().map(|e| e.width().unwrap_or(0)).collect();

        let hole_space: u64 = hole_widths.iter().map(|(_, w)| 1u64 << w).product();
        let free_space: u64 = free_widths.iter().map(|w| 1u64 << w).product();
        if hole_space.saturating_mul(free_space) > self.max_combinations {
            return SolveOutcome::Unknown;
        }

        for hole_assignment in 0..hole_space {
            let mut model = Model::new();
            let mut remaining = hole_assignment;
            for (id, width) in &hole_widths {
                let value = remaining & ((1u64 << width) - 1);
                remaining >>= width;
                model.insert(*id, BitVec::from_u64(value, *width));
            }

            let mut all_match = true;
            for free_assignment in 0..free_space {
                let mut frees = HashMap::new();
                let mut remaining = free_assignment;
                for (name, width) in free_names.iter().zip(&free_widths) {
                    let value = remaining & ((1u64 << width) - 1);
                    remaining >>= width;
                    frees.insert(*name, BitVec::from_u64(value, *width));
                }
                let spec_val = eval(&query.spec, &self.interner, &frees, &model);
                let sketch_val = eval(&query.sketch, &self.interner, &frees, &model);
                if spec_val.bits() != sketch_val.bits() {
                    all_match = false;
                    break;
                }
            }
            if all_match {
                return SolveOutcome::Sat(model);
            }
        }
        SolveOutcome::Unsat
    }
}

fn hole_width(expr: &Expr, target: HoleId) -> u32 {
    match expr {
        Expr::Hole { id, width } if *id == target => *width,
        Expr::Extract { expr, .. } => hole_width(expr, target),
        Expr::Concat(parts) | Expr::ListLit(parts) => parts.iter().map(|p| hole_width(p, target)).find(|w| *w != 0).unwrap_or(0),
        Expr::Eq(a, b) | Expr::Or(a, b) | Expr::And(a, b) => {
            let w = hole_width(a, target);
            if w != 0 {
                w
            } else {
                hole_width(b, target)
            }
        }
        Expr::Mux { cond, then_branch, else_branch } => {
            [cond, then_branch, else_branch].iter().map(|e| hole_width(e, target)).find(|w| *w != 0).unwrap_or(0)
        }
        Expr::Register { data, .. } => hole_width(data, target),
        Expr::ZeroExtend { expr, .. } | Expr::DupExtend { expr, .. } => hole_width(expr, target),
        Expr::HashMapLit(entries) => entries
            .iter()
            .flat_map(|(k, v)| [hole_width(k, target), hole_width(v, target)])
            .find(|w| *w != 0)
            .unwrap_or(0),
        Expr::HashMapGet { map, key } => {
            let w = hole_width(map, target);
            if w != 0 {
                w
            } else {
                hole_width(key, target)
            }
        }
        Expr::ListIndex { list, index } => {
            let w = hole_width(list, target);
            if w != 0 {
                w
            } else {
                hole_width(index, target)
            }
        }
        Expr::HwInstance { ports, parameters, .. } => ports
            .iter()
            .map(|p| hole_width(&p.value, target))
            .chain(parameters.iter().map(|p| hole_width(&p.value, target)))
            .find(|w| *w != 0)
            .unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aion_ir::SymbolicAllocator;

    #[test]
    fn lut2_behaves_as_and_when_init_is_and_table() {
        let mut inputs = HashMap::new();
        inputs.insert("I0".to_string(), Value::Bits(BitVec::from_bool(true)));
        inputs.insert("I1".to_string(), Value::Bits(BitVec::from_bool(true)));
        let mut params = HashMap::new();
        // AND truth table over (I0,I1): only index 0b11 = 3 is 1.
        let mut init = BitVec::zero(4);
        init.set(3, true);
        params.insert("INIT".to_string(), Value::Bits(init));
        let out = behave("LUT2", &inputs, &params);
        assert!(out["O"].bits().get(0));
    }

    #[test]
    fn brute_force_solves_trivial_identity() {
        let interner = Interner::new();
        let mut alloc = SymbolicAllocator::new();
        let a = Expr::var(interner.get_or_intern("a"), 1);
        let hole = alloc.fresh_bool();
        let hole_id = match hole {
            Expr::Hole { id, .. } => id,
            _ => unreachable!(),
        };
        let sketch = Expr::or(a.clone(), hole).unwrap();
        let query = SketchQuery::new(a.clone(), sketch, vec![a], vec![hole_id]);
        let solver = BruteForceSolver::new(interner, 1024);
        match solver.solve(&query) {
            SolveOutcome::Sat(model) => {
                assert_eq!(model.get(hole_id).unwrap().to_u64(), Some(0));
            }
            other => panic!("expected Sat, got {other:?}"),
        }
    }
}
