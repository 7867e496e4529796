//! The interface synthesizer: recursively lowers an abstract interface
//! (`LUT{n}`, `MUX{n}`, `carry{w}`) against an [`ArchDescription`] into a
//! netlist expression, applying rules R1-R6 when the architecture has no
//! direct implementation.

use crate::error::SynthError;
use crate::internal_data::InternalData;
use crate::output_map;
use aion_arch::{ArchDescription, InterfaceId, InterfaceImpl, InterfaceKind};
use aion_common::Interner;
use aion_ir::{Direction, Expr, Parameter, Port, SymbolicAllocator};
use std::collections::{HashMap, HashSet};

/// Shared state threaded through one top-level [`realize`] call: the
/// architecture being targeted, the interner used to name ports and
/// outputs, the hole allocator, and the in-flight cycle guard.
pub struct RealizeCtx<'a> {
    arch: &'a ArchDescription,
    interner: &'a Interner,
    alloc: &'a mut SymbolicAllocator,
    visited: HashSet<InterfaceId>,
}

impl<'a> RealizeCtx<'a> {
    /// Builds a realization context over `arch`, using `interner` to name
    /// ports/outputs and `alloc` to mint fresh holes.
    pub fn new(arch: &'a ArchDescription, interner: &'a Interner, alloc: &'a mut SymbolicAllocator) -> Self {
        Self {
            arch,
            interner,
            alloc,
            visited: HashSet::new(),
        }
    }

    /// The architecture being targeted.
    pub fn arch(&self) -> &ArchDescription {
        self.arch
    }

    /// The interner used to name ports and outputs.
    pub fn interner(&self) -> &Interner {
        self.interner
    }

    /// Mutable access to the fresh-hole allocator, for sketch generators
    /// that mint their own holes (extension mode, routing direction,
    /// angelic choice) outside of any interface's internal-state schema.
    pub fn alloc_mut(&mut self) -> &mut SymbolicAllocator {
        self.alloc
    }
}

/// Realizes `id` against `ctx`'s architecture, binding its ports to
/// `port_map` (by port name). `internal_data`, if given, pins the
/// programmable/symbolic state to reuse rather than allocating fresh
/// holes; its shape must match what a `None` call against the same
/// `(arch, id, port_map keys)` would have produced.
///
/// Returns a hash-map expression from output name to projection
/// expression, plus the internal-data token actually used — callers that
/// pass `internal_data: None` should keep this token to share state
/// across repeated realizations of the same interface occurrence.
pub fn realize(
    ctx: &mut RealizeCtx<'_>,
    id: &InterfaceId,
    port_map: &HashMap<String, Expr>,
    internal_data: Option<InternalData>,
) -> Result<(Expr, InternalData), SynthError> {
    if !ctx.visited.insert(id.clone()) {
        return Err(SynthError::RealizationCycle {
            interface: id.clone(),
        });
    }
    let result = realize_dispatch(ctx, id, port_map, internal_data);
    ctx.visited.remove(id);
    result
}

fn realize_dispatch(
    ctx: &mut RealizeCtx<'_>,
    id: &InterfaceId,
    port_map: &HashMap<String, Expr>,
    internal_data: Option<InternalData>,
) -> Result<(Expr, InternalData), SynthError> {
    if let Some(imp) = ctx.arch.find(id).cloned() {
        return realize_direct(ctx, &imp, port_map, internal_data);
    }

    match id.kind {
        InterfaceKind::Lut => {
            let k = id.param("num_inputs").expect("LUT identifier always carries num_inputs");
            if let Some(wider) = find_lut_wider(ctx.arch, k) {
                let k_prime = wider.id.param("num_inputs").expect("num_inputs");
                return realize_r2(ctx, k, k_prime, port_map, internal_data);
            }
            if has_lut_narrower(ctx.arch, k) {
                return realize_r3(ctx, k, port_map, internal_data);
            }
            Err(SynthError::NotRealizable { interface: id.clone() })
        }
        InterfaceKind::Carry => {
            let w = id.param("width").expect("carry identifier always carries width");
            if let Some(tile) = find_other_carry(ctx.arch, w) {
                let w_prime = tile.id.param("width").expect("width");
                return realize_r4(ctx, w, w_prime, port_map, internal_data);
            }
            if has_any_lut(ctx.arch) {
                return realize_r5(ctx, w, port_map, internal_data);
            }
            Err(SynthError::NotRealizable { interface: id.clone() })
        }
        InterfaceKind::Mux => {
            if id.param("num_inputs") == Some(2) && !has_mux(ctx.arch) && has_any_lut(ctx.arch) {
                return realize_r6(ctx, port_map, internal_data);
            }
            Err(SynthError::NotRealizable { interface: id.clone() })
        }
    }
}

fn find_lut_wider<'a>(arch: &'a ArchDescription, k: u32) -> Option<&'a InterfaceImpl> {
    arch.implementations()
        .iter()
        .filter(|imp| imp.id.kind == InterfaceKind::Lut)
        .filter(|imp| imp.id.param("num_inputs").is_some_and(|k2| k2 > k))
        .min_by_key(|imp| imp.id.param("num_inputs").unwrap())
}

fn has_lut_narrower(arch: &ArchDescription, k: u32) -> bool {
    arch.implementations()
        .iter()
        .any(|imp| imp.id.kind == InterfaceKind::Lut && imp.id.param("num_inputs").is_some_and(|k2| k2 < k))
}

fn find_other_carry<'a>(arch: &'a ArchDescription, w: u32) -> Option<&'a InterfaceImpl> {
    arch.implementations()
        .iter()
        .find(|imp| imp.id.kind == InterfaceKind::Carry && imp.id.param("width") != Some(w))
}

fn has_any_lut(arch: &ArchDescription) -> bool {
    arch.implementations().iter().any(|imp| imp.id.kind == InterfaceKind::Lut)
}

fn has_mux(arch: &ArchDescription) -> bool {
    arch.implementations().iter().any(|imp| imp.id.kind == InterfaceKind::Mux)
}

fn port(port_map: &HashMap<String, Expr>, interface: &InterfaceId, name: &str) -> Result<Expr, SynthError> {
    port_map.get(name).cloned().ok_or_else(|| SynthError::MissingPort {
        interface: interface.clone(),
        name: name.to_string(),
    })
}

/// R1: a direct fabric implementation exists. Allocate (or reuse)
/// internal-state holes, resolve every port and parameter template
/// against a scope of bound inputs and internal-state variables, build
/// the hardware-module instance, then project its outputs.
fn realize_direct(
    ctx: &mut RealizeCtx<'_>,
    imp: &InterfaceImpl,
    port_map: &HashMap<String, Expr>,
    internal_data: Option<InternalData>,
) -> Result<(Expr, InternalData), SynthError> {
    let internal_data = match internal_data {
        Some(data) => data,
        None => InternalData::Tuple(
            imp.internal_state
                .values()
                .map(|&width| InternalData::Leaf(ctx.alloc.fresh_bitvector(width)))
                .collect(),
        ),
    };
    let leaves = internal_data
        .as_tuple()
        .ok_or_else(|| SynthError::InternalDataShape { interface: imp.id.clone() })?;
    if leaves.len() != imp.internal_state.len() {
        return Err(SynthError::InternalDataShape { interface: imp.id.clone() });
    }

    let mut scope: HashMap<String, Expr> = port_map.clone();
    for (name, leaf) in imp.internal_state.keys().zip(leaves) {
        let expr = leaf
            .as_leaf()
            .ok_or_else(|| SynthError::InternalDataShape { interface: imp.id.clone() })?;
        scope.insert(name.clone(), expr.clone());
    }

    let mut ports = Vec::with_capacity(imp.module.ports.len());
    for tmpl in &imp.module.ports {
        let value = match tmpl.direction {
            Direction::Input => aion_arch::wiring::eval(&tmpl.value, &scope)?,
            Direction::Output => Expr::var(ctx.interner.get_or_intern(&tmpl.name), tmpl.width),
        };
        ports.push(Port {
            name: ctx.interner.get_or_intern(&tmpl.name),
            value,
            direction: tmpl.direction,
            width: tmpl.width,
        });
    }
    let mut parameters = Vec::with_capacity(imp.module.parameters.len());
    for tmpl in &imp.module.parameters {
        let value = aion_arch::wiring::eval(&tmpl.value, &scope)?;
        parameters.push(Parameter {
            name: ctx.interner.get_or_intern(&tmpl.name),
            value,
        });
    }
    let instance = Expr::hw_instance(
        ctx.interner.get_or_intern(&imp.module.module_name),
        ports.clone(),
        parameters,
        ctx.interner.get_or_intern(&imp.module.filepath),
    )?;

    let mut out_scope: HashMap<String, Expr> = HashMap::new();
    for (tmpl, bound) in imp.module.ports.iter().zip(&ports) {
        let value = match tmpl.direction {
            Direction::Input => bound.value.clone(),
            Direction::Output => Expr::hash_map_get(instance.clone(), output_map::key(ctx.interner, &tmpl.name)),
        };
        out_scope.insert(tmpl.name.clone(), value);
    }

    let mut entries = Vec::with_capacity(imp.outputs.len());
    for (name, projection) in &imp.outputs {
        let resolved = aion_arch::wiring::eval(projection, &out_scope)?;
        entries.push((name.as_str(), resolved));
    }
    let result = output_map::build(ctx.interner, entries);
    Ok((result, internal_data))
}

/// R2: request a wider LUT directly, padding the new high-order inputs
/// with constant `1` and recursing.
fn realize_r2(
    ctx: &mut RealizeCtx<'_>,
    k: u32,
    k_prime: u32,
    port_map: &HashMap<String, Expr>,
    internal_data: Option<InternalData>,
) -> Result<(Expr, InternalData), SynthError> {
    let mut extended = port_map.clone();
    for i in k..k_prime {
        extended.insert(format!("I{i}"), Expr::literal(aion_common::BitVec::from_u64(1, 1)));
    }
    realize(ctx, &InterfaceId::lut(k_prime), &extended, internal_data)
}

/// R3: build a `LUT{k}` from two `LUT{k-1}` instances sharing all but the
/// top input, muxed together on that top input via a `MUX2`.
fn realize_r3(
    ctx: &mut RealizeCtx<'_>,
    k: u32,
    port_map: &HashMap<String, Expr>,
    internal_data: Option<InternalData>,
) -> Result<(Expr, InternalData), SynthError> {
    let lower_id = InterfaceId::lut(k - 1);
    let top_id = InterfaceId::lut(k);
    let mut lower_map = HashMap::new();
    for i in 0..k - 1 {
        let key = format!("I{i}");
        lower_map.insert(key.clone(), port(port_map, &top_id, &key)?);
    }

    let (lut0_data, lut1_data, mux_data) = match internal_data {
        Some(InternalData::Tuple(v)) if v.len() == 3 => {
            let mut it = v.into_iter();
            (Some(it.next().unwrap()), Some(it.next().unwrap()), Some(it.next().unwrap()))
        }
        Some(_) => return Err(SynthError::InternalDataShape { interface: top_id }),
        None => (None, None, None),
    };

    let (lut0_expr, lut0_out) = realize(ctx, &lower_id, &lower_map, lut0_data)?;
    let (lut1_expr, lut1_out) = realize(ctx, &lower_id, &lower_map, lut1_data)?;
    let lut0_o = output_map::get(ctx.interner, &lut0_expr, "O")?;
    let lut1_o = output_map::get(ctx.interner, &lut1_expr, "O")?;

    let selector = port(port_map, &top_id, &format!("I{}", k - 1))?;
    let mux_map = HashMap::from([
        ("I0".to_string(), lut0_o),
        ("I1".to_string(), lut1_o),
        ("S".to_string(), selector),
    ]);
    let (mux_expr, mux_out) = realize(ctx, &InterfaceId::mux(2), &mux_map, mux_data)?;
    let o = output_map::get(ctx.interner, &mux_expr, "O")?;

    let result = output_map::build(ctx.interner, vec![("O", o)]);
    Ok((result, InternalData::Tuple(vec![lut0_out, lut1_out, mux_out])))
}

/// R4: tile `n = ceil(w / w')` copies of a native `carry{w'}`, chaining
/// carry-out to carry-in and sharing one internal-data token plus two
/// fresh padding-bit holes across every tile.
fn realize_r4(
    ctx: &mut RealizeCtx<'_>,
    w: u32,
    w_prime: u32,
    port_map: &HashMap<String, Expr>,
    internal_data: Option<InternalData>,
) -> Result<(Expr, InternalData), SynthError> {
    let id = InterfaceId::carry(w);
    let n = w.div_ceil(w_prime);

    let (mut shared_data, di_pad, s_pad) = match internal_data {
        Some(InternalData::Tuple(v)) if v.len() == 3 => {
            let mut it = v.into_iter();
            let shared = it.next().unwrap();
            let di_pad = it
                .next()
                .unwrap()
                .as_leaf()
                .cloned()
                .ok_or_else(|| SynthError::InternalDataShape { interface: id.clone() })?;
            let s_pad = it
                .next()
                .unwrap()
                .as_leaf()
                .cloned()
                .ok_or_else(|| SynthError::InternalDataShape { interface: id.clone() })?;
            (Some(shared), di_pad, s_pad)
        }
        Some(_) => return Err(SynthError::InternalDataShape { interface: id }),
        None => (None, ctx.alloc.fresh_bool(), ctx.alloc.fresh_bool()),
    };

    let di = port(port_map, &id, "DI")?;
    let s = port(port_map, &id, "S")?;
    let mut ci = port(port_map, &id, "CI")?;

    let mut tile_outputs = Vec::with_capacity(n as usize);
    let mut first_tile_data = None;
    for i in 0..n {
        let lo = i * w_prime;
        let di_slice = slice_with_padding(&di, lo, w_prime, w, &di_pad)?;
        let s_slice = slice_with_padding(&s, lo, w_prime, w, &s_pad)?;
        let tile_map = HashMap::from([
            ("CI".to_string(), ci),
            ("DI".to_string(), di_slice),
            ("S".to_string(), s_slice),
        ]);
        let (tile_expr, tile_data) = realize(ctx, &InterfaceId::carry(w_prime), &tile_map, shared_data.clone())?;
        if first_tile_data.is_none() {
            first_tile_data = Some(tile_data.clone());
        }
        shared_data = Some(tile_data);
        ci = output_map::get(ctx.interner, &tile_expr, "CO")?;
        tile_outputs.push(output_map::get(ctx.interner, &tile_expr, "O")?);
    }
    let final_co = ci;

    let concat_parts: Vec<Expr> = tile_outputs.into_iter().rev().collect();
    let full = Expr::concat(concat_parts)?;
    let o = if full.width() == Some(w) {
        full
    } else {
        Expr::extract(full, w - 1, 0)?
    };

    let result = output_map::build(ctx.interner, vec![("CO", final_co), ("O", o)]);
    let combined = InternalData::Tuple(vec![
        first_tile_data.expect("at least one tile is always realized"),
        InternalData::Leaf(di_pad),
        InternalData::Leaf(s_pad),
    ]);
    Ok((result, combined))
}

fn slice_with_padding(value: &Expr, lo: u32, tile_width: u32, total_width: u32, pad: &Expr) -> Result<Expr, SynthError> {
    let hi = lo + tile_width - 1;
    if hi < total_width {
        return Ok(Expr::extract(value.clone(), hi, lo)?);
    }
    if lo >= total_width {
        return Ok(Expr::concat(vec![pad.clone(); tile_width as usize])?);
    }
    let real = Expr::extract(value.clone(), total_width - 1, lo)?;
    let real_width = real.width().unwrap_or(0);
    let pad_width = tile_width - real_width;
    let pad_bits = Expr::concat(vec![pad.clone(); pad_width as usize])?;
    Ok(Expr::concat(vec![pad_bits, real])?)
}

/// R5: synthesize a carry tile from `LUT`/`MUX2` alone. `carry{1}` is the
/// base case; wider widths fold the low bit off and recurse on the rest.
fn realize_r5(
    ctx: &mut RealizeCtx<'_>,
    w: u32,
    port_map: &HashMap<String, Expr>,
    internal_data: Option<InternalData>,
) -> Result<(Expr, InternalData), SynthError> {
    let id = InterfaceId::carry(w);
    if w == 1 {
        let (mux_data, lut_data) = match internal_data {
            Some(InternalData::Tuple(v)) if v.len() == 2 => {
                let mut it = v.into_iter();
                (Some(it.next().unwrap()), Some(it.next().unwrap()))
            }
            Some(_) => return Err(SynthError::InternalDataShape { interface: id }),
            None => (None, None),
        };
        let di = port(port_map, &id, "DI")?;
        let ci = port(port_map, &id, "CI")?;
        let s = port(port_map, &id, "S")?;

        let mux_map = HashMap::from([
            ("I0".to_string(), di),
            ("I1".to_string(), ci.clone()),
            ("S".to_string(), s.clone()),
        ]);
        let (mux_expr, mux_out) = realize(ctx, &InterfaceId::mux(2), &mux_map, mux_data)?;
        let co = output_map::get(ctx.interner, &mux_expr, "O")?;

        let lut_map = HashMap::from([("I0".to_string(), s), ("I1".to_string(), ci)]);
        let (lut_expr, lut_out) = realize(ctx, &InterfaceId::lut(2), &lut_map, lut_data)?;
        let o = output_map::get(ctx.interner, &lut_expr, "O")?;

        let result = output_map::build(ctx.interner, vec![("CO", co), ("O", o)]);
        return Ok((result, InternalData::Tuple(vec![mux_out, lut_out])));
    }

    let (low_data, high_data) = match internal_data {
        Some(InternalData::Tuple(v)) if v.len() == 2 => {
            let mut it = v.into_iter();
            (Some(it.next().unwrap()), Some(it.next().unwrap()))
        }
        Some(_) => return Err(SynthError::InternalDataShape { interface: id }),
        None => (None, None),
    };
    let di = port(port_map, &id, "DI")?;
    let s = port(port_map, &id, "S")?;
    let ci = port(port_map, &id, "CI")?;

    let low_map = HashMap::from([
        ("CI".to_string(), ci),
        ("DI".to_string(), Expr::extract(di.clone(), 0, 0)?),
        ("S".to_string(), Expr::extract(s.clone(), 0, 0)?),
    ]);
    let (low_expr, low_out) = realize(ctx, &InterfaceId::carry(1), &low_map, low_data)?;
    let low_co = output_map::get(ctx.interner, &low_expr, "CO")?;
    let low_o = output_map::get(ctx.interner, &low_expr, "O")?;

    let high_map = HashMap::from([
        ("CI".to_string(), low_co),
        ("DI".to_string(), Expr::extract(di, w - 1, 1)?),
        ("S".to_string(), Expr::extract(s, w - 1, 1)?),
    ]);
    let (high_expr, high_out) = realize(ctx, &InterfaceId::carry(w - 1), &high_map, high_data)?;
    let high_co = output_map::get(ctx.interner, &high_expr, "CO")?;
    let high_o = output_map::get(ctx.interner, &high_expr, "O")?;

    let o = Expr::concat(vec![high_o, low_o])?;
    let result = output_map::build(ctx.interner, vec![("CO", high_co), ("O", o)]);
    Ok((result, InternalData::Tuple(vec![low_out, high_out])))
}

/// R6: a `MUX2` from a `LUT3`, selector wired as the LUT's top input.
fn realize_r6(
    ctx: &mut RealizeCtx<'_>,
    port_map: &HashMap<String, Expr>,
    internal_data: Option<InternalData>,
) -> Result<(Expr, InternalData), SynthError> {
    let id = InterfaceId::mux(2);
    let lut_map = HashMap::from([
        ("I0".to_string(), port(port_map, &id, "I0")?),
        ("I1".to_string(), port(port_map, &id, "I1")?),
        ("I2".to_string(), port(port_map, &id, "S")?),
    ]);
    let (lut_expr, lut_out) = realize(ctx, &InterfaceId::lut(3), &lut_map, internal_data)?;
    let o = output_map::get(ctx.interner, &lut_expr, "O")?;
    Ok((output_map::build(ctx.interner, vec![("O", o)]), lut_out))
}
