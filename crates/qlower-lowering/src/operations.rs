//! Operation lowering pass.
//!
//! Walks the tape's operations in order and emits five index-aligned
//! sequences: kernel names, numeric parameters, physical wires, inverse
//! flags and fallback matrices.
//!
//! - State preparations emit nothing; they only set `uses_state_prep`.
//! - `Rot` is replaced in place by its `RZ`/`RY`/`RZ` expansion.
//! - A gate whose base name has no kernel gets an empty parameter entry and
//!   its dense matrix instead. The matrix already includes any inversion, so
//!   the emitted inverse flag is cleared.

use std::slice;

use num_complex::Complex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use qlower_ir::{INVERSE_SUFFIX, Operation, Tape, matrix_of};

use crate::error::LowerResult;
use crate::kernel::KernelRegistry;
use crate::precision::{Precision, flatten};
use crate::wire_map::WireMap;

/// Lowered operations in the engine's encoding.
///
/// All five sequences have the same length; entry `i` of each describes the
/// `i`-th emitted operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoweredOperations<T> {
    /// Kernel (or matrix-op) names, without the inverse suffix.
    pub names: Vec<String>,
    /// Numeric parameters; empty when a matrix is supplied.
    pub params: Vec<Vec<T>>,
    /// Physical wires.
    pub wires: Vec<Vec<usize>>,
    /// Whether the kernel should apply the inverse.
    pub inverses: Vec<bool>,
    /// Row-major fallback matrices; empty when a kernel is used.
    pub matrices: Vec<Vec<Complex<T>>>,
    /// Whether a state preparation was skipped.
    pub uses_state_prep: bool,
}

impl<T> LoweredOperations<T> {
    /// Number of emitted operations.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if no operations were emitted.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of entries that fell back to a dense matrix.
    pub fn num_matrix_fallbacks(&self) -> usize {
        self.matrices.iter().filter(|m| !m.is_empty()).count()
    }

    fn push(
        &mut self,
        name: String,
        params: Vec<T>,
        wires: Vec<usize>,
        inverse: bool,
        matrix: Vec<Complex<T>>,
    ) {
        self.names.push(name);
        self.params.push(params);
        self.wires.push(wires);
        self.inverses.push(inverse);
        self.matrices.push(matrix);
    }
}

/// Lower every operation on the tape.
#[instrument(skip_all, fields(precision = %P::KIND, operations = tape.num_operations()))]
pub fn lower_operations<P: Precision>(
    tape: &Tape,
    wire_map: &WireMap,
    registry: &KernelRegistry,
) -> LowerResult<LoweredOperations<P::Real>> {
    let mut program = LoweredOperations::default();

    for operation in tape.operations() {
        if operation.is_state_prep() {
            debug!(name = operation.base_name(), "skipping state preparation");
            program.uses_state_prep = true;
            continue;
        }

        let expanded;
        let primitives: &[Operation] = if operation.is_composite() {
            expanded = operation.expand();
            &expanded
        } else {
            slice::from_ref(operation)
        };

        for primitive in primitives {
            lower_primitive::<P>(primitive, wire_map, registry, &mut program)?;
        }
    }

    debug!(
        emitted = program.len(),
        matrix_fallbacks = program.num_matrix_fallbacks(),
        uses_state_prep = program.uses_state_prep,
        "lowered operations"
    );
    Ok(program)
}

fn lower_primitive<P: Precision>(
    operation: &Operation,
    wire_map: &WireMap,
    registry: &KernelRegistry,
    program: &mut LoweredOperations<P::Real>,
) -> LowerResult<()> {
    let mut inverse = operation.inverse;
    let raw_name = operation.name();
    let name = if inverse {
        raw_name
            .strip_suffix(INVERSE_SUFFIX)
            .unwrap_or(&raw_name)
            .to_string()
    } else {
        raw_name
    };

    let (params, matrix) = if registry.gate_has_kernel::<P>(&name) {
        let params = operation.parameters().into_iter().map(P::real).collect();
        (params, Vec::new())
    } else {
        trace!(name = %name, "no kernel, substituting matrix");
        inverse = false;
        (Vec::new(), flatten::<P>(&matrix_of(operation)?))
    };

    let wires = wire_map
        .remap(&operation.wires)
        .map_err(|e| e.in_context(&name))?;

    program.push(name, params, wires, inverse, matrix);
    Ok(())
}
