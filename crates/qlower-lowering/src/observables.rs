//! Observable lowering pass.

use num_complex::Complex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use qlower_ir::{Observable, Operator, Tape};

use crate::error::LowerResult;
use crate::kernel::{observable_has_kernel, term_has_kernel};
use crate::precision::{Precision, flatten};
use crate::wire_map::WireMap;

/// One observable in the engine's encoding.
///
/// `names` and `wires` have one entry per term. `params` is empty when every
/// term has a kernel; otherwise it has one entry per term, empty for terms
/// with a kernel and the row-major flattened matrix for the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoweredObservable<T> {
    /// Term names.
    pub names: Vec<String>,
    /// Per-term matrix buffers.
    pub params: Vec<Vec<Complex<T>>>,
    /// Per-term physical wires.
    pub wires: Vec<Vec<usize>>,
}

impl<T> LoweredObservable<T> {
    /// Number of terms.
    pub fn num_terms(&self) -> usize {
        self.names.len()
    }

    /// Check if the engine measures this observable with kernels only.
    pub fn uses_kernels_only(&self) -> bool {
        self.params.is_empty()
    }
}

/// Lower every observable on the tape, in tape order.
#[instrument(skip_all, fields(precision = %P::KIND))]
pub fn lower_observables<P: Precision>(
    tape: &Tape,
    wire_map: &WireMap,
) -> LowerResult<Vec<LoweredObservable<P::Real>>> {
    let lowered = tape
        .observables()
        .iter()
        .map(|observable| lower_observable::<P>(observable, wire_map))
        .collect::<LowerResult<Vec<_>>>()?;
    debug!(observables = lowered.len(), "lowered observables");
    Ok(lowered)
}

/// Lower a single observable.
pub fn lower_observable<P: Precision>(
    observable: &Observable,
    wire_map: &WireMap,
) -> LowerResult<LoweredObservable<P::Real>> {
    let terms = observable.terms();

    let wires = terms
        .iter()
        .map(|term| {
            wire_map
                .remap(&term.wires)
                .map_err(|e| e.in_context(term.name()))
        })
        .collect::<LowerResult<Vec<_>>>()?;

    let names = terms.iter().map(|term| term.name().to_string()).collect();

    let params = if observable_has_kernel(observable) {
        Vec::new()
    } else {
        terms
            .iter()
            .map(|term| -> LowerResult<Vec<Complex<P::Real>>> {
                if term_has_kernel(term) {
                    Ok(Vec::new())
                } else {
                    Ok(flatten::<P>(&term.matrix()?))
                }
            })
            .collect::<LowerResult<Vec<_>>>()?
    };

    Ok(LoweredObservable {
        names,
        params,
        wires,
    })
}
