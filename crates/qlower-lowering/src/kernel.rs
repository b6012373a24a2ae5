//! Kernel support oracle.
//!
//! The engine exposes a fixed vocabulary of named gate kernels per
//! precision. [`KernelRegistry`] holds that vocabulary as plain sets so the
//! lowering passes can decide between the kernel path and the dense-matrix
//! fallback with a membership test.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use qlower_ir::{AtomicObservable, Observable, ObservableKind, is_pauli_word};

use crate::precision::{Precision, PrecisionKind};

/// Gates with a dedicated kernel in the default engine build, at both
/// precisions.
pub const DEFAULT_GATE_KERNELS: &[&str] = &[
    "Identity",
    "PauliX",
    "PauliY",
    "PauliZ",
    "Hadamard",
    "S",
    "T",
    "RX",
    "RY",
    "RZ",
    "PhaseShift",
    "Rot",
    "CY",
    "CZ",
    "CNOT",
    "SWAP",
    "ControlledPhaseShift",
    "CRX",
    "CRY",
    "CRZ",
    "CRot",
    "IsingXX",
    "IsingXY",
    "IsingYY",
    "IsingZZ",
    "SingleExcitation",
    "SingleExcitationMinus",
    "SingleExcitationPlus",
    "Toffoli",
    "CSWAP",
    "DoubleExcitation",
    "DoubleExcitationMinus",
    "DoubleExcitationPlus",
    "MultiRZ",
];

/// Registered gate kernels, keyed by name and precision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelRegistry {
    single: FxHashSet<String>,
    double: FxHashSet<String>,
}

impl KernelRegistry {
    /// Create a registry with no kernels; every gate falls back to a matrix.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The default engine vocabulary at both precisions.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for &name in DEFAULT_GATE_KERNELS {
            registry.register_all(name);
        }
        registry
    }

    /// Register a kernel at precision `P`.
    pub fn register<P: Precision>(&mut self, name: impl Into<String>) {
        self.set_mut(P::KIND).insert(name.into());
    }

    /// Register a kernel at both precisions.
    pub fn register_all(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.single.insert(name.clone());
        self.double.insert(name);
    }

    /// Remove a kernel at precision `P`. Returns whether it was present.
    pub fn unregister<P: Precision>(&mut self, name: &str) -> bool {
        self.set_mut(P::KIND).remove(name)
    }

    /// Remove the named kernels at both precisions.
    #[must_use]
    pub fn without<S: AsRef<str>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        for name in names {
            self.single.remove(name.as_ref());
            self.double.remove(name.as_ref());
        }
        self
    }

    /// Check if gate `name` has a kernel at precision `P`.
    pub fn gate_has_kernel<P: Precision>(&self, name: &str) -> bool {
        self.contains(P::KIND, name)
    }

    /// Check if gate `name` has a kernel at a runtime-selected precision.
    pub fn contains(&self, precision: PrecisionKind, name: &str) -> bool {
        self.set(precision).contains(name)
    }

    /// Registered kernel names at precision `P`, sorted.
    pub fn kernels<P: Precision>(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.set(P::KIND).iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn set(&self, precision: PrecisionKind) -> &FxHashSet<String> {
        match precision {
            PrecisionKind::Single => &self.single,
            PrecisionKind::Double => &self.double,
        }
    }

    fn set_mut(&mut self, precision: PrecisionKind) -> &mut FxHashSet<String> {
        match precision {
            PrecisionKind::Single => &mut self.single,
            PrecisionKind::Double => &mut self.double,
        }
    }
}

/// Check if the engine can measure `observable` without a dense matrix.
///
/// Pauli words, Hadamard and Projector terms have kernels; a tensor product
/// has one only if every term does.
pub fn observable_has_kernel(observable: &Observable) -> bool {
    if is_pauli_word(observable) {
        return true;
    }
    match observable {
        Observable::Atomic(term) => term_has_kernel(term),
        Observable::Tensor(terms) => terms.iter().all(term_has_kernel),
    }
}

/// Check if a single term has a kernel.
pub fn term_has_kernel(term: &AtomicObservable) -> bool {
    term.kind.is_pauli()
        || matches!(
            term.kind,
            ObservableKind::Hadamard | ObservableKind::Projector(_)
        )
}
