//! Measurement observables.
//!
//! An [`Observable`] is either a single [`AtomicObservable`] or an ordered
//! tensor product of them. Tensor products never nest: a product of products
//! is flattened by [`Observable::tensor`].

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::wire::{Wire, wires};

/// The kind of a single-term observable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObservableKind {
    /// Identity.
    Identity,
    /// Pauli-X.
    PauliX,
    /// Pauli-Y.
    PauliY,
    /// Pauli-Z.
    PauliZ,
    /// Hadamard.
    Hadamard,
    /// Projector onto a computational basis state, one bit per wire.
    Projector(Vec<u8>),
    /// Arbitrary Hermitian matrix (2^n × 2^n).
    Hermitian(Array2<Complex64>),
}

impl ObservableKind {
    /// Get the name of this observable kind.
    pub fn name(&self) -> &'static str {
        match self {
            ObservableKind::Identity => "Identity",
            ObservableKind::PauliX => "PauliX",
            ObservableKind::PauliY => "PauliY",
            ObservableKind::PauliZ => "PauliZ",
            ObservableKind::Hadamard => "Hadamard",
            ObservableKind::Projector(_) => "Projector",
            ObservableKind::Hermitian(_) => "Hermitian",
        }
    }

    /// Identity or a single-qubit Pauli.
    pub fn is_pauli(&self) -> bool {
        matches!(
            self,
            ObservableKind::Identity
                | ObservableKind::PauliX
                | ObservableKind::PauliY
                | ObservableKind::PauliZ
        )
    }
}

/// A single-term observable on a set of wires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomicObservable {
    /// The kind of observable.
    pub kind: ObservableKind,
    /// Wires the observable acts on.
    pub wires: Vec<Wire>,
}

impl AtomicObservable {
    /// Create a new atomic observable.
    pub fn new<W: Into<Wire>>(kind: ObservableKind, on: impl IntoIterator<Item = W>) -> Self {
        Self {
            kind,
            wires: wires(on),
        }
    }

    /// Pauli-X on one wire.
    pub fn pauli_x(wire: impl Into<Wire>) -> Self {
        Self::new(ObservableKind::PauliX, [wire])
    }

    /// Pauli-Y on one wire.
    pub fn pauli_y(wire: impl Into<Wire>) -> Self {
        Self::new(ObservableKind::PauliY, [wire])
    }

    /// Pauli-Z on one wire.
    pub fn pauli_z(wire: impl Into<Wire>) -> Self {
        Self::new(ObservableKind::PauliZ, [wire])
    }

    /// Hadamard on one wire.
    pub fn hadamard(wire: impl Into<Wire>) -> Self {
        Self::new(ObservableKind::Hadamard, [wire])
    }

    /// Hermitian matrix on the given wires.
    pub fn hermitian<W: Into<Wire>>(
        matrix: Array2<Complex64>,
        on: impl IntoIterator<Item = W>,
    ) -> Self {
        Self::new(ObservableKind::Hermitian(matrix), on)
    }

    /// Projector onto `state` on the given wires.
    pub fn projector<W: Into<Wire>>(state: Vec<u8>, on: impl IntoIterator<Item = W>) -> Self {
        Self::new(ObservableKind::Projector(state), on)
    }

    /// Get the name of this observable.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// An observable to be measured: one term or a tensor product of terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Observable {
    /// A single term.
    Atomic(AtomicObservable),
    /// An ordered tensor product of terms.
    Tensor(Vec<AtomicObservable>),
}

impl Observable {
    /// Build a tensor product, flattening nested products.
    pub fn tensor(factors: impl IntoIterator<Item = Observable>) -> Self {
        let terms = factors
            .into_iter()
            .flat_map(|factor| match factor {
                Observable::Atomic(term) => vec![term],
                Observable::Tensor(terms) => terms,
            })
            .collect();
        Observable::Tensor(terms)
    }

    /// Check if this is a tensor product.
    pub fn is_tensor(&self) -> bool {
        matches!(self, Observable::Tensor(_))
    }

    /// The terms of this observable; a single term for atomic observables.
    pub fn terms(&self) -> &[AtomicObservable] {
        match self {
            Observable::Atomic(term) => std::slice::from_ref(term),
            Observable::Tensor(terms) => terms,
        }
    }

    /// Term names in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.terms().iter().map(AtomicObservable::name).collect()
    }

    /// All wires, term by term.
    pub fn wires(&self) -> impl Iterator<Item = &Wire> + '_ {
        self.terms().iter().flat_map(|term| term.wires.iter())
    }
}

impl From<AtomicObservable> for Observable {
    fn from(term: AtomicObservable) -> Self {
        Observable::Atomic(term)
    }
}

/// Check if an observable is a Pauli word: a tensor product of only
/// identity, X, Y and Z terms.
pub fn is_pauli_word(observable: &Observable) -> bool {
    observable.terms().iter().all(|term| term.kind.is_pauli())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn z0_x1() -> Observable {
        Observable::tensor([
            AtomicObservable::pauli_z(0).into(),
            AtomicObservable::pauli_x(1).into(),
        ])
    }

    #[test]
    fn test_atomic_terms() {
        let obs: Observable = AtomicObservable::hadamard("a").into();
        assert!(!obs.is_tensor());
        assert_eq!(obs.names(), vec!["Hadamard"]);
        assert_eq!(obs.terms().len(), 1);
    }

    #[test]
    fn test_tensor_flattens() {
        let nested = Observable::tensor([z0_x1(), AtomicObservable::pauli_y(2).into()]);
        assert!(nested.is_tensor());
        assert_eq!(nested.names(), vec!["PauliZ", "PauliX", "PauliY"]);
        let wires: Vec<_> = nested.wires().cloned().collect();
        assert_eq!(wires, vec![Wire::from(0), Wire::from(1), Wire::from(2)]);
    }

    #[test]
    fn test_pauli_word_detection() {
        assert!(is_pauli_word(&z0_x1()));
        assert!(is_pauli_word(
            &AtomicObservable::new(ObservableKind::Identity, [0]).into()
        ));
        assert!(!is_pauli_word(&AtomicObservable::hadamard(0).into()));

        let mixed = Observable::tensor([
            AtomicObservable::pauli_z(0).into(),
            AtomicObservable::hermitian(Array2::eye(2), [1]).into(),
        ]);
        assert!(!is_pauli_word(&mixed));
    }
}
