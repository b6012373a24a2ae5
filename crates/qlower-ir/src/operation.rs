//! Tape operations: gate applications and state preparations.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::gate::{GateKind, StandardGate};
use crate::wire::{Wire, wires};

/// Suffix the engine reserves for inverted gate names, e.g. `"RX.inv"`.
pub const INVERSE_SUFFIX: &str = ".inv";

/// What an operation does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OperationKind {
    /// A unitary gate.
    Gate(GateKind),
    /// Prepare a computational basis state, one bit per wire.
    BasisState(Vec<u8>),
    /// Prepare an arbitrary normalized state vector.
    StateVector(Vec<Complex64>),
}

/// A single operation on a tape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The kind of operation.
    pub kind: OperationKind,
    /// Wires the operation acts on, in order.
    pub wires: Vec<Wire>,
    /// Whether the operation is applied inverted.
    #[serde(default)]
    pub inverse: bool,
}

impl Operation {
    /// Create a gate operation.
    pub fn gate<W: Into<Wire>>(
        gate: impl Into<GateKind>,
        on: impl IntoIterator<Item = W>,
    ) -> Self {
        Self {
            kind: OperationKind::Gate(gate.into()),
            wires: wires(on),
            inverse: false,
        }
    }

    /// Create a basis-state preparation.
    pub fn basis_state<W: Into<Wire>>(state: Vec<u8>, on: impl IntoIterator<Item = W>) -> Self {
        Self {
            kind: OperationKind::BasisState(state),
            wires: wires(on),
            inverse: false,
        }
    }

    /// Create a state-vector preparation.
    pub fn state_vector<W: Into<Wire>>(
        amplitudes: Vec<Complex64>,
        on: impl IntoIterator<Item = W>,
    ) -> Self {
        Self {
            kind: OperationKind::StateVector(amplitudes),
            wires: wires(on),
            inverse: false,
        }
    }

    /// Toggle the inverse flag.
    #[must_use]
    pub fn inv(mut self) -> Self {
        self.inverse = !self.inverse;
        self
    }

    /// Name without the inverse suffix.
    pub fn base_name(&self) -> &str {
        match &self.kind {
            OperationKind::Gate(g) => g.name(),
            OperationKind::BasisState(_) => "BasisState",
            OperationKind::StateVector(_) => "QubitStateVector",
        }
    }

    /// Raw name, carrying [`INVERSE_SUFFIX`] when the operation is inverted.
    pub fn name(&self) -> String {
        if self.inverse {
            format!("{}{INVERSE_SUFFIX}", self.base_name())
        } else {
            self.base_name().to_string()
        }
    }

    /// The gate, if this is a gate operation.
    pub fn as_gate(&self) -> Option<&GateKind> {
        match &self.kind {
            OperationKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Numeric gate parameters. State preparations report none.
    pub fn parameters(&self) -> Vec<f64> {
        self.as_gate().map(GateKind::parameters).unwrap_or_default()
    }

    /// Check if this operation prepares a state rather than applying a gate.
    pub fn is_state_prep(&self) -> bool {
        matches!(
            self.kind,
            OperationKind::BasisState(_) | OperationKind::StateVector(_)
        )
    }

    /// Check if this operation is a composite that [`expand`](Self::expand)
    /// replaces with simpler rotations.
    pub fn is_composite(&self) -> bool {
        self.decomposition().is_some()
    }

    /// Expand into primitive operations.
    ///
    /// Non-composite operations expand to themselves. An inverted composite
    /// expands to its decomposition reversed, with every element inverted.
    pub fn expand(&self) -> Vec<Operation> {
        let Some(decomposition) = self.decomposition() else {
            return vec![self.clone()];
        };
        let ordered: Vec<Operation> = if self.inverse {
            decomposition.into_iter().rev().map(Operation::inv).collect()
        } else {
            decomposition
        };
        ordered.iter().flat_map(Operation::expand).collect()
    }

    fn decomposition(&self) -> Option<Vec<Operation>> {
        match self.as_gate()? {
            GateKind::Standard(StandardGate::Rot(phi, theta, omega)) => Some(vec![
                Operation::gate(StandardGate::RZ(*phi), self.wires.iter()),
                Operation::gate(StandardGate::RY(*theta), self.wires.iter()),
                Operation::gate(StandardGate::RZ(*omega), self.wires.iter()),
            ]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::CustomGate;

    #[test]
    fn test_inverse_name_carries_suffix() {
        let op = Operation::gate(StandardGate::PauliX, [1]).inv();
        assert_eq!(op.name(), "PauliX.inv");
        assert_eq!(op.base_name(), "PauliX");
        assert_eq!(op.inv().name(), "PauliX");
    }

    #[test]
    fn test_state_prep_detection() {
        let basis = Operation::basis_state(vec![1, 0], [0, 1]);
        let vector = Operation::state_vector(vec![Complex64::new(1.0, 0.0); 2], [0]);
        assert!(basis.is_state_prep());
        assert!(vector.is_state_prep());
        assert_eq!(vector.name(), "QubitStateVector");
        assert!(basis.parameters().is_empty());
        assert!(!Operation::gate(StandardGate::Hadamard, [0]).is_state_prep());
    }

    #[test]
    fn test_rot_expands_in_canonical_order() {
        let rot = Operation::gate(StandardGate::Rot(0.1, 0.2, 0.3), ["a"]);
        assert!(rot.is_composite());

        let expanded = rot.expand();
        let names: Vec<_> = expanded.iter().map(Operation::name).collect();
        assert_eq!(names, vec!["RZ", "RY", "RZ"]);
        let params: Vec<_> = expanded.iter().map(Operation::parameters).collect();
        assert_eq!(params, vec![vec![0.1], vec![0.2], vec![0.3]]);
        assert!(expanded.iter().all(|op| op.wires == vec![Wire::from("a")]));
    }

    #[test]
    fn test_inverted_rot_expands_reversed_and_inverted() {
        let rot = Operation::gate(StandardGate::Rot(0.1, 0.2, 0.3), [0]).inv();
        let expanded = rot.expand();
        let names: Vec<_> = expanded.iter().map(Operation::name).collect();
        assert_eq!(names, vec!["RZ.inv", "RY.inv", "RZ.inv"]);
        assert_eq!(expanded[0].parameters(), vec![0.3]);
        assert_eq!(expanded[2].parameters(), vec![0.1]);
    }

    #[test]
    fn test_primitive_expands_to_itself() {
        let crot = Operation::gate(StandardGate::CRot(0.1, 0.2, 0.3), [0, 1]);
        assert!(!crot.is_composite());
        assert_eq!(crot.expand(), vec![crot.clone()]);

        let custom = Operation::gate(CustomGate::new("blob", 1), [0]);
        assert_eq!(custom.expand(), vec![custom.clone()]);
    }
}
