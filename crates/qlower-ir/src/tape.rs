//! Quantum tapes.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::observable::Observable;
use crate::operation::Operation;
use crate::wire::Wire;

/// An ordered record of operations plus the observables to measure.
///
/// Tapes are built once and then only read; lowering never mutates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tape {
    operations: Vec<Operation>,
    observables: Vec<Observable>,
}

impl Tape {
    /// Create an empty tape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tape from its parts.
    pub fn from_parts(operations: Vec<Operation>, observables: Vec<Observable>) -> Self {
        Self {
            operations,
            observables,
        }
    }

    /// Append an operation.
    pub fn apply(&mut self, operation: Operation) -> &mut Self {
        self.operations.push(operation);
        self
    }

    /// Append an observable to measure.
    pub fn observe(&mut self, observable: impl Into<Observable>) -> &mut Self {
        self.observables.push(observable.into());
        self
    }

    /// Apply Hadamard.
    pub fn hadamard(&mut self, wire: impl Into<Wire>) -> &mut Self {
        self.apply(Operation::gate(StandardGate::Hadamard, [wire]))
    }

    /// Apply RX(θ).
    pub fn rx(&mut self, theta: f64, wire: impl Into<Wire>) -> &mut Self {
        self.apply(Operation::gate(StandardGate::RX(theta), [wire]))
    }

    /// Apply Rot(φ, θ, ω).
    pub fn rot(&mut self, phi: f64, theta: f64, omega: f64, wire: impl Into<Wire>) -> &mut Self {
        self.apply(Operation::gate(StandardGate::Rot(phi, theta, omega), [wire]))
    }

    /// Apply CNOT.
    pub fn cnot(&mut self, control: impl Into<Wire>, target: impl Into<Wire>) -> &mut Self {
        self.apply(Operation::gate(
            StandardGate::CNOT,
            [control.into(), target.into()],
        ))
    }

    /// Operations in tape order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Observables in tape order.
    pub fn observables(&self) -> &[Observable] {
        &self.observables
    }

    /// Number of operations.
    pub fn num_operations(&self) -> usize {
        self.operations.len()
    }

    /// Every wire label on the tape, in order of first appearance.
    pub fn wires(&self) -> Vec<Wire> {
        let mut seen = FxHashSet::default();
        self.operations
            .iter()
            .flat_map(|op| op.wires.iter())
            .chain(self.observables.iter().flat_map(Observable::wires))
            .filter(|wire| seen.insert(*wire))
            .cloned()
            .collect()
    }
}
