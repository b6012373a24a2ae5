//! Quantum gate types.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
///
/// Variant names match the kernel vocabulary of the state-vector engine, so
/// [`StandardGate::name`] is also the name a kernel lookup is keyed by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit, no parameters
    /// Identity gate.
    Identity,
    /// Pauli-X gate.
    PauliX,
    /// Pauli-Y gate.
    PauliY,
    /// Pauli-Z gate.
    PauliZ,
    /// Hadamard gate.
    Hadamard,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// sqrt(X) gate.
    SX,

    // Single-qubit rotations
    /// Rotation around X axis.
    RX(f64),
    /// Rotation around Y axis.
    RY(f64),
    /// Rotation around Z axis.
    RZ(f64),
    /// Phase shift diag(1, e^{iφ}).
    PhaseShift(f64),
    /// Arbitrary rotation Rot(φ, θ, ω) = RZ(ω)·RY(θ)·RZ(φ).
    Rot(f64, f64, f64),
    /// Universal single-qubit gate U3(θ, φ, λ).
    U3(f64, f64, f64),

    // Two-qubit gates
    /// Controlled-NOT.
    CNOT,
    /// Controlled-Y.
    CY,
    /// Controlled-Z.
    CZ,
    /// SWAP gate.
    SWAP,
    /// iSWAP gate.
    ISWAP,
    /// Controlled phase shift.
    ControlledPhaseShift(f64),
    /// Controlled RX.
    CRX(f64),
    /// Controlled RY.
    CRY(f64),
    /// Controlled RZ.
    CRZ(f64),
    /// Controlled Rot(φ, θ, ω).
    CRot(f64, f64, f64),
    /// XX Ising coupling.
    IsingXX(f64),
    /// XY Ising coupling.
    IsingXY(f64),
    /// YY Ising coupling.
    IsingYY(f64),
    /// ZZ Ising coupling.
    IsingZZ(f64),
    /// Givens rotation on the single-excitation subspace.
    SingleExcitation(f64),
    /// Single excitation with negative phase shift outside the subspace.
    SingleExcitationMinus(f64),
    /// Single excitation with positive phase shift outside the subspace.
    SingleExcitationPlus(f64),

    // Three- and four-qubit gates
    /// Toffoli (CCNOT).
    Toffoli,
    /// Fredkin (controlled SWAP).
    CSWAP,
    /// Givens rotation on the double-excitation subspace.
    DoubleExcitation(f64),
    /// Double excitation with negative phase shift outside the subspace.
    DoubleExcitationMinus(f64),
    /// Double excitation with positive phase shift outside the subspace.
    DoubleExcitationPlus(f64),

    // Variable width
    /// Z-string rotation exp(-iθ/2 Z⊗…⊗Z) on any number of wires.
    MultiRZ(f64),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::Identity => "Identity",
            StandardGate::PauliX => "PauliX",
            StandardGate::PauliY => "PauliY",
            StandardGate::PauliZ => "PauliZ",
            StandardGate::Hadamard => "Hadamard",
            StandardGate::S => "S",
            StandardGate::T => "T",
            StandardGate::SX => "SX",
            StandardGate::RX(_) => "RX",
            StandardGate::RY(_) => "RY",
            StandardGate::RZ(_) => "RZ",
            StandardGate::PhaseShift(_) => "PhaseShift",
            StandardGate::Rot(..) => "Rot",
            StandardGate::U3(..) => "U3",
            StandardGate::CNOT => "CNOT",
            StandardGate::CY => "CY",
            StandardGate::CZ => "CZ",
            StandardGate::SWAP => "SWAP",
            StandardGate::ISWAP => "ISWAP",
            StandardGate::ControlledPhaseShift(_) => "ControlledPhaseShift",
            StandardGate::CRX(_) => "CRX",
            StandardGate::CRY(_) => "CRY",
            StandardGate::CRZ(_) => "CRZ",
            StandardGate::CRot(..) => "CRot",
            StandardGate::IsingXX(_) => "IsingXX",
            StandardGate::IsingXY(_) => "IsingXY",
            StandardGate::IsingYY(_) => "IsingYY",
            StandardGate::IsingZZ(_) => "IsingZZ",
            StandardGate::SingleExcitation(_) => "SingleExcitation",
            StandardGate::SingleExcitationMinus(_) => "SingleExcitationMinus",
            StandardGate::SingleExcitationPlus(_) => "SingleExcitationPlus",
            StandardGate::Toffoli => "Toffoli",
            StandardGate::CSWAP => "CSWAP",
            StandardGate::DoubleExcitation(_) => "DoubleExcitation",
            StandardGate::DoubleExcitationMinus(_) => "DoubleExcitationMinus",
            StandardGate::DoubleExcitationPlus(_) => "DoubleExcitationPlus",
            StandardGate::MultiRZ(_) => "MultiRZ",
        }
    }

    /// Number of wires this gate acts on, or `None` for variable-width gates.
    #[inline]
    pub fn num_wires(&self) -> Option<usize> {
        match self {
            StandardGate::Identity
            | StandardGate::PauliX
            | StandardGate::PauliY
            | StandardGate::PauliZ
            | StandardGate::Hadamard
            | StandardGate::S
            | StandardGate::T
            | StandardGate::SX
            | StandardGate::RX(_)
            | StandardGate::RY(_)
            | StandardGate::RZ(_)
            | StandardGate::PhaseShift(_)
            | StandardGate::Rot(..)
            | StandardGate::U3(..) => Some(1),

            StandardGate::CNOT
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::SWAP
            | StandardGate::ISWAP
            | StandardGate::ControlledPhaseShift(_)
            | StandardGate::CRX(_)
            | StandardGate::CRY(_)
            | StandardGate::CRZ(_)
            | StandardGate::CRot(..)
            | StandardGate::IsingXX(_)
            | StandardGate::IsingXY(_)
            | StandardGate::IsingYY(_)
            | StandardGate::IsingZZ(_)
            | StandardGate::SingleExcitation(_)
            | StandardGate::SingleExcitationMinus(_)
            | StandardGate::SingleExcitationPlus(_) => Some(2),

            StandardGate::Toffoli | StandardGate::CSWAP => Some(3),

            StandardGate::DoubleExcitation(_)
            | StandardGate::DoubleExcitationMinus(_)
            | StandardGate::DoubleExcitationPlus(_) => Some(4),

            StandardGate::MultiRZ(_) => None,
        }
    }

    /// Get the numeric parameters of this gate, in declaration order.
    pub fn parameters(&self) -> Vec<f64> {
        match self {
            StandardGate::RX(p)
            | StandardGate::RY(p)
            | StandardGate::RZ(p)
            | StandardGate::PhaseShift(p)
            | StandardGate::ControlledPhaseShift(p)
            | StandardGate::CRX(p)
            | StandardGate::CRY(p)
            | StandardGate::CRZ(p)
            | StandardGate::IsingXX(p)
            | StandardGate::IsingXY(p)
            | StandardGate::IsingYY(p)
            | StandardGate::IsingZZ(p)
            | StandardGate::SingleExcitation(p)
            | StandardGate::SingleExcitationMinus(p)
            | StandardGate::SingleExcitationPlus(p)
            | StandardGate::DoubleExcitation(p)
            | StandardGate::DoubleExcitationMinus(p)
            | StandardGate::DoubleExcitationPlus(p)
            | StandardGate::MultiRZ(p) => vec![*p],

            StandardGate::Rot(a, b, c) | StandardGate::U3(a, b, c) | StandardGate::CRot(a, b, c) => {
                vec![*a, *b, *c]
            }

            _ => vec![],
        }
    }
}

/// A user-defined gate, optionally carrying its own unitary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of wires it acts on.
    pub num_wires: usize,
    /// Numeric parameters of the gate.
    pub params: Vec<f64>,
    /// Optional unitary matrix (2^n × 2^n).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Array2<Complex64>>,
}

impl CustomGate {
    /// Create a new custom gate.
    pub fn new(name: impl Into<String>, num_wires: usize) -> Self {
        Self {
            name: name.into(),
            num_wires,
            params: vec![],
            matrix: None,
        }
    }

    /// Create a gate defined only by its unitary.
    ///
    /// The width is the base-2 log of the row count. A matrix that is not
    /// square with a power-of-two dimension is reported as
    /// [`IrError::InvalidMatrix`](crate::IrError::InvalidMatrix) when the
    /// matrix is requested.
    pub fn unitary(matrix: Array2<Complex64>) -> Self {
        let num_wires = matrix.nrows().max(1).ilog2() as usize;
        Self {
            name: "QubitUnitary".into(),
            num_wires,
            params: vec![],
            matrix: Some(matrix),
        }
    }

    /// Add parameters to the gate.
    #[must_use]
    pub fn with_params(mut self, params: Vec<f64>) -> Self {
        self.params = params;
        self
    }

    /// Attach a unitary matrix to the gate.
    #[must_use]
    pub fn with_matrix(mut self, matrix: Array2<Complex64>) -> Self {
        self.matrix = Some(matrix);
        self
    }
}

/// A gate, either standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A custom user-defined gate.
    Custom(CustomGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => &g.name,
        }
    }

    /// Number of wires, or `None` for variable-width gates.
    #[inline]
    pub fn num_wires(&self) -> Option<usize> {
        match self {
            GateKind::Standard(g) => g.num_wires(),
            GateKind::Custom(g) => Some(g.num_wires),
        }
    }

    /// Numeric parameters of the gate.
    pub fn parameters(&self) -> Vec<f64> {
        match self {
            GateKind::Standard(g) => g.parameters(),
            GateKind::Custom(g) => g.params.clone(),
        }
    }
}

impl From<StandardGate> for GateKind {
    fn from(gate: StandardGate) -> Self {
        GateKind::Standard(gate)
    }
}

impl From<CustomGate> for GateKind {
    fn from(gate: CustomGate) -> Self {
        GateKind::Custom(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use std::f64::consts::PI;

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::Hadamard.num_wires(), Some(1));
        assert_eq!(StandardGate::CNOT.num_wires(), Some(2));
        assert_eq!(StandardGate::Toffoli.num_wires(), Some(3));
        assert_eq!(StandardGate::DoubleExcitation(0.1).num_wires(), Some(4));
        assert_eq!(StandardGate::MultiRZ(0.1).num_wires(), None);
    }

    #[test]
    fn test_parameters_in_declaration_order() {
        assert_eq!(StandardGate::Rot(0.1, 0.2, 0.3).parameters(), vec![0.1, 0.2, 0.3]);
        assert_eq!(StandardGate::RX(PI).parameters(), vec![PI]);
        assert!(StandardGate::PauliX.parameters().is_empty());
    }

    #[test]
    fn test_custom_gate() {
        let custom = CustomGate::new("my_gate", 2).with_params(vec![PI / 4.0]);
        let kind = GateKind::from(custom);
        assert_eq!(kind.name(), "my_gate");
        assert_eq!(kind.num_wires(), Some(2));
        assert_eq!(kind.parameters(), vec![PI / 4.0]);
    }

    #[test]
    fn test_unitary_width_from_matrix() {
        let gate = CustomGate::unitary(Array2::eye(4));
        assert_eq!(gate.name, "QubitUnitary");
        assert_eq!(gate.num_wires, 2);
    }
}
