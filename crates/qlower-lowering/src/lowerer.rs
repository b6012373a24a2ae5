//! Runtime-precision front end for the lowering passes.

use serde::{Deserialize, Serialize};
use tracing::info;

use qlower_ir::Tape;

use crate::config::LoweringConfig;
use crate::error::LowerResult;
use crate::kernel::KernelRegistry;
use crate::observables::{LoweredObservable, lower_observables};
use crate::operations::{LoweredOperations, lower_operations};
use crate::precision::{Double, PrecisionKind, Single};
use crate::wire_map::WireMap;

/// Lowered operations tagged with their precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "precision", content = "program", rename_all = "lowercase")]
pub enum OperationProgram {
    /// `complex64` buffers.
    Single(LoweredOperations<f32>),
    /// `complex128` buffers.
    Double(LoweredOperations<f64>),
}

impl OperationProgram {
    /// Get the precision of the buffers.
    pub fn precision(&self) -> PrecisionKind {
        match self {
            OperationProgram::Single(_) => PrecisionKind::Single,
            OperationProgram::Double(_) => PrecisionKind::Double,
        }
    }

    /// Emitted kernel names.
    pub fn names(&self) -> &[String] {
        match self {
            OperationProgram::Single(p) => &p.names,
            OperationProgram::Double(p) => &p.names,
        }
    }

    /// Emitted physical wires.
    pub fn wires(&self) -> &[Vec<usize>] {
        match self {
            OperationProgram::Single(p) => &p.wires,
            OperationProgram::Double(p) => &p.wires,
        }
    }

    /// Emitted inverse flags.
    pub fn inverses(&self) -> &[bool] {
        match self {
            OperationProgram::Single(p) => &p.inverses,
            OperationProgram::Double(p) => &p.inverses,
        }
    }

    /// Whether a state preparation was skipped.
    pub fn uses_state_prep(&self) -> bool {
        match self {
            OperationProgram::Single(p) => p.uses_state_prep,
            OperationProgram::Double(p) => p.uses_state_prep,
        }
    }

    /// Number of emitted operations.
    pub fn len(&self) -> usize {
        self.names().len()
    }

    /// Check if no operations were emitted.
    pub fn is_empty(&self) -> bool {
        self.names().is_empty()
    }

    /// Get the double-precision program, if that is what this holds.
    pub fn as_double(&self) -> Option<&LoweredOperations<f64>> {
        match self {
            OperationProgram::Double(p) => Some(p),
            OperationProgram::Single(_) => None,
        }
    }

    /// Get the single-precision program, if that is what this holds.
    pub fn as_single(&self) -> Option<&LoweredOperations<f32>> {
        match self {
            OperationProgram::Single(p) => Some(p),
            OperationProgram::Double(_) => None,
        }
    }
}

/// Lowered observables tagged with their precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "precision", content = "observables", rename_all = "lowercase")]
pub enum ObservableProgram {
    /// `complex64` buffers.
    Single(Vec<LoweredObservable<f32>>),
    /// `complex128` buffers.
    Double(Vec<LoweredObservable<f64>>),
}

impl ObservableProgram {
    /// Get the precision of the buffers.
    pub fn precision(&self) -> PrecisionKind {
        match self {
            ObservableProgram::Single(_) => PrecisionKind::Single,
            ObservableProgram::Double(_) => PrecisionKind::Double,
        }
    }

    /// Number of lowered observables.
    pub fn len(&self) -> usize {
        match self {
            ObservableProgram::Single(o) => o.len(),
            ObservableProgram::Double(o) => o.len(),
        }
    }

    /// Check if there are no observables.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Term names of the `index`-th observable.
    pub fn names(&self, index: usize) -> Option<&[String]> {
        match self {
            ObservableProgram::Single(o) => o.get(index).map(|o| o.names.as_slice()),
            ObservableProgram::Double(o) => o.get(index).map(|o| o.names.as_slice()),
        }
    }

    /// Get the double-precision observables, if that is what this holds.
    pub fn as_double(&self) -> Option<&[LoweredObservable<f64>]> {
        match self {
            ObservableProgram::Double(o) => Some(o),
            ObservableProgram::Single(_) => None,
        }
    }

    /// Get the single-precision observables, if that is what this holds.
    pub fn as_single(&self) -> Option<&[LoweredObservable<f32>]> {
        match self {
            ObservableProgram::Single(o) => Some(o),
            ObservableProgram::Double(_) => None,
        }
    }
}

/// Lowers tapes against a fixed wire map, kernel registry and precision.
///
/// # Example
///
/// ```rust
/// use qlower_ir::{AtomicObservable, Tape};
/// use qlower_lowering::{Lowerer, LoweringConfig};
///
/// let mut tape = Tape::new();
/// tape.hadamard("a").cnot("a", "b");
/// tape.observe(AtomicObservable::pauli_z("b"));
///
/// let lowerer = Lowerer::for_tape(&tape, &LoweringConfig::default()).unwrap();
/// let ops = lowerer.lower_operations(&tape).unwrap();
/// assert_eq!(ops.names(), ["Hadamard", "CNOT"]);
/// assert_eq!(ops.wires(), [vec![0], vec![0, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct Lowerer {
    wire_map: WireMap,
    registry: KernelRegistry,
    precision: PrecisionKind,
}

impl Lowerer {
    /// Create a lowerer from its parts.
    pub fn new(wire_map: WireMap, registry: KernelRegistry, precision: PrecisionKind) -> Self {
        Self {
            wire_map,
            registry,
            precision,
        }
    }

    /// Create a lowerer with the registry and precision from `config`.
    ///
    /// The config is validated first; a rejected config surfaces as
    /// [`LowerError::Config`](crate::LowerError::Config).
    pub fn from_config(wire_map: WireMap, config: &LoweringConfig) -> LowerResult<Self> {
        config.validate()?;
        Ok(Self::new(wire_map, config.registry(), config.precision))
    }

    /// Create a lowerer whose wire map enumerates the tape's own wires in
    /// first-appearance order.
    pub fn for_tape(tape: &Tape, config: &LoweringConfig) -> LowerResult<Self> {
        Self::from_config(WireMap::from_labels(tape.wires()), config)
    }

    /// Create a lowerer for `tape` from a YAML file plus `QLOWER_*`
    /// environment overrides.
    pub fn load_for_tape(tape: &Tape, config_file: Option<&str>) -> LowerResult<Self> {
        let config = LoweringConfig::load(config_file)?;
        Self::for_tape(tape, &config)
    }

    /// Get the wire map.
    pub fn wire_map(&self) -> &WireMap {
        &self.wire_map
    }

    /// Get the kernel registry.
    pub fn registry(&self) -> &KernelRegistry {
        &self.registry
    }

    /// Get the target precision.
    pub fn precision(&self) -> PrecisionKind {
        self.precision
    }

    /// Lower the tape's operations at the configured precision.
    pub fn lower_operations(&self, tape: &Tape) -> LowerResult<OperationProgram> {
        info!(
            precision = %self.precision,
            wires = self.wire_map.len(),
            operations = tape.num_operations(),
            "lowering operations"
        );
        Ok(match self.precision {
            PrecisionKind::Single => OperationProgram::Single(lower_operations::<Single>(
                tape,
                &self.wire_map,
                &self.registry,
            )?),
            PrecisionKind::Double => OperationProgram::Double(lower_operations::<Double>(
                tape,
                &self.wire_map,
                &self.registry,
            )?),
        })
    }

    /// Lower the tape's observables at the configured precision.
    pub fn lower_observables(&self, tape: &Tape) -> LowerResult<ObservableProgram> {
        info!(
            precision = %self.precision,
            observables = tape.observables().len(),
            "lowering observables"
        );
        Ok(match self.precision {
            PrecisionKind::Single => {
                ObservableProgram::Single(lower_observables::<Single>(tape, &self.wire_map)?)
            }
            PrecisionKind::Double => {
                ObservableProgram::Double(lower_observables::<Double>(tape, &self.wire_map)?)
            }
        })
    }

    /// Lower operations and observables together.
    pub fn lower(&self, tape: &Tape) -> LowerResult<(OperationProgram, ObservableProgram)> {
        Ok((self.lower_operations(tape)?, self.lower_observables(tape)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use num_complex::{Complex, Complex64};
    use qlower_ir::{AtomicObservable, Observable, Operation, StandardGate};

    use crate::config::ConfigError;
    use crate::error::LowerError;

    fn widen(buffer: &[Complex<f32>]) -> Vec<Complex<f64>> {
        buffer
            .iter()
            .map(|z| Complex::new(f64::from(z.re), f64::from(z.im)))
            .collect()
    }

    fn bell_tape() -> Tape {
        let mut tape = Tape::new();
        tape.hadamard("q0").cnot("q0", "q1");
        tape.observe(Observable::tensor([
            AtomicObservable::pauli_z("q0").into(),
            AtomicObservable::pauli_z("q1").into(),
        ]));
        tape
    }

    #[test]
    fn test_for_tape_maps_first_appearance() {
        let tape = bell_tape();
        let lowerer = Lowerer::for_tape(&tape, &LoweringConfig::default()).unwrap();
        assert_eq!(lowerer.wire_map().len(), 2);
        assert_eq!(lowerer.precision(), PrecisionKind::Double);

        let (ops, obs) = lowerer.lower(&tape).unwrap();
        assert_eq!(ops.names(), ["Hadamard", "CNOT"]);
        assert_eq!(ops.wires(), [vec![0], vec![0, 1]]);
        assert_eq!(obs.len(), 1);
        assert_eq!(obs.names(0).unwrap(), ["PauliZ", "PauliZ"]);
        assert!(obs.as_double().unwrap()[0].uses_kernels_only());
    }

    #[test]
    fn test_single_precision_dispatch() {
        let config = LoweringConfig {
            precision: PrecisionKind::Single,
            ..Default::default()
        };
        let mut tape = Tape::new();
        tape.rx(1.5, 0);
        let lowerer = Lowerer::from_config(WireMap::trivial(1), &config).unwrap();

        let ops = lowerer.lower_operations(&tape).unwrap();
        assert_eq!(ops.precision(), PrecisionKind::Single);
        assert_eq!(ops.as_single().unwrap().params, vec![vec![1.5f32]]);
        assert!(ops.as_double().is_none());
    }

    #[test]
    fn test_disabled_kernel_from_config() {
        let config = LoweringConfig {
            disabled_kernels: vec!["Hadamard".into()],
            ..Default::default()
        };
        let mut tape = Tape::new();
        tape.apply(Operation::gate(StandardGate::Hadamard, [0]).inv());
        let lowerer = Lowerer::from_config(WireMap::trivial(1), &config).unwrap();

        let ops = lowerer.lower_operations(&tape).unwrap();
        let program = ops.as_double().unwrap();
        assert_eq!(program.names, vec!["Hadamard"]);
        assert_eq!(ops.inverses(), [false]);
        assert_eq!(program.matrices[0].len(), 4);
    }

    #[test]
    fn test_single_and_double_agree() {
        let mut tape = Tape::new();
        tape.apply(Operation::gate(StandardGate::SX, [0]));
        tape.observe(AtomicObservable::hermitian(Array2::<Complex64>::eye(2), [0]));

        let double = Lowerer::new(WireMap::trivial(1), KernelRegistry::standard(), PrecisionKind::Double);
        let single = Lowerer::new(WireMap::trivial(1), KernelRegistry::standard(), PrecisionKind::Single);

        let d = double.lower_operations(&tape).unwrap();
        let s = single.lower_operations(&tape).unwrap();
        assert_eq!(d.names(), s.names());
        let wide = widen(&s.as_single().unwrap().matrices[0]);
        for (a, b) in wide.iter().zip(&d.as_double().unwrap().matrices[0]) {
            assert!((a - b).norm() < 1e-6);
        }

        let obs = single.lower_observables(&tape).unwrap();
        assert_eq!(obs.precision(), PrecisionKind::Single);
        assert_eq!(obs.as_single().unwrap()[0].params[0].len(), 4);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = LoweringConfig {
            disabled_kernels: vec!["RX.inv".into()],
            ..Default::default()
        };
        let err = Lowerer::for_tape(&bell_tape(), &config).unwrap_err();
        assert!(matches!(err, LowerError::Config(ConfigError::Invalid(_))));
        assert!(err.to_string().starts_with("Configuration error: Validation error"));
    }

    #[test]
    fn test_missing_config_file_is_a_lower_error() {
        let err = Lowerer::load_for_tape(&bell_tape(), Some("/nonexistent/qlower.yaml")).unwrap_err();
        assert!(matches!(err, LowerError::Config(ConfigError::Io(_))));
    }

    #[test]
    fn test_state_prep_flag_survives_dispatch() {
        let mut tape = Tape::new();
        tape.apply(Operation::basis_state(vec![1], [0]));
        let lowerer = Lowerer::for_tape(&tape, &LoweringConfig::default()).unwrap();
        let ops = lowerer.lower_operations(&tape).unwrap();
        assert!(ops.uses_state_prep());
        assert!(ops.is_empty());
    }

    #[test]
    fn test_unknown_wire_through_facade() {
        let tape = bell_tape();
        let lowerer = Lowerer::from_config(WireMap::from_labels(["q0"]), &LoweringConfig::default()).unwrap();
        assert!(lowerer.lower_operations(&tape).is_err());
        assert!(lowerer.lower_observables(&tape).is_err());
    }

    #[test]
    fn test_program_serializes_with_precision_tag() {
        let mut tape = Tape::new();
        tape.hadamard(0);
        let lowerer = Lowerer::for_tape(&tape, &LoweringConfig::default()).unwrap();
        let ops = lowerer.lower_operations(&tape).unwrap();

        let json = serde_json::to_value(&ops).unwrap();
        assert_eq!(json["precision"], "double");
        assert_eq!(json["program"]["names"][0], "Hadamard");

        let back: OperationProgram = serde_json::from_value(json).unwrap();
        assert_eq!(back, ops);
    }
}
