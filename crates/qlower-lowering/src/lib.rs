//! qlower Lowering Core
//!
//! This crate turns a [`Tape`](qlower_ir::Tape) into the flat encoding a
//! state-vector engine consumes: kernel names, numeric parameters, physical
//! wire indices, inverse flags and dense-matrix fallbacks, stored as
//! index-aligned sequences.
//!
//! # Overview
//!
//! Lowering is two independent passes over a read-only context:
//! 1. **Operations**: state preparations are flagged and skipped, `Rot` is
//!    expanded, and every remaining gate either names a kernel or carries
//!    its matrix
//! 2. **Observables**: each observable becomes per-term names and wires,
//!    with matrices only when some term has no kernel
//!
//! # Architecture
//!
//! ```text
//! Tape ──► Lowerer (PrecisionKind) ──► lower_operations::<P>  ──► LoweredOperations<P::Real>
//!              │                   └─► lower_observables::<P> ──► Vec<LoweredObservable<P::Real>>
//!              ├── WireMap        (label -> physical index)
//!              └── KernelRegistry (name x precision -> has kernel)
//! ```
//!
//! # Example
//!
//! ```rust
//! use qlower_ir::{Operation, StandardGate, Tape};
//! use qlower_lowering::{Double, KernelRegistry, WireMap, lower_operations};
//!
//! let mut tape = Tape::new();
//! tape.rx(0.5, 0)
//!     .apply(Operation::gate(StandardGate::PauliX, [1]).inv());
//!
//! let ops = lower_operations::<Double>(&tape, &WireMap::trivial(2), &KernelRegistry::standard())
//!     .unwrap();
//!
//! assert_eq!(ops.names, ["RX", "PauliX"]);
//! assert_eq!(ops.params, [vec![0.5], vec![]]);
//! assert_eq!(ops.inverses, [false, true]);
//! ```
//!
//! # Configuration
//!
//! [`LoweringConfig`] selects the precision and adjusts the kernel
//! vocabulary; it loads from YAML and `QLOWER_*` environment variables.

pub mod config;
pub mod error;
pub mod kernel;
pub mod lowerer;
pub mod observables;
pub mod operations;
pub mod precision;
pub mod wire_map;

pub use config::{ConfigError, LoweringConfig};
pub use error::{LowerError, LowerResult};
pub use kernel::{DEFAULT_GATE_KERNELS, KernelRegistry, observable_has_kernel, term_has_kernel};
pub use lowerer::{Lowerer, ObservableProgram, OperationProgram};
pub use observables::{LoweredObservable, lower_observable, lower_observables};
pub use operations::{LoweredOperations, lower_operations};
pub use precision::{Double, Precision, PrecisionKind, Single, flatten};
pub use wire_map::WireMap;
