//! qlower Tape Model
//!
//! This crate provides the circuit-side data structures that the lowering
//! passes in `qlower-lowering` consume: a [`Tape`] of [`Operation`]s and
//! [`Observable`]s addressed by logical [`Wire`] labels, together with the
//! two pure utilities lowering relies on:
//!
//! - [`matrix_of`]: the dense matrix of any [`Operator`]
//! - [`is_pauli_word`]: whether an observable is a product of I/X/Y/Z terms
//!
//! # Example
//!
//! ```rust
//! use qlower_ir::{AtomicObservable, Observable, Tape, is_pauli_word};
//!
//! let mut tape = Tape::new();
//! tape.hadamard(0).cnot(0, 1);
//! tape.observe(Observable::tensor([
//!     AtomicObservable::pauli_z(0).into(),
//!     AtomicObservable::pauli_z(1).into(),
//! ]));
//!
//! assert_eq!(tape.num_operations(), 2);
//! assert!(is_pauli_word(&tape.observables()[0]));
//! ```
//!
//! # Composite gates
//!
//! `Rot(φ, θ, ω)` is the only composite: [`Operation::expand`] replaces it
//! with `RZ(φ)`, `RY(θ)`, `RZ(ω)` on the same wire.

pub mod error;
pub mod gate;
pub mod matrix;
pub mod observable;
pub mod operation;
pub mod tape;
pub mod wire;

pub use error::{IrError, IrResult};
pub use gate::{CustomGate, GateKind, StandardGate};
pub use matrix::{MAX_MATRIX_WIRES, Operator, adjoint, matrix_of};
pub use observable::{AtomicObservable, Observable, ObservableKind, is_pauli_word};
pub use operation::{INVERSE_SUFFIX, Operation, OperationKind};
pub use tape::Tape;
pub use wire::Wire;
