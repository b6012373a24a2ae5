//! Dense matrices of operators.
//!
//! Matrices are row-major with wire 0 of the operator as the most
//! significant bit of the basis index, so a controlled gate is the block
//! diagonal `diag(I, U)` with the control on the first wire.

use ndarray::{Array2, linalg::kron};
use num_complex::Complex64;
use std::f64::consts::FRAC_1_SQRT_2;

use crate::error::{IrError, IrResult};
use crate::gate::{CustomGate, GateKind, StandardGate};
use crate::observable::{AtomicObservable, Observable, ObservableKind};
use crate::operation::{Operation, OperationKind};
use crate::wire::Wire;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Widest operator, in wires, that gets a dense matrix.
///
/// A 12-wire matrix is 4096 x 4096 `Complex64` entries (256 MiB).
pub const MAX_MATRIX_WIRES: usize = 12;

/// Anything with a name, wires and a dense matrix.
pub trait Operator {
    /// Display name, used in error messages.
    fn name(&self) -> String;

    /// Wires the operator acts on.
    fn wires(&self) -> Vec<&Wire>;

    /// Dense matrix of the operator at its natural dimension.
    fn matrix(&self) -> IrResult<Array2<Complex64>>;
}

/// Compute the dense matrix of an operator.
pub fn matrix_of(op: &impl Operator) -> IrResult<Array2<Complex64>> {
    op.matrix()
}

impl Operator for Operation {
    fn name(&self) -> String {
        Operation::name(self)
    }

    fn wires(&self) -> Vec<&Wire> {
        self.wires.iter().collect()
    }

    /// Inverted operations yield the adjoint.
    fn matrix(&self) -> IrResult<Array2<Complex64>> {
        let OperationKind::Gate(gate) = &self.kind else {
            return Err(IrError::MatrixUnavailable { name: self.name() });
        };
        let matrix = gate_matrix(gate, self.wires.len())?;
        Ok(if self.inverse { adjoint(&matrix) } else { matrix })
    }
}

impl Operator for AtomicObservable {
    fn name(&self) -> String {
        self.kind.name().to_string()
    }

    fn wires(&self) -> Vec<&Wire> {
        self.wires.iter().collect()
    }

    fn matrix(&self) -> IrResult<Array2<Complex64>> {
        let name = self.kind.name();
        match &self.kind {
            ObservableKind::Identity => fixed_width(name, 1, self.wires.len()).map(|()| eye(2)),
            ObservableKind::PauliX => fixed_width(name, 1, self.wires.len()).map(|()| pauli_x()),
            ObservableKind::PauliY => fixed_width(name, 1, self.wires.len()).map(|()| pauli_y()),
            ObservableKind::PauliZ => fixed_width(name, 1, self.wires.len()).map(|()| pauli_z()),
            ObservableKind::Hadamard => fixed_width(name, 1, self.wires.len()).map(|()| hadamard()),
            ObservableKind::Projector(state) => projector(state, self.wires.len()),
            ObservableKind::Hermitian(matrix) => {
                check_square(name, matrix, self.wires.len())?;
                Ok(matrix.clone())
            }
        }
    }
}

impl Operator for Observable {
    fn name(&self) -> String {
        self.names().join(" @ ")
    }

    fn wires(&self) -> Vec<&Wire> {
        Observable::wires(self).collect()
    }

    /// Kronecker product of the terms in order.
    fn matrix(&self) -> IrResult<Array2<Complex64>> {
        dimension(&Operator::name(self), Observable::wires(self).count())?;
        self.terms()
            .iter()
            .try_fold(eye(1), |acc, term| -> IrResult<Array2<Complex64>> {
                Ok(kron(&acc, &term.matrix()?))
            })
    }
}

/// Conjugate transpose.
pub fn adjoint(matrix: &Array2<Complex64>) -> Array2<Complex64> {
    matrix.t().mapv(|z| z.conj())
}

fn gate_matrix(gate: &GateKind, num_wires: usize) -> IrResult<Array2<Complex64>> {
    match gate {
        GateKind::Standard(g) => {
            if let Some(expected) = g.num_wires() {
                fixed_width(g.name(), expected, num_wires)?;
            } else if num_wires == 0 {
                return Err(IrError::WireCountMismatch {
                    name: g.name().into(),
                    expected: 1,
                    got: 0,
                });
            }
            dimension(g.name(), num_wires)?;
            Ok(standard_matrix(g, num_wires))
        }
        GateKind::Custom(g) => custom_matrix(g, num_wires),
    }
}

#[allow(clippy::too_many_lines)]
fn standard_matrix(gate: &StandardGate, num_wires: usize) -> Array2<Complex64> {
    match gate {
        StandardGate::Identity => eye(2),
        StandardGate::PauliX => pauli_x(),
        StandardGate::PauliY => pauli_y(),
        StandardGate::PauliZ => pauli_z(),
        StandardGate::Hadamard => hadamard(),
        StandardGate::S => diag(&[ONE, I]),
        StandardGate::T => diag(&[ONE, phase(std::f64::consts::FRAC_PI_4)]),
        StandardGate::SX => {
            let p = Complex64::new(0.5, 0.5);
            let m = Complex64::new(0.5, -0.5);
            dense([[p, m], [m, p]])
        }
        StandardGate::RX(theta) => rx(*theta),
        StandardGate::RY(theta) => ry(*theta),
        StandardGate::RZ(theta) => rz(*theta),
        StandardGate::PhaseShift(phi) => diag(&[ONE, phase(*phi)]),
        StandardGate::Rot(phi, theta, omega) => rot(*phi, *theta, *omega),
        StandardGate::U3(theta, phi, lambda) => {
            let (c, s) = half_angle(*theta);
            dense([
                [c.into(), -phase(*lambda) * s],
                [phase(*phi) * s, phase(phi + lambda) * c],
            ])
        }
        StandardGate::CNOT => controlled(&pauli_x()),
        StandardGate::CY => controlled(&pauli_y()),
        StandardGate::CZ => controlled(&pauli_z()),
        StandardGate::SWAP => swap(),
        StandardGate::ISWAP => dense([
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ZERO, I, ZERO],
            [ZERO, I, ZERO, ZERO],
            [ZERO, ZERO, ZERO, ONE],
        ]),
        StandardGate::ControlledPhaseShift(phi) => controlled(&diag(&[ONE, phase(*phi)])),
        StandardGate::CRX(theta) => controlled(&rx(*theta)),
        StandardGate::CRY(theta) => controlled(&ry(*theta)),
        StandardGate::CRZ(theta) => controlled(&rz(*theta)),
        StandardGate::CRot(phi, theta, omega) => controlled(&rot(*phi, *theta, *omega)),
        StandardGate::IsingXX(phi) => {
            let (c, s) = half_angle(*phi);
            let c = Complex64::from(c);
            let is = -I * s;
            dense([
                [c, ZERO, ZERO, is],
                [ZERO, c, is, ZERO],
                [ZERO, is, c, ZERO],
                [is, ZERO, ZERO, c],
            ])
        }
        StandardGate::IsingYY(phi) => {
            let (c, s) = half_angle(*phi);
            let c = Complex64::from(c);
            let is = I * s;
            dense([
                [c, ZERO, ZERO, is],
                [ZERO, c, -is, ZERO],
                [ZERO, -is, c, ZERO],
                [is, ZERO, ZERO, c],
            ])
        }
        StandardGate::IsingXY(phi) => {
            let (c, s) = half_angle(*phi);
            let c = Complex64::from(c);
            let is = I * s;
            dense([
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, c, is, ZERO],
                [ZERO, is, c, ZERO],
                [ZERO, ZERO, ZERO, ONE],
            ])
        }
        StandardGate::IsingZZ(phi) => {
            let minus = phase(-phi / 2.0);
            let plus = phase(phi / 2.0);
            diag(&[minus, plus, plus, minus])
        }
        StandardGate::SingleExcitation(theta) => givens(2, 1, 2, *theta, ONE),
        StandardGate::SingleExcitationMinus(theta) => givens(2, 1, 2, *theta, phase(-theta / 2.0)),
        StandardGate::SingleExcitationPlus(theta) => givens(2, 1, 2, *theta, phase(theta / 2.0)),
        StandardGate::Toffoli => controlled(&controlled(&pauli_x())),
        StandardGate::CSWAP => controlled(&swap()),
        StandardGate::DoubleExcitation(theta) => givens(4, 3, 12, *theta, ONE),
        StandardGate::DoubleExcitationMinus(theta) => givens(4, 3, 12, *theta, phase(-theta / 2.0)),
        StandardGate::DoubleExcitationPlus(theta) => givens(4, 3, 12, *theta, phase(theta / 2.0)),
        StandardGate::MultiRZ(theta) => {
            let entries: Vec<Complex64> = (0..1usize << num_wires)
                .map(|k| {
                    let parity = if k.count_ones() % 2 == 0 { 1.0 } else { -1.0 };
                    phase(-theta / 2.0 * parity)
                })
                .collect();
            diag(&entries)
        }
    }
}

fn custom_matrix(gate: &CustomGate, num_wires: usize) -> IrResult<Array2<Complex64>> {
    let matrix = gate
        .matrix
        .as_ref()
        .ok_or_else(|| IrError::MatrixUnavailable {
            name: gate.name.clone(),
        })?;
    let (rows, cols) = matrix.dim();
    if rows != cols || !rows.is_power_of_two() {
        return Err(IrError::InvalidMatrix {
            name: gate.name.clone(),
            reason: format!("{rows}x{cols} is not a square matrix with a power-of-two dimension"),
        });
    }
    fixed_width(&gate.name, gate.num_wires, num_wires)?;
    check_square(&gate.name, matrix, num_wires)?;
    Ok(matrix.clone())
}

fn projector(state: &[u8], num_wires: usize) -> IrResult<Array2<Complex64>> {
    let invalid = |reason: String| IrError::InvalidMatrix {
        name: "Projector".into(),
        reason,
    };
    if state.len() != num_wires {
        return Err(invalid(format!(
            "basis state has {} bits for {num_wires} wires",
            state.len()
        )));
    }
    let dim = dimension("Projector", num_wires)?;
    let index = state.iter().try_fold(0usize, |acc, &bit| match bit {
        0 | 1 => Ok((acc << 1) | usize::from(bit)),
        other => Err(invalid(format!("basis state bit {other} is not 0 or 1"))),
    })?;
    let mut matrix = Array2::zeros((dim, dim));
    matrix[[index, index]] = ONE;
    Ok(matrix)
}

fn fixed_width(name: &str, expected: usize, got: usize) -> IrResult<()> {
    if expected == got {
        Ok(())
    } else {
        Err(IrError::WireCountMismatch {
            name: name.into(),
            expected,
            got,
        })
    }
}

/// Dimension of a dense matrix on `num_wires` wires.
fn dimension(name: &str, num_wires: usize) -> IrResult<usize> {
    if num_wires > MAX_MATRIX_WIRES {
        return Err(IrError::InvalidMatrix {
            name: name.into(),
            reason: format!(
                "{num_wires} wires exceeds the dense matrix limit of {MAX_MATRIX_WIRES}"
            ),
        });
    }
    Ok(1 << num_wires)
}

fn check_square(name: &str, matrix: &Array2<Complex64>, num_wires: usize) -> IrResult<()> {
    let dim = dimension(name, num_wires)?;
    if matrix.dim() == (dim, dim) {
        Ok(())
    } else {
        Err(IrError::InvalidMatrix {
            name: name.into(),
            reason: format!(
                "expected {dim}x{dim} for {num_wires} wires, got {}x{}",
                matrix.nrows(),
                matrix.ncols()
            ),
        })
    }
}

// ---------------------------------------------------------------------------
// Building blocks
// ---------------------------------------------------------------------------

fn dense<const N: usize>(rows: [[Complex64; N]; N]) -> Array2<Complex64> {
    Array2::from_shape_fn((N, N), |(r, c)| rows[r][c])
}

fn eye(dim: usize) -> Array2<Complex64> {
    Array2::eye(dim)
}

fn diag(entries: &[Complex64]) -> Array2<Complex64> {
    let mut matrix = Array2::zeros((entries.len(), entries.len()));
    for (i, &entry) in entries.iter().enumerate() {
        matrix[[i, i]] = entry;
    }
    matrix
}

fn phase(angle: f64) -> Complex64 {
    Complex64::from_polar(1.0, angle)
}

fn half_angle(theta: f64) -> (f64, f64) {
    ((theta / 2.0).cos(), (theta / 2.0).sin())
}

fn pauli_x() -> Array2<Complex64> {
    dense([[ZERO, ONE], [ONE, ZERO]])
}

fn pauli_y() -> Array2<Complex64> {
    dense([[ZERO, -I], [I, ZERO]])
}

fn pauli_z() -> Array2<Complex64> {
    diag(&[ONE, -ONE])
}

fn hadamard() -> Array2<Complex64> {
    let s = Complex64::from(FRAC_1_SQRT_2);
    dense([[s, s], [s, -s]])
}

fn swap() -> Array2<Complex64> {
    dense([
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ZERO, ONE, ZERO],
        [ZERO, ONE, ZERO, ZERO],
        [ZERO, ZERO, ZERO, ONE],
    ])
}

fn rx(theta: f64) -> Array2<Complex64> {
    let (c, s) = half_angle(theta);
    dense([[c.into(), -I * s], [-I * s, c.into()]])
}

fn ry(theta: f64) -> Array2<Complex64> {
    let (c, s) = half_angle(theta);
    dense([[c.into(), (-s).into()], [s.into(), c.into()]])
}

fn rz(theta: f64) -> Array2<Complex64> {
    diag(&[phase(-theta / 2.0), phase(theta / 2.0)])
}

fn rot(phi: f64, theta: f64, omega: f64) -> Array2<Complex64> {
    rz(omega).dot(&ry(theta)).dot(&rz(phi))
}

/// `diag(I, u)`: `u` applied when the leading wire is set.
fn controlled(u: &Array2<Complex64>) -> Array2<Complex64> {
    let dim = u.nrows();
    let mut matrix = eye(2 * dim);
    matrix.slice_mut(ndarray::s![dim.., dim..]).assign(u);
    matrix
}

/// Rotation by θ/2 between basis states `a` and `b` of an `n`-wire space,
/// with `outside` on every other diagonal entry.
fn givens(num_wires: usize, a: usize, b: usize, theta: f64, outside: Complex64) -> Array2<Complex64> {
    let (c, s) = half_angle(theta);
    let mut matrix = eye(1 << num_wires) * outside;
    matrix[[a, a]] = c.into();
    matrix[[a, b]] = (-s).into();
    matrix[[b, a]] = s.into();
    matrix[[b, b]] = c.into();
    matrix
}
