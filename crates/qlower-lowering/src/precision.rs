//! Numeric precision selection.
//!
//! The engine comes in a single-precision (`complex64`) and a
//! double-precision (`complex128`) build. Lowering is written once, generic
//! over [`Precision`], and instantiated with [`Single`] or [`Double`].

use ndarray::Array2;
use num_complex::{Complex, Complex64};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::ConfigError;

/// A floating-point width for parameters and matrix buffers.
pub trait Precision: Send + Sync + 'static {
    /// Real scalar type.
    type Real: Copy + fmt::Debug + PartialEq + Default + Send + Sync + 'static;

    /// Runtime tag for this precision.
    const KIND: PrecisionKind;

    /// Convert a double-precision real.
    fn real(value: f64) -> Self::Real;

    /// Convert a double-precision complex.
    fn complex(value: Complex64) -> Complex<Self::Real> {
        Complex::new(Self::real(value.re), Self::real(value.im))
    }
}

/// Single precision: `f32` parameters, `Complex<f32>` buffers.
#[derive(Debug, Clone, Copy)]
pub enum Single {}

/// Double precision: `f64` parameters, `Complex<f64>` buffers.
#[derive(Debug, Clone, Copy)]
pub enum Double {}

impl Precision for Single {
    type Real = f32;
    const KIND: PrecisionKind = PrecisionKind::Single;

    #[allow(clippy::cast_possible_truncation)]
    fn real(value: f64) -> f32 {
        value as f32
    }
}

impl Precision for Double {
    type Real = f64;
    const KIND: PrecisionKind = PrecisionKind::Double;

    fn real(value: f64) -> f64 {
        value
    }
}

/// Runtime precision flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionKind {
    /// `complex64` buffers.
    Single,
    /// `complex128` buffers.
    #[default]
    Double,
}

impl fmt::Display for PrecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrecisionKind::Single => write!(f, "single"),
            PrecisionKind::Double => write!(f, "double"),
        }
    }
}

impl FromStr for PrecisionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "f32" | "complex64" | "c64" => Ok(PrecisionKind::Single),
            "double" | "f64" | "complex128" | "c128" => Ok(PrecisionKind::Double),
            other => Err(ConfigError::Invalid(format!("unknown precision '{other}'"))),
        }
    }
}

/// Flatten a matrix row-major and cast it to the target precision.
pub fn flatten<P: Precision>(matrix: &Array2<Complex64>) -> Vec<Complex<P::Real>> {
    matrix.iter().map(|&z| P::complex(z)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_precision() {
        assert_eq!("single".parse::<PrecisionKind>().unwrap(), PrecisionKind::Single);
        assert_eq!(" C128 ".parse::<PrecisionKind>().unwrap(), PrecisionKind::Double);
        assert!("half".parse::<PrecisionKind>().is_err());
        assert_eq!(PrecisionKind::default(), PrecisionKind::Double);
    }

    #[test]
    fn test_flatten_is_row_major() {
        let m = Array2::from_shape_fn((2, 2), |(r, c)| Complex64::new(r as f64, c as f64));
        let flat = flatten::<Single>(&m);
        assert_eq!(
            flat,
            vec![
                Complex::new(0.0f32, 0.0),
                Complex::new(0.0, 1.0),
                Complex::new(1.0, 0.0),
                Complex::new(1.0, 1.0),
            ]
        );
    }

    #[test]
    fn test_flatten_transposed_view_order() {
        let m = Array2::from_shape_fn((2, 2), |(r, c)| Complex64::new((2 * r + c) as f64, 0.0));
        let t = m.t().to_owned();
        let flat = flatten::<Double>(&t);
        let re: Vec<f64> = flat.iter().map(|z| z.re).collect();
        assert_eq!(re, vec![0.0, 2.0, 1.0, 3.0]);
    }
}
