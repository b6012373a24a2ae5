//! Wire labels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical wire label as written in a circuit description.
///
/// Wires are either integers or arbitrary string labels; the two never
/// compare equal, so `Wire::Index(0)` and `Wire::Label("0")` are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Wire {
    /// Integer wire label.
    Index(i64),
    /// Named wire label.
    Label(String),
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wire::Index(i) => write!(f, "{i}"),
            Wire::Label(name) => write!(f, "'{name}'"),
        }
    }
}

impl From<i64> for Wire {
    fn from(index: i64) -> Self {
        Wire::Index(index)
    }
}

impl From<i32> for Wire {
    fn from(index: i32) -> Self {
        Wire::Index(i64::from(index))
    }
}

impl From<u32> for Wire {
    fn from(index: u32) -> Self {
        Wire::Index(i64::from(index))
    }
}

impl From<&str> for Wire {
    fn from(label: &str) -> Self {
        Wire::Label(label.to_string())
    }
}

impl From<String> for Wire {
    fn from(label: String) -> Self {
        Wire::Label(label)
    }
}

impl From<&Wire> for Wire {
    fn from(wire: &Wire) -> Self {
        wire.clone()
    }
}

/// Collect anything convertible into wires.
pub(crate) fn wires<W: Into<Wire>>(wires: impl IntoIterator<Item = W>) -> Vec<Wire> {
    wires.into_iter().map(Into::into).collect()
}
