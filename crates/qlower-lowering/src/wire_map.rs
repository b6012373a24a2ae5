//! Logical-to-physical wire mapping.

use rustc_hash::FxHashMap;

use qlower_ir::Wire;

use crate::error::{LowerError, LowerResult};

/// A mapping from logical wire labels to the engine's contiguous indices.
///
/// Built once per lowering request and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireMap {
    indices: FxHashMap<Wire, usize>,
}

impl WireMap {
    /// Create a new empty wire map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map the `i`-th distinct label to index `i`.
    ///
    /// Repeated labels keep their first index, so the image stays contiguous.
    pub fn from_labels<W: Into<Wire>>(labels: impl IntoIterator<Item = W>) -> Self {
        let mut map = Self::new();
        for label in labels {
            let next = map.len();
            map.indices.entry(label.into()).or_insert(next);
        }
        map
    }

    /// Map integer wire `i` to index `i` for `i < num_wires`.
    pub fn trivial(num_wires: u32) -> Self {
        Self::from_labels(0..num_wires)
    }

    /// Add or replace a single mapping.
    pub fn insert(&mut self, wire: impl Into<Wire>, index: usize) {
        self.indices.insert(wire.into(), index);
    }

    /// Get the physical index of a wire.
    pub fn get(&self, wire: &Wire) -> Option<usize> {
        self.indices.get(wire).copied()
    }

    /// Remap a sequence of wires, preserving order.
    ///
    /// Fails on the first label without an entry.
    pub fn remap(&self, wires: &[Wire]) -> LowerResult<Vec<usize>> {
        wires
            .iter()
            .map(|wire| {
                self.get(wire).ok_or_else(|| LowerError::UnknownWire {
                    wire: wire.clone(),
                    context: None,
                })
            })
            .collect()
    }

    /// Get the number of mapped wires.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate over (wire, index) pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Wire, usize)> + '_ {
        self.indices.iter().map(|(w, &i)| (w, i))
    }
}

impl<W: Into<Wire>> FromIterator<(W, usize)> for WireMap {
    fn from_iter<T: IntoIterator<Item = (W, usize)>>(iter: T) -> Self {
        Self {
            indices: iter.into_iter().map(|(w, i)| (w.into(), i)).collect(),
        }
    }
}
