//! Search node types for the space-time open queue.

use std::cmp::Ordering;

use crate::core::{CellKey, Point};

/// A node in the space-time search: a cell center at a discrete step.
///
/// The identity of a node is its position and time only; the cost
/// fields never take part in identity. Two paths reaching the same
/// cell at the same step describe the same node.
#[derive(Clone, Copy, Debug)]
pub struct SearchState<const N: usize> {
    /// Snapped cell center.
    pub pos: Point<N>,
    /// Discrete time step, 0 at the start state.
    pub time: u32,
    /// Steps taken from the start.
    pub g: u32,
    /// `g` plus the heuristic, in cell units.
    pub f: f32,
}

impl<const N: usize> SearchState<N> {
    /// Identity key of this node.
    #[inline]
    pub fn key(&self) -> StateKey<N> {
        StateKey {
            cell: self.pos.key(),
            time: self.time,
        }
    }
}

/// Identity of a space-time node, independent of path costs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StateKey<const N: usize> {
    cell: CellKey<N>,
    time: u32,
}

/// Heap adapter ordering states by f-score, ties broken by insertion
/// order.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OpenEntry<const N: usize> {
    pub state: SearchState<N>,
    pub seq: u64,
}

impl<const N: usize> Eq for OpenEntry<N> {}

impl<const N: usize> PartialEq for OpenEntry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.state.f == other.state.f && self.seq == other.seq
    }
}

impl<const N: usize> Ord for OpenEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior; on equal f the lower
        // sequence number (inserted earlier) wins
        other
            .state
            .f
            .partial_cmp(&self.state.f)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<const N: usize> PartialOrd for OpenEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
