//! Precomputed cell adjacency tables.
//!
//! Every cell is adjacent to the cells whose lattice index differs by
//! at most one on each axis, itself included: 9 entries in 2D, 27 in
//! 3D, fewer on the lattice boundary. The table is keyed by the cell
//! center so the planner can look neighbours up straight from a
//! snapped coordinate.

use std::collections::HashMap;

use crate::core::{CellKey, Point};
use crate::planning::grid::Grid;

/// Neighbour table over a [`Grid`], built once at planner construction.
#[derive(Clone, Debug)]
pub struct NeighbourTable<const N: usize> {
    table: HashMap<CellKey<N>, Vec<Point<N>>>,
}

/// Adjacency over a 2D grid (up to 9 entries per cell)
pub type NeighbourTable2D = NeighbourTable<2>;
/// Adjacency over a 3D grid (up to 27 entries per cell)
pub type NeighbourTable3D = NeighbourTable<3>;

impl<const N: usize> NeighbourTable<N> {
    /// Precompute the adjacency list of every cell in `grid`.
    ///
    /// Offsets are enumerated in product order with the first axis
    /// slowest, and out-of-lattice offsets are dropped, so boundary
    /// cells simply hold shorter lists.
    pub fn build(grid: &Grid<N>) -> Self {
        let extents = grid.extents();
        let mut table = HashMap::with_capacity(grid.len());

        for (flat, center) in grid.centers().iter().enumerate() {
            let lattice = unflatten(flat, &extents);
            let mut neighbours = Vec::new();
            for code in 0..OFFSETS_PER_AXIS.pow(N as u32) {
                if let Some(adjacent) = offset_lattice(&lattice, &extents, code) {
                    neighbours.push(grid.center_at(&adjacent));
                }
            }
            table.insert(center.key(), neighbours);
        }

        Self { table }
    }

    /// Neighbouring cell centers of `position`, itself included.
    ///
    /// # Panics
    ///
    /// Panics when `position` is not a stored cell center. Snap
    /// free-space coordinates with [`Grid::snap`] before looking them
    /// up.
    pub fn neighbours(&self, position: &Point<N>) -> &[Point<N>] {
        match self.table.get(&position.key()) {
            Some(list) => list,
            None => panic!(
                "neighbour lookup for non-grid-aligned position {:?}",
                position.0
            ),
        }
    }

    /// Number of cells in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True when the table holds no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

const OFFSETS_PER_AXIS: usize = 3;

fn unflatten<const N: usize>(mut flat: usize, extents: &[usize; N]) -> [usize; N] {
    let mut lattice = [0usize; N];
    for axis in (0..N).rev() {
        lattice[axis] = flat % extents[axis];
        flat /= extents[axis];
    }
    lattice
}

/// Decode `code` as a base-3 offset in {-1, 0, 1} per axis, first axis
/// in the most significant digit, and apply it to `lattice`. Returns
/// None when the shifted index leaves the lattice.
fn offset_lattice<const N: usize>(
    lattice: &[usize; N],
    extents: &[usize; N],
    mut code: usize,
) -> Option<[usize; N]> {
    let mut shifted = [0usize; N];
    for axis in (0..N).rev() {
        let delta = (code % 3) as isize - 1;
        code /= 3;
        let index = lattice[axis] as isize + delta;
        if index < 0 || index >= extents[axis] as isize {
            return None;
        }
        shifted[axis] = index as usize;
    }
    Some(shifted)
}
