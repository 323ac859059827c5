//! Uniform grid discretization of the workspace.
//!
//! The grid covers the bounding box of the static obstacle field with
//! cells of a fixed edge length. Cell centers are computed once at
//! construction and every later lookup returns those stored values, so
//! snapped coordinates can be compared bit-exactly.

use crate::core::{Bounds, Point};
use crate::error::{PlanError, Result};

/// Uniform grid over the obstacle bounding box.
///
/// Immutable after construction. The 2D and 3D `from_obstacles`
/// constructors derive the cell counts differently; everything else is
/// shared.
#[derive(Clone, Debug)]
pub struct Grid<const N: usize> {
    cell_size: f32,
    bounds: Bounds<N>,
    extents: [usize; N],
    /// Cell centers in row-major order, last axis fastest.
    centers: Vec<Point<N>>,
}

impl Grid<2> {
    /// Build a 2D grid over the bounding box of `obstacles`.
    ///
    /// The cell count per axis is `floor(extent / cell_size)` and the
    /// centers sit at `min + cell_size / 2 + i * cell_size`. A box too
    /// small for one cell on either axis is rejected.
    pub fn from_obstacles(cell_size: f32, obstacles: &[Point<2>]) -> Result<Self> {
        validate_cell_size(cell_size)?;
        let bounds = Bounds::enclosing(obstacles)?;

        let extents = [
            (bounds.extent(0) / cell_size) as usize,
            (bounds.extent(1) / cell_size) as usize,
        ];
        if extents[0] == 0 || extents[1] == 0 {
            return Err(PlanError::Config(format!(
                "obstacle bounding box {:?}..{:?} is too small for cell size {}",
                bounds.min, bounds.max, cell_size
            )));
        }

        let mut centers = Vec::with_capacity(extents[0] * extents[1]);
        for i in 0..extents[0] {
            for j in 0..extents[1] {
                centers.push(Point([
                    bounds.min[0] + cell_size / 2.0 + i as f32 * cell_size,
                    bounds.min[1] + cell_size / 2.0 + j as f32 * cell_size,
                ]));
            }
        }

        Ok(Self {
            cell_size,
            bounds,
            extents,
            centers,
        })
    }
}

impl Grid<3> {
    /// Build a 3D grid over the bounding box of `obstacles`.
    ///
    /// Per-axis center sequences start at `min + cell_size / 2` and step
    /// by `cell_size` until they reach `max`, stopping strictly before
    /// it; the grid is their Cartesian product. On boxes whose extent is
    /// not a cell multiple this admits one more cell per axis than the
    /// 2D rule. An axis with no centers is rejected.
    pub fn from_obstacles(cell_size: f32, obstacles: &[Point<3>]) -> Result<Self> {
        validate_cell_size(cell_size)?;
        let bounds = Bounds::enclosing(obstacles)?;

        let mut axes: [Vec<f32>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for axis in 0..3 {
            let start = bounds.min[axis] + cell_size / 2.0;
            let mut step = 0;
            loop {
                let value = start + step as f32 * cell_size;
                if value >= bounds.max[axis] {
                    break;
                }
                axes[axis].push(value);
                step += 1;
            }
            if axes[axis].is_empty() {
                return Err(PlanError::Config(format!(
                    "obstacle bounding box {:?}..{:?} is too small for cell size {} on axis {}",
                    bounds.min, bounds.max, cell_size, axis
                )));
            }
        }

        let extents = [axes[0].len(), axes[1].len(), axes[2].len()];
        let mut centers = Vec::with_capacity(extents[0] * extents[1] * extents[2]);
        for &x in &axes[0] {
            for &y in &axes[1] {
                for &z in &axes[2] {
                    centers.push(Point([x, y, z]));
                }
            }
        }

        Ok(Self {
            cell_size,
            bounds,
            extents,
            centers,
        })
    }
}

impl<const N: usize> Grid<N> {
    /// Snap a free-space position to its cell center.
    ///
    /// The cell index per axis is `floor((p - min) / cell_size)`. An
    /// index past the last cell clamps back onto it; a negative index
    /// means the position lies below the workspace and is an error.
    /// Returns the stored center, so snapping is idempotent.
    pub fn snap(&self, position: &Point<N>) -> Result<Point<N>> {
        let mut lattice = [0usize; N];
        for axis in 0..N {
            let offset = (position.0[axis] - self.bounds.min[axis]) / self.cell_size;
            if !offset.is_finite() || offset < 0.0 {
                return Err(PlanError::OutOfBounds(format!(
                    "position {:?} lies below the workspace minimum {:?}",
                    position.0, self.bounds.min
                )));
            }
            let mut index = offset as usize;
            if index >= self.extents[axis] {
                index = self.extents[axis] - 1;
            }
            lattice[axis] = index;
        }
        Ok(self.centers[self.flat_index(&lattice)])
    }

    /// Cell center at a lattice index.
    ///
    /// # Panics
    ///
    /// Panics if the index lies outside the lattice.
    #[inline]
    pub fn center_at(&self, lattice: &[usize; N]) -> Point<N> {
        self.centers[self.flat_index(&lattice_checked(lattice, &self.extents))]
    }

    /// Edge length of one cell.
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Bounding box the grid was built over.
    #[inline]
    pub fn bounds(&self) -> &Bounds<N> {
        &self.bounds
    }

    /// Cell count per axis.
    #[inline]
    pub fn extents(&self) -> [usize; N] {
        self.extents
    }

    /// All cell centers in row-major order, last axis fastest.
    #[inline]
    pub fn centers(&self) -> &[Point<N>] {
        &self.centers
    }

    /// Total cell count.
    #[inline]
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    /// True when the grid holds no cells (never after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    fn flat_index(&self, lattice: &[usize; N]) -> usize {
        let mut flat = 0usize;
        for axis in 0..N {
            flat = flat * self.extents[axis] + lattice[axis];
        }
        flat
    }
}

fn validate_cell_size(cell_size: f32) -> Result<()> {
    if !cell_size.is_finite() || cell_size <= 0.0 {
        return Err(PlanError::Config(format!(
            "cell size must be positive and finite, got {}",
            cell_size
        )));
    }
    Ok(())
}

fn lattice_checked<const N: usize>(lattice: &[usize; N], extents: &[usize; N]) -> [usize; N] {
    for axis in 0..N {
        if lattice[axis] >= extents[axis] {
            panic!(
                "lattice index {:?} outside grid extents {:?}",
                lattice, extents
            );
        }
    }
    *lattice
}
