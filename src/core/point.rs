//! Point and key types shared by the 2D and 3D planners.

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A position in continuous N-dimensional space (world units, f32)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "[f32; N]: Serialize", deserialize = "[f32; N]: Deserialize<'de>"))]
pub struct Point<const N: usize>(pub [f32; N]);

/// A 2D point
pub type Point2 = Point<2>;
/// A 3D point
pub type Point3 = Point<3>;

impl<const N: usize> Point<N> {
    /// Create a point from its components
    #[inline]
    pub fn new(components: [f32; N]) -> Self {
        Self(components)
    }

    /// Manhattan (L1) distance to another point
    #[inline]
    pub fn manhattan_distance(&self, other: &Point<N>) -> f32 {
        let mut sum = 0.0;
        for axis in 0..N {
            sum += (self.0[axis] - other.0[axis]).abs();
        }
        sum
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Point<N>) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance (faster, avoids sqrt)
    #[inline]
    pub fn distance_squared(&self, other: &Point<N>) -> f32 {
        let mut sum = 0.0;
        for axis in 0..N {
            let d = self.0[axis] - other.0[axis];
            sum += d * d;
        }
        sum
    }

    /// Structural hash key over the component bit patterns.
    ///
    /// Grid cell centers are computed once and reused everywhere, so
    /// bit-exact equality is the right identity for table lookups.
    #[inline]
    pub fn key(&self) -> CellKey<N> {
        CellKey(self.0.map(f32::to_bits))
    }
}

impl<const N: usize> From<[f32; N]> for Point<N> {
    #[inline]
    fn from(components: [f32; N]) -> Self {
        Self(components)
    }
}

impl<const N: usize> Index<usize> for Point<N> {
    type Output = f32;

    #[inline]
    fn index(&self, axis: usize) -> &f32 {
        &self.0[axis]
    }
}

/// Hashable identity of a grid cell center.
///
/// Built from the IEEE-754 bit patterns of the center's components, so
/// two keys are equal exactly when the centers are bit-identical. Each
/// component keeps its own slot, which keeps distinct centers distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellKey<const N: usize>([u32; N]);
