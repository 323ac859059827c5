//! Axis-aligned bounding box over the obstacle field.

use crate::core::point::Point;
use crate::error::{PlanError, Result};

/// Axis-aligned bounding box in N-dimensional space.
///
/// The planner derives its workspace from the box enclosing the static
/// obstacle field, so the field must include the workspace boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds<const N: usize> {
    /// Minimum corner (smallest value per axis).
    pub min: [f32; N],
    /// Maximum corner (largest value per axis).
    pub max: [f32; N],
}

impl<const N: usize> Bounds<N> {
    /// Smallest box enclosing every point in `points`.
    ///
    /// Fails on an empty slice (there is no extent to derive) and on
    /// any non-finite component, which would otherwise corrupt the
    /// extents silently.
    pub fn enclosing(points: &[Point<N>]) -> Result<Self> {
        if points.is_empty() {
            return Err(PlanError::Config(
                "cannot compute bounds of an empty point set".to_string(),
            ));
        }

        let mut min = [f32::INFINITY; N];
        let mut max = [f32::NEG_INFINITY; N];
        for point in points {
            for axis in 0..N {
                if !point.0[axis].is_finite() {
                    return Err(PlanError::Config(format!(
                        "obstacle point {:?} has a non-finite component",
                        point.0
                    )));
                }
                min[axis] = min[axis].min(point.0[axis]);
                max[axis] = max[axis].max(point.0[axis]);
            }
        }
        Ok(Self { min, max })
    }

    /// Extent along one axis.
    #[inline]
    pub fn extent(&self, axis: usize) -> f32 {
        self.max[axis] - self.min[axis]
    }

    /// Check if a point is inside the box (boundary inclusive).
    #[inline]
    pub fn contains(&self, point: &Point<N>) -> bool {
        (0..N).all(|axis| point.0[axis] >= self.min[axis] && point.0[axis] <= self.max[axis])
    }
}
