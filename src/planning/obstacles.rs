//! Obstacle models: the static spatial index and the time-varying
//! obstacle containers.
//!
//! Static obstacles live in a k-d tree queried with a plain Euclidean
//! clearance radius. Dynamic and semi-dynamic obstacles are checked
//! per time step against an anisotropic elliptical margin that keeps
//! extra vertical clearance in 3D.

use std::collections::HashMap;

use kiddo::{KdTree, SquaredEuclidean};

use crate::core::Point;

/// Immutable k-d tree over the static obstacle field.
///
/// The field must include the workspace boundary points so that paths
/// cannot skirt the edge of the planning area.
pub struct StaticObstacleIndex<const N: usize> {
    tree: KdTree<f32, N>,
    len: usize,
}

impl<const N: usize> StaticObstacleIndex<N> {
    /// Index every point in `points`.
    pub fn build(points: &[Point<N>]) -> Self {
        let mut tree: KdTree<f32, N> = KdTree::new();
        for (i, point) in points.iter().enumerate() {
            tree.add(&point.0, i as u64);
        }
        Self {
            tree,
            len: points.len(),
        }
    }

    /// True when `position` keeps strictly more than `radius` clearance
    /// from every indexed point.
    #[inline]
    pub fn is_safe(&self, position: &Point<N>, radius: f32) -> bool {
        if self.len == 0 {
            return true;
        }
        let nearest = self.tree.nearest_one::<SquaredEuclidean>(&position.0);
        nearest.distance > radius * radius
    }

    /// Number of indexed points.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when no points are indexed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Obstacles active at specific time steps only.
///
/// The default value is empty, meaning every position is safe at every
/// step.
#[derive(Clone, Debug, Default)]
pub struct DynamicObstacles<const N: usize> {
    by_step: HashMap<u32, Vec<Point<N>>>,
}

impl<const N: usize> DynamicObstacles<N> {
    /// Create an empty container.
    pub fn new() -> Self {
        Self {
            by_step: HashMap::new(),
        }
    }

    /// Mark `position` blocked at exactly `step`.
    pub fn block_at(&mut self, step: u32, position: Point<N>) {
        self.by_step.entry(step).or_default().push(position);
    }

    /// Obstacles active at `step` (empty when none).
    #[inline]
    pub fn at_step(&self, step: u32) -> &[Point<N>] {
        self.by_step.get(&step).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when no obstacle is registered at any step.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_step.is_empty()
    }
}

impl<const N: usize> From<HashMap<u32, Vec<Point<N>>>> for DynamicObstacles<N> {
    fn from(by_step: HashMap<u32, Vec<Point<N>>>) -> Self {
        Self { by_step }
    }
}

/// Obstacles that activate at a threshold step and stay active.
///
/// A position registered with threshold `t` blocks every step at or
/// after `t`. The default value is empty.
#[derive(Clone, Debug, Default)]
pub struct SemiDynamicObstacles<const N: usize> {
    by_threshold: HashMap<u32, Vec<Point<N>>>,
}

impl<const N: usize> SemiDynamicObstacles<N> {
    /// Create an empty container.
    pub fn new() -> Self {
        Self {
            by_threshold: HashMap::new(),
        }
    }

    /// Mark `position` blocked for every step at or after `threshold`.
    pub fn block_from(&mut self, threshold: u32, position: Point<N>) {
        self.by_threshold.entry(threshold).or_default().push(position);
    }

    /// Iterate every obstacle whose threshold has passed at `time`.
    pub fn active_at(&self, time: u32) -> impl Iterator<Item = &Point<N>> {
        self.by_threshold
            .iter()
            .filter(move |(threshold, _)| **threshold <= time)
            .flat_map(|(_, points)| points.iter())
    }

    /// True when no obstacle is registered at any threshold.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_threshold.is_empty()
    }
}

impl<const N: usize> From<HashMap<u32, Vec<Point<N>>>> for SemiDynamicObstacles<N> {
    fn from(by_threshold: HashMap<u32, Vec<Point<N>>>) -> Self {
        Self { by_threshold }
    }
}

/// Normalized squared distance under the anisotropic safety margin.
///
/// Horizontal axes are scaled by `2 * robot_radius`; the vertical axis
/// (axis 2, 3D only) by `4 * robot_radius`, so the exclusion region
/// reaches twice as far vertically. A result of at most 1 means the
/// margin is violated.
#[inline]
pub fn elliptical_distance_sq<const N: usize>(
    a: &Point<N>,
    b: &Point<N>,
    robot_radius: f32,
) -> f32 {
    let mut sum = 0.0;
    for axis in 0..N {
        let scale = if axis < 2 {
            2.0 * robot_radius
        } else {
            4.0 * robot_radius
        };
        let d = (a.0[axis] - b.0[axis]) / scale;
        sum += d * d;
    }
    sum
}
