//! Planning: grid discretization, adjacency, obstacle models, and the
//! space-time A* search.
//!
//! - [`Grid`]: uniform lattice over the obstacle bounding box
//! - [`NeighbourTable`]: precomputed cell adjacency (9 entries in 2D,
//!   27 in 3D, self included)
//! - [`StaticObstacleIndex`], [`DynamicObstacles`],
//!   [`SemiDynamicObstacles`]: the three obstacle classes
//! - [`Planner`]: the search itself

mod grid;
mod neighbours;
mod obstacles;
mod planner;
mod state;

pub use grid::Grid;
pub use neighbours::{NeighbourTable, NeighbourTable2D, NeighbourTable3D};
pub use obstacles::{
    elliptical_distance_sq, DynamicObstacles, SemiDynamicObstacles, StaticObstacleIndex,
};
pub use planner::{PlannedPath, Planner, PlannerConfig, DEFAULT_MAX_ITERATIONS};
pub use state::{SearchState, StateKey};
