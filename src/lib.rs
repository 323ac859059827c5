//! # Kala-Plan: Space-Time A* Path Planning
//!
//! A grid-based path planner for a single agent moving through 2D or
//! 3D space, with time as an extra search dimension. Because every
//! search node is a (position, time step) pair, the same cell can be
//! occupied at different steps, waiting in place is a legal move, and
//! the planner can route around obstacles that appear and disappear
//! over time.
//!
//! ## Obstacle classes
//!
//! - **Static**: fixed points indexed in a k-d tree; positions within
//!   the robot radius are unsafe at every step. The static field also
//!   defines the workspace, so it must include the boundary points.
//! - **Dynamic**: points active at specific time steps only.
//! - **Semi-dynamic**: points that activate at a threshold step and
//!   stay active from then on.
//!
//! Time-varying obstacles are checked against an elliptical margin
//! whose vertical semi-axis (3D) is twice the horizontal one.
//!
//! ## Quick Start
//!
//! ```rust
//! use kala_plan::{DynamicObstacles, Planner, PlannerConfig, Point2, SemiDynamicObstacles};
//!
//! # fn main() -> kala_plan::Result<()> {
//! // Obstacle points, including the workspace boundary corners
//! let obstacles = vec![Point2::new([0.0, 0.0]), Point2::new([8.0, 8.0])];
//! let planner = Planner::<2>::new(PlannerConfig::default(), &obstacles)?;
//!
//! // A blocker crosses the diagonal at step 3
//! let mut dynamic = DynamicObstacles::new();
//! dynamic.block_at(3, Point2::new([3.5, 3.5]));
//!
//! let path = planner.plan(
//!     Point2::new([0.6, 0.6]),
//!     Point2::new([7.4, 7.4]),
//!     &dynamic,
//!     &SemiDynamicObstacles::new(),
//! )?;
//! assert!(!path.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! An empty path means no route was found within the expansion budget;
//! it is a normal outcome, not an error. Errors are reserved for
//! invalid construction input and endpoints below the workspace.
//!
//! ## Architecture
//!
//! ```text
//!      static obstacle points
//!               │
//!               ▼
//!      ┌─────────────────┐     ┌──────────────────┐
//!      │      Grid       │────►│  NeighbourTable  │
//!      │ (bounding box + │     │ (3^N offsets per │
//!      │  cell centers)  │     │   cell, clipped) │
//!      └────────┬────────┘     └────────┬─────────┘
//!               │ snap                  │ lookup
//!               ▼                       ▼
//!      ┌──────────────────────────────────────────┐
//!      │            Planner (A* search)           │
//!      │  open heap ordered by f, ties in FIFO;   │
//!      │  closed + open membership by (pos, time) │
//!      └────────┬─────────────────────┬───────────┘
//!               │                     │ per call
//!               ▼                     ▼
//!      ┌─────────────────┐   ┌──────────────────────┐
//!      │ StaticObstacle  │   │ DynamicObstacles +   │
//!      │ Index (k-d tree)│   │ SemiDynamicObstacles │
//!      └─────────────────┘   └──────────────────────┘
//! ```
//!
//! The grid, adjacency table, and static index are built once and
//! never mutated, so a planner is freely shared across calls; all
//! per-call search state lives on the stack of `plan`.

pub mod core;
pub mod error;
pub mod planning;

// Re-export main types at crate root
pub use crate::core::{Bounds, CellKey, Point, Point2, Point3};
pub use crate::error::{PlanError, Result};
pub use crate::planning::{
    elliptical_distance_sq, DynamicObstacles, Grid, NeighbourTable, NeighbourTable2D,
    NeighbourTable3D, PlannedPath, Planner, PlannerConfig, SemiDynamicObstacles,
    StaticObstacleIndex, DEFAULT_MAX_ITERATIONS,
};
