//! Core types for the kala-plan planner.
//!
//! This module provides the fundamental types used throughout the crate:
//! - [`Point`] (with aliases [`Point2`] and [`Point3`]): world coordinates
//! - [`CellKey`]: hashable identity of a grid cell center
//! - [`Bounds`]: axis-aligned bounding box of the obstacle field

mod bounds;
mod point;

pub use bounds::Bounds;
pub use point::{CellKey, Point, Point2, Point3};
