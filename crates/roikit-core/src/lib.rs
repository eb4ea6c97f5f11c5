//! # RoiKit Core
//!
//! Geometry primitives, per-axis calibration, and the coordinate mapper
//! shared by the RoiKit crates. Provides the value types for points, sizes,
//! and rectangles plus the pure pixel/normalized space conversions used by
//! hit-testing, drag handling, and mask rasterization.

pub mod calibration;
pub mod geometry;
pub mod mapping;

pub use calibration::Calibration;
pub use geometry::{
    angle_in_arc, normalize_angle, ray_direction, snap_angle_to_eighth, vector_angle, Point, Rect,
    Size,
};
pub use mapping::CanvasMapping;
