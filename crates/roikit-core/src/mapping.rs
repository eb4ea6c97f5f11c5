//! Coordinate mapping between normalized data space and display pixels.
//!
//! Normalized space spans 0..1 on each axis over the displayed image
//! extent. Pixel space is the canvas rectangle the image occupies on
//! screen. All conversions are pure functions of the mapping's fixed
//! parameters; point mapping round-trips within floating rounding and size
//! mapping round-trips exactly.

use serde::{Deserialize, Serialize};

use crate::calibration::Calibration;
use crate::geometry::{Point, Rect, Size};

/// Maps between normalized (0..1) data coordinates and canvas pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasMapping {
    data_shape: (usize, usize),
    canvas_rect: Rect,
    x_calibration: Calibration,
    y_calibration: Calibration,
}

impl CanvasMapping {
    /// Creates a mapping for an image of `data_shape` (height, width)
    /// displayed within `canvas_rect`, with per-axis calibrations.
    pub fn new(
        data_shape: (usize, usize),
        canvas_rect: Rect,
        x_calibration: Calibration,
        y_calibration: Calibration,
    ) -> Self {
        Self {
            data_shape,
            canvas_rect,
            x_calibration,
            y_calibration,
        }
    }

    /// The image shape in data pixels (height, width).
    pub fn data_shape(&self) -> (usize, usize) {
        self.data_shape
    }

    /// The canvas rectangle the image occupies, in display pixels.
    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    pub fn x_calibration(&self) -> &Calibration {
        &self.x_calibration
    }

    pub fn y_calibration(&self) -> &Calibration {
        &self.y_calibration
    }

    /// The smaller canvas extent. Isotropic radii (ring, lattice) are
    /// fractions of this dimension.
    pub fn min_dimension(&self) -> f64 {
        self.canvas_rect.width().min(self.canvas_rect.height())
    }

    /// Center of the canvas, i.e. normalized (0.5, 0.5), in pixels.
    pub fn canvas_center(&self) -> Point {
        self.canvas_rect.center()
    }

    /// Maps a normalized data point to a display pixel point.
    pub fn map_point_data_to_pixel(&self, p: Point) -> Point {
        Point::new(
            self.canvas_rect.left() + p.x * self.canvas_rect.width(),
            self.canvas_rect.top() + p.y * self.canvas_rect.height(),
        )
    }

    /// Maps a display pixel point to a normalized data point. Exact
    /// inverse of [`Self::map_point_data_to_pixel`] up to floating
    /// rounding.
    pub fn map_point_pixel_to_data(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.canvas_rect.left()) / self.canvas_rect.width(),
            (p.y - self.canvas_rect.top()) / self.canvas_rect.height(),
        )
    }

    /// Maps a normalized size to pixels. Scale only, no offset.
    pub fn map_size_data_to_pixel(&self, s: Size) -> Size {
        Size::new(
            s.width * self.canvas_rect.width(),
            s.height * self.canvas_rect.height(),
        )
    }

    /// Maps a pixel size to normalized space. Scale only, no offset.
    pub fn map_size_pixel_to_data(&self, s: Size) -> Size {
        Size::new(
            s.width / self.canvas_rect.width(),
            s.height / self.canvas_rect.height(),
        )
    }

    /// Maps a normalized rectangle to pixels.
    pub fn map_rect_data_to_pixel(&self, r: Rect) -> Rect {
        Rect {
            origin: self.map_point_data_to_pixel(r.origin),
            size: self.map_size_data_to_pixel(r.size),
        }
    }

    /// Maps a pixel rectangle to normalized space.
    pub fn map_rect_pixel_to_data(&self, r: Rect) -> Rect {
        Rect {
            origin: self.map_point_pixel_to_data(r.origin),
            size: self.map_size_pixel_to_data(r.size),
        }
    }

    /// Calibrated value of a normalized horizontal coordinate.
    pub fn calibrated_x(&self, x: f64) -> f64 {
        self.x_calibration
            .convert_to_calibrated(x * self.data_shape.1 as f64)
    }

    /// Calibrated value of a normalized vertical coordinate.
    pub fn calibrated_y(&self, y: f64) -> f64 {
        self.y_calibration
            .convert_to_calibrated(y * self.data_shape.0 as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_mapping() -> CanvasMapping {
        CanvasMapping::new(
            (1000, 1000),
            Rect::new(0.0, 0.0, 1000.0, 1000.0),
            Calibration::new(-0.5, 1.0 / 1000.0),
            Calibration::new(-0.5, 1.0 / 1000.0),
        )
    }

    #[test]
    fn point_mapping_matches_canvas_rect() {
        let mapping = test_mapping();
        let p = mapping.map_point_data_to_pixel(Point::new(0.25, 0.75));
        assert!((p.x - 250.0).abs() < 1e-9);
        assert!((p.y - 750.0).abs() < 1e-9);
    }

    #[test]
    fn offset_canvas_rect_shifts_points_not_sizes() {
        let mapping = CanvasMapping::new(
            (500, 500),
            Rect::new(100.0, 50.0, 800.0, 400.0),
            Calibration::default(),
            Calibration::default(),
        );
        let p = mapping.map_point_data_to_pixel(Point::new(0.5, 0.5));
        assert!((p.x - 500.0).abs() < 1e-9);
        assert!((p.y - 250.0).abs() < 1e-9);
        let s = mapping.map_size_data_to_pixel(Size::new(0.5, 0.5));
        assert!((s.width - 400.0).abs() < 1e-9);
        assert!((s.height - 200.0).abs() < 1e-9);
    }

    #[test]
    fn calibrated_values_use_data_shape() {
        let mapping = test_mapping();
        assert!((mapping.calibrated_x(0.5) - 0.0).abs() < 1e-12);
        assert!((mapping.calibrated_y(0.0) + 0.5).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn point_mapping_round_trips(x in -2.0f64..3.0, y in -2.0f64..3.0) {
            let mapping = test_mapping();
            let p = Point::new(x, y);
            let q = mapping.map_point_pixel_to_data(mapping.map_point_data_to_pixel(p));
            prop_assert!((q.x - p.x).abs() < 1e-6);
            prop_assert!((q.y - p.y).abs() < 1e-6);
        }

        #[test]
        fn size_mapping_round_trips(w in 0.0f64..4.0, h in 0.0f64..4.0) {
            let mapping = test_mapping();
            let s = Size::new(w, h);
            let t = mapping.map_size_pixel_to_data(mapping.map_size_data_to_pixel(s));
            prop_assert!((t.width - s.width).abs() < 1e-9);
            prop_assert!((t.height - s.height).abs() < 1e-9);
        }
    }
}
