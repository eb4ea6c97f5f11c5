//! Mask rasterization support.
//!
//! A [`Mask`] is a row-major grid of weights in [0, 1]. Pixel sample
//! positions are the integer indices `(x = col, y = row)`; anti-aliased
//! shapes estimate boundary coverage by 4x4 supersampling around the
//! sample position. Mask generation is read-only with respect to shape
//! state and never fails on degenerate geometry.

use roikit_core::{Point, Rect};

/// A 2D weight grid produced by rasterizing a graphic.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    height: usize,
    width: usize,
    data: Vec<f32>,
}

impl Mask {
    /// Creates an all-zero mask of the given shape.
    pub fn zeros(height: usize, width: usize) -> Mask {
        Mask {
            height,
            width,
            data: vec![0.0; height * width],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(
            row < self.height && col < self.width,
            "mask index ({row}, {col}) out of {}x{}",
            self.height,
            self.width
        );
        row * self.width + col
    }

    /// Weight at (row, col).
    ///
    /// Panics if `row >= height` or `col >= width`.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[self.index(row, col)]
    }

    /// Sets the weight at (row, col), clamped into [0, 1].
    ///
    /// Panics if `row >= height` or `col >= width`.
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        let i = self.index(row, col);
        self.data[i] = value.clamp(0.0, 1.0);
    }

    /// Accumulates a weight at (row, col), saturating at 1.
    ///
    /// Panics if `row >= height` or `col >= width`.
    pub fn accumulate(&mut self, row: usize, col: usize, value: f32) {
        let i = self.index(row, col);
        self.data[i] = (self.data[i] + value).clamp(0.0, 1.0);
    }

    /// The raw row-major weights.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Whether every weight is exactly zero.
    pub fn is_all_zero(&self) -> bool {
        self.data.iter().all(|v| *v == 0.0)
    }

    /// Sum of all weights; useful for coverage assertions.
    pub fn total(&self) -> f64 {
        self.data.iter().map(|v| *v as f64).sum()
    }
}

/// Supersampling offsets for one axis of the 4x4 coverage estimate.
const SUBSAMPLES: [f64; 4] = [-0.375, -0.125, 0.125, 0.375];

/// Fractional coverage of the pixel sampled at `(px, py)` by the ellipse
/// centered at `(cx, cy)` with radii `(rx, ry)` in grid pixels. Fully
/// inside pixels return 1, fully outside 0, boundary pixels a 1/16
/// quantized fraction.
pub(crate) fn ellipse_coverage(px: f64, py: f64, cx: f64, cy: f64, rx: f64, ry: f64) -> f32 {
    if rx <= 0.0 || ry <= 0.0 {
        return 0.0;
    }
    let mut inside = 0u32;
    for oy in SUBSAMPLES {
        for ox in SUBSAMPLES {
            let nx = (px + ox - cx) / rx;
            let ny = (py + oy - cy) / ry;
            if nx * nx + ny * ny <= 1.0 {
                inside += 1;
            }
        }
    }
    inside as f32 / 16.0
}

/// Rasterizes an anti-aliased ellipse lobe into `mask`, accumulating
/// coverage. Centers and radii are in grid pixels.
pub(crate) fn fill_ellipse(mask: &mut Mask, cx: f64, cy: f64, rx: f64, ry: f64) {
    if rx <= 0.0 || ry <= 0.0 || mask.height() == 0 || mask.width() == 0 {
        return;
    }
    let row_lo = ((cy - ry - 1.0).floor().max(0.0)) as usize;
    let row_hi = ((cy + ry + 1.0).ceil().min(mask.height() as f64 - 1.0)) as usize;
    let col_lo = ((cx - rx - 1.0).floor().max(0.0)) as usize;
    let col_hi = ((cx + rx + 1.0).ceil().min(mask.width() as f64 - 1.0)) as usize;
    if cy + ry < 0.0 || cx + rx < 0.0 || cy - ry > mask.height() as f64 || cx - rx > mask.width() as f64
    {
        return;
    }
    for row in row_lo..=row_hi.min(mask.height().saturating_sub(1)) {
        for col in col_lo..=col_hi.min(mask.width().saturating_sub(1)) {
            let coverage = ellipse_coverage(col as f64, row as f64, cx, cy, rx, ry);
            if coverage > 0.0 {
                mask.accumulate(row, col, coverage);
            }
        }
    }
}

/// An ellipse lobe in grid pixels, derived from normalized bounds.
pub(crate) struct GridLobe {
    pub cx: f64,
    pub cy: f64,
    pub rx: f64,
    pub ry: f64,
}

impl GridLobe {
    /// Converts normalized bounds to a grid-pixel lobe.
    pub fn from_bounds(bounds: Rect, height: usize, width: usize) -> GridLobe {
        let c = bounds.center();
        GridLobe {
            cx: c.x * width as f64,
            cy: c.y * height as f64,
            rx: bounds.width() / 2.0 * width as f64,
            ry: bounds.height() / 2.0 * height as f64,
        }
    }

    /// Whether either axis spans less than one grid cell.
    pub fn is_sub_pixel(&self) -> bool {
        2.0 * self.rx < 1.0 || 2.0 * self.ry < 1.0
    }
}

/// Default mask center for a grid: `(width / 2, height / 2)`.
pub(crate) fn default_center(height: usize, width: usize) -> Point {
    Point::new(width as f64 / 2.0, height as f64 / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_is_one_inside_zero_outside() {
        assert_eq!(ellipse_coverage(5.0, 5.0, 5.0, 5.0, 3.0, 3.0), 1.0);
        assert_eq!(ellipse_coverage(50.0, 5.0, 5.0, 5.0, 3.0, 3.0), 0.0);
    }

    #[test]
    fn coverage_is_fractional_on_the_boundary() {
        let c = ellipse_coverage(8.0, 5.0, 5.0, 5.0, 3.0, 3.0);
        assert!(c > 0.0 && c < 1.0);
    }

    #[test]
    fn accumulate_saturates_at_one() {
        let mut m = Mask::zeros(2, 2);
        m.accumulate(0, 0, 0.7);
        m.accumulate(0, 0, 0.7);
        assert_eq!(m.get(0, 0), 1.0);
    }

    #[test]
    #[should_panic(expected = "out of")]
    fn out_of_range_access_panics() {
        let m = Mask::zeros(2, 3);
        // a row inside the raw buffer but past the last column
        m.get(0, 3);
    }
}
