//! Hit-testing vocabulary and shared proximity helpers.
//!
//! Each graphic kind reports hits using a named [`HitPart`]; the drag
//! controller later interprets the part when applying cursor deltas. A
//! precise handle hit is "exact"; a hit anywhere on the shape body is
//! inexact and only enables whole-shape moves.

use std::fmt;

use roikit_core::{CanvasMapping, Point};

/// A named control point, edge, or region of a graphic that a drag can
/// target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    /// The whole shape (translation).
    All,
    /// The whole reflected lobe of a spot (mirrored translation).
    InvertedAll,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
    InvertedTopLeft,
    InvertedTopRight,
    InvertedBottomLeft,
    InvertedBottomRight,
    /// Line or interval start.
    Start,
    /// Line or interval end.
    End,
    /// Wedge start ray.
    StartAngle,
    /// Wedge end ray.
    EndAngle,
    /// Inner/outer ring radius controls.
    Radius1,
    Radius2,
    /// Lattice basis vector tips.
    ULattice,
    VLattice,
    /// Lattice lobe radius control.
    LatticeRadius,
}

impl HitPart {
    /// Canonical name of the part.
    pub fn as_str(&self) -> &'static str {
        match self {
            HitPart::All => "all",
            HitPart::InvertedAll => "inverted-all",
            HitPart::TopLeft => "top-left",
            HitPart::TopRight => "top-right",
            HitPart::BottomLeft => "bottom-left",
            HitPart::BottomRight => "bottom-right",
            HitPart::Top => "top",
            HitPart::Bottom => "bottom",
            HitPart::Left => "left",
            HitPart::Right => "right",
            HitPart::InvertedTopLeft => "inverted-top-left",
            HitPart::InvertedTopRight => "inverted-top-right",
            HitPart::InvertedBottomLeft => "inverted-bottom-left",
            HitPart::InvertedBottomRight => "inverted-bottom-right",
            HitPart::Start => "start",
            HitPart::End => "end",
            HitPart::StartAngle => "start-angle",
            HitPart::EndAngle => "end-angle",
            HitPart::Radius1 => "radius-1",
            HitPart::Radius2 => "radius-2",
            HitPart::ULattice => "u-all",
            HitPart::VLattice => "v-all",
            HitPart::LatticeRadius => "radius",
        }
    }

    /// Whether the part changes shape geometry rather than position.
    pub fn is_resize(&self) -> bool {
        !matches!(self, HitPart::All | HitPart::InvertedAll)
    }

    /// Whether the part belongs to the reflected lobe of a spot.
    pub fn is_inverted(&self) -> bool {
        matches!(
            self,
            HitPart::InvertedAll
                | HitPart::InvertedTopLeft
                | HitPart::InvertedTopRight
                | HitPart::InvertedBottomLeft
                | HitPart::InvertedBottomRight
        )
    }

    /// Strips the `inverted-` prefix, mapping reflected-lobe parts onto
    /// their primary counterpart.
    pub fn uninverted(&self) -> HitPart {
        match self {
            HitPart::InvertedAll => HitPart::All,
            HitPart::InvertedTopLeft => HitPart::TopLeft,
            HitPart::InvertedTopRight => HitPart::TopRight,
            HitPart::InvertedBottomLeft => HitPart::BottomLeft,
            HitPart::InvertedBottomRight => HitPart::BottomRight,
            other => *other,
        }
    }
}

impl fmt::Display for HitPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a hit test: the part hit (if any) and whether the hit was a
/// precise handle hit as opposed to an inside-the-body hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub part: Option<HitPart>,
    pub is_exact: bool,
}

impl Hit {
    pub fn miss() -> Hit {
        Hit {
            part: None,
            is_exact: false,
        }
    }

    pub fn exact(part: HitPart) -> Hit {
        Hit {
            part: Some(part),
            is_exact: true,
        }
    }

    pub fn inside(part: HitPart) -> Hit {
        Hit {
            part: Some(part),
            is_exact: false,
        }
    }

    pub fn is_miss(&self) -> bool {
        self.part.is_none()
    }
}

/// Pixel tolerances and text metrics used by hit-testing.
///
/// The label width estimate is deliberately a deterministic function of the
/// character count; it stands in for renderer font metrics and is suitable
/// for hit-testing only.
#[derive(Debug, Clone)]
pub struct HitMetrics {
    /// Proximity radius for grabbing a handle, in pixels.
    pub handle_radius: f64,
    /// Proximity tolerance for the shape stroke (lines, edges), in pixels.
    pub stroke_tolerance: f64,
    /// Estimated rendered width of one label character, in pixels.
    pub label_char_width: f64,
    /// Estimated rendered label height, in pixels.
    pub label_height: f64,
    /// Gap between a marker and its label, in pixels.
    pub label_gap: f64,
}

impl HitMetrics {
    /// Estimated rendered width of a label string.
    pub fn label_width(&self, label: &str) -> f64 {
        self.label_char_width * label.chars().count() as f64
    }
}

impl Default for HitMetrics {
    fn default() -> Self {
        Self {
            handle_radius: 16.0,
            stroke_tolerance: 4.0,
            label_char_width: 6.5,
            label_height: 15.0,
            label_gap: 4.0,
        }
    }
}

/// Context handed to the per-shape hit tests.
pub(crate) struct HitContext<'a> {
    pub mapping: &'a CanvasMapping,
    pub metrics: &'a HitMetrics,
    pub cursor: Point,
    pub move_only: bool,
    pub label: Option<&'a str>,
}

impl HitContext<'_> {
    /// Whether the cursor is within handle-grab range of `p`.
    pub fn near_handle(&self, p: Point) -> bool {
        self.cursor.distance_to(p) <= self.metrics.handle_radius
    }
}

/// Distance from `p` to the segment `a`-`b`, bounded to the segment's
/// extent.
pub(crate) fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq <= f64::EPSILON {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_names_are_canonical() {
        assert_eq!(HitPart::TopLeft.to_string(), "top-left");
        assert_eq!(HitPart::InvertedBottomRight.to_string(), "inverted-bottom-right");
        assert_eq!(HitPart::ULattice.to_string(), "u-all");
        assert_eq!(HitPart::LatticeRadius.to_string(), "radius");
    }

    #[test]
    fn inverted_parts_map_onto_primary_counterparts() {
        assert_eq!(HitPart::InvertedTopRight.uninverted(), HitPart::TopRight);
        assert_eq!(HitPart::InvertedAll.uninverted(), HitPart::All);
        assert_eq!(HitPart::Start.uninverted(), HitPart::Start);
    }

    #[test]
    fn segment_distance_bounds_to_extent() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((segment_distance(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-12);
        // beyond the end, distance is to the endpoint, not the infinite line
        assert!((segment_distance(Point::new(14.0, 3.0), a, b) - 5.0).abs() < 1e-12);
    }
}
