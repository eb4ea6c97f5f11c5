//! Rectangle graphic: an axis-aligned bounds rectangle with optional
//! rotation about its center.

use roikit_core::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::ShapeOps;
use crate::drag::{adjust_rect_bounds, DragContext};
use crate::hit::{segment_distance, Hit, HitContext, HitPart};
use crate::mask::Mask;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleGraphic {
    /// Normalized bounds; size is non-negative once committed.
    pub bounds: Rect,
    /// Rotation about the bounds center, radians, counterclockwise on
    /// screen.
    #[serde(default)]
    pub rotation: f64,
}

impl Default for RectangleGraphic {
    fn default() -> Self {
        RectangleGraphic {
            bounds: Rect::new(0.25, 0.25, 0.5, 0.5),
            rotation: 0.0,
        }
    }
}

/// The four corner handles of a (possibly rotated) pixel-space rectangle,
/// in their on-screen positions.
pub(super) fn corner_handles(rect_px: Rect, rotation: f64) -> [(HitPart, Point); 4] {
    let c = rect_px.center();
    [
        (HitPart::TopLeft, rect_px.top_left().rotated_about(c, rotation)),
        (HitPart::TopRight, rect_px.top_right().rotated_about(c, rotation)),
        (HitPart::BottomLeft, rect_px.bottom_left().rotated_about(c, rotation)),
        (HitPart::BottomRight, rect_px.bottom_right().rotated_about(c, rotation)),
    ]
}

/// Tests the corner and edge handles shared by the bounds-based shapes.
/// Corners win over edges; all handles are suppressed in move-only mode.
pub(super) fn hit_bounds_handles(
    ctx: &HitContext<'_>,
    rect_px: Rect,
    rotation: f64,
) -> Option<Hit> {
    if ctx.move_only {
        return None;
    }
    let corners = corner_handles(rect_px, rotation);
    for (part, p) in corners {
        if ctx.near_handle(p) {
            return Some(Hit::exact(part));
        }
    }
    let (_, tl) = corners[0];
    let (_, tr) = corners[1];
    let (_, bl) = corners[2];
    let (_, br) = corners[3];
    let edges = [
        (HitPart::Top, tl, tr),
        (HitPart::Bottom, bl, br),
        (HitPart::Left, tl, bl),
        (HitPart::Right, tr, br),
    ];
    for (part, a, b) in edges {
        if segment_distance(ctx.cursor, a, b) <= ctx.metrics.stroke_tolerance {
            return Some(Hit::exact(part));
        }
    }
    None
}

impl ShapeOps for RectangleGraphic {
    fn hit_test(&self, ctx: &HitContext<'_>) -> Hit {
        let rect_px = ctx.mapping.map_rect_data_to_pixel(self.bounds);
        if let Some(hit) = hit_bounds_handles(ctx, rect_px, self.rotation) {
            return hit;
        }
        // test the interior in the unrotated local frame
        let local = ctx.cursor.rotated_about(rect_px.center(), -self.rotation);
        if rect_px.contains(local) {
            return Hit::inside(HitPart::All);
        }
        Hit::miss()
    }

    fn adjusted(&self, ctx: &DragContext<'_>) -> Self {
        RectangleGraphic {
            bounds: adjust_rect_bounds(self.bounds, self.rotation, ctx),
            rotation: self.rotation,
        }
    }

    fn mask_into(&self, mask: &mut Mask, _center: Point) {
        let h = mask.height();
        let w = mask.width();
        let left = self.bounds.left() * w as f64;
        let right = self.bounds.right() * w as f64;
        let top = self.bounds.top() * h as f64;
        let bottom = self.bounds.bottom() * h as f64;
        if self.rotation == 0.0 {
            for row in 0..h {
                let y = row as f64;
                if y < top || y >= bottom {
                    continue;
                }
                for col in 0..w {
                    let x = col as f64;
                    if x >= left && x < right {
                        mask.set(row, col, 1.0);
                    }
                }
            }
        } else {
            // rotation is applied in grid-pixel space about the bounds center
            let c = Point::new((left + right) / 2.0, (top + bottom) / 2.0);
            for row in 0..h {
                for col in 0..w {
                    let p = Point::new(col as f64, row as f64).rotated_about(c, -self.rotation);
                    if p.x >= left && p.x < right && p.y >= top && p.y < bottom {
                        mask.set(row, col, 1.0);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_fills_the_interior_half_open() {
        let shape = RectangleGraphic::default();
        let mut mask = Mask::zeros(10, 10);
        shape.mask_into(&mut mask, Point::new(5.0, 5.0));
        // 0.25..0.75 of a 10-cell axis covers indices 3..=7 (2.5..7.5)
        assert_eq!(mask.get(5, 5), 1.0);
        assert_eq!(mask.get(3, 3), 1.0);
        assert_eq!(mask.get(2, 5), 0.0);
        assert_eq!(mask.get(5, 8), 0.0);
        assert_eq!(mask.total(), 25.0);
    }

    #[test]
    fn rotated_mask_keeps_the_center_covered() {
        let shape = RectangleGraphic {
            bounds: Rect::new(0.3, 0.3, 0.4, 0.2),
            rotation: std::f64::consts::FRAC_PI_4,
        };
        let mut mask = Mask::zeros(20, 20);
        shape.mask_into(&mut mask, Point::new(10.0, 10.0));
        assert_eq!(mask.get(8, 10), 1.0);
        assert!(mask.total() > 0.0);
    }
}
