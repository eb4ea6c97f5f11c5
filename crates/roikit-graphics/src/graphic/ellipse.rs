//! Ellipse graphic: an ellipse inscribed in a bounds rectangle, with
//! optional rotation about the center.

use roikit_core::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::rectangle::hit_bounds_handles;
use super::ShapeOps;
use crate::drag::{adjust_rect_bounds, DragContext};
use crate::hit::{Hit, HitContext, HitPart};
use crate::mask::{fill_ellipse, GridLobe, Mask};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EllipseGraphic {
    /// Normalized bounds of the inscribing rectangle.
    pub bounds: Rect,
    /// Rotation about the bounds center, radians, counterclockwise on
    /// screen.
    #[serde(default)]
    pub rotation: f64,
}

impl Default for EllipseGraphic {
    fn default() -> Self {
        EllipseGraphic {
            bounds: Rect::new(0.25, 0.25, 0.5, 0.5),
            rotation: 0.0,
        }
    }
}

impl ShapeOps for EllipseGraphic {
    fn hit_test(&self, ctx: &HitContext<'_>) -> Hit {
        let rect_px = ctx.mapping.map_rect_data_to_pixel(self.bounds);
        if let Some(hit) = hit_bounds_handles(ctx, rect_px, self.rotation) {
            return hit;
        }
        let rx = rect_px.width() / 2.0;
        let ry = rect_px.height() / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return Hit::miss();
        }
        let center = rect_px.center();
        let local = ctx.cursor.rotated_about(center, -self.rotation);
        let nx = (local.x - center.x) / rx;
        let ny = (local.y - center.y) / ry;
        if nx * nx + ny * ny <= 1.0 {
            return Hit::inside(HitPart::All);
        }
        Hit::miss()
    }

    fn adjusted(&self, ctx: &DragContext<'_>) -> Self {
        EllipseGraphic {
            bounds: adjust_rect_bounds(self.bounds, self.rotation, ctx),
            rotation: self.rotation,
        }
    }

    fn mask_into(&self, mask: &mut Mask, _center: Point) {
        let lobe = GridLobe::from_bounds(self.bounds, mask.height(), mask.width());
        if lobe.is_sub_pixel() {
            return;
        }
        if self.rotation == 0.0 {
            fill_ellipse(mask, lobe.cx, lobe.cy, lobe.rx, lobe.ry);
            return;
        }
        // rotated: sample in the local frame; bbox uses the major radius
        let r = lobe.rx.max(lobe.ry);
        let h = mask.height();
        let w = mask.width();
        let c = Point::new(lobe.cx, lobe.cy);
        let row_lo = ((lobe.cy - r - 1.0).floor().max(0.0)) as usize;
        let row_hi = ((lobe.cy + r + 1.0).ceil().min(h as f64 - 1.0)).max(0.0) as usize;
        let col_lo = ((lobe.cx - r - 1.0).floor().max(0.0)) as usize;
        let col_hi = ((lobe.cx + r + 1.0).ceil().min(w as f64 - 1.0)).max(0.0) as usize;
        if lobe.cy + r < 0.0 || lobe.cx + r < 0.0 || lobe.cy - r > h as f64 || lobe.cx - r > w as f64 {
            return;
        }
        for row in row_lo..=row_hi.min(h - 1) {
            for col in col_lo..=col_hi.min(w - 1) {
                let p = Point::new(col as f64, row as f64).rotated_about(c, -self.rotation);
                let coverage = crate::mask::ellipse_coverage(p.x, p.y, c.x, c.y, lobe.rx, lobe.ry);
                if coverage > 0.0 {
                    mask.accumulate(row, col, coverage);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_is_full_at_center_and_empty_at_corners() {
        let shape = EllipseGraphic::default();
        let mut mask = Mask::zeros(20, 20);
        shape.mask_into(&mut mask, Point::new(10.0, 10.0));
        assert_eq!(mask.get(10, 10), 1.0);
        assert_eq!(mask.get(0, 0), 0.0);
        assert_eq!(mask.get(5, 5), 0.0); // corner of the bounds, outside the ellipse
    }

    #[test]
    fn sub_pixel_ellipse_produces_no_coverage() {
        let shape = EllipseGraphic {
            bounds: Rect::new(0.5, 0.5, 0.001, 0.001),
            rotation: 0.0,
        };
        let mut mask = Mask::zeros(10, 10);
        shape.mask_into(&mut mask, Point::new(5.0, 5.0));
        assert!(mask.is_all_zero());
    }
}
