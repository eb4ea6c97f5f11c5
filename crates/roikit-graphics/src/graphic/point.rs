//! Point graphic: a single normalized position rendered as a crosshair
//! marker with an optional label to its left.

use roikit_core::Point;
use serde::{Deserialize, Serialize};

use super::ShapeOps;
use crate::drag::{dominant_axis, DragContext};
use crate::hit::{Hit, HitContext, HitPart};
use crate::mask::Mask;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointGraphic {
    pub position: Point,
}

impl Default for PointGraphic {
    fn default() -> Self {
        PointGraphic {
            position: Point::new(0.5, 0.5),
        }
    }
}

impl ShapeOps for PointGraphic {
    fn hit_test(&self, ctx: &HitContext<'_>) -> Hit {
        let pos = ctx.mapping.map_point_data_to_pixel(self.position);
        let r = ctx.metrics.handle_radius;
        let dx = ctx.cursor.x - pos.x;
        let dy = ctx.cursor.y - pos.y;
        // the crosshair glyph has a square grab region
        if dx.abs() <= r && dy.abs() <= r {
            return Hit::exact(HitPart::All);
        }
        // the label extends the grab region leftward of the marker
        if let Some(label) = ctx.label.filter(|l| !l.is_empty()) {
            let width = ctx.metrics.label_width(label);
            let right = pos.x - r - ctx.metrics.label_gap;
            if dx <= -r
                && ctx.cursor.x >= right - width
                && dy.abs() <= ctx.metrics.label_height / 2.0
            {
                return Hit::exact(HitPart::All);
            }
        }
        Hit::miss()
    }

    fn adjusted(&self, ctx: &DragContext<'_>) -> Self {
        if ctx.part != HitPart::All || ctx.constraints.position_locked {
            return self.clone();
        }
        let pos0 = ctx.mapping.map_point_data_to_pixel(self.position);
        let mut delta = ctx.delta;
        if ctx.modifiers.shift {
            delta = dominant_axis(delta);
        }
        let mut pos = pos0 + delta;
        if ctx.constraints.bounds {
            let limits = ctx.mapping.canvas_rect();
            pos = Point::new(
                pos.x.clamp(limits.left(), limits.right()),
                pos.y.clamp(limits.top(), limits.bottom()),
            );
        }
        PointGraphic {
            position: ctx.mapping.map_point_pixel_to_data(pos),
        }
    }

    fn mask_into(&self, mask: &mut Mask, _center: Point) {
        let h = mask.height() as f64;
        let w = mask.width() as f64;
        let col = (self.position.x * w).floor();
        let row = (self.position.y * h).floor();
        if col >= 0.0 && col < w && row >= 0.0 && row < h {
            mask.set(row as usize, col as usize, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_marks_exactly_one_cell() {
        let shape = PointGraphic {
            position: Point::new(0.25, 0.75),
        };
        let mut mask = Mask::zeros(10, 10);
        shape.mask_into(&mut mask, Point::new(5.0, 5.0));
        assert_eq!(mask.get(7, 2), 1.0);
        assert_eq!(mask.total(), 1.0);
    }

    #[test]
    fn out_of_range_position_marks_nothing() {
        let shape = PointGraphic {
            position: Point::new(-0.1, 1.5),
        };
        let mut mask = Mask::zeros(10, 10);
        shape.mask_into(&mut mask, Point::new(5.0, 5.0));
        assert!(mask.is_all_zero());
    }
}
