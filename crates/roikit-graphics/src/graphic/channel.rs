//! Channel graphic: a single normalized X coordinate marking one column.

use roikit_core::Point;
use serde::{Deserialize, Serialize};

use super::ShapeOps;
use crate::drag::{delta_to_data, DragContext};
use crate::hit::{Hit, HitContext, HitPart};
use crate::mask::Mask;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelGraphic {
    pub position: f64,
}

impl Default for ChannelGraphic {
    fn default() -> Self {
        ChannelGraphic { position: 0.5 }
    }
}

impl ShapeOps for ChannelGraphic {
    fn hit_test(&self, ctx: &HitContext<'_>) -> Hit {
        let x = ctx
            .mapping
            .map_point_data_to_pixel(Point::new(self.position, 0.0))
            .x;
        if (ctx.cursor.x - x).abs() <= ctx.metrics.handle_radius {
            return Hit::exact(HitPart::All);
        }
        Hit::miss()
    }

    fn adjusted(&self, ctx: &DragContext<'_>) -> Self {
        if ctx.part != HitPart::All || ctx.constraints.position_locked {
            return self.clone();
        }
        let mut position = self.position + delta_to_data(ctx.mapping, ctx.delta).x;
        if ctx.constraints.bounds {
            position = position.clamp(0.0, 1.0);
        }
        ChannelGraphic { position }
    }

    fn mask_into(&self, mask: &mut Mask, _center: Point) {
        let w = mask.width() as f64;
        let col = (self.position * w).floor();
        if col >= 0.0 && col < w {
            for row in 0..mask.height() {
                mask.set(row, col as usize, 1.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_marks_a_single_column() {
        let shape = ChannelGraphic { position: 0.35 };
        let mut mask = Mask::zeros(4, 10);
        shape.mask_into(&mut mask, Point::new(5.0, 2.0));
        for row in 0..4 {
            assert_eq!(mask.get(row, 3), 1.0);
        }
        assert_eq!(mask.total(), 4.0);
    }
}
