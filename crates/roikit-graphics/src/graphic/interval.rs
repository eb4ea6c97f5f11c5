//! Interval graphic: a horizontal span between two normalized X
//! coordinates, covering the full vertical extent.

use roikit_core::Point;
use serde::{Deserialize, Serialize};

use super::ShapeOps;
use crate::drag::{delta_to_data, DragContext};
use crate::hit::{Hit, HitContext, HitPart};
use crate::mask::Mask;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalGraphic {
    pub start: f64,
    pub end: f64,
}

impl Default for IntervalGraphic {
    fn default() -> Self {
        IntervalGraphic {
            start: 0.25,
            end: 0.75,
        }
    }
}

impl ShapeOps for IntervalGraphic {
    fn hit_test(&self, ctx: &HitContext<'_>) -> Hit {
        let start_x = ctx
            .mapping
            .map_point_data_to_pixel(Point::new(self.start, 0.0))
            .x;
        let end_x = ctx
            .mapping
            .map_point_data_to_pixel(Point::new(self.end, 0.0))
            .x;
        // endpoint handles stay active in move-only mode, matching lines
        if (ctx.cursor.x - start_x).abs() <= ctx.metrics.handle_radius {
            return Hit::exact(HitPart::Start);
        }
        if (ctx.cursor.x - end_x).abs() <= ctx.metrics.handle_radius {
            return Hit::exact(HitPart::End);
        }
        let (lo, hi) = (start_x.min(end_x), start_x.max(end_x));
        if ctx.cursor.x >= lo && ctx.cursor.x <= hi {
            return Hit::inside(HitPart::All);
        }
        Hit::miss()
    }

    fn adjusted(&self, ctx: &DragContext<'_>) -> Self {
        let dx = delta_to_data(ctx.mapping, ctx.delta).x;

        let mut part = ctx.part;
        if ctx.constraints.shape_locked && part.is_resize() {
            part = HitPart::All;
        }

        match part {
            HitPart::Start | HitPart::End => {
                let base = if part == HitPart::Start {
                    self.start
                } else {
                    self.end
                };
                let mut value = base + dx;
                if ctx.constraints.bounds {
                    value = value.clamp(0.0, 1.0);
                }
                if part == HitPart::Start {
                    IntervalGraphic {
                        start: value,
                        end: self.end,
                    }
                } else {
                    IntervalGraphic {
                        start: self.start,
                        end: value,
                    }
                }
            }
            HitPart::All => {
                if ctx.constraints.position_locked {
                    return self.clone();
                }
                let mut start = self.start + dx;
                let mut end = self.end + dx;
                if ctx.constraints.bounds {
                    // translate-then-clamp keeps the span width
                    let lo = start.min(end);
                    let hi = start.max(end);
                    let shift = if lo < 0.0 {
                        -lo
                    } else if hi > 1.0 {
                        1.0 - hi
                    } else {
                        0.0
                    };
                    start += shift;
                    end += shift;
                }
                IntervalGraphic { start, end }
            }
            _ => self.clone(),
        }
    }

    fn mask_into(&self, mask: &mut Mask, _center: Point) {
        let w = mask.width() as f64;
        let lo = self.start.min(self.end) * w;
        let hi = self.start.max(self.end) * w;
        for col in 0..mask.width() {
            let x = col as f64;
            if x >= lo && x < hi {
                for row in 0..mask.height() {
                    mask.set(row, col, 1.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_fills_full_height_columns() {
        let shape = IntervalGraphic {
            start: 0.2,
            end: 0.4,
        };
        let mut mask = Mask::zeros(5, 10);
        shape.mask_into(&mut mask, Point::new(5.0, 2.5));
        for row in 0..5 {
            assert_eq!(mask.get(row, 2), 1.0);
            assert_eq!(mask.get(row, 3), 1.0);
            assert_eq!(mask.get(row, 1), 0.0);
            assert_eq!(mask.get(row, 4), 0.0);
        }
    }

    #[test]
    fn reversed_endpoints_rasterize_the_same_span() {
        let forward = IntervalGraphic {
            start: 0.2,
            end: 0.4,
        };
        let reversed = IntervalGraphic {
            start: 0.4,
            end: 0.2,
        };
        let mut a = Mask::zeros(3, 10);
        let mut b = Mask::zeros(3, 10);
        forward.mask_into(&mut a, Point::new(5.0, 1.5));
        reversed.mask_into(&mut b, Point::new(5.0, 1.5));
        assert_eq!(a.data(), b.data());
    }
}
