//! Line graphic: a segment between two normalized endpoints.

use roikit_core::{ray_direction, snap_angle_to_eighth, vector_angle, Point};
use serde::{Deserialize, Serialize};

use super::ShapeOps;
use crate::drag::{clamp_points_together, dominant_axis, DragContext};
use crate::hit::{segment_distance, Hit, HitContext, HitPart};
use crate::mask::Mask;

/// Perpendicular half-width of the rasterized line stroke, in grid pixels.
const STROKE_HALF_WIDTH: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGraphic {
    pub start: Point,
    pub end: Point,
}

impl Default for LineGraphic {
    fn default() -> Self {
        LineGraphic {
            start: Point::new(0.25, 0.25),
            end: Point::new(0.75, 0.75),
        }
    }
}

impl ShapeOps for LineGraphic {
    fn hit_test(&self, ctx: &HitContext<'_>) -> Hit {
        let start_px = ctx.mapping.map_point_data_to_pixel(self.start);
        let end_px = ctx.mapping.map_point_data_to_pixel(self.end);
        // endpoint handles stay active in move-only mode: moving an
        // endpoint is how a line is moved precisely
        if ctx.near_handle(start_px) {
            return Hit::exact(HitPart::Start);
        }
        if ctx.near_handle(end_px) {
            return Hit::exact(HitPart::End);
        }
        if segment_distance(ctx.cursor, start_px, end_px) <= ctx.metrics.stroke_tolerance {
            return Hit::exact(HitPart::All);
        }
        Hit::miss()
    }

    fn adjusted(&self, ctx: &DragContext<'_>) -> Self {
        let start_px = ctx.mapping.map_point_data_to_pixel(self.start);
        let end_px = ctx.mapping.map_point_data_to_pixel(self.end);
        let limits = ctx.mapping.canvas_rect();

        let mut part = ctx.part;
        if ctx.constraints.shape_locked && part.is_resize() {
            part = HitPart::All;
        }

        let (new_start, new_end) = match part {
            HitPart::Start | HitPart::End => {
                let (dragged0, other0) = if part == HitPart::Start {
                    (start_px, end_px)
                } else {
                    (end_px, start_px)
                };
                let midpoint0 = dragged0.midpoint(other0);
                let mut dragged = dragged0 + ctx.delta;
                // alt pivots about the drag-start midpoint instead of the
                // far endpoint
                let anchor = if ctx.modifiers.alt { midpoint0 } else { other0 };
                if ctx.modifiers.shift {
                    let v = dragged - anchor;
                    let dir = ray_direction(snap_angle_to_eighth(vector_angle(v)));
                    let along = v.x * dir.x + v.y * dir.y;
                    dragged = anchor + dir * along;
                }
                let mut other = if ctx.modifiers.alt {
                    midpoint0 * 2.0 - dragged
                } else {
                    other0
                };
                if ctx.constraints.bounds {
                    dragged = Point::new(
                        dragged.x.clamp(limits.left(), limits.right()),
                        dragged.y.clamp(limits.top(), limits.bottom()),
                    );
                    other = Point::new(
                        other.x.clamp(limits.left(), limits.right()),
                        other.y.clamp(limits.top(), limits.bottom()),
                    );
                }
                if part == HitPart::Start {
                    (dragged, other)
                } else {
                    (other, dragged)
                }
            }
            HitPart::All => {
                if ctx.constraints.position_locked {
                    return self.clone();
                }
                let mut delta = ctx.delta;
                if ctx.modifiers.shift {
                    delta = dominant_axis(delta);
                }
                let mut points = [start_px + delta, end_px + delta];
                if ctx.constraints.bounds {
                    clamp_points_together(&mut points, limits);
                }
                (points[0], points[1])
            }
            _ => return self.clone(),
        };

        LineGraphic {
            start: ctx.mapping.map_point_pixel_to_data(new_start),
            end: ctx.mapping.map_point_pixel_to_data(new_end),
        }
    }

    fn mask_into(&self, mask: &mut Mask, _center: Point) {
        let h = mask.height();
        let w = mask.width();
        let a = Point::new(self.start.x * w as f64, self.start.y * h as f64);
        let b = Point::new(self.end.x * w as f64, self.end.y * h as f64);
        for row in 0..h {
            for col in 0..w {
                let p = Point::new(col as f64, row as f64);
                if segment_distance(p, a, b) <= STROKE_HALF_WIDTH {
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
    fn mask_covers_the_segment_and_nothing_far_from_it() {
        let shape = LineGraphic {
            start: Point::new(0.0, 0.5),
            end: Point::new(1.0, 0.5),
        };
        let mut mask = Mask::zeros(10, 10);
        shape.mask_into(&mut mask, Point::new(5.0, 5.0));
        for col in 0..10 {
            assert_eq!(mask.get(5, col), 1.0);
        }
        assert_eq!(mask.get(0, 5), 0.0);
        assert_eq!(mask.get(9, 5), 0.0);
    }
}
