//! Wedge graphic: an angular sector anchored at the image center, defined
//! by a start and end angle. Angle 0 points right; angles increase
//! counterclockwise on screen.

use roikit_core::{angle_in_arc, normalize_angle, ray_direction, snap_angle_to_eighth, vector_angle, Point};
use serde::{Deserialize, Serialize};

use super::ShapeOps;
use crate::drag::DragContext;
use crate::hit::{segment_distance, Hit, HitContext, HitPart};
use crate::mask::Mask;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WedgeGraphic {
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Default for WedgeGraphic {
    fn default() -> Self {
        WedgeGraphic {
            start_angle: 0.0,
            end_angle: std::f64::consts::PI,
        }
    }
}

impl ShapeOps for WedgeGraphic {
    fn hit_test(&self, ctx: &HitContext<'_>) -> Hit {
        let center = ctx.mapping.canvas_center();
        let radius = ctx.mapping.min_dimension() / 2.0;
        if !ctx.move_only {
            let rays = [
                (HitPart::StartAngle, self.start_angle),
                (HitPart::EndAngle, self.end_angle),
            ];
            for (part, angle) in rays {
                let tip = center + ray_direction(angle) * radius;
                if segment_distance(ctx.cursor, center, tip) <= ctx.metrics.handle_radius {
                    return Hit::exact(part);
                }
            }
        }
        let v = ctx.cursor - center;
        if ctx.cursor.distance_to(center) <= radius
            && angle_in_arc(vector_angle(v), self.start_angle, self.end_angle)
        {
            return Hit::inside(HitPart::All);
        }
        Hit::miss()
    }

    fn adjusted(&self, ctx: &DragContext<'_>) -> Self {
        let center = ctx.mapping.canvas_center();
        let v = ctx.current - center;
        if v.x == 0.0 && v.y == 0.0 {
            return self.clone();
        }

        let mut part = ctx.part;
        if ctx.constraints.shape_locked && part.is_resize() {
            part = HitPart::All;
        }

        match part {
            HitPart::StartAngle | HitPart::EndAngle => {
                let mut angle = vector_angle(v);
                if ctx.modifiers.shift {
                    angle = normalize_angle(snap_angle_to_eighth(angle));
                }
                if part == HitPart::StartAngle {
                    WedgeGraphic {
                        start_angle: angle,
                        end_angle: self.end_angle,
                    }
                } else {
                    WedgeGraphic {
                        start_angle: self.start_angle,
                        end_angle: angle,
                    }
                }
            }
            HitPart::All => {
                if ctx.constraints.position_locked {
                    return self.clone();
                }
                let v0 = ctx.start - center;
                if v0.x == 0.0 && v0.y == 0.0 {
                    return self.clone();
                }
                // rotate the whole sector by the cursor's angular sweep
                let sweep = vector_angle(v) - vector_angle(v0);
                WedgeGraphic {
                    start_angle: normalize_angle(self.start_angle + sweep),
                    end_angle: normalize_angle(self.end_angle + sweep),
                }
            }
            _ => self.clone(),
        }
    }

    fn mask_into(&self, mask: &mut Mask, center: Point) {
        for row in 0..mask.height() {
            for col in 0..mask.width() {
                let v = Point::new(col as f64 - center.x, row as f64 - center.y);
                if angle_in_arc(vector_angle(v), self.start_angle, self.end_angle) {
                    mask.set(row, col, 1.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn mask_covers_the_upper_half_plane_for_a_zero_to_pi_wedge() {
        let shape = WedgeGraphic::default();
        let mut mask = Mask::zeros(10, 10);
        shape.mask_into(&mut mask, Point::new(5.0, 5.0));
        // screen-up is inside; screen-down is outside
        assert_eq!(mask.get(2, 5), 1.0);
        assert_eq!(mask.get(8, 5), 0.0);
    }

    #[test]
    fn mask_handles_wraparound_arcs() {
        let shape = WedgeGraphic {
            start_angle: 7.0 * PI / 4.0,
            end_angle: PI / 4.0,
        };
        let mut mask = Mask::zeros(11, 11);
        shape.mask_into(&mut mask, Point::new(5.0, 5.0));
        // rightward direction sits inside the wrapped arc
        assert_eq!(mask.get(5, 9), 1.0);
        assert_eq!(mask.get(5, 1), 0.0);
    }
}
