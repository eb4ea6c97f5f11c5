//! Spot graphic: an elliptical lobe stored center-relative, always paired
//! with its reflection through the image center. Used to select symmetric
//! Fourier-space spots.

use roikit_core::{Point, Rect};
use serde::{Deserialize, Serialize};

use super::rectangle::corner_handles;
use super::ShapeOps;
use crate::drag::{clamp_dragged_corner, dominant_axis, DragContext};
use crate::hit::{Hit, HitContext, HitPart};
use crate::mask::{fill_ellipse, Mask};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotGraphic {
    /// Bounds of the primary lobe, relative to the image center: the
    /// absolute bounds are `bounds` translated by (0.5, 0.5).
    pub bounds: Rect,
}

impl Default for SpotGraphic {
    fn default() -> Self {
        SpotGraphic {
            bounds: Rect::from_center_and_size(
                Point::new(0.25, 0.25),
                roikit_core::Size::new(0.1, 0.1),
            ),
        }
    }
}

impl SpotGraphic {
    /// Absolute normalized bounds of the primary lobe.
    pub fn primary_bounds(&self) -> Rect {
        self.bounds.translated(Point::new(0.5, 0.5))
    }
}

fn inside_ellipse(cursor: Point, rect_px: Rect) -> bool {
    let rx = rect_px.width() / 2.0;
    let ry = rect_px.height() / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let c = rect_px.center();
    let nx = (cursor.x - c.x) / rx;
    let ny = (cursor.y - c.y) / ry;
    nx * nx + ny * ny <= 1.0
}

impl ShapeOps for SpotGraphic {
    fn hit_test(&self, ctx: &HitContext<'_>) -> Hit {
        let rect_px = ctx.mapping.map_rect_data_to_pixel(self.primary_bounds());
        let mirror = ctx.mapping.canvas_center();
        if !ctx.move_only {
            for (part, p) in corner_handles(rect_px, 0.0) {
                if ctx.near_handle(p) {
                    return Hit::exact(part);
                }
            }
            let inverted = [
                HitPart::InvertedTopLeft,
                HitPart::InvertedTopRight,
                HitPart::InvertedBottomLeft,
                HitPart::InvertedBottomRight,
            ];
            for ((_, p), part) in corner_handles(rect_px, 0.0).into_iter().zip(inverted) {
                if ctx.near_handle(mirror * 2.0 - p) {
                    return Hit::exact(part);
                }
            }
        }
        if inside_ellipse(ctx.cursor, rect_px) {
            return Hit::inside(HitPart::All);
        }
        let mirrored_px = Rect::from_corners(
            mirror * 2.0 - rect_px.top_left(),
            mirror * 2.0 - rect_px.bottom_right(),
        );
        if inside_ellipse(ctx.cursor, mirrored_px) {
            return Hit::inside(HitPart::InvertedAll);
        }
        Hit::miss()
    }

    fn adjusted(&self, ctx: &DragContext<'_>) -> Self {
        // a drag on the reflected lobe moves the primary the opposite way
        let delta = if ctx.part.is_inverted() {
            -ctx.delta
        } else {
            ctx.delta
        };
        let mut part = ctx.part.uninverted();
        if ctx.constraints.shape_locked && part.is_resize() {
            part = HitPart::All;
        }

        let rect0 = ctx.mapping.map_rect_data_to_pixel(self.primary_bounds());
        let limits = ctx.mapping.canvas_rect();

        let result_px = match part {
            HitPart::All => {
                if ctx.constraints.position_locked {
                    return self.clone();
                }
                let mut d = delta;
                if ctx.modifiers.shift {
                    d = dominant_axis(d);
                }
                let mut center = rect0.center() + d;
                if ctx.constraints.bounds {
                    center = Point::new(
                        center.x.clamp(limits.left(), limits.right()),
                        center.y.clamp(limits.top(), limits.bottom()),
                    );
                }
                Rect::from_center_and_size(center, rect0.size)
            }
            HitPart::TopLeft | HitPart::TopRight | HitPart::BottomLeft | HitPart::BottomRight => {
                // lobe resizes are always about the lobe center so the
                // paired lobes stay congruent
                let corner0 = match part {
                    HitPart::TopLeft => rect0.top_left(),
                    HitPart::TopRight => rect0.top_right(),
                    HitPart::BottomLeft => rect0.bottom_left(),
                    _ => rect0.bottom_right(),
                };
                let anchor = rect0.center();
                let mut dragged = corner0 + delta;
                if ctx.modifiers.shift {
                    let v = dragged - anchor;
                    let side = v.x.abs().max(v.y.abs());
                    dragged = anchor + Point::new(side.copysign(v.x), side.copysign(v.y));
                }
                if ctx.constraints.bounds {
                    dragged =
                        clamp_dragged_corner(dragged, anchor, true, ctx.modifiers.shift, limits);
                }
                Rect::from_corners(dragged, anchor * 2.0 - dragged)
            }
            _ => return self.clone(),
        };

        SpotGraphic {
            bounds: ctx
                .mapping
                .map_rect_pixel_to_data(result_px)
                .translated(Point::new(-0.5, -0.5)),
        }
    }

    fn mask_into(&self, mask: &mut Mask, center: Point) {
        let h = mask.height() as f64;
        let w = mask.width() as f64;
        let offset = self.bounds.center();
        let ox = offset.x * w;
        let oy = offset.y * h;
        let rx = self.bounds.width() / 2.0 * w;
        let ry = self.bounds.height() / 2.0 * h;
        // a lobe narrower than one cell on either axis contributes nothing
        if 2.0 * rx < 1.0 || 2.0 * ry < 1.0 {
            return;
        }
        fill_ellipse(mask, center.x + ox, center.y + oy, rx, ry);
        fill_ellipse(mask, center.x - ox, center.y - oy, rx, ry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roikit_core::Size;

    #[test]
    fn mask_fills_both_lobes_symmetrically() {
        let shape = SpotGraphic {
            bounds: Rect::from_center_and_size(Point::new(0.25, 0.0), Size::new(0.2, 0.2)),
        };
        let mut mask = Mask::zeros(40, 40);
        shape.mask_into(&mut mask, Point::new(20.0, 20.0));
        // lobes centered at (30, 20) and (10, 20) in (col, row)
        assert_eq!(mask.get(20, 30), 1.0);
        assert_eq!(mask.get(20, 10), 1.0);
        assert_eq!(mask.get(20, 20), 0.0);
    }

    #[test]
    fn sub_pixel_lobe_produces_no_coverage() {
        let shape = SpotGraphic {
            bounds: Rect::from_center_and_size(Point::new(0.25, 0.25), Size::new(0.001, 0.001)),
        };
        let mut mask = Mask::zeros(10, 10);
        shape.mask_into(&mut mask, Point::new(5.0, 5.0));
        assert!(mask.is_all_zero());
    }
}
