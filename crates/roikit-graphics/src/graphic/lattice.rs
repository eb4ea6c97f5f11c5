//! Lattice graphic: a grid of circular lobes generated by two basis
//! vectors about the image center, sharing a single lobe radius.

use std::ops::RangeInclusive;

use roikit_core::{Point, Size};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ShapeOps;
use crate::drag::DragContext;
use crate::hit::{Hit, HitContext, HitPart};
use crate::mask::{fill_ellipse, Mask};

/// Lobe index range tested for hits.
const HIT_LOBE_RANGE: i32 = 8;
/// Absolute ceiling on rasterized lobe indices, so near-zero bases still
/// terminate.
const MAX_LOBE_INDEX: i32 = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeGraphic {
    /// First basis vector, center-relative, normalized units.
    pub u_pos: Point,
    /// Second basis vector, center-relative, normalized units.
    pub v_pos: Point,
    /// Lobe radius as a fraction of the smaller image dimension.
    pub radius: f64,
}

impl Default for LatticeGraphic {
    fn default() -> Self {
        LatticeGraphic {
            u_pos: Point::new(0.25, 0.0),
            v_pos: Point::new(0.0, 0.25),
            radius: 0.05,
        }
    }
}

impl LatticeGraphic {
    fn basis_px(&self, ctx: &HitContext<'_>) -> (Point, Point) {
        let u = ctx.mapping.map_size_data_to_pixel(Size::new(self.u_pos.x, self.u_pos.y));
        let v = ctx.mapping.map_size_data_to_pixel(Size::new(self.v_pos.x, self.v_pos.y));
        (Point::new(u.width, u.height), Point::new(v.width, v.height))
    }
}

impl ShapeOps for LatticeGraphic {
    fn hit_test(&self, ctx: &HitContext<'_>) -> Hit {
        let center = ctx.mapping.canvas_center();
        let (u, v) = self.basis_px(ctx);
        let radius_px = self.radius * ctx.mapping.min_dimension();
        let grab = radius_px.max(ctx.metrics.handle_radius);

        if !ctx.move_only {
            if ctx.near_handle(center + u) {
                return Hit::exact(HitPart::ULattice);
            }
            if ctx.near_handle(center + v) {
                return Hit::exact(HitPart::VLattice);
            }
            for n in -HIT_LOBE_RANGE..=HIT_LOBE_RANGE {
                for m in -HIT_LOBE_RANGE..=HIT_LOBE_RANGE {
                    // (0,0) is the body; (1,0)/(0,1) are the basis handles
                    if (n, m) == (0, 0) || (n, m) == (1, 0) || (n, m) == (0, 1) {
                        continue;
                    }
                    let lobe = center + u * n as f64 + v * m as f64;
                    if ctx.cursor.distance_to(lobe) <= grab {
                        return Hit::exact(HitPart::LatticeRadius);
                    }
                }
            }
        }
        if ctx.cursor.distance_to(center) <= grab {
            return Hit::inside(HitPart::All);
        }
        Hit::miss()
    }

    fn adjusted(&self, ctx: &DragContext<'_>) -> Self {
        let mut part = ctx.part;
        if ctx.constraints.shape_locked && part.is_resize() {
            part = HitPart::All;
        }
        match part {
            HitPart::ULattice | HitPart::VLattice => {
                let center = ctx.mapping.canvas_center();
                let tip = ctx.current - center;
                let s = ctx
                    .mapping
                    .map_size_pixel_to_data(Size::new(tip.x, tip.y));
                let pos = Point::new(s.width, s.height);
                if part == HitPart::ULattice {
                    LatticeGraphic {
                        u_pos: pos,
                        ..self.clone()
                    }
                } else {
                    LatticeGraphic {
                        v_pos: pos,
                        ..self.clone()
                    }
                }
            }
            HitPart::LatticeRadius => {
                let min_dim = ctx.mapping.min_dimension();
                if min_dim <= 0.0 {
                    return self.clone();
                }
                // the radius grows by the dominant-axis displacement
                let grow = ctx.delta.x.abs().max(ctx.delta.y.abs()) / min_dim;
                LatticeGraphic {
                    radius: self.radius + grow,
                    ..self.clone()
                }
            }
            // the lattice is center-anchored; a body drag changes nothing
            _ => self.clone(),
        }
    }

    fn mask_into(&self, mask: &mut Mask, center: Point) {
        let h = mask.height() as f64;
        let w = mask.width() as f64;
        let min_dim = h.min(w);
        let radius_px = self.radius * min_dim;
        if 2.0 * radius_px < 1.0 {
            return;
        }
        let u = Point::new(self.u_pos.x * w, self.u_pos.y * h);
        let v = Point::new(self.v_pos.x * w, self.v_pos.y * h);
        let (n_range, m_range) = lobe_index_ranges(u, v, w, h, radius_px, center);
        let mut lobes: SmallVec<[Point; 64]> = SmallVec::new();
        for n in n_range {
            for m in m_range.clone() {
                let c = center + u * n as f64 + v * m as f64;
                let visible = c.x + radius_px >= 0.0
                    && c.x - radius_px <= w
                    && c.y + radius_px >= 0.0
                    && c.y - radius_px <= h;
                if visible {
                    lobes.push(c);
                }
            }
        }
        for c in lobes {
            fill_ellipse(mask, c.x, c.y, radius_px, radius_px);
        }
    }
}

/// Index ranges `(n, m)` whose lobes can intersect the grid.
///
/// For an invertible basis the grid rectangle, expanded by the lobe
/// radius, is mapped through the inverse basis; the bounding box of the
/// corner preimages bounds the indices exactly (linear map, convex
/// region). A singular basis (zero or collinear vectors) falls back to
/// per-vector step counts along the grid diagonal. Both branches are
/// capped at [`MAX_LOBE_INDEX`] so the rasterizer always terminates.
fn lobe_index_ranges(
    u: Point,
    v: Point,
    w: f64,
    h: f64,
    radius_px: f64,
    center: Point,
) -> (RangeInclusive<i32>, RangeInclusive<i32>) {
    let cap = MAX_LOBE_INDEX as f64;
    let det = u.x * v.y - u.y * v.x;
    if det.abs() > 1e-9 {
        let mut n_lo = f64::INFINITY;
        let mut n_hi = f64::NEG_INFINITY;
        let mut m_lo = f64::INFINITY;
        let mut m_hi = f64::NEG_INFINITY;
        for cx in [-radius_px, w + radius_px] {
            for cy in [-radius_px, h + radius_px] {
                let p = Point::new(cx - center.x, cy - center.y);
                let n = (p.x * v.y - p.y * v.x) / det;
                let m = (u.x * p.y - u.y * p.x) / det;
                n_lo = n_lo.min(n);
                n_hi = n_hi.max(n);
                m_lo = m_lo.min(m);
                m_hi = m_hi.max(m);
            }
        }
        let n_lo = (n_lo - 1.0).floor().clamp(-cap, cap) as i32;
        let n_hi = (n_hi + 1.0).ceil().clamp(-cap, cap) as i32;
        let m_lo = (m_lo - 1.0).floor().clamp(-cap, cap) as i32;
        let m_hi = (m_hi + 1.0).ceil().clamp(-cap, cap) as i32;
        (n_lo..=n_hi, m_lo..=m_hi)
    } else {
        let reach = (w * w + h * h).sqrt() + radius_px;
        let steps = |b: Point| -> i32 {
            let len = (b.x * b.x + b.y * b.y).sqrt();
            if len < 1e-9 {
                0
            } else {
                (reach / len).ceil().min(cap) as i32
            }
        };
        let n = steps(u);
        let m = steps(v);
        (-n..=n, -m..=m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_marks_the_center_and_basis_lobes() {
        let shape = LatticeGraphic {
            u_pos: Point::new(0.25, 0.0),
            v_pos: Point::new(0.0, 0.25),
            radius: 0.05,
        };
        let mut mask = Mask::zeros(40, 40);
        shape.mask_into(&mut mask, Point::new(20.0, 20.0));
        assert_eq!(mask.get(20, 20), 1.0); // center lobe
        assert_eq!(mask.get(20, 30), 1.0); // +u lobe
        assert_eq!(mask.get(30, 20), 1.0); // +v lobe
        assert_eq!(mask.get(20, 10), 1.0); // -u lobe
        assert_eq!(mask.get(25, 25), 0.0); // between lobes
    }

    #[test]
    fn dense_basis_covers_the_whole_grid() {
        // 1 px lobe spacing with a 5 px radius: lattice points exist far
        // beyond any small fixed index range, and their union covers
        // every pixel
        let shape = LatticeGraphic {
            u_pos: Point::new(0.01, 0.0),
            v_pos: Point::new(0.0, 0.01),
            radius: 0.05,
        };
        let mut mask = Mask::zeros(100, 100);
        shape.mask_into(&mut mask, Point::new(50.0, 50.0));
        assert_eq!(mask.get(50, 50), 1.0);
        assert_eq!(mask.get(0, 0), 1.0);
        assert_eq!(mask.get(99, 99), 1.0);
        assert_eq!(mask.get(0, 99), 1.0);
    }

    #[test]
    fn collinear_basis_covers_its_line_only() {
        let shape = LatticeGraphic {
            u_pos: Point::new(0.1, 0.0),
            v_pos: Point::new(0.2, 0.0),
            radius: 0.05,
        };
        let mut mask = Mask::zeros(100, 100);
        shape.mask_into(&mut mask, Point::new(50.0, 50.0));
        // lobes march along the horizontal line through the center
        assert_eq!(mask.get(50, 50), 1.0);
        assert_eq!(mask.get(50, 0), 1.0);
        assert_eq!(mask.get(0, 0), 0.0);
    }

    #[test]
    fn zero_basis_terminates_with_a_single_lobe() {
        let shape = LatticeGraphic {
            u_pos: Point::new(0.0, 0.0),
            v_pos: Point::new(0.0, 0.0),
            radius: 0.1,
        };
        let mut mask = Mask::zeros(50, 50);
        shape.mask_into(&mut mask, Point::new(25.0, 25.0));
        assert_eq!(mask.get(25, 25), 1.0);
        assert_eq!(mask.get(0, 0), 0.0);
    }

    #[test]
    fn sub_pixel_radius_produces_no_coverage() {
        let shape = LatticeGraphic {
            radius: 0.001,
            ..LatticeGraphic::default()
        };
        let mut mask = Mask::zeros(10, 10);
        shape.mask_into(&mut mask, Point::new(5.0, 5.0));
        assert!(mask.is_all_zero());
    }
}
