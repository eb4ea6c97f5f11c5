//! The drag session controller.
//!
//! A [`DragSession`] owns one gesture: it snapshots the shape geometry and
//! the cursor position at press time, and on every move recomputes the
//! adjusted geometry from that immutable snapshot (never from the previous
//! frame's result, to avoid drift). Modifier keys are re-read on every
//! move, so toggling Shift or Alt mid-drag takes effect immediately and
//! releasing a modifier reproduces the unmodified transform of the same
//! total delta.

use roikit_core::{CanvasMapping, Point, Rect, Size};
use tracing::debug;

use crate::graphic::Graphic;
use crate::hit::{HitMetrics, HitPart};

/// Modifier-key state accompanying a drag move event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Restrict/square: axis-restricted moves, squared resizes, snapped
    /// line angles.
    pub shift: bool,
    /// From center: resize about the shape center instead of the opposite
    /// corner/endpoint.
    pub alt: bool,
    pub control: bool,
}

impl Modifiers {
    pub fn shift() -> Modifiers {
        Modifiers {
            shift: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Modifiers {
        Modifiers {
            alt: true,
            ..Default::default()
        }
    }

    pub fn shift_alt() -> Modifiers {
        Modifiers {
            shift: true,
            alt: true,
            control: false,
        }
    }
}

/// Lock/constraint flags captured from the graphic at each move.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Constraints {
    pub bounds: bool,
    pub shape_locked: bool,
    pub position_locked: bool,
}

/// Context handed to the per-shape drag transforms.
pub(crate) struct DragContext<'a> {
    pub mapping: &'a CanvasMapping,
    pub part: HitPart,
    pub start: Point,
    pub current: Point,
    /// `current - start`, in pixels.
    pub delta: Point,
    pub modifiers: Modifiers,
    pub constraints: Constraints,
}

/// A single in-flight drag gesture over one graphic.
///
/// Created on press via [`DragSession::begin`] (which hit-tests) or
/// [`DragSession::with_part`] (when the caller already knows the handle).
/// The session holds no reference to the graphic; the caller passes the
/// graphic to every [`DragSession::update`], which keeps ownership with
/// the event loop that started the gesture.
#[derive(Debug, Clone)]
pub struct DragSession {
    part: HitPart,
    snapshot: crate::graphic::Shape,
    start: Point,
}

impl DragSession {
    /// Starts a drag by hit-testing the graphic at the press position.
    /// Returns `None` on a miss.
    pub fn begin(
        graphic: &Graphic,
        mapping: &CanvasMapping,
        metrics: &HitMetrics,
        cursor: Point,
        move_only: bool,
    ) -> Option<DragSession> {
        let hit = graphic.hit_test(mapping, metrics, cursor, move_only);
        let part = hit.part?;
        debug!(part = %part, x = cursor.x, y = cursor.y, "drag begin");
        Some(Self::with_part(graphic, part, cursor))
    }

    /// Starts a drag on a known handle, snapshotting the current geometry.
    pub fn with_part(graphic: &Graphic, part: HitPart, cursor: Point) -> DragSession {
        DragSession {
            part,
            snapshot: graphic.shape.clone(),
            start: cursor,
        }
    }

    /// The handle this session is dragging.
    pub fn part(&self) -> HitPart {
        self.part
    }

    /// The press position in pixels.
    pub fn start_position(&self) -> Point {
        self.start
    }

    /// Applies a move event: recomputes the geometry from the drag-start
    /// snapshot and commits it to the graphic. Total over any cursor
    /// position and modifier combination.
    pub fn update(
        &self,
        graphic: &mut Graphic,
        mapping: &CanvasMapping,
        cursor: Point,
        modifiers: Modifiers,
    ) {
        let ctx = DragContext {
            mapping,
            part: self.part,
            start: self.start,
            current: cursor,
            delta: cursor - self.start,
            modifiers,
            constraints: Constraints {
                bounds: graphic.is_bounds_constrained,
                shape_locked: graphic.is_shape_locked,
                position_locked: graphic.is_position_locked,
            },
        };
        graphic.shape = self.snapshot.adjusted(&ctx);
        debug!(part = %self.part, dx = ctx.delta.x, dy = ctx.delta.y, "drag commit");
    }
}

/// Rotates a vector by `angle` under the screen convention used by
/// [`roikit_core::geometry::Point::rotated_about`].
pub(crate) fn rotate_vector(v: Point, angle: f64) -> Point {
    v.rotated_about(Point::new(0.0, 0.0), angle)
}

/// Clamps a span center so `[center - half, center + half]` stays within
/// `[lo, hi]`. A span wider than the limits is centered within them, so
/// the clamp is total.
pub(crate) fn clamp_span_center(center: f64, half: f64, lo: f64, hi: f64) -> f64 {
    if 2.0 * half >= hi - lo {
        (lo + hi) / 2.0
    } else {
        center.clamp(lo + half, hi - half)
    }
}

/// Restricts a translation delta to its dominant axis.
pub(crate) fn dominant_axis(delta: Point) -> Point {
    if delta.x.abs() >= delta.y.abs() {
        Point::new(delta.x, 0.0)
    } else {
        Point::new(0.0, delta.y)
    }
}

/// Shared constrained-resize/translate transform for bounds-based shapes
/// (rectangle, ellipse). Works in pixel space against the mapping's canvas
/// rectangle; the bounds clamp applies to unrotated shapes only.
pub(crate) fn adjust_rect_bounds(snapshot: Rect, rotation: f64, ctx: &DragContext<'_>) -> Rect {
    let rect0 = ctx.mapping.map_rect_data_to_pixel(snapshot);
    let limits = ctx.mapping.canvas_rect();

    let mut part = ctx.part;
    if ctx.constraints.shape_locked && part.is_resize() {
        // a locked shape keeps its size; every handle degrades to a move
        part = HitPart::All;
    }

    let result_px = match part {
        HitPart::All => {
            if ctx.constraints.position_locked {
                return snapshot;
            }
            translate_rect(rect0, rotation, ctx, limits)
        }
        HitPart::TopLeft | HitPart::TopRight | HitPart::BottomLeft | HitPart::BottomRight => {
            resize_rect_corner(rect0, rotation, part, ctx, limits)
        }
        HitPart::Top | HitPart::Bottom | HitPart::Left | HitPart::Right => {
            resize_rect_edge(rect0, rotation, part, ctx, limits)
        }
        _ => return snapshot,
    };

    ctx.mapping.map_rect_pixel_to_data(result_px)
}

fn translate_rect(rect0: Rect, rotation: f64, ctx: &DragContext<'_>, limits: Rect) -> Rect {
    let mut delta = ctx.delta;
    if ctx.modifiers.shift {
        delta = dominant_axis(delta);
    }
    let mut center = rect0.center() + delta;
    if ctx.constraints.bounds && rotation == 0.0 {
        center.x = clamp_span_center(
            center.x,
            rect0.width() / 2.0,
            limits.left(),
            limits.right(),
        );
        center.y = clamp_span_center(
            center.y,
            rect0.height() / 2.0,
            limits.top(),
            limits.bottom(),
        );
    }
    Rect::from_center_and_size(center, rect0.size)
}

/// Applies a resized local-frame rect, relocating the stored center so the
/// anchored corner/edge stays fixed on screen for rotated shapes.
fn finalize_local_rect(rect0: Rect, local: Rect, rotation: f64) -> Rect {
    if rotation == 0.0 {
        return local;
    }
    let shift = rotate_vector(local.center() - rect0.center(), rotation);
    Rect::from_center_and_size(rect0.center() + shift, local.size)
}

fn resize_rect_corner(
    rect0: Rect,
    rotation: f64,
    part: HitPart,
    ctx: &DragContext<'_>,
    limits: Rect,
) -> Rect {
    let local_delta = rotate_vector(ctx.delta, -rotation);
    let (corner0, opposite) = match part {
        HitPart::TopLeft => (rect0.top_left(), rect0.bottom_right()),
        HitPart::TopRight => (rect0.top_right(), rect0.bottom_left()),
        HitPart::BottomLeft => (rect0.bottom_left(), rect0.top_right()),
        _ => (rect0.bottom_right(), rect0.top_left()),
    };
    let from_center = ctx.modifiers.alt || ctx.constraints.position_locked;
    let anchor = if from_center { rect0.center() } else { opposite };
    let mut dragged = corner0 + local_delta;

    if ctx.modifiers.shift {
        let v = dragged - anchor;
        let side = v.x.abs().max(v.y.abs());
        dragged = anchor + Point::new(side.copysign(v.x), side.copysign(v.y));
    }

    if ctx.constraints.bounds && rotation == 0.0 {
        dragged = clamp_dragged_corner(dragged, anchor, from_center, ctx.modifiers.shift, limits);
    }

    let local = if from_center {
        Rect::from_corners(dragged, anchor * 2.0 - dragged)
    } else {
        Rect::from_corners(dragged, anchor)
    };
    finalize_local_rect(rect0, local, rotation)
}

/// Bounds-clamps a dragged corner. From-center resizes clamp half-extents
/// symmetrically so the center never moves; squared resizes shrink the
/// square side to the most restrictive limit so squareness survives the
/// clamp.
pub(crate) fn clamp_dragged_corner(
    dragged: Point,
    anchor: Point,
    from_center: bool,
    squared: bool,
    limits: Rect,
) -> Point {
    let v = dragged - anchor;
    if from_center {
        let hx_max = (anchor.x - limits.left()).min(limits.right() - anchor.x).max(0.0);
        let hy_max = (anchor.y - limits.top()).min(limits.bottom() - anchor.y).max(0.0);
        let (hx, hy) = if squared {
            let side = v.x.abs().min(hx_max).min(hy_max);
            (side, side)
        } else {
            (v.x.abs().min(hx_max), v.y.abs().min(hy_max))
        };
        Point::new(anchor.x + hx.copysign(v.x), anchor.y + hy.copysign(v.y))
    } else if squared {
        let avail_x = if v.x < 0.0 {
            anchor.x - limits.left()
        } else {
            limits.right() - anchor.x
        };
        let avail_y = if v.y < 0.0 {
            anchor.y - limits.top()
        } else {
            limits.bottom() - anchor.y
        };
        let side = v.x.abs().min(avail_x.max(0.0)).min(avail_y.max(0.0));
        Point::new(anchor.x + side.copysign(v.x), anchor.y + side.copysign(v.y))
    } else {
        Point::new(
            dragged.x.clamp(limits.left(), limits.right()),
            dragged.y.clamp(limits.top(), limits.bottom()),
        )
    }
}

fn resize_rect_edge(
    rect0: Rect,
    rotation: f64,
    part: HitPart,
    ctx: &DragContext<'_>,
    limits: Rect,
) -> Rect {
    let local_delta = rotate_vector(ctx.delta, -rotation);
    let from_center = ctx.modifiers.alt || ctx.constraints.position_locked;
    let center = rect0.center();
    let clamp = ctx.constraints.bounds && rotation == 0.0;

    // one scalar coordinate moves; the opposite edge (or the center)
    // anchors
    let local = match part {
        HitPart::Top | HitPart::Bottom => {
            let (edge0, opposite) = if part == HitPart::Top {
                (rect0.top(), rect0.bottom())
            } else {
                (rect0.bottom(), rect0.top())
            };
            let mut edge = edge0 + local_delta.y;
            if clamp {
                edge = if from_center {
                    let half_max = (center.y - limits.top()).min(limits.bottom() - center.y);
                    let half = (edge - center.y).abs().min(half_max.max(0.0));
                    center.y + half.copysign(edge - center.y)
                } else {
                    edge.clamp(limits.top(), limits.bottom())
                };
            }
            let anchor = if from_center { 2.0 * center.y - edge } else { opposite };
            Rect::from_corners(
                Point::new(rect0.left(), edge),
                Point::new(rect0.right(), anchor),
            )
        }
        _ => {
            let (edge0, opposite) = if part == HitPart::Left {
                (rect0.left(), rect0.right())
            } else {
                (rect0.right(), rect0.left())
            };
            let mut edge = edge0 + local_delta.x;
            if clamp {
                edge = if from_center {
                    let half_max = (center.x - limits.left()).min(limits.right() - center.x);
                    let half = (edge - center.x).abs().min(half_max.max(0.0));
                    center.x + half.copysign(edge - center.x)
                } else {
                    edge.clamp(limits.left(), limits.right())
                };
            }
            let anchor = if from_center { 2.0 * center.x - edge } else { opposite };
            Rect::from_corners(
                Point::new(edge, rect0.top()),
                Point::new(anchor, rect0.bottom()),
            )
        }
    };
    finalize_local_rect(rect0, local, rotation)
}

/// Translate-then-clamp for a set of points moved together: computes the
/// minimal shift keeping every point within the limits, preserving the
/// shape's size.
pub(crate) fn clamp_points_together(points: &mut [Point], limits: Rect) {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points.iter() {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let shift_x = if min_x < limits.left() {
        limits.left() - min_x
    } else if max_x > limits.right() {
        limits.right() - max_x
    } else {
        0.0
    };
    let shift_y = if min_y < limits.top() {
        limits.top() - min_y
    } else if max_y > limits.bottom() {
        limits.bottom() - max_y
    } else {
        0.0
    };
    for p in points.iter_mut() {
        p.x += shift_x;
        p.y += shift_y;
    }
}

/// Converts a pixel delta to a normalized-size delta (scale only).
pub(crate) fn delta_to_data(mapping: &CanvasMapping, delta: Point) -> Point {
    let s = mapping.map_size_pixel_to_data(Size::new(delta.x, delta.y));
    Point::new(s.width, s.height)
}
