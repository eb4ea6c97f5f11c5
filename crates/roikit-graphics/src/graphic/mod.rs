//! The graphic variants.
//!
//! A [`Graphic`] is a common record (label, lock flags, identity) plus a
//! tagged [`Shape`] payload. All committed geometry lives in normalized
//! data space; pixel space is a transient view used only during
//! interaction. Per-kind hit-test/drag/mask behavior is implemented on the
//! variant payloads and dispatched by `match` — no dynamic inheritance.

use std::fmt;
use std::str::FromStr;

use roikit_core::{CanvasMapping, Point};
use serde::{Deserialize, Serialize};
use tracing::trace;
use uuid::Uuid;

use crate::drag::DragContext;
use crate::error::{GraphicError, Result};
use crate::hit::{Hit, HitContext, HitMetrics};
use crate::mask::{default_center, Mask};

mod channel;
mod ellipse;
mod interval;
mod lattice;
mod line;
mod point;
mod rectangle;
mod ring;
mod spot;
mod wedge;

pub use channel::ChannelGraphic;
pub use ellipse::EllipseGraphic;
pub use interval::IntervalGraphic;
pub use lattice::LatticeGraphic;
pub use line::LineGraphic;
pub use point::PointGraphic;
pub use rectangle::RectangleGraphic;
pub use ring::{RingGraphic, RingMode};
pub use spot::SpotGraphic;
pub use wedge::WedgeGraphic;

/// The ten graphic kinds, with their canonical kind tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphicKind {
    Point,
    Line,
    Rectangle,
    Ellipse,
    Interval,
    Channel,
    Spot,
    Wedge,
    Ring,
    Lattice,
}

impl GraphicKind {
    /// Canonical kind tag used by the factory and persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphicKind::Point => "point-graphic",
            GraphicKind::Line => "line-graphic",
            GraphicKind::Rectangle => "rect-graphic",
            GraphicKind::Ellipse => "ellipse-graphic",
            GraphicKind::Interval => "interval-graphic",
            GraphicKind::Channel => "channel-graphic",
            GraphicKind::Spot => "spot-graphic",
            GraphicKind::Wedge => "wedge-graphic",
            GraphicKind::Ring => "ring-graphic",
            GraphicKind::Lattice => "lattice-graphic",
        }
    }

    /// All kinds, in declaration order.
    pub fn all() -> [GraphicKind; 10] {
        [
            GraphicKind::Point,
            GraphicKind::Line,
            GraphicKind::Rectangle,
            GraphicKind::Ellipse,
            GraphicKind::Interval,
            GraphicKind::Channel,
            GraphicKind::Spot,
            GraphicKind::Wedge,
            GraphicKind::Ring,
            GraphicKind::Lattice,
        ]
    }

    /// Default-initialized shape payload for this kind.
    pub fn default_shape(&self) -> Shape {
        match self {
            GraphicKind::Point => Shape::Point(PointGraphic::default()),
            GraphicKind::Line => Shape::Line(LineGraphic::default()),
            GraphicKind::Rectangle => Shape::Rectangle(RectangleGraphic::default()),
            GraphicKind::Ellipse => Shape::Ellipse(EllipseGraphic::default()),
            GraphicKind::Interval => Shape::Interval(IntervalGraphic::default()),
            GraphicKind::Channel => Shape::Channel(ChannelGraphic::default()),
            GraphicKind::Spot => Shape::Spot(SpotGraphic::default()),
            GraphicKind::Wedge => Shape::Wedge(WedgeGraphic::default()),
            GraphicKind::Ring => Shape::Ring(RingGraphic::default()),
            GraphicKind::Lattice => Shape::Lattice(LatticeGraphic::default()),
        }
    }
}

impl fmt::Display for GraphicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GraphicKind {
    type Err = GraphicError;

    fn from_str(s: &str) -> Result<GraphicKind> {
        GraphicKind::all()
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| GraphicError::UnknownKind(s.to_string()))
    }
}

/// Per-kind geometry payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    #[serde(rename = "point-graphic")]
    Point(PointGraphic),
    #[serde(rename = "line-graphic")]
    Line(LineGraphic),
    #[serde(rename = "rect-graphic")]
    Rectangle(RectangleGraphic),
    #[serde(rename = "ellipse-graphic")]
    Ellipse(EllipseGraphic),
    #[serde(rename = "interval-graphic")]
    Interval(IntervalGraphic),
    #[serde(rename = "channel-graphic")]
    Channel(ChannelGraphic),
    #[serde(rename = "spot-graphic")]
    Spot(SpotGraphic),
    #[serde(rename = "wedge-graphic")]
    Wedge(WedgeGraphic),
    #[serde(rename = "ring-graphic")]
    Ring(RingGraphic),
    #[serde(rename = "lattice-graphic")]
    Lattice(LatticeGraphic),
}

/// Capability interface implemented by every variant payload.
pub(crate) trait ShapeOps: Sized {
    /// Hit-tests the shape against a cursor pixel position.
    fn hit_test(&self, ctx: &HitContext<'_>) -> Hit;
    /// Computes the geometry resulting from applying a drag context to
    /// this drag-start snapshot. Total over any input.
    fn adjusted(&self, ctx: &DragContext<'_>) -> Self;
    /// Rasterizes the shape into `mask`, given the mask center in grid
    /// pixels.
    fn mask_into(&self, mask: &mut Mask, center: Point);
}

impl Shape {
    pub fn kind(&self) -> GraphicKind {
        match self {
            Shape::Point(_) => GraphicKind::Point,
            Shape::Line(_) => GraphicKind::Line,
            Shape::Rectangle(_) => GraphicKind::Rectangle,
            Shape::Ellipse(_) => GraphicKind::Ellipse,
            Shape::Interval(_) => GraphicKind::Interval,
            Shape::Channel(_) => GraphicKind::Channel,
            Shape::Spot(_) => GraphicKind::Spot,
            Shape::Wedge(_) => GraphicKind::Wedge,
            Shape::Ring(_) => GraphicKind::Ring,
            Shape::Lattice(_) => GraphicKind::Lattice,
        }
    }

    pub(crate) fn hit_test(&self, ctx: &HitContext<'_>) -> Hit {
        match self {
            Shape::Point(s) => s.hit_test(ctx),
            Shape::Line(s) => s.hit_test(ctx),
            Shape::Rectangle(s) => s.hit_test(ctx),
            Shape::Ellipse(s) => s.hit_test(ctx),
            Shape::Interval(s) => s.hit_test(ctx),
            Shape::Channel(s) => s.hit_test(ctx),
            Shape::Spot(s) => s.hit_test(ctx),
            Shape::Wedge(s) => s.hit_test(ctx),
            Shape::Ring(s) => s.hit_test(ctx),
            Shape::Lattice(s) => s.hit_test(ctx),
        }
    }

    pub(crate) fn adjusted(&self, ctx: &DragContext<'_>) -> Shape {
        match self {
            Shape::Point(s) => Shape::Point(s.adjusted(ctx)),
            Shape::Line(s) => Shape::Line(s.adjusted(ctx)),
            Shape::Rectangle(s) => Shape::Rectangle(s.adjusted(ctx)),
            Shape::Ellipse(s) => Shape::Ellipse(s.adjusted(ctx)),
            Shape::Interval(s) => Shape::Interval(s.adjusted(ctx)),
            Shape::Channel(s) => Shape::Channel(s.adjusted(ctx)),
            Shape::Spot(s) => Shape::Spot(s.adjusted(ctx)),
            Shape::Wedge(s) => Shape::Wedge(s.adjusted(ctx)),
            Shape::Ring(s) => Shape::Ring(s.adjusted(ctx)),
            Shape::Lattice(s) => Shape::Lattice(s.adjusted(ctx)),
        }
    }

    pub(crate) fn mask_into(&self, mask: &mut Mask, center: Point) {
        match self {
            Shape::Point(s) => s.mask_into(mask, center),
            Shape::Line(s) => s.mask_into(mask, center),
            Shape::Rectangle(s) => s.mask_into(mask, center),
            Shape::Ellipse(s) => s.mask_into(mask, center),
            Shape::Interval(s) => s.mask_into(mask, center),
            Shape::Channel(s) => s.mask_into(mask, center),
            Shape::Spot(s) => s.mask_into(mask, center),
            Shape::Wedge(s) => s.mask_into(mask, center),
            Shape::Ring(s) => s.mask_into(mask, center),
            Shape::Lattice(s) => s.mask_into(mask, center),
        }
    }
}

/// An interactive region-of-interest graphic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graphic {
    /// Stable identity for the owning document model.
    pub id: Uuid,
    /// Optional display label.
    #[serde(default)]
    pub label: Option<String>,
    /// Translation handles are inert when set.
    #[serde(default)]
    pub is_position_locked: bool,
    /// Resize handles degrade to translation when set.
    #[serde(default)]
    pub is_shape_locked: bool,
    /// Drag results are clamped into the unit square when set.
    #[serde(default)]
    pub is_bounds_constrained: bool,
    pub shape: Shape,
}

impl Graphic {
    /// Creates a graphic with default common fields around a shape payload.
    pub fn new(shape: Shape) -> Graphic {
        Graphic {
            id: Uuid::new_v4(),
            label: None,
            is_position_locked: false,
            is_shape_locked: false,
            is_bounds_constrained: false,
            shape,
        }
    }

    /// Factory: builds a default-initialized graphic from a kind tag.
    pub fn from_kind(tag: &str) -> Result<Graphic> {
        let kind = GraphicKind::from_str(tag)?;
        Ok(Graphic::new(kind.default_shape()))
    }

    pub fn kind(&self) -> GraphicKind {
        self.shape.kind()
    }

    /// Hit-tests the graphic against a cursor pixel position.
    ///
    /// Returns the hit part (if any) and whether the hit was a precise
    /// handle hit. `move_only` suppresses resize handles so the test only
    /// reports movement-enabling parts.
    pub fn hit_test(
        &self,
        mapping: &CanvasMapping,
        metrics: &HitMetrics,
        cursor: Point,
        move_only: bool,
    ) -> Hit {
        let ctx = HitContext {
            mapping,
            metrics,
            cursor,
            move_only,
            label: self.label.as_deref(),
        };
        self.shape.hit_test(&ctx)
    }

    /// Rasterizes the graphic into a weight mask over a `height` x `width`
    /// grid. `center` overrides the default grid center used by the
    /// center-symmetric shapes (spot, wedge, ring, lattice). Each call
    /// reflects current shape state only; nothing is cached.
    pub fn mask(&self, height: usize, width: usize, center: Option<Point>) -> Mask {
        trace!(kind = %self.kind(), height, width, "rasterize mask");
        let mut mask = Mask::zeros(height, width);
        if height == 0 || width == 0 {
            return mask;
        }
        let center = center.unwrap_or_else(|| default_center(height, width));
        self.shape.mask_into(&mut mask, center);
        mask
    }
}
