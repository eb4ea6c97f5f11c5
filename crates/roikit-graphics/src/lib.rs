//! Interactive region-of-interest graphics for 2D scientific imaging.
//!
//! Ten graphic kinds over normalized (0..1) image coordinates, each
//! supporting pixel-space hit-testing with named handles, modifier-aware
//! constrained drag sessions, and rasterization into weight masks.
//!
//! The typical flow: hit-test a [`Graphic`] against a cursor position via
//! a [`CanvasMapping`](roikit_core::CanvasMapping), start a
//! [`DragSession`] on the returned part, feed it move events, and read the
//! committed normalized geometry back off the graphic. Analysis code calls
//! [`Graphic::mask`] to turn the geometry into per-pixel weights.

pub mod drag;
pub mod error;
pub mod graphic;
pub mod hit;
pub mod mask;
pub mod properties;

pub use drag::{DragSession, Modifiers};
pub use error::{GraphicError, Result};
pub use graphic::{
    ChannelGraphic, EllipseGraphic, Graphic, GraphicKind, IntervalGraphic, LatticeGraphic,
    LineGraphic, PointGraphic, RectangleGraphic, RingGraphic, RingMode, Shape, SpotGraphic,
    WedgeGraphic,
};
pub use hit::{Hit, HitMetrics, HitPart};
pub use mask::Mask;
pub use properties::PropertyValue;
