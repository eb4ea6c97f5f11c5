//! Ring graphic: two concentric radii about the image center with a
//! filter mode. Radii are fractions of the smaller image dimension and may
//! be given in either order; masks always use the smaller as inner and the
//! larger as outer.

use std::fmt;
use std::str::FromStr;

use roikit_core::Point;
use serde::{Deserialize, Serialize};

use super::ShapeOps;
use crate::drag::DragContext;
use crate::error::{GraphicError, Result};
use crate::hit::{Hit, HitContext, HitPart};
use crate::mask::Mask;

/// Ring filter mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RingMode {
    /// Pass inside the outer radius.
    LowPass,
    /// Pass outside the inner radius.
    HighPass,
    /// Pass between the radii.
    BandPass,
}

impl RingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RingMode::LowPass => "low-pass",
            RingMode::HighPass => "high-pass",
            RingMode::BandPass => "band-pass",
        }
    }
}

impl fmt::Display for RingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RingMode {
    type Err = GraphicError;

    fn from_str(s: &str) -> Result<RingMode> {
        match s {
            "low-pass" => Ok(RingMode::LowPass),
            "high-pass" => Ok(RingMode::HighPass),
            "band-pass" => Ok(RingMode::BandPass),
            other => Err(GraphicError::UnrecognizedRingMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingGraphic {
    pub radius_1: f64,
    pub radius_2: f64,
    pub mode: RingMode,
}

impl Default for RingGraphic {
    fn default() -> Self {
        RingGraphic {
            radius_1: 0.2,
            radius_2: 0.4,
            mode: RingMode::BandPass,
        }
    }
}

impl ShapeOps for RingGraphic {
    fn hit_test(&self, ctx: &HitContext<'_>) -> Hit {
        let center = ctx.mapping.canvas_center();
        let min_dim = ctx.mapping.min_dimension();
        let d = ctx.cursor.distance_to(center);
        if !ctx.move_only {
            let d1 = (d - self.radius_1 * min_dim).abs();
            let d2 = (d - self.radius_2 * min_dim).abs();
            if d1 <= ctx.metrics.handle_radius && d1 <= d2 {
                return Hit::exact(HitPart::Radius1);
            }
            if d2 <= ctx.metrics.handle_radius {
                return Hit::exact(HitPart::Radius2);
            }
        }
        let lo = self.radius_1.min(self.radius_2) * min_dim;
        let hi = self.radius_1.max(self.radius_2) * min_dim;
        if d >= lo && d <= hi {
            return Hit::inside(HitPart::All);
        }
        Hit::miss()
    }

    fn adjusted(&self, ctx: &DragContext<'_>) -> Self {
        let part = ctx.part;
        if ctx.constraints.shape_locked && part.is_resize() {
            return self.clone();
        }
        let center = ctx.mapping.canvas_center();
        let min_dim = ctx.mapping.min_dimension();
        if min_dim <= 0.0 {
            return self.clone();
        }
        let r = ctx.current.distance_to(center) / min_dim;
        match part {
            HitPart::Radius1 => RingGraphic {
                radius_1: r,
                ..self.clone()
            },
            HitPart::Radius2 => RingGraphic {
                radius_2: r,
                ..self.clone()
            },
            // the ring is center-anchored; a body drag changes nothing
            _ => self.clone(),
        }
    }

    fn mask_into(&self, mask: &mut Mask, center: Point) {
        let min_dim = mask.height().min(mask.width()) as f64;
        let lo = self.radius_1.min(self.radius_2) * min_dim;
        let hi = self.radius_1.max(self.radius_2) * min_dim;
        for row in 0..mask.height() {
            for col in 0..mask.width() {
                let d = Point::new(col as f64, row as f64).distance_to(center);
                let pass = match self.mode {
                    RingMode::LowPass => d <= hi,
                    RingMode::HighPass => d >= lo,
                    RingMode::BandPass => d >= lo && d <= hi,
                };
                if pass {
                    mask.set(row, col, 1.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(mode: RingMode) -> RingGraphic {
        RingGraphic {
            radius_1: 0.2,
            radius_2: 0.4,
            mode,
        }
    }

    #[test]
    fn high_pass_rejects_the_center_and_keeps_the_edges() {
        let mut mask = Mask::zeros(10, 10);
        ring(RingMode::HighPass).mask_into(&mut mask, Point::new(4.5, 4.5));
        assert_eq!(mask.get(5, 5), 0.0);
        assert_eq!(mask.get(2, 5), 1.0);
        assert_eq!(mask.get(0, 0), 1.0);
    }

    #[test]
    fn low_pass_keeps_the_center_and_rejects_the_corners() {
        let mut mask = Mask::zeros(10, 10);
        ring(RingMode::LowPass).mask_into(&mut mask, Point::new(4.5, 4.5));
        assert_eq!(mask.get(5, 5), 1.0);
        assert_eq!(mask.get(0, 0), 0.0);
    }

    #[test]
    fn band_pass_keeps_only_the_annulus() {
        let mut mask = Mask::zeros(10, 10);
        ring(RingMode::BandPass).mask_into(&mut mask, Point::new(4.5, 4.5));
        assert_eq!(mask.get(5, 5), 0.0);
        assert_eq!(mask.get(2, 5), 1.0);
        assert_eq!(mask.get(0, 0), 0.0);
    }

    #[test]
    fn swapped_radii_produce_identical_masks() {
        let forward = ring(RingMode::BandPass);
        let swapped = RingGraphic {
            radius_1: 0.4,
            radius_2: 0.2,
            mode: RingMode::BandPass,
        };
        let mut a = Mask::zeros(16, 16);
        let mut b = Mask::zeros(16, 16);
        forward.mask_into(&mut a, Point::new(8.0, 8.0));
        swapped.mask_into(&mut b, Point::new(8.0, 8.0));
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn mode_parsing_fails_closed() {
        assert_eq!("band-pass".parse::<RingMode>(), Ok(RingMode::BandPass));
        assert!(matches!(
            "notch".parse::<RingMode>(),
            Err(GraphicError::UnrecognizedRingMode(_))
        ));
    }
}
