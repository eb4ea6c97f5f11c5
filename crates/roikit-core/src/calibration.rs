//! Per-axis affine calibration.

use serde::{Deserialize, Serialize};

/// Affine calibration of one data axis: `calibrated = offset + value * scale`.
///
/// Units are carried for the owning display layer; this crate never formats
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub offset: f64,
    pub scale: f64,
    #[serde(default)]
    pub units: String,
}

impl Calibration {
    /// Creates a calibration with the given offset and scale.
    pub fn new(offset: f64, scale: f64) -> Self {
        Self {
            offset,
            scale,
            units: String::new(),
        }
    }

    /// Converts a raw data value to a calibrated value.
    pub fn convert_to_calibrated(&self, value: f64) -> f64 {
        self.offset + value * self.scale
    }

    /// Converts a calibrated value back to a raw data value.
    ///
    /// A zero scale maps everything to the offset, so the inverse returns
    /// 0.0 rather than dividing by zero.
    pub fn convert_from_calibrated(&self, value: f64) -> f64 {
        if self.scale == 0.0 {
            0.0
        } else {
            (value - self.offset) / self.scale
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calibrated_values_round_trip() {
        let c = Calibration::new(-0.5, 1.0 / 1000.0);
        let v = c.convert_to_calibrated(250.0);
        assert!((v + 0.25).abs() < 1e-12);
        assert!((c.convert_from_calibrated(v) - 250.0).abs() < 1e-9);
    }

    #[test]
    fn zero_scale_inverse_is_defined() {
        let c = Calibration::new(2.0, 0.0);
        assert_eq!(c.convert_from_calibrated(5.0), 0.0);
    }
}
