//! Height remapping: a per-cell curve followed by a global scale.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TerrainError};

pub const MIN_HEIGHT_EXPONENT: f32 = 0.1;
pub const MAX_HEIGHT_EXPONENT: f32 = 5.0;

/// One key of a height curve: input height `t` maps to `value`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub t: f32,
    pub value: f32,
}

/// A remap curve sampled over [0, 1], linear between keys.
///
/// Deserialized curves go through `HeightCurve::new`, so keys are sorted and
/// an empty key list is rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCurve")]
pub struct HeightCurve {
    keys: Vec<CurveKey>,
}

#[derive(Deserialize)]
struct RawCurve {
    keys: Vec<CurveKey>,
}

impl TryFrom<RawCurve> for HeightCurve {
    type Error = TerrainError;

    fn try_from(raw: RawCurve) -> Result<Self> {
        Self::new(raw.keys)
    }
}

impl HeightCurve {
    pub fn new(mut keys: Vec<CurveKey>) -> Result<Self> {
        if keys.is_empty() {
            return Err(TerrainError::EmptyCurve);
        }
        keys.sort_by(|a, b| a.t.total_cmp(&b.t));
        Ok(Self { keys })
    }

    /// Identity curve from (0, 0) to (1, 1).
    pub fn linear() -> Self {
        Self {
            keys: vec![CurveKey { t: 0.0, value: 0.0 }, CurveKey { t: 1.0, value: 1.0 }],
        }
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Evaluate the curve at `h`, holding the end values outside the key range.
    pub fn evaluate(&self, h: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return h,
        };
        if h <= first.t {
            return first.value;
        }
        if h >= last.t {
            return last.value;
        }

        let i = self.keys.partition_point(|k| k.t < h);
        let (a, b) = (self.keys[i - 1], self.keys[i]);
        let span = b.t - a.t;
        if span <= f32::EPSILON {
            return b.value;
        }
        a.value + (b.value - a.value) * (h - a.t) / span
    }
}

impl Default for HeightCurve {
    fn default() -> Self {
        Self::linear()
    }
}

/// Maps a raw height to a final mesh height: `curve(h) * multiplier^exponent`.
///
/// The exponent shapes the overall multiplier, not the per-cell curve output.
#[derive(Clone, Debug)]
pub struct HeightCurveMapper<'a> {
    curve: &'a HeightCurve,
    scale: f32,
}

impl<'a> HeightCurveMapper<'a> {
    pub fn new(curve: &'a HeightCurve, multiplier: f32, exponent: f32) -> Result<Self> {
        if curve.is_empty() {
            return Err(TerrainError::EmptyCurve);
        }
        Ok(Self {
            curve,
            scale: height_scale(multiplier, exponent),
        })
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn map(&self, h: f32) -> f32 {
        self.curve.evaluate(h) * self.scale
    }
}

/// `multiplier^exponent` with the exponent clamped to its allowed range.
/// Negative multipliers keep their sign so the result stays finite.
pub fn height_scale(multiplier: f32, exponent: f32) -> f32 {
    let exponent = exponent.clamp(MIN_HEIGHT_EXPONENT, MAX_HEIGHT_EXPONENT);
    multiplier.signum() * multiplier.abs().powf(exponent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_is_identity() {
        let curve = HeightCurve::linear();
        for h in [0.0, 0.25, 0.5, 0.9, 1.0] {
            assert!((curve.evaluate(h) - h).abs() < 1e-6);
        }
    }

    #[test]
    fn test_piecewise_and_clamped() {
        let curve = HeightCurve::new(vec![
            CurveKey { t: 1.0, value: 1.0 },
            CurveKey { t: 0.0, value: 0.0 },
            CurveKey { t: 0.5, value: 0.1 },
        ])
        .unwrap();
        assert!((curve.evaluate(0.25) - 0.05).abs() < 1e-6);
        assert!((curve.evaluate(0.75) - 0.55).abs() < 1e-6);
        assert_eq!(curve.evaluate(-3.0), 0.0);
        assert_eq!(curve.evaluate(3.0), 1.0);
    }

    #[test]
    fn test_empty_curve_rejected() {
        assert!(matches!(HeightCurve::new(Vec::new()), Err(TerrainError::EmptyCurve)));
    }

    #[test]
    fn test_exponent_scales_multiplier_not_curve() {
        let curve = HeightCurve::linear();
        let mapper = HeightCurveMapper::new(&curve, 3.0, 2.0).unwrap();
        assert!((mapper.map(0.5) - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_height_scale_clamps_and_keeps_sign() {
        assert!((height_scale(2.0, 100.0) - 32.0).abs() < 1e-4);
        assert!((height_scale(-4.0, 0.5) + 2.0).abs() < 1e-5);
        assert_eq!(height_scale(0.0, 1.0), 0.0);
    }
}
