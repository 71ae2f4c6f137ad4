//! Colours and continuous colour ramps used to paint region bands.

use serde::{Deserialize, Serialize};

/// Linear RGBA colour with components in [0, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Colour {
    pub const WHITE: Colour = Colour::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Colour = Colour::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn gray(v: f32) -> Self {
        Self::rgb(v, v, v)
    }

    pub fn lerp(self, other: Colour, t: f32) -> Colour {
        let t = t.clamp(0.0, 1.0);
        Colour {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Quantize to 8-bit RGB, clamping out-of-range components.
    pub fn to_rgb8(self) -> [u8; 3] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b)]
    }
}

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// One key of a colour ramp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColourStop {
    pub position: f32,
    pub colour: Colour,
}

/// A continuous gradient sampled over [0, 1].
///
/// Stops are kept sorted by position. Sampling before the first stop or
/// after the last returns the end colour.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRamp")]
pub struct ColourRamp {
    stops: Vec<ColourStop>,
}

#[derive(Deserialize)]
struct RawRamp {
    stops: Vec<ColourStop>,
}

impl From<RawRamp> for ColourRamp {
    fn from(raw: RawRamp) -> Self {
        Self::new(raw.stops)
    }
}

impl ColourRamp {
    pub fn new(mut stops: Vec<ColourStop>) -> Self {
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { stops }
    }

    /// Water -> sand -> grass -> rock -> snow.
    pub fn terrain() -> Self {
        let stops = [
            (0.00, [0.10, 0.22, 0.55]), // Deep water
            (0.30, [0.21, 0.40, 0.75]), // Shallow water
            (0.40, [0.84, 0.80, 0.52]), // Sand
            (0.55, [0.34, 0.60, 0.20]), // Grass
            (0.75, [0.36, 0.29, 0.22]), // Rock
            (1.00, [0.95, 0.95, 0.97]), // Snow
        ];
        Self::new(
            stops
                .iter()
                .map(|&(position, [r, g, b])| ColourStop {
                    position,
                    colour: Colour::rgb(r, g, b),
                })
                .collect(),
        )
    }

    pub fn stops(&self) -> &[ColourStop] {
        &self.stops
    }

    /// Sample the ramp at `t`. An empty ramp yields white.
    pub fn evaluate(&self, t: f32) -> Colour {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Colour::WHITE,
        };
        if t <= first.position {
            return first.colour;
        }
        if t >= last.position {
            return last.colour;
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.position {
                let span = b.position - a.position;
                if span <= f32::EPSILON {
                    return b.colour;
                }
                return a.colour.lerp(b.colour, (t - a.position) / span);
            }
        }
        last.colour
    }
}

impl Default for ColourRamp {
    fn default() -> Self {
        Self::terrain()
    }
}

/// Sample the colour for band `index` of `count`, optionally reversing the ramp.
/// A missing ramp falls back to white.
pub fn band_colour(ramp: Option<&ColourRamp>, index: usize, count: usize, reverse: bool) -> Colour {
    let Some(ramp) = ramp else {
        return Colour::WHITE;
    };
    let mut u = if count <= 1 {
        0.0
    } else {
        index as f32 / (count - 1) as f32
    };
    if reverse {
        u = 1.0 - u;
    }
    ramp.evaluate(u)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_stop() -> ColourRamp {
        ColourRamp::new(vec![
            ColourStop { position: 1.0, colour: Colour::WHITE },
            ColourStop { position: 0.0, colour: Colour::BLACK },
        ])
    }

    #[test]
    fn test_stops_are_sorted() {
        let ramp = two_stop();
        assert_eq!(ramp.stops()[0].colour, Colour::BLACK);
    }

    #[test]
    fn test_evaluate_interpolates_and_clamps() {
        let ramp = two_stop();
        assert_eq!(ramp.evaluate(0.5), Colour::gray(0.5));
        assert_eq!(ramp.evaluate(-1.0), Colour::BLACK);
        assert_eq!(ramp.evaluate(2.0), Colour::WHITE);
    }

    #[test]
    fn test_empty_ramp_is_white() {
        assert_eq!(ColourRamp::new(Vec::new()).evaluate(0.3), Colour::WHITE);
    }

    #[test]
    fn test_band_colour_fallback_and_reverse() {
        assert_eq!(band_colour(None, 0, 3, false), Colour::WHITE);

        let ramp = two_stop();
        assert_eq!(band_colour(Some(&ramp), 0, 1, false), Colour::BLACK);
        assert_eq!(band_colour(Some(&ramp), 0, 3, true), Colour::WHITE);
        assert_eq!(band_colour(Some(&ramp), 2, 3, false), Colour::WHITE);
    }

    #[test]
    fn test_to_rgb8() {
        assert_eq!(Colour::rgb(1.0, 0.0, 2.0).to_rgb8(), [255, 0, 255]);
    }
}
