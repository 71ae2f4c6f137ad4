//! Terrain generation parameters.
//!
//! A `TerrainParameters` value is owned and edited by the caller; the pipeline
//! only ever reads it. Partial JSON files are accepted, missing fields take
//! their defaults.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::colour::{Colour, ColourRamp};
use crate::curve::{HeightCurve, MAX_HEIGHT_EXPONENT, MIN_HEIGHT_EXPONENT};
use crate::error::{Result, TerrainError};
use crate::grid::checked_area;

/// Smallest noise scale the generator will use.
pub const MIN_NOISE_SCALE: f32 = 0.0001;

/// How band thresholds feed the mesh geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantizationMode {
    /// Heights are used as generated; only the colour output is banded.
    #[default]
    Continuous,
    /// Heights snap to their band's upper threshold before meshing.
    Stepped,
}

/// Which artifacts a pipeline call should produce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSet {
    NoiseMap,
    #[default]
    ColourMap,
    Mesh,
    All,
}

impl OutputSet {
    pub fn all() -> &'static [Self] {
        &[Self::NoiseMap, Self::ColourMap, Self::Mesh, Self::All]
    }

    pub fn wants_noise_map(self) -> bool {
        matches!(self, Self::NoiseMap | Self::All)
    }

    pub fn wants_colour_map(self) -> bool {
        matches!(self, Self::ColourMap | Self::Mesh | Self::All)
    }

    pub fn wants_mesh(self) -> bool {
        matches!(self, Self::Mesh | Self::All)
    }
}

impl std::fmt::Display for OutputSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoiseMap => write!(f, "noise-map"),
            Self::ColourMap => write!(f, "colour-map"),
            Self::Mesh => write!(f, "mesh"),
            Self::All => write!(f, "all"),
        }
    }
}

/// Safe values substituted for the tunable noise/block controls when
/// `use_defaults` is on. The seed is never replaced.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultPreset {
    pub noise_scale: f32,
    pub octaves: u32,
    pub persistence: f32,
    pub lacunarity: f32,
    pub block_size: usize,
}

impl Default for DefaultPreset {
    fn default() -> Self {
        Self {
            noise_scale: 50.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            block_size: 10,
        }
    }
}

/// Full parameter set for one generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParameters {
    // Map size & detail
    pub width: usize,
    pub height: usize,
    /// Zoom of the noise pattern. Lower = bigger features.
    pub noise_scale: f32,

    // Terrain pattern
    /// Number of stacked noise layers.
    pub octaves: u32,
    /// Amplitude decay per octave (0.0-1.0)
    pub persistence: f32,
    /// Frequency growth per octave (>= 1.0)
    pub lacunarity: f32,
    /// Pans the pattern without changing its shape.
    pub offset: (f32, f32),
    /// Side of the square blocks used for the chunky look. 1 = off.
    pub block_size: usize,

    // Regions & colours
    pub region_band_count: usize,
    /// Upper bound of each band, ascending, last = 1.0.
    pub region_thresholds: Vec<f32>,
    pub region_colours: Vec<Colour>,
    /// Ramp used when the region table has to be rebuilt. `None` paints bands white.
    pub region_ramp: Option<ColourRamp>,
    pub reverse_ramp: bool,
    pub quantization_mode: QuantizationMode,

    // Height
    pub height_curve: HeightCurve,
    pub height_multiplier: f32,
    /// Shapes the multiplier, clamped to [0.1, 5].
    pub height_exponent: f32,

    // Seed
    pub seed: i64,
    /// Replace the noise/block controls with `defaults`, keeping the seed.
    pub use_defaults: bool,
    pub defaults: DefaultPreset,
}

impl Default for TerrainParameters {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            noise_scale: 50.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: (0.0, 0.0),
            block_size: 4,
            region_band_count: 2,
            region_thresholds: Vec::new(),
            region_colours: Vec::new(),
            region_ramp: Some(ColourRamp::terrain()),
            reverse_ramp: false,
            quantization_mode: QuantizationMode::Continuous,
            height_curve: HeightCurve::linear(),
            height_multiplier: 1.0,
            height_exponent: 1.0,
            seed: 0,
            use_defaults: true,
            defaults: DefaultPreset::default(),
        }
    }
}

impl TerrainParameters {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations that cannot produce a grid at all, including
    /// sizes whose cell count would overflow.
    pub fn validate(&self) -> Result<()> {
        if checked_area(self.width, self.height).is_none() {
            return Err(TerrainError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Copy with the default preset applied (if enabled) and every tunable
    /// clamped into a range the generators can't divide by zero or index out
    /// of bounds with.
    pub fn sanitized(&self) -> Self {
        let mut p = self.clone();

        if p.use_defaults {
            p.noise_scale = p.defaults.noise_scale;
            p.octaves = p.defaults.octaves;
            p.persistence = p.defaults.persistence;
            p.lacunarity = p.defaults.lacunarity;
            p.block_size = p.defaults.block_size;
        }

        if !(p.noise_scale >= MIN_NOISE_SCALE) {
            warn!("noise scale {} clamped to {}", p.noise_scale, MIN_NOISE_SCALE);
            p.noise_scale = MIN_NOISE_SCALE;
        }
        if !(p.lacunarity >= 1.0) {
            warn!("lacunarity {} clamped to 1.0", p.lacunarity);
            p.lacunarity = 1.0;
        }
        if !(0.0..=1.0).contains(&p.persistence) {
            let clamped = if p.persistence > 1.0 { 1.0 } else { 0.0 };
            warn!("persistence {} clamped to {}", p.persistence, clamped);
            p.persistence = clamped;
        }
        if p.block_size < 1 {
            warn!("block size 0 raised to 1");
            p.block_size = 1;
        }
        if p.region_band_count < 1 {
            warn!("region band count 0 raised to 1");
            p.region_band_count = 1;
        }
        if !(MIN_HEIGHT_EXPONENT..=MAX_HEIGHT_EXPONENT).contains(&p.height_exponent) {
            let clamped = if p.height_exponent > MAX_HEIGHT_EXPONENT {
                MAX_HEIGHT_EXPONENT
            } else {
                MIN_HEIGHT_EXPONENT
            };
            warn!("height exponent {} clamped to {}", p.height_exponent, clamped);
            p.height_exponent = clamped;
        }

        p
    }
}
