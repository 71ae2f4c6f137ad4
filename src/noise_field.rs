use log::debug;
use noise::{NoiseFn, Perlin};
use rayon::prelude::*;

use crate::error::{Result, TerrainError};
use crate::grid::{checked_area, HeightField};
use crate::params::{TerrainParameters, MIN_NOISE_SCALE};
use crate::seeds::{permutation_seed, OctaveOffsets};

// =============================================================================
// NOISE SETTINGS
// =============================================================================

/// Height of every cell when the raw field has no contrast to normalize
/// (zero octaves, or a single cell).
pub const FLAT_HEIGHT: f32 = 0.0;

/// Parameters for fractal noise synthesis
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseSettings {
    pub seed: i64,
    /// Zoom of the pattern (lower = larger features)
    pub scale: f32,
    /// Number of noise octaves
    pub octaves: u32,
    /// Amplitude decay per octave (0.0-1.0)
    pub persistence: f32,
    /// Frequency multiplier per octave
    pub lacunarity: f32,
    /// Pan applied to every octave
    pub offset: (f32, f32),
}

impl NoiseSettings {
    pub fn from_params(params: &TerrainParameters) -> Self {
        Self {
            seed: params.seed,
            scale: params.noise_scale,
            octaves: params.octaves,
            persistence: params.persistence,
            lacunarity: params.lacunarity,
            offset: params.offset,
        }
    }
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            scale: 50.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: (0.0, 0.0),
        }
    }
}

// =============================================================================
// GENERATION
// =============================================================================

/// Generate a fractal height field normalized to [0, 1].
///
/// Octave `k` samples Perlin noise at frequency `lacunarity^k` with amplitude
/// `persistence^k`, around the centre of the map so that changing the scale
/// zooms in place. The summed field is remapped by its global min/max, which
/// keeps the relative contrast between distant cells intact.
pub fn generate_noise_field(
    width: usize,
    height: usize,
    settings: &NoiseSettings,
) -> Result<HeightField> {
    if checked_area(width, height).is_none() {
        return Err(TerrainError::InvalidDimensions { width, height });
    }

    let raw = accumulate_octaves(width, height, settings);
    Ok(normalize_global(raw))
}

/// Sum all octaves into an unnormalized grid. Rows are independent, so they
/// are filled in parallel; each cell's octave sum runs in a fixed order.
fn accumulate_octaves(width: usize, height: usize, settings: &NoiseSettings) -> HeightField {
    let scale = settings.scale.max(MIN_NOISE_SCALE) as f64;
    let persistence = settings.persistence as f64;
    let lacunarity = settings.lacunarity as f64;
    let perlin = Perlin::new(permutation_seed(settings.seed));
    let offsets = OctaveOffsets::new(settings.seed, settings.octaves, settings.offset);

    let half_w = width as f64 / 2.0;
    let half_h = height as f64 / 2.0;

    let mut raw = HeightField::new_with(width, height, 0.0f32);
    raw.as_mut_slice()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                let mut amplitude = 1.0;
                let mut frequency = 1.0;
                let mut total = 0.0;

                for &(ox, oy) in offsets.iter() {
                    let sx = (x as f64 - half_w) / scale * frequency + ox;
                    let sy = (y as f64 - half_h) / scale * frequency + oy;
                    total += perlin.get([sx, sy]) * amplitude;

                    amplitude *= persistence;
                    frequency *= lacunarity;
                }

                *cell = total as f32;
            }
        });

    raw
}

/// Remap every cell by the global min/max of the whole grid.
fn normalize_global(mut field: HeightField) -> HeightField {
    // min/max are associative and commutative, so the parallel reduce is
    // independent of how rayon splits the work.
    let (min_val, max_val) = field
        .as_slice()
        .par_iter()
        .fold(
            || (f32::MAX, f32::MIN),
            |(lo, hi), &v| (lo.min(v), hi.max(v)),
        )
        .reduce(
            || (f32::MAX, f32::MIN),
            |(lo1, hi1), (lo2, hi2)| (lo1.min(lo2), hi1.max(hi2)),
        );

    let range = max_val - min_val;
    if !(range > 0.0) {
        debug!("noise field has no contrast, flattening to {}", FLAT_HEIGHT);
        field.fill(FLAT_HEIGHT);
        return field;
    }

    field
        .as_mut_slice()
        .par_iter_mut()
        .for_each(|v| *v = ((*v - min_val) / range).clamp(0.0, 1.0));
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(seed: i64, octaves: u32) -> NoiseSettings {
        NoiseSettings {
            seed,
            octaves,
            scale: 13.7,
            ..Default::default()
        }
    }

    #[test]
    fn test_deterministic() {
        let a = generate_noise_field(48, 32, &settings(42, 5)).unwrap();
        let b = generate_noise_field(48, 32, &settings(42, 5)).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn test_seed_changes_field() {
        let a = generate_noise_field(32, 32, &settings(1, 4)).unwrap();
        let b = generate_noise_field(32, 32, &settings(2, 4)).unwrap();
        assert_ne!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn test_normalized_to_full_range() {
        let field = generate_noise_field(64, 64, &settings(7, 4)).unwrap();
        let (lo, hi) = field.min_max().unwrap();
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 1.0);
        assert!(field.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let field = generate_noise_field(4, 4, &settings(7, 0)).unwrap();
        assert!(field.as_slice().iter().all(|&v| v == FLAT_HEIGHT));
    }

    #[test]
    fn test_single_cell_is_flat() {
        let field = generate_noise_field(1, 1, &settings(7, 3)).unwrap();
        assert_eq!(field.as_slice(), &[FLAT_HEIGHT]);
    }

    #[test]
    fn test_zero_scale_does_not_blow_up() {
        let s = NoiseSettings { scale: 0.0, ..settings(3, 3) };
        let field = generate_noise_field(16, 16, &s).unwrap();
        assert!(field.as_slice().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            generate_noise_field(0, 5, &settings(1, 1)),
            Err(TerrainError::InvalidDimensions { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_offset_pans_pattern() {
        // At scale 2 a pan of one sample unit is two columns.
        let base = NoiseSettings { scale: 2.0, octaves: 1, ..Default::default() };
        let panned = NoiseSettings { offset: (1.0, 0.0), ..base.clone() };
        let a = accumulate_octaves(8, 4, &base);
        let b = accumulate_octaves(8, 4, &panned);
        for y in 0..4 {
            for x in 0..6 {
                assert!((a.get(x + 2, y) - b.get(x, y)).abs() < 1e-5);
            }
        }
    }
}
