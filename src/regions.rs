//! Height-to-band classification.
//!
//! A region table is an ordered list of bands, each with an upper height
//! threshold and a colour. A height belongs to the first band whose threshold
//! is at or above it. The last threshold is always 1.0, and any height that
//! still finds no band (rounding past 1.0, NaN) lands in the last band.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::colour::{band_colour, Colour, ColourRamp};
use crate::error::{Result, TerrainError};
use crate::grid::{ColourField, Grid, HeightField};
use crate::params::{QuantizationMode, TerrainParameters};

/// One height band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Inclusive upper bound of the band.
    pub threshold: f32,
    pub colour: Colour,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegionTable {
    regions: Vec<Region>,
}

/// Threshold of band `index` out of `count`: evenly spaced, rounded to two
/// decimals (ties to even), with the top band pinned to exactly 1.0.
pub fn threshold_for(index: usize, count: usize) -> f32 {
    if count <= 1 || index + 1 >= count {
        return 1.0;
    }
    let t = (index + 1) as f32 / count as f32;
    (t * 100.0).round_ties_even() / 100.0
}

impl RegionTable {
    /// Build from explicit thresholds and colours, checking ordering and the
    /// catch-all top band.
    pub fn from_parts(thresholds: &[f32], colours: &[Colour]) -> Result<Self> {
        if thresholds.is_empty() {
            return Err(TerrainError::EmptyRegionTable);
        }
        if thresholds.len() != colours.len() {
            return Err(TerrainError::MismatchedRegions {
                thresholds: thresholds.len(),
                colours: colours.len(),
            });
        }
        if let Some(index) = (1..thresholds.len()).find(|&i| !(thresholds[i] >= thresholds[i - 1])) {
            return Err(TerrainError::UnorderedThresholds { index });
        }
        let last = thresholds[thresholds.len() - 1];
        if last != 1.0 {
            return Err(TerrainError::LastThresholdNotOne(last));
        }

        Ok(Self {
            regions: thresholds
                .iter()
                .zip(colours)
                .map(|(&threshold, &colour)| Region { threshold, colour })
                .collect(),
        })
    }

    /// Fresh table of `count` evenly spaced bands coloured from the ramp.
    pub fn rebuild(count: usize, ramp: Option<&ColourRamp>, reverse: bool) -> Self {
        let count = count.max(1);
        let regions = (0..count)
            .map(|i| Region {
                threshold: threshold_for(i, count),
                colour: band_colour(ramp, i, count, reverse),
            })
            .collect();
        Self { regions }
    }

    /// Resize to `count` bands with recomputed thresholds. Existing colours are
    /// kept by index; bands that didn't exist before are sampled from the ramp.
    pub fn rebuild_keep_colours(&self, count: usize, ramp: Option<&ColourRamp>, reverse: bool) -> Self {
        let count = count.max(1);
        let regions = (0..count)
            .map(|i| Region {
                threshold: threshold_for(i, count),
                colour: self
                    .regions
                    .get(i)
                    .map(|r| r.colour)
                    .unwrap_or_else(|| band_colour(ramp, i, count, reverse)),
            })
            .collect();
        Self { regions }
    }

    /// Recolour every band from the ramp, leaving thresholds alone.
    pub fn apply_ramp(&mut self, ramp: Option<&ColourRamp>, reverse: bool) {
        let count = self.regions.len();
        for (i, region) in self.regions.iter_mut().enumerate() {
            region.colour = band_colour(ramp, i, count, reverse);
        }
    }

    /// Resolve the table a pipeline call should use. A table whose length
    /// doesn't match the declared band count is rebuilt (keeping whatever
    /// colours were supplied); a well-sized table is validated as given.
    pub fn from_params(params: &TerrainParameters) -> Result<Self> {
        let count = params.region_band_count.max(1);
        let ramp = params.region_ramp.as_ref();

        if params.region_thresholds.len() == count && params.region_colours.len() == count {
            return Self::from_parts(&params.region_thresholds, &params.region_colours);
        }

        debug!(
            "rebuilding region table: {} thresholds, {} colours, {} bands declared",
            params.region_thresholds.len(),
            params.region_colours.len(),
            count
        );
        let existing = Self {
            regions: params
                .region_colours
                .iter()
                .map(|&colour| Region { threshold: 1.0, colour })
                .collect(),
        };
        Ok(existing.rebuild_keep_colours(count, ramp, params.reverse_ramp))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn thresholds(&self) -> Vec<f32> {
        self.regions.iter().map(|r| r.threshold).collect()
    }

    pub fn colours(&self) -> Vec<Colour> {
        self.regions.iter().map(|r| r.colour).collect()
    }

    /// Index of the band `h` falls in. Never fails on a non-empty table.
    pub fn classify(&self, h: f32) -> usize {
        self.regions
            .iter()
            .position(|r| h <= r.threshold)
            .unwrap_or(self.regions.len().saturating_sub(1))
    }

    pub fn band(&self, index: usize) -> &Region {
        &self.regions[index]
    }
}

/// Output of classifying a whole height field.
#[derive(Clone, Debug)]
pub struct Classification {
    /// Band index per cell.
    pub bands: Grid<usize>,
    pub colours: ColourField,
    /// Heights snapped to their band threshold. Only produced in stepped mode.
    pub quantized: Option<HeightField>,
}

impl Classification {
    /// Height field that should feed the mesh: quantized if available,
    /// otherwise the original.
    pub fn geometry_source<'a>(&'a self, original: &'a HeightField) -> &'a HeightField {
        self.quantized.as_ref().unwrap_or(original)
    }
}

/// Classify every cell. Colour output is banded in both modes; stepped mode
/// additionally produces a quantized height field for the mesh.
pub fn classify_field(field: &HeightField, table: &RegionTable, mode: QuantizationMode) -> Result<Classification> {
    if table.is_empty() {
        return Err(TerrainError::EmptyRegionTable);
    }

    let bands = field.map(|&h| table.classify(h));
    let colours = bands.map(|&i| table.band(i).colour);
    let quantized = match mode {
        QuantizationMode::Continuous => None,
        QuantizationMode::Stepped => Some(bands.map(|&i| table.band(i).threshold)),
    };

    Ok(Classification { bands, colours, quantized })
}
