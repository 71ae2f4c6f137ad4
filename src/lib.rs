//! Procedural landmass generation library
//!
//! Deterministic height fields, colour-banded region maps, displacement meshes
//! and preview bitmaps from a single parameter set.

pub mod blocks;
pub mod colour;
pub mod curve;
pub mod error;
pub mod grid;
pub mod mesh;
pub mod noise_field;
pub mod params;
pub mod pipeline;
pub mod regen;
pub mod regions;
pub mod sections;
pub mod seeds;
pub mod texture;

pub use error::{Result, TerrainError};
pub use grid::{ColourField, Grid, HeightField};
pub use mesh::MeshArtifact;
pub use params::{OutputSet, QuantizationMode, TerrainParameters};
pub use pipeline::{generate, TerrainArtifacts};
