//! Generation pipeline.
//!
//! Runs noise -> blocks -> regions -> (mesh | textures) for one parameter set
//! and hands back only the requested artifacts. Nothing is retained between
//! calls; displaying the results is up to the caller.

use std::time::Instant;

use image::RgbImage;
use log::debug;

use crate::blocks::apply_blocks;
use crate::curve::HeightCurveMapper;
use crate::error::Result;
use crate::grid::{ColourField, HeightField};
use crate::mesh::{build_mesh, MeshArtifact};
use crate::noise_field::{generate_noise_field, NoiseSettings};
use crate::params::{OutputSet, TerrainParameters};
use crate::regions::{classify_field, RegionTable};
use crate::texture::{encode_colours, encode_height};

/// Everything one pipeline call can produce. Fields outside the requested
/// output set are `None`.
#[derive(Clone, Debug, Default)]
pub struct TerrainArtifacts {
    /// Blocked, normalized heights (noise map output).
    pub height_field: Option<HeightField>,
    pub noise_bitmap: Option<RgbImage>,
    pub colour_field: Option<ColourField>,
    /// Colour bitmap; also the texture for the mesh.
    pub colour_bitmap: Option<RgbImage>,
    pub mesh: Option<MeshArtifact>,
    /// The region table that was actually used, after any rebuild.
    pub regions: Option<RegionTable>,
}

/// Run the full pipeline.
///
/// Parameters are validated before anything is allocated and sanitized
/// before use. Any error aborts the whole call; no partial artifacts escape.
pub fn generate(params: &TerrainParameters, outputs: OutputSet) -> Result<TerrainArtifacts> {
    params.validate()?;
    let params = params.sanitized();
    let start = Instant::now();

    let raw = generate_noise_field(params.width, params.height, &NoiseSettings::from_params(&params))?;
    let heights = apply_blocks(&raw, params.block_size);
    debug!(
        "noise field {}x{} ({} octaves, block {}) in {:?}",
        params.width,
        params.height,
        params.octaves,
        params.block_size,
        start.elapsed()
    );

    let table = RegionTable::from_params(&params)?;
    let classification = classify_field(&heights, &table, params.quantization_mode)?;

    let mesh = if outputs.wants_mesh() {
        let mapper = HeightCurveMapper::new(&params.height_curve, params.height_multiplier, params.height_exponent)?;
        let source = classification.geometry_source(&heights);
        let mesh = build_mesh(source, &mapper)?;
        debug!(
            "mesh: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Some(mesh)
    } else {
        None
    };

    let noise_bitmap = outputs.wants_noise_map().then(|| encode_height(&heights));
    let colour_bitmap = outputs
        .wants_colour_map()
        .then(|| encode_colours(&classification.colours));

    debug!("generated {} in {:?}", outputs, start.elapsed());

    Ok(TerrainArtifacts {
        height_field: outputs.wants_noise_map().then_some(heights),
        noise_bitmap,
        colour_field: outputs.wants_colour_map().then_some(classification.colours),
        colour_bitmap,
        mesh,
        regions: Some(table),
    })
}
