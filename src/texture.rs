//! Raster encoding of height and colour grids.

use image::RgbImage;
use rayon::prelude::*;

use crate::colour::Colour;
use crate::grid::{ColourField, Grid, HeightField};

/// Encode a height field as grayscale, `RGB = (h, h, h)`.
pub fn encode_height(field: &HeightField) -> RgbImage {
    encode_with(field, |&h| Colour::gray(h).to_rgb8())
}

/// Encode a colour field, one pixel per cell.
pub fn encode_colours(field: &ColourField) -> RgbImage {
    encode_with(field, |c| c.to_rgb8())
}

/// Fill an image row by row in parallel. Each pixel only depends on its own
/// cell, so the result is identical to a sequential pass.
fn encode_with<T: Sync>(grid: &Grid<T>, to_rgb: impl Fn(&T) -> [u8; 3] + Sync) -> RgbImage {
    let mut img = RgbImage::new(grid.width as u32, grid.height as u32);
    if grid.is_empty() {
        return img;
    }

    let cells = grid.as_slice();
    let row_bytes = grid.width * 3;
    img.par_chunks_mut(row_bytes)
        .zip(cells.par_chunks(grid.width))
        .for_each(|(pixels, row)| {
            for (px, cell) in pixels.chunks_exact_mut(3).zip(row) {
                px.copy_from_slice(&to_rgb(cell));
            }
        });
    img
}
