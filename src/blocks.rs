//! Nearest-block downsampling for a chunky, low-poly look.
//!
//! The output keeps the input resolution; every cell takes the value of the
//! top-left cell of the block it falls in.

use crate::grid::HeightField;

/// Representative coordinate of `coord`'s block, clamped to the grid.
fn representative(coord: usize, block_size: usize, extent: usize) -> usize {
    ((coord / block_size) * block_size).min(extent - 1)
}

/// Replace each cell with its block's floor-aligned representative.
/// A block size of 0 is treated as 1; block size 1 returns an identical field.
pub fn apply_blocks(field: &HeightField, block_size: usize) -> HeightField {
    let block_size = block_size.max(1);
    if block_size == 1 {
        return field.clone();
    }

    let mut blocky = field.clone();
    for (x, y, value) in blocky.iter_mut() {
        let sx = representative(x, block_size, field.width);
        let sy = representative(y, block_size, field.height);
        *value = *field.get(sx, sy);
    }
    blocky
}
