//! Attribute maps for hi-attribute images: one sub-palette selector per tile.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::IndexedPngError;

/// Reduce per-pixel palette indices to one byte per `tile_width` x `tile_height` tile.
///
/// Each output byte is the index of the tile's top-left pixel divided by
/// `colors_per_palette`, i.e. which sub-palette that pixel draws from. Other
/// pixels in the tile are not consulted. Output is row-major,
/// `(width / tile_width) * (height / tile_height)` bytes.
///
/// The image must divide evenly into tiles, and `indexes` must hold exactly
/// `width * height` bytes.
///
/// # Errors
///
/// [`IndexedPngError::InvalidTileGrid`] for a zero or non-dividing tile size,
/// [`IndexedPngError::InvalidConfig`] for zero `colors_per_palette`,
/// [`IndexedPngError::PixelCountMismatch`] for a wrong-length `indexes`.
pub fn reduce_to_attribute_map(
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
    indexes: &[u8],
    colors_per_palette: u16,
) -> Result<Vec<u8>, IndexedPngError> {
    if tile_width == 0 || tile_height == 0 {
        return Err(IndexedPngError::InvalidTileGrid(alloc::format!(
            "tile size {tile_width}x{tile_height} must be non-zero"
        )));
    }
    if width % tile_width != 0 || height % tile_height != 0 {
        return Err(IndexedPngError::InvalidTileGrid(alloc::format!(
            "image {width}x{height} is not a whole number of {tile_width}x{tile_height} tiles"
        )));
    }
    if colors_per_palette == 0 {
        return Err(IndexedPngError::InvalidConfig(
            "colors per palette must be non-zero".into(),
        ));
    }
    let w = width as usize;
    let expected = w
        .checked_mul(height as usize)
        .ok_or(IndexedPngError::DimensionsTooLarge { width, height })?;
    if indexes.len() != expected {
        return Err(IndexedPngError::PixelCountMismatch {
            expected,
            actual: indexes.len(),
        });
    }

    let tiles_x = (width / tile_width) as usize;
    let tiles_y = (height / tile_height) as usize;
    let (tw, th) = (tile_width as usize, tile_height as usize);

    let mut map = vec![0u8; tiles_x * tiles_y];
    for (ty, map_row) in map.chunks_exact_mut(tiles_x.max(1)).take(tiles_y).enumerate() {
        let row_start = ty * th * w;
        for (tx, selector) in map_row.iter_mut().enumerate() {
            let index = indexes[row_start + tx * tw];
            *selector = (u16::from(index) / colors_per_palette) as u8;
        }
    }
    Ok(map)
}
