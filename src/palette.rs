//! Palette repacking: BGRA8888 source entries to the RGB888 layout of a PLTE chunk.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::IndexedPngError;

/// Maximum number of entries in a PNG palette.
pub const MAX_PALETTE_COLORS: usize = 256;

const SOURCE_ENTRY_SIZE: usize = 4;
const PLTE_ENTRY_SIZE: usize = 3;

/// Check a BGRA palette against `colors`, without touching its contents.
pub(crate) fn validate(bgra: &[u8], colors: usize) -> Result<(), IndexedPngError> {
    if bgra.len() % SOURCE_ENTRY_SIZE != 0 {
        return Err(IndexedPngError::InvalidPalette(alloc::format!(
            "palette entries must be BGRA8888 (4 bytes per color), got {} bytes",
            bgra.len()
        )));
    }
    if colors > MAX_PALETTE_COLORS {
        return Err(IndexedPngError::PaletteTooLarge { colors });
    }
    let needed = colors * SOURCE_ENTRY_SIZE;
    if needed > bgra.len() {
        return Err(IndexedPngError::PaletteTooShort {
            needed,
            actual: bgra.len(),
        });
    }
    Ok(())
}

/// Repack the first `colors` BGRA entries of `bgra` as RGB triples.
///
/// Alpha is discarded. Fails when `bgra` is not a whole number of 4-byte
/// entries, when `colors` exceeds 256, or when `bgra` holds fewer than
/// `colors` entries.
pub fn pack_palette(bgra: &[u8], colors: usize) -> Result<Vec<u8>, IndexedPngError> {
    validate(bgra, colors)?;
    let mut out = vec![0u8; colors * PLTE_ENTRY_SIZE];
    for (dst, src) in out
        .chunks_exact_mut(PLTE_ENTRY_SIZE)
        .zip(bgra.chunks_exact(SOURCE_ENTRY_SIZE))
    {
        dst[0] = src[2];
        dst[1] = src[1];
        dst[2] = src[0];
    }
    Ok(out)
}

/// Flatten typed BGRA entries into the byte layout [`pack_palette`] expects.
#[cfg(feature = "rgb")]
pub(crate) fn bgra_bytes(palette: &[rgb::alt::BGRA8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(palette.len() * SOURCE_ENTRY_SIZE);
    for c in palette {
        out.extend_from_slice(&[c.b, c.g, c.r, c.a]);
    }
    out
}
