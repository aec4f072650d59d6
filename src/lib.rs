//! # zenindexed
//!
//! Indexed-color PNG encoder that needs no deflate implementation.
//!
//! Pixel data is stored in uncompressed ("stored") deflate blocks, one per
//! scanline, inside a minimal zlib stream. The output is a complete PNG:
//! signature, IHDR, PLTE, a single IDAT, and IEND. Files are larger than a
//! compressing encoder would produce, but every byte is computed here with
//! nothing more than CRC-32 and Adler-32.
//!
//! ## Input
//!
//! - **Palette**: BGRA8888 entries (4 bytes each, alpha discarded), up to 256.
//! - **Indexes**: one byte per pixel, row-major, exactly `width * height` bytes.
//! - **Width**: at most 65535.
//!
//! ## Hi-attribute images
//!
//! Images drawn with per-tile sub-palettes can be exported as two parts: the
//! PNG with each index reduced modulo the sub-palette size
//! ([`IndexMode::HiAttribute`]), and an attribute map holding one sub-palette
//! selector per tile ([`reduce_to_attribute_map`]).
//!
//! ## Non-Goals
//!
//! - Compression (use a real deflate encoder if file size matters)
//! - Bit depths other than 8, color types other than indexed
//! - Decoding
//!
//! ## Usage
//!
//! ```
//! use zenindexed::{EncodeRequest, IndexMode, Unstoppable};
//!
//! // BGRA: red, green
//! let palette = [0, 0, 255, 255, 0, 255, 0, 255];
//! let indexes = [0, 1, 1, 0];
//!
//! let png = zenindexed::encode_indexed_png(2, 2, &palette, 2, &indexes, Unstoppable)?;
//! assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
//!
//! // Same image with indices folded into 2-color sub-palettes
//! let png = EncodeRequest::new()
//!     .with_index_mode(IndexMode::hi_attribute(2)?)
//!     .encode(2, 2, &palette, 2, &indexes, Unstoppable)?;
//! # let _ = png;
//! # Ok::<(), zenindexed::IndexedPngError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod attribute;
mod chunk;
mod encode;
mod error;
mod layout;
mod limits;
mod zlib;

pub mod checksum;
pub mod palette;

#[cfg(feature = "base64")]
mod data_uri;

use alloc::vec::Vec;

// Re-exports
pub use attribute::reduce_to_attribute_map;
pub use encode::{EncodeRequest, IndexMode, MAX_WIDTH};
pub use enough::{Stop, Unstoppable};
pub use error::IndexedPngError;
pub use limits::Limits;

#[cfg(feature = "base64")]
pub use data_uri::{attribute_map_data_uri, png_data_uri};

/// Encode an indexed PNG with default settings.
///
/// See [`EncodeRequest::encode`].
pub fn encode_indexed_png(
    width: u32,
    height: u32,
    palette: &[u8],
    palette_colors: usize,
    indexes: &[u8],
    stop: impl Stop,
) -> Result<Vec<u8>, IndexedPngError> {
    EncodeRequest::new().encode(width, height, palette, palette_colors, indexes, stop)
}

/// Encode an indexed PNG and wrap it as a `data:image/png;base64,...` URI.
#[cfg(feature = "base64")]
pub fn encode_indexed_png_data_uri(
    width: u32,
    height: u32,
    palette: &[u8],
    palette_colors: usize,
    indexes: &[u8],
    stop: impl Stop,
) -> Result<alloc::string::String, IndexedPngError> {
    let png = encode_indexed_png(width, height, palette, palette_colors, indexes, stop)?;
    Ok(png_data_uri(&png))
}
