//! Indexed PNG encoder: signature, IHDR, PLTE, one IDAT, IEND.

use alloc::vec;
use alloc::vec::Vec;
use core::num::NonZeroU16;
use enough::Stop;

use crate::chunk::{CHUNK_OVERHEAD, ChunkType, begin_chunk, end_chunk, write_chunk};
use crate::error::IndexedPngError;
use crate::layout::write_u32_be;
use crate::limits::Limits;
use crate::{palette, zlib};

/// Widest image the stored-block framing supports.
pub const MAX_WIDTH: u32 = 65_535;

/// PNG's limit for image dimensions and chunk lengths.
const MAX_PNG_U31: u32 = 0x7FFF_FFFF;

pub(crate) const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

const IHDR_SIZE: usize = 13;
const BIT_DEPTH_8: u8 = 8;
const COLOR_TYPE_INDEXED: u8 = 3;
const COMPRESSION_METHOD_DEFLATE: u8 = 0;
const FILTER_METHOD_ADAPTIVE: u8 = 0;
const INTERLACE_NONE: u8 = 0;

/// How palette indices are transformed before they are written.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IndexMode {
    /// Indices are written unchanged.
    #[default]
    Direct,
    /// Hi-attribute images: each index is reduced modulo the per-tile
    /// palette size, so the PNG holds only the color within its sub-palette.
    HiAttribute { colors_per_palette: NonZeroU16 },
}

impl IndexMode {
    /// Hi-attribute mode with `colors_per_palette` colors per sub-palette.
    pub fn hi_attribute(colors_per_palette: u16) -> Result<Self, IndexedPngError> {
        let colors_per_palette = NonZeroU16::new(colors_per_palette).ok_or_else(|| {
            IndexedPngError::InvalidConfig("hi-attribute palette size must be non-zero".into())
        })?;
        Ok(Self::HiAttribute { colors_per_palette })
    }

    /// Copy `src` into `dst` (same length), applying the index transform.
    pub(crate) fn apply(self, src: &[u8], dst: &mut [u8]) {
        match self {
            Self::Direct => dst.copy_from_slice(src),
            Self::HiAttribute { colors_per_palette } => {
                let n = colors_per_palette.get();
                for (d, &s) in dst.iter_mut().zip(src) {
                    *d = (u16::from(s) % n) as u8;
                }
            }
        }
    }
}

/// Builder for an indexed PNG encode.
///
/// ```
/// use zenindexed::{EncodeRequest, IndexMode, Unstoppable};
///
/// let palette = [0, 0, 255, 255, 0, 255, 0, 255]; // BGRA: red, green
/// let png = EncodeRequest::new()
///     .with_index_mode(IndexMode::Direct)
///     .encode(2, 1, &palette, 2, &[0, 1], Unstoppable)?;
/// assert_eq!(&png[1..4], b"PNG");
/// # Ok::<(), zenindexed::IndexedPngError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct EncodeRequest<'a> {
    mode: IndexMode,
    limits: Option<&'a Limits>,
}

impl<'a> EncodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index_mode(mut self, mode: IndexMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Encode a flat row-major buffer of palette indices.
    ///
    /// `palette` holds BGRA8888 entries (alpha is dropped); only the first
    /// `palette_colors` entries are written. `indexes` must hold exactly
    /// `width * height` bytes.
    pub fn encode(
        &self,
        width: u32,
        height: u32,
        palette: &[u8],
        palette_colors: usize,
        indexes: &[u8],
        stop: impl Stop,
    ) -> Result<Vec<u8>, IndexedPngError> {
        self.validate(width, height, palette, palette_colors)?;
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
        let rows = (0..height as usize).map(move |y| &indexes[y * w..y * w + w]);
        self.encode_rows(width, height, palette, palette_colors, rows, &stop)
    }

    /// Encode with a typed BGRA palette; every entry is written.
    #[cfg(feature = "rgb")]
    pub fn encode_bgra(
        &self,
        width: u32,
        height: u32,
        palette: &[rgb::alt::BGRA8],
        indexes: &[u8],
        stop: impl Stop,
    ) -> Result<Vec<u8>, IndexedPngError> {
        if palette.len() > palette::MAX_PALETTE_COLORS {
            return Err(IndexedPngError::PaletteTooLarge {
                colors: palette.len(),
            });
        }
        let bytes = palette::bgra_bytes(palette);
        self.encode(width, height, &bytes, palette.len(), indexes, stop)
    }

    /// Encode an index image, honoring its stride.
    #[cfg(feature = "imgref")]
    pub fn encode_img(
        &self,
        img: imgref::ImgRef<'_, u8>,
        palette: &[u8],
        palette_colors: usize,
        stop: impl Stop,
    ) -> Result<Vec<u8>, IndexedPngError> {
        let width = u32::try_from(img.width()).unwrap_or(u32::MAX);
        let height = u32::try_from(img.height()).unwrap_or(u32::MAX);
        self.validate(width, height, palette, palette_colors)?;
        self.encode_rows(width, height, palette, palette_colors, img.rows(), &stop)
    }

    fn validate(
        &self,
        width: u32,
        height: u32,
        palette: &[u8],
        palette_colors: usize,
    ) -> Result<(), IndexedPngError> {
        palette::validate(palette, palette_colors)?;
        if width > MAX_WIDTH {
            return Err(IndexedPngError::WidthTooLarge {
                width,
                max: MAX_WIDTH,
            });
        }
        if height > MAX_PNG_U31 {
            return Err(IndexedPngError::DimensionsTooLarge { width, height });
        }
        if let Some(limits) = self.limits {
            limits.check(width, height)?;
        }
        Ok(())
    }

    fn encode_rows<'r>(
        &self,
        width: u32,
        height: u32,
        palette: &[u8],
        palette_colors: usize,
        rows: impl Iterator<Item = &'r [u8]>,
        stop: &dyn Stop,
    ) -> Result<Vec<u8>, IndexedPngError> {
        let too_large = IndexedPngError::DimensionsTooLarge { width, height };
        let idat_len = zlib::framed_len(width as usize, height as usize).ok_or(too_large)?;
        if idat_len > MAX_PNG_U31 as usize {
            return Err(IndexedPngError::DimensionsTooLarge { width, height });
        }
        let plte_len = palette_colors * 3;
        let total = [
            IHDR_SIZE + CHUNK_OVERHEAD,
            plte_len + CHUNK_OVERHEAD,
            idat_len,
            CHUNK_OVERHEAD, // IDAT framing
            CHUNK_OVERHEAD, // IEND
        ]
        .iter()
        .try_fold(PNG_SIGNATURE.len(), |acc, &n| acc.checked_add(n))
        .ok_or(IndexedPngError::DimensionsTooLarge { width, height })?;
        if let Some(limits) = self.limits {
            limits.check_memory(total)?;
        }

        stop.check()?;

        let plte = palette::pack_palette(palette, palette_colors)?;

        let mut out = vec![0u8; total];
        out[..PNG_SIGNATURE.len()].copy_from_slice(&PNG_SIGNATURE);
        let mut pos = PNG_SIGNATURE.len();
        pos = write_chunk(&mut out, pos, ChunkType::IHDR, &ihdr_payload(width, height));
        pos = write_chunk(&mut out, pos, ChunkType::PLTE, &plte);

        // IDAT payload is framed in place
        let idat_at = pos;
        let idat_start = begin_chunk(&mut out, idat_at, ChunkType::IDAT, idat_len);
        let idat_end = idat_start + idat_len;
        zlib::frame_rows(
            &mut out[idat_start..idat_end],
            rows,
            width,
            height,
            self.mode,
            stop,
        )?;
        pos = end_chunk(&mut out, idat_at, idat_end);

        pos = write_chunk(&mut out, pos, ChunkType::IEND, &[]);
        debug_assert_eq!(pos, total);

        Ok(out)
    }
}

fn ihdr_payload(width: u32, height: u32) -> [u8; IHDR_SIZE] {
    let mut ihdr = [0u8; IHDR_SIZE];
    let mut pos = write_u32_be(&mut ihdr, 0, width);
    pos = write_u32_be(&mut ihdr, pos, height);
    ihdr[pos..].copy_from_slice(&[
        BIT_DEPTH_8,
        COLOR_TYPE_INDEXED,
        COMPRESSION_METHOD_DEFLATE,
        FILTER_METHOD_ADAPTIVE,
        INTERLACE_NONE,
    ]);
    ihdr
}
