//! Zlib stream built from uncompressed (stored) deflate blocks, one per scanline.
//!
//! Layout:
//!
//! ```text
//! 78 01                          zlib header (deflate, 32K window, fastest, no dict)
//! per scanline:
//!   BFINAL                       1 on the last block of the stream, else 0
//!   LEN  (u16 LE)                filter byte + row bytes
//!   NLEN (u16 LE)                LEN ^ 0xFFFF
//!   00                           PNG filter type: none
//!   row bytes                    `width` palette indices
//! Adler-32 (b, a as u16 BE)      over filter + row bytes only
//! ```
//!
//! A scanline longer than 65535 bytes (only possible at width 65535) is split
//! across consecutive stored blocks.

use alloc::vec;
use enough::Stop;

use crate::checksum::Adler32;
use crate::encode::IndexMode;
use crate::error::IndexedPngError;
use crate::layout::{write_u16_be, write_u16_le};

pub(crate) const ZLIB_HEADER: [u8; 2] = [0x78, 0x01];
const ZLIB_TRAILER_SIZE: usize = 4;
const STORED_HEADER_SIZE: usize = 5;
const MAX_STORED_LEN: usize = 0xFFFF;

pub(crate) const FILTER_NONE: u8 = 0;

const BFINAL_NO: u8 = 0;
const BFINAL_YES: u8 = 1;

/// Number of stored blocks needed for one scanline of `width` pixels.
fn blocks_per_row(width: usize) -> usize {
    (width + 1).div_ceil(MAX_STORED_LEN)
}

/// Exact byte length of the framed stream, or `None` on overflow.
pub(crate) fn framed_len(width: usize, height: usize) -> Option<usize> {
    let row = (width + 1).checked_add(blocks_per_row(width) * STORED_HEADER_SIZE)?;
    row.checked_mul(height)?
        .checked_add(ZLIB_HEADER.len() + ZLIB_TRAILER_SIZE)
}

/// Frame `height` rows of palette indices as a complete zlib stream into `out`.
///
/// `out` must be exactly [`framed_len`] bytes, and `rows` must yield at least
/// `height` slices of exactly `width` bytes.
pub(crate) fn frame_rows<'r, I>(
    out: &mut [u8],
    rows: I,
    width: u32,
    height: u32,
    mode: IndexMode,
    stop: &dyn Stop,
) -> Result<(), IndexedPngError>
where
    I: Iterator<Item = &'r [u8]>,
{
    let w = width as usize;
    let h = height as usize;
    debug_assert_eq!(Some(out.len()), framed_len(w, h));

    out[..ZLIB_HEADER.len()].copy_from_slice(&ZLIB_HEADER);
    let mut pos = ZLIB_HEADER.len();

    let mut adler = Adler32::new();
    let mut scanline = vec![0u8; w + 1];
    let mut rows_written = 0usize;
    for (y, row) in rows.take(h).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        scanline[0] = FILTER_NONE;
        mode.apply(&row[..w], &mut scanline[1..]);
        adler.update(&scanline);

        let last_row = y + 1 == h;
        let mut blocks = scanline.chunks(MAX_STORED_LEN).peekable();
        while let Some(block) = blocks.next() {
            let is_final = last_row && blocks.peek().is_none();
            pos = write_stored_block(out, pos, block, is_final);
        }
        rows_written += 1;
    }
    debug_assert_eq!(rows_written, h);

    let (a, b) = adler.sums();
    pos = write_u16_be(out, pos, b);
    pos = write_u16_be(out, pos, a);
    debug_assert_eq!(pos, out.len());

    Ok(())
}

/// Write one stored block. `data` is at most 65535 bytes.
fn write_stored_block(out: &mut [u8], mut pos: usize, data: &[u8], is_final: bool) -> usize {
    out[pos] = if is_final { BFINAL_YES } else { BFINAL_NO };
    pos += 1;
    let len = data.len() as u16;
    pos = write_u16_le(out, pos, len);
    pos = write_u16_le(out, pos, len ^ 0xFFFF);
    out[pos..pos + data.len()].copy_from_slice(data);
    pos + data.len()
}
