//! PNG chunk framing: length, type, payload, CRC-32(type ‖ payload).

use crate::checksum::crc32;
use crate::layout::write_u32_be;

/// Bytes a chunk adds around its payload (length + type + CRC).
pub(crate) const CHUNK_OVERHEAD: usize = 12;

/// Four-character PNG chunk type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ChunkType(pub [u8; 4]);

impl ChunkType {
    pub const IHDR: Self = Self(*b"IHDR");
    pub const PLTE: Self = Self(*b"PLTE");
    pub const IDAT: Self = Self(*b"IDAT");
    pub const IEND: Self = Self(*b"IEND");
}

/// Write one chunk at `offset` and return the offset just past its CRC.
///
/// The CRC is computed over the type and payload bytes as they sit in `out`
/// after being written. The caller guarantees room for
/// `payload.len() + CHUNK_OVERHEAD` bytes and a payload length that fits a
/// PNG chunk (at most 2^31 - 1 bytes).
pub(crate) fn write_chunk(out: &mut [u8], offset: usize, kind: ChunkType, payload: &[u8]) -> usize {
    let payload_start = begin_chunk(out, offset, kind, payload.len());
    let payload_end = payload_start + payload.len();
    out[payload_start..payload_end].copy_from_slice(payload);
    end_chunk(out, offset, payload_end)
}

/// Write the length and type of a chunk whose payload is filled in place.
///
/// Returns the payload offset. Finish with [`end_chunk`] once the
/// `payload_len` bytes at that offset are written.
pub(crate) fn begin_chunk(out: &mut [u8], offset: usize, kind: ChunkType, payload_len: usize) -> usize {
    let pos = write_u32_be(out, offset, payload_len as u32);
    out[pos..pos + 4].copy_from_slice(&kind.0);
    pos + 4
}

/// Append the CRC of the chunk starting at `offset` whose payload ends at `payload_end`.
pub(crate) fn end_chunk(out: &mut [u8], offset: usize, payload_end: usize) -> usize {
    let crc = crc32(&out[offset + 4..payload_end]);
    write_u32_be(out, payload_end, crc)
}
