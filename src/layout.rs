//! Fixed-width integer writers into a preallocated output buffer.
//!
//! Each writer returns the offset just past the field it wrote. The caller
//! sizes the buffer up front; writing past its end is a bug and panics.

#[inline]
pub(crate) fn write_u16_le(out: &mut [u8], offset: usize, value: u16) -> usize {
    out[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
    offset + 2
}

#[inline]
pub(crate) fn write_u16_be(out: &mut [u8], offset: usize, value: u16) -> usize {
    out[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
    offset + 2
}

#[inline]
pub(crate) fn write_u32_be(out: &mut [u8], offset: usize, value: u32) -> usize {
    out[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
    offset + 4
}
