//! CRC-32 (PNG chunk checksums) and Adler-32 (zlib trailer).

/// Byte-at-a-time lookup table for CRC-32/ISO-HDLC (polynomial 0xEDB88320, reflected).
///
/// Built at compile time, so sharing it between threads needs no initialization guard.
#[derive(Clone, Debug)]
pub struct Crc32Table([u32; 256]);

/// The process-wide CRC-32 table used by [`crc32`].
pub static CRC32_TABLE: Crc32Table = Crc32Table::new();

impl Crc32Table {
    pub const fn new() -> Self {
        let mut table = [0u32; 256];
        let mut n = 0;
        while n < 256 {
            let mut c = n as u32;
            let mut k = 0;
            while k < 8 {
                c = if c & 1 != 0 {
                    0xEDB8_8320 ^ (c >> 1)
                } else {
                    c >> 1
                };
                k += 1;
            }
            table[n] = c;
            n += 1;
        }
        Self(table)
    }

    /// CRC-32 of `data` with all-ones initial value and final XOR.
    pub fn checksum(&self, data: &[u8]) -> u32 {
        let mut crc = 0xFFFF_FFFFu32;
        for &byte in data {
            let idx = ((crc ^ byte as u32) & 0xFF) as usize;
            crc = (crc >> 8) ^ self.0[idx];
        }
        crc ^ 0xFFFF_FFFF
    }
}

impl Default for Crc32Table {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculate the CRC-32 used by PNG, zlib and gzip.
#[inline]
pub fn crc32(data: &[u8]) -> u32 {
    CRC32_TABLE.checksum(data)
}

const MOD_ADLER: u32 = 65_521;

/// Streaming Adler-32 accumulator (RFC 1950).
///
/// Feed it in as many pieces as convenient; the result only depends on
/// the concatenation of everything passed to [`Adler32::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Adler32 {
    a: u32,
    b: u32,
}

impl Adler32 {
    pub fn new() -> Self {
        Self { a: 1, b: 0 }
    }

    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.a = (self.a + byte as u32) % MOD_ADLER;
            self.b = (self.b + self.a) % MOD_ADLER;
        }
    }

    /// The two running sums `(a, b)`. Both are always below 65521.
    pub fn sums(&self) -> (u16, u16) {
        (self.a as u16, self.b as u16)
    }

    /// Packed checksum `(b << 16) | a`.
    pub fn finish(&self) -> u32 {
        (self.b << 16) | self.a
    }
}

impl Default for Adler32 {
    fn default() -> Self {
        Self::new()
    }
}
