use alloc::string::String;
use enough::StopReason;

/// Errors from indexed PNG encoding and attribute map reduction.
///
/// Every variant is raised before the output buffer is allocated.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum IndexedPngError {
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    #[error("PNG palettes are limited to 256 entries, got {colors}")]
    PaletteTooLarge { colors: usize },

    #[error("palette too short: need {needed} bytes, got {actual}")]
    PaletteTooShort { needed: usize, actual: usize },

    #[error("image is wider than maximum supported width of {max} (got {width})")]
    WidthTooLarge { width: u32, max: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("pixel index count mismatch: expected {expected}, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid tile grid: {0}")]
    InvalidTileGrid(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for IndexedPngError {
    fn from(r: StopReason) -> Self {
        IndexedPngError::Cancelled(r)
    }
}
