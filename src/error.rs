use alloc::string::String;

/// Errors from surface creation, blitting, conversion, and the image codec.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SurfaceError {
    #[error("invalid surface: {0}")]
    InvalidSurface(String),

    #[error("surface allocation failed ({bytes} bytes)")]
    AllocationFailure { bytes: usize },

    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    #[error("copy extent {dest_width}x{dest_height} exceeds unscaled source {source_width}x{source_height}")]
    RegionOutOfBounds {
        source_width: u32,
        source_height: u32,
        dest_width: u32,
        dest_height: u32,
    },

    #[error("image data too short: {len} bytes")]
    InputTooShort { len: usize },

    #[error("unrecognized image format")]
    UnrecognizedFormat,

    #[error("PNG decoding failed: {0}")]
    Png(String),

    #[cfg(feature = "std")]
    #[error("image file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}
