use crate::allocator::{Global, SurfaceAllocator};
use crate::error::SurfaceError;
use crate::info::{ImageFormat, detect};
use crate::limits::Limits;
use crate::raw;
use crate::surface::Surface;

/// Decode builder: image bytes plus optional limits and allocator.
///
/// PNG input (`\x89PNG` magic) is decoded and packed to `Rgb565Le`; anything
/// else must be an exact raw565 container. Inputs shorter than 16 bytes are
/// rejected.
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    allocator: &'a dyn SurfaceAllocator,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            allocator: &Global,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Allocate the decoded surface through `allocator`.
    pub fn with_allocator(mut self, allocator: &'a dyn SurfaceAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    pub fn decode(self) -> Result<Surface, SurfaceError> {
        match detect(self.data)? {
            ImageFormat::Png => decode_png(self.data, self.limits, self.allocator),
            ImageFormat::Raw565 => raw::decode(self.data, self.limits, self.allocator),
        }
    }
}

#[cfg(feature = "png")]
fn decode_png(
    data: &[u8],
    limits: Option<&Limits>,
    allocator: &dyn SurfaceAllocator,
) -> Result<Surface, SurfaceError> {
    crate::png::decode(data, limits, allocator)
}

#[cfg(not(feature = "png"))]
fn decode_png(
    _data: &[u8],
    _limits: Option<&Limits>,
    _allocator: &dyn SurfaceAllocator,
) -> Result<Surface, SurfaceError> {
    log::error!("PNG support not compiled in");
    Err(SurfaceError::UnsupportedFormat("PNG (png feature disabled)".into()))
}

/// Decode PNG or raw565 bytes into a new `Rgb565Le` surface.
pub fn decode(data: &[u8]) -> Result<Surface, SurfaceError> {
    DecodeRequest::new(data).decode()
}

/// Read a whole image file and [`decode`] it.
#[cfg(feature = "std")]
pub fn decode_file(path: impl AsRef<std::path::Path>) -> Result<Surface, SurfaceError> {
    let path = path.as_ref();
    let data = std::fs::read(path).inspect_err(|e| {
        log::error!("Unable to read image file '{}': {e}", path.display());
    })?;
    decode(&data)
}
