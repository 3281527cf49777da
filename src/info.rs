use crate::error::SurfaceError;
use crate::raw;

/// PNG signature prefix checked by the decoder.
pub(crate) const PNG_MAGIC: [u8; 4] = [0x89, b'P', b'N', b'G'];

/// Inputs shorter than this are rejected outright.
pub(crate) const MIN_IMAGE_LEN: usize = 16;

/// Container format detected from the image bytes.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    /// `u16` width, `u16` height (little-endian), then RGB565 LE pixels.
    Raw565,
}

/// Dimensions and container of an encoded image, read without decoding
/// pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
}

impl ImageInfo {
    /// Probe image bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self, SurfaceError> {
        match detect(data)? {
            ImageFormat::Png => {
                // Signature (8) + IHDR length (4) + "IHDR" (4) + width + height.
                let ihdr = data.get(8..24).ok_or(SurfaceError::InputTooShort { len: data.len() })?;
                if &ihdr[4..8] != b"IHDR" {
                    return Err(SurfaceError::Png("missing IHDR chunk".into()));
                }
                Ok(Self {
                    width: u32::from_be_bytes([ihdr[8], ihdr[9], ihdr[10], ihdr[11]]),
                    height: u32::from_be_bytes([ihdr[12], ihdr[13], ihdr[14], ihdr[15]]),
                    format: ImageFormat::Png,
                })
            }
            ImageFormat::Raw565 => {
                let (width, height) = raw::parse_header(data)?;
                Ok(Self {
                    width,
                    height,
                    format: ImageFormat::Raw565,
                })
            }
        }
    }
}

/// Identify the container, enforcing the minimum input length.
pub(crate) fn detect(data: &[u8]) -> Result<ImageFormat, SurfaceError> {
    if data.len() < MIN_IMAGE_LEN {
        log::error!("Image data too short ({} bytes)", data.len());
        return Err(SurfaceError::InputTooShort { len: data.len() });
    }
    if data.starts_with(&PNG_MAGIC) {
        return Ok(ImageFormat::Png);
    }
    if raw::is_raw565(data) {
        return Ok(ImageFormat::Raw565);
    }
    log::error!("Image format not recognized");
    Err(SurfaceError::UnrecognizedFormat)
}
