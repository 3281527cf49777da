//! Raw565 container: the launcher's uncompressed image layout.
//!
//! Layout: `u16 width (LE)`, `u16 height (LE)`, then `width * height`
//! little-endian RGB565 pixels with no row padding. Lossless for
//! `Rgb565Le` surfaces.

mod decode;
mod encode;

pub(crate) use decode::{decode, is_raw565, parse_header};
pub(crate) use encode::encode;

/// Bytes before the pixel data.
pub(crate) const HEADER_LEN: usize = 4;
