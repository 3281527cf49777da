//! # surfpix
//!
//! Raster surfaces and the pixel pipeline of a handheld game launcher.
//!
//! A [`Surface`] is an owned pixel buffer in one of six encodings
//! ([`PixelFormat`]): 16-bit 565 in either byte order, 24-bit RGB, and
//! palette-indexed variants of each. On top of it:
//!
//! - [`blit::copy`] fills one surface from another, re-encoding and
//!   nearest-neighbor scaling as needed, without allocating.
//! - [`convert`] allocates a new surface of a requested size and format.
//! - [`decode`] / [`decode_file`] read PNG or raw565 images into `Rgb565Le`
//!   surfaces; [`encode_png`] / [`encode_file`] write 8-bit RGB PNGs and
//!   [`encode_raw`] writes the raw565 container.
//! - [`ImageCache`], [`shade`] and [`tint`] cover what launcher screens do
//!   with decoded images.
//!
//! ## Raw565 container
//!
//! `u16 width (LE)`, `u16 height (LE)`, then `width * height` RGB565 pixels,
//! little-endian, no padding.
//!
//! ## Non-Goals
//!
//! - Filters other than nearest-neighbor
//! - Alpha blending and color management
//! - Blitting into sub-rectangles (rects are accepted but ignored)
//!
//! ## Usage
//!
//! ```no_run
//! use surfpix::{PixelFormat, convert, decode};
//!
//! let data: &[u8] = &[]; // PNG or raw565 bytes
//! let image = decode(data)?;
//!
//! // Fit to a 320-wide screen, keeping the aspect ratio, big-endian for SPI.
//! let screen = convert(&image, Some(320), None, Some(PixelFormat::Rgb565Be))?;
//! # let _ = screen;
//! # Ok::<(), surfpix::SurfaceError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod allocator;
mod cache;
mod convert;
mod decode;
mod encode;
mod error;
mod info;
mod limits;
mod pixel;
mod raw;
mod shade;
mod surface;

pub mod blit;

#[cfg(feature = "png")]
mod png;

#[cfg(feature = "imgref")]
mod typed;

// Re-exports
pub use allocator::{Global, SurfaceAllocator};
pub use blit::Rect;
pub use cache::ImageCache;
pub use convert::{convert, convert_in, target_size};
pub use decode::{DecodeRequest, decode};
#[cfg(feature = "std")]
pub use decode::decode_file;
pub use encode::encode_raw;
#[cfg(feature = "std")]
pub use encode::encode_raw_file;
#[cfg(feature = "png")]
pub use encode::{encode_file, encode_png};
pub use error::SurfaceError;
pub use info::{ImageFormat, ImageInfo};
pub use limits::{Limits, MAX_DIMENSION};
pub use pixel::{PixelFormat, pack_rgb565, unpack_rgb565};
pub use shade::{shade, tint};
pub use surface::Surface;
