use alloc::format;

use crate::error::SurfaceError;

/// Largest width or height a surface may have.
pub const MAX_DIMENSION: u32 = 4096;

/// Resource limits for decode and convert operations.
///
/// All fields default to `None` (no limit beyond [`MAX_DIMENSION`]).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes one decode allocates: the surface pixels, plus the
    /// intermediate frame buffer for PNG.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), SurfaceError> {
        if let Some(max_w) = self.max_width {
            if width > max_w {
                return Err(SurfaceError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if height > max_h {
                return Err(SurfaceError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(SurfaceError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that an allocation size is within memory limits.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), SurfaceError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(SurfaceError::LimitExceeded(format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}

/// Reject dimensions outside `1..=MAX_DIMENSION`.
pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<(), SurfaceError> {
    if !(1..=MAX_DIMENSION).contains(&width) || !(1..=MAX_DIMENSION).contains(&height) {
        return Err(SurfaceError::InvalidSurface(format!(
            "dimensions {width}x{height} outside 1..={MAX_DIMENSION}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_bounds() {
        assert!(check_dimensions(1, 1).is_ok());
        assert!(check_dimensions(MAX_DIMENSION, MAX_DIMENSION).is_ok());
        assert!(check_dimensions(0, 10).is_err());
        assert!(check_dimensions(10, 0).is_err());
        assert!(check_dimensions(MAX_DIMENSION + 1, 10).is_err());
    }

    #[test]
    fn limits_pixels_and_memory() {
        let limits = Limits {
            max_pixels: Some(100),
            max_memory_bytes: Some(200),
            ..Default::default()
        };
        assert!(limits.check(10, 10).is_ok());
        assert!(matches!(
            limits.check(10, 11),
            Err(SurfaceError::LimitExceeded(_))
        ));
        assert!(limits.check_memory(200).is_ok());
        assert!(limits.check_memory(201).is_err());
    }
}
