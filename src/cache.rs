//! Keyed cache of decoded images and their shaded variants.
//!
//! Launcher screens look images up by name (for example
//! `"background_nes.png"`). Entries live until they are invalidated
//! explicitly or the whole cache is cleared on a theme change.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map::Entry;
use alloc::string::{String, ToString};

use log::{debug, warn};

use crate::convert::convert;
use crate::error::SurfaceError;
use crate::shade::shade;
use crate::surface::Surface;

#[derive(Debug, Default)]
pub struct ImageCache {
    images: BTreeMap<String, Surface>,
    shaded: BTreeMap<(String, u16), Surface>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Surface> {
        self.images.get(key)
    }

    /// Return the cached image for `key`, loading it with `load` on a miss.
    ///
    /// A failed load caches nothing, so the next call retries.
    pub fn get_or_insert_with<F>(&mut self, key: &str, load: F) -> Result<&Surface, SurfaceError>
    where
        F: FnOnce() -> Result<Surface, SurfaceError>,
    {
        match self.images.entry(key.to_string()) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                debug!("image cache miss: {key}");
                Ok(e.insert(load()?))
            }
        }
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with), but a freshly
    /// loaded image whose size differs from `width`x`height` is resampled
    /// before it is cached. If resampling fails the original is kept.
    pub fn get_or_insert_fitted<F>(
        &mut self,
        key: &str,
        width: u32,
        height: u32,
        load: F,
    ) -> Result<&Surface, SurfaceError>
    where
        F: FnOnce() -> Result<Surface, SurfaceError>,
    {
        self.get_or_insert_with(key, || {
            let image = load()?;
            if image.width() == width && image.height() == height {
                return Ok(image);
            }
            match convert(&image, Some(width), Some(height), None) {
                Ok(fitted) => Ok(fitted),
                Err(e) => {
                    warn!("Keeping {key} at original size: {e}");
                    Ok(image)
                }
            }
        })
    }

    /// The cached image for `key` darkened by `divisor`, computed once per
    /// `(key, divisor)`. Returns `None` when `key` is not cached.
    pub fn shaded(&mut self, key: &str, divisor: u16) -> Result<Option<&Surface>, SurfaceError> {
        let Some(base) = self.images.get(key) else {
            return Ok(None);
        };
        if divisor <= 1 {
            return Ok(Some(base));
        }
        match self.shaded.entry((key.to_string(), divisor)) {
            Entry::Occupied(e) => Ok(Some(e.into_mut())),
            Entry::Vacant(e) => Ok(Some(e.insert(shade(base, divisor)?))),
        }
    }

    /// Drop `key` and all of its shaded variants. Returns whether it was cached.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.shaded.retain(|(k, _), _| k != key);
        self.images.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.images.clear();
        self.shaded.clear();
    }

    /// Number of cached base images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::pixel::PixelFormat;

    fn flat(w: u32, h: u32, color: u16) -> Result<Surface, SurfaceError> {
        let mut s = Surface::new(w, h, PixelFormat::Rgb565Le)?;
        s.fill_565(color)?;
        Ok(s)
    }

    #[test]
    fn loads_once() {
        let loads = Cell::new(0);
        let mut cache = ImageCache::new();
        for _ in 0..3 {
            let img = cache
                .get_or_insert_with("logo", || {
                    loads.set(loads.get() + 1);
                    flat(2, 2, 0x1234)
                })
                .unwrap();
            assert_eq!(img.pixel_565(0, 0), Some(0x1234));
        }
        assert_eq!(loads.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let mut cache = ImageCache::new();
        assert!(
            cache
                .get_or_insert_with("missing", || Err(SurfaceError::UnrecognizedFormat))
                .is_err()
        );
        assert!(cache.is_empty());
    }

    #[test]
    fn fitted_images_match_screen() {
        let mut cache = ImageCache::new();
        let img = cache
            .get_or_insert_fitted("background", 8, 6, || flat(4, 3, 0x07E0))
            .unwrap();
        assert_eq!((img.width(), img.height()), (8, 6));
        assert_eq!(img.pixel_565(7, 5), Some(0x07E0));
    }

    #[test]
    fn shaded_variants_follow_invalidation() {
        let mut cache = ImageCache::new();
        assert!(cache.shaded("bg", 2).unwrap().is_none());

        cache.get_or_insert_with("bg", || flat(2, 2, 0xFFFF)).unwrap();
        let dark = cache.shaded("bg", 2).unwrap().unwrap().pixel_565(0, 0);
        assert_eq!(dark, Some((15 << 11) | (31 << 5) | 15));
        let plain = cache.shaded("bg", 1).unwrap().unwrap().pixel_565(0, 0);
        assert_eq!(plain, Some(0xFFFF));

        assert!(cache.invalidate("bg"));
        assert!(!cache.invalidate("bg"));
        cache.get_or_insert_with("bg", || flat(2, 2, 0)).unwrap();
        assert_eq!(cache.shaded("bg", 2).unwrap().unwrap().pixel_565(1, 1), Some(0));

        cache.clear();
        assert!(cache.get("bg").is_none());
    }
}
