/// Pixel encoding of a [`Surface`](crate::Surface).
///
/// Packed formats store each pixel directly. Palette formats store a
/// one-byte index per pixel into a 256-entry color table carried by the
/// surface.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 16-bit 5:6:5, little-endian.
    Rgb565Le,
    /// 16-bit 5:6:5, big-endian (the usual SPI display byte order).
    Rgb565Be,
    /// 24-bit R, G, B bytes.
    Rgb888,
    /// Palette indices into a little-endian 565 table.
    Pal565Le,
    /// Palette indices into a big-endian 565 table.
    Pal565Be,
    /// Palette indices into an R, G, B byte table.
    Pal888,
}

impl PixelFormat {
    /// Set on every real format; a raw value without it is invalid.
    pub const FORMAT_BIT: u8 = 0x10;
    pub const PALETTE_BIT: u8 = 0x08;
    pub const LE_BIT: u8 = 0x04;
    pub const RGB888_BIT: u8 = 0x01;

    /// Every supported format.
    pub const ALL: [PixelFormat; 6] = [
        Self::Rgb565Le,
        Self::Rgb565Be,
        Self::Rgb888,
        Self::Pal565Le,
        Self::Pal565Be,
        Self::Pal888,
    ];

    /// Bytes per pixel (row stride is `width * bytes_per_pixel`).
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb565Le | Self::Rgb565Be | Self::Pal565Le | Self::Pal565Be => 2,
            Self::Rgb888 | Self::Pal888 => 3,
        }
    }

    /// Whether pixels are indices into a palette.
    pub fn is_palette(self) -> bool {
        matches!(self, Self::Pal565Le | Self::Pal565Be | Self::Pal888)
    }

    /// Whether 565 values (packed or in the palette) are stored big-endian.
    pub fn is_big_endian(self) -> bool {
        matches!(self, Self::Rgb565Be | Self::Pal565Be)
    }

    /// Size of one palette entry in bytes, or 0 for packed formats.
    pub fn palette_entry_size(self) -> usize {
        match self {
            Self::Pal565Le | Self::Pal565Be => 2,
            Self::Pal888 => 3,
            _ => 0,
        }
    }

    /// Total palette size in bytes (256 entries), or 0 for packed formats.
    pub fn palette_len(self) -> usize {
        256 * self.palette_entry_size()
    }

    /// Raw bit encoding used by display and overlay consumers.
    pub fn to_raw(self) -> u8 {
        let bits = match self {
            Self::Rgb565Le => Self::LE_BIT,
            Self::Rgb565Be => 0,
            Self::Rgb888 => Self::RGB888_BIT,
            Self::Pal565Le => Self::PALETTE_BIT | Self::LE_BIT,
            Self::Pal565Be => Self::PALETTE_BIT,
            Self::Pal888 => Self::PALETTE_BIT | Self::RGB888_BIT,
        };
        Self::FORMAT_BIT | bits
    }

    /// Parse a raw format value. Zero, values without [`Self::FORMAT_BIT`],
    /// and combinations outside the closed set are rejected.
    pub fn from_raw(raw: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.to_raw() == raw)
    }
}

/// Pack an 8-bit RGB triplet into 5:6:5, truncating the low bits.
#[inline]
pub fn pack_rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((u16::from(r) & 0xF8) << 8) | ((u16::from(g) & 0xFC) << 3) | (u16::from(b) >> 3)
}

/// Expand a 5:6:5 value to 8-bit channels (low bits zero).
#[inline]
pub fn unpack_rgb565(pixel: u16) -> (u8, u8, u8) {
    (
        ((pixel >> 8) & 0xF8) as u8,
        ((pixel >> 3) & 0xFC) as u8,
        ((pixel & 0x1F) << 3) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_encoding_is_closed() {
        for format in PixelFormat::ALL {
            assert_eq!(PixelFormat::from_raw(format.to_raw()), Some(format));
            assert_ne!(format.to_raw() & PixelFormat::FORMAT_BIT, 0);
        }
        assert_eq!(PixelFormat::from_raw(0), None);
        // Real palette/size bits but no format bit.
        assert_eq!(PixelFormat::from_raw(PixelFormat::PALETTE_BIT), None);
        // 888 has no endianness variant.
        assert_eq!(
            PixelFormat::from_raw(
                PixelFormat::FORMAT_BIT | PixelFormat::RGB888_BIT | PixelFormat::LE_BIT
            ),
            None
        );
    }

    #[test]
    fn format_table() {
        assert_eq!(PixelFormat::Rgb565Le.bytes_per_pixel(), 2);
        assert_eq!(PixelFormat::Rgb888.bytes_per_pixel(), 3);
        assert_eq!(PixelFormat::Pal888.bytes_per_pixel(), 3);
        assert!(PixelFormat::Pal565Be.is_palette());
        assert!(PixelFormat::Pal565Be.is_big_endian());
        assert!(!PixelFormat::Rgb565Le.is_palette());
        assert_eq!(PixelFormat::Pal565Le.palette_len(), 512);
        assert_eq!(PixelFormat::Pal888.palette_len(), 768);
        assert_eq!(PixelFormat::Rgb888.palette_len(), 0);
    }

    #[test]
    fn pack_unpack() {
        assert_eq!(pack_rgb565(255, 255, 255), 0xFFFF);
        assert_eq!(pack_rgb565(255, 0, 0), 0xF800);
        assert_eq!(pack_rgb565(0, 255, 0), 0x07E0);
        assert_eq!(pack_rgb565(0, 0, 255), 0x001F);
        assert_eq!(unpack_rgb565(0xFFFF), (0xF8, 0xFC, 0xF8));
        assert_eq!(unpack_rgb565(0xF800), (0xF8, 0, 0));
        // Truncation is idempotent after one trip.
        let (r, g, b) = unpack_rgb565(pack_rgb565(123, 45, 67));
        assert_eq!(pack_rgb565(r, g, b), pack_rgb565(123, 45, 67));
    }
}
