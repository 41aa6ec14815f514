//! Native pixel values and channel packing
use embedded_graphics_core::pixelcolor::{Rgb888, RgbColor};

/// One 32-bit framebuffer cell, already in the surface's native layout.
///
/// The named constants assume the common `0x00RRGGBB` (BGR, reserved high
/// byte clear) layout; use [`PixelLayout::encode`] for anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x0000_0000);
    pub const WHITE: Color = Color(0x00FF_FFFF);
    pub const RED: Color = Color(0x00FF_0000);
    pub const GREEN: Color = Color(0x0000_FF00);
    pub const BLUE: Color = Color(0x0000_00FF);
    pub const YELLOW: Color = Color(0x00FF_FF00);
    pub const CYAN: Color = Color(0x0000_FFFF);
    pub const MAGENTA: Color = Color(0x00FF_00FF);
    pub const GRAY: Color = Color(0x0080_8080);
    pub const DARK_GRAY: Color = Color(0x0040_4040);
    pub const LIGHT_GRAY: Color = Color(0x00C0_C0C0);

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// `0xRRGGBB` in the default layout; high byte is cleared
    pub const fn from_hex(hex: u32) -> Self {
        Self(hex & 0x00FF_FFFF)
    }
}

/// Channel arrangement of a 32-bit cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// Red in the low byte, reserved in the high byte
    Rgb,
    /// Blue in the low byte, reserved in the high byte
    Bgr,
    Bitmask {
        red: u32,
        green: u32,
        blue: u32,
        reserved: u32,
    },
}

impl PixelLayout {
    const DIRECT_RESERVED: u32 = 0xFF00_0000;

    pub fn masks(&self) -> (u32, u32, u32, u32) {
        match *self {
            PixelLayout::Rgb => (0x0000_00FF, 0x0000_FF00, 0x00FF_0000, Self::DIRECT_RESERVED),
            PixelLayout::Bgr => (0x00FF_0000, 0x0000_FF00, 0x0000_00FF, Self::DIRECT_RESERVED),
            PixelLayout::Bitmask {
                red,
                green,
                blue,
                reserved,
            } => (red, green, blue, reserved),
        }
    }

    /// The bit pattern meaning "skip this write", if the layout has spare bits
    pub fn transparency_mask(&self) -> Option<u32> {
        let (r, g, b, reserved) = self.masks();
        let mask = if reserved != 0 { reserved } else { !(r | g | b) };
        (mask != 0).then_some(mask)
    }

    /// Pack 8-bit channels into this layout. Narrow channels keep the high bits.
    pub fn encode(&self, r: u8, g: u8, b: u8) -> Color {
        let (rm, gm, bm, _) = self.masks();
        Color(pack_channel(r, rm) | pack_channel(g, gm) | pack_channel(b, bm))
    }

    pub fn encode_rgb888(&self, color: Rgb888) -> Color {
        self.encode(color.r(), color.g(), color.b())
    }

    /// Unpack to 8-bit channels; the inverse of `encode` for 8-bit masks.
    pub fn decode(&self, color: Color) -> (u8, u8, u8) {
        let (rm, gm, bm, _) = self.masks();
        (
            unpack_channel(color.0, rm),
            unpack_channel(color.0, gm),
            unpack_channel(color.0, bm),
        )
    }
}

fn mask_shift(mask: u32) -> u32 {
    if mask == 0 {
        0
    } else {
        mask.trailing_zeros()
    }
}

fn mask_width(mask: u32) -> u32 {
    (mask >> mask_shift(mask)).count_ones()
}

fn pack_channel(value: u8, mask: u32) -> u32 {
    let width = mask_width(mask);
    if width == 0 {
        return 0;
    }
    let value = value as u32;
    let scaled = if width >= 8 {
        value << (width - 8)
    } else {
        value >> (8 - width)
    };
    (scaled << mask_shift(mask)) & mask
}

fn unpack_channel(raw: u32, mask: u32) -> u8 {
    let width = mask_width(mask);
    if width == 0 {
        return 0;
    }
    let value = (raw & mask) >> mask_shift(mask);
    if width >= 8 {
        (value >> (width - 8)) as u8
    } else {
        (value << (8 - width)) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_layouts() {
        assert_eq!(PixelLayout::Bgr.encode(0xFF, 0, 0), Color::RED);
        assert_eq!(PixelLayout::Rgb.encode(0xFF, 0, 0), Color(0x0000_00FF));
        assert_eq!(PixelLayout::Bgr.transparency_mask(), Some(0xFF00_0000));
    }

    #[test]
    fn test_bitmask_565() {
        let layout = PixelLayout::Bitmask {
            red: 0xF800,
            green: 0x07E0,
            blue: 0x001F,
            reserved: 0,
        };
        assert_eq!(layout.encode(0xFF, 0xFF, 0xFF), Color(0xFFFF));
        assert_eq!(layout.transparency_mask(), Some(0xFFFF_0000));
        assert_eq!(layout.decode(Color(0xF800)), (0xF8, 0, 0));
    }

    #[test]
    fn test_full_width_bitmask_has_no_transparency() {
        let layout = PixelLayout::Bitmask {
            red: 0xFFC0_0000,
            green: 0x003F_F800,
            blue: 0x0000_07FF,
            reserved: 0,
        };
        assert_eq!(layout.transparency_mask(), None);
    }
}
