//! Scaled 1-bit bitmap blitter
use crate::error::{DrawError, DrawResult};
use crate::framebuffer::{Color, Surface};
use crate::raster::runs::RowRuns;

/// Borrowed 1-bit image: `height` rows of `ceil(width / 8)` bytes, MSB first.
/// A set bit is drawn in the foreground color, a clear bit in the highlight.
#[derive(Debug, Clone, Copy)]
pub struct Bitmap<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> Bitmap<'a> {
    pub fn new(data: &'a [u8], width: usize, height: usize) -> Result<Self, DrawError> {
        let needed = row_bytes(width) * height;
        if data.len() < needed {
            return Err(DrawError::BitmapTooShort {
                needed,
                available: data.len(),
            });
        }
        Ok(Self {
            data: &data[..needed],
            width,
            height,
        })
    }

    /// For callers that slice exactly `row_bytes(width) * height` bytes
    pub(crate) fn sized(data: &'a [u8], width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), row_bytes(width) * height);
        Self {
            data,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn row(&self, y: usize) -> &'a [u8] {
        let bytes = row_bytes(self.width);
        &self.data[y * bytes..(y + 1) * bytes]
    }
}

#[inline]
pub const fn row_bytes(width: usize) -> usize {
    (width + 7) / 8
}

/// Integer magnification, each factor at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    pub x: usize,
    pub y: usize,
}

impl Scale {
    pub const ONE: Scale = Scale { x: 1, y: 1 };

    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    pub const fn uniform(factor: usize) -> Self {
        Self { x: factor, y: factor }
    }

    pub const fn is_valid(&self) -> bool {
        self.x >= 1 && self.y >= 1
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::ONE
    }
}

/// Colors for set (foreground) and clear (highlight) bits. Either may be the
/// surface's transparent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphColors {
    pub foreground: Color,
    pub highlight: Color,
}

impl GlyphColors {
    pub const fn new(foreground: Color, highlight: Color) -> Self {
        Self {
            foreground,
            highlight,
        }
    }
}

/// Which runs a blit emits, chosen once per call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlitMode {
    Both,
    ForegroundOnly,
    /// Only clear bits are drawn; runs are scanned on the complement
    HighlightOnly,
    Skip,
}

impl BlitMode {
    pub fn select(surface: &Surface<'_>, colors: GlyphColors) -> Self {
        match (
            surface.is_transparent(colors.foreground),
            surface.is_transparent(colors.highlight),
        ) {
            (false, false) => BlitMode::Both,
            (false, true) => BlitMode::ForegroundOnly,
            (true, false) => BlitMode::HighlightOnly,
            (true, true) => BlitMode::Skip,
        }
    }
}

impl Surface<'_> {
    /// Validate and draw `bitmap` with its top-left at
    /// `(x + scale.x * index * width, y)`.
    pub fn draw_bitmap(
        &mut self,
        bitmap: &Bitmap<'_>,
        x: usize,
        y: usize,
        scale: Scale,
        index: usize,
        colors: GlyphColors,
    ) -> DrawResult {
        self.check_placement(bitmap.width, bitmap.height, x, y, scale, index, 1)
            .map_err(|e| {
                log::warn!("draw_bitmap: {}", e);
                e
            })?;
        self.blit(bitmap, x, y, scale, index, colors);
        Ok(())
    }

    /// The three placement checks every text and bitmap entry point runs:
    /// scaled size against the resolution, origin against the resolution,
    /// and the placed extent of `slots` cells starting at slot `index`.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn check_placement(
        &self,
        width: usize,
        height: usize,
        x: usize,
        y: usize,
        scale: Scale,
        index: usize,
        slots: usize,
    ) -> DrawResult {
        if !scale.is_valid() {
            return Err(DrawError::ZeroScale);
        }
        let cell_w = width.saturating_mul(scale.x);
        let cell_h = height.saturating_mul(scale.y);
        if cell_w > self.width() || cell_h > self.height() {
            return Err(DrawError::TooLarge {
                width: cell_w,
                height: cell_h,
            });
        }
        if x >= self.width() || y >= self.height() {
            return Err(DrawError::OriginOutOfBounds {
                x: x as i64,
                y: y as i64,
            });
        }
        let right = index
            .checked_add(slots)
            .and_then(|n| n.checked_mul(cell_w))
            .and_then(|w| w.checked_add(x))
            .unwrap_or(usize::MAX);
        let bottom = y + cell_h;
        if right > self.width() || bottom > self.height() {
            return Err(DrawError::ExtentOutOfBounds { right, bottom });
        }
        Ok(())
    }

    /// Emit every run of every row as one `len*xscale x yscale` block.
    /// Performs no clipping: the caller has run `check_placement`.
    pub(crate) fn blit(
        &mut self,
        bitmap: &Bitmap<'_>,
        x: usize,
        y: usize,
        scale: Scale,
        index: usize,
        colors: GlyphColors,
    ) {
        let mode = BlitMode::select(self, colors);
        if mode == BlitMode::Skip {
            return;
        }

        let origin_x = x + scale.x * index * bitmap.width;
        for row in 0..bitmap.height {
            let bits = bitmap.row(row);
            let top = y + row * scale.y;
            let runs = match mode {
                BlitMode::HighlightOnly => RowRuns::complement(bits, bitmap.width),
                _ => RowRuns::new(bits, bitmap.width),
            };

            for run in runs {
                let color = match (mode, run.set) {
                    (BlitMode::Both, true) | (BlitMode::ForegroundOnly, true) => colors.foreground,
                    (BlitMode::Both, false) | (BlitMode::HighlightOnly, true) => colors.highlight,
                    _ => continue,
                };
                let left = origin_x + run.start * scale.x;
                for sub_row in 0..scale.y {
                    self.span(left, top + sub_row, run.len * scale.x, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::{PixelLayout, SurfaceInfo};
    use alloc::vec;
    use alloc::vec::Vec;

    const SENTINEL: u32 = 0x0012_3456;

    fn blank(width: usize, height: usize) -> Vec<u32> {
        vec![SENTINEL; width * height]
    }

    fn info(width: usize, height: usize) -> SurfaceInfo {
        SurfaceInfo {
            width,
            height,
            stride: width,
            layout: PixelLayout::Bgr,
        }
    }

    #[test]
    fn test_bitmap_length_checked() {
        assert_eq!(
            Bitmap::new(&[0u8; 3], 9, 2).err(),
            Some(DrawError::BitmapTooShort {
                needed: 4,
                available: 3
            })
        );
        assert_eq!(Bitmap::new(&[0u8; 4], 9, 2).unwrap().row(1).len(), 2);
    }

    #[test]
    fn test_mode_selection() {
        let mut cells = blank(2, 2);
        let s = Surface::new(&mut cells, info(2, 2)).unwrap();
        let t = s.transparent().unwrap();
        let pick = |fg, hl| BlitMode::select(&s, GlyphColors::new(fg, hl));
        assert_eq!(pick(Color::RED, Color::BLUE), BlitMode::Both);
        assert_eq!(pick(Color::RED, t), BlitMode::ForegroundOnly);
        assert_eq!(pick(t, Color::BLUE), BlitMode::HighlightOnly);
        assert_eq!(pick(t, t), BlitMode::Skip);
    }

    #[test]
    fn test_index_offsets_origin() {
        let mut cells = blank(12, 2);
        let mut s = Surface::new(&mut cells, info(12, 2)).unwrap();
        let glyph = Bitmap::new(&[0b1000_0000, 0b0100_0000], 3, 2).unwrap();
        s.draw_bitmap(&glyph, 1, 0, Scale::ONE, 2, GlyphColors::new(Color::RED, Color::BLUE))
            .unwrap();
        // x origin = 1 + 1 * 2 * 3 = 7
        assert_eq!(s.pixel(6, 0), Some(Color(SENTINEL)));
        assert_eq!(s.pixel(7, 0), Some(Color::RED));
        assert_eq!(s.pixel(8, 0), Some(Color::BLUE));
        assert_eq!(s.pixel(8, 1), Some(Color::RED));
        assert_eq!(s.pixel(10, 0), Some(Color(SENTINEL)));
    }

    #[test]
    fn test_highlight_only_leaves_set_bits() {
        let mut cells = blank(8, 1);
        let mut s = Surface::new(&mut cells, info(8, 1)).unwrap();
        let t = s.transparent().unwrap();
        let glyph = Bitmap::new(&[0b1010_0000], 4, 1).unwrap();
        s.draw_bitmap(&glyph, 0, 0, Scale::ONE, 0, GlyphColors::new(t, Color::GREEN))
            .unwrap();
        assert_eq!(s.pixel(0, 0), Some(Color(SENTINEL)));
        assert_eq!(s.pixel(1, 0), Some(Color::GREEN));
        assert_eq!(s.pixel(2, 0), Some(Color(SENTINEL)));
        assert_eq!(s.pixel(3, 0), Some(Color::GREEN));
        assert_eq!(s.pixel(4, 0), Some(Color(SENTINEL)));
    }

    #[test]
    fn test_placement_checks_in_order() {
        let mut cells = blank(8, 8);
        let mut s = Surface::new(&mut cells, info(8, 8)).unwrap();
        let glyph = Bitmap::new(&[0xFF; 4], 4, 4).unwrap();
        let colors = GlyphColors::new(Color::RED, Color::BLUE);

        assert_eq!(
            s.draw_bitmap(&glyph, 0, 0, Scale::new(0, 1), 0, colors),
            Err(DrawError::ZeroScale)
        );
        assert_eq!(
            s.draw_bitmap(&glyph, 0, 0, Scale::new(3, 1), 0, colors),
            Err(DrawError::TooLarge { width: 12, height: 4 })
        );
        assert_eq!(
            s.draw_bitmap(&glyph, 8, 0, Scale::ONE, 0, colors),
            Err(DrawError::OriginOutOfBounds { x: 8, y: 0 })
        );
        assert_eq!(
            s.draw_bitmap(&glyph, 2, 5, Scale::ONE, 0, colors),
            Err(DrawError::ExtentOutOfBounds { right: 6, bottom: 9 })
        );
        assert_eq!(
            s.draw_bitmap(&glyph, 0, 0, Scale::ONE, 1, colors),
            Ok(())
        );
        assert_eq!(
            s.draw_bitmap(&glyph, 1, 0, Scale::ONE, 1, colors),
            Err(DrawError::ExtentOutOfBounds { right: 9, bottom: 4 })
        );
        drop(s);
        assert!(cells[..4].iter().all(|&c| c == SENTINEL));
    }
}
