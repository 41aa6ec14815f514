//! Linear 32-bit framebuffer surface
use bootloader_api::info::{FrameBuffer, PixelFormat};
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::Rgb888,
    Pixel,
};

use crate::error::SurfaceError;
use crate::framebuffer::color::{Color, PixelLayout};

/// Host-supplied description of one display target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceInfo {
    pub width: usize,
    pub height: usize,
    /// Cells between the starts of consecutive rows
    pub stride: usize,
    pub layout: PixelLayout,
}

/// One display target: `height` rows of `stride` 32-bit cells, of which the
/// first `width` per row are visible.
///
/// All writes go through this type. The checked entry points (`set_pixel`,
/// `fill_run`) reject anything off the visible area; the crate-internal
/// `put`/`span` paths trust their caller to have validated the extent.
pub struct Surface<'a> {
    cells: &'a mut [u32],
    info: SurfaceInfo,
    transparency: Option<u32>,
}

impl<'a> Surface<'a> {
    pub fn new(cells: &'a mut [u32], info: SurfaceInfo) -> Result<Self, SurfaceError> {
        if info.width == 0 || info.height == 0 {
            return Err(SurfaceError::ZeroSized);
        }
        if info.stride < info.width {
            return Err(SurfaceError::StrideTooSmall {
                stride: info.stride,
                width: info.width,
            });
        }
        let needed = info
            .stride
            .checked_mul(info.height)
            .ok_or(SurfaceError::BufferTooSmall {
                needed: usize::MAX,
                available: cells.len(),
            })?;
        if cells.len() < needed {
            return Err(SurfaceError::BufferTooSmall {
                needed,
                available: cells.len(),
            });
        }

        Ok(Self {
            cells: &mut cells[..needed],
            transparency: info.layout.transparency_mask(),
            info,
        })
    }

    /// Wrap device memory at an opaque base address.
    ///
    /// # Safety
    /// `base` must be 4-byte aligned and point to `stride * height` writable
    /// cells that nothing else accesses for `'a`.
    pub unsafe fn from_raw_parts(base: usize, info: SurfaceInfo) -> Result<Self, SurfaceError> {
        if base % core::mem::align_of::<u32>() != 0 {
            return Err(SurfaceError::Misaligned);
        }
        let len = info.stride.saturating_mul(info.height);
        let cells = core::slice::from_raw_parts_mut(base as *mut u32, len);
        Self::new(cells, info)
    }

    /// Take over the framebuffer handed to us by the bootloader
    pub fn from_boot_framebuffer(fb: &'static mut FrameBuffer) -> Result<Surface<'static>, SurfaceError> {
        let info = fb.info();
        if info.bytes_per_pixel != 4 {
            return Err(SurfaceError::UnsupportedFormat);
        }
        let layout = match info.pixel_format {
            PixelFormat::Rgb => PixelLayout::Rgb,
            PixelFormat::Bgr => PixelLayout::Bgr,
            PixelFormat::Unknown {
                red_position,
                green_position,
                blue_position,
            } => {
                let channel = |pos: u8| 0xFFu32.checked_shl(pos as u32).unwrap_or(0);
                let (red, green, blue) = (
                    channel(red_position),
                    channel(green_position),
                    channel(blue_position),
                );
                PixelLayout::Bitmask {
                    red,
                    green,
                    blue,
                    reserved: !(red | green | blue),
                }
            }
            _ => return Err(SurfaceError::UnsupportedFormat),
        };

        let buffer = fb.buffer_mut();
        // SAFETY: every bit pattern is a valid u32.
        let (head, cells, _) = unsafe { buffer.align_to_mut::<u32>() };
        if !head.is_empty() {
            return Err(SurfaceError::Misaligned);
        }

        Surface::new(
            cells,
            SurfaceInfo {
                width: info.width,
                height: info.height,
                stride: info.stride,
                layout,
            },
        )
    }

    pub fn info(&self) -> SurfaceInfo {
        self.info
    }

    pub fn width(&self) -> usize {
        self.info.width
    }

    pub fn height(&self) -> usize {
        self.info.height
    }

    pub fn stride(&self) -> usize {
        self.info.stride
    }

    pub fn layout(&self) -> PixelLayout {
        self.info.layout
    }

    /// The color value meaning "do not write", if this layout has one
    pub fn transparent(&self) -> Option<Color> {
        self.transparency.map(Color)
    }

    #[inline]
    pub fn is_transparent(&self, color: Color) -> bool {
        self.transparency == Some(color.0)
    }

    pub fn encode(&self, r: u8, g: u8, b: u8) -> Color {
        self.info.layout.encode(r, g, b)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.info.width && (p.y as usize) < self.info.height
    }

    /// Write one pixel. Returns `false` when rejected (off-surface or transparent).
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) -> bool {
        if x >= self.info.width || y >= self.info.height || self.is_transparent(color) {
            return false;
        }
        self.put(x, y, color);
        true
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.info.width || y >= self.info.height {
            return None;
        }
        Some(Color(self.cells[self.index_of(x, y)]))
    }

    /// Fill every cell, padding columns past `width` included
    pub fn fill(&mut self, color: Color) {
        if self.is_transparent(color) {
            return;
        }
        self.cells.fill(color.0);
    }

    /// Horizontal run of `len` pixels starting at `(x, y)`. Rejected unless the
    /// whole run is visible.
    pub fn fill_run(&mut self, x: usize, y: usize, len: usize, color: Color) -> bool {
        let fits = y < self.info.height
            && x.checked_add(len).map_or(false, |end| end <= self.info.width);
        if !fits || self.is_transparent(color) {
            return false;
        }
        self.span(x, y, len, color);
        true
    }

    /// Move the visible image up by `rows` scanlines and clear the vacated
    /// bottom rows to `background`.
    pub fn scroll_up(&mut self, rows: usize, background: Color) {
        let stride = self.info.stride;
        let total = self.info.height * stride;
        let rows = rows.min(self.info.height);
        let shifted = rows * stride;

        if shifted < total {
            self.cells.copy_within(shifted..total, 0);
        }
        let clear = if self.is_transparent(background) {
            0
        } else {
            background.0
        };
        self.cells[total - shifted..total].fill(clear);
    }

    #[inline]
    pub(crate) fn index_of(&self, x: usize, y: usize) -> usize {
        y * self.info.stride + x
    }

    /// Unchecked against the visible width: callers validate the extent.
    #[inline]
    pub(crate) fn put(&mut self, x: usize, y: usize, color: Color) {
        debug_assert!(x < self.info.width && y < self.info.height);
        let idx = self.index_of(x, y);
        self.cells[idx] = color.0;
    }

    #[inline]
    pub(crate) fn put_index(&mut self, idx: usize, color: Color) {
        self.cells[idx] = color.0;
    }

    /// Bulk constant fill of one run; unchecked against the visible width.
    #[inline]
    pub(crate) fn span(&mut self, x: usize, y: usize, len: usize, color: Color) {
        debug_assert!(x + len <= self.info.width && y < self.info.height);
        let start = self.index_of(x, y);
        self.cells[start..start + len].fill(color.0);
    }
}

// Implement DrawTarget for embedded-graphics
impl DrawTarget for Surface<'_> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let layout = self.info.layout;
        for Pixel(point, color) in pixels {
            if !self.contains(point) {
                continue;
            }
            self.put(point.x as usize, point.y as usize, layout.encode_rgb888(color));
        }
        Ok(())
    }
}

impl OriginDimensions for Surface<'_> {
    fn size(&self) -> Size {
        Size::new(self.info.width as u32, self.info.height as u32)
    }
}
