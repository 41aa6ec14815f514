//! Text output with an explicit print context.
//!
//! A [`Console`] pairs one surface with its [`PrintState`]; there is no
//! global cursor. Glyph metrics always come from the state's font.

use alloc::vec::Vec;
use core::fmt;

use crate::error::{DrawError, DrawResult};
use crate::font::{Font, SYSTEM_FONT};
use crate::format::{format_to, measure};
use crate::framebuffer::{Color, Surface};
use crate::raster::{GlyphColors, Scale};

/// What the print layer does when the next line would run off the bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Continue at the top, drawing over whatever is there
    WrapToTop,
    /// Scroll up this many scanlines at a time until the line fits.
    /// `Lines(0)` behaves like `Quick`.
    Lines(usize),
    /// Scroll up by the missing rows in one step
    Quick,
    /// Clear to the background and continue at the top
    Wipe,
}

/// Cursor and print settings for one console
#[derive(Debug, Clone, Copy)]
pub struct PrintState {
    /// Pixel origin of the current line
    pub x: usize,
    pub y: usize,
    /// Glyph slot on the current line
    pub index: usize,
    pub foreground: Color,
    pub highlight: Color,
    pub background: Color,
    pub scale: Scale,
    pub font: &'static Font,
    pub scroll: ScrollMode,
    /// Fill the surface with this color whenever a text draw is rejected
    pub error_flash: Option<Color>,
}

impl Default for PrintState {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            index: 0,
            foreground: Color::WHITE,
            highlight: Color::BLACK,
            background: Color::BLACK,
            scale: Scale::ONE,
            font: &SYSTEM_FONT,
            scroll: ScrollMode::Quick,
            error_flash: None,
        }
    }
}

impl PrintState {
    pub fn colors(&self) -> GlyphColors {
        GlyphColors::new(self.foreground, self.highlight)
    }

    pub fn glyph_width(&self) -> usize {
        self.font.glyph_width()
    }

    pub fn glyph_height(&self) -> usize {
        self.font.glyph_height()
    }

    pub fn cell_width(&self) -> usize {
        self.glyph_width() * self.scale.x
    }

    pub fn line_height(&self) -> usize {
        self.glyph_height() * self.scale.y
    }
}

/// Text output bound to one surface
pub struct Console<'fb> {
    surface: Surface<'fb>,
    state: PrintState,
}

impl<'fb> Console<'fb> {
    pub fn new(surface: Surface<'fb>) -> Self {
        Self::with_state(surface, PrintState::default())
    }

    pub fn with_state(surface: Surface<'fb>, state: PrintState) -> Self {
        Self { surface, state }
    }

    pub fn state(&self) -> &PrintState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PrintState {
        &mut self.state
    }

    pub fn surface(&self) -> &Surface<'fb> {
        &self.surface
    }

    /// For graphics calls between text output
    pub fn surface_mut(&mut self) -> &mut Surface<'fb> {
        &mut self.surface
    }

    pub fn into_surface(self) -> Surface<'fb> {
        self.surface
    }

    pub fn set_colors(&mut self, foreground: Color, highlight: Color) {
        self.state.foreground = foreground;
        self.state.highlight = highlight;
    }

    pub fn set_scale(&mut self, scale: Scale) {
        self.state.scale = scale;
    }

    pub fn set_font(&mut self, font: &'static Font) {
        self.state.font = font;
    }

    /// Move the cursor to a new line origin, back at slot 0
    pub fn set_position(&mut self, x: usize, y: usize) {
        self.state.x = x;
        self.state.y = y;
        self.state.index = 0;
    }

    /// Fill the whole surface and make `color` the background
    pub fn fill(&mut self, color: Color) {
        self.surface.fill(color);
        self.state.background = color;
    }

    /// Draw at the cursor and advance it one slot
    pub fn draw_char(&mut self, ch: char) -> DrawResult {
        let PrintState { x, y, index, scale, .. } = self.state;
        self.place(ch, x, y, scale, index, "draw_char")?;
        self.state.index += 1;
        Ok(())
    }

    pub fn draw_char_at(&mut self, ch: char, x: usize, y: usize) -> DrawResult {
        self.place(ch, x, y, self.state.scale, 0, "draw_char_at")
    }

    pub fn draw_char_at_scaled(&mut self, ch: char, x: usize, y: usize, scale: Scale) -> DrawResult {
        self.place(ch, x, y, scale, 0, "draw_char_at_scaled")
    }

    /// Lay out `text` left to right from `(x, y)`, stopping at the first NUL.
    /// No wrapping: the whole run must fit on the surface.
    pub fn draw_string_at_scaled(&mut self, text: &str, x: usize, y: usize, scale: Scale) -> DrawResult {
        let text = text.split('\0').next().unwrap_or_default();
        let count = text.chars().count();
        let font = self.state.font;
        let (w, h) = (font.glyph_width(), font.glyph_height());
        if let Err(e) = self.surface.check_placement(w, h, x, y, scale, 0, count) {
            return Err(self.reject("draw_string_at_scaled", e));
        }

        let colors = self.state.colors();
        for (index, ch) in text.chars().enumerate() {
            self.surface.blit(&font.glyph_for(ch), x, y, scale, index, colors);
        }
        Ok(())
    }

    /// Format into a buffer sized by a measuring pass, then draw it.
    pub fn formatted_string_at_scaled(
        &mut self,
        x: usize,
        y: usize,
        scale: Scale,
        args: fmt::Arguments<'_>,
    ) -> DrawResult {
        let needed = measure(args).map_err(|_| DrawError::Format)?;
        let mut buf = Vec::new();
        if buf.try_reserve_exact(needed).is_err() {
            log::error!("formatted_string_at_scaled: cannot allocate {} bytes", needed);
            return Err(DrawError::OutOfMemory { requested: needed });
        }
        buf.resize(needed, 0u8);
        let text = format_to(&mut buf, args).map_err(|_| DrawError::Format)?;
        self.draw_string_at_scaled(text, x, y, scale)
    }

    fn place(&mut self, ch: char, x: usize, y: usize, scale: Scale, index: usize, op: &'static str) -> DrawResult {
        let glyph = self.state.font.glyph_for(ch);
        if let Err(e) = self
            .surface
            .check_placement(glyph.width(), glyph.height(), x, y, scale, index, 1)
        {
            return Err(self.reject(op, e));
        }
        let colors = self.state.colors();
        self.surface.blit(&glyph, x, y, scale, index, colors);
        Ok(())
    }

    fn reject(&mut self, op: &'static str, err: DrawError) -> DrawError {
        log::warn!(
            "{}: {} ({}x{} surface)",
            op,
            err,
            self.surface.width(),
            self.surface.height()
        );
        if let Some(flash) = self.state.error_flash {
            self.surface.fill(flash);
        }
        err
    }

    fn fits_on_line(&self) -> bool {
        let right = self.state.x + (self.state.index + 1) * self.state.cell_width();
        right <= self.surface.width()
    }

    fn new_line(&mut self) {
        self.state.index = 0;
        let line_h = self.state.line_height();
        let height = self.surface.height();
        let next = self.state.y + line_h;
        if next + line_h <= height {
            self.state.y = next;
            return;
        }
        if line_h > height {
            self.state.y = 0;
            return;
        }

        let background = self.state.background;
        let missing = next + line_h - height;
        match self.state.scroll {
            ScrollMode::WrapToTop => self.state.y = 0,
            ScrollMode::Wipe => {
                self.fill(background);
                self.state.y = 0;
            }
            ScrollMode::Quick | ScrollMode::Lines(0) => {
                log::trace!("scroll {} rows", missing);
                self.surface.scroll_up(missing, background);
                self.state.y = next - missing;
            }
            ScrollMode::Lines(step) => {
                let mut shifted = 0;
                while shifted < missing {
                    self.surface.scroll_up(step, background);
                    shifted += step;
                }
                log::trace!("scroll {} rows in steps of {}", shifted, step);
                self.state.y = next.saturating_sub(shifted);
            }
        }
    }

    fn put_char(&mut self, ch: char) -> DrawResult {
        match ch {
            '\n' => self.new_line(),
            '\r' => self.state.index = 0,
            '\t' => {
                self.put_char(' ')?;
                while self.state.index % 8 != 0 {
                    self.put_char(' ')?;
                }
            }
            '\0' => {}
            ch => {
                if !self.fits_on_line() {
                    self.new_line();
                }
                self.draw_char(ch)?;
            }
        }
        Ok(())
    }
}

impl fmt::Write for Console<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            self.put_char(ch).map_err(|_| fmt::Error)?;
        }
        Ok(())
    }
}

/// Draw formatted text on a console at a pixel position and scale
#[macro_export]
macro_rules! print_at {
    ($console:expr, $x:expr, $y:expr, $scale:expr, $($arg:tt)*) => {
        $console.formatted_string_at_scaled($x, $y, $scale, core::format_args!($($arg)*))
    };
}
