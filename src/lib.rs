//! # fbgfx
//!
//! Drawing on a linear 32-bit framebuffer with nothing underneath: no OS,
//! no float-heavy rasterizer, no font engine. Everything renders through a
//! [`Surface`] that owns the pixel memory and checks every placement before
//! a single cell is written.
//!
//! - [`framebuffer`]: the surface, colors and pixel layouts
//! - [`raster`]: bitmap run scanning, the scaled blitter, bit transforms
//! - [`draw`]: lines, polar vectors, arcs and shapes
//! - [`console`]: cursor-tracked text output and `fmt::Write`
//! - [`serial`]: a `log` backend on COM1 (x86_64)

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod console;
pub mod draw;
pub mod error;
pub mod font;
pub mod format;
pub mod framebuffer;
pub mod raster;
#[cfg(target_arch = "x86_64")]
pub mod serial;

pub use console::{Console, PrintState, ScrollMode};
pub use error::{DrawError, DrawResult, SurfaceError};
pub use font::{Font, SYSTEM_FONT};
pub use framebuffer::{Color, PixelLayout, Surface, SurfaceInfo};
pub use raster::{Bitmap, GlyphColors, Scale};
