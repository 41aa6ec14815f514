//! # Framebuffer Module
//!
//! Owns the pixel memory of one display target and centralizes the
//! bounds policy for every write into it.
//!
//! ## Modules
//!
//! - `surface`: `Surface`, the only type that touches framebuffer cells
//! - `color`: `Color` cell values and `PixelLayout` channel packing
//!
//! ## Addressing
//!
//! Cell `(x, y)` lives at `y * stride + x`. The stride may exceed the
//! visible width; those padding cells are only ever touched by `fill`
//! and `scroll_up`.
//!
//! A surface also implements `embedded_graphics_core::DrawTarget`, so the
//! `embedded-graphics` primitives and text styles render onto it as well.

pub mod color;
pub mod surface;

pub use color::{Color, PixelLayout};
pub use surface::{Surface, SurfaceInfo};
