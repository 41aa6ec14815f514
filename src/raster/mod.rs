//! Bitmap rasterization: run scanning, the scaled blitter, and
//! bit-orientation transforms for bitmap assets.

pub mod bitmap;
pub mod runs;
pub mod transform;

pub use bitmap::{Bitmap, BlitMode, GlyphColors, Scale};
pub use runs::{Run, RowRuns};
