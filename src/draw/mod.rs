//! Vector drawing on a [`Surface`](crate::framebuffer::Surface): lines,
//! polar vectors and arcs, and the shapes built from them.
//!
//! Every entry point validates its endpoints or origin first and draws
//! nothing when a check fails.

pub mod arc;
pub mod line;
pub mod shapes;

pub use arc::{polar_point, ArcSweep};
pub use line::{LineCursor, LineStep};
