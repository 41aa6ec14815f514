use core::fmt;

/// Reasons a `Surface` cannot be built from a host descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    ZeroSized,
    StrideTooSmall { stride: usize, width: usize },
    BufferTooSmall { needed: usize, available: usize },
    Misaligned,
    UnsupportedFormat,
}

/// Drawing failures. Every variant is returned before any pixel is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawError {
    ZeroScale,
    BitmapTooShort { needed: usize, available: usize },
    /// The scaled glyph is bigger than the whole surface.
    TooLarge { width: usize, height: usize },
    OriginOutOfBounds { x: i64, y: i64 },
    /// The origin fits but the placed extent runs off the surface.
    ExtentOutOfBounds { right: usize, bottom: usize },
    EndpointOutOfBounds { x: i64, y: i64 },
    OutOfMemory { requested: usize },
    Format,
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSized => write!(f, "surface has a zero dimension"),
            Self::StrideTooSmall { stride, width } => {
                write!(f, "stride {} is smaller than width {}", stride, width)
            }
            Self::BufferTooSmall { needed, available } => write!(
                f,
                "buffer holds {} cells, surface needs {}",
                available, needed
            ),
            Self::Misaligned => write!(f, "framebuffer is not 4-byte aligned"),
            Self::UnsupportedFormat => write!(f, "pixel format is not 32-bit direct color"),
        }
    }
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroScale => write!(f, "scale factors must be at least 1"),
            Self::BitmapTooShort { needed, available } => {
                write!(f, "bitmap has {} bytes, needs {}", available, needed)
            }
            Self::TooLarge { width, height } => {
                write!(f, "{}x{} does not fit the resolution", width, height)
            }
            Self::OriginOutOfBounds { x, y } => write!(f, "origin ({}, {}) is off-surface", x, y),
            Self::ExtentOutOfBounds { right, bottom } => {
                write!(f, "extent reaches ({}, {}) past the surface edge", right, bottom)
            }
            Self::EndpointOutOfBounds { x, y } => {
                write!(f, "endpoint ({}, {}) is off-surface", x, y)
            }
            Self::OutOfMemory { requested } => {
                write!(f, "could not allocate {} bytes for formatted text", requested)
            }
            Self::Format => write!(f, "formatting failed"),
        }
    }
}

pub type DrawResult = Result<(), DrawError>;
