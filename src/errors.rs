//! The ways a render can be refused or aborted.  Every input error is
//! detected before the divergence buffer is allocated, so a failed
//! render never leaves a partial image behind.

use failure::Fail;

/// Errors reported by the renderer.
#[derive(Debug, Fail, PartialEq)]
pub enum RenderError {
    /// The viewport is inverted, empty, or has a non-finite bound.
    #[fail(
        display = "Invalid viewport: x {}..{}, y {}..{} (need finite bounds with min < max)",
        x_min, x_max, y_min, y_max
    )]
    InvalidViewport {
        /// Left edge of the viewport.
        x_min: f64,
        /// Right edge of the viewport.
        x_max: f64,
        /// Lower edge of the viewport.
        y_min: f64,
        /// Upper edge of the viewport.
        y_max: f64,
    },

    /// Width or height is zero, or too large for an 8-bit image.
    #[fail(display = "Invalid resolution: {}x{}", width, height)]
    InvalidResolution {
        /// Requested width in pixels.
        width: usize,
        /// Requested height in pixels.
        height: usize,
    },

    /// The iteration cap must be at least one.
    #[fail(display = "Iteration cap must be positive, got {}", _0)]
    InvalidIterationCap(u32),

    /// Tiles must be at least one pixel on a side.
    #[fail(display = "Tile size must be positive, got {}", _0)]
    InvalidTileSize(usize),

    /// At least one worker is needed.
    #[fail(display = "Thread count must be positive, got {}", _0)]
    InvalidThreadCount(usize),

    /// A worker thread panicked; the whole render is discarded.
    #[fail(display = "A render worker panicked")]
    WorkerPanicked,
}
