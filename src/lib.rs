#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tiled Mandelbrot renderer
//!
//! The Mandelbrot set is the set of points `c` on the complex plane
//! for which the orbit `z <- z * z + c`, started at zero, stays
//! bounded.  This crate measures how quickly each point of a viewport
//! leaves the circle of radius two (its "escape time") and turns those
//! counts into a grayscale image.
//!
//! Rendering works in square tiles, so only one tile's worth of
//! complex coordinates is alive at a time.  Tiles never share output
//! pixels, which lets a pool of workers render them in any order and
//! still produce exactly the same divergence buffer.
//!
//! ```no_run
//! let config = tilebrot::RenderConfig {
//!     width: 1920,
//!     height: 1080,
//!     max_iter: 4096,
//!     threads: 4,
//!     ..tilebrot::RenderConfig::default()
//! };
//! let image = tilebrot::render(&config).unwrap();
//! image.save("mandelbrot.png").unwrap();
//! ```

use crossbeam::channel::Sender;
use image::GrayImage;

pub mod config;
pub mod errors;
pub mod escape;
pub mod planes;
pub mod preview;
pub mod render;
pub mod shade;
pub mod tiles;

pub use crate::config::{RenderConfig, DEFAULT_TILE_SIZE};
pub use crate::errors::RenderError;
pub use crate::planes::{PlaneMapper, Resolution, Viewport};
pub use crate::render::{DivergenceBuffer, RenderStats, TiledRenderer};
pub use crate::tiles::{Tile, TileGrid};

/// Renders the configured viewport to a grayscale image.
pub fn render(config: &RenderConfig) -> Result<GrayImage, RenderError> {
    render_with_stats(config, None).map(|(image, _)| image)
}

/// Renders the configured viewport, sending every finished tile to
/// `progress` and returning timing statistics alongside the image.
pub fn render_with_stats(
    config: &RenderConfig,
    progress: Option<&Sender<Tile>>,
) -> Result<(GrayImage, RenderStats), RenderError> {
    let renderer = TiledRenderer::new(config)?;
    let (buffer, stats) = renderer.divergence_with_stats(progress)?;
    Ok((shade::to_image(&buffer), stats))
}
