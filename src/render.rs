//! The tile orchestrator.  Maps each tile onto the complex plane,
//! runs the escape-time kernel over it, and copies the counts into
//! their place in the full divergence buffer.
//!
//! The multi-threaded path hands out whole tile-rows ("bands") to a
//! fixed pool of workers.  The buffer is cut into one mutable slice
//! per band before any worker starts, so each worker owns the pixels
//! it writes and no locking is needed on the buffer itself.

use crossbeam::channel::Sender;
use log::{debug, info};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::RenderConfig;
use crate::errors::RenderError;
use crate::escape;
use crate::planes::{PlaneMapper, Resolution};
use crate::tiles::{Tile, TileGrid};

/// The per-pixel escape-time counts of a whole render, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct DivergenceBuffer {
    resolution: Resolution,
    counts: Vec<u32>,
}

impl DivergenceBuffer {
    /// Wraps an existing row-major count grid.  Returns None if the
    /// grid does not match the resolution.
    pub fn from_counts(resolution: Resolution, counts: Vec<u32>) -> Option<Self> {
        if counts.len() != resolution.0 * resolution.1 {
            return None;
        }
        Some(DivergenceBuffer { resolution, counts })
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.resolution.0
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.resolution.1
    }

    /// The raw counts, row-major.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// The count for column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.counts[y * self.resolution.0 + x]
    }
}

/// Timing and shape of a finished render.
#[derive(Copy, Clone, Debug)]
pub struct RenderStats {
    /// Size of the rendered raster.
    pub resolution: Resolution,
    /// Iteration cap used.
    pub max_iter: u32,
    /// Tile columns and tile rows.
    pub tiles: (usize, usize),
    /// Edge length of an unclipped tile.
    pub tile_size: usize,
    /// Wall-clock time spent computing the divergence buffer.
    pub elapsed: Duration,
}

impl RenderStats {
    /// Size of the raster in millions of pixels.
    pub fn megapixels(&self) -> f64 {
        (self.resolution.0 * self.resolution.1) as f64 / 1e6
    }

    /// Throughput, or 0 if the render took no measurable time.
    pub fn megapixels_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds > 0.0 {
            self.megapixels() / seconds
        } else {
            0.0
        }
    }
}

/// Renders divergence buffers tile by tile.  Once built, a renderer
/// holds a validated configuration and cannot fail except through a
/// worker panic.
#[derive(Debug)]
pub struct TiledRenderer {
    plane: PlaneMapper,
    grid: TileGrid,
    max_iter: u32,
    threads: usize,
}

impl TiledRenderer {
    /// Validates the configuration and lays out the tiles.
    pub fn new(config: &RenderConfig) -> Result<Self, RenderError> {
        config.validate()?;
        Ok(TiledRenderer {
            plane: PlaneMapper::new(config.resolution(), config.viewport())?,
            grid: TileGrid::new(config.resolution(), config.tile_size)?,
            max_iter: config.max_iter,
            threads: config.threads,
        })
    }

    /// The tile layout this renderer uses.
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Counts for a single tile, row-major within the tile.
    pub fn render_tile(&self, tile: &Tile) -> Vec<u32> {
        let coordinates = self.plane.coordinates(tile.columns(), tile.rows());
        escape::evaluate(&coordinates, self.max_iter)
    }

    /// Renders every tile of tile-row `ty` into `band`, the slice of
    /// the full buffer covering exactly those rows.
    fn render_band(&self, ty: usize, band: &mut [u32], progress: Option<&Sender<Tile>>) {
        let width = self.plane.resolution.0;
        for tile in self.grid.band(ty) {
            let counts = self.render_tile(&tile);
            for (row, line) in counts.chunks(tile.width).enumerate() {
                let start = row * width + tile.x;
                band[start..start + tile.width].copy_from_slice(line);
            }
            if let Some(progress) = progress {
                // Nobody listening is not a reason to stop.
                let _ = progress.send(tile);
            }
        }
        debug!("band {} of {} done", ty + 1, self.grid.tiles_y);
    }

    /// The reference single-threaded render: every tile in raster
    /// order, on the calling thread.
    pub fn divergence_single(&self, progress: Option<&Sender<Tile>>) -> DivergenceBuffer {
        let mut counts = vec![0_u32; self.plane.len()];
        let band_len = self.grid.tile_size().saturating_mul(self.plane.resolution.0);
        for (ty, band) in counts.chunks_mut(band_len).enumerate() {
            self.render_band(ty, band, progress);
        }
        DivergenceBuffer {
            resolution: self.plane.resolution,
            counts,
        }
    }

    /// Renders with the configured number of workers.  Each completed
    /// tile is sent to `progress`, if given.  Returns only after every
    /// worker has finished.
    pub fn divergence(&self, progress: Option<&Sender<Tile>>) -> Result<DivergenceBuffer, RenderError> {
        let workers = self.threads.min(self.grid.tiles_y);
        if workers <= 1 {
            return Ok(self.divergence_single(progress));
        }

        let mut counts = vec![0_u32; self.plane.len()];
        let band_len = self.grid.tile_size().saturating_mul(self.plane.resolution.0);
        {
            let bands: Vec<(usize, &mut [u32])> = counts.chunks_mut(band_len).enumerate().collect();
            let bands = Arc::new(Mutex::new(bands.into_iter()));
            crossbeam::scope(|spawner| {
                for _ in 0..workers {
                    let bands = bands.clone();
                    spawner.spawn(move |_| loop {
                        let band = match bands.lock() {
                            Ok(mut queue) => queue.next(),
                            Err(_) => None,
                        };
                        match band {
                            Some((ty, band)) => self.render_band(ty, band, progress),
                            None => break,
                        }
                    });
                }
            })
            .map_err(|_| RenderError::WorkerPanicked)?;
        }

        Ok(DivergenceBuffer {
            resolution: self.plane.resolution,
            counts,
        })
    }

    /// Renders the divergence buffer and reports how long it took.
    pub fn divergence_with_stats(
        &self,
        progress: Option<&Sender<Tile>>,
    ) -> Result<(DivergenceBuffer, RenderStats), RenderError> {
        let start = Instant::now();
        let buffer = self.divergence(progress)?;
        let stats = RenderStats {
            resolution: self.plane.resolution,
            max_iter: self.max_iter,
            tiles: (self.grid.tiles_x, self.grid.tiles_y),
            tile_size: self.grid.tile_size(),
            elapsed: start.elapsed(),
        };
        info!(
            "rendered {}x{} at {} iterations in {}x{} tiles of {}: {:.3}s, {:.2} Mpx/s",
            stats.resolution.0,
            stats.resolution.1,
            stats.max_iter,
            stats.tiles.0,
            stats.tiles.1,
            stats.tile_size,
            stats.elapsed.as_secs_f64(),
            stats.megapixels_per_second()
        );
        Ok((buffer, stats))
    }
}
