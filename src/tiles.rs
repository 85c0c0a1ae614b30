//! Splits the raster into square tiles of at most `tile_size` pixels a
//! side.  Tiles along the right and bottom edges are clipped, so the
//! tiles of a grid cover every pixel exactly once.

use itertools::iproduct;
use std::ops::Range;

use crate::errors::RenderError;
use crate::planes::Resolution;

/// A rectangle of the raster, rendered as one unit of work.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Column of the tile's left edge.
    pub x: usize,
    /// Row of the tile's top edge.
    pub y: usize,
    /// Number of columns in the tile.
    pub width: usize,
    /// Number of rows in the tile.
    pub height: usize,
}

impl Tile {
    /// The raster columns this tile spans.
    pub fn columns(&self) -> Range<usize> {
        self.x..self.x + self.width
    }

    /// The raster rows this tile spans.
    pub fn rows(&self) -> Range<usize> {
        self.y..self.y + self.height
    }

    /// Number of pixels in the tile.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Never true for a tile produced by a TileGrid.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The layout of tiles over a raster.
#[derive(Copy, Clone, Debug)]
pub struct TileGrid {
    resolution: Resolution,
    tile_size: usize,
    /// Number of tile columns.
    pub tiles_x: usize,
    /// Number of tile rows.
    pub tiles_y: usize,
}

impl TileGrid {
    /// Lays tiles of `tile_size` over the raster, rounding the tile
    /// counts up so partial tiles cover the edges.  Tiles larger than
    /// the raster are shrunk to its longer side.
    pub fn new(resolution: Resolution, tile_size: usize) -> Result<TileGrid, RenderError> {
        if tile_size == 0 {
            return Err(RenderError::InvalidTileSize(tile_size));
        }
        let tile_size = tile_size.min(resolution.0.max(resolution.1).max(1));
        Ok(TileGrid {
            resolution,
            tile_size,
            tiles_x: (resolution.0 + tile_size - 1) / tile_size,
            tiles_y: (resolution.1 + tile_size - 1) / tile_size,
        })
    }

    /// The edge length of an unclipped tile.
    pub fn tile_size(&self) -> usize {
        self.tile_size
    }

    /// Total number of tiles.
    pub fn len(&self) -> usize {
        self.tiles_x * self.tiles_y
    }

    /// True only for an empty raster.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The tile in tile-column `tx` and tile-row `ty`, clipped to the
    /// raster.
    pub fn tile(&self, tx: usize, ty: usize) -> Tile {
        let x = tx * self.tile_size;
        let y = ty * self.tile_size;
        Tile {
            x,
            y,
            width: (x + self.tile_size).min(self.resolution.0) - x,
            height: (y + self.tile_size).min(self.resolution.1) - y,
        }
    }

    /// Every tile of one tile-row, left to right.
    pub fn band(&self, ty: usize) -> impl Iterator<Item = Tile> + '_ {
        (0..self.tiles_x).map(move |tx| self.tile(tx, ty))
    }

    /// Every tile, in raster order.
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        iproduct!(0..self.tiles_y, 0..self.tiles_x).map(move |(ty, tx)| self.tile(tx, ty))
    }
}
