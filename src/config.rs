//! Everything one render needs to know, checked up front.

use crate::errors::RenderError;
use crate::planes::{Resolution, Viewport};

/// Tile edge used when the caller does not pick one.
pub const DEFAULT_TILE_SIZE: usize = 256;

/// The parameters of a single render.  Immutable for the duration of
/// the render; `validate` is run before anything is allocated.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Output width in pixels.
    pub width: usize,
    /// Output height in pixels.
    pub height: usize,
    /// Iteration cap per point.
    pub max_iter: u32,
    /// Left edge of the viewport.
    pub x_min: f64,
    /// Right edge of the viewport.
    pub x_max: f64,
    /// Lower edge of the viewport.
    pub y_min: f64,
    /// Upper edge of the viewport.
    pub y_max: f64,
    /// Edge length of a tile, in pixels.
    pub tile_size: usize,
    /// Size of the worker pool.  One renders on the calling thread.
    pub threads: usize,
}

impl Default for RenderConfig {
    /// The whole set, at preview size.
    fn default() -> Self {
        RenderConfig {
            width: 640,
            height: 480,
            max_iter: 256,
            x_min: -2.0,
            x_max: 0.5,
            y_min: -1.25,
            y_max: 1.25,
            tile_size: DEFAULT_TILE_SIZE,
            threads: 1,
        }
    }
}

impl RenderConfig {
    /// The raster the image is drawn on.
    pub fn resolution(&self) -> Resolution {
        Resolution(self.width, self.height)
    }

    /// The region of the complex plane being drawn.
    pub fn viewport(&self) -> Viewport {
        Viewport::from_bounds(self.x_min, self.x_max, self.y_min, self.y_max)
    }

    /// Fails fast on the first bad parameter.
    pub fn validate(&self) -> Result<(), RenderError> {
        self.viewport().validate()?;
        let max_side = u32::max_value() as usize;
        if self.width == 0 || self.height == 0 || self.width > max_side || self.height > max_side {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_iter == 0 {
            return Err(RenderError::InvalidIterationCap(self.max_iter));
        }
        if self.tile_size == 0 {
            return Err(RenderError::InvalidTileSize(self.tile_size));
        }
        if self.threads == 0 {
            return Err(RenderError::InvalidThreadCount(self.threads));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
        assert_eq!(RenderConfig::default().tile_size, 256);
    }

    #[test]
    fn inverted_viewport_is_rejected() {
        let config = RenderConfig {
            x_min: 1.0,
            x_max: -1.0,
            ..RenderConfig::default()
        };
        match config.validate() {
            Err(RenderError::InvalidViewport { x_min, x_max, .. }) => {
                assert_eq!((x_min, x_max), (1.0, -1.0));
            }
            other => panic!("unexpected {:?}", other),
        }

        let config = RenderConfig {
            y_min: 0.5,
            y_max: 0.5,
            ..RenderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn each_bad_parameter_has_its_own_error() {
        let base = RenderConfig::default();
        assert_eq!(
            RenderConfig { height: 0, ..base }.validate(),
            Err(RenderError::InvalidResolution { width: 640, height: 0 })
        );
        assert_eq!(
            RenderConfig { max_iter: 0, ..base }.validate(),
            Err(RenderError::InvalidIterationCap(0))
        );
        assert_eq!(
            RenderConfig { tile_size: 0, ..base }.validate(),
            Err(RenderError::InvalidTileSize(0))
        );
        assert_eq!(
            RenderConfig { threads: 0, ..base }.validate(),
            Err(RenderError::InvalidThreadCount(0))
        );
    }

    #[test]
    fn viewport_is_checked_first() {
        let config = RenderConfig {
            width: 0,
            x_max: -3.0,
            ..RenderConfig::default()
        };
        match config.validate() {
            Err(RenderError::InvalidViewport { .. }) => (),
            other => panic!("unexpected {:?}", other),
        }
    }
}
