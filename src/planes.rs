//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane with an arbitrary pair of
//! corners defining the leftlower and rightupper corners of the
//! viewport.
use num::Complex;
use std::ops::Range;

use crate::errors::RenderError;

/// Describes the width and height of the pixel raster.  The raster is
/// assumed to start at 0,0, so only the far corner is stored.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resolution(pub usize, pub usize);

impl Resolution {
    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.0
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.1
    }
}

/// Describes the lower-left corner and upper-right corner of the
/// region of the complex plane being rendered, treating the real part
/// of each value as the x-component and the imaginary part of each
/// value as the y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport(pub Complex<f64>, pub Complex<f64>);

impl Viewport {
    /// Builds a viewport out of its four bounds.
    pub fn from_bounds(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Viewport(Complex::new(x_min, y_min), Complex::new(x_max, y_max))
    }

    /// Rejects inverted, empty, and non-finite viewports.
    pub fn validate(&self) -> Result<(), RenderError> {
        let (ll, ru) = (self.0, self.1);
        let finite = ll.re.is_finite() && ll.im.is_finite() && ru.re.is_finite() && ru.im.is_finite();
        let spans = (ru.re - ll.re).is_finite() && (ru.im - ll.im).is_finite();
        if !finite || !spans || ll.re >= ru.re || ll.im >= ru.im {
            return Err(RenderError::InvalidViewport {
                x_min: ll.re,
                x_max: ru.re,
                y_min: ll.im,
                y_max: ru.im,
            });
        }
        Ok(())
    }
}

/// Describes the x, y of a pixel in the raster.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The complex coordinates of a rectangular block of pixels, as two
/// row-major grids of equal shape: one for the real parts and one for
/// the imaginary parts.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateGrid {
    /// Number of columns in the block.
    pub width: usize,
    /// Number of rows in the block.
    pub height: usize,
    /// Real part of every point, row-major.
    pub re: Vec<f64>,
    /// Imaginary part of every point, row-major.
    pub im: Vec<f64>,
}

impl CoordinateGrid {
    /// Total number of points in the grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True when the grid holds no points.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Contains the definitions of two planes: the integral pixel raster,
/// and the complex viewport.  Maps points from one to the other.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The size of the pixel raster.
    pub resolution: Resolution,
    /// The two corners of the complex viewport, left-lower and
    /// right-upper.
    pub viewport: Viewport,
    // The width and height of a single pixel, measured on the complex
    // plane.
    scale: (f64, f64),
}

impl PlaneMapper {
    /// Constructor.  Takes the resolution of the raster and the
    /// viewport it covers.  Both are validated here, so a PlaneMapper
    /// that exists is always safe to map with.
    pub fn new(resolution: Resolution, viewport: Viewport) -> Result<PlaneMapper, RenderError> {
        if resolution.0 == 0 || resolution.1 == 0 {
            return Err(RenderError::InvalidResolution {
                width: resolution.0,
                height: resolution.1,
            });
        }
        viewport.validate()?;

        let scale = (
            (viewport.1.re - viewport.0.re) / (resolution.0 as f64),
            (viewport.1.im - viewport.0.im) / (resolution.1 as f64),
        );

        Ok(PlaneMapper {
            resolution,
            viewport,
            scale,
        })
    }

    /// The total number of pixels in the raster.  Used to size the
    /// divergence buffer.
    pub fn len(&self) -> usize {
        self.resolution.0 * self.resolution.1
    }

    /// Describes that the raster has no pixels.  Never true for a
    /// validated mapper.
    pub fn is_empty(&self) -> bool {
        self.resolution.0 == 0 || self.resolution.1 == 0
    }

    /// Given a pixel on the raster, map it to its point on the complex
    /// plane.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.viewport.0.re + (pixel.0 as f64) * self.scale.0,
            self.viewport.0.im + (pixel.1 as f64) * self.scale.1,
        )
    }

    /// Given a complex number inside the viewport, map that as
    /// closely as possible to a pixel on the raster.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Pixel {
        let factors = (
            (self.resolution.0 as f64) / (self.viewport.1.re - self.viewport.0.re),
            (self.resolution.1 as f64) / (self.viewport.1.im - self.viewport.0.im),
        );
        let left = (point.re - self.viewport.0.re) * factors.0;
        let top = (point.im - self.viewport.0.im) * factors.1;
        Pixel(left as usize, top as usize)
    }

    /// Produces the complex coordinates of every pixel in the block
    /// spanned by `columns` and `rows`.  Column `x` lands on
    /// `x_min + x * (x_max - x_min) / width`, and likewise for rows.
    pub fn coordinates(&self, columns: Range<usize>, rows: Range<usize>) -> CoordinateGrid {
        let reals: Vec<f64> = columns
            .clone()
            .map(|x| self.viewport.0.re + (x as f64) * self.scale.0)
            .collect();
        let width = reals.len();
        let height = rows.len();
        let mut re = Vec::with_capacity(width * height);
        let mut im = Vec::with_capacity(width * height);
        for y in rows {
            let imaginary = self.viewport.0.im + (y as f64) * self.scale.1;
            re.extend_from_slice(&reals);
            im.extend(std::iter::repeat(imaginary).take(width));
        }
        CoordinateGrid { width, height, re, im }
    }
}
