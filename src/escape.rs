//! The escape-time kernel.  For every point `c` the orbit
//! `z <- z * z + c` is followed from `z = 0` until it leaves the
//! circle of radius two or the iteration cap runs out.

use crate::planes::CoordinateGrid;

/// Squared radius of the escape circle, |z| > 2.
pub const ESCAPE_THRESHOLD: f64 = 4.0;

/// Returns the iteration `k` at which the orbit of `cr + ci*i` was
/// first seen outside the escape circle, or `max_iter - 1` if it
/// never was.  An orbit that escapes on the very last iteration also
/// reports `max_iter - 1`; the two cases cannot be told apart.
#[inline]
pub fn escape_time(cr: f64, ci: f64, max_iter: u32) -> u32 {
    let mut escaped_at = max_iter.saturating_sub(1);
    let (mut zr, mut zi) = (0.0_f64, 0.0_f64);
    for k in 0..max_iter {
        let zr2 = zr * zr;
        let zi2 = zi * zi;
        if zr2 + zi2 > ESCAPE_THRESHOLD {
            escaped_at = k;
            break;
        }
        zi = 2.0 * zr * zi + ci;
        zr = zr2 - zi2 + cr;
    }
    escaped_at
}

/// Runs the kernel over every point of a coordinate grid, producing a
/// row-major grid of divergence counts with the same shape.
pub fn evaluate(grid: &CoordinateGrid, max_iter: u32) -> Vec<u32> {
    grid.re
        .iter()
        .zip(grid.im.iter())
        .map(|(&cr, &ci)| escape_time(cr, ci, max_iter))
        .collect()
}
