//! Turns a finished divergence buffer into an 8-bit grayscale image.
//! Counts are log-scaled, then stretched so the largest one maps to
//! 255.  The stretch needs the global maximum, so this can only run
//! once every tile has been written.

use image::{GrayImage, ImageBuffer, Luma};
use num::clamp;

use crate::render::DivergenceBuffer;

/// Maps counts to intensities: `ln(count + 1) / max * 255`, truncated.
/// A buffer whose log-maximum is 0 (every count is 0) comes out black.
pub fn intensities(counts: &[u32]) -> Vec<u8> {
    let logs: Vec<f64> = counts.iter().map(|&c| (f64::from(c) + 1.0).ln()).collect();
    let max = logs.iter().cloned().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return vec![0; counts.len()];
    }
    logs.iter()
        .map(|l| clamp(l / max * 255.0, 0.0, 255.0) as u8)
        .collect()
}

/// Shades a whole buffer into a single-channel image of the same
/// shape.
pub fn to_image(buffer: &DivergenceBuffer) -> GrayImage {
    let pixels = intensities(buffer.counts());
    let width = buffer.width();
    ImageBuffer::from_fn(buffer.width() as u32, buffer.height() as u32, |x, y| {
        Luma([pixels[y as usize * width + x as usize]])
    })
}
