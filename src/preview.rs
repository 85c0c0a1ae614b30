//! A quick look at a render in the terminal.  Works from the raw
//! grayscale pixels and their shape only, so it can preview any 8-bit
//! single-channel buffer.

use image::imageops::{resize, FilterType};
use image::{GrayImage, ImageBuffer};

/// Characters from darkest to brightest.
const RAMP: &[u8] = b" .:-=+*#%@";

/// Shrinks the image to `cols` x `rows` and draws it with one
/// character per pixel, one line per row.  Returns None if `pixels`
/// is not `width * height` long.
pub fn ascii_preview(pixels: &[u8], width: u32, height: u32, cols: u32, rows: u32) -> Option<String> {
    let image: GrayImage = ImageBuffer::from_raw(width, height, pixels.to_vec())?;
    let small = resize(&image, cols, rows, FilterType::Lanczos3);
    let mut out = String::with_capacity(((cols + 1) * rows) as usize);
    for row in small.rows() {
        out.extend(row.map(|p| RAMP[usize::from(p.0[0] / 26)] as char));
        out.push('\n');
    }
    Some(out)
}
