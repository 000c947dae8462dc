//! Sample-to-RGBA rendering.

use image::{Rgba, RgbaImage};

use super::{contrast::Stretch, ContrastRange, Palette};
use crate::{codec::SampleBuffer, MapError, Result};

/// Render a decoded sample buffer into a new RGBA image.
pub fn render_samples(samples: &SampleBuffer, range: ContrastRange, palette: Palette) -> RgbaImage {
    let mut image = RgbaImage::new(samples.width(), samples.height());
    fill(samples, range, palette, &mut image);
    image
}

/// Render a decoded sample buffer into an existing surface.
///
/// Every pixel of `target` is overwritten, so drawing the same samples with
/// the same range twice leaves byte-identical output.
pub fn render_into(
    samples: &SampleBuffer,
    range: ContrastRange,
    palette: Palette,
    target: &mut RgbaImage,
) -> Result<()> {
    if target.dimensions() != samples.dimensions() {
        return Err(MapError::Render(format!(
            "surface is {}x{} but samples are {}x{}",
            target.width(),
            target.height(),
            samples.width(),
            samples.height()
        )));
    }
    fill(samples, range, palette, target);
    Ok(())
}

fn fill(samples: &SampleBuffer, range: ContrastRange, palette: Palette, target: &mut RgbaImage) {
    let stretch = Stretch::new(range);
    for (pixel, &sample) in target.pixels_mut().zip(samples.data()) {
        *pixel = Rgba(palette.color(stretch.apply(sample)));
    }
}
