//! Default [`SampleCodec`] backed by the `image` crate.

use image::{DynamicImage, ImageFormat};

use super::{probe, DecodeRequest, SampleBuffer, SampleCodec};
use crate::{MapError, Result};

/// Decodes grayscale JPEG and PNG tiles into widened samples.
///
/// JPEG headers are probed first so that geometry and precision mismatches
/// are reported before any decoding work. Only 8-bit JPEG is decoded here;
/// 12-bit streams are refused with a [`MapError::Decode`] and need a codec
/// plugged in through [`crate::Jpeg12Layer::with_codec`]. 8-bit samples are widened without
/// rescaling and 16-bit samples are kept as they are, so a 12-bit image keeps
/// its 0..=4095 range.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCodec;

impl ImageCodec {
    pub fn new() -> Self {
        Self
    }
}

impl SampleCodec for ImageCodec {
    fn decode(&self, bytes: &[u8], request: &DecodeRequest) -> Result<SampleBuffer> {
        if bytes.is_empty() {
            return Err(MapError::UnrecognizedData);
        }
        if request.num_components != 1 {
            return Err(MapError::Decode(format!(
                "only single-channel output is supported, {} components requested",
                request.num_components
            )));
        }

        let format = image::guess_format(bytes).map_err(|_| MapError::UnrecognizedData)?;
        if format == ImageFormat::Jpeg {
            check_jpeg_header(bytes, request)?;
        }

        let image = image::load_from_memory_with_format(bytes, format)?;
        if (image.width(), image.height()) != (request.width, request.height) {
            return Err(MapError::Decode(format!(
                "expected {}x{}, decoded {}x{}",
                request.width,
                request.height,
                image.width(),
                image.height()
            )));
        }

        let (width, height) = (image.width(), image.height());
        let data = widen(image)?;
        SampleBuffer::new(width, height, data)
    }
}

fn check_jpeg_header(bytes: &[u8], request: &DecodeRequest) -> Result<()> {
    let info = probe(bytes)?;
    if (u32::from(info.width), u32::from(info.height)) != (request.width, request.height)
        || info.num_components != request.num_components
    {
        return Err(MapError::Decode(format!(
            "expected {}x{}x{}, stream is {}x{}x{}",
            request.width,
            request.height,
            request.num_components,
            info.width,
            info.height,
            info.num_components
        )));
    }
    match info.data_precision {
        8 => Ok(()),
        12 => Err(MapError::Decode(
            "12-bit JPEG needs a 12-bit codec; see Jpeg12Layer::with_codec".to_string(),
        )),
        bits => Err(MapError::Decode(format!(
            "unsupported JPEG precision of {} bits",
            bits
        ))),
    }
}

fn widen(image: DynamicImage) -> Result<Vec<u16>> {
    match image {
        DynamicImage::ImageLuma8(buffer) => Ok(buffer.into_raw().into_iter().map(u16::from).collect()),
        DynamicImage::ImageLumaA8(buffer) => {
            Ok(buffer.pixels().map(|p| u16::from(p.0[0])).collect())
        }
        DynamicImage::ImageLuma16(buffer) => Ok(buffer.into_raw()),
        DynamicImage::ImageLumaA16(buffer) => Ok(buffer.pixels().map(|p| p.0[0]).collect()),
        other => Err(MapError::Decode(format!(
            "expected a single-channel image, found {:?}",
            other.color()
        ))),
    }
}
