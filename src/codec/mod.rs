//! Decoding of encoded tile bytes into single-channel intensity samples.
//!
//! The layer only depends on [`SampleCodec`]; [`ImageCodec`] is the default
//! backend and [`probe`] reads JPEG frame headers without decoding.

pub mod image_codec;
pub mod probe;

pub use image_codec::ImageCodec;
pub use probe::{probe, JpegInfo, ProbeError};

use crate::{MapError, Result};

/// What the caller expects the encoded image to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeRequest {
    pub width: u32,
    pub height: u32,
    pub num_components: u8,
}

impl DecodeRequest {
    pub fn single_channel(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            num_components: 1,
        }
    }
}

/// Decoder from encoded bytes to widened intensity samples.
pub trait SampleCodec: Send + Sync {
    fn decode(&self, bytes: &[u8], request: &DecodeRequest) -> Result<SampleBuffer>;
}

/// Row-major single-channel samples, 12-bit values stored in `u16`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    width: u32,
    height: u32,
    data: Vec<u16>,
}

impl SampleBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u16>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(MapError::Decode(format!(
                "expected {} samples for {}x{}, got {}",
                expected,
                width,
                height,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u16] {
        &self.data
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn into_raw(self) -> Vec<u16> {
        self.data
    }
}
