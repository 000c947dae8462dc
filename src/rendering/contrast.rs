//! Linear contrast stretch from a sample window onto the display range.

use serde::{Deserialize, Serialize};

use crate::core::constants::{DISPLAY_LEVELS, SAMPLE_MAX};

/// Intensity window `[min, max]` that is mapped onto display levels 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContrastRange {
    pub min: f64,
    pub max: f64,
}

impl ContrastRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The whole 12-bit sample range
    pub fn full() -> Self {
        Self::new(0.0, f64::from(SAMPLE_MAX))
    }

    /// A window with no usable width: empty, inverted or non-finite
    pub fn is_degenerate(&self) -> bool {
        let span = self.max - self.min;
        !(self.min.is_finite() && span.is_finite() && span > 0.0)
    }

    /// Display levels per sample unit; zero for a degenerate window.
    pub fn scale(&self) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            DISPLAY_LEVELS / (self.max - self.min)
        }
    }

    /// Stretch one sample to a display intensity.
    pub fn stretch(&self, sample: u16) -> u8 {
        Stretch::new(*self).apply(sample)
    }
}

impl Default for ContrastRange {
    fn default() -> Self {
        Self::full()
    }
}

/// Precomputed form of a [`ContrastRange`] for per-pixel loops.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Stretch {
    offset: f64,
    scale: f64,
}

impl Stretch {
    pub(crate) fn new(range: ContrastRange) -> Self {
        let scale = range.scale();
        // a degenerate window maps everything to 0, so the offset is irrelevant
        let offset = if scale == 0.0 { 0.0 } else { range.min };
        Self { offset, scale }
    }

    #[inline]
    pub(crate) fn apply(&self, sample: u16) -> u8 {
        let level = ((f64::from(sample) - self.offset) * self.scale).round();
        level.clamp(0.0, 255.0) as u8
    }
}
