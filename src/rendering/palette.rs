//! Mapping from a stretched intensity to an opaque RGBA pixel.

use serde::{Deserialize, Serialize};

const ALPHA: u32 = 0xff00_0000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Palette {
    /// Equal red, green and blue
    Gray,
    /// Per-channel weights in `[0, 1]` applied to the intensity
    Tint { red: f32, green: f32, blue: f32 },
}

impl Palette {
    /// Warm false-color tint used for Mars imagery
    pub const WARM_TINT: Palette = Palette::Tint {
        red: 1.0,
        green: 0.5,
        blue: 0.3,
    };

    pub fn tint(red: f32, green: f32, blue: f32) -> Self {
        Palette::Tint {
            red: clamp_weight(red),
            green: clamp_weight(green),
            blue: clamp_weight(blue),
        }
    }

    /// RGBA bytes for intensity `c`; alpha is always opaque.
    #[inline]
    pub fn color(&self, c: u8) -> [u8; 4] {
        match *self {
            Palette::Gray => [c, c, c, 0xff],
            Palette::Tint { red, green, blue } => {
                [weigh(red, c), weigh(green, c), weigh(blue, c), 0xff]
            }
        }
    }

    /// Packed `0xAABBGGRR` word, the little-endian view of [`Palette::color`].
    pub fn pack(&self, c: u8) -> u32 {
        let [r, g, b, _] = self.color(c);
        ALPHA | u32::from(r) | (u32::from(g) << 8) | (u32::from(b) << 16)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::WARM_TINT
    }
}

fn clamp_weight(weight: f32) -> f32 {
    if weight.is_nan() {
        0.0
    } else {
        weight.clamp(0.0, 1.0)
    }
}

#[inline]
fn weigh(weight: f32, c: u8) -> u8 {
    // truncates, and saturates for weights outside [0, 1]
    (clamp_weight(weight) * f32::from(c)) as u8
}
