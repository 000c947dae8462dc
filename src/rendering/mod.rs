pub mod contrast;
pub mod palette;
pub mod pipeline;

// Re-export main types
pub use contrast::ContrastRange;
pub use palette::Palette;
pub use pipeline::{render_into, render_samples};
