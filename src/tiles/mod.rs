pub mod loader;
pub mod source;

// Re-exports for convenience
pub use loader::{HttpFetcher, TileFetcher};
pub use source::{TileSource, UrlTemplateSource};
