//! Fetch one tile, render it with a contrast window and save it as PNG.
//!
//! ```text
//! cargo run --example render_tile -- 12 1520 820 --min 200 --max 1800 \
//!     --url-template 'http://localhost:8080/tiles/{z}/{y}/{x}.png' --out tile.png
//! ```
//!
//! The demo uses the default codec, which reads 8-bit JPEG and 8/16-bit
//! grayscale PNG. The raw HiRISE service serves 12-bit JPEG, so pointing the
//! demo at it reports a decode error until a 12-bit codec is plugged in with
//! `Jpeg12Layer::with_codec`.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use jpeg12_tiles::{
    ContrastRange, GridLayer, Jpeg12Layer, LayerOptions, MapError, Palette, TileCoord,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaletteArg {
    Gray,
    Tint,
}

impl From<PaletteArg> for Palette {
    fn from(arg: PaletteArg) -> Self {
        match arg {
            PaletteArg::Gray => Palette::Gray,
            PaletteArg::Tint => Palette::WARM_TINT,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "render_tile", about = "Render a single 12-bit tile to PNG")]
struct Args {
    /// Zoom level
    z: u8,
    /// Tile row
    y: u32,
    /// Tile column
    x: u32,

    /// Sample value mapped to black
    #[arg(long, default_value_t = 0.0)]
    min: f64,

    /// Sample value mapped to full intensity
    #[arg(long, default_value_t = 4095.0)]
    max: f64,

    /// Defaults to the warm tint
    #[arg(long, value_enum)]
    palette: Option<PaletteArg>,

    /// Endpoint template containing {z}, {y} and {x} [default: HiRISE raw]
    #[arg(long)]
    url_template: Option<String>,

    /// Tile edge in pixels [default: 256]
    #[arg(long)]
    tile_size: Option<u32>,

    /// Layer options as JSON; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, short, default_value = "tile.png")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    jpeg12_tiles::logging::init();
    let args = Args::parse();

    let mut options = match &args.config {
        Some(path) => LayerOptions::load(path)
            .with_context(|| format!("reading layer options from {}", path.display()))?,
        None => LayerOptions::default(),
    };
    if let Some(template) = args.url_template.clone() {
        options = options.with_url_template(template);
    }
    if let Some(tile_size) = args.tile_size {
        options = options.with_tile_size(tile_size);
    }
    if let Some(palette) = args.palette {
        options = options.with_palette(palette.into());
    }

    let layer = Jpeg12Layer::new("demo", options).context("building layer")?;
    let coord = TileCoord::new(args.x, args.y, args.z);
    let range = ContrastRange::new(args.min, args.max);

    log::info!("requesting {}", layer.tile_url(coord));
    let (tile, error) = layer.create_tile(coord, &range).await.into_parts();
    match error {
        Some(MapError::Decode(message)) if message.contains("12-bit") => bail!(
            "tile {} is a 12-bit JPEG, which the default codec can not decode; \
             serve 16-bit PNG tiles via --url-template or build the layer with a \
             12-bit codec",
            coord
        ),
        Some(err) => bail!("tile {} could not be rendered: {}", coord, err),
        None => {}
    }

    tile.surface()
        .save(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    log::info!("wrote {}", args.out.display());
    Ok(())
}
