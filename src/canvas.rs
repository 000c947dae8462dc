//! Presentation of tile surfaces on HTML canvases.

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, ImageData};

use crate::{layers::tile::Tile, MapError, Result};

/// CSS class given to every tile canvas
pub const TILE_CLASS: &str = "leaflet-tile";

/// Create the canvas element a tile is presented on.
pub fn create_tile_canvas(document: &Document, tile_size: u32) -> Result<HtmlCanvasElement> {
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| MapError::Render("created element is not a canvas".to_string()))?;
    canvas.set_class_name(TILE_CLASS);
    canvas.set_width(tile_size);
    canvas.set_height(tile_size);
    Ok(canvas)
}

/// Copy a tile's RGBA surface onto `canvas`, resizing the canvas if needed.
pub fn present(tile: &Tile, canvas: &HtmlCanvasElement) -> Result<()> {
    let surface = tile.surface();
    let (width, height) = surface.dimensions();
    if canvas.width() != width || canvas.height() != height {
        canvas.set_width(width);
        canvas.set_height(height);
    }

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| MapError::Render("canvas has no 2d context".to_string()))?
        .dyn_into()
        .map_err(|_| MapError::Render("unexpected 2d context type".to_string()))?;

    let image = ImageData::new_with_u8_clamped_array_and_sh(
        Clamped(surface.as_raw().as_slice()),
        width,
        height,
    )
    .map_err(js_err)?;
    context.put_image_data(&image, 0.0, 0.0).map_err(js_err)?;
    log::trace!("presented tile {}", tile.coord());
    Ok(())
}

fn js_err(value: JsValue) -> MapError {
    MapError::Render(format!("{:?}", value))
}
