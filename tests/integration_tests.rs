//! End-to-end tests: fetch, decode, contrast stretch and palette, with the
//! network replaced by an in-memory fetcher.

use std::{
    collections::HashMap,
    io::Cursor,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Luma};
use jpeg12_tiles::{
    ContrastHandle, ContrastRange, GridLayer, Jpeg12Layer, LayerOptions, MapError, Palette,
    Result, TileCoord, TileFetcher, TileGrid,
};

const TEMPLATE: &str = "https://tiles.test/raw/{z}/{y}/{x}";

/// Serves canned bodies per URL; anything else is a 404.
#[derive(Default)]
struct FakeServer {
    bodies: HashMap<String, Vec<u8>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeServer {
    fn with_tile(mut self, coord: TileCoord, body: Vec<u8>) -> Self {
        self.bodies.insert(tile_url(coord), body);
        self
    }
}

#[async_trait]
impl TileFetcher for FakeServer {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(url.to_string());
        self.bodies.get(url).cloned().ok_or_else(|| MapError::HttpStatus {
            status: 404,
            url: url.to_string(),
        })
    }
}

fn tile_url(coord: TileCoord) -> String {
    format!("https://tiles.test/raw/{}/{}/{}", coord.z, coord.y, coord.x)
}

/// 16-bit grayscale PNG holding 12-bit samples, row-major.
fn png_tile(size: u32, samples: &[u16]) -> Vec<u8> {
    let buffer: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_raw(size, size, samples.to_vec()).unwrap();
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageLuma16(buffer)
        .write_to(&mut cursor, ImageOutputFormat::Png)
        .unwrap();
    cursor.into_inner()
}

fn layer(server: FakeServer, palette: Palette) -> Jpeg12Layer {
    let options = LayerOptions::default()
        .with_url_template(TEMPLATE)
        .with_tile_size(2)
        .with_palette(palette);
    Jpeg12Layer::new("hirise", options)
        .unwrap()
        .with_fetcher(server)
}

#[tokio::test]
async fn test_full_range_gray_tile() {
    let coord = TileCoord::new(1, 0, 1);
    let server = FakeServer::default().with_tile(coord, png_tile(2, &[0, 4095, 4095, 0]));
    let requests = Arc::clone(&server.requests);
    let layer = layer(server, Palette::Gray);

    let outcome = layer.create_tile(coord, &ContrastRange::full()).await;
    assert!(outcome.is_ready(), "{:?}", outcome.error());

    let surface = outcome.tile().surface();
    assert_eq!(surface.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(surface.get_pixel(1, 0).0, [255, 255, 255, 255]);
    assert_eq!(surface.get_pixel(0, 1).0, [255, 255, 255, 255]);
    assert_eq!(
        requests.lock().unwrap().as_slice(),
        &["https://tiles.test/raw/1/0/1".to_string()]
    );
}

#[tokio::test]
async fn test_warm_tint_tile() {
    let coord = TileCoord::new(0, 0, 0);
    let server = FakeServer::default().with_tile(coord, png_tile(2, &[0, 4095, 0, 0]));
    let layer = layer(server, Palette::WARM_TINT);

    let outcome = layer.create_tile(coord, &ContrastRange::full()).await;
    let surface = outcome.tile().surface();
    assert_eq!(surface.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(surface.get_pixel(1, 0).0, [255, 127, 76, 255]);
    assert_eq!(Palette::WARM_TINT.pack(255), 0xff4c7fff);
}

#[tokio::test]
async fn test_empty_body_is_unrecognized_data() {
    let coord = TileCoord::new(2, 3, 2);
    let server = FakeServer::default().with_tile(coord, Vec::new());
    let layer = layer(server, Palette::Gray);

    let (tile, error) = layer
        .create_tile(coord, &ContrastRange::full())
        .await
        .into_parts();
    let error = error.expect("empty body must fail");
    assert_eq!(error.to_string(), "Unrecognized data");
    assert!(tile.is_blank());
    assert!(!tile.has_raw());
}

#[tokio::test]
async fn test_missing_tile_reports_status() {
    let layer = layer(FakeServer::default(), Palette::Gray);
    let outcome = layer
        .create_tile(TileCoord::new(0, 0, 3), &ContrastRange::full())
        .await;
    assert!(matches!(
        outcome.error(),
        Some(MapError::HttpStatus { status: 404, .. })
    ));
    assert!(outcome.tile().is_blank());
}

#[tokio::test]
async fn test_corrupt_body_keeps_raw_bytes() {
    let coord = TileCoord::new(0, 1, 1);
    let server = FakeServer::default().with_tile(coord, b"not a tile at all".to_vec());
    let layer = layer(server, Palette::Gray);

    let (tile, error) = layer
        .create_tile(coord, &ContrastRange::full())
        .await
        .into_parts();
    assert!(matches!(error, Some(MapError::UnrecognizedData)));
    assert_eq!(tile.raw(), Some(&b"not a tile at all"[..]));
}

#[tokio::test]
async fn test_contrast_change_redraws_live_tiles() {
    let a = TileCoord::new(0, 0, 1);
    let b = TileCoord::new(1, 1, 1);
    let missing = TileCoord::new(0, 1, 1);
    let server = FakeServer::default()
        .with_tile(a, png_tile(2, &[0, 1024, 2048, 4095]))
        .with_tile(b, png_tile(2, &[4095, 4095, 4095, 4095]));
    let requests = Arc::clone(&server.requests);
    let mut grid = TileGrid::new(layer(server, Palette::Gray));
    let contrast = ContrastHandle::default();

    let failures = grid.load_many([a, b, missing], &contrast).await;
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, missing);
    assert_eq!(grid.tiles().len(), 3);

    let row = |grid: &TileGrid<Jpeg12Layer>| -> Vec<u8> {
        let surface = grid.tile(&a).unwrap().surface();
        (0..4).map(|i| surface.get_pixel(i % 2, i / 2).0[0]).collect()
    };
    assert_eq!(row(&grid), vec![0, 64, 128, 255]);

    assert!(contrast.set(0.0, 2048.0));
    assert!(!contrast.set(0.0, 2048.0));
    let summary = grid.redraw(&contrast);
    assert_eq!(summary.redrawn, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(row(&grid), vec![0, 128, 255, 255]);
    assert_eq!(
        grid.tile(&b).unwrap().drawn_with(),
        Some(ContrastRange::new(0.0, 2048.0))
    );

    // redraws never go back to the network
    assert_eq!(requests.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_grid_skips_tiles_outside_the_grid() {
    let server = FakeServer::default();
    let requests = Arc::clone(&server.requests);
    let mut grid = TileGrid::new(layer(server, Palette::Gray));

    let error = grid
        .load(TileCoord::new(4, 0, 2), &ContrastRange::full())
        .await;
    assert!(matches!(error, Some(MapError::InvalidCoordinates(_))));
    assert!(grid.tiles().is_empty());
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_12_bit_jpeg_needs_a_12_bit_codec() {
    // SOI, then a single-component 12-bit SOF1 header for a 2x2 frame
    let mut body = vec![0xff, 0xd8, 0xff, 0xc1, 0x00, 0x0b, 12, 0x00, 0x02, 0x00, 0x02];
    body.extend_from_slice(&[0x01, 0x01, 0x11, 0x00]);
    let coord = TileCoord::new(0, 0, 0);
    let server = FakeServer::default().with_tile(coord, body);
    let layer = layer(server, Palette::Gray);

    let (tile, error) = layer
        .create_tile(coord, &ContrastRange::full())
        .await
        .into_parts();
    assert!(matches!(error, Some(MapError::Decode(ref m)) if m.contains("12-bit")));
    assert!(tile.is_blank());
    assert!(tile.has_raw());
}

#[tokio::test]
async fn test_redraw_with_same_range_is_stable() {
    let coord = TileCoord::new(0, 0, 1);
    let server = FakeServer::default().with_tile(coord, png_tile(2, &[10, 900, 1800, 3000]));
    let mut grid = TileGrid::new(layer(server, Palette::WARM_TINT));
    let range = ContrastRange::new(100.0, 2000.0);

    assert!(grid.load(coord, &range).await.is_none());
    let first = grid.tile(&coord).unwrap().surface().clone();
    grid.redraw(&range);
    grid.redraw(&range);
    assert_eq!(first.as_raw(), grid.tile(&coord).unwrap().surface().as_raw());
}

#[tokio::test]
async fn test_layer_from_json_options() {
    let options = LayerOptions::from_json(
        r#"{
            "tile_size": 2,
            "url_template": "https://tiles.test/raw/{z}/{y}/{x}",
            "palette": { "kind": "gray" },
            "max_zoom": 4
        }"#,
    )
    .unwrap();
    let coord = TileCoord::new(3, 2, 4);
    let server = FakeServer::default().with_tile(coord, png_tile(2, &[4095; 4]));
    let layer = Jpeg12Layer::new("json", options).unwrap().with_fetcher(server);

    assert!(!layer.covers_zoom(5));
    let outcome = layer.create_tile(coord, &ContrastRange::full()).await;
    assert!(outcome.is_ready());
    assert!(outcome
        .tile()
        .surface()
        .pixels()
        .all(|p| p.0 == [255, 255, 255, 255]));
}
