//! Shared fixtures for unit tests.

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

pub const RED: [u8; 3] = [255, 0, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];

/// Encode a fixture image in memory.
pub fn encode_fixture(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

/// PNG bytes of a gradient with distinct values along both axes.
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 7 % 256) as u8,
            (y * 5 % 256) as u8,
            ((x + 2 * y) % 256) as u8,
        ])
    });
    encode_fixture(&DynamicImage::ImageRgb8(img), ImageFormat::Png)
}

/// Left half red, right half blue.
pub fn split_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| if x < width / 2 { Rgb(RED) } else { Rgb(BLUE) })
}

/// JPEG bytes carrying an EXIF APP1 segment with the given orientation tag.
pub fn jpeg_with_orientation(img: &RgbImage, orientation: u16) -> Vec<u8> {
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, 95)
        .encode_image(img)
        .unwrap();

    // Little-endian TIFF header followed by IFD0 holding one SHORT entry.
    let mut tiff = vec![b'I', b'I', 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x0112u16.to_le_bytes());
    tiff.extend_from_slice(&3u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&orientation.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_le_bytes());

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);
    let segment_len = (payload.len() + 2) as u16;

    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[..2]); // SOI
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Decode every tile and stitch them back together by index.
pub fn reassemble(tiles: &[Vec<u8>], grid: u32, tile_edge: u32) -> RgbImage {
    let side = grid * tile_edge;
    let mut canvas = RgbImage::new(side, side);
    for (index, bytes) in tiles.iter().enumerate() {
        let tile = image::load_from_memory(bytes).unwrap().into_rgb8();
        assert_eq!(tile.dimensions(), (tile_edge, tile_edge));
        let row = index as u32 / grid;
        let column = index as u32 % grid;
        image::imageops::replace(
            &mut canvas,
            &tile,
            i64::from(column * tile_edge),
            i64::from(row * tile_edge),
        );
    }
    canvas
}

/// Layer that records the message of every event.
#[derive(Clone, Default)]
struct MessageLog(Arc<Mutex<Vec<String>>>);

struct MessageVisitor(Option<String>);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

impl<S: Subscriber> Layer<S> for MessageLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(None);
        event.record(&mut visitor);
        if let Some(message) = visitor.0 {
            self.0.lock().unwrap().push(message);
        }
    }
}

/// Run `f` with a thread-local subscriber and return the event messages it emitted.
pub fn capture_messages<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let log = MessageLog::default();
    let subscriber = tracing_subscriber::registry().with(log.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    let messages = log.0.lock().unwrap().clone();
    (result, messages)
}
