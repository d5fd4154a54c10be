//! Decoding with EXIF orientation correction and RGB normalization.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::error::{ImageError, UnsupportedErrorKind};
use image::{DynamicImage, ImageReader};
use tracing::debug;

use super::{DecodedImage, Orientation, SourceImage};
use crate::error::{Result, TileError};

/// Decode source bytes into an upright 8-bit RGB raster.
///
/// The EXIF orientation tag (if any) is applied before the pixel format is
/// forced to RGB. Alpha is discarded, not composited.
///
/// # Errors
///
/// Returns `TileError::Decode` if the format is not recognized or the data is
/// corrupt, `TileError::UnsupportedFormat` if the decoder rejects the color
/// model, and `TileError::EmptyImage` if the raster has no pixels.
pub fn decode_normalized(source: &SourceImage<'_>) -> Result<DecodedImage> {
    let reader = ImageReader::new(Cursor::new(source.bytes))
        .with_guessed_format()
        .map_err(|e| TileError::Decode(e.to_string()))?;

    let Some(format) = reader.format() else {
        return Err(TileError::Decode("unrecognized image format".to_string()));
    };

    let img = reader.decode().map_err(classify_decode_error)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(TileError::EmptyImage {
            width: img.width(),
            height: img.height(),
        });
    }

    let orientation = extract_orientation(source.bytes);
    debug!(
        source = source.display_name(),
        ?format,
        width = img.width(),
        height = img.height(),
        ?orientation,
        "decoded source image"
    );

    let rgb = apply_orientation(img, orientation).into_rgb8();
    Ok(DecodedImage::from_rgb_image(rgb))
}

fn classify_decode_error(err: ImageError) -> TileError {
    match &err {
        ImageError::Unsupported(unsupported)
            if matches!(unsupported.kind(), UnsupportedErrorKind::Color(_)) =>
        {
            TileError::UnsupportedFormat(err.to_string())
        }
        _ => TileError::Decode(err.to_string()),
    }
}

/// Read the EXIF orientation tag from any container kamadak-exif understands.
///
/// Missing or unreadable EXIF yields `Orientation::Normal`.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(err) => {
            debug!(%err, "no usable EXIF orientation");
            Orientation::Normal
        }
    }
}

/// Apply an EXIF orientation transformation to an image.
pub fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// EXIF orientation of encoded image bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}
