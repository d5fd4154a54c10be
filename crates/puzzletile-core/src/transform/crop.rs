//! Pixel-exact cropping.

use tracing::debug;

use crate::decode::DecodedImage;
use crate::error::{Result, TileError};

/// A pixel rectangle inside a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }

    fn fits_within(&self, width: u32, height: u32) -> bool {
        self.left
            .checked_add(self.width)
            .is_some_and(|right| right <= width)
            && self
                .top
                .checked_add(self.height)
                .is_some_and(|bottom| bottom <= height)
    }
}

/// Copy `rect` out of `image` without resampling.
///
/// # Errors
///
/// `TileError::EmptyImage` if the rectangle has zero area,
/// `TileError::RegionOutOfBounds` if it extends past the image edge.
pub fn crop_exact(image: &DecodedImage, rect: CropRect) -> Result<DecodedImage> {
    if rect.width == 0 || rect.height == 0 {
        return Err(TileError::EmptyImage {
            width: rect.width,
            height: rect.height,
        });
    }
    if !rect.fits_within(image.width, image.height) {
        return Err(TileError::RegionOutOfBounds {
            left: rect.left,
            top: rect.top,
            width: rect.width,
            height: rect.height,
            source_width: image.width,
            source_height: image.height,
        });
    }

    // Full-frame crop is a plain copy.
    if rect.width == image.width && rect.height == image.height {
        return Ok(image.clone());
    }

    let src_stride = image.width as usize * 3;
    let row_len = rect.width as usize * 3;
    let mut output = Vec::with_capacity(row_len * rect.height as usize);

    for y in rect.top..rect.bottom() {
        let start = y as usize * src_stride + rect.left as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Ok(DecodedImage::new(rect.width, rect.height, output))
}

/// Largest centered square inside a `width x height` raster.
///
/// Offsets use truncating division, so an odd margin leaves the extra pixel on
/// the right/bottom side.
pub fn square_crop_rect(width: u32, height: u32) -> CropRect {
    let side = width.min(height);
    CropRect::new((width - side) / 2, (height - side) / 2, side, side)
}

/// A raster guaranteed to have equal width and height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareImage(DecodedImage);

impl SquareImage {
    /// Edge length in pixels.
    pub fn side(&self) -> u32 {
        self.0.width
    }

    pub fn as_image(&self) -> &DecodedImage {
        &self.0
    }

    pub fn into_image(self) -> DecodedImage {
        self.0
    }
}

/// Crop the centered square out of `image`.
///
/// A raster that is already square is returned as-is.
///
/// # Errors
///
/// `TileError::EmptyImage` if either dimension is zero.
pub fn center_square(image: DecodedImage) -> Result<SquareImage> {
    if image.width == 0 || image.height == 0 {
        return Err(TileError::EmptyImage {
            width: image.width,
            height: image.height,
        });
    }

    let rect = square_crop_rect(image.width, image.height);
    debug!(
        width = image.width,
        height = image.height,
        left = rect.left,
        top = rect.top,
        side = rect.width,
        "center square crop"
    );
    if image.is_square() {
        return Ok(SquareImage(image));
    }
    crop_exact(&image, rect).map(SquareImage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::capture_messages;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x % 256) as u8);
                pixels.push((y % 256) as u8);
                pixels.push(((x + y) % 256) as u8);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_crop_exact_region() {
        let img = test_image(10, 10);
        let result = crop_exact(&img, CropRect::new(2, 3, 4, 5)).unwrap();

        assert_eq!((result.width, result.height), (4, 5));
        assert_eq!(result.pixel(0, 0), [2, 3, 5]);
        assert_eq!(result.pixel(3, 4), [5, 7, 12]);
    }

    #[test]
    fn test_crop_exact_full_frame() {
        let img = test_image(12, 7);
        let result = crop_exact(&img, CropRect::new(0, 0, 12, 7)).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_crop_exact_out_of_bounds() {
        let img = test_image(10, 10);
        let result = crop_exact(&img, CropRect::new(8, 0, 4, 4));
        assert!(matches!(result, Err(TileError::RegionOutOfBounds { .. })));

        let result = crop_exact(&img, CropRect::new(u32::MAX, 0, 4, 4));
        assert!(matches!(result, Err(TileError::RegionOutOfBounds { .. })));
    }

    #[test]
    fn test_crop_exact_zero_area() {
        let img = test_image(10, 10);
        let result = crop_exact(&img, CropRect::new(0, 0, 0, 4));
        assert!(matches!(result, Err(TileError::EmptyImage { .. })));
    }

    #[test]
    fn test_square_rect_portrait() {
        // 100x300 keeps the middle third vertically.
        assert_eq!(square_crop_rect(100, 300), CropRect::new(0, 100, 100, 100));
    }

    #[test]
    fn test_square_rect_landscape() {
        assert_eq!(square_crop_rect(640, 480), CropRect::new(80, 0, 480, 480));
    }

    #[test]
    fn test_square_rect_odd_margin_truncates() {
        // margin of 3 -> offset 1, extra pixel left on the far side
        assert_eq!(square_crop_rect(10, 7), CropRect::new(1, 0, 7, 7));
        assert_eq!(square_crop_rect(4, 9), CropRect::new(0, 2, 4, 4));
    }

    #[test]
    fn test_center_square_preserves_pixels() {
        let img = test_image(100, 300);
        let square = center_square(img).unwrap();

        assert_eq!(square.side(), 100);
        let inner = square.as_image();
        assert_eq!(inner.pixel(0, 0), [0, 100, 100]);
        assert_eq!(inner.pixel(99, 99), [99, 199, (298 % 256) as u8]);
    }

    #[test]
    fn test_center_square_noop_for_square() {
        let img = test_image(16, 16);
        let square = center_square(img.clone()).unwrap();
        assert_eq!(square.into_image(), img);
    }

    #[test]
    fn test_center_square_logs_for_square_input() {
        let (result, messages) = capture_messages(|| center_square(test_image(16, 16)));
        assert!(result.is_ok());
        assert!(messages.iter().any(|m| m == "center square crop"));
    }

    #[test]
    fn test_center_square_empty() {
        let img = DecodedImage::new(0, 5, vec![]);
        assert!(matches!(
            center_square(img),
            Err(TileError::EmptyImage { width: 0, height: 5 })
        ));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
