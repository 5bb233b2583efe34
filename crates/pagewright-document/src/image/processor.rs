// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — crop, aspect-preserving cover fit, expanding rotation and
// JPEG encoding. Operates on in-memory images using the `image` and
// `imageproc` crates.

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::geometric_transformations::{self, Interpolation};
use pagewright_core::error::PagewrightError;
use tracing::{debug, info, instrument};

/// Image processing pipeline operating on a single in-memory image.
///
/// All operations are non-destructive: each method consumes `self` and returns a
/// new `ImageProcessor` wrapping the transformed image, enabling method chaining.
///
/// ```ignore
/// let page = ImageProcessor::open("beach.jpg")?
///     .cover(1200, 1600)
///     .into_rgba8();
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, PagewrightError> {
        let img = image::open(path.as_ref()).map_err(|err| {
            PagewrightError::ImageError(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        debug!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Wrap an RGBA canvas.
    pub fn from_rgba8(image: RgbaImage) -> Self {
        Self {
            image: DynamicImage::ImageRgba8(image),
        }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return the image as an RGBA buffer.
    pub fn into_rgba8(self) -> RgbaImage {
        self.image.into_rgba8()
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Resize the image to exactly `width` x `height`, ignoring aspect ratio.
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        let resized =
            self.image
                .resize_exact(width, height, image::imageops::FilterType::Lanczos3);
        Self { image: resized }
    }

    /// Crop a rectangular region from the image.
    ///
    /// `x` and `y` are the top-left corner; `width` and `height` define the
    /// size of the crop rectangle. Values are clamped to image bounds.
    pub fn crop(self, x: u32, y: u32, width: u32, height: u32) -> Self {
        let img_w = self.image.width();
        let img_h = self.image.height();

        let safe_x = x.min(img_w.saturating_sub(1));
        let safe_y = y.min(img_h.saturating_sub(1));
        let safe_w = width.min(img_w.saturating_sub(safe_x));
        let safe_h = height.min(img_h.saturating_sub(safe_y));

        debug!(safe_x, safe_y, safe_w, safe_h, "Cropping image");

        let cropped = self.image.crop_imm(safe_x, safe_y, safe_w, safe_h);
        Self { image: cropped }
    }

    /// Fill `width` x `height` without distortion.
    ///
    /// The source is centre-cropped to the target aspect ratio (along its
    /// width when it is proportionally wider, along its height otherwise),
    /// then resized to the exact target size.
    #[instrument(skip(self), fields(from_w = self.image.width(), from_h = self.image.height()))]
    pub fn cover(self, width: u32, height: u32) -> Self {
        let (src_w, src_h) = (self.width(), self.height());
        let target = width as f64 / height as f64;
        let source = src_w as f64 / src_h as f64;

        let cropped = if source > target {
            let crop_w = ((src_h as f64 * target).round() as u32).clamp(1, src_w);
            self.crop((src_w - crop_w) / 2, 0, crop_w, src_h)
        } else {
            let crop_h = ((src_w as f64 / target).round() as u32).clamp(1, src_h);
            self.crop(0, (src_h - crop_h) / 2, src_w, crop_h)
        };
        cropped.resize_exact(width, height)
    }

    /// Rotate counter-clockwise by `degrees`, growing the canvas so that no
    /// content is clipped. Uncovered pixels take `fill`.
    ///
    /// Multiples of 90 degrees are lossless. Other angles pad the image to
    /// the rotated bounding box and apply a bilinear rotation about the
    /// centre.
    #[instrument(skip(self, fill))]
    pub fn rotate_expand(self, degrees: f32, fill: Rgba<u8>) -> Self {
        let normalised = degrees.rem_euclid(360.0);
        if normalised < 0.01 || (normalised - 360.0).abs() < 0.01 {
            return self;
        }
        if (normalised - 90.0).abs() < 0.01 {
            return Self {
                image: self.image.rotate270(),
            };
        }
        if (normalised - 180.0).abs() < 0.01 {
            return Self {
                image: self.image.rotate180(),
            };
        }
        if (normalised - 270.0).abs() < 0.01 {
            return Self {
                image: self.image.rotate90(),
            };
        }

        let rgba = self.image.to_rgba8();
        let (w, h) = (rgba.width() as f32, rgba.height() as f32);
        let radians = degrees.to_radians();
        let (sin, cos) = (radians.sin().abs(), radians.cos().abs());
        let out_w = (w * cos + h * sin).ceil() as u32;
        let out_h = (w * sin + h * cos).ceil() as u32;

        // Pad to a canvas holding both the source and the rotated result,
        // rotate about its centre, then trim to the rotated bounding box.
        let canvas_w = out_w.max(rgba.width());
        let canvas_h = out_h.max(rgba.height());
        let mut padded = RgbaImage::from_pixel(canvas_w, canvas_h, fill);
        image::imageops::replace(
            &mut padded,
            &rgba,
            ((canvas_w - rgba.width()) / 2) as i64,
            ((canvas_h - rgba.height()) / 2) as i64,
        );

        // imageproc rotates clockwise for positive angles.
        let rotated = geometric_transformations::rotate_about_center(
            &padded,
            -radians,
            Interpolation::Bilinear,
            fill,
        );
        let trimmed = image::imageops::crop_imm(
            &rotated,
            (canvas_w - out_w) / 2,
            (canvas_h - out_h) / 2,
            out_w,
            out_h,
        )
        .to_image();

        info!(out_w, out_h, "Rotation applied with expansion");
        Self {
            image: DynamicImage::ImageRgba8(trimmed),
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as JPEG bytes with the given quality (1-100).
    /// Alpha is discarded.
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>, PagewrightError> {
        let mut buffer = Vec::new();
        let rgb = self.image.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
        rgb.write_with_encoder(encoder).map_err(|err| {
            PagewrightError::ImageError(format!("JPEG encoding failed: {}", err))
        })?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    /// 400x100: red | green (middle 100px) | blue.
    fn striped_wide() -> RgbaImage {
        RgbaImage::from_fn(400, 100, |x, _| match x {
            0..150 => RED,
            150..250 => GREEN,
            _ => BLUE,
        })
    }

    #[test]
    fn cover_crops_width_about_centre() {
        let out = ImageProcessor::from_rgba8(striped_wide()).cover(100, 100).into_rgba8();
        assert_eq!(out.dimensions(), (100, 100));
        let centre = out.get_pixel(50, 50);
        assert!(centre.0[1] > 200 && centre.0[0] < 50 && centre.0[2] < 50);
    }

    #[test]
    fn cover_crops_height_about_centre() {
        let tall = RgbaImage::from_fn(100, 400, |_, y| match y {
            0..150 => RED,
            150..250 => GREEN,
            _ => BLUE,
        });
        let out = ImageProcessor::from_rgba8(tall).cover(200, 200).into_rgba8();
        assert_eq!(out.dimensions(), (200, 200));
        assert!(out.get_pixel(100, 100).0[1] > 200);
    }

    #[test]
    fn cover_hits_exact_target_for_odd_ratios() {
        let out = ImageProcessor::from_rgba8(striped_wide()).cover(1200, 1600).into_rgba8();
        assert_eq!(out.dimensions(), (1200, 1600));
    }

    #[test]
    fn crop_is_clamped_to_bounds() {
        let out = ImageProcessor::from_rgba8(striped_wide()).crop(390, 90, 50, 50);
        assert_eq!((out.width(), out.height()), (10, 10));
    }

    #[test]
    fn rotate_expand_grows_canvas() {
        let img = RgbaImage::from_pixel(100, 20, RED);
        let out = ImageProcessor::from_rgba8(img).rotate_expand(45.0, Rgba([0, 0, 0, 0]));
        // 100cos45 + 20sin45 ≈ 84.85
        assert_eq!((out.width(), out.height()), (85, 85));
        let rgba = out.into_rgba8();
        assert_eq!(rgba.get_pixel(0, 0).0[3], 0);
        let centre = rgba.get_pixel(42, 42).0;
        assert!(centre[0] > 240 && centre[1] < 15 && centre[3] > 240);
    }

    #[test]
    fn rotate_quarter_turn_swaps_dimensions() {
        let img = RgbaImage::from_pixel(30, 10, RED);
        let out = ImageProcessor::from_rgba8(img).rotate_expand(90.0, Rgba([0, 0, 0, 0]));
        assert_eq!((out.width(), out.height()), (10, 30));
    }

    #[test]
    fn rotate_zero_is_identity() {
        let out = ImageProcessor::from_rgba8(striped_wide()).rotate_expand(0.0, Rgba([0, 0, 0, 0]));
        assert_eq!((out.width(), out.height()), (400, 100));
    }

    #[test]
    fn jpeg_bytes_have_soi_marker() {
        let bytes = ImageProcessor::from_rgba8(striped_wide()).to_jpeg_bytes(90).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn open_missing_file_is_image_error() {
        let err = ImageProcessor::open("/no/such/background.png").err().unwrap();
        assert!(matches!(err, PagewrightError::ImageError(_)));
    }
}
