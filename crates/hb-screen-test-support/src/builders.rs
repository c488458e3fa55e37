//! Synthetic image builders for testing.

use std::io::Cursor;

use hb_screen_core::{ImageUpload, RawImage};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

/// A generated image that can be handed to the pipeline in several forms.
#[derive(Debug, Clone)]
pub struct SyntheticImage {
    /// Label used as the image source.
    pub name: &'static str,
    /// The generated pixels.
    pub image: DynamicImage,
}

impl SyntheticImage {
    /// Wraps the pixels as a decoded image.
    #[must_use]
    pub fn raw(&self) -> RawImage {
        RawImage::new(self.name, self.image.clone())
    }

    /// Encodes the image as PNG bytes.
    ///
    /// # Panics
    ///
    /// Panics if encoding fails, which only happens on allocation failure.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn png_bytes(&self) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, ImageFormat::Png)
            .expect("PNG encoding of synthetic image");
        buf.into_inner()
    }

    /// Encodes the image as a PNG upload from `source`.
    #[must_use]
    pub fn png_upload(&self, source: &str) -> ImageUpload {
        ImageUpload::new(source, self.png_bytes())
    }
}

/// Builder for creating synthetic palm images.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    /// A palm with healthy pink tone.
    #[must_use]
    pub fn pink_palm(width: u32, height: u32) -> SyntheticImage {
        Self::palm("synthetic://pink_palm", width, height, [214, 140, 135])
    }

    /// A pale palm, the pallor an anaemic subject tends to show.
    #[must_use]
    pub fn pale_palm(width: u32, height: u32) -> SyntheticImage {
        Self::palm("synthetic://pale_palm", width, height, [236, 214, 200])
    }

    /// Uniform colour image.
    #[must_use]
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> SyntheticImage {
        SyntheticImage {
            name: "synthetic://solid",
            image: DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(rgb))),
        }
    }

    /// Colour gradient touching both ends of the 8-bit range.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn gradient(width: u32, height: u32) -> SyntheticImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let r = (u32::from(u8::MAX) * x / width.saturating_sub(1).max(1)) as u8;
            let g = (u32::from(u8::MAX) * y / height.saturating_sub(1).max(1)) as u8;
            Rgb([r, g, 255 - r])
        });
        SyntheticImage {
            name: "synthetic://gradient",
            image: DynamicImage::ImageRgb8(img),
        }
    }

    /// Image with a transparent alpha channel, as screenshots often have.
    #[must_use]
    pub fn translucent(width: u32, height: u32) -> SyntheticImage {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 150, 140, 64]));
        SyntheticImage {
            name: "synthetic://translucent",
            image: DynamicImage::ImageRgba8(img),
        }
    }

    /// Palm-coloured ellipse over a dark background.
    #[allow(clippy::cast_precision_loss)]
    fn palm(name: &'static str, width: u32, height: u32, tone: [u8; 3]) -> SyntheticImage {
        let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
        let (rx, ry) = (width as f32 * 0.4, height as f32 * 0.45);
        let img = RgbImage::from_fn(width, height, |x, y| {
            let dx = (x as f32 - cx) / rx.max(1.0);
            let dy = (y as f32 - cy) / ry.max(1.0);
            if dx * dx + dy * dy <= 1.0 {
                Rgb(tone)
            } else {
                Rgb([24, 24, 28])
            }
        });
        SyntheticImage {
            name,
            image: DynamicImage::ImageRgb8(img),
        }
    }
}
