use crate::renderer::color::Rgb;
use crate::renderer::raster::RenderError;
use ab_glyph::{FontRef, PxScale};
use glam::Vec2;
use image::{Rgba, RgbaImage, imageops};
use imageproc::drawing::{draw_text_mut, text_size};

static FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

pub fn font() -> Result<FontRef<'static>, RenderError> {
    Ok(FontRef::try_from_slice(FONT_BYTES)?)
}

/// Which point of the text box sits on `Label::position`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    TopCenter,
    BottomCenter,
    MiddleLeft,
    MiddleRight,
}

/// A run of text placed in pixel space, drawn after the scene is rasterized.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: Vec2,
    /// Font size in pixels.
    pub size: f32,
    pub anchor: Anchor,
    /// Reads bottom-to-top (y-axis labels).
    pub vertical: bool,
    pub color: Rgb,
}

impl Label {
    pub fn new(text: impl Into<String>, position: Vec2, size: f32, anchor: Anchor) -> Self {
        Self {
            text: text.into(),
            position,
            size,
            anchor,
            vertical: false,
            color: Rgb::BLACK,
        }
    }

    pub fn rotated(self) -> Self {
        Self {
            vertical: true,
            ..self
        }
    }

    /// Horizontal extent of the text before any rotation.
    pub fn measure(&self, font: &FontRef<'_>) -> Vec2 {
        let (width, height) = text_size(PxScale::from(self.size), font, &self.text);
        Vec2::new(width as f32, height as f32)
    }

    /// Pixel box the label covers once drawn.
    pub fn bounds(&self, font: &FontRef<'_>) -> (Vec2, Vec2) {
        let mut extent = self.measure(font);
        if self.vertical {
            extent = Vec2::new(extent.y, extent.x);
        }
        let offset = match self.anchor {
            Anchor::TopCenter => Vec2::new(extent.x / 2.0, 0.0),
            Anchor::BottomCenter => Vec2::new(extent.x / 2.0, extent.y),
            Anchor::MiddleLeft => Vec2::new(0.0, extent.y / 2.0),
            Anchor::MiddleRight => Vec2::new(extent.x, extent.y / 2.0),
        };
        let min = self.position - offset;
        (min, min + extent)
    }
}

pub fn draw_labels(image: &mut RgbaImage, labels: &[Label]) -> Result<(), RenderError> {
    let font = font()?;
    for label in labels.iter().filter(|label| !label.text.is_empty()) {
        let (min, _) = label.bounds(&font);
        let color = Rgba(label.color.to_rgba8());
        let scale = PxScale::from(label.size);

        if label.vertical {
            let extent = label.measure(&font).ceil();
            let mut sprite = RgbaImage::from_pixel(
                extent.x as u32 + 1,
                extent.y as u32 + 1,
                Rgba([0, 0, 0, 0]),
            );
            draw_text_mut(&mut sprite, color, 0, 0, scale, &font, &label.text);
            let turned = imageops::rotate270(&sprite);
            imageops::overlay(image, &turned, min.x.round() as i64, min.y.round() as i64);
        } else {
            draw_text_mut(
                image,
                color,
                min.x.round() as i32,
                min.y.round() as i32,
                scale,
                &font,
                &label.text,
            );
        }
    }
    Ok(())
}
