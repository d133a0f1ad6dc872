use crate::renderer::color::Rgb;
use crate::renderer::scene::Scene;
use glam::Vec2;
use image::{Rgba, RgbaImage};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("failed to map readback buffer: {0}")]
    BufferMap(#[from] wgpu::BufferAsyncError),

    #[error("readback channel closed before the buffer was mapped")]
    ReadbackLost,

    #[error("{width}x{height} image exceeds the device texture limit of {limit}")]
    TooLarge { width: u32, height: u32, limit: u32 },

    #[error("figure has zero size ({width}x{height})")]
    InvalidSize { width: u32, height: u32 },

    #[error("figure has no series to draw")]
    EmptyFigure,

    #[error("panel {panel} has tick spacing {spacing}; it must be positive and finite")]
    InvalidTickSpacing { panel: usize, spacing: f64 },

    #[error("failed to load font: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}

/// Turns a [`Scene`] into pixels.
pub trait Rasterizer {
    fn name(&self) -> &'static str;
    fn rasterize(&mut self, scene: &Scene) -> Result<RgbaImage, RenderError>;
}

/// Software triangle fill, sampled at pixel centres. No antialiasing.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuRasterizer;

impl Rasterizer for CpuRasterizer {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn rasterize(&mut self, scene: &Scene) -> Result<RgbaImage, RenderError> {
        if scene.width == 0 || scene.height == 0 {
            return Err(RenderError::InvalidSize {
                width: scene.width,
                height: scene.height,
            });
        }

        let mut image = RgbaImage::from_pixel(
            scene.width,
            scene.height,
            Rgba(scene.background.to_rgba8()),
        );

        for triangle in scene.vertices().chunks_exact(3) {
            let [a, b, c] = [triangle[0], triangle[1], triangle[2]].map(|v| Vec2::from(v.position));
            let [red, green, blue] = triangle[0].color;
            let color = Rgba(Rgb::new(red, green, blue).to_rgba8());
            fill_triangle(&mut image, a, b, c, color);
        }

        Ok(image)
    }
}

fn edge(from: Vec2, to: Vec2, point: Vec2) -> f32 {
    (to - from).perp_dot(point - from)
}

fn fill_triangle(image: &mut RgbaImage, a: Vec2, b: Vec2, c: Vec2, color: Rgba<u8>) {
    let area = edge(a, b, c);
    if !(area.abs() > f32::EPSILON) {
        return;
    }

    let (width, height) = (image.width() as f32, image.height() as f32);
    let min = a.min(b).min(c).max(Vec2::ZERO);
    let max = a.max(b).max(c).min(Vec2::new(width - 1.0, height - 1.0));
    if min.x > max.x || min.y > max.y {
        return;
    }

    for y in (min.y.floor() as u32)..=(max.y.ceil() as u32).min(image.height() - 1) {
        for x in (min.x.floor() as u32)..=(max.x.ceil() as u32).min(image.width() - 1) {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let (w0, w1, w2) = (edge(b, c, p), edge(c, a, p), edge(a, b, p));
            let inside = if area > 0.0 {
                w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
            } else {
                w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
            };
            if inside {
                image.put_pixel(x, y, color);
            }
        }
    }
}
