use crate::renderer::color::Rgb;
use crate::renderer::vertex::Vertex;
use glam::Vec2;

/// Solid-colour triangles in pixel space over a flat background.
///
/// Triangles are painted in push order; later ones cover earlier ones.
#[derive(Clone, Debug)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub background: Rgb,
    vertices: Vec<Vertex>,
}

impl Scene {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            width,
            height,
            background,
            vertices: Vec::new(),
        }
    }

    /// Three vertices per triangle.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn push_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Rgb) {
        let color = color.to_array();
        self.vertices.extend([
            Vertex::new(a.to_array(), color),
            Vertex::new(b.to_array(), color),
            Vertex::new(c.to_array(), color),
        ]);
    }

    /// Axis-aligned filled rectangle between two corners.
    pub fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgb) {
        let (top_right, bottom_left) = (Vec2::new(max.x, min.y), Vec2::new(min.x, max.y));
        self.push_triangle(min, top_right, max, color);
        self.push_triangle(min, max, bottom_left, color);
    }

    pub fn stroke_rect(&mut self, min: Vec2, max: Vec2, width: f32, color: Rgb) {
        let half = width / 2.0;
        self.fill_rect(min - half, Vec2::new(max.x + half, min.y + half), color);
        self.fill_rect(Vec2::new(min.x - half, max.y - half), max + half, color);
        self.fill_rect(min - half, Vec2::new(min.x + half, max.y + half), color);
        self.fill_rect(Vec2::new(max.x - half, min.y - half), max + half, color);
    }

    /// A straight segment `width` pixels thick, drawn as a quad.
    pub fn segment(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgb) {
        let direction = to - from;
        let length = direction.length();
        if !(length > f32::EPSILON) {
            return;
        }
        let normal = direction.perp() / length * (width / 2.0);
        let (a, b, c, d) = (from + normal, to + normal, to - normal, from - normal);
        self.push_triangle(a, b, c, color);
        self.push_triangle(a, c, d, color);
    }

    pub fn dashed_segment(&mut self, from: Vec2, to: Vec2, width: f32, dash: f32, gap: f32, color: Rgb) {
        let length = from.distance(to);
        if !(length > f32::EPSILON) || dash <= 0.0 {
            return;
        }
        let direction = (to - from) / length;
        let mut start = 0.0;
        while start < length {
            let end = (start + dash).min(length);
            self.segment(from + direction * start, from + direction * end, width, color);
            start = end + gap.max(0.0);
        }
    }

    /// Consecutive points joined by thick segments. Non-finite points break the line.
    pub fn polyline(&mut self, points: &[Vec2], width: f32, color: Rgb) {
        for pair in points.windows(2) {
            if pair[0].is_finite() && pair[1].is_finite() {
                self.segment(pair[0], pair[1], width, color);
            }
        }
    }
}
