use std::mem;

/// A coloured 2D vertex. Pixel coordinates inside a [`Scene`](super::scene::Scene),
/// clip-space coordinates once handed to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

impl Vertex {
    pub fn new(position: [f32; 2], color: [f32; 3]) -> Self {
        Self { position, color }
    }

    /// Map pixel coordinates (origin top-left, y down) to clip space.
    pub fn to_clip_space(self, width: u32, height: u32) -> Self {
        let [x, y] = self.position;
        Self {
            position: [
                x / width as f32 * 2.0 - 1.0,
                1.0 - y / height as f32 * 2.0,
            ],
            color: self.color,
        }
    }

    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position: @location(0) in shader
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Color: @location(1) in shader
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_clip_space() {
        let top_left = Vertex::new([0.0, 0.0], [0.0; 3]).to_clip_space(200, 100);
        let bottom_right = Vertex::new([200.0, 100.0], [0.0; 3]).to_clip_space(200, 100);

        assert_eq!(top_left.position, [-1.0, 1.0]);
        assert_eq!(bottom_right.position, [1.0, -1.0]);
    }

    #[test]
    fn layout_is_tightly_packed() {
        assert_eq!(mem::size_of::<Vertex>(), 20);
    }
}
