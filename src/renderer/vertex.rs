//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color, in screen pixels
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BUILDING: [f32; 4] = [0.235, 0.235, 0.294, 1.0];
    pub const WINDOW_LIT: [f32; 4] = [0.95, 0.85, 0.45, 1.0];
    pub const PLAYER_1: [f32; 4] = [0.784, 0.471, 0.353, 1.0];
    pub const PLAYER_2: [f32; 4] = [0.353, 0.627, 0.824, 1.0];
    pub const BANANA: [f32; 4] = [0.941, 0.863, 0.353, 1.0];
    pub const EXPLOSION: [f32; 4] = [1.0, 0.55, 0.2, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.059, 0.059, 0.098, 1.0];
}
