//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::ColorState;

/// Simple 2D vertex with position and color
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
    pub const BACKGROUND: [f32; 4] = [0.04, 0.04, 0.07, 1.0];
    pub const GRID: [f32; 4] = [1.0, 1.0, 1.0, 0.06];
    pub const OUTLINE: [f32; 4] = [0.95, 0.95, 1.0, 0.9];

    pub const COLOR_A: [f32; 4] = [0.15, 0.75, 1.0, 1.0]; // Cyan
    pub const COLOR_B: [f32; 4] = [1.0, 0.3, 0.55, 1.0]; // Magenta

    pub const CONTRAST_A: [f32; 4] = [1.0, 0.9, 0.1, 1.0]; // Yellow
    pub const CONTRAST_B: [f32; 4] = [0.25, 0.2, 1.0, 1.0]; // Blue
}

/// Fill color for a color state
pub fn fill_for(color: ColorState, high_contrast: bool) -> [f32; 4] {
    match (color, high_contrast) {
        (ColorState::A, false) => colors::COLOR_A,
        (ColorState::B, false) => colors::COLOR_B,
        (ColorState::A, true) => colors::CONTRAST_A,
        (ColorState::B, true) => colors::CONTRAST_B,
    }
}
