//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::WalkStyle;

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

/// Colors for scene elements
pub mod colors {
    pub const INITIAL_WALK: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const SPAWNED_WALK: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const MARKER: [f32; 4] = [0.0, 0.5, 0.0, 1.0];
    pub const MARKER_TOUCHED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// Trail and point color for a walk
pub fn walk_color(style: WalkStyle) -> [f32; 4] {
    match style {
        WalkStyle::Initial => colors::INITIAL_WALK,
        WalkStyle::Spawned => colors::SPAWNED_WALK,
    }
}
