//! WebGPU rendering module
//!
//! Markers, trails and points are tessellated into one triangle list. Trail
//! geometry is cached between frames.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::SceneCache;
pub use vertex::Vertex;
