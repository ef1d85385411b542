//! Rendering
//!
//! `scene` turns a world into triangles + HUD text without touching the GPU;
//! `pipeline` uploads and draws those triangles with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{CONTROL_HINT, Scene, compose};
pub use vertex::Vertex;
