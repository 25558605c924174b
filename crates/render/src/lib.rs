//! Rendering Adapter: renderer-agnostic geometry and draw lists.
//!
//! Scenes describe what to draw as [`Geometry`] uploaded once and a
//! [`DrawList`] rebuilt every frame. Backends (wgpu, debug text) consume both.
//!
//! # Invariants
//! - Renderers never mutate scene state.
//! - Every [`DrawCommand`] names a mesh uploaded by the same scene.

mod draw;
mod mesh;
mod renderer;

pub use draw::{ColorSource, DrawCommand, DrawList, LightingUniforms, Shading, ShadingModel};
pub use mesh::{Geometry, MeshKey, Topology, Vertex};
pub use renderer::{DebugTextRenderer, RenderView, Renderer};
