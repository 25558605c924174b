//! wgpu render backend for the scene demo.
//!
//! Uploads each scene's geometry once and draws its per-frame draw list with
//! a flat or lit (Phong/Gouraud) pipeline. Cameras turn window state and
//! [`vislab_common::RenderSettings`] into a [`vislab_render::RenderView`].
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - GPU meshes belong to exactly one scene; uploading replaces them all.

mod camera;
mod gpu;
mod shaders;

pub use camera::{FlyCamera, OrthoCamera};
pub use gpu::{RenderStats, SceneRenderer};
