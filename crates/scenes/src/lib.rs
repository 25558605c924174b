//! The demo scenes.
//!
//! Each scene builds its vertex data once, at creation, and then produces a
//! [`vislab_render::DrawList`] every frame. [`SceneHost`] owns the active
//! scene and rebuilds it when the control panel selects another one.
//!
//! # Invariants
//! - Scene state only changes in `update` (fixed timestep) or through the
//!   scene's public controls; `draw` is read-only.
//! - A scene whose geometry changes bumps its revision so the backend
//!   re-uploads the meshes it reports as changed.

pub mod bezier;
pub mod clock;
pub mod cube;
pub mod curve_mesh;
pub mod geometry;
pub mod lighting;
mod loader;
pub mod primitives;
mod scene;

pub use bezier::{CubicBezier, PingPong};
pub use clock::BinaryClockScene;
pub use cube::CubeScene;
pub use curve_mesh::CurveMeshScene;
pub use lighting::LightingScene;
pub use loader::{
    ActiveScene, BUNNY_FILE, DETAILS_IMAGE_FILE, PLANE_FILE, SceneHost, SceneResources,
    SceneSelector, create_scene,
};
pub use primitives::{PrimitivesPart, PrimitivesScene};
pub use scene::Scene;
