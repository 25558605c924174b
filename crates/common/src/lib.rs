//! Shared types used by every vislab crate.
//!
//! # Invariants
//! - Scene ids are stable 1-based numbers; the control panel and CLI both
//!   address scenes by them.
//! - Render settings are always sanitized before they reach a projection.

pub mod types;

pub use types::{BLACK, CameraKind, ParseSceneIdError, RenderSettings, Rgba, SceneId, WHITE};
