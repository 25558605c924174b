use glam::{Mat4, Vec3};

use crate::draw::{ColorSource, DrawList, Shading};

/// Camera output consumed by renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 3.0),
            view: Mat4::look_at_rh(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO, Vec3::Y),
            projection: Mat4::perspective_rh(60.0_f32.to_radians(), 16.0 / 9.0, 0.1, 100.0),
        }
    }
}

impl RenderView {
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}

/// Renderer-agnostic interface.
///
/// A renderer consumes a scene's draw list and a view; it never mutates the
/// scene.
pub trait Renderer {
    type Output;

    fn render(&self, list: &DrawList, view: &RenderView) -> Self::Output;
}

/// Renders a draw list as human-readable text. Used by the CLI and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, list: &DrawList, view: &RenderView) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Draw list ({} commands) ===\n", list.len()));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1})\n",
            view.eye.x, view.eye.y, view.eye.z
        ));
        if let Some(l) = &list.lighting {
            out.push_str(&format!(
                "Light: pos=({:.2}, {:.2}, {:.2}) model={:?} ambient={:.2} diffuse={:.2} specular={:.2}\n",
                l.light_pos.x,
                l.light_pos.y,
                l.light_pos.z,
                l.model,
                l.ambient,
                l.diffuse,
                l.specular()
            ));
        }

        for cmd in &list.commands {
            let t = cmd.model.w_axis;
            let shading = match cmd.shading {
                Shading::Flat => "flat",
                Shading::Lit => "lit",
            };
            let color = match cmd.color {
                ColorSource::Vertex => "vertex".to_string(),
                ColorSource::Solid([r, g, b, _]) => format!("({r:.2}, {g:.2}, {b:.2})"),
            };
            out.push_str(&format!(
                "  {:<14} {shading:<4} at=({:.2}, {:.2}, {:.2}) color={color}\n",
                cmd.mesh.0, t.x, t.y, t.z
            ));
        }

        out
    }
}
