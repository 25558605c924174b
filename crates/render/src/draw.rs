use glam::{Mat4, Vec3};
use vislab_common::Rgba;

use crate::mesh::MeshKey;

/// Shader family used for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shading {
    /// Vertex or solid color, no lighting.
    Flat,
    /// Ambient + diffuse + specular from the draw list's light.
    Lit,
}

/// Where a draw takes its base color from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSource {
    Vertex,
    Solid(Rgba),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingModel {
    /// Per-fragment lighting.
    #[default]
    Phong,
    /// Per-vertex lighting, interpolated.
    Gouraud,
}

/// Light parameters for [`Shading::Lit`] draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingUniforms {
    pub light_pos: Vec3,
    pub light_color: [f32; 3],
    pub ambient: f32,
    pub diffuse: f32,
    pub phong_specular: f32,
    pub gouraud_specular: f32,
    pub shininess: f32,
    pub model: ShadingModel,
}

impl Default for LightingUniforms {
    fn default() -> Self {
        Self {
            light_pos: Vec3::new(1.2, 1.0, 2.0),
            light_color: [1.0, 1.0, 1.0],
            ambient: 0.1,
            diffuse: 1.0,
            phong_specular: 0.5,
            gouraud_specular: 1.0,
            shininess: 32.0,
            model: ShadingModel::Phong,
        }
    }
}

impl LightingUniforms {
    /// Specular strength of the active shading model.
    pub fn specular(&self) -> f32 {
        match self.model {
            ShadingModel::Phong => self.phong_specular,
            ShadingModel::Gouraud => self.gouraud_specular,
        }
    }
}

/// One draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub mesh: MeshKey,
    pub shading: Shading,
    pub model: Mat4,
    pub color: ColorSource,
}

impl DrawCommand {
    pub fn flat(mesh: MeshKey, model: Mat4) -> Self {
        Self {
            mesh,
            shading: Shading::Flat,
            model,
            color: ColorSource::Vertex,
        }
    }

    pub fn lit(mesh: MeshKey, model: Mat4, color: ColorSource) -> Self {
        Self {
            mesh,
            shading: Shading::Lit,
            model,
            color,
        }
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = ColorSource::Solid(color);
        self
    }
}

/// Everything a scene wants drawn this frame, in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
    pub lighting: Option<LightingUniforms>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn set_lighting(&mut self, lighting: LightingUniforms) {
        self.lighting = Some(lighting);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.lighting = None;
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn count_mesh(&self, mesh: MeshKey) -> usize {
        self.commands.iter().filter(|c| c.mesh == mesh).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specular_follows_model() {
        let mut l = LightingUniforms::default();
        assert_eq!(l.specular(), l.phong_specular);
        l.model = ShadingModel::Gouraud;
        assert_eq!(l.specular(), l.gouraud_specular);
    }

    #[test]
    fn clear_drops_lighting() {
        let mut list = DrawList::new();
        list.push(DrawCommand::flat(MeshKey("a"), Mat4::IDENTITY));
        list.set_lighting(LightingUniforms::default());
        list.clear();
        assert!(list.is_empty());
        assert!(list.lighting.is_none());
    }

    #[test]
    fn with_color_overrides_vertex_color() {
        let cmd = DrawCommand::flat(MeshKey("edges"), Mat4::IDENTITY)
            .with_color([0.0, 0.0, 0.0, 1.0]);
        assert_eq!(cmd.color, ColorSource::Solid([0.0, 0.0, 0.0, 1.0]));
    }
}
