use glam::{Mat4, Vec3};
use vislab_common::{SceneId, WHITE};
use vislab_render::{ColorSource, DrawCommand, DrawList, Geometry, LightingUniforms, MeshKey};

use crate::geometry;
use crate::scene::Scene;

pub const LIT_CUBE: MeshKey = MeshKey("lit_cube");
pub const LIGHT_CUBE: MeshKey = MeshKey("light_cube");

const LIGHT_CUBE_SCALE: f32 = 0.2;

/// Scene 5: a cube lit by a point light, with Phong or Gouraud shading.
#[derive(Debug, Clone)]
pub struct LightingScene {
    pub object_color: [f32; 3],
    pub light: LightingUniforms,
    pub orbit: bool,
    /// Radians per second.
    pub orbit_speed: f32,
}

impl LightingScene {
    pub fn new() -> Self {
        Self {
            object_color: [1.0, 0.5, 0.31],
            light: LightingUniforms::default(),
            orbit: false,
            orbit_speed: 1.0,
        }
    }

    fn light_model(&self) -> Mat4 {
        Mat4::from_translation(self.light.light_pos)
            * Mat4::from_scale(Vec3::splat(LIGHT_CUBE_SCALE))
    }
}

impl Default for LightingScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for LightingScene {
    fn id(&self) -> SceneId {
        SceneId::Lighting
    }

    fn meshes(&self) -> Vec<(MeshKey, Geometry)> {
        vec![
            (LIT_CUBE, geometry::cube(1.0, WHITE)),
            (LIGHT_CUBE, geometry::cube(1.0, WHITE)),
        ]
    }

    /// Orbits the light around the Y axis at its current radius and height.
    fn update(&mut self, dt: f32) {
        if !self.orbit {
            return;
        }
        let p = self.light.light_pos;
        let radius = Vec3::new(p.x, 0.0, p.z).length().max(1.5);
        let angle = p.z.atan2(p.x) + self.orbit_speed * dt;
        self.light.light_pos = Vec3::new(radius * angle.cos(), p.y, radius * angle.sin());
    }

    fn draw(&self, list: &mut DrawList) {
        let [r, g, b] = self.object_color;
        list.set_lighting(self.light);
        list.push(DrawCommand::lit(
            LIT_CUBE,
            Mat4::IDENTITY,
            ColorSource::Solid([r, g, b, 1.0]),
        ));
        let [lr, lg, lb] = self.light.light_color;
        list.push(
            DrawCommand::flat(LIGHT_CUBE, self.light_model()).with_color([lr, lg, lb, 1.0]),
        );
    }
}
