use glam::{EulerRot, Mat4, Vec3};
use vislab_common::{BLACK, SceneId};
use vislab_render::{DrawCommand, DrawList, Geometry, MeshKey};

use crate::geometry;
use crate::scene::Scene;

pub const CUBE: MeshKey = MeshKey("rgb_cube");
pub const CUBE_EDGES: MeshKey = MeshKey("cube_edges");
pub const AXES: MeshKey = MeshKey("axes");

/// Scene 3: a vertex-colored cube with its edges and the world axes.
#[derive(Debug, Clone)]
pub struct CubeScene {
    /// Euler angles in degrees (XYZ order).
    pub rotation: Vec3,
    pub spin: bool,
    /// Spin rate around Y in degrees per second.
    pub spin_speed: f32,
    pub show_edges: bool,
    pub show_axes: bool,
}

impl CubeScene {
    pub fn new() -> Self {
        Self {
            rotation: Vec3::ZERO,
            spin: false,
            spin_speed: 45.0,
            show_edges: true,
            show_axes: true,
        }
    }

    pub fn model(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_euler(
            EulerRot::XYZ,
            r.x.to_radians(),
            r.y.to_radians(),
            r.z.to_radians(),
        )
    }
}

impl Default for CubeScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for CubeScene {
    fn id(&self) -> SceneId {
        SceneId::Cube
    }

    fn meshes(&self) -> Vec<(MeshKey, Geometry)> {
        vec![
            (CUBE, geometry::rgb_cube(0.5)),
            (CUBE_EDGES, geometry::cube_edges(0.5)),
            (AXES, geometry::axes(1.5)),
        ]
    }

    fn update(&mut self, dt: f32) {
        if self.spin {
            self.rotation.y = (self.rotation.y + self.spin_speed * dt).rem_euclid(360.0);
        }
    }

    fn draw(&self, list: &mut DrawList) {
        let model = self.model();
        list.push(DrawCommand::flat(CUBE, model));
        if self.show_edges {
            list.push(DrawCommand::flat(CUBE_EDGES, model).with_color(BLACK));
        }
        if self.show_axes {
            list.push(DrawCommand::flat(AXES, Mat4::IDENTITY));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vislab_render::ColorSource;

    #[test]
    fn draws_cube_edges_and_axes() {
        let scene = CubeScene::new();
        let mut list = DrawList::new();
        scene.draw(&mut list);
        assert_eq!(list.len(), 3);
        let edges = list.commands.iter().find(|c| c.mesh == CUBE_EDGES).unwrap();
        assert_eq!(edges.color, ColorSource::Solid(BLACK));
    }

    #[test]
    fn toggles_hide_edges_and_axes() {
        let mut scene = CubeScene::new();
        scene.show_edges = false;
        scene.show_axes = false;
        let mut list = DrawList::new();
        scene.draw(&mut list);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn spin_wraps_rotation() {
        let mut scene = CubeScene::new();
        scene.spin = true;
        scene.spin_speed = 90.0;
        for _ in 0..5 {
            scene.update(1.0);
        }
        assert!((scene.rotation.y - 90.0).abs() < 1e-4);
    }

    #[test]
    fn edges_follow_cube_rotation() {
        let mut scene = CubeScene::new();
        scene.rotation = Vec3::new(10.0, 20.0, 30.0);
        let mut list = DrawList::new();
        scene.draw(&mut list);
        assert_eq!(list.commands[0].model, list.commands[1].model);
        assert_eq!(list.commands[2].model, Mat4::IDENTITY);
    }
}
