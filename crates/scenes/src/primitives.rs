use glam::{Mat4, Vec3};
use vislab_common::{BLACK, SceneId, WHITE};
use vislab_render::{DrawCommand, DrawList, Geometry, MeshKey};

use crate::geometry;
use crate::scene::Scene;

pub const TRIANGLE: MeshKey = MeshKey("triangle");
pub const POLYGON: MeshKey = MeshKey("polygon");
pub const CIRCLE: MeshKey = MeshKey("circle");
pub const QUAD: MeshKey = MeshKey("quad");
pub const POINTS: MeshKey = MeshKey("points");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitivesPart {
    /// A single RGB triangle.
    #[default]
    Triangle,
    /// Polygon, circle outline, quad and points side by side.
    Shapes,
}

impl PrimitivesPart {
    pub fn number(self) -> u8 {
        match self {
            PrimitivesPart::Triangle => 1,
            PrimitivesPart::Shapes => 2,
        }
    }
}

/// Scene 1: the basic primitive types.
#[derive(Debug, Clone)]
pub struct PrimitivesScene {
    pub part: PrimitivesPart,
    segments: u32,
    revision: u64,
}

impl PrimitivesScene {
    pub const MIN_SEGMENTS: u32 = 3;
    pub const MAX_SEGMENTS: u32 = 64;

    pub fn new() -> Self {
        Self {
            part: PrimitivesPart::Triangle,
            segments: 32,
            revision: 0,
        }
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    /// Change the circle and polygon resolution; triggers a re-upload.
    pub fn set_segments(&mut self, segments: u32) {
        let segments = segments.clamp(Self::MIN_SEGMENTS, Self::MAX_SEGMENTS);
        if segments != self.segments {
            self.segments = segments;
            self.revision += 1;
        }
    }
}

impl Default for PrimitivesScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for PrimitivesScene {
    fn id(&self) -> SceneId {
        SceneId::Primitives
    }

    fn meshes(&self) -> Vec<(MeshKey, Geometry)> {
        let mut meshes = vec![(TRIANGLE, geometry::triangle())];
        meshes.extend(self.changed_meshes());
        meshes.push((QUAD, geometry::rectangle(0.3, 0.2, [0.2, 0.4, 0.9, 1.0])));
        meshes.push((POINTS, geometry::point_row(7, 0.08, BLACK)));
        meshes
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    /// Only the segment count changes at runtime.
    fn changed_meshes(&self) -> Vec<(MeshKey, Geometry)> {
        let orange = [1.0, 0.6, 0.1, 1.0];
        vec![
            (POLYGON, geometry::filled_polygon(self.segments, 0.3, WHITE, orange)),
            (CIRCLE, geometry::circle_outline(self.segments, 0.3, BLACK)),
        ]
    }

    fn update(&mut self, _dt: f32) {}

    fn draw(&self, list: &mut DrawList) {
        match self.part {
            PrimitivesPart::Triangle => {
                list.push(DrawCommand::flat(TRIANGLE, Mat4::IDENTITY));
            }
            PrimitivesPart::Shapes => {
                let at = |x, y| Mat4::from_translation(Vec3::new(x, y, 0.0));
                list.push(DrawCommand::flat(QUAD, at(-0.6, 0.45)));
                list.push(DrawCommand::flat(POLYGON, at(0.6, 0.45)));
                list.push(DrawCommand::flat(CIRCLE, at(-0.6, -0.45)));
                list.push(DrawCommand::flat(POINTS, at(0.6, -0.45)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_one_draws_only_the_triangle() {
        let scene = PrimitivesScene::new();
        let mut list = DrawList::new();
        scene.draw(&mut list);
        assert_eq!(list.len(), 1);
        assert_eq!(list.commands[0].mesh, TRIANGLE);
    }

    #[test]
    fn part_two_draws_every_shape() {
        let mut scene = PrimitivesScene::new();
        scene.part = PrimitivesPart::Shapes;
        let mut list = DrawList::new();
        scene.draw(&mut list);
        for key in [QUAD, POLYGON, CIRCLE, POINTS] {
            assert_eq!(list.count_mesh(key), 1, "{key} missing");
        }
        assert_eq!(list.count_mesh(TRIANGLE), 0);
    }

    #[test]
    fn segments_change_bumps_revision() {
        let mut scene = PrimitivesScene::new();
        let r0 = scene.revision();
        scene.set_segments(scene.segments());
        assert_eq!(scene.revision(), r0);
        scene.set_segments(8);
        assert_eq!(scene.revision(), r0 + 1);
        let circle = scene
            .meshes()
            .into_iter()
            .find(|(k, _)| *k == CIRCLE)
            .map(|(_, g)| g)
            .unwrap();
        assert_eq!(circle.vertices.len(), 9);
    }

    #[test]
    fn only_segment_meshes_are_reported_changed() {
        let scene = PrimitivesScene::new();
        let keys: Vec<_> = scene.changed_meshes().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![POLYGON, CIRCLE]);
        assert_eq!(scene.meshes().len(), 5);
    }

    #[test]
    fn segments_are_clamped() {
        let mut scene = PrimitivesScene::new();
        scene.set_segments(1);
        assert_eq!(scene.segments(), PrimitivesScene::MIN_SEGMENTS);
        scene.set_segments(1000);
        assert_eq!(scene.segments(), PrimitivesScene::MAX_SEGMENTS);
    }

    #[test]
    fn every_drawn_mesh_is_uploaded() {
        let mut scene = PrimitivesScene::new();
        scene.part = PrimitivesPart::Shapes;
        let keys: Vec<_> = scene.meshes().into_iter().map(|(k, _)| k).collect();
        let mut list = DrawList::new();
        scene.draw(&mut list);
        assert!(list.commands.iter().all(|c| keys.contains(&c.mesh)));
    }
}
