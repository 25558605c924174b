use glam::{Mat4, Vec3};
use vislab_assets::MeshData;
use vislab_common::{Rgba, SceneId};
use vislab_render::{ColorSource, DrawCommand, DrawList, Geometry, LightingUniforms, MeshKey};

use crate::bezier::{CubicBezier, PingPong};
use crate::geometry;
use crate::scene::Scene;

pub const MODEL: MeshKey = MeshKey("model");
pub const GROUND: MeshKey = MeshKey("ground");
pub const CURVE: MeshKey = MeshKey("bezier_line");
pub const CONTROL_POINTS: MeshKey = MeshKey("control_points");

const MODEL_SIZE: f32 = 0.8;
const GROUND_HEIGHT: f32 = -1.0;
pub(crate) const GROUND_HALF_EXTENT: f32 = 4.0;
const MODEL_COLOR: Rgba = [0.85, 0.8, 0.7, 1.0];
const GROUND_COLOR: Rgba = [0.45, 0.6, 0.45, 1.0];
const CURVE_COLOR: Rgba = [1.0, 0.85, 0.1, 1.0];
const CONTROL_COLOR: Rgba = [0.9, 0.1, 0.1, 1.0];

/// Scene 4: a loaded mesh travelling back and forth along a cubic Bezier
/// curve above a ground plane.
#[derive(Debug, Clone)]
pub struct CurveMeshScene {
    mesh: MeshData,
    /// Recentres the mesh on its bounds and scales it to `MODEL_SIZE`.
    fit: Mat4,
    ground: MeshData,
    /// Stretches the ground across `GROUND_HALF_EXTENT` in x and z.
    ground_fit: Mat4,
    curve: CubicBezier,
    samples: usize,
    revision: u64,
    pub motion: PingPong,
    pub animate: bool,
    /// Curve parameter units per second.
    pub speed: f32,
}

impl CurveMeshScene {
    pub const MIN_SAMPLES: usize = 2;
    pub const MAX_SAMPLES: usize = 500;

    pub fn new(mesh: MeshData, ground: MeshData) -> Self {
        let fit = match mesh.bounds() {
            Some((lo, hi)) => {
                let scale = scale_to(MODEL_SIZE, (hi - lo).max_element());
                Mat4::from_scale(Vec3::splat(scale)) * Mat4::from_translation(-(lo + hi) * 0.5)
            }
            None => Mat4::IDENTITY,
        };
        // Only the footprint is scaled; the top face ends up at y = 0.
        let ground_fit = match ground.bounds() {
            Some((lo, hi)) => {
                let centre = (lo + hi) * 0.5;
                let scale = scale_to(2.0 * GROUND_HALF_EXTENT, (hi - lo).x.max((hi - lo).z));
                Mat4::from_scale(Vec3::new(scale, 1.0, scale))
                    * Mat4::from_translation(Vec3::new(-centre.x, -hi.y, -centre.z))
            }
            None => Mat4::IDENTITY,
        };
        Self {
            mesh,
            fit,
            ground,
            ground_fit,
            curve: CubicBezier::default(),
            samples: 50,
            revision: 0,
            motion: PingPong::default(),
            animate: true,
            speed: 0.25,
        }
    }

    pub fn mesh_name(&self) -> &str {
        &self.mesh.name
    }

    pub fn curve(&self) -> &CubicBezier {
        &self.curve
    }

    pub fn set_curve(&mut self, curve: CubicBezier) {
        if curve != self.curve {
            self.curve = curve;
            self.revision += 1;
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn set_samples(&mut self, samples: usize) {
        let samples = samples.clamp(Self::MIN_SAMPLES, Self::MAX_SAMPLES);
        if samples != self.samples {
            self.samples = samples;
            self.revision += 1;
        }
    }

    /// Current position of the model on the curve.
    pub fn position(&self) -> Vec3 {
        self.curve.point(self.motion.t())
    }

    pub fn ground_name(&self) -> &str {
        &self.ground.name
    }

    fn lighting(&self) -> LightingUniforms {
        LightingUniforms {
            light_pos: Vec3::new(2.0, 5.0, 3.0),
            ambient: 0.25,
            diffuse: 0.8,
            phong_specular: 0.3,
            ..LightingUniforms::default()
        }
    }
}

fn scale_to(size: f32, extent: f32) -> f32 {
    if extent > f32::EPSILON {
        size / extent
    } else {
        1.0
    }
}

impl Scene for CurveMeshScene {
    fn id(&self) -> SceneId {
        SceneId::CurveMesh
    }

    fn meshes(&self) -> Vec<(MeshKey, Geometry)> {
        let mut meshes = vec![
            (MODEL, geometry::from_mesh(&self.mesh, MODEL_COLOR)),
            (GROUND, geometry::from_mesh(&self.ground, GROUND_COLOR)),
        ];
        meshes.extend(self.changed_meshes());
        meshes
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    /// Curve edits never touch the model or the ground.
    fn changed_meshes(&self) -> Vec<(MeshKey, Geometry)> {
        vec![
            (
                CURVE,
                geometry::polyline(&self.curve.sample(self.samples), CURVE_COLOR),
            ),
            (
                CONTROL_POINTS,
                geometry::points(&self.curve.control_points(), CONTROL_COLOR),
            ),
        ]
    }

    fn update(&mut self, dt: f32) {
        if self.animate {
            self.motion.advance(self.speed * dt);
        }
    }

    fn draw(&self, list: &mut DrawList) {
        list.set_lighting(self.lighting());
        list.push(DrawCommand::lit(
            GROUND,
            Mat4::from_translation(Vec3::new(0.0, GROUND_HEIGHT, 0.0)) * self.ground_fit,
            ColorSource::Vertex,
        ));
        list.push(DrawCommand::lit(
            MODEL,
            Mat4::from_translation(self.position()) * self.fit,
            ColorSource::Vertex,
        ));
        list.push(DrawCommand::flat(CURVE, Mat4::IDENTITY));
        list.push(DrawCommand::flat(CONTROL_POINTS, Mat4::IDENTITY));
    }
}
