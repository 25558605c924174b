use std::path::PathBuf;
use vislab_assets::{AssetStore, MeshData, TextureData};
use vislab_common::SceneId;
use vislab_render::{DrawList, Geometry, MeshKey};

use crate::clock::BinaryClockScene;
use crate::cube::CubeScene;
use crate::curve_mesh::{CurveMeshScene, GROUND_HALF_EXTENT};
use crate::lighting::LightingScene;
use crate::primitives::PrimitivesScene;
use crate::scene::Scene;

pub const BUNNY_FILE: &str = "bunny.obj";
pub const PLANE_FILE: &str = "plane.obj";
pub const DETAILS_IMAGE_FILE: &str = "img_mars.jpg";

/// Files and loaded assets the scenes draw from.
#[derive(Debug, Default)]
pub struct SceneResources {
    data_dir: PathBuf,
    assets: AssetStore,
}

impl SceneResources {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            assets: AssetStore::new(),
        }
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// The mesh for the curve scene. Loads `bunny.obj` from the data
    /// directory the first time; a sphere stands in if that fails.
    pub fn bunny(&mut self) -> MeshData {
        self.mesh_or("bunny", BUNNY_FILE, || MeshData::uv_sphere(16, 24, 1.0))
    }

    /// The ground under the curve scene, from `plane.obj` or a flat quad.
    pub fn ground(&mut self) -> MeshData {
        self.mesh_or("ground", PLANE_FILE, || MeshData::plane(GROUND_HALF_EXTENT))
    }

    /// The picture shown in the details window, if `img_mars.jpg` decodes.
    pub fn details_image(&mut self) -> Option<TextureData> {
        let cached = self.assets.find("details");
        if let Some(image) = cached.and_then(|id| self.assets.get_texture(id)) {
            return Some(image.clone());
        }
        let path = self.data_dir.join(DETAILS_IMAGE_FILE);
        match self.assets.load_texture("details", &path) {
            Ok(id) => self.assets.get_texture(id).cloned(),
            Err(e) => {
                tracing::warn!("{e}; the details window shows text only");
                None
            }
        }
    }

    /// Registers `file` under `name` on first use, or `fallback()` when the
    /// file cannot be loaded. Later calls return the stored mesh.
    fn mesh_or(&mut self, name: &str, file: &str, fallback: fn() -> MeshData) -> MeshData {
        if let Some(mesh) = self.assets.find(name).and_then(|id| self.assets.get_mesh(id)) {
            return mesh.clone();
        }
        let path = self.data_dir.join(file);
        let id = match self.assets.load_mesh(name, &path) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("{e}; using a generated {name}");
                let mut mesh = fallback();
                mesh.name = name.into();
                self.assets.insert_mesh(mesh)
            }
        };
        self.assets.get_mesh(id).cloned().unwrap_or_else(fallback)
    }
}

/// The scene currently on screen.
#[derive(Debug, Clone)]
pub enum ActiveScene {
    Primitives(PrimitivesScene),
    BinaryClock(BinaryClockScene),
    Cube(CubeScene),
    CurveMesh(CurveMeshScene),
    Lighting(LightingScene),
}

impl ActiveScene {
    fn as_scene(&self) -> &dyn Scene {
        match self {
            ActiveScene::Primitives(s) => s,
            ActiveScene::BinaryClock(s) => s,
            ActiveScene::Cube(s) => s,
            ActiveScene::CurveMesh(s) => s,
            ActiveScene::Lighting(s) => s,
        }
    }

    fn as_scene_mut(&mut self) -> &mut dyn Scene {
        match self {
            ActiveScene::Primitives(s) => s,
            ActiveScene::BinaryClock(s) => s,
            ActiveScene::Cube(s) => s,
            ActiveScene::CurveMesh(s) => s,
            ActiveScene::Lighting(s) => s,
        }
    }
}

impl Scene for ActiveScene {
    fn id(&self) -> SceneId {
        self.as_scene().id()
    }

    fn meshes(&self) -> Vec<(MeshKey, Geometry)> {
        self.as_scene().meshes()
    }

    fn revision(&self) -> u64 {
        self.as_scene().revision()
    }

    fn changed_meshes(&self) -> Vec<(MeshKey, Geometry)> {
        self.as_scene().changed_meshes()
    }

    fn update(&mut self, dt: f32) {
        self.as_scene_mut().update(dt);
    }

    fn draw(&self, list: &mut DrawList) {
        self.as_scene().draw(list);
    }
}

/// Build a fresh instance of scene `id`.
pub fn create_scene(id: SceneId, resources: &mut SceneResources) -> ActiveScene {
    tracing::info!("creating {id}");
    match id {
        SceneId::Primitives => ActiveScene::Primitives(PrimitivesScene::new()),
        SceneId::BinaryClock => ActiveScene::BinaryClock(BinaryClockScene::new()),
        SceneId::Cube => ActiveScene::Cube(CubeScene::new()),
        SceneId::CurveMesh => {
            let (model, ground) = (resources.bunny(), resources.ground());
            ActiveScene::CurveMesh(CurveMeshScene::new(model, ground))
        }
        SceneId::Lighting => ActiveScene::Lighting(LightingScene::new()),
    }
}

/// Tracks which scene the user picked and whether it must be (re)created.
#[derive(Debug, Clone)]
pub struct SceneSelector {
    current: SceneId,
    changed: bool,
}

impl SceneSelector {
    /// Starts out changed so the first frame creates `start`.
    pub fn new(start: SceneId) -> Self {
        Self {
            current: start,
            changed: true,
        }
    }

    pub fn current(&self) -> SceneId {
        self.current
    }

    /// Select `id`. Re-selecting the current scene recreates it.
    pub fn select(&mut self, id: SceneId) {
        self.current = id;
        self.changed = true;
    }

    /// The scene to create, if the selection changed since the last call.
    pub fn take_changed(&mut self) -> Option<SceneId> {
        std::mem::take(&mut self.changed).then_some(self.current)
    }
}

/// Owns the active scene and recreates it when the selection changes.
#[derive(Debug)]
pub struct SceneHost {
    selector: SceneSelector,
    scene: ActiveScene,
    resources: SceneResources,
}

impl SceneHost {
    pub fn new(start: SceneId, mut resources: SceneResources) -> Self {
        let mut selector = SceneSelector::new(start);
        let scene = create_scene(start, &mut resources);
        selector.take_changed();
        Self {
            selector,
            scene,
            resources,
        }
    }

    pub fn current(&self) -> SceneId {
        self.selector.current()
    }

    pub fn select(&mut self, id: SceneId) {
        self.selector.select(id);
    }

    /// Recreate the scene if a selection is pending. Returns `true` when a
    /// new scene was created and its meshes must be uploaded.
    pub fn sync(&mut self) -> bool {
        match self.selector.take_changed() {
            Some(id) => {
                self.scene = create_scene(id, &mut self.resources);
                true
            }
            None => false,
        }
    }

    pub fn scene(&self) -> &ActiveScene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut ActiveScene {
        &mut self.scene
    }

    pub fn resources(&self) -> &SceneResources {
        &self.resources
    }
}
