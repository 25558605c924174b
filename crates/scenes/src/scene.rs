use vislab_common::SceneId;
use vislab_render::{DrawList, Geometry, MeshKey};

/// A demo scene.
///
/// Geometry returned by [`Scene::meshes`] is uploaded when the scene is
/// created. When [`Scene::revision`] changes only [`Scene::changed_meshes`]
/// is uploaded again. Everything else happens per frame through
/// [`Scene::draw`].
pub trait Scene {
    fn id(&self) -> SceneId;

    /// All geometry this scene draws, keyed by the names its draw commands use.
    fn meshes(&self) -> Vec<(MeshKey, Geometry)>;

    /// Bumped whenever `meshes()` would return different data.
    fn revision(&self) -> u64 {
        0
    }

    /// The subset of `meshes()` that a revision bump can change.
    fn changed_meshes(&self) -> Vec<(MeshKey, Geometry)> {
        self.meshes()
    }

    /// Advance by one fixed timestep of `dt` seconds.
    fn update(&mut self, dt: f32);

    fn draw(&self, list: &mut DrawList);
}
