//! Asset loading for the scenes: OBJ meshes, procedural fallbacks and images.
//!
//! Loaded assets live in a content-addressed [`AssetStore`]; loading the same
//! mesh twice yields the same [`AssetId`] and a single stored copy.

mod mesh;
mod texture;

pub use mesh::{MeshData, load_obj, parse_obj};
pub use texture::TextureData;

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::Path;

/// Content-addressed asset ID computed from the asset data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(pub u64);

#[derive(Debug, Clone)]
enum Asset {
    Mesh(MeshData),
    Texture(TextureData),
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load OBJ {path}: {source}")]
    Obj {
        path: String,
        #[source]
        source: tobj::LoadError,
    },
    #[error("failed to decode image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("{path} contains no meshes")]
    EmptyModel { path: String },
}

/// Content-addressed asset registry.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    assets: BTreeMap<AssetId, Asset>,
    names: BTreeMap<String, AssetId>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mesh and return its asset ID.
    pub fn insert_mesh(&mut self, mesh: MeshData) -> AssetId {
        let id = mesh_hash(&mesh);
        self.names.insert(mesh.name.clone(), id);
        self.assets.insert(id, Asset::Mesh(mesh));
        id
    }

    /// Register a texture and return its asset ID.
    pub fn insert_texture(&mut self, texture: TextureData) -> AssetId {
        let mut hasher = Sha256::new();
        hasher.update(texture.width.to_le_bytes());
        hasher.update(texture.height.to_le_bytes());
        hasher.update(&texture.rgba);
        let id = digest_id(hasher);
        self.names.insert(texture.name.clone(), id);
        self.assets.insert(id, Asset::Texture(texture));
        id
    }

    /// Load an OBJ file and register its first model under `name`.
    pub fn load_mesh(&mut self, name: &str, path: impl AsRef<Path>) -> Result<AssetId, AssetError> {
        let path = path.as_ref();
        let mut mesh = load_obj(path)?
            .into_iter()
            .next()
            .ok_or_else(|| AssetError::EmptyModel {
                path: path.display().to_string(),
            })?;
        mesh.name = name.to_string();
        let id = self.insert_mesh(mesh);
        tracing::info!("registered mesh {name} from {}", path.display());
        Ok(id)
    }

    /// Decode an image file and register it under `name`.
    pub fn load_texture(
        &mut self,
        name: &str,
        path: impl AsRef<Path>,
    ) -> Result<AssetId, AssetError> {
        let mut texture = TextureData::load(path)?;
        texture.name = name.to_string();
        Ok(self.insert_texture(texture))
    }

    pub fn get_mesh(&self, id: AssetId) -> Option<&MeshData> {
        match self.assets.get(&id) {
            Some(Asset::Mesh(m)) => Some(m),
            _ => None,
        }
    }

    pub fn get_texture(&self, id: AssetId) -> Option<&TextureData> {
        match self.assets.get(&id) {
            Some(Asset::Texture(t)) => Some(t),
            _ => None,
        }
    }

    /// Look up the asset most recently registered under `name`.
    pub fn find(&self, name: &str) -> Option<AssetId> {
        self.names.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Hashes everything that distinguishes two meshes: the name, both vertex
/// streams and the index buffer.
fn mesh_hash(mesh: &MeshData) -> AssetId {
    let mut hasher = Sha256::new();
    hasher.update((mesh.name.len() as u64).to_le_bytes());
    hasher.update(mesh.name.as_bytes());
    for stream in [&mesh.positions, &mesh.normals] {
        hasher.update((stream.len() as u64).to_le_bytes());
        for c in stream.iter().flatten() {
            hasher.update(c.to_le_bytes());
        }
    }
    for i in &mesh.indices {
        hasher.update(i.to_le_bytes());
    }
    digest_id(hasher)
}

fn digest_id(hasher: Sha256) -> AssetId {
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    AssetId(u64::from_le_bytes(bytes))
}
