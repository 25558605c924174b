use bytemuck::{Pod, Zeroable};
use vislab_common::Rgba;

/// Vertex layout shared by every pipeline.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    /// Vertex with no meaningful normal, for unlit geometry.
    pub fn colored(position: [f32; 3], color: Rgba) -> Self {
        Self {
            position,
            normal: [0.0, 0.0, 1.0],
            color,
        }
    }

    pub fn lit(position: [f32; 3], normal: [f32; 3], color: Rgba) -> Self {
        Self {
            position,
            normal,
            color,
        }
    }
}

/// How the vertices of a [`Geometry`] are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Triangles,
    Lines,
    LineStrip,
    Points,
}

/// Name under which a scene's geometry is uploaded and drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshKey(pub &'static str);

impl std::fmt::Display for MeshKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Vertex data (optionally indexed) ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Option<Vec<u32>>,
    pub topology: Topology,
}

impl Geometry {
    pub fn new(vertices: Vec<Vertex>, topology: Topology) -> Self {
        Self {
            vertices,
            indices: None,
            topology,
        }
    }

    pub fn indexed(vertices: Vec<Vertex>, indices: Vec<u32>, topology: Topology) -> Self {
        Self {
            vertices,
            indices: Some(indices),
            topology,
        }
    }

    /// Number of elements a draw call consumes: indices if present,
    /// vertices otherwise.
    pub fn element_count(&self) -> u32 {
        match &self.indices {
            Some(indices) => indices.len() as u32,
            None => self.vertices.len() as u32,
        }
    }

    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, Vec::len)
    }

    pub fn triangle_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.element_count() as usize / 3,
            _ => 0,
        }
    }
}
