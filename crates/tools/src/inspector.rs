use vislab_render::{DrawList, Geometry, MeshKey, Shading};

/// Read-only queries over a scene's geometry and draw list.
pub struct GeometryInspector;

impl GeometryInspector {
    /// Totals across the meshes a scene uploads.
    pub fn summary(meshes: &[(MeshKey, Geometry)]) -> GeometrySummary {
        meshes.iter().map(|(_, g)| Self::mesh(g)).sum()
    }

    /// Counts for a single mesh.
    pub fn mesh(geometry: &Geometry) -> GeometrySummary {
        GeometrySummary {
            meshes: 1,
            vertices: geometry.vertices.len(),
            indices: geometry.index_count(),
            triangles: geometry.triangle_count(),
        }
    }

    /// Number of (flat, lit) draw calls in a list.
    pub fn draw_calls(list: &DrawList) -> (usize, usize) {
        list.commands.iter().fold((0, 0), |(flat, lit), c| match c.shading {
            Shading::Flat => (flat + 1, lit),
            Shading::Lit => (flat, lit + 1),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeometrySummary {
    pub meshes: usize,
    pub vertices: usize,
    pub indices: usize,
    pub triangles: usize,
}

impl std::ops::Add for GeometrySummary {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            meshes: self.meshes + rhs.meshes,
            vertices: self.vertices + rhs.vertices,
            indices: self.indices + rhs.indices,
            triangles: self.triangles + rhs.triangles,
        }
    }
}

impl std::iter::Sum for GeometrySummary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, s| acc + s)
    }
}

impl std::fmt::Display for GeometrySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vertices, {} indices ({} triangles) in {} meshes",
            self.vertices, self.indices, self.triangles, self.meshes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vislab_render::{DrawCommand, Topology, Vertex};

    fn quad() -> Geometry {
        Geometry::indexed(
            vec![Vertex::colored([0.0; 3], [1.0; 4]); 4],
            vec![0, 1, 2, 2, 3, 0],
            Topology::Triangles,
        )
    }

    #[test]
    fn summary_empty() {
        assert_eq!(GeometryInspector::summary(&[]), GeometrySummary::default());
    }

    #[test]
    fn summary_totals() {
        let lines = Geometry::new(vec![Vertex::colored([0.0; 3], [1.0; 4]); 2], Topology::Lines);
        let s = GeometryInspector::summary(&[(MeshKey("quad"), quad()), (MeshKey("line"), lines)]);
        assert_eq!(s.meshes, 2);
        assert_eq!(s.vertices, 6);
        assert_eq!(s.indices, 6);
        assert_eq!(s.triangles, 2);
        assert!(format!("{s}").contains("(2 triangles)"));
    }

    #[test]
    fn per_mesh_counts_add_up_to_summary() {
        let lines = Geometry::new(vec![Vertex::colored([0.0; 3], [1.0; 4]); 2], Topology::Lines);
        let total = GeometryInspector::mesh(&quad()) + GeometryInspector::mesh(&lines);
        let summary =
            GeometryInspector::summary(&[(MeshKey("quad"), quad()), (MeshKey("line"), lines)]);
        assert_eq!(total, summary);
        assert_eq!(GeometryInspector::mesh(&quad()).meshes, 1);
    }

    #[test]
    fn draw_calls_by_shading() {
        let mut list = DrawList::new();
        list.push(DrawCommand::flat(MeshKey("a"), glam::Mat4::IDENTITY));
        list.push(DrawCommand::lit(
            MeshKey("b"),
            glam::Mat4::IDENTITY,
            vislab_render::ColorSource::Vertex,
        ));
        list.push(DrawCommand::flat(MeshKey("c"), glam::Mat4::IDENTITY));
        assert_eq!(GeometryInspector::draw_calls(&list), (2, 1));
    }
}
