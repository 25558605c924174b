use glam::Vec3;
use std::io::BufRead;
use std::path::Path;

use crate::AssetError;

/// Indexed triangle mesh in CPU memory.
///
/// Positions and normals are parallel arrays; `indices` index both.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.positions.iter().map(|p| Vec3::from_array(*p));
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Recompute per-vertex normals as the area-weighted average of the
    /// normals of every triangle touching the vertex.
    pub fn compute_normals(&mut self) {
        let mut acc = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            if a >= acc.len() || b >= acc.len() || c >= acc.len() {
                continue;
            }
            let pa = Vec3::from_array(self.positions[a]);
            let pb = Vec3::from_array(self.positions[b]);
            let pc = Vec3::from_array(self.positions[c]);
            // Unnormalized: magnitude is twice the triangle area.
            let n = (pb - pa).cross(pc - pa);
            acc[a] += n;
            acc[b] += n;
            acc[c] += n;
        }
        self.normals = acc
            .into_iter()
            .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
            .collect();
    }

    /// Flat square on the y = 0 plane facing +Y.
    pub fn plane(half_extent: f32) -> Self {
        let e = half_extent;
        Self {
            name: "plane".into(),
            positions: vec![[-e, 0.0, -e], [e, 0.0, -e], [e, 0.0, e], [-e, 0.0, e]],
            normals: vec![[0.0, 1.0, 0.0]; 4],
            indices: vec![0, 2, 1, 0, 3, 2],
        }
    }

    /// Latitude/longitude sphere centred on the origin.
    pub fn uv_sphere(rings: u32, segments: u32, radius: f32) -> Self {
        let rings = rings.max(2);
        let segments = segments.max(3);
        let mut positions = Vec::new();
        let mut normals = Vec::new();
        for r in 0..=rings {
            let phi = std::f32::consts::PI * r as f32 / rings as f32;
            for s in 0..=segments {
                let theta = std::f32::consts::TAU * s as f32 / segments as f32;
                let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
                positions.push((n * radius).to_array());
                normals.push(n.to_array());
            }
        }
        let stride = segments + 1;
        let mut indices = Vec::new();
        for r in 0..rings {
            for s in 0..segments {
                let i0 = r * stride + s;
                let i1 = i0 + stride;
                indices.extend_from_slice(&[i0, i0 + 1, i1, i0 + 1, i1 + 1, i1]);
            }
        }
        Self {
            name: "sphere".into(),
            positions,
            normals,
            indices,
        }
    }
}

/// Load every model in an OBJ file as a triangulated, single-index mesh.
///
/// Files without normals get generated ones.
pub fn load_obj(path: impl AsRef<Path>) -> Result<Vec<MeshData>, AssetError> {
    let path = path.as_ref();
    let (models, _materials) = tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS).map_err(|e| {
        AssetError::Obj {
            path: path.display().to_string(),
            source: e,
        }
    })?;
    tracing::debug!("loaded {} model(s) from {}", models.len(), path.display());
    Ok(models.into_iter().map(mesh_from_model).collect())
}

/// Parse OBJ text from a reader. Material libraries are ignored.
pub fn parse_obj(reader: &mut impl BufRead) -> Result<Vec<MeshData>, AssetError> {
    let (models, _materials) =
        tobj::load_obj_buf(reader, &tobj::GPU_LOAD_OPTIONS, |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|e| AssetError::Obj {
            path: "<buffer>".into(),
            source: e,
        })?;
    Ok(models.into_iter().map(mesh_from_model).collect())
}

fn mesh_from_model(model: tobj::Model) -> MeshData {
    let mesh = model.mesh;
    let positions: Vec<[f32; 3]> = mesh
        .positions
        .chunks_exact(3)
        .map(|p| [p[0], p[1], p[2]])
        .collect();
    let normals: Vec<[f32; 3]> = mesh
        .normals
        .chunks_exact(3)
        .map(|n| [n[0], n[1], n[2]])
        .collect();
    let has_normals = normals.len() == positions.len();
    let mut data = MeshData {
        name: if model.name.is_empty() {
            "unnamed".into()
        } else {
            model.name
        },
        positions,
        normals,
        indices: mesh.indices,
    };
    if !has_normals {
        data.compute_normals();
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;

    const QUAD_OBJ: &str = "\
o quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
";

    #[test]
    fn parse_triangulates_quads() {
        let meshes = parse_obj(&mut BufReader::new(QUAD_OBJ.as_bytes())).unwrap();
        assert_eq!(meshes.len(), 1);
        let quad = &meshes[0];
        assert_eq!(quad.name, "quad");
        assert_eq!(quad.vertex_count(), 4);
        assert_eq!(quad.triangle_count(), 2);
    }

    #[test]
    fn parse_generates_missing_normals() {
        let meshes = parse_obj(&mut BufReader::new(QUAD_OBJ.as_bytes())).unwrap();
        let quad = &meshes[0];
        assert_eq!(quad.normals.len(), quad.positions.len());
        for n in &quad.normals {
            assert!((n[2] - 1.0).abs() < 1e-5, "expected +Z normal, got {n:?}");
        }
    }

    #[test]
    fn load_obj_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.obj");
        std::fs::write(&path, QUAD_OBJ).unwrap();
        let meshes = load_obj(&path).unwrap();
        assert_eq!(meshes[0].triangle_count(), 2);
    }

    #[test]
    fn load_obj_missing_file() {
        let err = load_obj("definitely/not/here.obj").unwrap_err();
        assert!(err.to_string().contains("here.obj"));
    }

    #[test]
    fn compute_normals_handles_shared_vertices() {
        // Two triangles folded along the x axis: shared vertices average.
        let mut mesh = MeshData {
            name: "fold".into(),
            positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            normals: Vec::new(),
            indices: vec![0, 1, 2, 0, 3, 1],
        };
        mesh.compute_normals();
        let shared = Vec3::from_array(mesh.normals[0]);
        assert!((shared.length() - 1.0).abs() < 1e-5);
        assert!(shared.z > 0.0 && shared.y > 0.0);
        assert_eq!(Vec3::from_array(mesh.normals[2]), Vec3::Z);
    }

    #[test]
    fn sphere_normals_point_outward() {
        let sphere = MeshData::uv_sphere(8, 12, 2.0);
        for (p, n) in sphere.positions.iter().zip(&sphere.normals) {
            let p = Vec3::from_array(*p);
            assert!((p.length() - 2.0).abs() < 1e-4);
            assert!(p.normalize().dot(Vec3::from_array(*n)) > 0.99);
        }
        assert_eq!(sphere.triangle_count(), 8 * 12 * 2);
    }

    #[test]
    fn plane_bounds() {
        let plane = MeshData::plane(3.0);
        let (lo, hi) = plane.bounds().unwrap();
        assert_eq!(lo, Vec3::new(-3.0, 0.0, -3.0));
        assert_eq!(hi, Vec3::new(3.0, 0.0, 3.0));
    }
}
