//! Fixed vertex data for the scenes.

use glam::{Vec2, Vec3};
use std::f32::consts::TAU;
use vislab_assets::MeshData;
use vislab_common::{BLACK, Rgba};
use vislab_render::{Geometry, Topology, Vertex};

pub const RED: Rgba = [1.0, 0.0, 0.0, 1.0];
pub const GREEN: Rgba = [0.0, 1.0, 0.0, 1.0];
pub const BLUE: Rgba = [0.0, 0.0, 1.0, 1.0];

/// RGB triangle centred on the origin in the z = 0 plane.
pub fn triangle() -> Geometry {
    Geometry::new(
        vec![
            Vertex::colored([-0.5, -0.5, 0.0], RED),
            Vertex::colored([0.5, -0.5, 0.0], GREEN),
            Vertex::colored([0.0, 0.5, 0.0], BLUE),
        ],
        Topology::Triangles,
    )
}

/// Regular polygon filled as a triangle fan, unrolled into a triangle list.
pub fn filled_polygon(sides: u32, radius: f32, center: Rgba, rim: Rgba) -> Geometry {
    let sides = sides.max(3);
    let mut vertices = Vec::with_capacity(sides as usize * 3);
    for i in 0..sides {
        let a0 = TAU * i as f32 / sides as f32;
        let a1 = TAU * (i + 1) as f32 / sides as f32;
        vertices.push(Vertex::colored([0.0, 0.0, 0.0], center));
        vertices.push(Vertex::colored([radius * a0.cos(), radius * a0.sin(), 0.0], rim));
        vertices.push(Vertex::colored([radius * a1.cos(), radius * a1.sin(), 0.0], rim));
    }
    Geometry::new(vertices, Topology::Triangles)
}

/// Closed circle outline: `segments + 1` vertices, the last repeating the first.
pub fn circle_outline(segments: u32, radius: f32, color: Rgba) -> Geometry {
    let segments = segments.max(3);
    let vertices = (0..=segments)
        .map(|i| {
            let a = TAU * (i % segments) as f32 / segments as f32;
            Vertex::colored([radius * a.cos(), radius * a.sin(), 0.0], color)
        })
        .collect();
    Geometry::new(vertices, Topology::LineStrip)
}

/// Axis-aligned rectangle of the given half extents, as two indexed triangles.
pub fn rectangle(half_width: f32, half_height: f32, color: Rgba) -> Geometry {
    let (w, h) = (half_width, half_height);
    Geometry::indexed(
        vec![
            Vertex::colored([-w, -h, 0.0], color),
            Vertex::colored([w, -h, 0.0], color),
            Vertex::colored([w, h, 0.0], color),
            Vertex::colored([-w, h, 0.0], color),
        ],
        vec![0, 1, 2, 2, 3, 0],
        Topology::Triangles,
    )
}

/// Horizontal row of points centred on the origin.
pub fn point_row(count: u32, spacing: f32, color: Rgba) -> Geometry {
    let start = -(count.saturating_sub(1) as f32) * spacing / 2.0;
    let vertices = (0..count)
        .map(|i| Vertex::colored([start + i as f32 * spacing, 0.0, 0.0], color))
        .collect();
    Geometry::new(vertices, Topology::Points)
}

/// Elliptical annulus between the `inner` and `outer` radii (x = side, y = up).
pub fn ellipse_ring(inner: Vec2, outer: Vec2, segments: u32, color: Rgba) -> Geometry {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments as usize + 1) * 2);
    for i in 0..=segments {
        let a = TAU * i as f32 / segments as f32;
        let (s, c) = a.sin_cos();
        vertices.push(Vertex::colored([inner.x * c, inner.y * s, 0.0], color));
        vertices.push(Vertex::colored([outer.x * c, outer.y * s, 0.0], color));
    }
    let mut indices = Vec::with_capacity(segments as usize * 6);
    for i in 0..segments {
        let k = 2 * i;
        indices.extend_from_slice(&[k, k + 1, k + 3, k, k + 3, k + 2]);
    }
    Geometry::indexed(vertices, indices, Topology::Triangles)
}

// (normal, u, v) with u x v = normal, so each face winds counter-clockwise
// seen from outside.
const CUBE_FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
];

fn cube_with(half: f32, color: impl Fn(Vec3) -> Rgba) -> Geometry {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (n, u, v) in CUBE_FACES {
        let base = vertices.len() as u32;
        let c = n * half;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = c + u * half * su + v * half * sv;
            vertices.push(Vertex::lit(p.to_array(), n.to_array(), color(p / half)));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    Geometry::indexed(vertices, indices, Topology::Triangles)
}

/// Cube spanning `[-half, half]` on every axis with per-face normals.
pub fn cube(half: f32, color: Rgba) -> Geometry {
    cube_with(half, |_| color)
}

/// Cube whose vertex colors map each corner's position onto the RGB cube.
pub fn rgb_cube(half: f32) -> Geometry {
    cube_with(half, |unit| {
        let c = (unit + Vec3::ONE) * 0.5;
        [c.x, c.y, c.z, 1.0]
    })
}

/// The 12 edges of the cube spanning `[-half, half]`, as a line list.
pub fn cube_edges(half: f32) -> Geometry {
    let corner = |i: u32| {
        let s = |bit: u32| if i & bit != 0 { half } else { -half };
        [s(1), s(2), s(4)]
    };
    let mut vertices = Vec::with_capacity(24);
    for i in 0..8u32 {
        for bit in [1, 2, 4] {
            if i & bit == 0 {
                vertices.push(Vertex::colored(corner(i), BLACK));
                vertices.push(Vertex::colored(corner(i | bit), BLACK));
            }
        }
    }
    Geometry::new(vertices, Topology::Lines)
}

/// World axes from the origin: X red, Y green, Z blue.
pub fn axes(length: f32) -> Geometry {
    let mut vertices = Vec::with_capacity(6);
    for (dir, color) in [(Vec3::X, RED), (Vec3::Y, GREEN), (Vec3::Z, BLUE)] {
        vertices.push(Vertex::colored([0.0; 3], color));
        vertices.push(Vertex::colored((dir * length).to_array(), color));
    }
    Geometry::new(vertices, Topology::Lines)
}

pub fn polyline(points: &[Vec3], color: Rgba) -> Geometry {
    let vertices = points
        .iter()
        .map(|p| Vertex::colored(p.to_array(), color))
        .collect();
    Geometry::new(vertices, Topology::LineStrip)
}

pub fn points(points: &[Vec3], color: Rgba) -> Geometry {
    let vertices = points
        .iter()
        .map(|p| Vertex::colored(p.to_array(), color))
        .collect();
    Geometry::new(vertices, Topology::Points)
}

/// Indexed triangles from a loaded mesh.
pub fn from_mesh(mesh: &MeshData, color: Rgba) -> Geometry {
    let vertices = mesh
        .positions
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let n = mesh.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]);
            Vertex::lit(*p, n, color)
        })
        .collect();
    Geometry::indexed(vertices, mesh.indices.clone(), Topology::Triangles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(v: &Vertex) -> Vec3 {
        Vec3::from_array(v.position)
    }

    #[test]
    fn triangle_is_rgb() {
        let g = triangle();
        assert_eq!(g.element_count(), 3);
        let colors: Vec<_> = g.vertices.iter().map(|v| v.color).collect();
        assert_eq!(colors, vec![RED, GREEN, BLUE]);
    }

    #[test]
    fn cube_faces_wind_outward() {
        let g = cube(1.0, [1.0; 4]);
        let indices = g.indices.as_ref().unwrap();
        assert_eq!(indices.len(), 36);
        for tri in indices.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|k| &g.vertices[tri[k] as usize]);
            let face_n = (pos(b) - pos(a)).cross(pos(c) - pos(a)).normalize();
            assert!(face_n.dot(Vec3::from_array(a.normal)) > 0.99);
        }
    }

    #[test]
    fn rgb_cube_maps_corners_to_colors() {
        let g = rgb_cube(1.0);
        for v in &g.vertices {
            let expected = (pos(v) + Vec3::ONE) * 0.5;
            assert_eq!(&v.color[..3], &expected.to_array());
        }
    }

    #[test]
    fn cube_has_twelve_unit_edges() {
        let g = cube_edges(0.5);
        assert_eq!(g.vertices.len(), 24);
        for pair in g.vertices.chunks_exact(2) {
            assert!((pos(&pair[0]).distance(pos(&pair[1])) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn circle_outline_closes() {
        let g = circle_outline(16, 1.0, BLACK);
        assert_eq!(g.vertices.len(), 17);
        assert_eq!(g.vertices[0].position, g.vertices[16].position);
        assert_eq!(g.topology, Topology::LineStrip);
    }

    #[test]
    fn polygon_clamps_to_triangle() {
        assert_eq!(filled_polygon(1, 1.0, RED, BLUE).triangle_count(), 3);
        assert_eq!(filled_polygon(6, 1.0, RED, BLUE).triangle_count(), 6);
    }

    #[test]
    fn ring_stays_between_radii() {
        let inner = Vec2::new(0.05, 0.12);
        let outer = Vec2::new(0.09, 0.16);
        let g = ellipse_ring(inner, outer, 24, BLACK);
        assert_eq!(g.triangle_count(), 48);
        for (i, v) in g.vertices.iter().enumerate() {
            let p = pos(v);
            let r = if i % 2 == 0 { inner } else { outer };
            let e = (p.x / r.x).powi(2) + (p.y / r.y).powi(2);
            assert!((e - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn point_row_is_centred() {
        let g = point_row(5, 0.1, BLACK);
        let xs: f32 = g.vertices.iter().map(|v| v.position[0]).sum();
        assert!(xs.abs() < 1e-6);
        assert_eq!(g.topology, Topology::Points);
    }

    #[test]
    fn mesh_conversion_keeps_indices() {
        let mesh = MeshData::plane(1.0);
        let g = from_mesh(&mesh, RED);
        assert_eq!(g.vertices.len(), 4);
        assert_eq!(g.indices.as_deref(), Some(&mesh.indices[..]));
        assert_eq!(g.vertices[0].normal, [0.0, 1.0, 0.0]);
    }
}
