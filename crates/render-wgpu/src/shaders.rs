/// Bindings shared by both shaders: per-frame globals in group 0 and the
/// per-draw block (dynamic offset) in group 1.
const COMMON: &str = r#"
struct Globals {
    view_proj: mat4x4<f32>,
    view_pos: vec4<f32>,
    light_pos: vec4<f32>,
    light_color: vec4<f32>,
    // x: ambient, y: diffuse, z: specular, w: shininess
    strengths: vec4<f32>,
    // x: 1.0 selects Gouraud (per-vertex) lighting
    mode: vec4<f32>,
};

struct PerDraw {
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    color: vec4<f32>,
    // x: 1.0 replaces the vertex color with `color`
    flags: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@group(1) @binding(0)
var<uniform> per_draw: PerDraw;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec4<f32>,
};

fn base_color(vertex_color: vec4<f32>) -> vec4<f32> {
    return mix(vertex_color, per_draw.color, per_draw.flags.x);
}
"#;

const FLAT_BODY: &str = r#"
struct FlatOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_flat(vertex: VertexInput) -> FlatOutput {
    var out: FlatOutput;
    out.clip_position = globals.view_proj * per_draw.model * vec4<f32>(vertex.position, 1.0);
    out.color = base_color(vertex.color);
    return out;
}

@fragment
fn fs_flat(in: FlatOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

const LIT_BODY: &str = r#"
struct LitOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) color: vec4<f32>,
    @location(3) gouraud: vec3<f32>,
};

fn light_at(pos: vec3<f32>, normal: vec3<f32>) -> vec3<f32> {
    let n = normalize(normal);
    let l = normalize(globals.light_pos.xyz - pos);
    let v = normalize(globals.view_pos.xyz - pos);
    let r = reflect(-l, n);
    let ambient = globals.strengths.x;
    let diffuse = globals.strengths.y * max(dot(n, l), 0.0);
    let specular = globals.strengths.z * pow(max(dot(v, r), 0.0), globals.strengths.w);
    return (ambient + diffuse + specular) * globals.light_color.rgb;
}

@vertex
fn vs_lit(vertex: VertexInput) -> LitOutput {
    let world = per_draw.model * vec4<f32>(vertex.position, 1.0);
    let normal = (per_draw.normal_matrix * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: LitOutput;
    out.clip_position = globals.view_proj * world;
    out.world_pos = world.xyz;
    out.world_normal = normal;
    out.color = base_color(vertex.color);
    out.gouraud = light_at(world.xyz, normal);
    return out;
}

@fragment
fn fs_lit(in: LitOutput) -> @location(0) vec4<f32> {
    let phong = light_at(in.world_pos, in.world_normal);
    let light = select(phong, in.gouraud, globals.mode.x > 0.5);
    return vec4<f32>(light * in.color.rgb, in.color.a);
}
"#;

/// Unlit shader: vertex or solid color.
pub fn flat_shader() -> String {
    format!("{COMMON}{FLAT_BODY}")
}

/// Phong / Gouraud shader.
pub fn lit_shader() -> String {
    format!("{COMMON}{LIT_BODY}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shaders_declare_their_entry_points() {
        let flat = flat_shader();
        assert!(flat.contains("fn vs_flat") && flat.contains("fn fs_flat"));
        let lit = lit_shader();
        assert!(lit.contains("fn vs_lit") && lit.contains("fn fs_lit"));
        assert!(lit.contains("var<uniform> per_draw"));
    }
}
