use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use std::collections::HashMap;
use std::num::NonZeroU64;
use vislab_common::RenderSettings;
use vislab_render::{
    ColorSource, DrawList, Geometry, LightingUniforms, MeshKey, RenderView, Shading,
    ShadingModel, Topology, Vertex,
};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    view_pos: [f32; 4],
    light_pos: [f32; 4],
    light_color: [f32; 4],
    strengths: [f32; 4],
    mode: [f32; 4],
}

impl Globals {
    fn new(view: &RenderView, lighting: &LightingUniforms) -> Self {
        let [r, g, b] = lighting.light_color;
        let gouraud = match lighting.model {
            ShadingModel::Phong => 0.0,
            ShadingModel::Gouraud => 1.0,
        };
        Self {
            view_proj: view.view_projection().to_cols_array_2d(),
            view_pos: view.eye.extend(1.0).to_array(),
            light_pos: lighting.light_pos.extend(1.0).to_array(),
            light_color: [r, g, b, 1.0],
            strengths: [
                lighting.ambient,
                lighting.diffuse,
                lighting.specular(),
                lighting.shininess.max(1.0),
            ],
            mode: [gouraud, 0.0, 0.0, 0.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct PerDraw {
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    color: [f32; 4],
    flags: [f32; 4],
}

impl PerDraw {
    fn new(model: Mat4, color: ColorSource) -> Self {
        let normal_matrix = if model.determinant().abs() > f32::EPSILON {
            model.inverse().transpose()
        } else {
            model
        };
        let (color, solid) = match color {
            ColorSource::Vertex => ([1.0; 4], 0.0),
            ColorSource::Solid(c) => (c, 1.0),
        };
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            color,
            flags: [solid, 0.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PipelineKey {
    shading: Shading,
    topology: Topology,
    cull: bool,
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    count: u32,
    topology: Topology,
}

/// Counts from the last [`SceneRenderer::render`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub draw_calls: u32,
    /// Commands dropped: unknown mesh or over the per-frame draw limit.
    pub skipped: u32,
}

/// wgpu renderer for scene draw lists.
///
/// Meshes are uploaded once per scene (see [`SceneRenderer::upload_meshes`])
/// and patched in place by [`SceneRenderer::update_meshes`];
/// pipelines are built lazily per (shading, topology, culling) combination.
pub struct SceneRenderer {
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    per_draw_buffer: wgpu::Buffer,
    per_draw_bind_group: wgpu::BindGroup,
    per_draw_stride: u64,
    pipeline_layout: wgpu::PipelineLayout,
    flat_shader: wgpu::ShaderModule,
    lit_shader: wgpu::ShaderModule,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    meshes: HashMap<MeshKey, GpuMesh>,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl SceneRenderer {
    /// Draw commands beyond this many per frame are skipped.
    pub const MAX_DRAWS: u64 = 256;
    const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals_buffer"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let per_draw_size = std::mem::size_of::<PerDraw>() as u64;
        let alignment = u64::from(device.limits().min_uniform_buffer_offset_alignment);
        let per_draw_stride = per_draw_size.div_ceil(alignment) * alignment;
        let per_draw_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("per_draw_buffer"),
            size: per_draw_stride * Self::MAX_DRAWS,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let per_draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("per_draw_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(per_draw_size),
                },
                count: None,
            }],
        });

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bind_group"),
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let per_draw_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("per_draw_bind_group"),
            layout: &per_draw_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &per_draw_buffer,
                    offset: 0,
                    size: NonZeroU64::new(per_draw_size),
                }),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pipeline_layout"),
            bind_group_layouts: &[&globals_layout, &per_draw_layout],
            push_constant_ranges: &[],
        });

        let flat_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("flat_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::flat_shader().into()),
        });
        let lit_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lit_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::lit_shader().into()),
        });

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            globals_buffer,
            globals_bind_group,
            per_draw_buffer,
            per_draw_bind_group,
            per_draw_stride,
            pipeline_layout,
            flat_shader,
            lit_shader,
            pipelines: HashMap::new(),
            meshes: HashMap::new(),
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    /// Replace all GPU meshes with `meshes`. Previous buffers are dropped.
    pub fn upload_meshes(&mut self, device: &wgpu::Device, meshes: &[(MeshKey, Geometry)]) {
        self.meshes.clear();
        self.update_meshes(device, meshes);
    }

    /// Re-upload `meshes`, keeping every other mesh already on the GPU.
    pub fn update_meshes(&mut self, device: &wgpu::Device, meshes: &[(MeshKey, Geometry)]) {
        for (key, geometry) in meshes {
            self.upload_mesh(device, *key, geometry);
        }
        tracing::debug!("uploaded {} of {} meshes", meshes.len(), self.meshes.len());
    }

    fn upload_mesh(&mut self, device: &wgpu::Device, key: MeshKey, geometry: &Geometry) {
        if geometry.vertices.is_empty() || geometry.element_count() == 0 {
            tracing::warn!("skipping empty mesh {key}");
            self.meshes.remove(&key);
            return;
        }
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(key.0),
            contents: bytemuck::cast_slice::<Vertex, u8>(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = geometry.indices.as_ref().map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(key.0),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });
        self.meshes.insert(
            key,
            GpuMesh {
                vertex_buffer,
                index_buffer,
                count: geometry.element_count(),
                topology: geometry.topology,
            },
        );
    }

    /// Clear to the settings' clear color and draw `list` as seen from `view`.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        view: &RenderView,
        list: &DrawList,
        settings: &RenderSettings,
    ) -> RenderStats {
        let lighting = list.lighting.unwrap_or_default();
        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytemuck::bytes_of(&Globals::new(view, &lighting)),
        );

        let mut stats = RenderStats::default();
        // (mesh, pipeline key, dynamic offset) per accepted command.
        let mut draws: Vec<(MeshKey, PipelineKey, u32)> = Vec::with_capacity(list.len());
        let mut per_draw_bytes = Vec::new();
        for cmd in &list.commands {
            let Some(mesh) = self.meshes.get(&cmd.mesh) else {
                tracing::trace!("draw of unknown mesh {}", cmd.mesh);
                stats.skipped += 1;
                continue;
            };
            if draws.len() as u64 >= Self::MAX_DRAWS {
                stats.skipped += 1;
                continue;
            }
            let key = PipelineKey {
                shading: cmd.shading,
                topology: mesh.topology,
                cull: settings.backface_culling,
            };
            let offset = per_draw_bytes.len() as u64;
            let per_draw = PerDraw::new(cmd.model, cmd.color);
            per_draw_bytes.extend_from_slice(bytemuck::bytes_of(&per_draw));
            per_draw_bytes.resize((offset + self.per_draw_stride) as usize, 0);
            draws.push((cmd.mesh, key, offset as u32));
        }

        for (_, key, _) in &draws {
            if !self.pipelines.contains_key(key) {
                let pipeline = self.create_pipeline(device, *key);
                self.pipelines.insert(*key, pipeline);
            }
        }

        if !per_draw_bytes.is_empty() {
            queue.write_buffer(&self.per_draw_buffer, 0, &per_draw_bytes);
        }

        let [r, g, b, a] = settings.clear_rgba();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("scene_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(r),
                            g: f64::from(g),
                            b: f64::from(b),
                            a: f64::from(a),
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.globals_bind_group, &[]);
            for (mesh_key, key, offset) in &draws {
                let (Some(mesh), Some(pipeline)) =
                    (self.meshes.get(mesh_key), self.pipelines.get(key))
                else {
                    continue;
                };
                pass.set_pipeline(pipeline);
                pass.set_bind_group(1, &self.per_draw_bind_group, &[*offset]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                match &mesh.index_buffer {
                    Some(indices) => {
                        pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                        pass.draw_indexed(0..mesh.count, 0, 0..1);
                    }
                    None => pass.draw(0..mesh.count, 0..1),
                }
                stats.draw_calls += 1;
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        stats
    }

    fn create_pipeline(&self, device: &wgpu::Device, key: PipelineKey) -> wgpu::RenderPipeline {
        tracing::debug!("building pipeline {key:?}");
        let (module, vs, fs) = match key.shading {
            Shading::Flat => (&self.flat_shader, "vs_flat", "fs_flat"),
            Shading::Lit => (&self.lit_shader, "vs_lit", "fs_lit"),
        };
        let (topology, strip_index_format) = match key.topology {
            Topology::Triangles => (wgpu::PrimitiveTopology::TriangleList, None),
            Topology::Lines => (wgpu::PrimitiveTopology::LineList, None),
            Topology::LineStrip => (
                wgpu::PrimitiveTopology::LineStrip,
                Some(wgpu::IndexFormat::Uint32),
            ),
            Topology::Points => (wgpu::PrimitiveTopology::PointList, None),
        };
        let cull_mode = (key.cull && key.topology == Topology::Triangles)
            .then_some(wgpu::Face::Back);

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&self.pipeline_layout),
            vertex: wgpu::VertexState {
                module,
                entry_point: Some(vs),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x3,
                        2 => Float32x4,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module,
                entry_point: Some(fs),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: self.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format,
                cull_mode,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: Self::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
