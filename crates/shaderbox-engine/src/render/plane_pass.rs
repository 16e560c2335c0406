use anyhow::{Result, bail};
use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::sandbox::SandboxScene;
use crate::scene::{Plane, PlaneVertex, SandboxUniforms};

use super::{RenderCtx, RenderTarget};

const BUILTIN_VERTEX: &str = include_str!("shaders/plane.wgsl");
const BUILTIN_FRAGMENT: &str = include_str!("shaders/default.frag.wgsl");

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    view_proj: [[f32; 4]; 4],
}

/// Renders the shader plane: one camera-projected quad driven by the
/// sandbox material's fragment stage.
///
/// Built once per material, after scene initialization. The fragment stage
/// comes from the material; the vertex stage falls back to the built-in
/// plane shader when the material carries none.
pub struct SandboxRenderer {
    pipeline: wgpu::RenderPipeline,
    camera_ubo: wgpu::Buffer,
    uniform_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
}

impl SandboxRenderer {
    /// Compiles the material's shaders and builds the pipeline.
    ///
    /// Compilation is wgpu's job; its validation errors are collected through
    /// an error scope and surfaced here, so a broken shader fails loudly once
    /// instead of rendering a silent blank.
    pub fn new(ctx: &RenderCtx<'_>, scene: &SandboxScene) -> Result<Self> {
        let device = ctx.device;

        let vertex_src = scene
            .material
            .vertex_source
            .as_deref()
            .unwrap_or(BUILTIN_VERTEX);
        let fragment_src = scene
            .material
            .fragment_source
            .as_deref()
            .unwrap_or(BUILTIN_FRAGMENT);

        let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shaderbox plane vertex"),
            source: wgpu::ShaderSource::Wgsl(vertex_src.into()),
        });

        let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("shaderbox plane fragment"),
            source: wgpu::ShaderSource::Wgsl(fragment_src.into()),
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("shaderbox plane bgl"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("shaderbox plane pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("shaderbox plane pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[PlaneVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        if let Some(err) = pollster::block_on(error_scope.pop()) {
            bail!("shader pipeline creation failed: {err}");
        }

        let camera_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("shaderbox camera ubo"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("shaderbox material ubo"),
            size: std::mem::size_of::<SandboxUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("shaderbox plane bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_ubo.as_entire_binding(),
                },
            ],
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("shaderbox plane vbo"),
            contents: bytemuck::cast_slice(scene.plane.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("shaderbox plane ibo"),
            contents: bytemuck::cast_slice(&Plane::INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            pipeline,
            camera_ubo,
            uniform_ubo,
            bind_group,
            vertex_buffer,
            index_buffer,
        })
    }

    /// Uploads the frame's uniform values and draws the plane.
    pub fn render(
        &self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        scene: &SandboxScene,
    ) {
        let camera = CameraUniform {
            view_proj: scene.camera.view_proj().to_cols_array_2d(),
        };
        ctx.queue
            .write_buffer(&self.camera_ubo, 0, bytemuck::bytes_of(&camera));
        ctx.queue.write_buffer(
            &self.uniform_ubo,
            0,
            bytemuck::bytes_of(&scene.material.uniforms),
        );

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("shaderbox plane pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..Plane::INDICES.len() as u32, 0, 0..1);
    }
}
