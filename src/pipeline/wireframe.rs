use crate::{loader::WireMesh, model, ArtifactUniform, RenderArtifact};
use wgpu::util::DeviceExt;

// Semi-transparent blue, one color for every edge.
const COLOR: [f32; 4] = [0.25, 0.45, 1.0, 0.5];

pub struct Wireframe {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    num_indices: u32,
}

impl Wireframe {
    pub fn new(
        device: &wgpu::Device,
        mesh: &WireMesh,
        artifact_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Wireframe {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wireframe::vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("wireframe::indices"),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        let uniform_buffer =
            ArtifactUniform::new(COLOR).into_buffer(device, "wireframe::uniform_buffer");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: artifact_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("wireframe::bind_group"),
        });

        Wireframe {
            vertices,
            indices,
            bind_group,
            num_indices: mesh.indices().len() as u32,
        }
    }
}

impl RenderArtifact for Wireframe {
    fn create_pipeline_layout(
        device: &wgpu::Device,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        artifact_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::PipelineLayout {
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("wireframe::pipeline_layout"),
            bind_group_layouts: &[camera_bind_group_layout, artifact_bind_group_layout],
            push_constant_ranges: &[],
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("wireframe::shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader/plain_geometry.wgsl").into()),
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("wireframe::render_pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                compilation_options: Default::default(),
                entry_point: "vs_main",
                buffers: &[model::Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                compilation_options: Default::default(),
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    // The edge color carries alpha.
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        })
    }

    fn render<'rpass>(&'rpass self, render_pass: &mut wgpu::RenderPass<'rpass>) {
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertices.slice(..));
        render_pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.num_indices, 0, 0..1);
    }
}
