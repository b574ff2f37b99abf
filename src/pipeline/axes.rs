use crate::{axes::AxisGizmo, model, ArtifactUniform, RenderArtifact};
use wgpu::util::DeviceExt;

const COLOR: [f32; 4] = [0.55, 0.55, 0.55, 1.0];

pub struct Axes {
    vertices: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    num_vertices: u32,
}

impl Axes {
    pub fn new(
        device: &wgpu::Device,
        gizmo: &AxisGizmo,
        artifact_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Axes {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("axes::vertices"),
            contents: bytemuck::cast_slice(&gizmo.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let uniform_buffer = ArtifactUniform::new(COLOR).into_buffer(device, "axes::uniform_buffer");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: artifact_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("axes::bind_group"),
        });

        Axes {
            vertices,
            bind_group,
            num_vertices: gizmo.vertices.len() as u32,
        }
    }
}

impl RenderArtifact for Axes {
    fn create_pipeline_layout(
        device: &wgpu::Device,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        artifact_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::PipelineLayout {
        device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("axes::pipeline_layout"),
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
            label: Some("axes::shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader/plain_geometry.wgsl").into()),
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("axes::render_pipeline"),
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
        render_pass.draw(0..self.num_vertices, 0..1);
    }
}
