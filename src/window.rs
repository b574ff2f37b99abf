use wgpu::util::DeviceExt;
use winit::{
    application::ApplicationHandler,
    dpi,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    axes::AxisGizmo, loader::WireMesh, pipeline, Camera, CameraController, CameraUniform,
    Projection, RenderArtifact,
};

pub struct WindowState<'win> {
    surface: wgpu::Surface<'win>,
    window: &'win Window,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_capabilities: wgpu::SurfaceCapabilities,
    camera: Camera,
    projection: Projection,
    controller: CameraController,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    wireframe: pipeline::Wireframe,
    wireframe_pipeline: wgpu::RenderPipeline,
    axes: pipeline::Axes,
    axes_pipeline: wgpu::RenderPipeline,
}

impl<'win> WindowState<'win> {
    pub async fn new(window: &'win Window, mesh: &WireMesh) -> WindowState<'win> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window).unwrap();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .unwrap();

        let surface_capabilities = surface.get_capabilities(&adapter);

        let (device, queue) = adapter
            .request_device(&Default::default(), None)
            .await
            .unwrap();

        let mut camera = Camera::new();
        let extent = match mesh.bounds() {
            Some(bounds) => {
                camera.fit(bounds);
                let (min, max) = bounds;
                min.iter()
                    .chain(max.iter())
                    .fold(1e-3_f32, |m, &c| m.max(c.abs()))
            }
            None => 1.0,
        };

        let projection = Projection::new(size.width, size.height);
        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera, &projection);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("camera_bind_group_layout"),
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let artifact_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("artifact_bind_group_layout"),
            });

        let format = surface_capabilities.formats[0];

        let wireframe = pipeline::Wireframe::new(&device, mesh, &artifact_bind_group_layout);
        let layout = pipeline::Wireframe::create_pipeline_layout(
            &device,
            &camera_bind_group_layout,
            &artifact_bind_group_layout,
        );
        let wireframe_pipeline = pipeline::Wireframe::create_pipeline(&device, &layout, format);

        let gizmo = AxisGizmo::new(extent);
        let axes = pipeline::Axes::new(&device, &gizmo, &artifact_bind_group_layout);
        let layout = pipeline::Axes::create_pipeline_layout(
            &device,
            &camera_bind_group_layout,
            &artifact_bind_group_layout,
        );
        let axes_pipeline = pipeline::Axes::create_pipeline(&device, &layout, format);

        WindowState {
            surface,
            window,
            device,
            queue,
            surface_capabilities,
            camera,
            projection,
            controller: CameraController::new(),
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            wireframe,
            wireframe_pipeline,
            axes,
            axes_pipeline,
        }
    }

    fn resize(&mut self, size: dpi::PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }

        let format = self.surface_capabilities.formats[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![format],
            desired_maximum_frame_latency: 2,
        };
        self.surface.configure(&self.device, &config);

        self.projection.resize(size.width, size.height);
        self.update_camera();
    }

    fn update_camera(&mut self) {
        self.camera_uniform
            .update_view_proj(&self.camera, &self.projection);
        self.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
    }

    fn redraw(&mut self) {
        let output = match self.surface.get_current_texture() {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("surface {:?}", e);
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.1,
                            b: 0.12,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

            render_pass.set_pipeline(&self.wireframe_pipeline);
            self.wireframe.render(&mut render_pass);

            render_pass.set_pipeline(&self.axes_pipeline);
            self.axes.render(&mut render_pass);
        }

        // Let 'er rip.  Render the frame.
        self.queue.submit([encoder.finish()]);
        output.present();
    }
}

impl<'win> ApplicationHandler for WindowState<'win> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.controller.window_event(&mut self.camera, &event) {
            self.update_camera();
            self.window.request_redraw();
            return;
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.resize(size);
                self.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }
}

// Blocks until the window closes; the only blocking call in the
// program.
pub async fn run(mesh: WireMesh, title: &str, event_loop: EventLoop<()>) {
    // WindowState borrows the window for its surface, so the window
    // must exist before run_app; winit keeps this entry point around
    // as deprecated.
    #[allow(deprecated)]
    let window = event_loop
        .create_window(WindowAttributes::default().with_title(title))
        .unwrap();

    let mut app = WindowState::new(&window, &mesh).await;
    let _ = event_loop.run_app(&mut app);
}
