use crate::constants::CLEAR_ALPHA;
use glam::Vec3;
use scene_core::{NodeKind, Stage, TextureFit, VideoSize};
use web_sys as web;

mod helpers;
mod meshes;
mod particles;
mod targets;
mod video;
use targets::DepthTarget;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CameraUniforms {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    light_color: [f32; 4],
    params: [f32; 4], // x: aspect, y: particle size
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    // format the pipelines render into (sRGB view of the surface when needed)
    view_format: wgpu::TextureFormat,
    depth: DepthTarget,

    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    toon: meshes::ToonResources,
    particles: particles::ParticleResources,
    video: video::VideoResources,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, stage: &Stage) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU/WebGL adapter"))?;
        log::info!("[gpu] adapter: {:?}", adapter.get_info().backend);
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // WebGL2 cannot meet the default limits
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let view_format = format.add_srgb_suffix();
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: if view_format != format {
                vec![view_format]
            } else {
                vec![]
            },
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::info!(
            "[gpu] surface {}x{} format={:?} view={:?} alpha={:?}",
            width,
            height,
            format,
            view_format,
            alpha_mode
        );

        let depth = DepthTarget::new(&device, width, height);

        let camera_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("camera_bgl"),
            entries: &[helpers::uniform_layout_entry(0)],
        });
        let camera_buffer = helpers::uniform_buffer::<CameraUniforms>(&device, "camera_uniforms");
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("camera_bg"),
            layout: &camera_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let toon = meshes::create_toon_resources(&device, &queue, &camera_bgl, view_format, &stage.scene);
        let particles =
            particles::create_particle_resources(&device, &queue, &camera_bgl, view_format, &stage.scene);
        let mut video = video::create_video_resources(&device, &camera_bgl, view_format, &stage.scene);
        video.set_fit(&device, stage.video_texture.fit, stage.video_texture.size);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            view_format,
            depth,
            camera_buffer,
            camera_bind_group,
            toon,
            particles,
            video,
            width,
            height,
            clear_color: wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.0,
                a: CLEAR_ALPHA,
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth.recreate(&self.device, width, height);
            log::debug!("[gpu] resized to {:?}", self.depth.size());
        }
    }

    pub fn set_video_fit(&mut self, fit: TextureFit, size: Option<VideoSize>) {
        self.video.set_fit(&self.device, fit, size);
    }

    pub fn upload_video_frame(&self, video: &web::HtmlVideoElement) {
        self.video.upload_frame(&self.queue, video);
    }

    pub fn set_gradient_image(&mut self, image: &web::HtmlImageElement) {
        self.toon.set_gradient_image(&self.device, &self.queue, image);
    }

    fn write_camera(&self, stage: &Stage) {
        let scene = &stage.scene;
        let handles = &stage.handles;
        let view_proj = match scene.view_projection(handles.camera) {
            Ok(m) => m,
            Err(e) => {
                log::error!("[gpu] {}", e);
                return;
            }
        };
        let (light_dir, light_color) = match scene.get(handles.light).map(|n| (&n.kind, n)) {
            Ok((
                NodeKind::DirectionalLight {
                    color,
                    intensity,
                    target,
                },
                node,
            )) => (
                (node.transform.position - *target).normalize_or_zero(),
                *color * *intensity,
            ),
            _ => (Vec3::Y, Vec3::ONE),
        };
        let particle_size = match scene.get(handles.particles).map(|n| &n.kind) {
            Ok(NodeKind::Particles { size, .. }) => *size,
            _ => 0.0,
        };
        let aspect = stage
            .layout()
            .map(|l| l.camera_aspect)
            .unwrap_or(self.width as f32 / self.height.max(1) as f32);
        let u = CameraUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            light_dir: light_dir.extend(0.0).to_array(),
            light_color: light_color.extend(1.0).to_array(),
            params: [aspect, particle_size, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&u));
    }

    pub fn render(&mut self, stage: &Stage) -> Result<(), wgpu::SurfaceError> {
        self.write_camera(stage);
        self.toon.write_uniforms(&self.queue, &stage.scene);
        self.video.write_uniforms(&self.queue, &stage.scene);

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.view_format),
            ..Default::default()
        });
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.camera_bind_group, &[]);
            self.toon.draw(&mut rpass);
            self.particles.draw(&mut rpass);
            self.video.draw(&mut rpass);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
