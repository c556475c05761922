use super::helpers;
use super::meshes::{vertex_layout, GpuGeometry};
use scene_core::geometry::plane;
use scene_core::{NodeId, NodeKind, Scene, TextureFit, VideoSize};
use web_sys as web;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ScreenUniforms {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) tint: [f32; 4],
    pub(crate) uv_repeat: [f32; 2],
    pub(crate) uv_center: [f32; 2],
}

// The canvas shows decoded video in sRGB; sampling through an sRGB view
// linearises it before tinting.
const VIDEO_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

pub(crate) struct VideoResources {
    pipeline: wgpu::RenderPipeline,
    bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    uniform_buffer: wgpu::Buffer,
    quad: GpuGeometry,
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    node: Option<NodeId>,
    tint: [f32; 4],
    fit: TextureFit,
    size: Option<VideoSize>,
}

pub(crate) fn create_video_resources(
    device: &wgpu::Device,
    camera_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    scene: &Scene,
) -> VideoResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("video_shader"),
        source: wgpu::ShaderSource::Wgsl(scene_core::VIDEO_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("video_bgl"),
        entries: &[
            helpers::uniform_layout_entry(0),
            helpers::texture_layout_entry(1),
            helpers::sampler_layout_entry(2),
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("video_pl"),
        bind_group_layouts: &[camera_bgl, &bgl],
        push_constant_ranges: &[],
    });
    // the screen swings past edge-on while scrolling; its back stays hidden
    let pipeline = helpers::make_scene_pipeline(
        device,
        "video_pipeline",
        &pl,
        &shader,
        &[vertex_layout()],
        color_format,
        Some(wgpu::Face::Back),
    );
    let sampler = helpers::create_sampler(device, "video_sampler", wgpu::FilterMode::Linear);
    let uniform_buffer = helpers::uniform_buffer::<ScreenUniforms>(device, "video_uniforms");
    let quad = GpuGeometry::upload(device, "video_quad", &plane(1.0, 1.0));

    let (node, tint) = scene
        .iter()
        .find_map(|(id, n)| match &n.kind {
            NodeKind::VideoPlane { tint } => Some((id, tint.extend(1.0).to_array())),
            _ => None,
        })
        .map_or((None, [1.0; 4]), |(id, t)| (Some(id), t));

    // black placeholder until the video reports its size
    let (texture, _) = helpers::create_external_copy_texture(device, "video_tex", 1, 1, VIDEO_FORMAT);
    let bind_group = video_bind_group(device, &bgl, &uniform_buffer, &texture, &sampler);

    VideoResources {
        pipeline,
        bgl,
        sampler,
        uniform_buffer,
        quad,
        texture,
        bind_group,
        node,
        tint,
        fit: TextureFit::default(),
        size: None,
    }
}

fn video_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    uniform_buffer: &wgpu::Buffer,
    texture: &wgpu::Texture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("video_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

impl VideoResources {
    /// Take a new texture transform; reallocate the texture when the native
    /// size changed.
    pub(crate) fn set_fit(&mut self, device: &wgpu::Device, fit: TextureFit, size: Option<VideoSize>) {
        self.fit = fit;
        if size == self.size {
            return;
        }
        self.size = size;
        if let Some(s) = size {
            let (texture, _) = helpers::create_external_copy_texture(
                device,
                "video_tex",
                s.width(),
                s.height(),
                VIDEO_FORMAT,
            );
            self.bind_group =
                video_bind_group(device, &self.bgl, &self.uniform_buffer, &texture, &self.sampler);
            self.texture = texture;
            log::info!("[gpu] video texture {}x{}", s.width(), s.height());
        }
    }

    /// Copy the element's current frame once it has one.
    pub(crate) fn upload_frame(&self, queue: &wgpu::Queue, video: &web::HtmlVideoElement) {
        let Some(size) = self.size else {
            return;
        };
        if video.ready_state() < crate::constants::VIDEO_HAVE_CURRENT_DATA {
            return;
        }
        // a new source with other dimensions arrives as a fresh loadeddata event
        if video.video_width() != size.width() || video.video_height() != size.height() {
            return;
        }
        queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::HTMLVideoElement(video.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            wgpu::Extent3d {
                width: size.width(),
                height: size.height(),
                depth_or_array_layers: 1,
            },
        );
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, scene: &Scene) {
        let Some(node) = self.node else {
            return;
        };
        let model = match scene.world_matrix(node) {
            Ok(m) => m,
            Err(e) => {
                log::error!("[gpu] {}", e);
                return;
            }
        };
        let u = ScreenUniforms {
            model: model.to_cols_array_2d(),
            tint: self.tint,
            uv_repeat: self.fit.repeat.to_array(),
            uv_center: self.fit.center.to_array(),
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.node.is_none() {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(1, &self.bind_group, &[]);
        self.quad.draw(rpass);
    }
}
