use super::helpers;
use scene_core::constants::GRADIENT_FALLBACK;
use scene_core::{MeshData, NodeId, NodeKind, Scene, Vertex};
use web_sys as web;
use wgpu::util::DeviceExt;

pub(crate) const VERTEX_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

pub(crate) fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRS,
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct ObjectUniforms {
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) color: [f32; 4],
}

/// Vertex/index buffers uploaded once from a [`MeshData`].
pub(crate) struct GpuGeometry {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl GpuGeometry {
    pub(crate) fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

struct GpuMesh {
    node: NodeId,
    color: [f32; 4],
    geometry: GpuGeometry,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub(crate) struct ToonResources {
    pipeline: wgpu::RenderPipeline,
    gradient_bgl: wgpu::BindGroupLayout,
    gradient_sampler: wgpu::Sampler,
    gradient_tex: wgpu::Texture,
    gradient_bind_group: wgpu::BindGroup,
    meshes: Vec<GpuMesh>,
}

pub(crate) fn create_toon_resources(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    camera_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    scene: &Scene,
) -> ToonResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("toon_shader"),
        source: wgpu::ShaderSource::Wgsl(scene_core::TOON_WGSL.into()),
    });
    let object_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("toon_object_bgl"),
        entries: &[helpers::uniform_layout_entry(0)],
    });
    let gradient_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("toon_gradient_bgl"),
        entries: &[
            helpers::texture_layout_entry(0),
            helpers::sampler_layout_entry(1),
        ],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("toon_pl"),
        bind_group_layouts: &[camera_bgl, &object_bgl, &gradient_bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_scene_pipeline(
        device,
        "toon_pipeline",
        &pl,
        &shader,
        &[vertex_layout()],
        color_format,
        Some(wgpu::Face::Back),
    );

    // toon bands must stay hard-edged
    let gradient_sampler = helpers::create_sampler(device, "gradient_sampler", wgpu::FilterMode::Nearest);
    let gradient_tex = fallback_gradient(device, queue);
    let gradient_bind_group =
        gradient_bind_group(device, &gradient_bgl, &gradient_tex, &gradient_sampler);

    let mut meshes = Vec::new();
    for (id, node) in scene.iter() {
        let NodeKind::Mesh { shape, color } = &node.kind else {
            continue;
        };
        let Some(data) = shape.mesh() else {
            continue;
        };
        let geometry = GpuGeometry::upload(device, node.name, &data);
        let uniform_buffer = helpers::uniform_buffer::<ObjectUniforms>(device, "toon_object_uniforms");
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("toon_object_bg"),
            layout: &object_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        log::info!(
            "[gpu] mesh {} ({:?}) triangles={}",
            node.name,
            shape,
            data.triangle_count()
        );
        meshes.push(GpuMesh {
            node: id,
            color: color.extend(1.0).to_array(),
            geometry,
            uniform_buffer,
            bind_group,
        });
    }

    ToonResources {
        pipeline,
        gradient_bgl,
        gradient_sampler,
        gradient_tex,
        gradient_bind_group,
        meshes,
    }
}

fn fallback_gradient(device: &wgpu::Device, queue: &wgpu::Queue) -> wgpu::Texture {
    let width = GRADIENT_FALLBACK.len() as u32;
    let (tex, _) = helpers::create_external_copy_texture(
        device,
        "gradient_tex",
        width,
        1,
        wgpu::TextureFormat::Rgba8Unorm,
    );
    let texels: Vec<u8> = GRADIENT_FALLBACK
        .iter()
        .flat_map(|&v| [v, v, v, 0xff])
        .collect();
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &texels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(width * 4),
            rows_per_image: Some(1),
        },
        wgpu::Extent3d {
            width,
            height: 1,
            depth_or_array_layers: 1,
        },
    );
    tex
}

fn gradient_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    tex: &wgpu::Texture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("toon_gradient_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

impl ToonResources {
    /// Replace the fallback ramp with a loaded gradient image.
    pub(crate) fn set_gradient_image(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &web::HtmlImageElement,
    ) {
        let width = image.natural_width();
        let height = image.natural_height();
        if width == 0 || height == 0 {
            log::warn!("[gpu] gradient image has no size; keeping fallback ramp");
            return;
        }
        let (tex, _) = helpers::create_external_copy_texture(
            device,
            "gradient_tex",
            width,
            height,
            wgpu::TextureFormat::Rgba8Unorm,
        );
        queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::HTMLImageElement(image.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &tex,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.gradient_bind_group =
            gradient_bind_group(device, &self.gradient_bgl, &tex, &self.gradient_sampler);
        self.gradient_tex = tex;
        log::info!("[gpu] gradient map {}x{} loaded", width, height);
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, scene: &Scene) {
        for mesh in &self.meshes {
            let model = match scene.world_matrix(mesh.node) {
                Ok(m) => m,
                Err(e) => {
                    log::error!("[gpu] {}", e);
                    continue;
                }
            };
            let u = ObjectUniforms {
                model: model.to_cols_array_2d(),
                color: mesh.color,
            };
            queue.write_buffer(&mesh.uniform_buffer, 0, bytemuck::bytes_of(&u));
        }
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(2, &self.gradient_bind_group, &[]);
        for mesh in &self.meshes {
            rpass.set_bind_group(1, &mesh.bind_group, &[]);
            mesh.geometry.draw(rpass);
        }
    }
}
