use super::helpers;
use scene_core::{NodeKind, Scene};
use wgpu::util::DeviceExt;

const INSTANCE_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CloudUniforms {
    pub(crate) color: [f32; 4],
}

/// Instanced billboards, one quad (6 vertices) per particle.
pub(crate) struct ParticleResources {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    bind_group: wgpu::BindGroup,
}

pub(crate) fn create_particle_resources(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    camera_bgl: &wgpu::BindGroupLayout,
    color_format: wgpu::TextureFormat,
    scene: &Scene,
) -> ParticleResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("particles_shader"),
        source: wgpu::ShaderSource::Wgsl(scene_core::PARTICLES_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("particles_bgl"),
        entries: &[helpers::uniform_layout_entry(0)],
    });
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("particles_pl"),
        bind_group_layouts: &[camera_bgl, &bgl],
        push_constant_ranges: &[],
    });
    let pipeline = helpers::make_scene_pipeline(
        device,
        "particles_pipeline",
        &pl,
        &shader,
        &[wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<[f32; 3]>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &INSTANCE_ATTRS,
        }],
        color_format,
        None,
    );

    // every particle node in the scene shares one instance buffer
    let mut centers: Vec<[f32; 3]> = Vec::new();
    let mut color = [1.0, 1.0, 1.0, 1.0];
    for (_, node) in scene.iter() {
        if let NodeKind::Particles {
            positions,
            color: c,
            ..
        } = &node.kind
        {
            centers.extend(positions.iter().map(|p| p.to_array()));
            color = c.extend(1.0).to_array();
        }
    }
    // wgpu rejects zero-sized vertex buffers
    let contents: &[u8] = if centers.is_empty() {
        &[0u8; 12]
    } else {
        bytemuck::cast_slice(&centers)
    };
    let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("particles_instances"),
        contents,
        usage: wgpu::BufferUsages::VERTEX,
    });

    let uniform_buffer = helpers::uniform_buffer::<CloudUniforms>(device, "particles_uniforms");
    queue.write_buffer(&uniform_buffer, 0, bytemuck::bytes_of(&CloudUniforms { color }));
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("particles_bg"),
        layout: &bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    log::info!("[gpu] particles={}", centers.len());
    ParticleResources {
        pipeline,
        instance_buffer,
        instance_count: centers.len() as u32,
        bind_group,
    }
}

impl ParticleResources {
    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        if self.instance_count == 0 {
            return;
        }
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(1, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.instance_buffer.slice(..));
        rpass.draw(0..6, 0..self.instance_count);
    }
}
