//! Parametric mesh generators.
//!
//! All generators emit counter-clockwise triangles with outward normals.

use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    #[inline]
    fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// What a section node looks like.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SectionShape {
    /// Rotates like the others but draws nothing.
    Empty,
    Cone,
    TorusKnot,
    Torus,
}

impl SectionShape {
    pub fn mesh(self) -> Option<MeshData> {
        match self {
            SectionShape::Empty => None,
            SectionShape::Cone => Some(cone(1.0, 2.0, 32)),
            SectionShape::TorusKnot => Some(torus_knot(0.8, 0.35, 100, 16, 2, 3)),
            SectionShape::Torus => Some(torus(1.0, 0.4, 16, 60)),
        }
    }
}

/// Unit plane in XY facing +Z, centred on the origin.
pub fn plane(width: f32, height: f32) -> MeshData {
    let hw = width * 0.5;
    let hh = height * 0.5;
    let n = Vec3::Z;
    let vertices = vec![
        Vertex::new(Vec3::new(-hw, hh, 0.0), n, Vec2::new(0.0, 0.0)),
        Vertex::new(Vec3::new(hw, hh, 0.0), n, Vec2::new(1.0, 0.0)),
        Vertex::new(Vec3::new(-hw, -hh, 0.0), n, Vec2::new(0.0, 1.0)),
        Vertex::new(Vec3::new(hw, -hh, 0.0), n, Vec2::new(1.0, 1.0)),
    ];
    MeshData {
        vertices,
        indices: vec![0, 2, 1, 2, 3, 1],
    }
}

/// Cone with its apex on +Y, base centred at `-height / 2`, base capped.
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    let half = height * 0.5;
    let slope = radius / height;

    // torso: row 0 is the apex ring, row 1 the base ring
    for row in 0..=1u32 {
        let v = row as f32;
        let r = v * radius;
        for x in 0..=radial_segments {
            let u = x as f32 / radial_segments as f32;
            let theta = u * TAU;
            let (s, c) = theta.sin_cos();
            let position = Vec3::new(r * s, -v * height + half, r * c);
            let normal = Vec3::new(s, slope, c).normalize();
            mesh.vertices
                .push(Vertex::new(position, normal, Vec2::new(u, 1.0 - v)));
        }
    }
    let stride = radial_segments + 1;
    for x in 0..radial_segments {
        let a = x;
        let b = stride + x;
        let c = stride + x + 1;
        let d = x + 1;
        // apex row collapses, so only one triangle per segment has area
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    // bottom cap
    let center_start = mesh.vertices.len() as u32;
    for x in 0..radial_segments {
        let u = (x as f32 + 0.5) / radial_segments as f32;
        mesh.vertices.push(Vertex::new(
            Vec3::new(0.0, -half, 0.0),
            Vec3::NEG_Y,
            Vec2::new(u, 0.5),
        ));
    }
    let ring_start = mesh.vertices.len() as u32;
    for x in 0..=radial_segments {
        let theta = x as f32 / radial_segments as f32 * TAU;
        let (s, c) = theta.sin_cos();
        mesh.vertices.push(Vertex::new(
            Vec3::new(radius * s, -half, radius * c),
            Vec3::NEG_Y,
            Vec2::new(c * 0.5 + 0.5, s * 0.5 + 0.5),
        ));
    }
    for x in 0..radial_segments {
        let center = center_start + x;
        let i = ring_start + x;
        mesh.indices.extend_from_slice(&[i + 1, i, center]);
    }
    mesh
}

/// Torus around the Z axis.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let mut mesh = MeshData::default();
    for j in 0..=radial_segments {
        let v = j as f32 / radial_segments as f32 * TAU;
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let ring = radius + tube * v.cos();
            let position = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.vertices.push(Vertex::new(
                position,
                (position - center).normalize(),
                Vec2::new(
                    i as f32 / tubular_segments as f32,
                    j as f32 / radial_segments as f32,
                ),
            ));
        }
    }
    let stride = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

/// (p, q) torus knot swept with a circular tube.
pub fn torus_knot(
    radius: f32,
    tube: f32,
    tubular_segments: u32,
    radial_segments: u32,
    p: u32,
    q: u32,
) -> MeshData {
    let p = p as f32;
    let q = q as f32;
    let curve = |u: f32| -> Vec3 {
        let qu_over_p = q / p * u;
        let cs = qu_over_p.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * u.cos(),
            radius * (2.0 + cs) * 0.5 * u.sin(),
            radius * qu_over_p.sin() * 0.5,
        )
    };

    let mut mesh = MeshData::default();
    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p * PI * 2.0;
        let p1 = curve(u);
        let p2 = curve(u + 0.01);
        // Frenet-like frame along the curve
        let t = p2 - p1;
        let n = p2 + p1;
        let b = t.cross(n).normalize();
        let n = b.cross(t).normalize();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let position = p1 + n * cx + b * cy;
            mesh.vertices.push(Vertex::new(
                position,
                (position - p1).normalize(),
                Vec2::new(
                    i as f32 / tubular_segments as f32,
                    j as f32 / radial_segments as f32,
                ),
            ));
        }
    }
    let stride = radial_segments + 1;
    for j in 1..=tubular_segments {
        for i in 1..=radial_segments {
            let a = stride * (j - 1) + (i - 1);
            let b = stride * j + (i - 1);
            let c = stride * j + i;
            let d = stride * (j - 1) + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}
