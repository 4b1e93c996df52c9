use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::mesh::{StlMesh, ViewExtent};

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
}

impl LineVertex {
    fn new(p: Vec3) -> Self {
        Self {
            position: p.to_array(),
        }
    }
}

/// Unindexed triangle list, each vertex carrying its facet normal so faces
/// shade flat.
pub fn fill_vertices(mesh: &StlMesh) -> Vec<MeshVertex> {
    mesh.triangles
        .iter()
        .flat_map(|tri| {
            let normal = tri.face_normal().to_array();
            tri.vertices.map(|v| MeshVertex {
                position: v.to_array(),
                normal,
            })
        })
        .collect()
}

/// Line list with the three edges of every triangle.
pub fn edge_vertices(mesh: &StlMesh) -> Vec<LineVertex> {
    mesh.triangles
        .iter()
        .flat_map(|tri| {
            let [a, b, c] = tri.vertices;
            [a, b, b, c, c, a].map(LineVertex::new)
        })
        .collect()
}

/// Line list outlining the extent cube.
pub fn extent_box_vertices(extent: &ViewExtent) -> Vec<LineVertex> {
    let (lo, hi) = extent.corners();
    let corner = |i: usize| {
        Vec3::new(
            if i & 1 == 0 { lo.x } else { hi.x },
            if i & 2 == 0 { lo.y } else { hi.y },
            if i & 4 == 0 { lo.z } else { hi.z },
        )
    };

    let mut vertices = Vec::with_capacity(24);
    for i in 0..8 {
        for bit in [1, 2, 4] {
            if i & bit == 0 {
                vertices.push(LineVertex::new(corner(i)));
                vertices.push(LineVertex::new(corner(i | bit)));
            }
        }
    }
    vertices
}

pub struct MeshBuffers {
    pub fill_buffer: wgpu::Buffer,
    pub fill_vertex_count: u32,

    pub edge_buffer: wgpu::Buffer,
    pub edge_vertex_count: u32,

    pub box_buffer: wgpu::Buffer,
    pub box_vertex_count: u32,
}

impl MeshBuffers {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        mesh: &StlMesh,
        extent: &ViewExtent,
    ) -> Self {
        let fill = fill_vertices(mesh);
        let edges = edge_vertices(mesh);
        let outline = extent_box_vertices(extent);

        let fill_buffer = upload(device, queue, "Mesh Fill Buffer", bytemuck::cast_slice(&fill));
        let edge_buffer = upload(device, queue, "Mesh Edge Buffer", bytemuck::cast_slice(&edges));
        let box_buffer = upload(device, queue, "Extent Box Buffer", bytemuck::cast_slice(&outline));

        log::debug!(
            "uploaded {} fill, {} edge and {} box vertices",
            fill.len(),
            edges.len(),
            outline.len()
        );

        Self {
            fill_buffer,
            fill_vertex_count: fill.len() as u32,
            edge_buffer,
            edge_vertex_count: edges.len() as u32,
            box_buffer,
            box_vertex_count: outline.len() as u32,
        }
    }
}

fn upload(device: &wgpu::Device, queue: &wgpu::Queue, label: &str, bytes: &[u8]) -> wgpu::Buffer {
    let size = (bytes.len() as u64).max(wgpu::COPY_BUFFER_ALIGNMENT);
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size.next_multiple_of(wgpu::COPY_BUFFER_ALIGNMENT),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    if !bytes.is_empty() {
        queue.write_buffer(&buffer, 0, bytes);
    }
    buffer
}

pub fn mesh_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    }
}

pub fn line_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[wgpu::VertexAttribute {
            offset: 0,
            shader_location: 0,
            format: wgpu::VertexFormat::Float32x3,
        }],
    }
}
