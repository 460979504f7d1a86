use wgpu::util::DeviceExt;

use super::Vertex;

/// Immutable CPU-side geometry.
///
/// Non-indexed, position-only; drawn as a triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    label: String,
    vertices: Box<[Vertex]>,
}

impl Mesh {
    pub fn new(label: impl Into<String>, vertices: &[Vertex]) -> Self {
        Self {
            label: label.into(),
            vertices: vertices.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }
}

/// GPU-resident copy of a `Mesh`.
///
/// The buffer is created with its contents and `VERTEX` usage only; it cannot be
/// written to after upload.
pub struct GpuMesh {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl GpuMesh {
    pub const USAGE: wgpu::BufferUsages = wgpu::BufferUsages::VERTEX;

    pub fn upload(device: &wgpu::Device, mesh: &Mesh) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(mesh.label()),
            contents: bytemuck::cast_slice(mesh.vertices()),
            usage: Self::USAGE,
        });

        log::debug!("uploaded mesh `{}` ({} vertices)", mesh.label(), mesh.vertex_count());

        Self {
            buffer,
            vertex_count: mesh.vertex_count(),
        }
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}
