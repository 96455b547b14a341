// ============================================
// Portion GPU Buffers - Буферы порции на GPU
// ============================================
// Буферы создаются целиком при каждой перестройке и освобождаются
// вместе со структурой (wgpu::Buffer освобождается в Drop)

use std::collections::BTreeMap;

use wgpu::util::DeviceExt;

use crate::editor::geometry::{MeshData, Vertex, VertexBillboard};

/// Пара vertex/index буферов одного меша
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    /// Пустой меш на GPU не загружается
    pub fn new<V: bytemuck::Pod>(device: &wgpu::Device, label: &str, mesh: &MeshData<V>) -> Option<Self> {
        if mesh.vertices.is_empty() || mesh.indices.is_empty() {
            return None;
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertices", label)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Indices", label)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Some(Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        })
    }
}

/// Все буферы одной порции
#[derive(Default)]
pub struct PortionBuffers {
    pub floors: Option<GpuMesh>,
    pub sprites_static: Option<GpuMesh>,
    pub sprites_face: Option<GpuMesh>,
    pub walls: BTreeMap<i32, GpuMesh>,
    pub objects: Option<GpuMesh>,
}

impl PortionBuffers {
    pub fn upload(
        device: &wgpu::Device,
        label: &str,
        floors: &MeshData<Vertex>,
        sprites_static: &MeshData<Vertex>,
        sprites_face: &MeshData<VertexBillboard>,
        walls: &BTreeMap<i32, MeshData<Vertex>>,
        objects: &MeshData<Vertex>,
    ) -> Self {
        Self {
            floors: GpuMesh::new(device, &format!("{} Floors", label), floors),
            sprites_static: GpuMesh::new(device, &format!("{} Sprites", label), sprites_static),
            sprites_face: GpuMesh::new(device, &format!("{} Face Sprites", label), sprites_face),
            walls: walls
                .iter()
                .filter_map(|(id, mesh)| {
                    GpuMesh::new(device, &format!("{} Wall {}", label, id), mesh).map(|m| (*id, m))
                })
                .collect(),
            objects: GpuMesh::new(device, &format!("{} Objects", label), objects),
        }
    }

    /// Пересоздать только буфер объектов
    pub fn upload_objects(&mut self, device: &wgpu::Device, label: &str, objects: &MeshData<Vertex>) {
        self.objects = GpuMesh::new(device, &format!("{} Objects", label), objects);
    }
}
