// ============================================
// Vertex - Структуры вершин
// ============================================

/// Вершина статической геометрии (пол, спрайты, стены)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Default)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex: [f32; 2],
}

impl Vertex {
    pub const ATTRIBS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x2,
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }

    #[inline]
    pub fn new(position: [f32; 3], tex: [f32; 2]) -> Self {
        Self { position, tex }
    }
}

/// Вершина billboard-спрайта: шейдер сам разворачивает quad к камере
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable, Default)]
pub struct VertexBillboard {
    /// Центр спрайта в мире
    pub position: [f32; 3],
    pub tex: [f32; 2],
    /// Ширина и высота спрайта
    pub size: [f32; 2],
    /// Угол quad в пространстве модели (-0.5..0.5)
    pub model: [f32; 2],
}

impl VertexBillboard {
    /// Смещения 0, 12, 20, 28
    pub const ATTRIBS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
    ];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<VertexBillboard>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }

    #[inline]
    pub fn new(center: [f32; 3], tex: [f32; 2], size: [f32; 2], model: [f32; 2]) -> Self {
        Self { position: center, tex, size, model }
    }
}
