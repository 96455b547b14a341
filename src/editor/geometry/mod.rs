// ============================================
// Geometry Module - Генерация вершин
// ============================================
// Спрайты (face/fix/double/quadra), стены, пол и маркеры объектов

mod vertex;
mod quad;
mod pass;
mod sprite;
mod wall;
mod floor;

pub use vertex::{Vertex, VertexBillboard};
pub use quad::{
    MeshData, VERTICES_QUAD, MODEL_QUAD, INDEXES_QUAD, NB_VERTICES_QUAD, NB_INDEXES_QUAD,
    texture_coords, full_texture_coords, rotate_vertex, rotate_quad,
};
pub use pass::GeometryPass;
pub use sprite::push_sprite;
pub use wall::push_wall;
pub use floor::{push_floor, push_object_square};
