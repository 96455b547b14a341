// ============================================
// Floor Geometry - Пол и маркеры объектов
// ============================================

use crate::editor::portion::{FloorDatas, Position};
use crate::editor::save::TextureSize;

use super::quad::{full_texture_coords, texture_coords, MeshData};
use super::vertex::Vertex;

/// Горизонтальный quad клетки пола из тайлсета
pub fn push_floor(
    datas: &FloorDatas,
    square_size: i32,
    texture: TextureSize,
    position: &Position,
    mesh: &mut MeshData<Vertex>,
) {
    let tex = texture_coords(&datas.texture_rect, square_size, texture.width, texture.height);
    mesh.push_quad(horizontal_square(square_size, position, tex));
}

/// Маркер объекта: квадрат на клетке со всей текстурой маркера
pub fn push_object_square(
    square_size: i32,
    texture: TextureSize,
    position: &Position,
    mesh: &mut MeshData<Vertex>,
) {
    let tex = full_texture_coords(texture.width, texture.height);
    mesh.push_quad(horizontal_square(square_size, position, tex));
}

fn horizontal_square(square_size: i32, position: &Position, tex: [[f32; 2]; 4]) -> [Vertex; 4] {
    let sq = square_size as f32;
    let x = (position.x * square_size) as f32;
    let y = position.pixel_y(square_size) as f32;
    let z = (position.z * square_size) as f32;

    [
        Vertex::new([x, y, z], tex[0]),
        Vertex::new([x + sq, y, z], tex[1]),
        Vertex::new([x + sq, y, z + sq], tex[2]),
        Vertex::new([x, y, z + sq], tex[3]),
    ]
}
