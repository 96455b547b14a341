// ============================================
// Wall Geometry - Вершины стен
// ============================================

use ultraviolet::Vec3;

use crate::editor::portion::{GridPosition, TextureRect};
use crate::editor::save::TextureSize;

use super::quad::{rotate_quad, texture_coords, MeshData, VERTICES_QUAD};
use super::sprite::textured;
use super::vertex::Vertex;

/// Стена на отрезке сетки: один quad размером в клетку.
/// Вертикальный отрезок поворачивается на 90° вокруг нижнего левого угла.
pub fn push_wall(
    square_size: i32,
    texture: TextureSize,
    position: &GridPosition,
    mesh: &mut MeshData<Vertex>,
) {
    let tex = texture_coords(&TextureRect::new(0, 0, 1, 1), square_size, texture.width, texture.height);

    let sq = square_size as f32;
    let pos = Vec3::new(
        (position.x1 * square_size) as f32,
        (position.y * square_size) as f32,
        (position.z1 * square_size) as f32,
    );
    let mut corners = VERTICES_QUAD.map(|c| Vec3::new(c[0] * sq, c[1] * sq, 0.0) + pos);

    if !position.is_horizontal() {
        let pivot = corners[3];
        rotate_quad(&mut corners, pivot, 90.0);
    }
    mesh.push_quad(textured(corners, tex));
}
