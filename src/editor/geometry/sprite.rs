// ============================================
// Sprite Geometry - Вершины спрайтов
// ============================================
// Fix: один quad, Double: +90°, Quadra: +90°, +45°, -45°,
// Face: billboard в отдельном буфере

use ultraviolet::Vec3;

use crate::editor::portion::{Position, SpriteDatas, SubSelectionKind};
use crate::editor::save::TextureSize;

use super::pass::GeometryPass;
use super::quad::{rotate_quad, texture_coords, MeshData, MODEL_QUAD, VERTICES_QUAD};
use super::vertex::{Vertex, VertexBillboard};

/// Добавить спрайт в статический или billboard буфер
pub fn push_sprite(
    datas: &SpriteDatas,
    pass: &mut GeometryPass,
    texture: TextureSize,
    position: &Position,
    static_mesh: &mut MeshData<Vertex>,
    face_mesh: &mut MeshData<VertexBillboard>,
) {
    let square_size = pass.square_size();
    let rect = &datas.texture_rect;
    let tex = texture_coords(rect, square_size, texture.width, texture.height);

    let offset = pass.next_sprite_offset();
    let pos = Vec3::new(
        (position.x * square_size - (rect.width - 1) * square_size / 2) as f32 + offset,
        position.pixel_y(square_size) as f32,
        (position.z * square_size + datas.width_position * square_size / 100) as f32 + offset,
    );
    let size = Vec3::new(
        (rect.width * square_size) as f32,
        (rect.height * square_size) as f32,
        0.0,
    );
    let center = pos + Vec3::new(size.x / 2.0, size.y / 2.0, 0.0);

    match datas.kind {
        SubSelectionKind::SpritesFix
        | SubSelectionKind::SpritesDouble
        | SubSelectionKind::SpritesQuadra => {
            let mut corners = VERTICES_QUAD.map(|c| {
                Vec3::new(c[0] * size.x, c[1] * size.y, c[2] * size.z) + pos
            });
            if datas.angle != 0 {
                rotate_quad(&mut corners, center, datas.angle as f32);
            }
            static_mesh.push_quad(textured(corners, tex));

            if datas.kind != SubSelectionKind::SpritesFix {
                push_rotated(static_mesh, corners, center, 90.0, tex);

                if datas.kind == SubSelectionKind::SpritesQuadra {
                    push_rotated(static_mesh, corners, center, 45.0, tex);
                    push_rotated(static_mesh, corners, center, -45.0, tex);
                }
            }
        }
        SubSelectionKind::SpritesFace => {
            let center = center.into();
            let size = [size.x, size.y];
            face_mesh.push_quad([
                VertexBillboard::new(center, tex[0], size, MODEL_QUAD[0]),
                VertexBillboard::new(center, tex[1], size, MODEL_QUAD[1]),
                VertexBillboard::new(center, tex[2], size, MODEL_QUAD[2]),
                VertexBillboard::new(center, tex[3], size, MODEL_QUAD[3]),
            ]);
        }
        _ => {}
    }
}

fn push_rotated(
    mesh: &mut MeshData<Vertex>,
    mut corners: [Vec3; 4],
    center: Vec3,
    angle: f32,
    tex: [[f32; 2]; 4],
) {
    rotate_quad(&mut corners, center, angle);
    mesh.push_quad(textured(corners, tex));
}

/// Склеить углы quad с текстурными координатами
pub(super) fn textured(corners: [Vec3; 4], tex: [[f32; 2]; 4]) -> [Vertex; 4] {
    [
        Vertex::new(corners[0].into(), tex[0]),
        Vertex::new(corners[1].into(), tex[1]),
        Vertex::new(corners[2].into(), tex[2]),
        Vertex::new(corners[3].into(), tex[3]),
    ]
}
