// ============================================
// Quad - Общие примитивы для quad-геометрии
// ============================================

use ultraviolet::{Mat3, Vec3};

use crate::editor::portion::TextureRect;

/// Углы единичного quad: A (верх-лево), B, C, D (низ-лево)
pub const VERTICES_QUAD: [[f32; 3]; 4] = [
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0],
];

/// Углы billboard-quad в пространстве модели
pub const MODEL_QUAD: [[f32; 2]; 4] = [
    [-0.5, 0.5],
    [0.5, 0.5],
    [0.5, -0.5],
    [-0.5, -0.5],
];

/// Два треугольника на quad
pub const INDEXES_QUAD: [u32; 6] = [0, 1, 2, 0, 2, 3];

pub const NB_VERTICES_QUAD: u32 = 4;
pub const NB_INDEXES_QUAD: usize = 6;

/// Вершины и индексы одного буфера
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData<V> {
    pub vertices: Vec<V>,
    pub indices: Vec<u32>,
    quad_count: u32,
}

impl<V> MeshData<V> {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            quad_count: 0,
        }
    }

    /// Добавить quad: 4 вершины + 6 индексов со сдвигом 4 * quad_count
    pub fn push_quad(&mut self, corners: [V; 4]) {
        self.vertices.extend(corners);
        let offset = self.quad_count * NB_VERTICES_QUAD;
        self.indices.extend(INDEXES_QUAD.iter().map(|i| i + offset));
        self.quad_count += 1;
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.quad_count = 0;
    }

    pub fn quad_count(&self) -> u32 {
        self.quad_count
    }

    pub fn is_empty(&self) -> bool {
        self.quad_count == 0
    }
}

impl<V> Default for MeshData<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Текстурные координаты A, B, C, D для прямоугольника в клетках.
pub fn texture_coords(rect: &TextureRect, square_size: i32, width: u32, height: u32) -> [[f32; 2]; 4] {
    inset_coords(
        [
            rect.x * square_size,
            rect.y * square_size,
            rect.width * square_size,
            rect.height * square_size,
        ],
        width,
        height,
    )
}

/// Текстурные координаты всей текстуры
pub fn full_texture_coords(width: u32, height: u32) -> [[f32; 2]; 4] {
    let width = width.max(1);
    let height = height.max(1);
    inset_coords([0, 0, width as i32, height as i32], width, height)
}

/// Прямоугольник в пикселях `[x, y, w, h]` в координаты A, B, C, D.
///
/// Каждая сторона сдвигается внутрь на 0.1 пикселя, чтобы соседние
/// участки текстуры не просвечивали на краях.
fn inset_coords(pixels: [i32; 4], width: u32, height: u32) -> [[f32; 2]; 4] {
    let width = width.max(1) as f32;
    let height = height.max(1) as f32;
    let [x, y, w, h] = pixels;

    let coef_x = 0.1 / width;
    let coef_y = 0.1 / height;
    let x = x as f32 / width + coef_x;
    let y = y as f32 / height + coef_y;
    let w = w as f32 / width - coef_x * 2.0;
    let h = h as f32 / height - coef_y * 2.0;

    [[x, y], [x + w, y], [x + w, y + h], [x, y + h]]
}

/// Поворот точки вокруг оси Y через центр (угол в градусах).
///
/// Матрица применяется к вектору-строке: x' = x·cos - z·sin, z' = x·sin + z·cos.
pub fn rotate_vertex(vec: Vec3, center: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.to_radians().sin_cos();
    let rotation = Mat3::new(
        Vec3::new(cos, 0.0, sin),
        Vec3::unit_y(),
        Vec3::new(-sin, 0.0, cos),
    );
    rotation * (vec - center) + center
}

/// Поворот всех четырёх углов quad
pub fn rotate_quad(corners: &mut [Vec3; 4], center: Vec3, angle: f32) {
    for corner in corners.iter_mut() {
        *corner = rotate_vertex(*corner, center, angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centroid(corners: &[Vec3; 4]) -> Vec3 {
        corners.iter().fold(Vec3::zero(), |acc, c| acc + *c) / 4.0
    }

    #[test]
    fn test_indices_offset_per_quad() {
        let mut mesh: MeshData<u8> = MeshData::new();
        mesh.push_quad([0, 1, 2, 3]);
        mesh.push_quad([4, 5, 6, 7]);
        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_rotation_preserves_center() {
        let base = [
            Vec3::new(10.0, 42.0, 5.0),
            Vec3::new(42.0, 42.0, 5.0),
            Vec3::new(42.0, 10.0, 5.0),
            Vec3::new(10.0, 10.0, 5.0),
        ];
        let center = centroid(&base);
        for angle in [-90.0, -45.0, 13.0, 45.0, 90.0, 180.0, 270.0] {
            let mut rotated = base;
            rotate_quad(&mut rotated, center, angle);
            let c = centroid(&rotated);
            assert!((c - center).mag() < 1e-3, "angle {}: {:?} != {:?}", angle, c, center);
        }
    }

    #[test]
    fn test_rotation_keeps_pivot_and_height() {
        let center = Vec3::new(3.0, 7.0, -2.0);
        assert_eq!(rotate_vertex(center, center, 45.0), center);

        let v = rotate_vertex(Vec3::new(4.0, 9.0, -2.0), center, 90.0);
        assert!((v.y - 9.0).abs() < 1e-5);
        assert!((v.x - 3.0).abs() < 1e-5);
        assert!((v.z - -1.0).abs() < 1e-5);
    }

    #[test]
    fn test_texture_coords_inset() {
        let rect = TextureRect::new(1, 2, 1, 1);
        let tex = texture_coords(&rect, 16, 128, 64);
        assert!((tex[0][0] - (16.0 / 128.0 + 0.1 / 128.0)).abs() < 1e-6);
        assert!((tex[0][1] - (32.0 / 64.0 + 0.1 / 64.0)).abs() < 1e-6);
        assert!((tex[2][0] - (32.0 / 128.0 - 0.1 / 128.0)).abs() < 1e-6);
        assert!((tex[2][1] - (48.0 / 64.0 - 0.1 / 64.0)).abs() < 1e-6);
    }

    #[test]
    fn test_full_texture_coords_inset() {
        let tex = full_texture_coords(32, 16);
        assert!((tex[0][0] - 0.1 / 32.0).abs() < 1e-6);
        assert!((tex[0][1] - 0.1 / 16.0).abs() < 1e-6);
        assert!((tex[2][0] - (1.0 - 0.1 / 32.0)).abs() < 1e-6);
        assert!((tex[2][1] - (1.0 - 0.1 / 16.0)).abs() < 1e-6);
    }
}
