// ============================================
// Geometry Pass - Контекст одного прохода генерации
// ============================================
// Счётчик сдвига спрайтов живёт только внутри прохода и
// передаётся явно по ссылке

use crate::editor::core::EditorConfig;

/// Контекст генерации вершин одной порции
#[derive(Debug, Clone)]
pub struct GeometryPass {
    square_size: i32,
    offset_coef: f32,
    sprites_offset: f32,
}

impl GeometryPass {
    pub fn new(square_size: i32, offset_coef: f32) -> Self {
        Self {
            square_size,
            offset_coef,
            sprites_offset: 0.0,
        }
    }

    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.square_size, config.sprites_offset_coef)
    }

    /// Начало прохода: счётчик сбрасывается
    pub fn begin(&mut self) {
        self.sprites_offset = 0.0;
    }

    pub fn square_size(&self) -> i32 {
        self.square_size
    }

    pub fn sprites_offset(&self) -> f32 {
        self.sprites_offset
    }

    /// Текущий сдвиг спрайта, затем инкремент на один шаг
    pub fn next_sprite_offset(&mut self) -> f32 {
        let offset = self.sprites_offset;
        self.sprites_offset += self.offset_coef;
        offset
    }
}
