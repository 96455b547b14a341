// ============================================
// Cursor - Якорь камеры на карте
// ============================================

use crate::editor::portion::{Portion, Position};

/// Курсор редактора, координаты в клетках
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cursor {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y, self.z)
    }

    pub fn set_position(&mut self, position: &Position) {
        self.x = position.x;
        self.y = position.y;
        self.z = position.z;
    }

    /// Глобальная порция под курсором
    pub fn portion(&self, portion_size: i32) -> Portion {
        self.position().global_portion(portion_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_portion_floors_negative() {
        let mut cursor = Cursor::new(17, 0, 3);
        assert_eq!(cursor.portion(16), Portion::new(1, 0, 0));
        cursor.set_position(&Position::new(-3, -1, 3));
        assert_eq!(cursor.portion(16), Portion::new(-1, -1, 0));
    }
}
