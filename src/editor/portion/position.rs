// ============================================
// Position - Позиции на сетке карты
// ============================================
// Сериализуются плоскими массивами целых чисел

use serde::{Deserialize, Serialize};

use crate::editor::core::{MapError, Result};

use super::portion_key::Portion;

/// Позиция клетки: (x, y, z) в клетках, y_plus - доля клетки по высоте
/// в процентах, layer - слой наложения.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "Vec<i32>", try_from = "Vec<i32>")]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub y_plus: i32,
    pub layer: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self::with_details(x, y, z, 0, 0)
    }

    pub const fn with_details(x: i32, y: i32, z: i32, y_plus: i32, layer: i32) -> Self {
        Self { x, y, z, y_plus, layer }
    }

    /// Высота в пикселях (целочисленная)
    pub fn pixel_y(&self, square_size: i32) -> i32 {
        self.y * square_size + self.y_plus * square_size / 100
    }

    /// Глобальная порция, содержащая клетку
    pub fn global_portion(&self, portion_size: i32) -> Portion {
        Portion::new(
            self.x.div_euclid(portion_size),
            self.y.div_euclid(portion_size),
            self.z.div_euclid(portion_size),
        )
    }

    /// [x, y, z, y_plus, layer]
    pub fn to_vec(&self) -> Vec<i32> {
        vec![self.x, self.y, self.z, self.y_plus, self.layer]
    }

    /// Из массива длиной 3..=5, недостающие поля = 0
    pub fn from_slice(values: &[i32]) -> Result<Self> {
        if !(3..=5).contains(&values.len()) {
            return Err(MapError::InvalidPosition(values.len()));
        }
        let extra = |i: usize| values.get(i).copied().unwrap_or(0);
        Ok(Self::with_details(values[0], values[1], values[2], extra(3), extra(4)))
    }
}

impl From<Position> for Vec<i32> {
    fn from(p: Position) -> Self {
        p.to_vec()
    }
}

impl TryFrom<Vec<i32>> for Position {
    type Error = MapError;

    fn try_from(values: Vec<i32>) -> Result<Self> {
        Position::from_slice(&values)
    }
}

/// Отрезок стены между двумя узлами сетки на высоте y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "Vec<i32>", try_from = "Vec<i32>")]
pub struct GridPosition {
    pub x1: i32,
    pub z1: i32,
    pub x2: i32,
    pub z2: i32,
    pub y: i32,
}

impl GridPosition {
    pub const fn new(x1: i32, z1: i32, x2: i32, z2: i32, y: i32) -> Self {
        Self { x1, z1, x2, z2, y }
    }

    /// Горизонтальный отрезок идёт вдоль X
    pub fn is_horizontal(&self) -> bool {
        self.z1 == self.z2
    }

    pub fn global_portion(&self, portion_size: i32) -> Portion {
        Portion::new(
            self.x1.div_euclid(portion_size),
            self.y.div_euclid(portion_size),
            self.z1.div_euclid(portion_size),
        )
    }

    /// [x1, y, z1, x2, z2]
    pub fn to_vec(&self) -> Vec<i32> {
        vec![self.x1, self.y, self.z1, self.x2, self.z2]
    }

    pub fn from_slice(values: &[i32]) -> Result<Self> {
        match *values {
            [x1, y, z1, x2, z2] => Ok(Self::new(x1, z1, x2, z2, y)),
            _ => Err(MapError::InvalidPosition(values.len())),
        }
    }
}

impl From<GridPosition> for Vec<i32> {
    fn from(p: GridPosition) -> Self {
        p.to_vec()
    }
}

impl TryFrom<Vec<i32>> for GridPosition {
    type Error = MapError;

    fn try_from(values: Vec<i32>) -> Result<Self> {
        GridPosition::from_slice(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_height_uses_integer_percent() {
        let p = Position::with_details(2, 1, 0, 33, 0);
        assert_eq!(p.pixel_y(16), 16 + 5);
    }

    #[test]
    fn test_global_portion_of_negative_square() {
        assert_eq!(Position::new(-1, 0, 16).global_portion(16), Portion::new(-1, 0, 1));
        assert_eq!(Position::new(15, -16, 0).global_portion(16), Portion::new(0, -1, 0));
    }

    #[test]
    fn test_position_json_is_flat_array() {
        let p = Position::with_details(1, 2, 3, 50, 1);
        assert_eq!(serde_json::to_string(&p).unwrap(), "[1,2,3,50,1]");
        let short: Position = serde_json::from_str("[4,5,6]").unwrap();
        assert_eq!(short, Position::new(4, 5, 6));
        assert!(serde_json::from_str::<Position>("[1,2]").is_err());
    }

    #[test]
    fn test_grid_position_layout() {
        let g = GridPosition::new(1, 2, 1, 3, 4);
        assert!(!g.is_horizontal());
        assert_eq!(serde_json::to_string(&g).unwrap(), "[1,4,2,1,3]");
        let back: GridPosition = serde_json::from_str("[1,4,2,1,3]").unwrap();
        assert_eq!(back, g);
        assert!(GridPosition::from_slice(&[1, 2, 3]).is_err());
    }
}
