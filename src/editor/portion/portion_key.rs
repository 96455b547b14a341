// ============================================
// Portion - Координата порции
// ============================================

use std::fmt;
use std::ops::{Add, Sub};

/// Координата порции (в порциях, не в клетках).
/// Глобальная = локальная + порция курсора.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Portion {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Portion {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Имя файла порции: "i_j_k.json"
    pub fn file_name(&self) -> String {
        format!("{}_{}_{}.json", self.x, self.y, self.z)
    }

    /// Расстояние Чебышёва до начала координат
    pub fn chebyshev(&self) -> i32 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }
}

impl Add for Portion {
    type Output = Portion;

    fn add(self, rhs: Portion) -> Portion {
        Portion::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Portion {
    type Output = Portion;

    fn sub(self, rhs: Portion) -> Portion {
        Portion::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl fmt::Display for Portion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
