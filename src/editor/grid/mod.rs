// ============================================
// Grid Module - Сетка порций вокруг курсора
// ============================================

mod portion_grid;
mod cursor;

pub use portion_grid::PortionGrid;
pub use cursor::Cursor;
