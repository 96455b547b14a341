// ============================================
// Undo Module - История изменений карты
// ============================================
// Линейная история: один JSON снимок на шаг, undoredo/<n>.json

mod state;
mod history;

pub use state::UndoRedoState;
pub use history::UndoRedoHistory;
