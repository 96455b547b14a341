// ============================================
// Map Module - Карта и сессия редактирования
// ============================================

mod map;
mod session;

pub use map::Map;
pub use session::EditingSession;
