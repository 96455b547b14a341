// ============================================
// Objects Module - Индекс объектов карты
// ============================================

mod map_object;
mod object_list;

pub use map_object::SystemMapObject;
pub use object_list::{MapObjectList, ObjectsFile, RESERVED_OBJECT_IDS};
