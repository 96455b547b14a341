// ============================================
// Editor Module - Редактор тайловых карт
// ============================================
// Сетка порций вокруг курсора, геометрия спрайтов,
// JSON-хранилище и история изменений

pub mod core;
pub mod geometry;
pub mod portion;
pub mod grid;
pub mod objects;
pub mod save;
pub mod undo;
pub mod map;

// Реэкспорт основных типов
pub use self::core::{EditorConfig, MapError, Result};
pub use geometry::{GeometryPass, Vertex, VertexBillboard, MeshData};
pub use portion::{
    Position, GridPosition, Portion, MapPortion, MapElement, SubSelectionKind,
    FloorDatas, SpriteDatas, SpriteWallDatas, SystemCommonObject, TextureRect,
};
pub use grid::{PortionGrid, Cursor};
pub use objects::{SystemMapObject, MapObjectList};
pub use save::{JsonFile, MapFiles, MapProperties, MapTextures, TextureSize};
pub use undo::{UndoRedoState, UndoRedoHistory};
pub use map::{Map, EditingSession};
