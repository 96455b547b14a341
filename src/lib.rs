// ============================================
// PaperMap - Ядро редактора карт
// ============================================
// Порции карты, генерация вершин спрайтов и история undo/redo на диске

pub mod editor;

pub use editor::{
    EditorConfig, MapError, Result,
    GeometryPass, Vertex, VertexBillboard, MeshData,
    Position, GridPosition, Portion, MapPortion, MapElement, SubSelectionKind,
    FloorDatas, SpriteDatas, SpriteWallDatas, SystemCommonObject, TextureRect,
    PortionGrid, Cursor,
    SystemMapObject, MapObjectList,
    JsonFile, MapFiles, MapProperties, MapTextures, TextureSize,
    UndoRedoState, UndoRedoHistory,
    Map, EditingSession,
};
