// ============================================
// Portion Module - Порции карты
// ============================================
// Позиции, элементы карты, содержимое порции и её GPU буферы

mod position;
mod portion_key;
mod elements;
mod map_portion;
mod gpu;

pub use position::{Position, GridPosition};
pub use portion_key::Portion;
pub use elements::{
    SubSelectionKind, TextureRect, FloorDatas, SpriteDatas, SpriteWallDatas,
    SystemCommonObject, MapElement, PriorState, empty_prior,
};
pub use map_portion::MapPortion;
pub use gpu::{GpuMesh, PortionBuffers};
