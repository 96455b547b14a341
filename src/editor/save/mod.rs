// ============================================
// Save Module - JSON-хранилище карт
// ============================================
// Структура папки карты:
//   Maps/MAP0001/infos.json, objects.json, i_j_k.json
//   Maps/MAP0001/temp/      - несохранённые изменения
//   Maps/MAP0001/undoredo/  - снимки истории

mod json_file;
mod properties;
mod textures;
mod map_files;

pub use json_file::JsonFile;
pub use properties::MapProperties;
pub use textures::{MapTextures, TextureSize};
pub use map_files::MapFiles;
