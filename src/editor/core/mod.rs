// ============================================
// Core Module - Конфигурация и ошибки
// ============================================

mod config;
mod error;

pub use config::{
    EditorConfig, PATH_MAPS, PATH_TEXTURES, TEMP_MAP_FOLDER_NAME, TEMP_UNDOREDO_MAP_FOLDER_NAME,
    FILE_MAP_INFOS, FILE_MAP_OBJECTS, DEFAULT_SQUARE_SIZE, DEFAULT_PORTION_SIZE,
};
pub use error::{MapError, Result};
