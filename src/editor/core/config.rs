// ============================================
// Config - Настройки редактора
// ============================================
// Data-Driven: параметры читаются из JSON, отсутствующие поля по умолчанию

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::Result;

/// Папка с картами внутри проекта
pub const PATH_MAPS: &str = "Maps";
/// Несохранённые изменения порций и объектов
pub const TEMP_MAP_FOLDER_NAME: &str = "temp";
/// Снимки истории undo/redo
pub const TEMP_UNDOREDO_MAP_FOLDER_NAME: &str = "undoredo";
/// Текстуры проекта (tilesets/, walls/, object_square.png)
pub const PATH_TEXTURES: &str = "Textures";
/// Свойства карты
pub const FILE_MAP_INFOS: &str = "infos.json";
/// Список объектов карты
pub const FILE_MAP_OBJECTS: &str = "objects.json";

/// Размер клетки в пикселях
pub const DEFAULT_SQUARE_SIZE: i32 = 16;
/// Количество клеток на ребро порции
pub const DEFAULT_PORTION_SIZE: i32 = 16;

/// Настройки редактора карт
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Пикселей на клетку
    pub square_size: i32,
    /// Клеток на ребро порции
    pub portion_size: i32,
    /// Видимый радиус в порциях вокруг курсора
    pub portions_ray: i32,
    /// Шаг сдвига между спрайтами (против z-fighting)
    pub sprites_offset_coef: f32,
}

impl EditorConfig {
    /// Загрузить настройки из файла (нет файла = значения по умолчанию)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No editor config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Радиус сетки порций: видимый куб плюс невидимая оболочка
    pub fn grid_ray(&self) -> i32 {
        self.portions_ray + 1
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            square_size: DEFAULT_SQUARE_SIZE,
            portion_size: DEFAULT_PORTION_SIZE,
            portions_ray: 1,
            sprites_offset_coef: 0.005,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: EditorConfig = serde_json::from_str(r#"{"portions_ray": 3}"#).unwrap();
        assert_eq!(config.portions_ray, 3);
        assert_eq!(config.square_size, DEFAULT_SQUARE_SIZE);
        assert_eq!(config.grid_ray(), 4);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load(dir.path().join("editor.json")).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(EditorConfig::load(&path).is_err());
    }
}
