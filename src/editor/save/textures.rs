// ============================================
// Map Textures - Размеры текстур карты
// ============================================
// Геометрии нужны только размеры в пикселях; сами картинки
// загружает внешний рендерер

use std::collections::HashMap;
use std::path::Path;

use crate::editor::core::Result;

/// Размер текстуры в пикселях
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSize {
    pub width: u32,
    pub height: u32,
}

impl TextureSize {
    /// Заглушка для отсутствующей текстуры
    pub const EMPTY: TextureSize = TextureSize::new(1, 1);

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Размеры из заголовка файла, без декодирования пикселей
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let (width, height) = image::image_dimensions(path)?;
        Ok(Self::new(width, height))
    }

    /// Как `from_file`, но ошибка даёт заглушку
    fn from_file_or_empty(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(size) => size,
            Err(e) => {
                log::warn!("Texture {} unavailable: {}", path.display(), e);
                Self::EMPTY
            }
        }
    }
}

impl Default for TextureSize {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Текстуры, используемые при генерации вершин порций
#[derive(Debug, Clone, Default)]
pub struct MapTextures {
    pub tileset: TextureSize,
    pub object_square: TextureSize,
    pub walls: HashMap<i32, TextureSize>,
}

impl MapTextures {
    /// Все текстуры - заглушки
    pub fn empty() -> Self {
        Self::default()
    }

    /// Папка текстур: tilesets/<id>.png, walls/<id>.png, object_square.png
    pub fn load(textures_dir: &Path, tileset_id: i32) -> Self {
        let tileset = TextureSize::from_file_or_empty(&textures_dir.join("tilesets").join(format!("{}.png", tileset_id)));
        let object_square = TextureSize::from_file_or_empty(&textures_dir.join("object_square.png"));

        let mut walls = HashMap::new();
        if let Ok(entries) = std::fs::read_dir(textures_dir.join("walls")) {
            for path in entries.flatten().map(|e| e.path()) {
                let id = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .and_then(|s| s.parse::<i32>().ok());
                if let Some(id) = id {
                    walls.insert(id, TextureSize::from_file_or_empty(&path));
                }
            }
        }

        log::debug!("Loaded textures: tileset {:?}, {} walls", tileset, walls.len());
        Self { tileset, object_square, walls }
    }

    /// Текстура стены; неизвестный id даёт заглушку
    pub fn wall(&self, id: i32) -> TextureSize {
        self.walls.get(&id).copied().unwrap_or(TextureSize::EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_from_png() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("tilesets")).unwrap();
        std::fs::create_dir_all(dir.path().join("walls")).unwrap();
        image::RgbaImage::new(64, 32).save(dir.path().join("tilesets/1.png")).unwrap();
        image::RgbaImage::new(16, 48).save(dir.path().join("walls/3.png")).unwrap();

        let textures = MapTextures::load(dir.path(), 1);
        assert_eq!(textures.tileset, TextureSize::new(64, 32));
        assert_eq!(textures.wall(3), TextureSize::new(16, 48));
        assert_eq!(textures.wall(4), TextureSize::EMPTY);
        assert_eq!(textures.object_square, TextureSize::EMPTY);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(TextureSize::from_file(dir.path().join("none.png")).is_err());
    }
}
