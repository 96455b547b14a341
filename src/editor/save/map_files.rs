// ============================================
// Map Files - Файлы одной карты на диске
// ============================================

use std::fs;
use std::path::{Path, PathBuf};

use crate::editor::core::{
    Result, FILE_MAP_OBJECTS, PATH_MAPS, TEMP_MAP_FOLDER_NAME, TEMP_UNDOREDO_MAP_FOLDER_NAME,
};
use crate::editor::objects::{MapObjectList, ObjectsFile, SystemMapObject};
use crate::editor::portion::{MapPortion, Portion, Position, SystemCommonObject};

use super::json_file::JsonFile;
use super::properties::MapProperties;

/// Пути к файлам карты `<project>/Maps/MAPxxxx`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapFiles {
    path: PathBuf,
}

impl MapFiles {
    pub fn new(project: &Path, id: i32) -> Self {
        Self::from_path(Self::maps_dir(project).join(Self::map_name(id)))
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// "MAP0001"
    pub fn map_name(id: i32) -> String {
        format!("MAP{:04}", id)
    }

    pub fn maps_dir(project: &Path) -> PathBuf {
        project.join(PATH_MAPS)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.path.join(TEMP_MAP_FOLDER_NAME)
    }

    pub fn undoredo_dir(&self) -> PathBuf {
        self.path.join(TEMP_UNDOREDO_MAP_FOLDER_NAME)
    }

    pub fn objects_path(&self, temp: bool) -> PathBuf {
        if temp {
            self.temp_dir().join(FILE_MAP_OBJECTS)
        } else {
            self.path.join(FILE_MAP_OBJECTS)
        }
    }

    /// Основной файл порции
    pub fn portion_path_map(&self, portion: &Portion) -> PathBuf {
        self.path.join(portion.file_name())
    }

    pub fn portion_path_temp(&self, portion: &Portion) -> PathBuf {
        self.temp_dir().join(portion.file_name())
    }

    /// Файл для чтения: сначала temp/, затем основной
    pub fn portion_path(&self, portion: &Portion) -> PathBuf {
        let temp = self.portion_path_temp(portion);
        if temp.is_file() {
            temp
        } else {
            self.portion_path_map(portion)
        }
    }

    // ============================================
    // Создание карты
    // ============================================

    /// Новая пустая карта: infos.json, по `{}` на порцию, пустой список объектов
    pub fn write_new_map(project: &Path, properties: &MapProperties, portion_size: i32) -> Result<Self> {
        Self::write_map(project, properties, portion_size, &ObjectsFile::default())
    }

    /// Карта по умолчанию с героем (id 1) в клетке (7, 0, 7)
    pub fn write_default_map(project: &Path, portion_size: i32) -> Result<Self> {
        let properties = MapProperties::default();
        let position = Position::new(7, 0, 7);
        let objects = ObjectsFile {
            objs: vec![SystemMapObject::new(1, "Hero", position)],
        };
        let files = Self::write_map(project, &properties, portion_size, &objects)?;

        let global = position.global_portion(portion_size);
        let mut portion = MapPortion::new(global);
        portion.add_object(position, SystemCommonObject::new(1, "Hero"))?;
        portion.write(&files.portion_path_map(&global))?;
        Ok(files)
    }

    fn write_map(
        project: &Path,
        properties: &MapProperties,
        portion_size: i32,
        objects: &ObjectsFile,
    ) -> Result<Self> {
        let files = Self::new(project, properties.id);
        fs::create_dir_all(files.path())?;
        properties.save(files.path())?;

        for portion in properties.portions(portion_size) {
            files.write_empty_portion(&files.portion_path_map(&portion))?;
        }
        JsonFile::write(files.objects_path(false), objects)?;

        fs::create_dir_all(files.temp_dir())?;
        fs::create_dir_all(files.undoredo_dir())?;

        log::info!("Created map {} at {}", properties.real_name(), files.path().display());
        Ok(files)
    }

    pub fn write_empty_portion(&self, path: &Path) -> Result<()> {
        JsonFile::write(path, &serde_json::json!({}))
    }

    // ============================================
    // Изменение размеров
    // ============================================

    /// Привести файлы карты к новым размерам
    pub fn correct_map(&self, previous: &MapProperties, properties: &MapProperties, portion_size: i32) -> Result<()> {
        // Новые порции
        let mut created = 0;
        for portion in properties.portions(portion_size) {
            let path = self.portion_path_map(&portion);
            if !path.is_file() {
                self.write_empty_portion(&path)?;
                created += 1;
            }
        }

        let shrinks = properties.length < previous.length
            || properties.width < previous.width
            || properties.height < previous.height
            || properties.depth < previous.depth;
        if !shrinks {
            log::info!("Resized map {}: {} new portions", properties.real_name(), created);
            return Ok(());
        }

        let mut objects = self.load_objects(false)?;

        // Порции целиком за границей
        let mut deleted = 0;
        for portion in previous.portions(portion_size) {
            if !properties.is_portion_in_grid(&portion, portion_size) {
                JsonFile::delete(self.portion_path_map(&portion))?;
                deleted += 1;
            }
        }
        let mut removed_ids = objects.remove_where_portion(portion_size, |p| !properties.is_portion_in_grid(&p, portion_size));

        // Порции на новой границе обрезаются
        let [xs, ys, zs] = properties.portions_range(portion_size);
        for portion in properties.portions(portion_size) {
            let on_edge = portion.x == *xs.end()
                || portion.z == *zs.end()
                || portion.y == *ys.end()
                || portion.y == *ys.start();
            if !on_edge {
                continue;
            }
            let path = self.portion_path_map(&portion);
            let mut map_portion = MapPortion::read(portion, &path)?;
            let cut = map_portion.remove_land_out(properties) + map_portion.remove_sprites_out(properties);
            let ids = map_portion.remove_objects_out(properties);
            if cut > 0 || !ids.is_empty() {
                map_portion.write(&path)?;
            }
            removed_ids.extend(ids);
        }
        objects.remove_ids(&removed_ids);
        self.save_objects(&objects, false)?;

        log::info!(
            "Resized map {}: {} new portions, {} deleted, {} objects removed",
            properties.real_name(),
            created,
            deleted,
            removed_ids.len()
        );
        Ok(())
    }

    // ============================================
    // Объекты
    // ============================================

    pub fn load_objects(&self, temp: bool) -> Result<MapObjectList> {
        let file: Option<ObjectsFile> = JsonFile::read(self.objects_path(temp))?;
        Ok(MapObjectList::from_file(file.unwrap_or_default()))
    }

    pub fn save_objects(&self, objects: &MapObjectList, temp: bool) -> Result<()> {
        JsonFile::write(self.objects_path(temp), &objects.to_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::portion::{FloorDatas, TextureRect};

    #[test]
    fn test_write_new_map_layout() {
        let project = tempfile::tempdir().unwrap();
        let properties = MapProperties { id: 3, length: 20, ..MapProperties::default() };
        let files = MapFiles::write_new_map(project.path(), &properties, 16).unwrap();

        assert_eq!(files.path(), project.path().join("Maps").join("MAP0003"));
        assert!(files.path().join("infos.json").is_file());
        assert!(files.path().join("0_0_0.json").is_file());
        assert!(files.path().join("1_0_0.json").is_file());
        assert!(!files.path().join("0_0_1.json").exists());
        assert!(files.temp_dir().is_dir());
        assert!(files.undoredo_dir().is_dir());
        assert_eq!(files.load_objects(false).unwrap().user_objects().count(), 0);
    }

    #[test]
    fn test_default_map_has_hero() {
        let project = tempfile::tempdir().unwrap();
        let files = MapFiles::write_default_map(project.path(), 16).unwrap();

        let objects = files.load_objects(false).unwrap();
        assert_eq!(objects.get(1).map(|o| o.name.as_str()), Some("Hero"));

        let portion = MapPortion::read(Portion::default(), &files.portion_path(&Portion::default())).unwrap();
        assert_eq!(portion.objects().get(&Position::new(7, 0, 7)).map(|o| o.id), Some(1));
    }

    #[test]
    fn test_portion_path_prefers_temp() {
        let project = tempfile::tempdir().unwrap();
        let files = MapFiles::write_default_map(project.path(), 16).unwrap();
        let portion = Portion::default();
        assert_eq!(files.portion_path(&portion), files.portion_path_map(&portion));

        files.write_empty_portion(&files.portion_path_temp(&portion)).unwrap();
        assert_eq!(files.portion_path(&portion), files.portion_path_temp(&portion));
    }

    #[test]
    fn test_correct_map_grow_and_shrink() {
        let project = tempfile::tempdir().unwrap();
        let small = MapProperties::default();
        let files = MapFiles::write_default_map(project.path(), 16).unwrap();

        let large = MapProperties { length: 32, ..small.clone() };
        files.correct_map(&small, &large, 16).unwrap();
        assert!(files.path().join("1_0_0.json").is_file());

        // Объект и пол у правого края порции 0
        let origin = Portion::default();
        let path = files.portion_path_map(&origin);
        let mut portion = MapPortion::read(origin, &path).unwrap();
        portion.add_floor(Position::new(10, 0, 1), FloorDatas::new(TextureRect::new(0, 0, 1, 1))).unwrap();
        portion.add_object(Position::new(12, 0, 1), SystemCommonObject::new(2, "Far")).unwrap();
        portion.write(&path).unwrap();
        let mut objects = files.load_objects(false).unwrap();
        objects.push(SystemMapObject::new(2, "Far", Position::new(12, 0, 1)));
        objects.push(SystemMapObject::new(3, "Gone", Position::new(20, 0, 1)));
        files.save_objects(&objects, false).unwrap();

        let cropped = MapProperties { length: 8, ..small };
        files.correct_map(&large, &cropped, 16).unwrap();

        assert!(!files.path().join("1_0_0.json").exists());
        let portion = MapPortion::read(origin, &path).unwrap();
        assert!(portion.floors().is_empty());
        assert_eq!(portion.objects().len(), 1);

        let objects = files.load_objects(false).unwrap();
        assert!(objects.contains(1));
        assert!(!objects.contains(2));
        assert!(!objects.contains(3));
    }
}
