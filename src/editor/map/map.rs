// ============================================
// Map - Открытая в редакторе карта
// ============================================
// Окно порций вокруг курсора, индекс объектов, текстуры
// и запись несохранённых изменений в temp/

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::editor::core::{EditorConfig, Result};
use crate::editor::geometry::GeometryPass;
use crate::editor::grid::{Cursor, PortionGrid};
use crate::editor::objects::{MapObjectList, SystemMapObject};
use crate::editor::portion::{
    FloorDatas, GridPosition, MapElement, MapPortion, Portion, Position, PriorState, SpriteDatas,
    SpriteWallDatas, SubSelectionKind, SystemCommonObject,
};
use crate::editor::save::{JsonFile, MapFiles, MapProperties, MapTextures};

/// Карта с резидентным окном порций
pub struct Map {
    id: i32,
    project: PathBuf,
    files: MapFiles,
    config: EditorConfig,
    properties: MapProperties,
    grid: PortionGrid,
    cursor: Cursor,
    objects: MapObjectList,
    textures: MapTextures,
    pass: GeometryPass,
    device: Option<Arc<wgpu::Device>>,
    saved: bool,
}

impl Map {
    /// Открыть карту проекта.
    /// Без `keep_unsaved` старые temp/ и undoredo/ очищаются.
    pub fn open(project: &Path, id: i32, config: EditorConfig, keep_unsaved: bool) -> Result<Self> {
        let files = MapFiles::new(project, id);

        if !keep_unsaved {
            JsonFile::delete_all_files(files.temp_dir())?;
            JsonFile::delete_all_files(files.undoredo_dir())?;
            let objects = files.objects_path(false);
            if objects.is_file() {
                std::fs::create_dir_all(files.temp_dir())?;
                std::fs::copy(&objects, files.objects_path(true))?;
            }
        }

        let properties = MapProperties::load(files.path())?;
        let objects = files.load_objects(files.objects_path(true).is_file())?;
        log::info!(
            "Opened map {} ({}x{}x{}, {} objects)",
            properties.real_name(),
            properties.length,
            properties.width,
            properties.height,
            objects.user_objects().count()
        );

        Ok(Self {
            id,
            project: project.to_path_buf(),
            files,
            grid: PortionGrid::new(config.grid_ray()),
            pass: GeometryPass::from_config(&config),
            config,
            properties,
            cursor: Cursor::default(),
            objects,
            textures: MapTextures::empty(),
            device: None,
            saved: !keep_unsaved,
        })
    }

    // --- Доступ ---

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn files(&self) -> &MapFiles {
        &self.files
    }

    pub fn maps_dir(&self) -> PathBuf {
        MapFiles::maps_dir(&self.project)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn properties(&self) -> &MapProperties {
        &self.properties
    }

    pub fn grid(&self) -> &PortionGrid {
        &self.grid
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn objects(&self) -> &MapObjectList {
        &self.objects
    }

    pub fn textures(&self) -> &MapTextures {
        &self.textures
    }

    pub fn saved(&self) -> bool {
        self.saved
    }

    pub fn set_textures(&mut self, textures: MapTextures) {
        self.textures = textures;
    }

    pub fn load_textures(&mut self, textures_dir: &Path) {
        self.textures = MapTextures::load(textures_dir, self.properties.tileset_id);
    }

    /// С устройством порции загружают меши на GPU
    pub fn set_device(&mut self, device: Arc<wgpu::Device>) {
        self.device = Some(device);
    }

    // ============================================
    // Координаты
    // ============================================

    pub fn portion_index(&self, local: Portion) -> usize {
        self.grid.index(local)
    }

    /// Глобальная порция под курсором
    pub fn cursor_portion(&self) -> Portion {
        self.cursor.portion(self.config.portion_size)
    }

    pub fn global_from_local(&self, local: Portion) -> Portion {
        local + self.cursor_portion()
    }

    pub fn local_from_global(&self, global: Portion) -> Portion {
        global - self.cursor_portion()
    }

    pub fn global_portion(&self, position: &Position) -> Portion {
        position.global_portion(self.config.portion_size)
    }

    pub fn local_portion(&self, position: &Position) -> Portion {
        self.local_from_global(self.global_portion(position))
    }

    pub fn map_portion(&self, local: Portion) -> Option<&MapPortion> {
        self.grid.get(local)
    }

    pub fn map_portion_from_global(&self, global: Portion) -> Option<&MapPortion> {
        self.grid.get(self.local_from_global(global))
    }

    pub fn is_in_grid(&self, position: &Position) -> bool {
        self.properties.is_in_grid(position)
    }

    pub fn is_portion_in_grid(&self, global: &Portion) -> bool {
        self.properties.is_portion_in_grid(global, self.config.portion_size)
    }

    pub fn is_in_portion(&self, local: Portion, offset: i32) -> bool {
        self.grid.is_in_portion(local, offset)
    }

    pub fn is_in_something(&self, position: &Position, local: Portion, offset: i32) -> bool {
        self.is_in_grid(position) && self.is_in_portion(local, offset)
    }

    // ============================================
    // Окно порций
    // ============================================

    /// Прочитать порцию (temp/ приоритетнее) и построить её меши.
    /// Порция вне карты = None.
    pub fn load_portion_map(&mut self, global: Portion) -> Result<Option<MapPortion>> {
        if !self.is_portion_in_grid(&global) {
            return Ok(None);
        }
        let mut portion = MapPortion::read(global, &self.files.portion_path(&global))?;
        portion.initialize_vertices(&mut self.pass, &self.textures);
        if let Some(device) = &self.device {
            portion.update_gpu(device);
        }
        portion.set_is_loaded(true);
        Ok(Some(portion))
    }

    /// Перестроить окно вокруг курсора. Порции, оставшиеся в окне,
    /// переиспользуются; остальные читаются с диска.
    pub fn load_portions(&mut self) {
        let center = self.cursor_portion();
        let mut previous: HashMap<Portion, MapPortion> = self
            .grid
            .drain()
            .into_iter()
            .map(|p| (p.global_portion(), p))
            .collect();

        let (mut loaded, mut reused) = (0, 0);
        for index in 0..self.grid.len() {
            let local = self.grid.local_from_index(index);
            let global = center + local;

            let portion = match previous.remove(&global) {
                Some(portion) => {
                    reused += 1;
                    Some(portion)
                }
                None => match self.load_portion_map(global) {
                    Ok(portion) => {
                        loaded += portion.is_some() as usize;
                        portion
                    }
                    Err(e) => {
                        log::error!("Failed to load portion {}: {}", global, e);
                        None
                    }
                },
            };

            if let Some(mut portion) = portion {
                portion.set_is_visible(self.grid.is_visible_slot(local));
                self.grid.set(local, Some(portion));
            }
        }

        log::info!(
            "Portions window at {}: {} loaded, {} reused, {} dropped",
            center,
            loaded,
            reused,
            previous.len()
        );
    }

    /// Полная перезагрузка окна с диска
    pub fn reload_portions(&mut self) {
        self.grid.clear();
        self.load_portions();
    }

    /// Переместить курсор; окно сдвигается при смене порции
    pub fn move_cursor(&mut self, position: &Position) {
        let before = self.cursor_portion();
        self.cursor.set_position(position);
        if self.cursor_portion() != before {
            self.load_portions();
        }
    }

    /// Перестроить меши одной порции окна
    pub fn update_portion(&mut self, local: Portion) {
        let visible = self.grid.is_visible_slot(local);
        let Some(portion) = self.grid.get_mut(local) else {
            return;
        };
        portion.initialize_vertices(&mut self.pass, &self.textures);
        if let Some(device) = &self.device {
            portion.update_gpu(device);
        }
        portion.set_is_visible(visible);
    }

    /// Перестроить только маркеры объектов во всех порциях
    pub fn update_map_objects(&mut self) {
        let square_size = self.config.square_size;
        for portion in self.grid.iter_mut() {
            portion.initialize_vertices_objects(square_size, &self.textures);
            if let Some(device) = &self.device {
                portion.update_gpu_objects(device);
            }
        }
    }

    // ============================================
    // Сохранение
    // ============================================

    /// Записать порцию окна в temp/
    pub fn save_portion(&mut self, local: Portion) -> Result<()> {
        let Some(portion) = self.grid.get(local) else {
            return Ok(());
        };
        let global = portion.global_portion();
        portion.write(&self.files.portion_path_temp(&global))?;
        self.saved = false;
        Ok(())
    }

    pub fn write_objects(&self, temp: bool) -> Result<()> {
        self.files.save_objects(&self.objects, temp)
    }

    /// Перенести temp/ в основные файлы карты
    pub fn save(&mut self) -> Result<()> {
        let temp = self.files.temp_dir();
        JsonFile::copy_all_files(&temp, self.files.path())?;
        JsonFile::delete_all_files(&temp)?;
        self.properties.save(self.files.path())?;
        self.saved = true;
        log::info!("Saved map {}", self.properties.real_name());
        Ok(())
    }

    // ============================================
    // Редактирование
    // ============================================

    /// Порция, которой принадлежит клетка (или отрезок стены) `pos`
    pub fn element_portion(
        &self,
        clear: SubSelectionKind,
        pos: &[i32],
        element: Option<&MapElement>,
    ) -> Result<Portion> {
        let portion_size = self.config.portion_size;
        if clear == SubSelectionKind::SpritesWall || matches!(element, Some(MapElement::Wall(_))) {
            let position = GridPosition::from_slice(pos)?;
            Ok(self.properties.wall_portion(&position, portion_size))
        } else {
            Ok(Position::from_slice(pos)?.global_portion(portion_size))
        }
    }

    /// Очистить вид `clear` в клетке `pos` и положить `element`.
    /// Возвращает прежнее содержимое или None, если порция не в окне.
    pub fn set_element_at(
        &mut self,
        clear: SubSelectionKind,
        pos: &[i32],
        element: Option<MapElement>,
    ) -> Result<Option<PriorState>> {
        let local = self.local_from_global(self.element_portion(clear, pos, element.as_ref())?);
        let prior = self.edit_resident(local, clear, pos, element)?;
        if prior.is_none() {
            log::warn!("Edit at {:?} outside the loaded window", pos);
        }
        Ok(prior)
    }

    /// Правка из истории undo/redo. Порция вне окна читается
    /// (temp/ приоритетнее), правится и пишется обратно в temp/.
    /// None, если порция вне карты.
    pub fn replay_element_at(
        &mut self,
        clear: SubSelectionKind,
        pos: &[i32],
        element: Option<MapElement>,
    ) -> Result<Option<PriorState>> {
        let global = self.element_portion(clear, pos, element.as_ref())?;
        let local = self.local_from_global(global);
        if self.grid.get(local).is_some() {
            return self.edit_resident(local, clear, pos, element);
        }
        if !self.is_portion_in_grid(&global) {
            log::warn!("Replayed edit at {:?} outside the map", pos);
            return Ok(None);
        }

        let mut portion = MapPortion::read(global, &self.files.portion_path(&global))?;
        let (prior, objects) = apply_element(&mut portion, clear, pos, element)?;
        self.sync_objects(objects)?;
        portion.write(&self.files.portion_path_temp(&global))?;
        self.saved = false;
        log::debug!("Replayed edit at {:?} in unloaded portion {}", pos, global);
        Ok(Some(prior))
    }

    /// Правка порции окна; None, если слот пуст
    fn edit_resident(
        &mut self,
        local: Portion,
        clear: SubSelectionKind,
        pos: &[i32],
        element: Option<MapElement>,
    ) -> Result<Option<PriorState>> {
        let Some(portion) = self.grid.get_mut(local) else {
            return Ok(None);
        };
        let (prior, objects) = apply_element(portion, clear, pos, element)?;
        self.sync_objects(objects)?;
        self.update_portion(local);
        self.save_portion(local)?;
        Ok(Some(prior))
    }

    /// Перенести изменение объекта клетки в индекс объектов и temp/
    fn sync_objects(&mut self, change: ObjectChange) -> Result<()> {
        let ObjectChange { position, removed, placed } = change;
        let Some(position) = position else {
            return Ok(());
        };
        if removed.is_none() && placed.is_none() {
            return Ok(());
        }
        if let Some(id) = removed {
            self.objects.remove_by_id(id);
        }
        if let Some(object) = placed {
            self.objects.replace(SystemMapObject::new(object.id, object.name, position));
        }
        self.write_objects(true)
    }

    pub fn add_object(&mut self, position: &Position, object: SystemCommonObject) -> Result<Option<PriorState>> {
        self.set_element_at(SubSelectionKind::None, &position.to_vec(), Some(MapElement::Object(object)))
    }

    pub fn delete_object(&mut self, position: &Position) -> Result<Option<PriorState>> {
        self.set_element_at(SubSelectionKind::Object, &position.to_vec(), None)
    }

    pub fn add_floor(&mut self, position: &Position, floor: FloorDatas) -> Result<Option<PriorState>> {
        self.set_element_at(SubSelectionKind::Floors, &position.to_vec(), Some(MapElement::Floor(floor)))
    }

    pub fn add_sprite(&mut self, position: &Position, sprite: SpriteDatas) -> Result<Option<PriorState>> {
        let pos = position.to_vec();
        let existing = self
            .map_portion_from_global(self.global_portion(position))
            .and_then(|p| p.sprites().get(position).map(|s| s.kind))
            .unwrap_or(SubSelectionKind::None);
        self.set_element_at(existing, &pos, Some(MapElement::Sprite(sprite)))
    }

    pub fn add_wall(&mut self, position: &GridPosition, wall: SpriteWallDatas) -> Result<Option<PriorState>> {
        self.set_element_at(SubSelectionKind::SpritesWall, &position.to_vec(), Some(MapElement::Wall(wall)))
    }

    /// Удалить элемент вида `kind` в клетке (или на отрезке для стен)
    pub fn delete_element(&mut self, kind: SubSelectionKind, pos: &[i32]) -> Result<Option<PriorState>> {
        self.set_element_at(kind, pos, None)
    }

    pub fn generate_object_id(&self) -> i32 {
        self.objects.generate_object_id()
    }

    pub fn generate_object_name(id: i32) -> String {
        MapObjectList::generate_object_name(id)
    }
}

/// Объект клетки до и после правки
struct ObjectChange {
    position: Option<Position>,
    removed: Option<i32>,
    placed: Option<SystemCommonObject>,
}

fn apply_element(
    portion: &mut MapPortion,
    clear: SubSelectionKind,
    pos: &[i32],
    element: Option<MapElement>,
) -> Result<(PriorState, ObjectChange)> {
    let is_wall = clear == SubSelectionKind::SpritesWall || matches!(element, Some(MapElement::Wall(_)));
    let position = if is_wall { None } else { Some(Position::from_slice(pos)?) };
    let object_at = |portion: &MapPortion| position.and_then(|p| portion.objects().get(&p).map(|o| o.id));

    let previous = object_at(&*portion);
    let placed = match &element {
        Some(MapElement::Object(object)) => Some(object.clone()),
        _ => None,
    };
    let prior = portion.set_element(clear, pos, element)?;
    let current = object_at(&*portion);

    let change = ObjectChange {
        position,
        removed: previous.filter(|id| Some(*id) != current),
        placed,
    };
    Ok((prior, change))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::portion::TextureRect;

    fn config() -> EditorConfig {
        EditorConfig {
            portion_size: 4,
            ..EditorConfig::default()
        }
    }

    fn open_default(project: &Path) -> Map {
        let _ = env_logger::builder().is_test(true).try_init();
        MapFiles::write_default_map(project, 4).unwrap();
        Map::open(project, 1, config(), false).unwrap()
    }

    #[test]
    fn test_local_global_round_trip() {
        let project = tempfile::tempdir().unwrap();
        let mut map = open_default(project.path());
        for cursor in [Position::new(0, 0, 0), Position::new(9, -5, 13), Position::new(-7, 2, -1)] {
            map.cursor.set_position(&cursor);
            for x in -3..=3 {
                for z in -3..=3 {
                    let p = Portion::new(x, x - z, z);
                    assert_eq!(map.local_from_global(map.global_from_local(p)), p);
                    assert_eq!(map.global_from_local(map.local_from_global(p)), p);
                }
            }
        }
    }

    #[test]
    fn test_window_visibility_tiers() {
        let project = tempfile::tempdir().unwrap();
        let mut map = open_default(project.path());
        map.load_portions();

        let portions: Vec<_> = map.grid().iter().collect();
        assert_eq!(portions.len(), 27);
        assert_eq!(portions.iter().filter(|(_, p)| p.is_visible()).count(), 8);
        assert!(portions.iter().all(|(_, p)| p.is_loaded()));
        assert_eq!(map.grid().loaded_count(), 27);

        let hero = map.map_portion_from_global(Portion::new(1, 0, 1)).unwrap();
        assert_eq!(hero.objects().len(), 1);
        assert_eq!(hero.mesh_objects().quad_count(), 1);
    }

    #[test]
    fn test_recenter_reuses_and_updates_flags() {
        let project = tempfile::tempdir().unwrap();
        let mut map = open_default(project.path());
        map.load_portions();

        map.move_cursor(&Position::new(4, 0, 0));
        assert_eq!(map.cursor_portion(), Portion::new(1, 0, 0));
        let portions: Vec<_> = map.grid().iter().collect();
        assert_eq!(portions.len(), 36);
        assert_eq!(portions.iter().filter(|(_, p)| p.is_visible()).count(), 12);
        for (local, portion) in &portions {
            assert_eq!(map.global_from_local(*local), portion.global_portion());
        }

        map.reload_portions();
        assert_eq!(map.grid().iter().count(), 36);
    }

    #[test]
    fn test_edit_writes_temp_and_save_moves_it() {
        let project = tempfile::tempdir().unwrap();
        let mut map = open_default(project.path());
        map.load_portions();

        let position = Position::new(1, 0, 1);
        let prior = map.add_floor(&position, FloorDatas::new(TextureRect::new(0, 0, 1, 1))).unwrap();
        assert_eq!(prior.map(|p| p.1), Some(SubSelectionKind::None));
        assert!(!map.saved());

        let origin = Portion::default();
        assert!(map.files().portion_path_temp(&origin).is_file());
        assert_eq!(map.map_portion(origin).unwrap().mesh_floors().quad_count(), 1);

        map.save().unwrap();
        assert!(map.saved());
        assert!(!map.files().portion_path_temp(&origin).exists());
        let saved = MapPortion::read(origin, &map.files().portion_path(&origin)).unwrap();
        assert_eq!(saved.floors().len(), 1);
    }

    #[test]
    fn test_object_edits_update_index() {
        let project = tempfile::tempdir().unwrap();
        let mut map = open_default(project.path());
        map.load_portions();

        let id = map.generate_object_id();
        assert_eq!(id, 2);
        let position = Position::new(2, 0, 3);
        map.add_object(&position, SystemCommonObject::new(id, Map::generate_object_name(id))).unwrap();
        assert_eq!(map.objects().get(2).map(|o| o.position), Some(position));
        assert_eq!(map.generate_object_id(), 3);

        let prior = map.delete_object(&position).unwrap().unwrap();
        assert_eq!(prior.1, SubSelectionKind::Object);
        assert!(!map.objects().contains(2));

        let stored = map.files().load_objects(true).unwrap();
        assert!(stored.contains(1));
        assert!(!stored.contains(2));
    }

    #[test]
    fn test_edit_outside_window_is_ignored() {
        let project = tempfile::tempdir().unwrap();
        let mut map = open_default(project.path());
        map.load_portions();
        let far = Position::new(40, 0, 0);
        assert!(map.add_floor(&far, FloorDatas::new(TextureRect::new(0, 0, 1, 1))).unwrap().is_none());
    }

    #[test]
    fn test_wall_on_far_edge_is_editable() {
        let project = tempfile::tempdir().unwrap();
        let mut map = open_default(project.path());
        map.move_cursor(&Position::new(12, 0, 0));

        let segment = GridPosition::new(16, 3, 16, 4, 0);
        let prior = map.add_wall(&segment, SpriteWallDatas::new(1)).unwrap();
        assert!(prior.is_some());
        let last = map.map_portion_from_global(Portion::new(3, 0, 0)).unwrap();
        assert_eq!(last.walls().len(), 1);

        assert!(map.delete_element(SubSelectionKind::SpritesWall, &segment.to_vec()).unwrap().is_some());
        assert!(map.map_portion_from_global(Portion::new(3, 0, 0)).unwrap().walls().is_empty());
    }

    #[test]
    fn test_object_markers_sample_loaded_texture() {
        let project = tempfile::tempdir().unwrap();
        let mut map = open_default(project.path());
        let textures = project.path().join("Textures");
        std::fs::create_dir_all(&textures).unwrap();
        image::RgbaImage::new(32, 32).save(textures.join("object_square.png")).unwrap();

        map.load_textures(&textures);
        map.load_portions();

        let hero = map.map_portion_from_global(Portion::new(1, 0, 1)).unwrap();
        let tex = hero.mesh_objects().vertices[0].tex;
        assert!((tex[0] - 0.1 / 32.0).abs() < 1e-6);
        assert!((tex[1] - 0.1 / 32.0).abs() < 1e-6);
    }

    #[test]
    fn test_corrupt_portion_leaves_slot_empty() {
        let project = tempfile::tempdir().unwrap();
        let mut map = open_default(project.path());
        std::fs::write(map.files().portion_path_map(&Portion::new(1, 1, 1)), "{ broken").unwrap();
        map.load_portions();
        assert_eq!(map.grid().iter().count(), 26);
        assert!(map.map_portion_from_global(Portion::new(1, 1, 1)).is_none());
    }
}
