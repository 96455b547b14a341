// ============================================
// Map Portion - Содержимое одной порции
// ============================================
// Пол, спрайты, стены и объекты порции, их меши и GPU буферы.
// Позиции внутри порции глобальные (в клетках карты).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::editor::core::Result;
use crate::editor::geometry::{
    push_floor, push_object_square, push_sprite, push_wall, GeometryPass, MeshData, Vertex,
    VertexBillboard,
};
use crate::editor::save::{JsonFile, MapProperties, MapTextures};

use super::elements::{
    empty_prior, FloorDatas, MapElement, PriorState, SpriteDatas, SpriteWallDatas,
    SubSelectionKind, SystemCommonObject,
};
use super::gpu::PortionBuffers;
use super::portion_key::Portion;
use super::position::{GridPosition, Position};

// ============================================
// JSON файл порции
// ============================================

#[derive(Debug, Serialize, Deserialize)]
struct Entry<K, V> {
    k: K,
    v: V,
}

/// Пустые списки не пишутся: пустая порция = `{}`
#[derive(Debug, Default, Serialize, Deserialize)]
struct PortionFile {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    lands: Vec<Entry<Position, FloorDatas>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    sprites: Vec<Entry<Position, SpriteDatas>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    walls: Vec<Entry<GridPosition, SpriteWallDatas>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    objs: Vec<Entry<Position, SystemCommonObject>>,
}

fn entries<K: Copy, V: Clone>(map: &BTreeMap<K, V>) -> Vec<Entry<K, V>> {
    map.iter().map(|(k, v)| Entry { k: *k, v: v.clone() }).collect()
}

fn collect<K: Ord, V>(list: Vec<Entry<K, V>>) -> BTreeMap<K, V> {
    list.into_iter().map(|e| (e.k, e.v)).collect()
}

// ============================================
// MapPortion
// ============================================

/// Порция карты
pub struct MapPortion {
    global: Portion,

    floors: BTreeMap<Position, FloorDatas>,
    sprites: BTreeMap<Position, SpriteDatas>,
    walls: BTreeMap<GridPosition, SpriteWallDatas>,
    objects: BTreeMap<Position, SystemCommonObject>,

    mesh_floors: MeshData<Vertex>,
    mesh_sprites_static: MeshData<Vertex>,
    mesh_sprites_face: MeshData<VertexBillboard>,
    mesh_walls: BTreeMap<i32, MeshData<Vertex>>,
    mesh_objects: MeshData<Vertex>,

    is_loaded: bool,
    is_visible: bool,
    buffers: Option<PortionBuffers>,
}

impl MapPortion {
    pub fn new(global: Portion) -> Self {
        Self {
            global,
            floors: BTreeMap::new(),
            sprites: BTreeMap::new(),
            walls: BTreeMap::new(),
            objects: BTreeMap::new(),
            mesh_floors: MeshData::new(),
            mesh_sprites_static: MeshData::new(),
            mesh_sprites_face: MeshData::new(),
            mesh_walls: BTreeMap::new(),
            mesh_objects: MeshData::new(),
            is_loaded: false,
            is_visible: false,
            buffers: None,
        }
    }

    pub fn global_portion(&self) -> Portion {
        self.global
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn set_is_loaded(&mut self, loaded: bool) {
        self.is_loaded = loaded;
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn set_is_visible(&mut self, visible: bool) {
        self.is_visible = visible;
    }

    /// Нет ни пола, ни спрайтов, ни стен, ни объектов
    pub fn is_empty(&self) -> bool {
        self.floors.is_empty() && self.sprites.is_empty() && self.walls.is_empty() && self.objects.is_empty()
    }

    // --- Содержимое ---

    pub fn floors(&self) -> &BTreeMap<Position, FloorDatas> {
        &self.floors
    }

    pub fn sprites(&self) -> &BTreeMap<Position, SpriteDatas> {
        &self.sprites
    }

    pub fn walls(&self) -> &BTreeMap<GridPosition, SpriteWallDatas> {
        &self.walls
    }

    pub fn objects(&self) -> &BTreeMap<Position, SystemCommonObject> {
        &self.objects
    }

    // --- Меши ---

    pub fn mesh_floors(&self) -> &MeshData<Vertex> {
        &self.mesh_floors
    }

    pub fn mesh_sprites_static(&self) -> &MeshData<Vertex> {
        &self.mesh_sprites_static
    }

    pub fn mesh_sprites_face(&self) -> &MeshData<VertexBillboard> {
        &self.mesh_sprites_face
    }

    pub fn mesh_walls(&self) -> &BTreeMap<i32, MeshData<Vertex>> {
        &self.mesh_walls
    }

    pub fn mesh_objects(&self) -> &MeshData<Vertex> {
        &self.mesh_objects
    }

    pub fn buffers(&self) -> Option<&PortionBuffers> {
        self.buffers.as_ref()
    }

    // ============================================
    // Редактирование
    // ============================================

    /// Поставить или заменить объект; возвращает прежний объект клетки
    pub fn add_object(&mut self, position: Position, object: SystemCommonObject) -> Result<PriorState> {
        prior_of(self.objects.insert(position, object).map(MapElement::Object))
    }

    pub fn delete_object(&mut self, position: &Position) -> Result<PriorState> {
        prior_of(self.objects.remove(position).map(MapElement::Object))
    }

    pub fn add_floor(&mut self, position: Position, floor: FloorDatas) -> Result<PriorState> {
        prior_of(self.floors.insert(position, floor).map(MapElement::Floor))
    }

    pub fn delete_floor(&mut self, position: &Position) -> Result<PriorState> {
        prior_of(self.floors.remove(position).map(MapElement::Floor))
    }

    pub fn add_sprite(&mut self, position: Position, sprite: SpriteDatas) -> Result<PriorState> {
        prior_of(self.sprites.insert(position, sprite).map(MapElement::Sprite))
    }

    pub fn delete_sprite(&mut self, position: &Position) -> Result<PriorState> {
        prior_of(self.sprites.remove(position).map(MapElement::Sprite))
    }

    pub fn add_wall(&mut self, position: GridPosition, wall: SpriteWallDatas) -> Result<PriorState> {
        prior_of(self.walls.insert(position, wall).map(MapElement::Wall))
    }

    pub fn delete_wall(&mut self, position: &GridPosition) -> Result<PriorState> {
        prior_of(self.walls.remove(position).map(MapElement::Wall))
    }

    /// Убрать элемент вида `kind` из клетки `pos` (позиция в формате истории)
    pub fn remove_kind(&mut self, kind: SubSelectionKind, pos: &[i32]) -> Result<PriorState> {
        match kind {
            SubSelectionKind::None => Ok(empty_prior()),
            SubSelectionKind::Floors => self.delete_floor(&Position::from_slice(pos)?),
            SubSelectionKind::SpritesWall => self.delete_wall(&GridPosition::from_slice(pos)?),
            SubSelectionKind::Object => self.delete_object(&Position::from_slice(pos)?),
            _ => {
                let position = Position::from_slice(pos)?;
                match self.sprites.get(&position) {
                    Some(sprite) if sprite.kind == kind => self.delete_sprite(&position),
                    _ => Ok(empty_prior()),
                }
            }
        }
    }

    /// Очистить вид `clear` в клетке и положить `element`.
    /// Используется при воспроизведении истории.
    pub fn set_element(
        &mut self,
        clear: SubSelectionKind,
        pos: &[i32],
        element: Option<MapElement>,
    ) -> Result<PriorState> {
        let removed = self.remove_kind(clear, pos)?;
        let Some(element) = element else {
            return Ok(removed);
        };

        let replaced = match element {
            MapElement::Floor(d) => self.add_floor(Position::from_slice(pos)?, d)?,
            MapElement::Sprite(d) => self.add_sprite(Position::from_slice(pos)?, d)?,
            MapElement::Wall(d) => self.add_wall(GridPosition::from_slice(pos)?, d)?,
            MapElement::Object(d) => self.add_object(Position::from_slice(pos)?, d)?,
        };
        Ok(if replaced.1 == SubSelectionKind::None { removed } else { replaced })
    }

    // ============================================
    // Обрезка при уменьшении карты
    // ============================================

    /// Удалить пол за границами карты, возвращает число удалённых клеток
    pub fn remove_land_out(&mut self, properties: &MapProperties) -> usize {
        let before = self.floors.len();
        self.floors.retain(|p, _| properties.is_in_grid(p));
        before - self.floors.len()
    }

    /// Удалить спрайты и стены за границами карты
    pub fn remove_sprites_out(&mut self, properties: &MapProperties) -> usize {
        let before = self.sprites.len() + self.walls.len();
        self.sprites.retain(|p, _| properties.is_in_grid(p));
        self.walls.retain(|p, _| properties.is_wall_in_grid(p));
        before - self.sprites.len() - self.walls.len()
    }

    /// Удалить объекты за границами карты, возвращает их id
    pub fn remove_objects_out(&mut self, properties: &MapProperties) -> Vec<i32> {
        let mut removed = Vec::new();
        self.objects.retain(|p, object| {
            let keep = properties.is_in_grid(p);
            if !keep {
                removed.push(object.id);
            }
            keep
        });
        removed
    }

    // ============================================
    // Геометрия
    // ============================================

    /// Перестроить все меши порции из текущего содержимого
    pub fn initialize_vertices(&mut self, pass: &mut GeometryPass, textures: &MapTextures) {
        pass.begin();
        let square_size = pass.square_size();

        self.mesh_floors.clear();
        for (position, floor) in &self.floors {
            push_floor(floor, square_size, textures.tileset, position, &mut self.mesh_floors);
        }

        self.mesh_sprites_static.clear();
        self.mesh_sprites_face.clear();
        for (position, sprite) in &self.sprites {
            push_sprite(
                sprite,
                pass,
                textures.tileset,
                position,
                &mut self.mesh_sprites_static,
                &mut self.mesh_sprites_face,
            );
        }

        self.mesh_walls.clear();
        for (position, wall) in &self.walls {
            let mesh = self.mesh_walls.entry(wall.wall_id).or_default();
            push_wall(square_size, textures.wall(wall.wall_id), position, mesh);
        }

        self.initialize_vertices_objects(square_size, textures);
    }

    /// Перестроить только маркеры объектов
    pub fn initialize_vertices_objects(&mut self, square_size: i32, textures: &MapTextures) {
        self.mesh_objects.clear();
        for position in self.objects.keys() {
            push_object_square(square_size, textures.object_square, position, &mut self.mesh_objects);
        }
    }

    /// Загрузить меши на GPU, прежние буферы освобождаются
    pub fn update_gpu(&mut self, device: &wgpu::Device) {
        let label = format!("Portion {}", self.global);
        self.buffers = Some(PortionBuffers::upload(
            device,
            &label,
            &self.mesh_floors,
            &self.mesh_sprites_static,
            &self.mesh_sprites_face,
            &self.mesh_walls,
            &self.mesh_objects,
        ));
    }

    pub fn update_gpu_objects(&mut self, device: &wgpu::Device) {
        let label = format!("Portion {}", self.global);
        match &mut self.buffers {
            Some(buffers) => buffers.upload_objects(device, &label, &self.mesh_objects),
            None => self.update_gpu(device),
        }
    }

    pub fn release_gpu(&mut self) {
        self.buffers = None;
    }

    // ============================================
    // JSON
    // ============================================

    pub fn to_json(&self) -> Result<Value> {
        let file = PortionFile {
            lands: entries(&self.floors),
            sprites: entries(&self.sprites),
            walls: entries(&self.walls),
            objs: entries(&self.objects),
        };
        Ok(serde_json::to_value(file)?)
    }

    pub fn from_json(global: Portion, json: Value) -> Result<Self> {
        let file: PortionFile = serde_json::from_value(json)?;
        Ok(Self::from_file(global, file))
    }

    fn from_file(global: Portion, file: PortionFile) -> Self {
        let mut portion = Self::new(global);
        portion.floors = collect(file.lands);
        portion.sprites = collect(file.sprites);
        portion.walls = collect(file.walls);
        portion.objects = collect(file.objs);
        portion
    }

    /// Прочитать порцию из файла; нет файла = пустая порция
    pub fn read(global: Portion, path: &Path) -> Result<Self> {
        let file = JsonFile::read::<PortionFile>(path)?;
        Ok(Self::from_file(global, file.unwrap_or_default()))
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        JsonFile::write(path, &self.to_json()?)
    }
}

fn prior_of(previous: Option<MapElement>) -> Result<PriorState> {
    match previous {
        Some(element) => element.to_prior(),
        None => Ok(empty_prior()),
    }
}

impl std::fmt::Debug for MapPortion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapPortion")
            .field("global", &self.global)
            .field("floors", &self.floors.len())
            .field("sprites", &self.sprites.len())
            .field("walls", &self.walls.len())
            .field("objects", &self.objects.len())
            .field("is_loaded", &self.is_loaded)
            .field("is_visible", &self.is_visible)
            .finish()
    }
}
