// ============================================
// Map Object List - Упорядоченный список объектов
// ============================================
// Порядок строк сохраняется, поиск по id за O(1) (indexmap)

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::editor::portion::{Portion, Position};

use super::map_object::SystemMapObject;

/// Служебные строки в начале списка, в файл не пишутся
pub const RESERVED_OBJECT_IDS: [i32; 2] = [-1, 0];

/// Формат objects.json
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ObjectsFile {
    #[serde(default)]
    pub objs: Vec<SystemMapObject>,
}

/// Список объектов карты
#[derive(Debug, Clone)]
pub struct MapObjectList {
    objects: IndexMap<i32, SystemMapObject>,
}

impl MapObjectList {
    /// Пустой список: только служебные строки
    pub fn new() -> Self {
        let mut objects = IndexMap::new();
        objects.insert(-1, SystemMapObject::new(-1, "This object", Position::default()));
        objects.insert(0, SystemMapObject::new(0, "Hero", Position::default()));
        Self { objects }
    }

    pub fn from_file(file: ObjectsFile) -> Self {
        let mut list = Self::new();
        for object in file.objs {
            list.push(object);
        }
        list
    }

    pub fn to_file(&self) -> ObjectsFile {
        ObjectsFile {
            objs: self.user_objects().cloned().collect(),
        }
    }

    /// Все строки, включая служебные
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SystemMapObject> {
        self.objects.values()
    }

    /// Объекты без служебных строк
    pub fn user_objects(&self) -> impl Iterator<Item = &SystemMapObject> {
        self.objects.values().filter(|o| !RESERVED_OBJECT_IDS.contains(&o.id))
    }

    pub fn get(&self, id: i32) -> Option<&SystemMapObject> {
        self.objects.get(&id)
    }

    pub fn contains(&self, id: i32) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn row_of(&self, id: i32) -> Option<usize> {
        self.objects.get_index_of(&id)
    }

    /// Вставить в строку `row` (прежняя запись с тем же id убирается)
    pub fn insert_at(&mut self, row: usize, object: SystemMapObject) {
        self.objects.shift_remove(&object.id);
        let row = row.min(self.objects.len());
        self.objects.shift_insert(row, object.id, object);
    }

    pub fn push(&mut self, object: SystemMapObject) {
        let row = self.objects.len();
        self.insert_at(row, object);
    }

    /// Удалить по id, возвращает освободившуюся строку
    pub fn remove_by_id(&mut self, id: i32) -> Option<usize> {
        self.objects.shift_remove_full(&id).map(|(row, _, _)| row)
    }

    /// Обновить объект на его прежней строке (новый - в конец)
    pub fn replace(&mut self, object: SystemMapObject) -> usize {
        let row = self.remove_by_id(object.id).unwrap_or(self.objects.len());
        self.insert_at(row, object);
        row
    }

    pub fn remove_ids(&mut self, ids: &[i32]) {
        for id in ids {
            self.remove_by_id(*id);
        }
    }

    /// Удалить объекты, чья порция подходит под условие; служебные строки не трогаются
    pub fn remove_where_portion(&mut self, portion_size: i32, remove: impl Fn(Portion) -> bool) -> Vec<i32> {
        let ids: Vec<i32> = self
            .user_objects()
            .filter(|o| remove(o.position.global_portion(portion_size)))
            .map(|o| o.id)
            .collect();
        self.remove_ids(&ids);
        ids
    }

    /// Первый свободный id начиная с 1
    pub fn generate_object_id(&self) -> i32 {
        (1..).find(|id| !self.contains(*id)).unwrap_or(1)
    }

    pub fn generate_object_name(id: i32) -> String {
        format!("OBJ{:04}", id)
    }
}

impl Default for MapObjectList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(id: i32, x: i32) -> SystemMapObject {
        SystemMapObject::new(id, MapObjectList::generate_object_name(id), Position::new(x, 0, 0))
    }

    #[test]
    fn test_reserved_rows_not_persisted() {
        let mut list = MapObjectList::new();
        assert_eq!(list.len(), 2);
        list.push(object(1, 0));
        let file = list.to_file();
        assert_eq!(file.objs.len(), 1);
        assert_eq!(MapObjectList::from_file(file).len(), 3);
    }

    #[test]
    fn test_generate_first_unused_id() {
        let mut list = MapObjectList::new();
        assert_eq!(list.generate_object_id(), 1);
        list.push(object(1, 0));
        list.push(object(2, 0));
        list.push(object(4, 0));
        assert_eq!(list.generate_object_id(), 3);
        assert_eq!(MapObjectList::generate_object_name(3), "OBJ0003");
    }

    #[test]
    fn test_replace_keeps_row() {
        let mut list = MapObjectList::new();
        list.push(object(1, 0));
        list.push(object(2, 0));
        assert_eq!(list.replace(object(1, 5)), 2);
        assert_eq!(list.row_of(1), Some(2));
        assert_eq!(list.get(1).map(|o| o.position.x), Some(5));

        assert_eq!(list.remove_by_id(1), Some(2));
        assert_eq!(list.row_of(2), Some(2));
        assert_eq!(list.remove_by_id(1), None);
    }

    #[test]
    fn test_remove_where_portion() {
        let mut list = MapObjectList::new();
        list.push(object(1, 3));
        list.push(object(2, 20));
        let removed = list.remove_where_portion(16, |p| p.x >= 1);
        assert_eq!(removed, vec![2]);
        assert!(list.contains(1));
        assert!(list.contains(0));
    }
}
