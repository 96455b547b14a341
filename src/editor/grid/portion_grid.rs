// ============================================
// Portion Grid - Арена порций вокруг курсора
// ============================================
// Куб (2*ray+1)^3 слотов, индекс по локальной координате порции:
// index = (x+ray)*side^2 + (y+ray)*side + (z+ray)

use ndshape::{RuntimeShape, Shape};

use crate::editor::portion::{MapPortion, Portion};

/// Резидентное окно порций. Пустой слот = None,
/// замена или удаление порции освобождает её буферы.
pub struct PortionGrid {
    ray: i32,
    shape: RuntimeShape<u32, 3>,
    slots: Vec<Option<MapPortion>>,
}

impl PortionGrid {
    pub fn new(ray: i32) -> Self {
        let ray = ray.max(0);
        let side = (2 * ray + 1) as u32;
        let shape = RuntimeShape::<u32, 3>::new([side, side, side]);
        let slots = std::iter::repeat_with(|| None).take(shape.size() as usize).collect();
        Self { ray, shape, slots }
    }

    pub fn ray(&self) -> i32 {
        self.ray
    }

    /// Слотов на ребро
    pub fn side(&self) -> i32 {
        2 * self.ray + 1
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Линейный индекс; координата должна лежать в [-ray, ray]^3
    pub fn index(&self, local: Portion) -> usize {
        debug_assert!(self.is_in_portion(local, 0), "portion {} outside grid", local);
        let r = self.ray;
        self.shape.linearize([(local.z + r) as u32, (local.y + r) as u32, (local.x + r) as u32]) as usize
    }

    /// Обратное к `index`
    pub fn local_from_index(&self, index: usize) -> Portion {
        let [z, y, x] = self.shape.delinearize(index as u32);
        let r = self.ray;
        Portion::new(x as i32 - r, y as i32 - r, z as i32 - r)
    }

    /// Каждая ось в [-(ray+offset), ray+offset]
    pub fn is_in_portion(&self, local: Portion, offset: i32) -> bool {
        local.chebyshev() <= self.ray + offset
    }

    /// Внутренний куб рисуется, внешняя оболочка только держится в памяти
    pub fn is_visible_slot(&self, local: Portion) -> bool {
        local.chebyshev() < self.ray
    }

    pub fn get(&self, local: Portion) -> Option<&MapPortion> {
        if !self.is_in_portion(local, 0) {
            return None;
        }
        self.slots[self.index(local)].as_ref()
    }

    pub fn get_mut(&mut self, local: Portion) -> Option<&mut MapPortion> {
        if !self.is_in_portion(local, 0) {
            return None;
        }
        let index = self.index(local);
        self.slots[index].as_mut()
    }

    pub fn get_brut(&self, index: usize) -> Option<&MapPortion> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Положить порцию в слот, возвращает прежнюю
    pub fn set(&mut self, local: Portion, portion: Option<MapPortion>) -> Option<MapPortion> {
        if !self.is_in_portion(local, 0) {
            return portion;
        }
        let index = self.index(local);
        std::mem::replace(&mut self.slots[index], portion)
    }

    pub fn take(&mut self, local: Portion) -> Option<MapPortion> {
        self.set(local, None)
    }

    /// Заполненные слоты с локальными координатами
    pub fn iter(&self) -> impl Iterator<Item = (Portion, &MapPortion)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| slot.as_ref().map(|p| (self.local_from_index(i), p)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut MapPortion> + '_ {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    /// Забрать все порции, сетка остаётся пустой
    pub fn drain(&mut self) -> Vec<MapPortion> {
        self.slots.iter_mut().filter_map(Option::take).collect()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    pub fn loaded_count(&self) -> usize {
        self.slots.iter().flatten().filter(|p| p.is_loaded()).count()
    }
}
