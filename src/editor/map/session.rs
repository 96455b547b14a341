// ============================================
// Editing Session - Правки карты с историей
// ============================================
// Каждая правка пишет UndoRedoState в буфер; commit сбрасывает
// буфер в новый снимок истории

use crate::editor::core::Result;
use crate::editor::portion::{
    FloorDatas, GridPosition, MapElement, Position, PriorState, SpriteDatas, SpriteWallDatas,
    SubSelectionKind, SystemCommonObject,
};
use crate::editor::undo::{UndoRedoHistory, UndoRedoState};

use super::map::Map;

/// Открытая карта, её история и несброшенные правки
pub struct EditingSession {
    map: Map,
    history: UndoRedoHistory,
    pending: Vec<UndoRedoState>,
}

impl EditingSession {
    pub fn new(map: Map) -> Self {
        let history = UndoRedoHistory::new(map.maps_dir());
        Self {
            map,
            history,
            pending: Vec::new(),
        }
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    pub fn history(&self) -> &UndoRedoHistory {
        &self.history
    }

    pub fn pending(&self) -> &[UndoRedoState] {
        &self.pending
    }

    pub fn current_state(&self) -> i32 {
        self.history.current_state(self.map.id())
    }

    // ============================================
    // Правки
    // ============================================

    pub fn add_object(&mut self, position: &Position, object: SystemCommonObject) -> Result<()> {
        let element = MapElement::Object(object.clone());
        let prior = self.map.add_object(position, object)?;
        self.record(prior, Some(&element), position.to_vec())
    }

    pub fn delete_object(&mut self, position: &Position) -> Result<()> {
        let prior = self.map.delete_object(position)?;
        self.record(prior, None, position.to_vec())
    }

    pub fn add_floor(&mut self, position: &Position, floor: FloorDatas) -> Result<()> {
        let prior = self.map.add_floor(position, floor)?;
        self.record(prior, Some(&MapElement::Floor(floor)), position.to_vec())
    }

    pub fn add_sprite(&mut self, position: &Position, sprite: SpriteDatas) -> Result<()> {
        let prior = self.map.add_sprite(position, sprite)?;
        self.record(prior, Some(&MapElement::Sprite(sprite)), position.to_vec())
    }

    pub fn add_wall(&mut self, position: &GridPosition, wall: SpriteWallDatas) -> Result<()> {
        let prior = self.map.add_wall(position, wall)?;
        self.record(prior, Some(&MapElement::Wall(wall)), position.to_vec())
    }

    pub fn delete_element(&mut self, kind: SubSelectionKind, pos: &[i32]) -> Result<()> {
        let prior = self.map.delete_element(kind, pos)?;
        self.record(prior, None, pos.to_vec())
    }

    /// Пустые правки и правки вне окна не записываются
    fn record(&mut self, prior: Option<PriorState>, after: Option<&MapElement>, pos: Vec<i32>) -> Result<()> {
        let Some(prior) = prior else {
            return Ok(());
        };
        let state = UndoRedoState::new(prior, after, pos)?;
        if !state.is_noop() {
            self.pending.push(state);
        }
        Ok(())
    }

    // ============================================
    // История
    // ============================================

    /// Сбросить буфер правок в новый снимок; false если сбрасывать нечего
    pub fn commit(&mut self) -> Result<bool> {
        if self.pending.is_empty() {
            return Ok(false);
        }
        self.history.commit(self.map.id(), &mut self.pending)?;
        Ok(true)
    }

    /// Откатить последний снимок, правки применяются в обратном порядке.
    /// Порции вне окна правятся в temp/. Возвращает число применённых правок.
    pub fn undo(&mut self) -> Result<usize> {
        self.commit()?;
        let states = self.history.undo(self.map.id())?;
        let mut applied = 0;
        for state in states.iter().rev() {
            let prior = self.map.replay_element_at(state.after_kind, &state.pos, state.before_element()?)?;
            applied += prior.is_some() as usize;
        }
        Ok(applied)
    }

    pub fn redo(&mut self) -> Result<usize> {
        self.commit()?;
        let states = self.history.redo(self.map.id())?;
        let mut applied = 0;
        for state in &states {
            let prior = self.map.replay_element_at(state.before_kind, &state.pos, state.after_element()?)?;
            applied += prior.is_some() as usize;
        }
        Ok(applied)
    }

    pub fn save(&mut self) -> Result<()> {
        self.commit()?;
        self.map.save()
    }

    /// Закрыть карту: история удаляется, несохранённое остаётся в temp/
    pub fn close(mut self) -> Result<Map> {
        self.history.purge_history(self.map.id())?;
        Ok(self.map)
    }
}
