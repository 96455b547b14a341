// ============================================
// Undo/Redo State - Одно обратимое изменение
// ============================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::editor::core::Result;
use crate::editor::portion::{
    empty_prior, GridPosition, MapElement, Position, PriorState, SubSelectionKind,
};

/// Было / стало в одной клетке
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndoRedoState {
    pub before: Value,
    #[serde(rename = "beforeT")]
    pub before_kind: SubSelectionKind,
    pub after: Value,
    #[serde(rename = "afterT")]
    pub after_kind: SubSelectionKind,
    pub pos: Vec<i32>,
}

impl UndoRedoState {
    /// `prior` - прежнее содержимое, `after` = None для удаления
    pub fn new(prior: PriorState, after: Option<&MapElement>, pos: Vec<i32>) -> Result<Self> {
        let (after, after_kind) = match after {
            Some(element) => element.to_prior()?,
            None => empty_prior(),
        };
        let (before, before_kind) = prior;
        Ok(Self { before, before_kind, after, after_kind, pos })
    }

    pub fn before_element(&self) -> Result<Option<MapElement>> {
        MapElement::from_json(self.before_kind, &self.before)
    }

    pub fn after_element(&self) -> Result<Option<MapElement>> {
        MapElement::from_json(self.after_kind, &self.after)
    }

    /// Позиция стены хранится как отрезок сетки
    pub fn is_wall(&self) -> bool {
        self.before_kind == SubSelectionKind::SpritesWall || self.after_kind == SubSelectionKind::SpritesWall
    }

    pub fn position(&self) -> Result<Position> {
        Position::from_slice(&self.pos)
    }

    pub fn grid_position(&self) -> Result<GridPosition> {
        GridPosition::from_slice(&self.pos)
    }

    /// Изменение ничего не меняет
    pub fn is_noop(&self) -> bool {
        self.before_kind == self.after_kind && self.before == self.after
    }
}
