// ============================================
// Map Object - Объект в списке карты
// ============================================

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::editor::portion::Position;

/// Объект карты с позицией размещения
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMapObject {
    pub id: i32,
    pub name: String,
    #[serde(rename = "p", default)]
    pub position: Position,
}

impl SystemMapObject {
    pub fn new(id: i32, name: impl Into<String>, position: Position) -> Self {
        Self { id, name: name.into(), position }
    }
}

/// Строка списка: "0001: Chest"
impl fmt::Display for SystemMapObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}: {}", self.id, self.name)
    }
}
