// ============================================
// Map Elements - Элементы карты
// ============================================
// Пол, спрайты, стены и объекты; JSON-формы совпадают с файлами порций

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::editor::core::{MapError, Result};

/// Вид выбранного элемента (целые коды хранятся в истории)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
pub enum SubSelectionKind {
    #[default]
    None = 0,
    Floors = 1,
    SpritesFace = 2,
    SpritesFix = 3,
    SpritesDouble = 4,
    SpritesQuadra = 5,
    SpritesWall = 6,
    Object = 7,
}

impl SubSelectionKind {
    /// Спрайты, хранящиеся в карте спрайтов порции (без стен)
    pub fn is_sprite(self) -> bool {
        matches!(
            self,
            SubSelectionKind::SpritesFace
                | SubSelectionKind::SpritesFix
                | SubSelectionKind::SpritesDouble
                | SubSelectionKind::SpritesQuadra
        )
    }
}

impl From<SubSelectionKind> for i32 {
    fn from(kind: SubSelectionKind) -> Self {
        kind as i32
    }
}

impl TryFrom<i32> for SubSelectionKind {
    type Error = MapError;

    fn try_from(value: i32) -> Result<Self> {
        Ok(match value {
            0 => SubSelectionKind::None,
            1 => SubSelectionKind::Floors,
            2 => SubSelectionKind::SpritesFace,
            3 => SubSelectionKind::SpritesFix,
            4 => SubSelectionKind::SpritesDouble,
            5 => SubSelectionKind::SpritesQuadra,
            6 => SubSelectionKind::SpritesWall,
            7 => SubSelectionKind::Object,
            other => return Err(MapError::UnknownKind(other)),
        })
    }
}

/// Прямоугольник текстуры в клетках: [left, top, width, height]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct TextureRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl TextureRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }
}

impl From<[i32; 4]> for TextureRect {
    fn from([x, y, width, height]: [i32; 4]) -> Self {
        Self::new(x, y, width, height)
    }
}

impl From<TextureRect> for [i32; 4] {
    fn from(r: TextureRect) -> Self {
        [r.x, r.y, r.width, r.height]
    }
}

/// Клетка пола из тайлсета
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorDatas {
    #[serde(rename = "t")]
    pub texture_rect: TextureRect,
}

impl FloorDatas {
    pub fn new(texture_rect: TextureRect) -> Self {
        Self { texture_rect }
    }
}

/// Размещённый спрайт
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteDatas {
    #[serde(rename = "k")]
    pub kind: SubSelectionKind,
    /// Боковой сдвиг внутри клетки, в процентах
    #[serde(rename = "p")]
    pub width_position: i32,
    /// Угол поворота вокруг Y, градусы
    #[serde(rename = "a")]
    pub angle: i32,
    #[serde(rename = "t")]
    pub texture_rect: TextureRect,
}

impl SpriteDatas {
    pub fn new(kind: SubSelectionKind, width_position: i32, angle: i32, texture_rect: TextureRect) -> Self {
        Self { kind, width_position, angle, texture_rect }
    }
}

impl Default for SpriteDatas {
    fn default() -> Self {
        Self::new(SubSelectionKind::SpritesFace, 50, 0, TextureRect::new(0, 0, 2, 2))
    }
}

/// Стена: ссылка на текстуру стены
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteWallDatas {
    #[serde(rename = "w", default = "default_wall_id")]
    pub wall_id: i32,
}

fn default_wall_id() -> i32 {
    1
}

impl SpriteWallDatas {
    pub fn new(wall_id: i32) -> Self {
        Self { wall_id }
    }
}

impl Default for SpriteWallDatas {
    fn default() -> Self {
        Self::new(default_wall_id())
    }
}

/// Объект, размещённый в клетке
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemCommonObject {
    pub id: i32,
    pub name: String,
}

impl SystemCommonObject {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Любой элемент, который можно положить в клетку
#[derive(Debug, Clone, PartialEq)]
pub enum MapElement {
    Floor(FloorDatas),
    Sprite(SpriteDatas),
    Wall(SpriteWallDatas),
    Object(SystemCommonObject),
}

/// Предыдущее содержимое клетки для записи в историю
pub type PriorState = (Value, SubSelectionKind);

/// Клетка была пуста
pub fn empty_prior() -> PriorState {
    (Value::Object(serde_json::Map::new()), SubSelectionKind::None)
}

impl MapElement {
    pub fn kind(&self) -> SubSelectionKind {
        match self {
            MapElement::Floor(_) => SubSelectionKind::Floors,
            MapElement::Sprite(datas) => datas.kind,
            MapElement::Wall(_) => SubSelectionKind::SpritesWall,
            MapElement::Object(_) => SubSelectionKind::Object,
        }
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(match self {
            MapElement::Floor(d) => serde_json::to_value(d)?,
            MapElement::Sprite(d) => serde_json::to_value(d)?,
            MapElement::Wall(d) => serde_json::to_value(d)?,
            MapElement::Object(d) => serde_json::to_value(d)?,
        })
    }

    /// Содержимое клетки вместе с видом
    pub fn to_prior(&self) -> Result<PriorState> {
        Ok((self.to_json()?, self.kind()))
    }

    /// Разбор по виду; вид None или пустой объект означают пустую клетку
    pub fn from_json(kind: SubSelectionKind, json: &Value) -> Result<Option<Self>> {
        let is_empty = json.as_object().map_or(json.is_null(), |o| o.is_empty());
        if kind == SubSelectionKind::None || is_empty {
            return Ok(None);
        }

        let element = match kind {
            SubSelectionKind::Floors => MapElement::Floor(FloorDatas::deserialize(json)?),
            SubSelectionKind::SpritesWall => MapElement::Wall(SpriteWallDatas::deserialize(json)?),
            SubSelectionKind::Object => MapElement::Object(SystemCommonObject::deserialize(json)?),
            _ => {
                let datas = SpriteDatas::deserialize(json)?;
                if datas.kind != kind {
                    return Err(MapError::KindMismatch);
                }
                MapElement::Sprite(datas)
            }
        };
        Ok(Some(element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_codes() {
        assert_eq!(i32::from(SubSelectionKind::SpritesQuadra), 5);
        assert_eq!(SubSelectionKind::try_from(7).unwrap(), SubSelectionKind::Object);
        assert!(matches!(SubSelectionKind::try_from(8), Err(MapError::UnknownKind(8))));
        assert_eq!(serde_json::to_value(SubSelectionKind::Floors).unwrap(), json!(1));
    }

    #[test]
    fn test_sprite_json_shape() {
        let datas = SpriteDatas::new(SubSelectionKind::SpritesDouble, 25, 90, TextureRect::new(1, 2, 3, 4));
        let value = serde_json::to_value(datas).unwrap();
        assert_eq!(value, json!({"k": 4, "p": 25, "a": 90, "t": [1, 2, 3, 4]}));
        assert_eq!(serde_json::from_value::<SpriteDatas>(value).unwrap(), datas);
    }

    #[test]
    fn test_element_from_json() {
        let floor = MapElement::from_json(SubSelectionKind::Floors, &json!({"t": [0, 0, 1, 1]})).unwrap();
        assert_eq!(floor, Some(MapElement::Floor(FloorDatas::new(TextureRect::new(0, 0, 1, 1)))));

        assert_eq!(MapElement::from_json(SubSelectionKind::None, &json!({"t": [0, 0, 1, 1]})).unwrap(), None);
        assert_eq!(MapElement::from_json(SubSelectionKind::Object, &json!({})).unwrap(), None);

        let wall = MapElement::from_json(SubSelectionKind::SpritesWall, &json!({"w": 3})).unwrap();
        assert_eq!(wall.map(|w| w.kind()), Some(SubSelectionKind::SpritesWall));
    }

    #[test]
    fn test_sprite_kind_mismatch() {
        let value = json!({"k": 3, "p": 50, "a": 0, "t": [0, 0, 1, 1]});
        assert!(matches!(
            MapElement::from_json(SubSelectionKind::SpritesFace, &value),
            Err(MapError::KindMismatch)
        ));
    }
}
