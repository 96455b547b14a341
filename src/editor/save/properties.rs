// ============================================
// Map Properties - Свойства карты (infos.json)
// ============================================

use std::io;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::editor::core::{Result, FILE_MAP_INFOS};
use crate::editor::portion::{GridPosition, Portion, Position};

use super::json_file::JsonFile;

/// Размеры карты в клетках и ссылка на тайлсет
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapProperties {
    pub id: i32,
    pub name: String,
    #[serde(rename = "tileset")]
    pub tileset_id: i32,
    #[serde(rename = "l")]
    pub length: i32,
    #[serde(rename = "w")]
    pub width: i32,
    #[serde(rename = "h")]
    pub height: i32,
    #[serde(rename = "d")]
    pub depth: i32,
}

impl Default for MapProperties {
    fn default() -> Self {
        Self {
            id: 1,
            name: "MAP0001".to_string(),
            tileset_id: 1,
            length: 16,
            width: 16,
            height: 16,
            depth: 0,
        }
    }
}

impl MapProperties {
    /// Имя папки карты
    pub fn real_name(&self) -> String {
        format!("MAP{:04}", self.id)
    }

    /// Клетка внутри карты: x в [0, l), z в [0, w), y в [-d, h)
    pub fn is_in_grid(&self, position: &Position) -> bool {
        position.x >= 0
            && position.x < self.length
            && position.z >= 0
            && position.z < self.width
            && position.y >= -self.depth
            && position.y < self.height
    }

    /// Узлы отрезка стены лежат на сетке карты (включая дальний край)
    pub fn is_wall_in_grid(&self, position: &GridPosition) -> bool {
        let in_x = |x: i32| (0..=self.length).contains(&x);
        let in_z = |z: i32| (0..=self.width).contains(&z);
        in_x(position.x1)
            && in_x(position.x2)
            && in_z(position.z1)
            && in_z(position.z2)
            && position.y >= -self.depth
            && position.y < self.height
    }

    /// Порция стены. Узел на дальнем краю карты (x = l или z = w)
    /// относится к последней порции по этой оси.
    pub fn wall_portion(&self, position: &GridPosition, portion_size: i32) -> Portion {
        let node = GridPosition {
            x1: if position.x1 == self.length { position.x1 - 1 } else { position.x1 },
            z1: if position.z1 == self.width { position.z1 - 1 } else { position.z1 },
            ..*position
        };
        node.global_portion(portion_size)
    }

    /// Диапазоны индексов порций по осям x, y, z.
    /// Порции глубины имеют отрицательный индекс y.
    pub fn portions_range(&self, portion_size: i32) -> [RangeInclusive<i32>; 3] {
        let ps = portion_size;
        [
            0..=(self.length - 1).div_euclid(ps),
            -((self.depth + ps - 1) / ps)..=(self.height - 1).div_euclid(ps),
            0..=(self.width - 1).div_euclid(ps),
        ]
    }

    pub fn is_portion_in_grid(&self, portion: &Portion, portion_size: i32) -> bool {
        let [x, y, z] = self.portions_range(portion_size);
        x.contains(&portion.x) && y.contains(&portion.y) && z.contains(&portion.z)
    }

    /// Все порции карты
    pub fn portions(&self, portion_size: i32) -> impl Iterator<Item = Portion> {
        let [xs, ys, zs] = self.portions_range(portion_size);
        xs.flat_map(move |x| {
            let zs = zs.clone();
            ys.clone().flat_map(move |y| zs.clone().map(move |z| Portion::new(x, y, z)))
        })
    }

    pub fn load(map_dir: &Path) -> Result<Self> {
        let path = map_dir.join(FILE_MAP_INFOS);
        JsonFile::read(&path)?.ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no map infos at {}", path.display())).into()
        })
    }

    pub fn save(&self, map_dir: &Path) -> Result<()> {
        JsonFile::write(map_dir.join(FILE_MAP_INFOS), self)
    }
}
