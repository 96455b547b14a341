// ============================================
// Undo/Redo History - Снимки истории на диске
// ============================================
// Снимок n хранит изменения, переводящие карту из состояния n-1 в n.
// Текущее состояние 0 = ни одного снимка.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::editor::core::{Result, TEMP_UNDOREDO_MAP_FOLDER_NAME};
use crate::editor::save::{JsonFile, MapFiles};

use super::state::UndoRedoState;

/// Формат файла снимка
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    states: Vec<UndoRedoState>,
}

/// Линейная история по картам
#[derive(Debug, Clone)]
pub struct UndoRedoHistory {
    maps_dir: PathBuf,
    states: HashMap<i32, i32>,
}

impl UndoRedoHistory {
    /// `maps_dir` - папка Maps проекта
    pub fn new(maps_dir: impl Into<PathBuf>) -> Self {
        Self {
            maps_dir: maps_dir.into(),
            states: HashMap::new(),
        }
    }

    pub fn current_state(&self, map_id: i32) -> i32 {
        self.states.get(&map_id).copied().unwrap_or(0)
    }

    pub fn temp_dir(&self, map_id: i32) -> PathBuf {
        self.maps_dir.join(MapFiles::map_name(map_id)).join(TEMP_UNDOREDO_MAP_FOLDER_NAME)
    }

    pub fn snapshot_path(&self, map_id: i32, state: i32) -> PathBuf {
        self.temp_dir(map_id).join(format!("{}.json", state))
    }

    /// Записать изменения как новый снимок, отбросить будущее после undo
    pub fn commit(&mut self, map_id: i32, pending: &mut Vec<UndoRedoState>) -> Result<()> {
        let state = self.current_state(map_id) + 1;
        let snapshot = Snapshot { states: std::mem::take(pending) };
        JsonFile::write(self.snapshot_path(map_id, state), &snapshot)?;
        self.states.insert(map_id, state);

        let mut next = state + 1;
        let mut dropped = 0;
        loop {
            let path = self.snapshot_path(map_id, next);
            if !path.is_file() {
                break;
            }
            JsonFile::delete(&path)?;
            next += 1;
            dropped += 1;
        }

        log::debug!(
            "Map {}: committed state {} ({} edits, {} redo states dropped)",
            map_id,
            state,
            snapshot.states.len(),
            dropped
        );
        Ok(())
    }

    /// Изменения текущего снимка; состояние уменьшается.
    /// На самом старом состоянии - пустой список.
    pub fn undo(&mut self, map_id: i32) -> Result<Vec<UndoRedoState>> {
        let state = self.current_state(map_id);
        if state <= 0 {
            log::debug!("Map {}: nothing to undo", map_id);
            return Ok(Vec::new());
        }
        match read_snapshot(&self.snapshot_path(map_id, state))? {
            Some(snapshot) => {
                self.states.insert(map_id, state - 1);
                Ok(snapshot.states)
            }
            None => {
                log::debug!("Map {}: snapshot {} missing, undo ignored", map_id, state);
                Ok(Vec::new())
            }
        }
    }

    /// Изменения следующего снимка; состояние увеличивается
    pub fn redo(&mut self, map_id: i32) -> Result<Vec<UndoRedoState>> {
        let state = self.current_state(map_id) + 1;
        match read_snapshot(&self.snapshot_path(map_id, state))? {
            Some(snapshot) => {
                self.states.insert(map_id, state);
                Ok(snapshot.states)
            }
            None => {
                log::debug!("Map {}: nothing to redo", map_id);
                Ok(Vec::new())
            }
        }
    }

    /// Удалить все снимки карты и сбросить состояние
    pub fn purge_history(&mut self, map_id: i32) -> Result<()> {
        JsonFile::delete_all_files(self.temp_dir(map_id))?;
        self.states.remove(&map_id);
        Ok(())
    }
}

fn read_snapshot(path: &Path) -> Result<Option<Snapshot>> {
    JsonFile::read(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::portion::{empty_prior, FloorDatas, MapElement, Position, TextureRect};

    fn edit(x: i32) -> Vec<UndoRedoState> {
        let floor = MapElement::Floor(FloorDatas::new(TextureRect::new(x, 0, 1, 1)));
        vec![UndoRedoState::new(empty_prior(), Some(&floor), Position::new(x, 0, 0).to_vec()).unwrap()]
    }

    #[test]
    fn test_linear_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = UndoRedoHistory::new(dir.path());

        let (a, b, c) = (edit(1), edit(2), edit(3));
        let mut pending = a.clone();
        history.commit(1, &mut pending).unwrap();
        assert!(pending.is_empty());
        history.commit(1, &mut b.clone()).unwrap();
        assert_eq!(history.current_state(1), 2);

        assert_eq!(history.undo(1).unwrap(), b);
        assert_eq!(history.current_state(1), 1);
        assert_eq!(history.redo(1).unwrap(), b);
        assert_eq!(history.current_state(1), 2);

        history.undo(1).unwrap();
        history.commit(1, &mut c.clone()).unwrap();
        assert_eq!(history.current_state(1), 2);
        assert!(history.redo(1).unwrap().is_empty());
        assert_eq!(history.undo(1).unwrap(), c);
        assert_eq!(history.undo(1).unwrap(), a);
        assert_eq!(history.current_state(1), 0);
    }

    #[test]
    fn test_commit_truncates_future() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = UndoRedoHistory::new(dir.path());
        for x in 0..4 {
            history.commit(2, &mut edit(x)).unwrap();
        }
        history.undo(2).unwrap();
        history.undo(2).unwrap();
        history.undo(2).unwrap();
        history.commit(2, &mut edit(9)).unwrap();

        assert!(history.snapshot_path(2, 2).is_file());
        assert!(!history.snapshot_path(2, 3).exists());
        assert!(!history.snapshot_path(2, 4).exists());
    }

    #[test]
    fn test_undo_at_floor_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = UndoRedoHistory::new(dir.path());
        for _ in 0..3 {
            assert!(history.undo(5).unwrap().is_empty());
            assert_eq!(history.current_state(5), 0);
        }
        assert!(history.redo(5).unwrap().is_empty());
        assert_eq!(history.current_state(5), 0);
    }

    #[test]
    fn test_corrupt_snapshot_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = UndoRedoHistory::new(dir.path());
        history.commit(1, &mut edit(1)).unwrap();
        std::fs::write(history.snapshot_path(1, 1), "{ broken").unwrap();
        assert!(history.undo(1).is_err());
        assert_eq!(history.current_state(1), 1);
    }

    #[test]
    fn test_purge_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = UndoRedoHistory::new(dir.path());
        history.commit(1, &mut edit(1)).unwrap();
        history.commit(3, &mut edit(1)).unwrap();
        history.purge_history(1).unwrap();
        assert!(!history.snapshot_path(1, 1).exists());
        assert_eq!(history.current_state(1), 0);
        assert!(history.snapshot_path(3, 1).is_file());
        assert_eq!(history.current_state(3), 1);
    }
}
