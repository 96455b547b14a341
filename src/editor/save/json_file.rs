// ============================================
// Json File - Чтение и запись JSON файлов
// ============================================

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::editor::core::Result;

/// Файловые операции над JSON документами
pub struct JsonFile;

impl JsonFile {
    /// Прочитать документ; отсутствующий файл = None
    pub fn read<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Option<T>> {
        let file = match File::open(path.as_ref()) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(value))
    }

    /// Записать документ, родительские папки создаются
    pub fn write<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, value)?;
        writer.flush()?;
        Ok(())
    }

    /// Удалить файл, если он есть
    pub fn delete(path: impl AsRef<Path>) -> Result<()> {
        match fs::remove_file(path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }

    /// Удалить все файлы папки (вложенные папки не трогаются)
    pub fn delete_all_files(dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Ok(());
        }
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    /// Скопировать все файлы из `src` в `dst` с перезаписью
    pub fn copy_all_files(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<()> {
        let (src, dst) = (src.as_ref(), dst.as_ref());
        if !src.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(dst)?;
        for entry in fs::read_dir(src)? {
            let path = entry?.path();
            if let (true, Some(name)) = (path.is_file(), path.file_name()) {
                fs::copy(&path, dst.join(name))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let value: Option<Value> = JsonFile::read(dir.path().join("nope.json")).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.json");
        JsonFile::write(&path, &json!({"x": 1})).unwrap();
        let back: Option<Value> = JsonFile::read(&path).unwrap();
        assert_eq!(back, Some(json!({"x": 1})));
    }

    #[test]
    fn test_copy_then_delete_all() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("temp");
        JsonFile::write(src.join("0_0_0.json"), &json!({})).unwrap();
        JsonFile::write(src.join("objects.json"), &json!({"objs": []})).unwrap();
        fs::create_dir_all(src.join("nested")).unwrap();

        JsonFile::copy_all_files(&src, dir.path()).unwrap();
        assert!(dir.path().join("0_0_0.json").is_file());
        assert!(dir.path().join("objects.json").is_file());

        JsonFile::delete_all_files(&src).unwrap();
        assert_eq!(fs::read_dir(&src).unwrap().count(), 1);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(JsonFile::read::<Value>(&path).is_err());
    }
}
