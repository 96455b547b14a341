// ============================================
// Map Error - Ошибки редактора
// ============================================

use std::fmt;

/// Ошибки загрузки/сохранения карты и истории
#[derive(Debug)]
pub enum MapError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Image(image::ImageError),
    /// Неизвестный код SubSelectionKind
    UnknownKind(i32),
    /// Массив позиции неверной длины
    InvalidPosition(usize),
    /// Элемент не соответствует ожидаемому виду
    KindMismatch,
}

pub type Result<T> = std::result::Result<T, MapError>;

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io(e) => write!(f, "io error: {}", e),
            MapError::Json(e) => write!(f, "json error: {}", e),
            MapError::Image(e) => write!(f, "image error: {}", e),
            MapError::UnknownKind(k) => write!(f, "unknown sub-selection kind {}", k),
            MapError::InvalidPosition(len) => write!(f, "invalid position array of length {}", len),
            MapError::KindMismatch => write!(f, "element does not match its kind"),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io(e) => Some(e),
            MapError::Json(e) => Some(e),
            MapError::Image(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MapError {
    fn from(e: std::io::Error) -> Self {
        MapError::Io(e)
    }
}

impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        MapError::Json(e)
    }
}

impl From<image::ImageError> for MapError {
    fn from(e: image::ImageError) -> Self {
        MapError::Image(e)
    }
}
