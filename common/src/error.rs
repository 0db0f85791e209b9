//! エラー型定義

use crate::validator::{HallError, SaveError};
use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hall error: {0}")]
    Hall(#[from] HallError),

    #[error("Save error: {0}")]
    Save(#[from] SaveError),

    #[error("Excel error: {0}")]
    Excel(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_from_hall_error() {
        let error: Error = HallError::DuplicateKey.into();
        assert!(matches!(error, Error::Hall(HallError::DuplicateKey)));
        assert_eq!(format!("{}", error), "Hall error: Key Phrase is already used!");
    }

    #[test]
    fn test_error_from_save_error() {
        let error: Error = SaveError::EmptyFolder { row: 2 }.into();
        assert!(matches!(error, Error::Save(_)));
        assert!(format!("{}", error).contains("row 3"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Excel("シート追加失敗".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Excel"));
        assert!(debug.contains("シート追加失敗"));
    }
}
