//! 食堂設定ファイルの読み書き
//!
//! 保存先は一時ディレクトリ配下の固定パス
//! `<tmp>/FileOrganizerUserInfo/save_info.json`。存在しなければ `{}` で作成する。

use crate::error::{OrganizerError, Result};
use organizer_common::HallTable;
use serde::Serialize;
use std::path::{Path, PathBuf};

const SAVE_FOLDER: &str = "FileOrganizerUserInfo";
const SAVE_FILE: &str = "save_info.json";

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn default_path() -> PathBuf {
        std::env::temp_dir().join(SAVE_FOLDER).join(SAVE_FILE)
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path())
    }

    /// 設定ファイルを開く（なければ空のテーブルで作成）
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { path: path.into() };
        if !store.path.exists() {
            if let Some(parent) = store.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            store.save(&HallTable::new())?;
            tracing::debug!(path = %store.path.display(), "設定ファイルを作成");
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<HallTable> {
        let content = std::fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| {
            OrganizerError::InvalidSettings(format!("{}: {}", self.path.display(), e))
        })
    }

    /// 4スペースインデントで保存
    pub fn save(&self, table: &HallTable) -> Result<()> {
        let mut buffer = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        table.serialize(&mut serializer)?;
        std::fs::write(&self.path, buffer)?;
        Ok(())
    }
}
