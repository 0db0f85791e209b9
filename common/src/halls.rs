//! 食堂設定テーブル
//!
//! JSON上は `{ "食堂名": ["キーフレーズ", "フォルダ名"], ... }` の平坦なマップ。
//! 読み込み順・保存順はファイル上の順序を保つ（キー照合は先頭優先のため）。

use crate::validator::{validate_new_hall, validate_rows, HallError, SaveError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 食堂1件分の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HallSetting {
    pub name: String,
    /// ファイル名末尾で食堂を識別するフレーズ
    pub key: String,
    /// 出力先フォルダ名
    pub folder: String,
}

impl HallSetting {
    pub fn new(name: impl Into<String>, key: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            folder: folder.into(),
        }
    }

    fn trimmed(&self) -> Self {
        Self::new(self.name.trim(), self.key.trim(), self.folder.trim())
    }
}

/// 保存済みの食堂設定
///
/// `serde_json` の `preserve_order` でファイル上の順序を保つ。同名は後勝ち（位置は最初の出現）。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct HallTable {
    halls: Vec<HallSetting>,
}

impl HallTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 行を検証してテーブルを作成
    pub fn from_rows(rows: Vec<HallSetting>) -> Result<Self, SaveError> {
        validate_rows(&rows)?;
        Ok(Self {
            halls: rows.iter().map(HallSetting::trimmed).collect(),
        })
    }

    pub fn rows(&self) -> &[HallSetting] {
        &self.halls
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HallSetting> {
        self.halls.iter()
    }

    pub fn len(&self) -> usize {
        self.halls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.halls.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&HallSetting> {
        self.halls.iter().find(|h| h.name == name)
    }

    /// キーフレーズ一覧（テーブル順）
    pub fn keys(&self) -> Vec<&str> {
        self.halls.iter().map(|h| h.key.as_str()).collect()
    }

    /// フォルダ名一覧（テーブル順）
    pub fn folders(&self) -> Vec<&str> {
        self.halls.iter().map(|h| h.folder.as_str()).collect()
    }

    /// キーフレーズに対応する出力フォルダ名
    pub fn folder_for_key(&self, key: &str) -> Option<&str> {
        self.halls
            .iter()
            .find(|h| h.key == key)
            .map(|h| h.folder.as_str())
    }

    /// 検証したうえで食堂を追加
    pub fn add(&mut self, name: &str, key: &str, folder: &str) -> Result<&HallSetting, HallError> {
        let hall = validate_new_hall(&self.halls, name, key, folder)?;
        self.halls.push(hall);
        Ok(&self.halls[self.halls.len() - 1])
    }

    pub fn remove(&mut self, name: &str) -> Option<HallSetting> {
        let idx = self.halls.iter().position(|h| h.name == name)?;
        Some(self.halls.remove(idx))
    }
}

impl<'a> IntoIterator for &'a HallTable {
    type Item = &'a HallSetting;
    type IntoIter = std::slice::Iter<'a, HallSetting>;

    fn into_iter(self) -> Self::IntoIter {
        self.halls.iter()
    }
}

impl TryFrom<Map<String, Value>> for HallTable {
    type Error = serde_json::Error;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let halls = map
            .into_iter()
            .map(|(name, value)| {
                let (key, folder): (String, String) = serde_json::from_value(value)?;
                Ok(HallSetting { name, key, folder })
            })
            .collect::<Result<_, serde_json::Error>>()?;
        Ok(Self { halls })
    }
}

impl From<HallTable> for Map<String, Value> {
    fn from(table: HallTable) -> Self {
        table
            .halls
            .into_iter()
            .map(|h| (h.name, Value::from(vec![h.key, h.folder])))
            .collect()
    }
}

/// 設定画面の作業コピー
///
/// 追加・編集・削除は作業コピーにのみ反映され、`save` が成功するまで
/// 保存済みテーブルは変わらない。
#[derive(Debug, Clone)]
pub struct HallEditor {
    saved: HallTable,
    working: Vec<HallSetting>,
}

impl HallEditor {
    pub fn new(saved: HallTable) -> Self {
        let working = saved.halls.clone();
        Self { saved, working }
    }

    pub fn saved(&self) -> &HallTable {
        &self.saved
    }

    /// 作業コピーの行
    pub fn rows(&self) -> &[HallSetting] {
        &self.working
    }

    pub fn is_dirty(&self) -> bool {
        self.working != self.saved.halls
    }

    /// 作業コピーに対して検証して追加
    pub fn add(&mut self, name: &str, key: &str, folder: &str) -> Result<(), HallError> {
        let hall = validate_new_hall(&self.working, name, key, folder)?;
        self.working.push(hall);
        Ok(())
    }

    /// キー・フォルダ名を書き換える（検証は保存時）
    pub fn edit(
        &mut self,
        name: &str,
        key: Option<&str>,
        folder: Option<&str>,
    ) -> Result<(), HallError> {
        let row = self
            .working
            .iter_mut()
            .find(|h| h.name == name)
            .ok_or_else(|| HallError::NotFound(name.to_string()))?;
        if let Some(key) = key {
            row.key = key.to_string();
        }
        if let Some(folder) = folder {
            row.folder = folder.to_string();
        }
        Ok(())
    }

    pub fn delete(&mut self, name: &str) -> Result<HallSetting, HallError> {
        let idx = self
            .working
            .iter()
            .position(|h| h.name == name)
            .ok_or_else(|| HallError::NotFound(name.to_string()))?;
        Ok(self.working.remove(idx))
    }

    /// 作業コピーを検証して確定。失敗時は何も変わらない
    pub fn save(&mut self) -> Result<&HallTable, SaveError> {
        let table = HallTable::from_rows(self.working.clone())?;
        self.working = table.halls.clone();
        self.saved = table;
        Ok(&self.saved)
    }

    /// 作業コピーを保存済みの状態に戻す
    pub fn discard(&mut self) {
        self.working = self.saved.halls.clone();
    }
}
