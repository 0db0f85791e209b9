//! 食堂設定の入力検証
//!
//! - 新規追加時: 名前 → キーフレーズ → フォルダ名の順に検査し、最初の失敗を返す
//! - 保存時: 全行を検査し、重複はすべての該当行を報告する

use crate::halls::HallSetting;
use std::collections::HashMap;
use thiserror::Error;

/// ファイル名・フォルダ名に使えない文字
pub const ILLEGAL_CHARS: &str = "<>:\"/\\|?!*";

/// 検証対象の列（ハイライト表示用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HallField {
    Name,
    Key,
    Folder,
}

/// 新規追加・単体編集時のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HallError {
    #[error("Name cannot be empty!")]
    EmptyName,

    #[error("Name is already used!")]
    DuplicateName,

    #[error("Key Phrase cannot be empty!")]
    EmptyKey,

    #[error("Key Phrase contains illegal characters!")]
    IllegalKey,

    #[error("Key Phrase is already used!")]
    DuplicateKey,

    #[error("Folder Name cannot be empty!")]
    EmptyFolder,

    #[error("Folder Name contains illegal characters!")]
    IllegalFolder,

    #[error("Folder Name is already used!")]
    DuplicateFolder,

    #[error("Hall not found: {0}")]
    NotFound(String),
}

impl HallError {
    /// エラーの原因となった列
    pub fn field(&self) -> HallField {
        match self {
            HallError::EmptyName | HallError::DuplicateName | HallError::NotFound(_) => {
                HallField::Name
            }
            HallError::EmptyKey | HallError::IllegalKey | HallError::DuplicateKey => HallField::Key,
            HallError::EmptyFolder | HallError::IllegalFolder | HallError::DuplicateFolder => {
                HallField::Folder
            }
        }
    }
}

/// 保存時のエラー（行番号は0始まり）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    #[error("row {}: Key Phrase cannot be empty!", .row + 1)]
    EmptyKey { row: usize },

    #[error("row {}: Key Phrase cannot contain illegal characters!", .row + 1)]
    IllegalKey { row: usize },

    #[error("row {}: Folder Name cannot be empty!", .row + 1)]
    EmptyFolder { row: usize },

    #[error("row {}: Folder Name cannot contain illegal characters!", .row + 1)]
    IllegalFolder { row: usize },

    #[error("Key Phrases and Folder Names must be unique!")]
    Duplicates {
        key_rows: Vec<usize>,
        folder_rows: Vec<usize>,
    },
}

impl SaveError {
    /// ハイライトすべき (行, 列) の一覧
    pub fn offending_cells(&self) -> Vec<(usize, HallField)> {
        match self {
            SaveError::EmptyKey { row } | SaveError::IllegalKey { row } => {
                vec![(*row, HallField::Key)]
            }
            SaveError::EmptyFolder { row } | SaveError::IllegalFolder { row } => {
                vec![(*row, HallField::Folder)]
            }
            SaveError::Duplicates { key_rows, folder_rows } => key_rows
                .iter()
                .map(|&r| (r, HallField::Key))
                .chain(folder_rows.iter().map(|&r| (r, HallField::Folder)))
                .collect(),
        }
    }
}

/// 使用禁止文字を含まないか
pub fn validate_chars(value: &str) -> bool {
    !value.chars().any(|c| ILLEGAL_CHARS.contains(c))
}

/// 既存の値と重複しないか（完全一致で比較）
pub fn validate_unique<'a, I>(value: &str, existing: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    !existing.into_iter().any(|e| e == value)
}

/// 新しい食堂を検証し、前後の空白を除いた設定を返す
///
/// 検査順: 名前(空) → 名前(重複) → キー(空) → キー(文字) → キー(重複)
/// → フォルダ(空) → フォルダ(文字) → フォルダ(重複)
pub fn validate_new_hall(
    current: &[HallSetting],
    name: &str,
    key: &str,
    folder: &str,
) -> Result<HallSetting, HallError> {
    let name = name.trim();
    let key = key.trim();
    let folder = folder.trim();

    if name.is_empty() {
        return Err(HallError::EmptyName);
    }
    if !validate_unique(name, current.iter().map(|h| h.name.as_str())) {
        return Err(HallError::DuplicateName);
    }
    if key.is_empty() {
        return Err(HallError::EmptyKey);
    }
    if !validate_chars(key) {
        return Err(HallError::IllegalKey);
    }
    if !validate_unique(key, current.iter().map(|h| h.key.as_str())) {
        return Err(HallError::DuplicateKey);
    }
    if folder.is_empty() {
        return Err(HallError::EmptyFolder);
    }
    if !validate_chars(folder) {
        return Err(HallError::IllegalFolder);
    }
    if !validate_unique(folder, current.iter().map(|h| h.folder.as_str())) {
        return Err(HallError::DuplicateFolder);
    }

    Ok(HallSetting::new(name, key, folder))
}

/// 保存前に全行を検証
///
/// 空欄・禁止文字は最初に見つかった行で即座に失敗する。
/// それを通過した場合、キーまたはフォルダ名が他の行と重複する行をすべて集める。
pub fn validate_rows(rows: &[HallSetting]) -> Result<(), SaveError> {
    for (row, hall) in rows.iter().enumerate() {
        let key = hall.key.trim();
        let folder = hall.folder.trim();

        if key.is_empty() {
            return Err(SaveError::EmptyKey { row });
        }
        if !validate_chars(key) {
            return Err(SaveError::IllegalKey { row });
        }
        if folder.is_empty() {
            return Err(SaveError::EmptyFolder { row });
        }
        if !validate_chars(folder) {
            return Err(SaveError::IllegalFolder { row });
        }
    }

    let key_rows = duplicate_rows(rows.iter().map(|h| h.key.trim()));
    let folder_rows = duplicate_rows(rows.iter().map(|h| h.folder.trim()));

    if key_rows.is_empty() && folder_rows.is_empty() {
        Ok(())
    } else {
        Err(SaveError::Duplicates { key_rows, folder_rows })
    }
}

/// 他の行と値が重複している行番号（昇順）
fn duplicate_rows<'a, I>(values: I) -> Vec<usize>
where
    I: Iterator<Item = &'a str>,
{
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, value) in values.enumerate() {
        groups.entry(value).or_default().push(idx);
    }

    let mut rows: Vec<usize> = groups
        .into_values()
        .filter(|idxs| idxs.len() > 1)
        .flatten()
        .collect();
    rows.sort_unstable();
    rows
}
