//! 仕分け結果の型定義
//!
//! - SortRecord: ファイル名の解析結果
//! - SortedApplicant: 仕分けに成功した応募者
//! - SortReport: 1回の実行で集計する3種類の結果

use serde::Serialize;

/// ファイル名の解析結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortRecord {
    /// 一致する食堂キーなし（元のファイル名を保持）
    Unsorted(String),
    Matched(ApplicantFile),
}

/// 食堂キーに一致したファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicantFile {
    /// 応募者名
    pub name: String,
    /// スケジュール調査ID
    pub survey_id: Option<u64>,
    pub hall_key: String,
}

/// 仕分け済みの応募者
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortedApplicant {
    pub name: String,
    pub survey_id: Option<u64>,
    pub hall_key: String,
    /// 調査PDFを保存できたか
    pub survey_saved: bool,
}

/// 数値セル（f64）で誤差なく書ける最大の調査番号
pub const MAX_EXACT_SURVEY_ID: u64 = 1 << 53;

impl SortedApplicant {
    /// ログに書く調査番号（IDなしは -1）
    ///
    /// `MAX_EXACT_SURVEY_ID` を超えるIDは数値にすると丸められるため `None`。
    pub fn survey_number(&self) -> Option<f64> {
        match self.survey_id {
            None => Some(-1.0),
            Some(id) if id <= MAX_EXACT_SURVEY_ID => Some(id as f64),
            Some(_) => None,
        }
    }
}

/// 途中で打ち切った理由
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AbortReason {
    /// 接続が切れた（未処理のファイル数）
    ConnectionLost { remaining: usize },
    /// ログインが切れた（未処理のファイル数）
    SessionExpired { remaining: usize },
}

impl AbortReason {
    pub fn remaining(&self) -> usize {
        match self {
            AbortReason::ConnectionLost { remaining } | AbortReason::SessionExpired { remaining } => {
                *remaining
            }
        }
    }
}

/// 1回の仕分け結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SortReport {
    pub sorted: Vec<SortedApplicant>,
    /// 食堂キーが見つからなかったファイル
    pub hall_not_found: Vec<String>,
    /// 移動先に同名ファイルがあったファイル
    pub duplicates: Vec<String>,
    pub aborted: Option<AbortReason>,
}

impl SortReport {
    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    /// 処理したファイル数（打ち切り後の未処理分は含まない）
    pub fn processed(&self) -> usize {
        self.sorted.len() + self.hall_not_found.len() + self.duplicates.len()
    }
}
