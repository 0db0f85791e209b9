//! ファイル名パーサー
//!
//! `(氏名) (調査番号) (食堂キー).pdf` 形式のファイル名を分解する。
//! 調査番号は省略可能。複数のキーや数字が当てはまる場合は最初の一致を使う。

use crate::types::{ApplicantFile, SortRecord};
use regex::Regex;

lazy_static::lazy_static! {
    // 前後を空白で区切られた数字
    static ref SURVEY_ID_RE: Regex = Regex::new(r"\s+(\d+)\s+").unwrap();
}

/// 拡張子を除いて前後の空白を落とす
pub fn strip_extension(filename: &str) -> &str {
    let stem = match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    };
    stem.trim()
}

/// ファイル名を解析する
///
/// # Arguments
/// * `filename` - 拡張子付きのファイル名
/// * `keys` - 食堂キーフレーズ（テーブル順、先頭優先）
///
/// # Returns
/// * `SortRecord::Unsorted` - 末尾に一致するキーがない、または氏名が空
/// * `SortRecord::Matched` - 氏名・調査番号（あれば）・一致したキー
///
/// # Examples
/// ```
/// use organizer_common::{parse_filename, SortRecord};
///
/// match parse_filename("John Doe 123 Main.pdf", &["Main"]) {
///     SortRecord::Matched(file) => {
///         assert_eq!(file.name, "John Doe");
///         assert_eq!(file.survey_id, Some(123));
///         assert_eq!(file.hall_key, "Main");
///     }
///     SortRecord::Unsorted(_) => unreachable!(),
/// }
/// ```
pub fn parse_filename<S: AsRef<str>>(filename: &str, keys: &[S]) -> SortRecord {
    let stem = strip_extension(filename);

    let Some(key) = keys
        .iter()
        .map(AsRef::as_ref)
        .find(|k| !k.is_empty() && stem.ends_with(k))
    else {
        return SortRecord::Unsorted(filename.to_string());
    };

    let (name, survey_id) = match find_survey_id(stem) {
        Some((start, id)) => (stem[..start].trim(), Some(id)),
        None => (stem[..stem.len() - key.len()].trim(), None),
    };

    if name.is_empty() {
        return SortRecord::Unsorted(filename.to_string());
    }

    SortRecord::Matched(ApplicantFile {
        name: name.to_string(),
        survey_id,
        hall_key: key.to_string(),
    })
}

/// 最初の調査番号と、その直前の空白の開始位置
fn find_survey_id(stem: &str) -> Option<(usize, u64)> {
    let caps = SURVEY_ID_RE.captures(stem)?;
    let whole = caps.get(0)?;
    // u64 に収まらない番号は調査番号なしとして扱う
    let id = caps.get(1)?.as_str().parse().ok()?;
    Some((whole.start(), id))
}
