//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use applicant_organizer::error::OrganizerError;
use applicant_organizer::scanner;
use applicant_organizer::store::SettingsStore;
use organizer_common::{HallError, SaveError};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(matches!(result, Err(OrganizerError::FolderNotFound(_))));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path());

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.unwrap().is_empty());
}

/// 壊れた設定ファイル
#[test]
fn test_invalid_settings_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("save_info.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = SettingsStore::open(&path).unwrap();
    let err = store.load().unwrap_err();
    assert!(matches!(err, OrganizerError::InvalidSettings(_)));
    assert!(err.to_string().contains("save_info.json"));
}

/// OrganizerErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        OrganizerError::Config("テスト設定エラー".to_string()),
        OrganizerError::FolderNotFound("/path/to/folder".to_string()),
        OrganizerError::InvalidSettings("save_info.json".to_string()),
        OrganizerError::NoHalls,
        OrganizerError::NoConnection,
        OrganizerError::LoginFailed("タイムアウト".to_string()),
        OrganizerError::BrowserNotFound,
        OrganizerError::SurveyFetch("描画失敗".to_string()),
        OrganizerError::Prompt("中断".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 設定方法を案内するメッセージ
#[test]
fn test_browser_not_found_message() {
    let display = OrganizerError::BrowserNotFound.to_string();
    assert!(display.contains("ブラウザ"));
    assert!(display.contains("--set-browser"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: OrganizerError = io_err.into();

    assert!(matches!(err, OrganizerError::Io(_)));
    assert!(err.to_string().contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: OrganizerError = json_err.into();

    assert!(matches!(err, OrganizerError::JsonParse(_)));
}

/// 食堂の入力エラーは共通エラー経由で透過的に表示
#[test]
fn test_hall_error_is_transparent() {
    let err: OrganizerError = HallError::DuplicateKey.into();

    assert!(matches!(
        err,
        OrganizerError::Common(organizer_common::Error::Hall(HallError::DuplicateKey))
    ));
    assert!(err.to_string().contains("Key Phrase is already used!"));
}

/// 保存エラーの変換
#[test]
fn test_save_error_conversion() {
    let save_err = SaveError::Duplicates {
        key_rows: vec![0, 2],
        folder_rows: vec![],
    };
    let err: OrganizerError = save_err.into();

    assert!(matches!(
        err,
        OrganizerError::Common(organizer_common::Error::Save(_))
    ));
    assert!(err.to_string().contains("must be unique"));
}
