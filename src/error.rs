use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("設定ファイルが不正: {0}")]
    InvalidSettings(String),

    #[error("食堂が登録されていません。`applicant-organizer halls add` で追加してください")]
    NoHalls,

    #[error("ネットワークに接続できません。接続を確認してから再実行してください")]
    NoConnection,

    #[error("ログインに失敗しました: {0}")]
    LoginFailed(String),

    #[error("ブラウザが見つかりません。`applicant-organizer config --set-browser PATH` で設定してください")]
    BrowserNotFound,

    #[error("調査PDFの取得に失敗: {0}")]
    SurveyFetch(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] organizer_common::Error),
}

impl From<organizer_common::HallError> for OrganizerError {
    fn from(e: organizer_common::HallError) -> Self {
        OrganizerError::Common(e.into())
    }
}

impl From<organizer_common::SaveError> for OrganizerError {
    fn from(e: organizer_common::SaveError) -> Self {
        OrganizerError::Common(e.into())
    }
}

pub type Result<T> = std::result::Result<T, OrganizerError>;
