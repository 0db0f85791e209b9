//! Applicant Organizer Common Library
//!
//! UIから切り離した純粋なロジック（食堂設定の検証・ファイル名解析・ログ生成）

pub mod types;
pub mod error;
pub mod validator;
pub mod halls;
pub mod parser;
pub mod export;

pub use types::{
    AbortReason, ApplicantFile, SortRecord, SortReport, SortedApplicant, MAX_EXACT_SURVEY_ID,
};
pub use error::{Error, Result};
pub use validator::{
    validate_chars, validate_new_hall, validate_rows, validate_unique, HallError, HallField,
    SaveError, ILLEGAL_CHARS,
};
pub use halls::{HallEditor, HallSetting, HallTable};
pub use parser::{parse_filename, strip_extension};
#[cfg(feature = "excel")]
pub use export::log_book::{generate_log, generate_log_buffer};
