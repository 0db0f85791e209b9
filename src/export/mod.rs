//! 仕分けログの書き出し

use crate::error::Result;
use chrono::{DateTime, Local};
use organizer_common::{generate_log, SortReport};
use std::path::{Path, PathBuf};

/// 実行日時からログファイル名を作る（例: 2026-10-16-09-30-00.xlsx）
pub fn log_file_name(now: &DateTime<Local>) -> String {
    format!("{}.xlsx", now.format("%Y-%m-%d-%H-%M-%S"))
}

/// 出力フォルダにログを書き出し、そのパスを返す
pub fn write_log(report: &SortReport, output_dir: &Path, now: &DateTime<Local>) -> Result<PathBuf> {
    let output_path = output_dir.join(log_file_name(now));
    generate_log(report, &output_path)?;
    tracing::info!(path = %output_path.display(), "ログを出力");
    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_log_file_name() {
        let now = Local.with_ymd_and_hms(2026, 1, 18, 9, 5, 7).unwrap();
        assert_eq!(log_file_name(&now), "2026-01-18-09-05-07.xlsx");
    }

    #[test]
    fn test_write_log_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let now = Local.with_ymd_and_hms(2026, 1, 18, 9, 5, 7).unwrap();
        let path = write_log(&SortReport::default(), dir.path(), &now).unwrap();
        assert_eq!(path, dir.path().join("2026-01-18-09-05-07.xlsx"));
        assert!(path.exists());
    }
}
