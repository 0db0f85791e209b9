//! 仕分けパイプライン
//!
//! 入力フォルダのPDFをファイル名順に1件ずつ処理する:
//! 1. ファイル名を解析（食堂キーなし → 食堂不明リスト）
//! 2. `<出力>/<食堂フォルダ>/<氏名>/<氏名> Hiring Documents.pdf` へ移動
//!    （同名ファイルがあれば重複リストに入れて元の場所に残す）
//! 3. 調査番号があれば `<氏名> Scheduling Survey.pdf` を取得
//!
//! 各ファイルの前に接続を確認し、切れていたら残りを処理せず打ち切る。
//! 調査ページがサインイン画面になった場合も残りを打ち切る。

use crate::browser::SurveyFetcher;
use crate::error::{OrganizerError, Result};
use crate::export;
use crate::network::Connectivity;
use crate::scanner::{self, PdfFile};
use chrono::{DateTime, Local};
use indicatif::ProgressBar;
use organizer_common::{
    parse_filename, AbortReason, ApplicantFile, HallTable, SortRecord, SortReport,
    SortedApplicant,
};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct SortOptions {
    /// 応募者がいない食堂のフォルダも作成
    pub create_all_folders: bool,
    /// ファイルごとに接続を確認
    pub check_connection: bool,
}

pub fn hiring_documents_name(name: &str) -> String {
    format!("{} Hiring Documents.pdf", name)
}

pub fn scheduling_survey_name(name: &str) -> String {
    format!("{} Scheduling Survey.pdf", name)
}

/// 1回の実行結果
#[derive(Debug, Clone)]
pub struct SortRun {
    pub report: SortReport,
    /// 出力したログ（出力しない設定なら None）
    pub log_path: Option<PathBuf>,
}

/// 接続確認・ログイン・仕分け・ログ出力を順に行う
///
/// 開始時に接続がない、またはログインできない場合はファイルに触れずにエラーを返す。
/// `log_time` が `Some` ならその時刻の名前で出力フォルダにログを書く
/// （途中で打ち切った場合も処理済みの分を書く）。
#[allow(clippy::too_many_arguments)]
pub async fn run_sort<C, F>(
    source: &Path,
    dest: &Path,
    halls: &HallTable,
    options: SortOptions,
    connectivity: &C,
    mut fetcher: Option<&mut F>,
    log_time: Option<DateTime<Local>>,
    progress: &ProgressBar,
) -> Result<SortRun>
where
    C: Connectivity,
    F: SurveyFetcher,
{
    for folder in [source, dest] {
        if !folder.is_dir() {
            return Err(OrganizerError::FolderNotFound(folder.display().to_string()));
        }
    }

    // 1. 接続確認・ログイン
    println!("[1/3] 接続確認・ログイン...");
    if options.check_connection && !connectivity.is_connected().await {
        return Err(OrganizerError::NoConnection);
    }
    match fetcher.as_deref_mut() {
        Some(fetcher) => {
            fetcher.ensure_login().await?;
            println!("✔ ログイン済み\n");
        }
        None => println!("- 調査PDFは取得しません\n"),
    }

    // 2. 仕分け
    println!("[2/3] 仕分け中...");
    let report = sort_folder(source, dest, halls, options, connectivity, fetcher, progress).await?;
    progress.finish_and_clear();
    println!();

    // 3. ログ
    let log_path = match log_time {
        Some(now) => {
            println!("[3/3] ログを出力中...");
            Some(export::write_log(&report, dest, &now)?)
        }
        None => {
            println!("[3/3] ログ出力なし");
            None
        }
    };

    Ok(SortRun { report, log_path })
}

/// 入力フォルダを仕分ける
///
/// `fetcher` が `None` の場合は調査PDFを取得しない。
pub async fn sort_folder<C, F>(
    source: &Path,
    dest: &Path,
    halls: &HallTable,
    options: SortOptions,
    connectivity: &C,
    mut fetcher: Option<&mut F>,
    progress: &ProgressBar,
) -> Result<SortReport>
where
    C: Connectivity,
    F: SurveyFetcher,
{
    if !dest.is_dir() {
        return Err(OrganizerError::FolderNotFound(dest.display().to_string()));
    }
    let files = scanner::scan_folder(source)?;
    let keys = halls.keys();

    if options.create_all_folders {
        for folder in halls.folders() {
            std::fs::create_dir_all(dest.join(folder))?;
        }
    }

    progress.set_length(files.len() as u64);
    let mut report = SortReport::default();

    for (idx, file) in files.iter().enumerate() {
        if options.check_connection && !connectivity.is_connected().await {
            let remaining = files.len() - idx;
            tracing::warn!(remaining, "接続が切れたため仕分けを中断");
            report.aborted = Some(AbortReason::ConnectionLost { remaining });
            break;
        }

        progress.set_message(file.file_name.clone());

        match parse_filename(&file.file_name, &keys) {
            SortRecord::Unsorted(name) => {
                tracing::debug!(file = %name, "食堂キーなし");
                report.hall_not_found.push(name);
            }
            SortRecord::Matched(applicant) => {
                let Some(folder) = halls.folder_for_key(&applicant.hall_key) else {
                    report.hall_not_found.push(file.file_name.clone());
                    progress.inc(1);
                    continue;
                };
                let applicant_dir = dest.join(folder).join(&applicant.name);

                match move_into(file, &applicant_dir, &applicant) {
                    Ok(()) => {
                        let mut session_lost = false;
                        let survey_saved = match (applicant.survey_id, fetcher.as_deref_mut()) {
                            (Some(id), Some(fetcher)) => {
                                match fetch_survey(fetcher, id, &applicant_dir, &applicant.name).await {
                                    Ok(saved) => saved,
                                    Err(e) => {
                                        tracing::warn!(survey_id = id, error = %e, "ログインが切れたため仕分けを中断");
                                        session_lost = true;
                                        false
                                    }
                                }
                            }
                            _ => false,
                        };
                        report.sorted.push(SortedApplicant {
                            name: applicant.name,
                            survey_id: applicant.survey_id,
                            hall_key: applicant.hall_key,
                            survey_saved,
                        });
                        if session_lost {
                            progress.inc(1);
                            let remaining = files.len() - idx - 1;
                            report.aborted = Some(AbortReason::SessionExpired { remaining });
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(file = %file.file_name, error = %e, "移動できないため重複として記録");
                        report.duplicates.push(file.file_name.clone());
                    }
                }
            }
        }

        progress.inc(1);
    }

    Ok(report)
}

/// 応募者フォルダを作成して書類を移動（同名ファイルは上書きしない）
fn move_into(file: &PdfFile, applicant_dir: &Path, applicant: &ApplicantFile) -> Result<()> {
    std::fs::create_dir_all(applicant_dir)?;

    let target = applicant_dir.join(hiring_documents_name(&applicant.name));
    if target.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} は既に存在します", target.display()),
        )
        .into());
    }

    move_file(&file.path, &target)?;
    tracing::debug!(from = %file.path.display(), to = %target.display(), "移動");
    Ok(())
}

/// rename できない場合（別ドライブ等）はコピーして削除
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::debug!(error = %e, "rename 失敗、コピーで移動");
            std::fs::copy(from, to)?;
            std::fs::remove_file(from)
        }
    }
}

/// 保存できたら true。ログイン切れだけはエラーとして返す
async fn fetch_survey<F: SurveyFetcher>(
    fetcher: &mut F,
    survey_id: u64,
    applicant_dir: &Path,
    name: &str,
) -> Result<bool> {
    let save_path: PathBuf = applicant_dir.join(scheduling_survey_name(name));
    match fetcher.fetch_survey(survey_id, &save_path).await {
        Ok(()) => Ok(true),
        Err(e @ OrganizerError::LoginFailed(_)) => Err(e),
        Err(e) => {
            tracing::warn!(survey_id, error = %e, "調査PDFを取得できませんでした");
            Ok(false)
        }
    }
}
