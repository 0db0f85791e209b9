//! ブラウザセッション
//!
//! Chromium系ブラウザをコマンドラインで起動して調査ページをPDF化する。
//! ログインCookieは専用プロファイルに保持し、全ファイルで同じセッションを使い回す。
//! ログイン状態はフォームを実際に開いて確認する（サインイン画面に飛ばされたら未ログイン）。

use crate::config::Config;
use crate::error::{OrganizerError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

/// PATH 上で探すブラウザ実行ファイル名
const BROWSER_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
    "msedge",
];

/// 調査番号から調査PDFを保存する
#[allow(async_fn_in_trait)]
pub trait SurveyFetcher {
    /// ログイン済みか確認し、切れていればログインさせる
    ///
    /// ログインできなければ `LoginFailed`。
    async fn ensure_login(&mut self) -> Result<()>;

    /// セッションが切れていた場合は `LoginFailed` を返す
    async fn fetch_survey(&mut self, survey_id: u64, save_path: &Path) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct BrowserSession {
    browser: PathBuf,
    profile_dir: PathBuf,
    config: Config,
    fetched: usize,
}

impl BrowserSession {
    pub fn from_config(config: &Config) -> Result<Self> {
        let browser = match &config.browser {
            Some(path) => path.clone(),
            None => find_in_path(BROWSER_CANDIDATES, std::env::var_os("PATH"))
                .ok_or(OrganizerError::BrowserNotFound)?,
        };

        Ok(Self {
            browser,
            profile_dir: config.profile_dir()?,
            config: config.clone(),
            fetched: 0,
        })
    }

    pub fn profile_dir(&self) -> &Path {
        &self.profile_dir
    }

    /// 保存済みのPDF数
    pub fn fetched(&self) -> usize {
        self.fetched
    }

    /// フォームを開き、サインイン画面に飛ばされないことを確認
    pub async fn verify_session(&self) -> Result<()> {
        if !self.profile_dir.exists() {
            return Err(OrganizerError::LoginFailed("ログイン情報がありません".into()));
        }
        let dom = self
            .dump_dom(&self.config.form_url)
            .await
            .map_err(|e| OrganizerError::LoginFailed(e.to_string()))?;
        if self.is_sign_in_page(&dom) {
            return Err(OrganizerError::LoginFailed(
                "サインイン画面が表示されました（ログイン切れ）".into(),
            ));
        }
        Ok(())
    }

    /// 画面付きのブラウザでフォームを開き、利用者がウィンドウを閉じるまで待つ
    ///
    /// 閉じた後にセッションを確認し、フォームが開けなければ `LoginFailed`。
    pub async fn login(&self) -> Result<()> {
        std::fs::create_dir_all(&self.profile_dir)?;

        let mut child = Command::new(&self.browser)
            .arg(profile_arg(&self.profile_dir))
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg(&self.config.form_url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| OrganizerError::LoginFailed(format!("ブラウザ起動エラー: {}", e)))?;

        tracing::info!(browser = %self.browser.display(), "ログイン用ブラウザを起動");
        println!("- ブラウザでログインし、フォームが表示されたらウィンドウを閉じてください");

        // Cookieを書き出させるため、強制終了せず終了を待つ
        let login_timeout = Duration::from_secs(self.config.login_timeout_seconds);
        match tokio::time::timeout(login_timeout, child.wait()).await {
            Ok(Ok(status)) => tracing::debug!(%status, "ログイン用ブラウザ終了"),
            Ok(Err(e)) => {
                return Err(OrganizerError::LoginFailed(format!("ブラウザ待機エラー: {}", e)))
            }
            Err(_) => {
                if let Err(e) = child.kill().await {
                    tracing::debug!(error = %e, "ブラウザは既に終了済み");
                }
                return Err(OrganizerError::LoginFailed(format!(
                    "{}秒以内にウィンドウが閉じられませんでした",
                    login_timeout.as_secs()
                )));
            }
        }

        self.verify_session().await
    }

    /// ログイン情報を破棄。プロファイルがあれば true
    pub fn logout(&self) -> Result<bool> {
        if !self.profile_dir.exists() {
            return Ok(false);
        }
        std::fs::remove_dir_all(&self.profile_dir)?;
        Ok(true)
    }

    fn is_sign_in_page(&self, dom: &str) -> bool {
        self.config
            .sign_in_markers
            .iter()
            .any(|marker| !marker.is_empty() && dom.contains(marker.as_str()))
    }

    async fn dump_dom(&self, url: &str) -> Result<String> {
        let output = self.run_headless(OsString::from("--dump-dom"), url).await?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn print_to_pdf(&self, url: &str, save_path: &Path) -> Result<()> {
        let mut print_arg = OsString::from("--print-to-pdf=");
        print_arg.push(save_path.as_os_str());
        self.run_headless(print_arg, url).await?;

        if !save_path.is_file() {
            return Err(OrganizerError::SurveyFetch(format!(
                "PDFが作成されていません: {}",
                save_path.display()
            )));
        }
        Ok(())
    }

    async fn run_headless(&self, action: OsString, url: &str) -> Result<Output> {
        let mut command = Command::new(&self.browser);
        command
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-first-run")
            .arg("--no-pdf-header-footer")
            .arg(profile_arg(&self.profile_dir))
            .arg(format!("--virtual-time-budget={}", self.config.render_wait_ms))
            .arg(action)
            .arg(url)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let render_timeout = Duration::from_secs(self.config.render_timeout_seconds);
        let output = tokio::time::timeout(render_timeout, command.output())
            .await
            .map_err(|_| {
                OrganizerError::SurveyFetch(format!(
                    "{}秒以内に描画が終わりませんでした",
                    render_timeout.as_secs()
                ))
            })?
            .map_err(|e| OrganizerError::SurveyFetch(format!("ブラウザ起動エラー: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OrganizerError::SurveyFetch(format!(
                "ブラウザ異常終了 (code {:?}): {}",
                output.status.code(),
                stderr.trim()
            )));
        }
        Ok(output)
    }
}

impl SurveyFetcher for BrowserSession {
    async fn ensure_login(&mut self) -> Result<()> {
        match self.verify_session().await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::info!(reason = %e, "ログインが必要");
                self.login().await
            }
        }
    }

    async fn fetch_survey(&mut self, survey_id: u64, save_path: &Path) -> Result<()> {
        let url = self.config.survey_url(survey_id)?;
        tracing::debug!(survey_id, url = %url, "調査PDFを取得");

        if self.is_sign_in_page(&self.dump_dom(&url).await?) {
            return Err(OrganizerError::LoginFailed(
                "調査ページがサインイン画面になりました（ログイン切れ）".into(),
            ));
        }

        self.print_to_pdf(&url, save_path).await?;
        self.fetched += 1;
        Ok(())
    }
}

fn profile_arg(profile_dir: &Path) -> OsString {
    let mut arg = OsString::from("--user-data-dir=");
    arg.push(profile_dir.as_os_str());
    arg
}

/// PATH から最初に見つかった実行ファイル
fn find_in_path(candidates: &[&str], path_var: Option<OsString>) -> Option<PathBuf> {
    let path_var = path_var?;
    for dir in std::env::split_paths(&path_var) {
        for name in candidates {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
            #[cfg(windows)]
            {
                let exe = candidate.with_extension("exe");
                if exe.is_file() {
                    return Some(exe);
                }
            }
        }
    }
    None
}
