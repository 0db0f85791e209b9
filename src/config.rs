use crate::error::{OrganizerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Microsoft Forms の集計ページ（ログイン先）
const DEFAULT_FORM_URL: &str = "https://forms.office.com/Pages/DesignPageV2.aspx?\
origin=NeoPortalPage&subpage=design&id=hGiVYK0Q-kCGPU8yweOjemYNbVVriiJHgFdevpzMcOZUNDMwWVlPTkdYOD\
A1RFRUMUs4VkFTRTgwSSQlQCN0PWcu&analysis=true";

/// 調査URLテンプレート内の調査番号プレースホルダ
pub const SURVEY_ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub form_url: String,
    /// 調査1件分のページURL（`{id}` を調査番号に置換）
    pub survey_url_template: Option<String>,
    pub browser: Option<PathBuf>,
    /// ログインCookieを保持するブラウザプロファイル
    pub profile_dir: Option<PathBuf>,
    pub probe_url: String,
    pub probe_timeout_seconds: u64,
    pub render_timeout_seconds: u64,
    pub render_wait_ms: u64,
    /// ログイン用ウィンドウを閉じるまでの待ち時間
    pub login_timeout_seconds: u64,
    /// ページ内にあればサインイン画面とみなす文字列
    pub sign_in_markers: Vec<String>,
    pub create_all_folders: bool,
    pub write_log: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            form_url: DEFAULT_FORM_URL.into(),
            survey_url_template: None,
            browser: None,
            profile_dir: None,
            probe_url: "https://8.8.8.8".into(),
            probe_timeout_seconds: 5,
            render_timeout_seconds: 60,
            render_wait_ms: 600,
            login_timeout_seconds: 600,
            sign_in_markers: vec![
                "login.microsoftonline.com".into(),
                "login.live.com".into(),
            ],
            create_all_folders: false,
            write_log: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| OrganizerError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("applicant-organizer").join("config.json"))
    }

    /// ブラウザプロファイルの保存先（未設定ならデータディレクトリ配下）
    pub fn profile_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.profile_dir {
            return Ok(dir.clone());
        }
        let data = dirs::data_dir()
            .ok_or_else(|| OrganizerError::Config("データディレクトリが見つかりません".into()))?;
        Ok(data.join("applicant-organizer").join("browser-profile"))
    }

    fn survey_template(&self) -> Result<&str> {
        self.survey_url_template.as_deref().ok_or_else(|| {
            OrganizerError::Config(
                "調査URLが未設定です。`applicant-organizer config --set-survey-url URL` で設定してください".into(),
            )
        })
    }

    /// 調査PDFを取得できる設定か
    pub fn ensure_survey_url(&self) -> Result<()> {
        self.survey_template().map(|_| ())
    }

    /// 調査番号からページURLを組み立てる
    pub fn survey_url(&self, survey_id: u64) -> Result<String> {
        let template = self.survey_template()?;
        Ok(template.replace(SURVEY_ID_PLACEHOLDER, &survey_id.to_string()))
    }

    pub fn set_survey_url_template(&mut self, template: String) -> Result<()> {
        if !template.contains(SURVEY_ID_PLACEHOLDER) {
            return Err(OrganizerError::Config(format!(
                "調査URLには {} を含めてください",
                SURVEY_ID_PLACEHOLDER
            )));
        }
        self.survey_url_template = Some(template);
        Ok(())
    }
}
