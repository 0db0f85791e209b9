//! ネットワーク接続確認

use crate::config::Config;
use crate::error::{OrganizerError, Result};
use std::time::Duration;

/// 接続状態の確認
#[allow(async_fn_in_trait)]
pub trait Connectivity {
    async fn is_connected(&self) -> bool;
}

/// HEADリクエストが応答を返せば接続ありとみなす
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    url: String,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| OrganizerError::Config(format!("HTTPクライアント初期化エラー: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.probe_url.clone(),
            Duration::from_secs(config.probe_timeout_seconds),
        )
    }
}

impl Connectivity for HttpProbe {
    async fn is_connected(&self) -> bool {
        match self.client.head(&self.url).send().await {
            Ok(response) => {
                tracing::debug!(url = %self.url, status = %response.status(), "接続確認OK");
                true
            }
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "接続確認に失敗");
                false
            }
        }
    }
}
