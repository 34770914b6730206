use crate::domain::locale::Locale;
use crate::domain::model::{lenient_seq, unwrap_envelope, DashboardSummary, Notification};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DashboardError, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub token: Option<String>,
    pub timeout: Duration,
    pub locale: Locale,
    pub headers: Vec<(String, String)>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            token: None,
            timeout: Duration::from_secs(30),
            locale: Locale::default(),
            headers: Vec::new(),
        }
    }
}

/// 商店後台 API 的用戶端
pub struct DashboardClient {
    client: Client,
    base_url: String,
    options: ClientOptions,
}

impl DashboardClient {
    pub fn new(base_url: &str, options: ClientOptions) -> Result<Self> {
        let client = Client::builder().timeout(options.timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            options,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.api_base_url(),
            ClientOptions {
                token: config.api_token().map(str::to_string),
                timeout: Duration::from_secs(config.timeout_seconds()),
                locale: config.locale(),
                headers: config.extra_headers(),
            },
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET 並拆掉 `data` 外層；非 2xx 轉成帶後端訊息的錯誤
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = self.endpoint(path);
        let mut request = self.client.get(&url);

        for (key, value) in &self.options.headers {
            request = request.header(key, value);
        }
        if let Some(token) = &self.options.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!("Making API request to: {}", url);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body: Option<Value> = response.json().await.ok();
            let message = body
                .as_ref()
                .and_then(|body| body.pointer("/error/message"))
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| self.options.locale.load_failure_message().to_string());

            return Err(DashboardError::BackendError {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        Ok(unwrap_envelope(body))
    }

    pub async fn fetch_summary(&self, store_id: u64) -> Result<DashboardSummary> {
        let body = self.get_json(&format!("store/{}/dashboard", store_id)).await?;
        let summary = DashboardSummary::from(body);

        tracing::info!(
            "📥 Loaded {} warranties for store {}",
            summary.warranties.len(),
            store_id
        );
        Ok(summary)
    }

    /// 先試商店專屬端點，失敗再試一次通用端點；兩者都失敗時回傳空清單
    pub async fn fetch_notifications(&self, store_id: u64) -> Vec<Notification> {
        let primary = format!("store/{}/notifications", store_id);

        let body = match self.get_json(&primary).await {
            Ok(body) => Ok(body),
            Err(e) => {
                tracing::debug!("Store notifications unavailable ({}), trying fallback", e);
                self.get_json("notifications").await
            }
        };

        match body {
            Ok(body) => lenient_seq(Some(body)),
            Err(e) => {
                tracing::warn!("⚠️ Could not load notifications: {}", e);
                Vec::new()
            }
        }
    }
}
