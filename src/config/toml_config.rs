use crate::domain::locale::Locale;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{self, Validate};
use chrono::{DateTime, FixedOffset};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub store: StoreConfig,
    pub report: ReportConfig,
    pub logging: Option<LoggingConfig>,

    /// 讀檔時算出的輸出格式（預設 json）
    #[serde(skip)]
    formats: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub output_path: String,
    pub formats: Option<Vec<String>>,
    pub bundle: Option<bool>,
    pub locale: Option<Locale>,
    pub utc_offset: Option<String>,
    pub reference_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        config.formats = match &config.report.formats {
            Some(formats) => validation::dedup_formats(formats),
            None => validation::dedup_formats(&validation::DEFAULT_FORMATS),
        };
        Ok(config)
    }

    /// 替換環境變數 (例如 ${API_TOKEN})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashboardError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn json_logs(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|logging| logging.json)
            .unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|logging| logging.verbose)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_base_url(&self) -> &str {
        &self.source.base_url
    }

    fn store_id(&self) -> u64 {
        self.store.id
    }

    /// 未被替換的 `${VAR}` 視為沒有 token
    fn api_token(&self) -> Option<&str> {
        self.source
            .token
            .as_deref()
            .filter(|token| !token.is_empty() && !token.contains("${"))
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn output_path(&self) -> &str {
        &self.report.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn bundle_outputs(&self) -> bool {
        self.report.bundle.unwrap_or(false)
    }

    fn locale(&self) -> Locale {
        self.report.locale.unwrap_or_default()
    }

    fn reference_time(&self) -> Result<DateTime<FixedOffset>> {
        super::resolve_reference_time(
            self.report.reference_time.as_deref(),
            self.report.utc_offset.as_deref(),
        )
    }

    fn extra_headers(&self) -> Vec<(String, String)> {
        self.source
            .headers
            .as_ref()
            .map(|headers| {
                headers
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.base_url", &self.source.base_url)?;
        validation::validate_positive_number("store.id", self.store.id, 1)?;
        validation::validate_path("report.output_path", &self.report.output_path)?;
        validation::validate_output_formats("report.formats", &self.formats)?;
        validation::validate_range("source.timeout_seconds", self.timeout_seconds(), 1, 300)?;

        if let Some(token) = &self.source.token {
            if token.contains("${") {
                tracing::warn!("⚠️ source.token references an unset environment variable");
            }
        }

        self.reference_time()?;
        Ok(())
    }
}
