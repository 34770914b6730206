pub mod toml_config;

use crate::domain::timestamp::RawTimestamp;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::parse_utc_offset;
use chrono::{DateTime, FixedOffset, Local, Utc};

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

/// 沒指定偏移時用系統時區；沒指定參考時間時用現在
pub fn resolve_reference_time(
    reference_time: Option<&str>,
    utc_offset: Option<&str>,
) -> Result<DateTime<FixedOffset>> {
    let offset = match utc_offset {
        Some(value) => parse_utc_offset("utc_offset", value)?,
        None => *Local::now().offset(),
    };

    match reference_time {
        None => Ok(Utc::now().with_timezone(&offset)),
        Some(text) => RawTimestamp::Text(text.to_string())
            .resolve(&offset)
            .ok_or_else(|| DashboardError::InvalidConfigValueError {
                field: "reference_time".to_string(),
                value: text.to_string(),
                reason: "Expected RFC 3339 or YYYY-MM-DD".to_string(),
            }),
    }
}

#[cfg(feature = "cli")]
mod cli_config {
    use crate::domain::locale::Locale;
    use crate::domain::ports::ConfigProvider;
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use chrono::{DateTime, FixedOffset};
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "store-dashboard")]
    #[command(about = "Warranty summary dashboard for a store")]
    pub struct CliConfig {
        #[arg(long, env = "DASHBOARD_API_BASE_URL", default_value = "http://localhost:3000/api")]
        pub api_base_url: String,

        #[arg(long)]
        pub store_id: u64,

        #[arg(long, env = "DASHBOARD_API_TOKEN", hide_env_values = true)]
        pub token: Option<String>,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_delimiter = ',', default_value = "json,csv")]
        pub formats: Vec<String>,

        #[arg(long, help = "Pack all outputs into one ZIP file")]
        pub bundle: bool,

        #[arg(long, value_enum, default_value_t = Locale::Thai)]
        pub locale: Locale,

        #[arg(
            long,
            allow_hyphen_values = true,
            help = "UTC offset for day boundaries, e.g. +07:00"
        )]
        pub utc_offset: Option<String>,

        #[arg(long, help = "Aggregate as of this time (RFC 3339 or YYYY-MM-DD)")]
        pub reference_time: Option<String>,

        #[arg(long, default_value = "30")]
        pub timeout_seconds: u64,

        #[arg(long, help = "Print the report without writing files")]
        pub dry_run: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl ConfigProvider for CliConfig {
        fn api_base_url(&self) -> &str {
            &self.api_base_url
        }

        fn store_id(&self) -> u64 {
            self.store_id
        }

        fn api_token(&self) -> Option<&str> {
            self.token.as_deref().filter(|token| !token.is_empty())
        }

        fn timeout_seconds(&self) -> u64 {
            self.timeout_seconds
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn bundle_outputs(&self) -> bool {
            self.bundle
        }

        fn locale(&self) -> Locale {
            self.locale
        }

        fn reference_time(&self) -> Result<DateTime<FixedOffset>> {
            super::resolve_reference_time(
                self.reference_time.as_deref(),
                self.utc_offset.as_deref(),
            )
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_url("api_base_url", &self.api_base_url)?;
            validation::validate_positive_number("store_id", self.store_id, 1)?;
            validation::validate_path("output_path", &self.output_path)?;
            validation::validate_output_formats("formats", &self.formats)?;
            validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
            self.reference_time()?;
            Ok(())
        }
    }

}
