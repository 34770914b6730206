pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{http::DashboardClient, storage::LocalStorage};
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::aggregator::{
    compute_daily_histogram, compute_monthly_histogram, compute_totals, percent_of, summarize,
    DashboardStats, HistogramBucket, Totals,
};
pub use crate::core::{
    engine::DashboardEngine, pipeline::DashboardPipeline, report::DashboardReport,
};
pub use crate::domain::locale::Locale;
pub use crate::domain::model::{WarrantyHeader, WarrantyItem, WarrantyStatus};
pub use crate::utils::error::{DashboardError, Result};
