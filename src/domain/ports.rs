use crate::core::report::DashboardReport;
use crate::domain::locale::Locale;
use crate::domain::model::DashboardSnapshot;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn store_id(&self) -> u64;
    fn api_token(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn bundle_outputs(&self) -> bool;
    fn locale(&self) -> Locale;
    /// 彙總用的參考時間，同時決定日期邊界所在的時區
    fn reference_time(&self) -> Result<DateTime<FixedOffset>>;

    fn extra_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<DashboardSnapshot>;
    async fn transform(&self, snapshot: DashboardSnapshot) -> Result<DashboardReport>;
    async fn load(&self, report: &DashboardReport) -> Result<String>;
}
