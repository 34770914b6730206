use crate::adapters::http::DashboardClient;
use crate::core::report::{bundle_zip, DashboardReport, BUNDLE_ZIP};
use crate::domain::model::DashboardSnapshot;
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;

pub struct DashboardPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: DashboardClient,
}

impl<S: Storage, C: ConfigProvider> DashboardPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = DashboardClient::from_config(&config)?;
        Ok(Self {
            storage,
            config,
            client,
        })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for DashboardPipeline<S, C> {
    async fn extract(&self) -> Result<DashboardSnapshot> {
        let store_id = self.config.store_id();

        // 摘要失敗就整個失敗；通知失敗只會是空清單
        let (summary, notifications) = tokio::join!(
            self.client.fetch_summary(store_id),
            self.client.fetch_notifications(store_id)
        );

        Ok(DashboardSnapshot {
            store_id,
            summary: summary?,
            notifications,
        })
    }

    async fn transform(&self, snapshot: DashboardSnapshot) -> Result<DashboardReport> {
        let reference = self.config.reference_time()?;
        tracing::debug!("Aggregating with reference time {}", reference);

        Ok(DashboardReport::from_snapshot(
            &snapshot,
            reference,
            self.config.locale(),
        ))
    }

    async fn load(&self, report: &DashboardReport) -> Result<String> {
        let files = report.output_files(self.config.output_formats())?;
        let output_path = self.config.output_path();

        if self.config.bundle_outputs() {
            tracing::debug!("Creating ZIP bundle with {} files", files.len());
            let zip_data = bundle_zip(&files)?;
            self.storage.write_file(BUNDLE_ZIP, &zip_data).await?;
            return Ok(format!("{}/{}", output_path, BUNDLE_ZIP));
        }

        for (name, data) in &files {
            tracing::debug!("Writing {} ({} bytes)", name, data.len());
            self.storage.write_file(name, data).await?;
        }

        Ok(output_path.to_string())
    }
}
