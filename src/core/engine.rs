use crate::core::report::DashboardReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

/// 依序執行 extract → transform → load
pub struct DashboardEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> DashboardEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 只抓資料並彙總，不寫檔
    pub async fn preview(&self) -> Result<DashboardReport> {
        let snapshot = self.pipeline.extract().await?;
        self.pipeline.transform(snapshot).await
    }

    /// 回傳報表與輸出位置
    pub async fn run(&self) -> Result<(DashboardReport, String)> {
        let started = Instant::now();
        tracing::info!("🚀 Starting dashboard run");

        tracing::info!("📡 Fetching dashboard data...");
        let snapshot = self.pipeline.extract().await?;
        tracing::info!(
            "Fetched {} warranties and {} notifications for store {}",
            snapshot.summary.warranties.len(),
            snapshot.notifications.len(),
            snapshot.store_id
        );

        tracing::info!("🧮 Aggregating warranty summary...");
        let report = self.pipeline.transform(snapshot).await?;
        tracing::info!(
            "Aggregated {} items across {} warranties",
            report.stats.totals.total_items,
            report.stats.totals.total_headers
        );

        tracing::info!("💾 Writing report...");
        let output_path = self.pipeline.load(&report).await?;
        tracing::info!(
            "Output saved to: {} ({:?})",
            output_path,
            started.elapsed()
        );

        Ok((report, output_path))
    }
}
