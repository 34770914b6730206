use clap::Parser;
use store_dashboard::domain::ports::ConfigProvider;
use store_dashboard::utils::{logger, validation::Validate};
use store_dashboard::{CliConfig, DashboardEngine, DashboardPipeline, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(logger::LogFormat::from_json_flag(config.json_logs), config.verbose);

    tracing::info!("Starting store-dashboard CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let locale = config.locale();
    let dry_run = config.dry_run;
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = DashboardPipeline::new(storage, config)?;
    let engine = DashboardEngine::new(pipeline);

    let outcome = if dry_run {
        engine.preview().await.map(|report| (report, None))
    } else {
        engine
            .run()
            .await
            .map(|(report, output_path)| (report, Some(output_path)))
    };

    match outcome {
        Ok((report, output_path)) => {
            print!("{}", report.render_text());
            if let Some(output_path) = output_path {
                println!("📁 Output saved to: {}", output_path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Dashboard run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.localized_message(locale));

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
