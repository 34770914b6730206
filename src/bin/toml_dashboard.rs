use clap::Parser;
use store_dashboard::domain::ports::ConfigProvider;
use store_dashboard::utils::{logger, validation::Validate};
use store_dashboard::{DashboardEngine, DashboardPipeline, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-dashboard")]
#[command(about = "Store dashboard driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "dashboard.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the store id from the config file
    #[arg(long)]
    store_id: Option<u64>,

    /// Show the effective configuration without calling the API
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(
        logger::LogFormat::from_json_flag(config.json_logs()),
        args.verbose || config.verbose(),
    );
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 套用命令列覆蓋設定
    if let Some(store_id) = args.store_id {
        config.store.id = store_id;
        tracing::info!("🔧 Store id overridden to: {}", store_id);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        println!("🔍 DRY RUN MODE - no request was sent");
        return Ok(());
    }

    let locale = config.locale();
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = DashboardPipeline::new(storage, config)?;
    let engine = DashboardEngine::new(pipeline);

    match engine.run().await {
        Ok((report, output_path)) => {
            print!("{}", report.render_text());
            println!("📁 Output saved to: {}", output_path);
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
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    println!("📋 Configuration Summary:");
    println!("  Source: {}", config.api_base_url());
    println!("  Store: {}", config.store_id());
    println!("  Token: {}", if config.api_token().is_some() { "set" } else { "none" });
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    println!("  Bundle: {}", config.bundle_outputs());
    println!("  Locale: {:?}", config.locale());
    println!();
}
