use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 終端機
    Compact,
    /// 給排程或日誌收集器
    Json,
}

impl LogFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "store_dashboard=debug,info"
    } else {
        "store_dashboard=info"
    }
}

/// `RUST_LOG` 優先，沒有設定才用預設等級
pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let base = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);
    let output: Box<dyn Layer<Registry> + Send + Sync> = match format {
        LogFormat::Compact => base.compact().boxed(),
        LogFormat::Json => base.json().boxed(),
    };

    tracing_subscriber::registry().with(output).with(filter).init();
}
