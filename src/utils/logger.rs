use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// stdout 留給執行摘要，日誌一律寫到 stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    /// 排程執行 (cron / systemd timer) 交給日誌收集器
    Json,
}

impl LogFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "sat_pass_alert=debug,warn"
    } else {
        "sat_pass_alert=info,warn"
    }
}

/// RUST_LOG 優先，否則依 verbose 決定預設層級
pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .json()
                    .with_current_span(false)
                    .flatten_event(true),
            )
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flag() {
        assert_eq!(LogFormat::from_flag(true), LogFormat::Json);
        assert_eq!(LogFormat::from_flag(false), LogFormat::Compact);
    }

    #[test]
    fn test_default_directive_parses() {
        for verbose in [true, false] {
            assert!(default_directive(verbose).parse::<EnvFilter>().is_ok());
        }
        assert!(default_directive(true).contains("sat_pass_alert=debug"));
    }
}
