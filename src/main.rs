use anyhow::Context;
use clap::Parser;
use sat_pass_alert::core::notification::DeliveryStatus;
use sat_pass_alert::utils::error::ErrorSeverity;
use sat_pass_alert::utils::{logger, validation::Validate};
use sat_pass_alert::{AlertConfig, AlertError, BatchRunner, CliArgs};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_logger(logger::LogFormat::from_flag(args.json_logs), args.verbose);

    tracing::info!("Starting sat-pass-alert");

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    let runner = BatchRunner::from_config(&config).context("failed to set up the alert pipeline")?;
    if !config.email_enabled() {
        tracing::info!("📧 No SMTP settings, passes will only be logged");
    }

    let deadline = args.timeout_seconds.map(Duration::from_secs);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be sent or logged");
        let outcomes = runner.evaluate_within(deadline).await;
        let messages: Vec<&str> = outcomes.iter().filter_map(|o| o.outcome.message()).collect();
        if messages.is_empty() {
            println!(
                "No satellite visible right now ({} checked).",
                runner.targets().len()
            );
        } else {
            println!("{}", messages.join("\n"));
        }
        return Ok(());
    }

    // 期限只套用在查詢階段，通知一定會送出
    let report = runner.run_within(deadline).await;

    match &report.dispatch {
        Some(dispatch) => {
            if let DeliveryStatus::Failed(e) = &dispatch.delivery {
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 建議: {}", e.recovery_suggestion());
                std::process::exit(exit_code(e.severity()));
            }
            println!(
                "✅ {} satellite(s) visible, notification dispatched",
                report.visible_count()
            );
        }
        None => println!(
            "No satellite visible right now ({} checked).",
            runner.targets().len()
        ),
    }

    if let Some(e) = report.timeout() {
        fail(e);
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> sat_pass_alert::Result<AlertConfig> {
    match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AlertConfig::from_file(path)
        }
        None => {
            tracing::info!("📁 Loading configuration from environment");
            AlertConfig::from_env()
        }
    }
}

fn fail(e: &AlertError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());
    std::process::exit(exit_code(e.severity()))
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,      // 警告，但成功
        ErrorSeverity::Medium => 2,   // 重試錯誤
        ErrorSeverity::High => 1,     // 處理錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    }
}
