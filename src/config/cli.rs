use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "sat-pass-alert")]
#[command(about = "Notify when tracked satellites are visible from your ground station")]
pub struct CliArgs {
    /// Path to TOML configuration file (falls back to environment variables)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit JSON logs (for cron / systemd timers)
    #[arg(long)]
    pub json_logs: bool,

    /// Evaluate visibility and print the notification without sending or logging it
    #[arg(long)]
    pub dry_run: bool,

    /// Abort the batch if it takes longer than this many seconds
    #[arg(long)]
    pub timeout_seconds: Option<u64>,
}
