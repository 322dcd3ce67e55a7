use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use erify_config::{ChannelTargets, Mode, OpsConfig, SmtpConfig};
use erify_launch::{run_launch, update_readme};
use erify_notify::{
    DiscordConfig, DiscordNotifier, EmailConfig, EmailNotifier, NotifyChannel, NotifyLevel,
    NotifyManager, SlackConfig, SlackNotifier,
};
use erify_report::ReportKind;
use erify_sched::ReportScheduler;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "ERIFY™ marketing operations toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a report once and deliver it
    Report {
        /// Type of report to generate
        #[arg(value_enum)]
        kind: ReportArg,
    },
    /// Start the automated report scheduler
    Scheduler,
    /// Show system status and configuration
    Status,
    /// Run the launch-announcement automation
    Launch,
    /// Update the README launch section for the current mode
    Readme {
        /// Markdown file to rewrite
        #[arg(long, default_value = "README.md")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportArg {
    Daily,
    Weekly,
    Monthly,
}

impl From<ReportArg> for ReportKind {
    fn from(arg: ReportArg) -> Self {
        match arg {
            ReportArg::Daily => ReportKind::Daily,
            ReportArg::Weekly => ReportKind::Weekly,
            ReportArg::Monthly => ReportKind::Monthly,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt().with_target(false).init();

    let cli = Cli::parse();

    // 配置加载失败立即退出
    let config = OpsConfig::from_env()?;
    let mode = Mode::from_env();
    let smtp = SmtpConfig::from_env();
    let targets = ChannelTargets::for_mode(mode);

    match cli.command {
        Commands::Report { kind } => {
            let kind = ReportKind::from(kind);
            info!("Running manual {} report", kind);

            let manager = build_manager(&smtp, &targets, config.recipients.clone());
            let scheduler = ReportScheduler::new(config, manager);
            scheduler.run_once(kind).await?;

            println!("✅ {} report generated successfully", kind.title());
        }
        Commands::Scheduler => {
            info!("Initializing ERIFY campaign performance reporting system");

            let manager = build_manager(&smtp, &targets, config.recipients.clone());
            let scheduler = Arc::new(ReportScheduler::new(config, manager));
            let handle = scheduler.start();

            println!("Press Ctrl+C to stop the scheduler");
            tokio::signal::ctrl_c().await?;

            info!("Shutting down scheduler...");
            handle.shutdown().await;
        }
        Commands::Status => {
            print_status(&config, mode, &smtp);
        }
        Commands::Launch => {
            let manager = build_manager(&smtp, &targets, vec![targets.email_target.clone()]);
            let results = run_launch(mode, &targets, &manager).await;

            let failed: Vec<String> = results
                .iter()
                .filter(|(_, ok)| !**ok)
                .map(|(channel, _)| channel.to_string())
                .collect();
            if !failed.is_empty() {
                bail!("launch automation failed for: {}", failed.join(", "));
            }
        }
        Commands::Readme { path } => {
            let changed = update_readme(&path, mode)?;
            println!(
                "✅ {:?} updated for {} mode (changed: {})",
                path, mode, changed
            );
        }
    }

    Ok(())
}

/// 注册三个通知渠道
fn build_manager(
    smtp: &SmtpConfig,
    targets: &ChannelTargets,
    recipients: Vec<String>,
) -> NotifyManager {
    let mut manager = NotifyManager::new(NotifyLevel::Info);

    manager.register(
        NotifyChannel::Slack,
        Box::new(SlackNotifier::new(SlackConfig::from_env(
            targets.slack_channel.clone(),
        ))),
    );

    manager.register(
        NotifyChannel::Discord,
        Box::new(DiscordNotifier::new(DiscordConfig::from_env(
            targets.discord_target.clone(),
        ))),
    );

    manager.register(
        NotifyChannel::Email,
        Box::new(EmailNotifier::new(EmailConfig {
            smtp_host: smtp.host.clone(),
            smtp_port: smtp.port,
            username: smtp.username.clone(),
            password: smtp.password.clone(),
            from: smtp.from.clone(),
            to: recipients,
        })),
    );

    manager
}

fn print_status(config: &OpsConfig, mode: Mode, smtp: &SmtpConfig) {
    println!("🚀 ERIFY™ Campaign Performance Reporting System");
    println!("📋 System Status");
    println!("{}", "-".repeat(50));
    println!("Mode: {}", mode);
    println!("✅ Configuration loaded");
    println!(
        "📧 Email configured: {}",
        if smtp.is_configured() { "Yes" } else { "No" }
    );
    println!("📊 Report recipients: {}", config.recipients.len());
    println!("🎯 UTM campaigns tracked: {}", config.campaigns.len());
    println!("📱 Social platforms: {}", config.social_accounts.len());

    println!();
    println!("📅 Schedule Configuration:");

    let status = |enabled: bool| if enabled { "✅ Enabled" } else { "❌ Disabled" };
    let schedule = &config.schedule;
    println!(
        "  Daily: {} - {}",
        status(schedule.daily.enabled),
        schedule.daily.time
    );
    println!(
        "  Weekly: {} - {} at {}",
        status(schedule.weekly.enabled),
        schedule.weekly.day.as_deref().unwrap_or("monday"),
        schedule.weekly.time
    );
    println!(
        "  Monthly: {} - Day {} at {}",
        status(schedule.monthly.enabled),
        schedule.monthly.day_of_month.unwrap_or(1),
        schedule.monthly.time
    );
}
