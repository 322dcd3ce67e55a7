use crate::job::Job;
use anyhow::Result;
use chrono::{DateTime, Local};
use erify_config::OpsConfig;
use erify_metrics::{
    Aggregator, AlertManager, DateRange, ErivoxSource, GoogleAnalyticsSource, SocialMediaSource,
    Snapshot,
};
use erify_notify::{NotifyChannel, NotifyManager, NotifyMessage};
use erify_report::{email_subject, render_html, render_json, ReportKind, ReportStore};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{error, info, warn};

/// 调度任务句柄
pub struct SchedulerHandle {
    shutdown_tx: watch::Sender<bool>,
    join_handle: JoinHandle<()>,
}

impl SchedulerHandle {
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.join_handle.await;
    }

    pub fn abort(self) {
        self.join_handle.abort();
    }
}

/// 报表调度器
///
/// 串起采集、渲染、落盘、投递与阈值检查；后台循环每分钟轮询一次
/// 计划表，同一时刻只运行一个任务。
pub struct ReportScheduler {
    config: OpsConfig,
    aggregator: Aggregator,
    alert_manager: AlertManager,
    store: ReportStore,
    notify: NotifyManager,
}

impl ReportScheduler {
    pub fn new(config: OpsConfig, notify: NotifyManager) -> Self {
        let aggregator = Self::setup_sources(&config);
        let alert_manager = AlertManager::new(config.thresholds);
        let store = ReportStore::new(&config.reports_dir);

        Self {
            config,
            aggregator,
            alert_manager,
            store,
            notify,
        }
    }

    /// 按环境变量注册数据源
    ///
    /// GA 与各社媒平台仅在对应 API key 存在时注册；ERIVOX 始终注册。
    fn setup_sources(config: &OpsConfig) -> Aggregator {
        let mut aggregator = Aggregator::new();

        if let Ok(api_key) = std::env::var("GA_API_KEY") {
            let view_id =
                std::env::var("GA_VIEW_ID").unwrap_or_else(|_| "primary".to_string());
            aggregator.add_source(Box::new(GoogleAnalyticsSource::new(api_key, view_id)));
        }

        for platform in ["twitter", "linkedin", "facebook"] {
            let key_var = format!("{}_API_KEY", platform.to_uppercase());
            if let Ok(api_key) = std::env::var(&key_var) {
                let account = config
                    .social_accounts
                    .get(platform)
                    .cloned()
                    .unwrap_or_default();
                match SocialMediaSource::new(platform, api_key, account) {
                    Ok(source) => aggregator.add_source(Box::new(source)),
                    Err(e) => warn!("Skipping social source {}: {}", platform, e),
                }
            }
        }

        aggregator.add_source(Box::new(ErivoxSource::new(
            std::env::var("ERIVOX_API_KEY").unwrap_or_else(|_| "ERIVOX_API_KEY".to_string()),
        )));

        aggregator
    }

    pub fn source_count(&self) -> usize {
        self.aggregator.source_count()
    }

    /// 执行一次完整的报表流水线
    ///
    /// 采集 -> 渲染 HTML/JSON -> 落盘 -> 邮件 + Slack 摘要 -> 阈值检查。
    /// 投递失败只体现在返回的成功表里；渲染/落盘失败向上传播。
    pub async fn run_once(&self, kind: ReportKind) -> Result<BTreeMap<NotifyChannel, bool>> {
        info!("Starting {} report generation...", kind);

        let range = DateRange::last_days(kind.lookback_days());
        let snapshot = self.aggregator.collect_all(&range).await;

        let html = render_html(&snapshot, kind)?;
        let json = render_json(&snapshot)?;

        let now = Local::now();
        let today = now.date_naive();
        self.store.save(&html, kind, today, "html")?;
        self.store.save(&json, kind, today, "json")?;

        // 邮件投递（HTML 正文）
        let mail = NotifyMessage::info(email_subject(kind, now), summary_text(&snapshot, kind))
            .with_html(html);
        let mut results = self.notify.dispatch(&[NotifyChannel::Email], &mail).await;

        // Slack 摘要
        let slack = NotifyMessage::info(
            format!("ERIFY™ {} Campaign Performance Summary", kind.title()),
            summary_text(&snapshot, kind),
        );
        results.extend(self.notify.dispatch(&[NotifyChannel::Slack], &slack).await);

        // 阈值检查：历史快照无人提供，告警仅在调用方传入时产生
        let alerts = self.alert_manager.check(&snapshot, None);
        for alert in &alerts {
            let message = NotifyMessage::warning(
                "ERIFY™ Performance Alert",
                format!(
                    "{} (current: {:.2}, previous: {:.2})",
                    alert.message, alert.current_value, alert.previous_value
                ),
            );
            self.notify
                .dispatch(&[NotifyChannel::Slack, NotifyChannel::Email], &message)
                .await;
        }

        info!(
            "{} report generated and dispatched: {:?}",
            kind.title(),
            results
        );
        Ok(results)
    }

    /// 构建计划任务表
    ///
    /// 启动时已过当天触发点的任务直接标记为当天已跑，避免补跑语义。
    fn build_jobs(&self, now: DateTime<Local>) -> Vec<Job> {
        let schedule = &self.config.schedule;
        let mut jobs = vec![
            Job::new(ReportKind::Daily, schedule.daily.clone()),
            Job::new(ReportKind::Weekly, schedule.weekly.clone()),
            Job::new(ReportKind::Monthly, schedule.monthly.clone()),
        ];

        for job in &mut jobs {
            if job.entry.enabled {
                info!(
                    "{} reports scheduled at {}",
                    job.kind.title(),
                    job.entry.time
                );
            }
            if job.is_due(now) {
                job.mark_fired(now.date_naive());
            }
        }

        jobs
    }

    /// 启动后台调度循环
    pub fn start(self: Arc<Self>) -> SchedulerHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let mut jobs = self.build_jobs(Local::now());

        let join_handle = tokio::spawn(async move {
            info!("Report scheduler started");
            let mut ticker = interval(tokio::time::Duration::from_secs(60));

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let now = Local::now();
                        for job in jobs.iter_mut() {
                            if !job.is_due(now) {
                                continue;
                            }
                            info!("Running scheduled {} report", job.kind);
                            if let Err(e) = self.run_once(job.kind).await {
                                error!("Error generating {} report: {}", job.kind, e);
                            }
                            // 无论成败当天不再重试
                            job.mark_fired(now.date_naive());
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Report scheduler stopped");
        });

        SchedulerHandle {
            shutdown_tx,
            join_handle,
        }
    }
}

/// 报表摘要文本（Slack / 邮件降级正文共用）
fn summary_text(snapshot: &Snapshot, kind: ReportKind) -> String {
    format!(
        "📊 {} campaign performance • {} to {}\n\
         Sessions: {} • Conversions: {} • Conversion rate: {:.1}%\n\
         Social engagement: {} across {} platform(s)",
        kind.title(),
        snapshot.period.start.format("%Y-%m-%d"),
        snapshot.period.end.format("%Y-%m-%d"),
        snapshot.sessions(),
        snapshot.conversions(),
        snapshot.conversion_rate() * 100.0,
        snapshot.total_engagement(),
        snapshot.social.len()
    )
}
