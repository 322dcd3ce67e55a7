use async_trait::async_trait;
use chrono::Local;
use erify_config::OpsConfig;
use erify_notify::{
    Notifier, NotifyChannel, NotifyError, NotifyLevel, NotifyManager, NotifyMessage, NotifyResult,
};
use erify_report::ReportKind;
use erify_sched::ReportScheduler;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// 记录收到消息的测试通知器
struct CapturingNotifier {
    name: &'static str,
    captured: Arc<Mutex<Vec<NotifyMessage>>>,
}

#[async_trait]
impl Notifier for CapturingNotifier {
    async fn send(&self, message: &NotifyMessage) -> Result<NotifyResult, NotifyError> {
        self.captured.lock().unwrap().push(message.clone());
        Ok(NotifyResult::success())
    }

    fn name(&self) -> &str {
        self.name
    }
}

fn config_with_dir(dir: &std::path::Path) -> OpsConfig {
    let mut config = OpsConfig::default();
    config.reports_dir = dir.to_path_buf();
    config
}

#[tokio::test]
async fn test_manual_report_pipeline_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let captured = Arc::new(Mutex::new(Vec::new()));

    let mut manager = NotifyManager::new(NotifyLevel::Info);
    manager.register(
        NotifyChannel::Email,
        Box::new(CapturingNotifier {
            name: "email",
            captured: captured.clone(),
        }),
    );
    manager.register(
        NotifyChannel::Slack,
        Box::new(CapturingNotifier {
            name: "slack",
            captured: captured.clone(),
        }),
    );

    let scheduler = ReportScheduler::new(config_with_dir(temp_dir.path()), manager);
    let results = scheduler.run_once(ReportKind::Weekly).await.unwrap();

    // 两个渠道均投递成功
    assert_eq!(results[&NotifyChannel::Email], true);
    assert_eq!(results[&NotifyChannel::Slack], true);

    // HTML 与 JSON 报表均已落盘
    let date = Local::now().date_naive().format("%Y%m%d").to_string();
    assert!(temp_dir
        .path()
        .join(format!("weekly_report_{}.html", date))
        .exists());
    assert!(temp_dir
        .path()
        .join(format!("weekly_report_{}.json", date))
        .exists());

    // 邮件携带 HTML 正文，Slack 仅摘要
    let messages = captured.lock().unwrap();
    assert_eq!(messages.len(), 2);
    let email = messages
        .iter()
        .find(|m| m.title.contains("Weekly Campaign Performance Report"))
        .unwrap();
    assert!(email.html.as_deref().unwrap().contains("ERIVOX"));
    let slack = messages
        .iter()
        .find(|m| m.title.contains("Summary"))
        .unwrap();
    assert!(slack.html.is_none());
    assert!(slack.content.contains("Sessions"));
}

#[tokio::test]
async fn test_scheduler_loop_starts_and_shuts_down() {
    let temp_dir = TempDir::new().unwrap();

    let mut config = config_with_dir(temp_dir.path());
    config.schedule.daily.enabled = false;
    config.schedule.weekly.enabled = false;
    config.schedule.monthly.enabled = false;

    let scheduler = Arc::new(ReportScheduler::new(
        config,
        NotifyManager::new(NotifyLevel::Info),
    ));
    let handle = scheduler.start();

    // 全部任务停用：循环空转，停机应立即返回
    handle.shutdown().await;
}
