use crate::messages::LaunchMessages;
use chrono::Utc;
use erify_config::{ChannelTargets, Mode};
use erify_notify::{NotifyChannel, NotifyManager};
use std::collections::BTreeMap;
use tracing::info;

/// 执行发布公告自动化
///
/// 三个渠道逐一投递，单渠道失败不影响其余渠道；
/// 返回各渠道成功与否，由调用方决定退出码。
pub async fn run_launch(
    mode: Mode,
    targets: &ChannelTargets,
    manager: &NotifyManager,
) -> BTreeMap<NotifyChannel, bool> {
    info!("Starting ERIFY Elite launch automation in {} mode", mode);
    info!(
        "Targets: slack={} discord={} email={} branch={}",
        targets.slack_channel, targets.discord_target, targets.email_target, targets.github_branch
    );

    let messages = LaunchMessages::compose(mode, targets, Utc::now());

    let mut results = manager
        .dispatch(&[NotifyChannel::Slack], &messages.slack)
        .await;
    results.extend(
        manager
            .dispatch(&[NotifyChannel::Discord], &messages.discord)
            .await,
    );
    results.extend(
        manager
            .dispatch(&[NotifyChannel::Email], &messages.email)
            .await,
    );

    let successful = results.values().filter(|ok| **ok).count();
    info!(
        "Automation summary: {}/{} channels succeeded",
        successful,
        results.len()
    );
    for (channel, ok) in &results {
        info!("  {} {}", if *ok { "✅" } else { "❌" }, channel);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use erify_notify::NotifyLevel;

    #[tokio::test]
    async fn test_launch_without_notifiers_reports_all_failed() {
        let manager = NotifyManager::new(NotifyLevel::Info);
        let targets = ChannelTargets {
            slack_channel: "#erify-test".to_string(),
            discord_target: "test-server".to_string(),
            email_target: "test@erify.com".to_string(),
            github_branch: "launch-sim-test".to_string(),
        };

        let results = run_launch(Mode::Simulation, &targets, &manager).await;

        assert_eq!(results.len(), 3);
        assert!(results.values().all(|ok| !ok));
    }

    #[tokio::test]
    async fn test_launch_with_stub_discord_succeeds_on_that_channel() {
        use erify_notify::{DiscordConfig, DiscordNotifier};

        let mut manager = NotifyManager::new(NotifyLevel::Info);
        manager.register(
            NotifyChannel::Discord,
            Box::new(DiscordNotifier::new(DiscordConfig {
                token: Some("token".to_string()),
                target: "test-server".to_string(),
            })),
        );

        let targets = ChannelTargets {
            slack_channel: "#erify-test".to_string(),
            discord_target: "test-server".to_string(),
            email_target: "test@erify.com".to_string(),
            github_branch: "launch-sim-test".to_string(),
        };

        let results = run_launch(Mode::Simulation, &targets, &manager).await;

        assert_eq!(results[&NotifyChannel::Discord], true);
        assert_eq!(results[&NotifyChannel::Slack], false);
        assert_eq!(results[&NotifyChannel::Email], false);
    }
}
