use crate::message::{NotifyChannel, NotifyLevel, NotifyMessage};
use crate::notifier::Notifier;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

/// 通知管理器
///
/// 维护渠道到通知器的映射；分发时逐个渠道调用，单渠道失败只记录日志并
/// 在成功表中记为 false，绝不中断整批发送。
pub struct NotifyManager {
    /// 渠道 -> 通知器
    notifiers: BTreeMap<NotifyChannel, Box<dyn Notifier>>,

    /// 最小通知级别
    min_level: NotifyLevel,
}

impl NotifyManager {
    pub fn new(min_level: NotifyLevel) -> Self {
        Self {
            notifiers: BTreeMap::new(),
            min_level,
        }
    }

    /// 注册通知器
    pub fn register(&mut self, channel: NotifyChannel, notifier: Box<dyn Notifier>) {
        info!("Registered notifier: {}", notifier.name());
        self.notifiers.insert(channel, notifier);
    }

    pub fn notifier_count(&self) -> usize {
        self.notifiers.len()
    }

    /// 发送到指定渠道集合，返回各渠道成功与否
    ///
    /// 未注册的渠道直接记为 false；级别低于门槛时整批跳过（返回空表）。
    pub async fn dispatch(
        &self,
        channels: &[NotifyChannel],
        message: &NotifyMessage,
    ) -> BTreeMap<NotifyChannel, bool> {
        let mut results = BTreeMap::new();

        if message.level < self.min_level {
            return results;
        }

        for channel in channels {
            let success = self.send_one(*channel, message).await;
            results.insert(*channel, success);
        }

        results
    }

    async fn send_one(&self, channel: NotifyChannel, message: &NotifyMessage) -> bool {
        let Some(notifier) = self.notifiers.get(&channel) else {
            warn!("No notifier registered for channel: {}", channel);
            return false;
        };

        if !notifier.is_enabled() {
            return false;
        }

        match notifier.send(message).await {
            Ok(result) => {
                if result.success {
                    info!(
                        "Notification sent via {}: {}",
                        notifier.name(),
                        message.title
                    );
                } else {
                    error!(
                        "Notification failed via {}: {}",
                        notifier.name(),
                        result.message
                    );
                }
                result.success
            }
            Err(e) => {
                error!("Notification error via {}: {}", notifier.name(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::{NotifyError, NotifyResult};
    use async_trait::async_trait;

    struct FixedNotifier {
        name: &'static str,
        succeed: bool,
    }

    #[async_trait]
    impl Notifier for FixedNotifier {
        async fn send(&self, _message: &NotifyMessage) -> Result<NotifyResult, NotifyError> {
            if self.succeed {
                Ok(NotifyResult::success())
            } else {
                Ok(NotifyResult::failure("forced failure"))
            }
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    #[tokio::test]
    async fn test_dispatch_reports_per_channel_success() {
        let mut manager = NotifyManager::new(NotifyLevel::Info);
        manager.register(
            NotifyChannel::Slack,
            Box::new(FixedNotifier {
                name: "slack",
                succeed: true,
            }),
        );
        manager.register(
            NotifyChannel::Email,
            Box::new(FixedNotifier {
                name: "email",
                succeed: false,
            }),
        );

        let message = NotifyMessage::info("Report", "body");
        let results = manager
            .dispatch(
                &[
                    NotifyChannel::Slack,
                    NotifyChannel::Discord,
                    NotifyChannel::Email,
                ],
                &message,
            )
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[&NotifyChannel::Slack], true);
        // 未注册的渠道记为失败
        assert_eq!(results[&NotifyChannel::Discord], false);
        assert_eq!(results[&NotifyChannel::Email], false);
    }

    #[tokio::test]
    async fn test_level_gate_skips_low_level_messages() {
        let mut manager = NotifyManager::new(NotifyLevel::Warning);
        manager.register(
            NotifyChannel::Slack,
            Box::new(FixedNotifier {
                name: "slack",
                succeed: true,
            }),
        );

        let message = NotifyMessage::info("Report", "body");
        let results = manager.dispatch(&[NotifyChannel::Slack], &message).await;
        assert!(results.is_empty());

        let warning = NotifyMessage::warning("Alert", "traffic drop");
        let results = manager.dispatch(&[NotifyChannel::Slack], &warning).await;
        assert_eq!(results[&NotifyChannel::Slack], true);
    }
}
