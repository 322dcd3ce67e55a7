use crate::mode::Mode;
use serde::{Deserialize, Serialize};

/// 各渠道的投放目标（随运行模式切换）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTargets {
    /// Slack 频道
    pub slack_channel: String,
    /// Discord 目标服务器
    pub discord_target: String,
    /// 邮件收件人
    pub email_target: String,
    /// 关联的 GitHub 分支
    pub github_branch: String,
}

impl ChannelTargets {
    /// 按模式取默认目标，环境变量可逐项覆盖
    pub fn for_mode(mode: Mode) -> Self {
        let defaults = match mode {
            Mode::Simulation => Self {
                slack_channel: "#erify-test".to_string(),
                discord_target: "test-server".to_string(),
                email_target: "test@erify.com".to_string(),
                github_branch: "launch-sim-test".to_string(),
            },
            Mode::Production => Self {
                slack_channel: "#erify-announcements".to_string(),
                discord_target: "live-community".to_string(),
                email_target: "stakeholders@erify.com".to_string(),
                github_branch: "main".to_string(),
            },
        };

        Self {
            slack_channel: env_or("SLACK_CHANNEL", defaults.slack_channel),
            discord_target: env_or("DISCORD_TARGET", defaults.discord_target),
            email_target: env_or("EMAIL_TARGET", defaults.email_target),
            github_branch: env_or("TARGET_BRANCH", defaults.github_branch),
        }
    }
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(name).unwrap_or(default)
}
