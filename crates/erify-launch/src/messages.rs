use chrono::{DateTime, Utc};
use erify_config::{ChannelTargets, Mode};
use erify_notify::NotifyMessage;

/// 各渠道的发布公告消息
pub struct LaunchMessages {
    pub slack: NotifyMessage,
    pub discord: NotifyMessage,
    pub email: NotifyMessage,
}

impl LaunchMessages {
    /// 按模式组装三个渠道的公告文案
    pub fn compose(mode: Mode, targets: &ChannelTargets, now: DateTime<Utc>) -> Self {
        let timestamp = now.format("%Y-%m-%d %H:%M UTC").to_string();
        let emoji = mode.emoji();

        let slack_body = format!(
            "{emoji} **ERIFY Elite Launch Communication** {emoji}\n\
             \n\
             🎯 **Mode**: {mode}\n\
             📅 **Timestamp**: {timestamp}\n\
             🔗 **Branch**: {branch}\n\
             \n\
             {line}\n\
             \n\
             #ERIFYElite #LuxuryFintech {tag}",
            emoji = emoji,
            mode = mode.title(),
            timestamp = timestamp,
            branch = targets.github_branch,
            line = if mode.is_simulation() {
                "🔬 This is a test communication for simulation purposes."
            } else {
                "🎉 ERIFY Elite is officially launching! Welcome to the future of luxury fintech."
            },
            tag = if mode.is_simulation() {
                "#Testing"
            } else {
                "#Launch"
            },
        );

        let discord_body = format!(
            "{emoji} **ERIFY Elite Launch Notification** {emoji}\n\
             \n\
             **Mode**: {mode}\n\
             **Timestamp**: {timestamp}\n\
             **Target**: {target}\n\
             \n\
             {line}",
            emoji = emoji,
            mode = mode.title(),
            timestamp = timestamp,
            target = targets.discord_target,
            line = if mode.is_simulation() {
                "🔬 Simulation mode active - Testing communication channels."
            } else {
                "🎊 ERIFY Elite has launched! Experience luxury fintech like never before."
            },
        );

        let email_subject = format!(
            "{}ERIFY Elite Launch - {} Mode",
            if mode.is_simulation() { "[TEST] " } else { "" },
            mode.title()
        );

        let email_html = email_body(mode, targets, &timestamp);

        Self {
            // Slack 文案自带标题行，消息标题留空避免重复
            slack: NotifyMessage::info("", slack_body),
            discord: NotifyMessage::info("", discord_body),
            email: NotifyMessage::info(email_subject, format!("ERIFY Elite launch - {} mode", mode))
                .with_html(email_html),
        }
    }
}

fn email_body(mode: Mode, targets: &ChannelTargets, timestamp: &str) -> String {
    let body_line = if mode.is_simulation() {
        "<p><em>🔬 This is a test email for simulation purposes. No action required.</em></p>"
    } else {
        "<p>🎉 <strong>ERIFY Elite is officially live!</strong> Welcome to the future of luxury fintech verification.</p>"
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>ERIFY Elite Launch</title>
</head>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1 style="color: #1a1a1a;">{emoji} ERIFY Elite Launch Communication</h1>

    <div style="background: #f8f9fa; padding: 20px; border-radius: 8px; margin: 20px 0;">
        <h2>Launch Details</h2>
        <ul>
            <li><strong>Mode:</strong> {mode}</li>
            <li><strong>Timestamp:</strong> {timestamp}</li>
            <li><strong>Target Branch:</strong> {branch}</li>
            <li><strong>Email Target:</strong> {email_target}</li>
        </ul>
    </div>

    <div style="margin: 20px 0;">
        {body_line}
    </div>

    <footer style="margin-top: 40px; padding-top: 20px; border-top: 1px solid #eee; color: #666; font-size: 12px;">
        <p>ERIFY Elite Launch Automation System</p>
        <p>Generated on {timestamp}</p>
    </footer>
</body>
</html>"#,
        emoji = mode.emoji(),
        mode = mode.title(),
        timestamp = timestamp,
        branch = targets.github_branch,
        email_target = targets.email_target,
        body_line = body_line,
    )
}
