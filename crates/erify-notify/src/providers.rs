use crate::message::NotifyMessage;
use crate::notifier::{Notifier, NotifyError, NotifyResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Slack 通知（Web API chat.postMessage）
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Bot token（缺失时发送降级为失败结果）
    pub token: Option<String>,
    /// 目标频道
    pub channel: String,
}

impl SlackConfig {
    pub fn from_env(channel: impl Into<String>) -> Self {
        Self {
            token: std::env::var("SLACK_BOT_TOKEN").ok(),
            channel: channel.into(),
        }
    }
}

pub struct SlackNotifier {
    config: SlackConfig,
    client: reqwest::Client,
    enabled: bool,
}

#[derive(Debug, Deserialize)]
struct SlackApiResponse {
    ok: bool,
    error: Option<String>,
}

impl SlackNotifier {
    pub fn new(config: SlackConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            enabled: true,
        }
    }

    fn build_text(message: &NotifyMessage) -> String {
        if message.title.is_empty() {
            message.content.clone()
        } else {
            format!("*{}*\n\n{}", message.title, message.content)
        }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn send(&self, message: &NotifyMessage) -> Result<NotifyResult, NotifyError> {
        let Some(token) = self.config.token.as_deref() else {
            return Ok(NotifyResult::failure(
                "Slack client not initialized - missing SLACK_BOT_TOKEN",
            ));
        };

        let body = serde_json::json!({
            "channel": self.config.channel,
            "text": Self::build_text(message),
            "unfurl_links": false,
            "unfurl_media": false,
        });

        let response = self
            .client
            .post("https://slack.com/api/chat.postMessage")
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Ok(NotifyResult::failure(format!(
                "Slack failed with status: {}",
                response.status()
            )));
        }

        let api: SlackApiResponse = response
            .json()
            .await
            .map_err(|e| NotifyError::Http(e.to_string()))?;

        if api.ok {
            info!("Slack message sent to {}", self.config.channel);
            Ok(NotifyResult::success())
        } else {
            Ok(NotifyResult::failure(format!(
                "Slack API error: {}",
                api.error.unwrap_or_else(|| "unknown".to_string())
            )))
        }
    }

    fn name(&self) -> &str {
        "slack"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

// ============================================================================
// Discord 通知（桩实现：校验凭据并记录，不实际发送）
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    pub token: Option<String>,
    /// 目标服务器
    pub target: String,
}

impl DiscordConfig {
    pub fn from_env(target: impl Into<String>) -> Self {
        Self {
            token: std::env::var("DISCORD_BOT_TOKEN").ok(),
            target: target.into(),
        }
    }
}

pub struct DiscordNotifier {
    config: DiscordConfig,
    enabled: bool,
}

impl DiscordNotifier {
    pub fn new(config: DiscordConfig) -> Self {
        Self {
            config,
            enabled: true,
        }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, message: &NotifyMessage) -> Result<NotifyResult, NotifyError> {
        if self.config.token.is_none() {
            return Ok(NotifyResult::failure(
                "Discord client not initialized - missing DISCORD_BOT_TOKEN",
            ));
        }

        // 暂无真实 Discord 接入，仅记录准备好的消息
        let preview: String = message.content.chars().take(100).collect();
        info!(
            "Discord message prepared for {}: {}...",
            self.config.target, preview
        );

        Ok(NotifyResult {
            success: true,
            message: "Discord message prepared (not transmitted)".to_string(),
        })
    }

    fn name(&self) -> &str {
        "discord"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

// ============================================================================
// 邮件通知
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
    pub to: Vec<String>,
}

pub struct EmailNotifier {
    config: EmailConfig,
    enabled: bool,
}

impl EmailNotifier {
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config,
            enabled: true,
        }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, message: &NotifyMessage) -> Result<NotifyResult, NotifyError> {
        use lettre::message::header::ContentType;
        use lettre::transport::smtp::authentication::Credentials;
        use lettre::{Message, SmtpTransport, Transport};

        let (Some(username), Some(password)) = (
            self.config.username.clone(),
            self.config.password.clone(),
        ) else {
            return Ok(NotifyResult::failure(
                "Email credentials not configured, skipping delivery",
            ));
        };

        let mut builder = Message::builder()
            .from(
                self.config
                    .from
                    .parse()
                    .map_err(|e| NotifyError::InvalidMessage(format!("from: {}", e)))?,
            )
            .subject(&message.title);

        for recipient in &self.config.to {
            builder = builder.to(recipient
                .parse()
                .map_err(|e| NotifyError::InvalidMessage(format!("to: {}", e)))?);
        }

        let email = match &message.html {
            Some(html) => builder
                .header(ContentType::TEXT_HTML)
                .body(html.clone())
                .map_err(|e| NotifyError::InvalidMessage(e.to_string()))?,
            None => builder
                .header(ContentType::TEXT_PLAIN)
                .body(format!(
                    "{}\n\nLevel: {:?}\nTime: {}",
                    message.content, message.level, message.timestamp
                ))
                .map_err(|e| NotifyError::InvalidMessage(e.to_string()))?,
        };

        let creds = Credentials::new(username, password);

        let mailer = SmtpTransport::starttls_relay(&self.config.smtp_host)
            .map_err(|e| NotifyError::Smtp(e.to_string()))?
            .credentials(creds)
            .port(self.config.smtp_port)
            .build();

        match mailer.send(&email) {
            Ok(_) => {
                info!("Report email sent to {} recipient(s)", self.config.to.len());
                Ok(NotifyResult::success())
            }
            Err(e) => Ok(NotifyResult::failure(format!("Email send failed: {}", e))),
        }
    }

    fn name(&self) -> &str {
        "email"
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
