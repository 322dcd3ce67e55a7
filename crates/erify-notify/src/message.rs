use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NotifyLevel {
    /// 信息
    Info,
    /// 警告
    Warning,
    /// 错误
    Error,
    /// 严重
    Critical,
}

/// 通知渠道
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyChannel {
    /// Slack
    Slack,
    /// Discord
    Discord,
    /// 邮件
    Email,
}

impl NotifyChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyChannel::Slack => "slack",
            NotifyChannel::Discord => "discord",
            NotifyChannel::Email => "email",
        }
    }
}

impl fmt::Display for NotifyChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 通知消息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyMessage {
    /// 标题（邮件主题 / Slack 加粗首行）
    pub title: String,

    /// 正文（纯文本）
    pub content: String,

    /// 级别
    pub level: NotifyLevel,

    /// 时间
    pub timestamp: DateTime<Utc>,

    /// HTML 正文（仅邮件渠道使用，缺省时退回纯文本）
    pub html: Option<String>,
}

impl NotifyMessage {
    pub fn new(title: impl Into<String>, content: impl Into<String>, level: NotifyLevel) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            level,
            timestamp: Utc::now(),
            html: None,
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// 创建信息级别消息
    pub fn info(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(title, content, NotifyLevel::Info)
    }

    /// 创建警告级别消息
    pub fn warning(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(title, content, NotifyLevel::Warning)
    }

    /// 创建错误级别消息
    pub fn error(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(title, content, NotifyLevel::Error)
    }
}
