use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 报表种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Daily,
    Weekly,
    Monthly,
}

impl ReportKind {
    /// 统计区间回溯天数
    pub fn lookback_days(&self) -> i64 {
        match self {
            ReportKind::Daily => 1,
            ReportKind::Weekly => 7,
            ReportKind::Monthly => 30,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Daily => "daily",
            ReportKind::Weekly => "weekly",
            ReportKind::Monthly => "monthly",
        }
    }

    /// 标题形式（"Daily" 等）
    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::Daily => "Daily",
            ReportKind::Weekly => "Weekly",
            ReportKind::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 报表邮件主题
pub fn email_subject(kind: ReportKind, now: DateTime<Local>) -> String {
    match kind {
        ReportKind::Daily => format!(
            "ERIFY™ Daily Campaign Performance Report - {}",
            now.format("%Y-%m-%d")
        ),
        ReportKind::Weekly => format!(
            "ERIFY™ Weekly Campaign Performance Report - Week of {}",
            now.format("%Y-%m-%d")
        ),
        ReportKind::Monthly => format!(
            "ERIFY™ Monthly Campaign Performance Report - {}",
            now.format("%B %Y")
        ),
    }
}
