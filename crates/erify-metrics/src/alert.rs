use crate::snapshot::Snapshot;
use erify_config::AlertThresholds;
use serde::{Deserialize, Serialize};
use tracing::info;

/// 告警种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    EngagementRateDrop,
    TrafficDrop,
    ConversionRateDrop,
}

/// 告警级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Medium,
    High,
}

/// 一次阈值比较产生的告警（瞬态，不落盘）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub message: String,
    pub current_value: f64,
    pub previous_value: f64,
}

/// 阈值告警检查器
pub struct AlertManager {
    thresholds: AlertThresholds,
}

impl AlertManager {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    /// 比较当前与上一期快照，产出越阈告警
    ///
    /// 历史快照由调用方提供；没有历史数据时不产生任何告警。
    /// 上一期取值为 0 的指标跳过比较。
    pub fn check(&self, current: &Snapshot, previous: Option<&Snapshot>) -> Vec<Alert> {
        let Some(previous) = previous else {
            return Vec::new();
        };

        let mut alerts = Vec::new();

        // 互动率
        let current_engagement = current.mean_engagement_rate();
        let previous_engagement = previous.mean_engagement_rate();
        if previous_engagement > 0.0 {
            let change = (current_engagement - previous_engagement) / previous_engagement;
            if change < -self.thresholds.engagement_rate_drop {
                alerts.push(Alert {
                    kind: AlertKind::EngagementRateDrop,
                    severity: AlertSeverity::High,
                    message: format!("Engagement rate dropped by {:.1}%", change.abs() * 100.0),
                    current_value: current_engagement,
                    previous_value: previous_engagement,
                });
            }
        }

        // 流量（会话数）
        let current_sessions = current.sessions();
        let previous_sessions = previous.sessions();
        if previous_sessions > 0 {
            let change =
                (current_sessions as f64 - previous_sessions as f64) / previous_sessions as f64;
            if change < -self.thresholds.traffic_drop {
                alerts.push(Alert {
                    kind: AlertKind::TrafficDrop,
                    severity: AlertSeverity::Medium,
                    message: format!("Website traffic dropped by {:.1}%", change.abs() * 100.0),
                    current_value: current_sessions as f64,
                    previous_value: previous_sessions as f64,
                });
            }
        }

        // 转化率
        let current_rate = current.conversion_rate();
        let previous_rate = previous.conversion_rate();
        if previous_rate > 0.0 {
            let change = (current_rate - previous_rate) / previous_rate;
            if change < -self.thresholds.conversion_rate_drop {
                alerts.push(Alert {
                    kind: AlertKind::ConversionRateDrop,
                    severity: AlertSeverity::Medium,
                    message: format!("Conversion rate dropped by {:.1}%", change.abs() * 100.0),
                    current_value: current_rate,
                    previous_value: previous_rate,
                });
            }
        }

        if !alerts.is_empty() {
            info!("Threshold check produced {} alert(s)", alerts.len());
        }

        alerts
    }
}
