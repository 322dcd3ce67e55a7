use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 采集时间区间
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// 截至当前时刻、向前回溯 n 天
    pub fn last_days(days: i64) -> Self {
        let end = Utc::now();
        Self {
            start: end - Duration::days(days),
            end,
        }
    }
}

/// 单个 UTM 活动的会话/转化
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CampaignStats {
    pub sessions: u64,
    pub conversions: u64,
}

impl CampaignStats {
    /// 活动转化率（百分比，无会话时为 0）
    pub fn conversion_rate_percent(&self) -> f64 {
        if self.sessions == 0 {
            0.0
        } else {
            self.conversions as f64 / self.sessions as f64 * 100.0
        }
    }
}

/// UTM 流量指标（Google Analytics 口径）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtmMetrics {
    pub sessions: u64,
    pub users: u64,
    pub pageviews: u64,
    pub bounce_rate: f64,
    pub avg_session_duration: f64,
    pub conversions: u64,
    pub conversion_rate: f64,
    /// 活动名 -> 活动指标
    pub campaigns: BTreeMap<String, CampaignStats>,
}

/// 热门帖子
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPost {
    pub id: String,
    pub content: String,
    pub likes: u64,
    pub shares: u64,
    pub engagement_rate: f64,
}

/// 单个社媒平台的互动指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialMetrics {
    pub platform: String,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub clicks: u64,
    pub impressions: u64,
    pub reach: u64,
    pub engagement_rate: f64,
    pub top_posts: Vec<TopPost>,
}

/// ERIVOX 平台增长指标
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthMetrics {
    pub new_users: u64,
    pub user_retention: f64,
    pub daily_active_users: u64,
}

/// ERIVOX 平台互动指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErivoxMetrics {
    pub active_users: u64,
    pub posts: u64,
    pub interactions: u64,
    pub voice_messages: u64,
    pub live_sessions: u64,
    pub engagement_rate: f64,
    pub growth: GrowthMetrics,
}

/// 一次采集得到的全量指标快照
///
/// 每次报表运行生成一份，序列化落盘后即丢弃，运行期间不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// 采集时刻
    pub collected_at: DateTime<Utc>,

    /// 统计区间
    pub period: DateRange,

    /// UTM 流量数据
    pub utm: Option<UtmMetrics>,

    /// 平台名 -> 社媒互动数据
    pub social: BTreeMap<String, SocialMetrics>,

    /// ERIVOX 数据
    pub erivox: Option<ErivoxMetrics>,
}

impl Snapshot {
    pub fn new(period: DateRange) -> Self {
        Self {
            collected_at: Utc::now(),
            period,
            utm: None,
            social: BTreeMap::new(),
            erivox: None,
        }
    }

    /// 全平台互动总量（点赞 + 评论 + 转发）
    pub fn total_engagement(&self) -> u64 {
        self.social
            .values()
            .map(|m| m.likes + m.comments + m.shares)
            .sum()
    }

    /// 全平台互动率均值（无社媒数据时为 0）
    pub fn mean_engagement_rate(&self) -> f64 {
        if self.social.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.social.values().map(|m| m.engagement_rate).sum();
        sum / self.social.len() as f64
    }

    pub fn sessions(&self) -> u64 {
        self.utm.as_ref().map(|u| u.sessions).unwrap_or(0)
    }

    pub fn conversions(&self) -> u64 {
        self.utm.as_ref().map(|u| u.conversions).unwrap_or(0)
    }

    pub fn conversion_rate(&self) -> f64 {
        self.utm.as_ref().map(|u| u.conversion_rate).unwrap_or(0.0)
    }
}
