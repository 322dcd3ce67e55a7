use crate::snapshot::{
    CampaignStats, DateRange, ErivoxMetrics, GrowthMetrics, SocialMetrics, TopPost, UtmMetrics,
};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// 采集错误
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("missing credential: {0}")]
    MissingCredential(String),

    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
}

/// 单个数据源的采集结果（带标签的变体，聚合器按变体归位）
#[derive(Debug, Clone, PartialEq)]
pub enum SourceData {
    Utm(UtmMetrics),
    Social(SocialMetrics),
    Erivox(ErivoxMetrics),
}

/// 指标数据源接口
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// 采集指定区间的指标
    async fn collect(&self, range: &DateRange) -> Result<SourceData, CollectError>;

    /// 数据源名称
    fn name(&self) -> &str;
}

// ============================================================================
// Google Analytics（UTM 流量）
// ============================================================================

pub struct GoogleAnalyticsSource {
    #[allow(dead_code)]
    api_key: String,
    #[allow(dead_code)]
    view_id: String,
    #[allow(dead_code)]
    base_url: String,
}

impl GoogleAnalyticsSource {
    pub fn new(api_key: impl Into<String>, view_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            view_id: view_id.into(),
            base_url: "https://analyticsreporting.googleapis.com/v4/reports:batchGet".to_string(),
        }
    }
}

#[async_trait]
impl MetricSource for GoogleAnalyticsSource {
    async fn collect(&self, _range: &DateRange) -> Result<SourceData, CollectError> {
        // 演示用固定数据；接入真实 API 时替换为 reporting 请求
        let mut campaigns = BTreeMap::new();
        campaigns.insert(
            "erify-supreme4-launch".to_string(),
            CampaignStats {
                sessions: 450,
                conversions: 18,
            },
        );
        campaigns.insert(
            "erify-vip-referral".to_string(),
            CampaignStats {
                sessions: 320,
                conversions: 15,
            },
        );
        campaigns.insert(
            "erify-luxury-fintech".to_string(),
            CampaignStats {
                sessions: 280,
                conversions: 8,
            },
        );
        campaigns.insert(
            "erify-neon-crown-series".to_string(),
            CampaignStats {
                sessions: 200,
                conversions: 4,
            },
        );

        Ok(SourceData::Utm(UtmMetrics {
            sessions: 1250,
            users: 980,
            pageviews: 3400,
            bounce_rate: 0.35,
            avg_session_duration: 145.6,
            conversions: 45,
            conversion_rate: 0.036,
            campaigns,
        }))
    }

    fn name(&self) -> &str {
        "google_analytics"
    }
}

// ============================================================================
// 社媒平台（Twitter / LinkedIn / Facebook）
// ============================================================================

pub struct SocialMediaSource {
    platform: String,
    #[allow(dead_code)]
    api_key: String,
    #[allow(dead_code)]
    account_id: String,
    #[allow(dead_code)]
    base_url: String,
}

impl SocialMediaSource {
    pub fn new(
        platform: impl Into<String>,
        api_key: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Result<Self, CollectError> {
        let platform = platform.into();
        let base_url = match platform.as_str() {
            "twitter" => "https://api.twitter.com/2",
            "linkedin" => "https://api.linkedin.com/v2",
            "facebook" => "https://graph.facebook.com/v18.0",
            other => return Err(CollectError::UnsupportedPlatform(other.to_string())),
        }
        .to_string();

        Ok(Self {
            platform,
            api_key: api_key.into(),
            account_id: account_id.into(),
            base_url,
        })
    }
}

#[async_trait]
impl MetricSource for SocialMediaSource {
    async fn collect(&self, _range: &DateRange) -> Result<SourceData, CollectError> {
        // 演示用固定数据；接入真实 API 时按平台各自的 metrics 接口取数
        Ok(SourceData::Social(SocialMetrics {
            platform: self.platform.clone(),
            likes: 450,
            comments: 89,
            shares: 156,
            clicks: 234,
            impressions: 15600,
            reach: 12400,
            engagement_rate: 0.047,
            top_posts: vec![
                TopPost {
                    id: "post_1".to_string(),
                    content: "ERIFY Supreme 4PW Crown Seal Launch".to_string(),
                    likes: 120,
                    shares: 45,
                    engagement_rate: 0.065,
                },
                TopPost {
                    id: "post_2".to_string(),
                    content: "VIP Referral Program Announcement".to_string(),
                    likes: 98,
                    shares: 32,
                    engagement_rate: 0.052,
                },
            ],
        }))
    }

    fn name(&self) -> &str {
        &self.platform
    }
}

// ============================================================================
// ERIVOX 平台
// ============================================================================

pub struct ErivoxSource {
    #[allow(dead_code)]
    api_key: String,
    #[allow(dead_code)]
    base_url: String,
}

impl ErivoxSource {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.erivox.com/v1".to_string(),
        }
    }
}

#[async_trait]
impl MetricSource for ErivoxSource {
    async fn collect(&self, _range: &DateRange) -> Result<SourceData, CollectError> {
        Ok(SourceData::Erivox(ErivoxMetrics {
            active_users: 890,
            posts: 156,
            interactions: 1240,
            voice_messages: 89,
            live_sessions: 12,
            engagement_rate: 0.078,
            growth: GrowthMetrics {
                new_users: 45,
                user_retention: 0.84,
                daily_active_users: 340,
            },
        }))
    }

    fn name(&self) -> &str {
        "erivox"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_google_analytics_payload() {
        let source = GoogleAnalyticsSource::new("key", "view");
        let data = source.collect(&DateRange::last_days(1)).await.unwrap();

        match data {
            SourceData::Utm(utm) => {
                assert_eq!(utm.sessions, 1250);
                assert_eq!(utm.conversions, 45);
                assert_eq!(utm.campaigns.len(), 4);
                assert_eq!(utm.campaigns["erify-supreme4-launch"].sessions, 450);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_social_payload_keeps_platform() {
        let source = SocialMediaSource::new("linkedin", "key", "company/erify").unwrap();
        assert_eq!(source.name(), "linkedin");

        let data = source.collect(&DateRange::last_days(7)).await.unwrap();
        match data {
            SourceData::Social(social) => {
                assert_eq!(social.platform, "linkedin");
                assert_eq!(social.likes, 450);
                assert_eq!(social.top_posts.len(), 2);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_platform_rejected() {
        assert!(SocialMediaSource::new("myspace", "key", "acct").is_err());
    }

    #[tokio::test]
    async fn test_erivox_payload() {
        let source = ErivoxSource::new("key");
        let data = source.collect(&DateRange::last_days(30)).await.unwrap();
        match data {
            SourceData::Erivox(erivox) => {
                assert_eq!(erivox.active_users, 890);
                assert_eq!(erivox.growth.daily_active_users, 340);
            }
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
