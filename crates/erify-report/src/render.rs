use crate::kind::ReportKind;
use chrono::Utc;
use erify_metrics::Snapshot;
use minijinja::Environment;
use serde::Serialize;

const REPORT_TEMPLATE: &str = include_str!("templates/report.html");

/// 报表渲染错误
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("template render failed: {0}")]
    Template(#[from] minijinja::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("report write failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct CampaignRow {
    name: String,
    sessions: String,
    conversions: u64,
    conversion_rate: String,
}

#[derive(Debug, Serialize)]
struct PlatformCard {
    name: String,
    likes: String,
    comments: String,
    shares: String,
    engagement_rate: String,
    reach: String,
}

#[derive(Debug, Serialize)]
struct ErivoxCard {
    active_users: String,
    posts: String,
    interactions: String,
    engagement_rate: String,
}

#[derive(Debug, Serialize)]
struct ReportContext {
    kind_title: &'static str,
    period_start: String,
    period_end: String,
    total_sessions: String,
    total_conversions: u64,
    conversion_rate: String,
    total_engagement: String,
    campaigns: Vec<CampaignRow>,
    platforms: Vec<PlatformCard>,
    erivox: Option<ErivoxCard>,
    generated_at: String,
}

/// 渲染 HTML 报表
pub fn render_html(snapshot: &Snapshot, kind: ReportKind) -> Result<String, ReportError> {
    let mut env = Environment::new();
    env.add_template("report.html", REPORT_TEMPLATE)?;
    let template = env.get_template("report.html")?;

    let context = build_context(snapshot, kind);
    Ok(template.render(&context)?)
}

/// 渲染 JSON 报表（快照原样序列化，供 API 消费）
pub fn render_json(snapshot: &Snapshot) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

fn build_context(snapshot: &Snapshot, kind: ReportKind) -> ReportContext {
    let campaigns = snapshot
        .utm
        .as_ref()
        .map(|utm| {
            utm.campaigns
                .iter()
                .map(|(name, stats)| CampaignRow {
                    name: title_case(name),
                    sessions: format_count(stats.sessions),
                    conversions: stats.conversions,
                    conversion_rate: format!("{:.1}%", stats.conversion_rate_percent()),
                })
                .collect()
        })
        .unwrap_or_default();

    let platforms = snapshot
        .social
        .values()
        .map(|social| PlatformCard {
            name: title_case(&social.platform),
            likes: format_count(social.likes),
            comments: format_count(social.comments),
            shares: format_count(social.shares),
            engagement_rate: format_rate(social.engagement_rate),
            reach: format_count(social.reach),
        })
        .collect();

    let erivox = snapshot.erivox.as_ref().map(|erivox| ErivoxCard {
        active_users: format_count(erivox.active_users),
        posts: format_count(erivox.posts),
        interactions: format_count(erivox.interactions),
        engagement_rate: format_rate(erivox.engagement_rate),
    });

    ReportContext {
        kind_title: kind.title(),
        period_start: snapshot.period.start.format("%Y-%m-%d").to_string(),
        period_end: snapshot.period.end.format("%Y-%m-%d").to_string(),
        total_sessions: format_count(snapshot.sessions()),
        total_conversions: snapshot.conversions(),
        conversion_rate: format_rate(snapshot.conversion_rate()),
        total_engagement: format_count(snapshot.total_engagement()),
        campaigns,
        platforms,
        erivox,
        generated_at: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    }
}

/// 千分位计数（1250 -> "1,250"）
fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// 比率转百分比（0.047 -> "4.7%"）
fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// 连字符名转标题（"erify-supreme4-launch" -> "Erify Supreme4 Launch"）
fn title_case(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use erify_metrics::{DateRange, Snapshot, SourceData};
    use erify_metrics::{ErivoxSource, GoogleAnalyticsSource, MetricSource, SocialMediaSource};

    async fn mock_snapshot() -> Snapshot {
        let mut snapshot = Snapshot::new(DateRange::last_days(1));
        let range = snapshot.period;

        match GoogleAnalyticsSource::new("k", "v").collect(&range).await {
            Ok(SourceData::Utm(utm)) => snapshot.utm = Some(utm),
            _ => unreachable!(),
        }
        match SocialMediaSource::new("twitter", "k", "a")
            .unwrap()
            .collect(&range)
            .await
        {
            Ok(SourceData::Social(social)) => {
                snapshot.social.insert(social.platform.clone(), social);
            }
            _ => unreachable!(),
        }
        match ErivoxSource::new("k").collect(&range).await {
            Ok(SourceData::Erivox(erivox)) => snapshot.erivox = Some(erivox),
            _ => unreachable!(),
        }

        snapshot
    }

    #[tokio::test]
    async fn test_render_html_contains_sections() {
        let snapshot = mock_snapshot().await;
        let html = render_html(&snapshot, ReportKind::Daily).unwrap();

        assert!(html.contains("ERIFY™ Campaign Performance Report"));
        assert!(html.contains("Daily Report"));
        // 千分位会话数
        assert!(html.contains("1,250"));
        // 活动行
        assert!(html.contains("Erify Supreme4 Launch"));
        assert!(html.contains("Erify Neon Crown Series"));
        // 平台卡片
        assert!(html.contains("Twitter"));
        assert!(html.contains("4.7%"));
        // ERIVOX 卡片
        assert!(html.contains("ERIVOX"));
        assert!(html.contains("890"));
    }

    #[tokio::test]
    async fn test_render_html_without_erivox_omits_card() {
        let mut snapshot = mock_snapshot().await;
        snapshot.erivox = None;

        let html = render_html(&snapshot, ReportKind::Weekly).unwrap();
        assert!(!html.contains("Active Users"));
        assert!(html.contains("Weekly Report"));
    }

    #[tokio::test]
    async fn test_render_json_roundtrip() {
        let snapshot = mock_snapshot().await;
        let json = render_json(&snapshot).unwrap();

        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1250), "1,250");
        assert_eq!(format_count(15600), "15,600");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("erify-supreme4-launch"), "Erify Supreme4 Launch");
        assert_eq!(title_case("twitter"), "Twitter");
    }
}
