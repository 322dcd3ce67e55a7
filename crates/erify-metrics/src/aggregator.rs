use crate::snapshot::{DateRange, Snapshot};
use crate::source::{MetricSource, SourceData};
use tracing::{error, info};

/// 指标聚合器
///
/// 逐个调用注册的数据源，按变体归位到同一份快照；
/// 单个数据源失败只记录日志，不影响其余数据源。
pub struct Aggregator {
    sources: Vec<Box<dyn MetricSource>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// 注册数据源
    pub fn add_source(&mut self, source: Box<dyn MetricSource>) {
        info!("Adding metric source: {}", source.name());
        self.sources.push(source);
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// 采集所有数据源，汇总为一份快照
    pub async fn collect_all(&self, range: &DateRange) -> Snapshot {
        let mut snapshot = Snapshot::new(*range);

        for source in &self.sources {
            match source.collect(range).await {
                Ok(SourceData::Utm(utm)) => {
                    snapshot.utm = Some(utm);
                }
                Ok(SourceData::Social(social)) => {
                    snapshot.social.insert(social.platform.clone(), social);
                }
                Ok(SourceData::Erivox(erivox)) => {
                    snapshot.erivox = Some(erivox);
                }
                Err(e) => {
                    error!("Failed to collect from {}: {}", source.name(), e);
                }
            }
        }

        snapshot
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{
        CollectError, ErivoxSource, GoogleAnalyticsSource, SocialMediaSource,
    };
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl MetricSource for FailingSource {
        async fn collect(&self, _range: &DateRange) -> Result<SourceData, CollectError> {
            Err(CollectError::Http("connection refused".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_collect_all_routes_variants() {
        let mut aggregator = Aggregator::new();
        aggregator.add_source(Box::new(GoogleAnalyticsSource::new("key", "view")));
        aggregator.add_source(Box::new(
            SocialMediaSource::new("twitter", "key", "@erify_official").unwrap(),
        ));
        aggregator.add_source(Box::new(
            SocialMediaSource::new("linkedin", "key", "company/erify").unwrap(),
        ));
        aggregator.add_source(Box::new(ErivoxSource::new("key")));
        assert_eq!(aggregator.source_count(), 4);

        let snapshot = aggregator.collect_all(&DateRange::last_days(1)).await;

        assert!(snapshot.utm.is_some());
        assert_eq!(snapshot.social.len(), 2);
        assert!(snapshot.social.contains_key("twitter"));
        assert!(snapshot.social.contains_key("linkedin"));
        assert!(snapshot.erivox.is_some());
    }

    #[tokio::test]
    async fn test_failing_source_does_not_abort_batch() {
        let mut aggregator = Aggregator::new();
        aggregator.add_source(Box::new(FailingSource));
        aggregator.add_source(Box::new(GoogleAnalyticsSource::new("key", "view")));

        let snapshot = aggregator.collect_all(&DateRange::last_days(1)).await;

        // 失败的数据源被跳过，其余正常归位
        assert!(snapshot.utm.is_some());
        assert!(snapshot.social.is_empty());
    }
}
