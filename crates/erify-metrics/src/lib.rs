pub mod aggregator;
pub mod alert;
pub mod snapshot;
pub mod source;

pub use aggregator::Aggregator;
pub use alert::{Alert, AlertKind, AlertManager, AlertSeverity};
pub use snapshot::{
    CampaignStats, DateRange, ErivoxMetrics, GrowthMetrics, Snapshot, SocialMetrics, TopPost,
    UtmMetrics,
};
pub use source::{
    CollectError, ErivoxSource, GoogleAnalyticsSource, MetricSource, SocialMediaSource, SourceData,
};
