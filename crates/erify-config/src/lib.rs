pub mod mode;
pub mod schedule;
pub mod settings;
pub mod targets;

pub use mode::Mode;
pub use schedule::{parse_hhmm, ScheduleEntry, ScheduleTable};
pub use settings::{AlertThresholds, OpsConfig, SmtpConfig};
pub use targets::ChannelTargets;
