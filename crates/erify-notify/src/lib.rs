pub mod manager;
pub mod message;
pub mod notifier;
pub mod providers;

pub use manager::NotifyManager;
pub use message::{NotifyChannel, NotifyLevel, NotifyMessage};
pub use notifier::{Notifier, NotifyError, NotifyResult};
pub use providers::{
    DiscordConfig, DiscordNotifier, EmailConfig, EmailNotifier, SlackConfig, SlackNotifier,
};
