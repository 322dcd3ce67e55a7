pub mod automation;
pub mod messages;
pub mod readme;

pub use automation::run_launch;
pub use messages::LaunchMessages;
pub use readme::{apply_section, render_section, update_readme};
