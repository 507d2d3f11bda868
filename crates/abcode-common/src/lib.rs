pub mod errors;
pub mod notifications;
pub mod types;

pub use errors::{AbcodeError, ConfigError, PanelError};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use types::{ContentOrigin, DocumentSnapshot, PanelId, PanelPhase};

pub type Result<T> = std::result::Result<T, AbcodeError>;
