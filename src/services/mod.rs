pub mod filter;
pub mod notification_service;
pub mod subscriber_service;
pub mod sync_service;

pub use filter::select_new;
pub use notification_service::{NotificationService, Notifier};
pub use subscriber_service::SubscriberService;
pub use sync_service::SyncService;
