pub mod attachment;
pub mod channel_set;
pub mod email_request;
pub mod notification;
pub mod user;

pub use attachment::Attachment;
pub use channel_set::{ChannelKind, ChannelSet};
pub use email_request::EmailRequest;
pub use notification::{Notification, NotificationCategory, NotificationType};
pub use user::User;
