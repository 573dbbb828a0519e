pub mod mail_transport;
pub mod notification_channel;

pub use mail_transport::{MailError, MailTransport};
pub use notification_channel::{ChannelError, NotificationChannel};
