pub mod attachment_postgres;
pub mod notification_postgres;

pub use attachment_postgres::AttachmentPostgresRepository;
pub use notification_postgres::NotificationPostgresRepository;
