pub mod cleanup_attachments;
pub mod create_notification;
pub mod dispatch_notification;
pub mod list_unread_notifications;
pub mod mark_notification_read;

pub use cleanup_attachments::CleanupAttachmentsUseCase;
pub use create_notification::CreateNotificationUseCase;
pub use dispatch_notification::DispatchNotificationUseCase;
pub use list_unread_notifications::ListUnreadNotificationsUseCase;
pub use mark_notification_read::MarkNotificationReadUseCase;
