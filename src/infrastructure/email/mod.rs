pub mod composer;
pub mod smtp_mailer;
pub mod template;

pub use composer::EmailComposer;
pub use smtp_mailer::SmtpMailer;
pub use template::{EmailTemplate, TemplateStore, Token};
