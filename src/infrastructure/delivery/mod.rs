pub mod compound_channel;
pub mod email_channel;
pub mod factory;
pub mod push_channel;
pub mod sms_channel;
pub mod web_push_channel;

pub use compound_channel::CompoundChannel;
pub use email_channel::EmailChannel;
pub use factory::ChannelFactory;
pub use push_channel::PushChannel;
pub use sms_channel::SmsChannel;
pub use web_push_channel::WebPushChannel;
