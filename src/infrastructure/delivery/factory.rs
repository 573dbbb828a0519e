use std::sync::Arc;

use crate::domain::entity::channel_set::{ChannelKind, ChannelSet};
use crate::domain::service::NotificationChannel;

use super::compound_channel::CompoundChannel;

/// Builds the compound channel for one dispatch: exactly one concrete
/// channel per set bit, in fixed order (email, sms, push).
///
/// The three slots are wired once at startup; push carries either the
/// real web-push channel or the logging stub depending on configuration.
pub struct ChannelFactory {
    email: Arc<dyn NotificationChannel>,
    sms: Arc<dyn NotificationChannel>,
    push: Arc<dyn NotificationChannel>,
}

impl ChannelFactory {
    pub fn new(
        email: Arc<dyn NotificationChannel>,
        sms: Arc<dyn NotificationChannel>,
        push: Arc<dyn NotificationChannel>,
    ) -> Self {
        Self { email, sms, push }
    }

    pub fn build(&self, channels: ChannelSet) -> CompoundChannel {
        let mut selected: Vec<Arc<dyn NotificationChannel>> = Vec::new();
        for kind in channels.kinds() {
            match kind {
                ChannelKind::Email => selected.push(Arc::clone(&self.email)),
                ChannelKind::Sms => selected.push(Arc::clone(&self.sms)),
                ChannelKind::Push => selected.push(Arc::clone(&self.push)),
            }
        }
        CompoundChannel::new(selected)
    }
}
