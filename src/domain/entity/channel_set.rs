use std::ops::{BitAnd, BitOr};

use serde::{Deserialize, Serialize};

/// A single delivery mechanism for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Email,
    Sms,
    Push,
}

impl ChannelKind {
    pub const fn bit(self) -> u8 {
        match self {
            ChannelKind::Email => 1,
            ChannelKind::Sms => 2,
            ChannelKind::Push => 4,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ChannelKind::Email => "email",
            ChannelKind::Sms => "sms",
            ChannelKind::Push => "push",
        }
    }
}

/// Combinable set of delivery channels stored as a bitmask.
///
/// Zero is the "no channel" sentinel and is never combined with other
/// bits. On a notification, an empty set means "no restriction".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelSet(u8);

impl ChannelSet {
    pub const NONE: ChannelSet = ChannelSet(0);
    pub const EMAIL: ChannelSet = ChannelSet(1);
    pub const SMS: ChannelSet = ChannelSet(2);
    pub const PUSH: ChannelSet = ChannelSet(4);

    const MASK: u8 = 0b111;

    /// Builds a set from raw bits, discarding anything outside the known
    /// channel range.
    pub const fn from_bits(bits: u8) -> Self {
        ChannelSet(bits & Self::MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, kind: ChannelKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Set members in fixed order: Email, Sms, Push.
    pub fn kinds(self) -> impl Iterator<Item = ChannelKind> {
        [ChannelKind::Email, ChannelKind::Sms, ChannelKind::Push]
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl BitAnd for ChannelSet {
    type Output = ChannelSet;

    fn bitand(self, rhs: ChannelSet) -> ChannelSet {
        ChannelSet(self.0 & rhs.0)
    }
}

impl BitOr for ChannelSet {
    type Output = ChannelSet;

    fn bitor(self, rhs: ChannelSet) -> ChannelSet {
        ChannelSet(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_bits() {
        let set = ChannelSet::EMAIL | ChannelSet::PUSH;
        assert_eq!(set.bits(), 5);
        assert!(set.contains(ChannelKind::Email));
        assert!(!set.contains(ChannelKind::Sms));
        assert!(set.contains(ChannelKind::Push));
    }

    #[test]
    fn intersection() {
        let user = ChannelSet::EMAIL;
        let restriction = ChannelSet::PUSH;
        assert!((user & restriction).is_empty());

        let both = ChannelSet::EMAIL | ChannelSet::SMS;
        assert_eq!(both & ChannelSet::EMAIL, ChannelSet::EMAIL);
    }

    #[test]
    fn kinds_in_fixed_order() {
        let set = ChannelSet::from_bits(0b111);
        let kinds: Vec<ChannelKind> = set.kinds().collect();
        assert_eq!(
            kinds,
            vec![ChannelKind::Email, ChannelKind::Sms, ChannelKind::Push]
        );
    }

    #[test]
    fn from_bits_discards_unknown() {
        let set = ChannelSet::from_bits(0b1111_1000);
        assert!(set.is_empty());
    }

    #[test]
    fn kind_names() {
        assert_eq!(ChannelKind::Email.as_str(), "email");
        assert_eq!(ChannelKind::Sms.as_str(), "sms");
        assert_eq!(ChannelKind::Push.as_str(), "push");
    }
}
