//! Lifecycle tags
//!
//! The twelve call-state notifications a host may deliver, in the order of
//! the host's state handler table.

use strum_macros::{EnumCount, EnumIter, EnumString};

/// A named call-state notification.
///
/// Parses from the kebab-case name (`on-init`), the snake-case table field
/// name (`on_init`) or the callback method name (`onInit`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumString,
    EnumIter,
    EnumCount,
)]
pub enum Tag {
    #[strum(serialize = "on-init", serialize = "on_init", serialize = "onInit")]
    Init,
    #[strum(serialize = "on-routing", serialize = "on_routing", serialize = "onRouting")]
    Routing,
    #[strum(serialize = "on-execute", serialize = "on_execute", serialize = "onExecute")]
    Execute,
    #[strum(serialize = "on-hangup", serialize = "on_hangup", serialize = "onHangup")]
    Hangup,
    #[strum(
        serialize = "on-exchange-media",
        serialize = "on_exchange_media",
        serialize = "onExchangeMedia"
    )]
    ExchangeMedia,
    #[strum(
        serialize = "on-soft-execute",
        serialize = "on_soft_execute",
        serialize = "onSoftExecute"
    )]
    SoftExecute,
    #[strum(
        serialize = "on-consume-media",
        serialize = "on_consume_media",
        serialize = "onConsumeMedia"
    )]
    ConsumeMedia,
    #[strum(serialize = "on-hibernate", serialize = "on_hibernate", serialize = "onHibernate")]
    Hibernate,
    #[strum(serialize = "on-reset", serialize = "on_reset", serialize = "onReset")]
    Reset,
    #[strum(serialize = "on-park", serialize = "on_park", serialize = "onPark")]
    Park,
    #[strum(serialize = "on-reporting", serialize = "on_reporting", serialize = "onReporting")]
    Reporting,
    #[strum(serialize = "on-destroy", serialize = "on_destroy", serialize = "onDestroy")]
    Destroy,
}

impl Tag {
    /// Position of the tag in the host's handler table.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical kebab-case name, e.g. `on-exchange-media`.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Init => "on-init",
            Tag::Routing => "on-routing",
            Tag::Execute => "on-execute",
            Tag::Hangup => "on-hangup",
            Tag::ExchangeMedia => "on-exchange-media",
            Tag::SoftExecute => "on-soft-execute",
            Tag::ConsumeMedia => "on-consume-media",
            Tag::Hibernate => "on-hibernate",
            Tag::Reset => "on-reset",
            Tag::Park => "on-park",
            Tag::Reporting => "on-reporting",
            Tag::Destroy => "on-destroy",
        }
    }

    /// Only hangup notifications carry a cause string.
    pub const fn carries_cause(self) -> bool {
        matches!(self, Tag::Hangup)
    }

    /// Single-bit mask used by [`super::CapabilitySet::mask`].
    pub const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
