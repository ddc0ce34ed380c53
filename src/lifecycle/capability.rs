//! Capability sets
//!
//! A [`CapabilitySet`] is the record of optional callback slots an
//! application instance opts into, one slot per [`Tag`]. Dispatch is a single
//! indexed lookup instead of a per-tag interface check.

use super::{Status, Tag};
use std::fmt;
use std::sync::Arc;
use strum::{EnumCount, IntoEnumIterator};

/// What a callback is told when the host delivers a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification<'a> {
    pub session_id: &'a str,
    pub tag: Tag,
    /// Hangup cause; `Some` only for [`Tag::Hangup`].
    pub cause: Option<&'a str>,
}

impl<'a> Notification<'a> {
    pub fn new(session_id: &'a str, tag: Tag) -> Self {
        Self {
            session_id,
            tag,
            cause: None,
        }
    }

    pub fn hangup(session_id: &'a str, cause: &'a str) -> Self {
        Self {
            session_id,
            tag: Tag::Hangup,
            cause: Some(cause),
        }
    }
}

/// Uniform callback shape stored in every slot.
pub type Callback = Arc<dyn Fn(&Notification<'_>) -> Status + Send + Sync>;

/// Wrap a session-only closure into a [`Callback`].
pub fn session_callback<F>(f: F) -> Callback
where
    F: Fn(&str) -> Status + Send + Sync + 'static,
{
    Arc::new(move |n: &Notification<'_>| f(n.session_id))
}

/// Wrap a `(session, cause)` closure into a [`Callback`]. A missing cause is
/// passed as the empty string.
pub fn hangup_callback<F>(f: F) -> Callback
where
    F: Fn(&str, &str) -> Status + Send + Sync + 'static,
{
    Arc::new(move |n: &Notification<'_>| f(n.session_id, n.cause.unwrap_or("")))
}

/// The set of lifecycle callbacks exposed by one application instance.
///
/// # Example
///
/// ```rust,ignore
/// let caps = CapabilitySet::new()
///     .on_execute(|session| Status::Continue)
///     .on_hangup(|session, cause| {
///         tracing::info!(session, cause, "call ended");
///         Status::Continue
///     });
/// ```
#[derive(Clone, Default)]
pub struct CapabilitySet {
    slots: [Option<Callback>; Tag::COUNT],
}

macro_rules! session_slot {
    ($($method:ident => $tag:ident),* $(,)?) => {
        $(
            #[doc = concat!("Set the `", stringify!($method), "` callback.")]
            pub fn $method<F>(self, f: F) -> Self
            where
                F: Fn(&str) -> Status + Send + Sync + 'static,
            {
                self.with(Tag::$tag, session_callback(f))
            }
        )*
    };
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill (or replace) the slot for `tag`.
    pub fn with(mut self, tag: Tag, callback: Callback) -> Self {
        self.insert(tag, callback);
        self
    }

    pub fn insert(&mut self, tag: Tag, callback: Callback) -> Option<Callback> {
        self.slots[tag.index()].replace(callback)
    }

    pub fn remove(&mut self, tag: Tag) -> Option<Callback> {
        self.slots[tag.index()].take()
    }

    session_slot! {
        on_init => Init,
        on_routing => Routing,
        on_execute => Execute,
        on_exchange_media => ExchangeMedia,
        on_soft_execute => SoftExecute,
        on_consume_media => ConsumeMedia,
        on_hibernate => Hibernate,
        on_reset => Reset,
        on_park => Park,
        on_reporting => Reporting,
        on_destroy => Destroy,
    }

    /// Set the `on_hangup` callback, which also receives the hangup cause.
    pub fn on_hangup<F>(self, f: F) -> Self
    where
        F: Fn(&str, &str) -> Status + Send + Sync + 'static,
    {
        self.with(Tag::Hangup, hangup_callback(f))
    }

    pub fn get(&self, tag: Tag) -> Option<&Callback> {
        self.slots[tag.index()].as_ref()
    }

    pub fn contains(&self, tag: Tag) -> bool {
        self.slots[tag.index()].is_some()
    }

    /// Bitmask of filled slots, bit `n` set for the tag with index `n`.
    pub fn mask(&self) -> u16 {
        self.tags().fold(0, |mask, tag| mask | tag.bit())
    }

    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        Tag::iter().filter(|tag| self.contains(*tag))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tag, &Callback)> + '_ {
        Tag::iter().filter_map(|tag| self.get(tag).map(|cb| (tag, cb)))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Copy every filled slot of `other` over this set (last write wins).
    pub fn merge(&mut self, other: &CapabilitySet) {
        for (tag, callback) in other.iter() {
            self.insert(tag, Arc::clone(callback));
        }
    }
}

impl fmt::Debug for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.tags()).finish()
    }
}

/// A unit that exposes lifecycle callbacks without an entry method.
///
/// Handler-only units are resolvable by name like applications, but
/// activating one fails with `EntryPointNotFound`; they are meant to be
/// installed as process-wide defaults or wrapped by an application.
pub trait LifecycleHandler: Send + Sync + 'static {
    fn capabilities(self: Arc<Self>) -> CapabilitySet;
}
