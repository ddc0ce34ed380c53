use crate::lifecycle::{Callback, CapabilitySet, Notification, Status, Tag};
use dashmap::DashMap;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Arc<HandlerRegistry>> = OnceLock::new();

/// Where a dispatched callback came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Session,
    Default,
    None,
}

/// Thread-safe association of `(session, tag)` with lifecycle callbacks.
///
/// Session entries are sharded by session id, so registration for one
/// session never blocks dispatch for an unrelated one. Callbacks are cloned
/// out of the map before they run; no shard lock is held while application
/// code executes, which lets a callback re-enter the registry.
pub struct HandlerRegistry {
    sessions: DashMap<String, CapabilitySet>,
    defaults: DashMap<Tag, Callback>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            defaults: DashMap::new(),
        }
    }

    /// The process-wide registry.
    pub fn global() -> Arc<HandlerRegistry> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(HandlerRegistry::new())))
    }

    /// Register (or replace) the callback for `(session_id, tag)`.
    pub fn register(&self, session_id: &str, tag: Tag, callback: Callback) -> &Self {
        let previous = self
            .sessions
            .entry(session_id.to_string())
            .or_default()
            .insert(tag, callback);
        if previous.is_some() {
            tracing::debug!(session_id, %tag, "Replaced session handler");
        }
        self
    }

    /// Register every filled slot of `capabilities` for `session_id`.
    ///
    /// Slots the set leaves empty keep whatever was registered before.
    pub fn register_set(&self, session_id: &str, capabilities: &CapabilitySet) -> &Self {
        if capabilities.is_empty() {
            return self;
        }
        self.sessions
            .entry(session_id.to_string())
            .or_default()
            .merge(capabilities);
        tracing::debug!(
            session_id,
            capabilities = ?capabilities,
            "Registered session handlers"
        );
        self
    }

    /// Install a process-wide fallback for `tag`.
    pub fn set_default(&self, tag: Tag, callback: Callback) -> &Self {
        self.defaults.insert(tag, callback);
        self
    }

    /// Install every filled slot of `capabilities` as a process-wide fallback.
    pub fn set_defaults(&self, capabilities: &CapabilitySet) -> &Self {
        for (tag, callback) in capabilities.iter() {
            self.defaults.insert(tag, Arc::clone(callback));
        }
        self
    }

    pub fn clear_default(&self, tag: Tag) -> Option<Callback> {
        self.defaults.remove(&tag).map(|(_, callback)| callback)
    }

    /// Find the callback that would answer `(session_id, tag)`.
    pub fn lookup(&self, session_id: &str, tag: Tag) -> (Scope, Option<Callback>) {
        let scoped = self
            .sessions
            .get(session_id)
            .and_then(|caps| caps.get(tag).cloned());
        if let Some(callback) = scoped {
            return (Scope::Session, Some(callback));
        }
        match self.defaults.get(&tag) {
            Some(callback) => (Scope::Default, Some(Arc::clone(callback.value()))),
            None => (Scope::None, None),
        }
    }

    /// Deliver a notification and return the handler's status verbatim.
    ///
    /// With no session handler and no default the answer is
    /// [`Status::Continue`]. Once a [`Tag::Destroy`] notification returns
    /// or unwinds, the session's entries are dropped.
    pub fn notify(&self, notification: &Notification<'_>) -> Status {
        let (scope, callback) = self.lookup(notification.session_id, notification.tag);
        tracing::debug!(
            session_id = notification.session_id,
            tag = %notification.tag,
            ?scope,
            "Dispatching lifecycle notification"
        );

        // Released on unwind as well.
        let _release = (notification.tag == Tag::Destroy).then(|| ReleaseOnDrop {
            registry: self,
            session_id: notification.session_id,
        });

        match callback {
            Some(callback) => callback(notification),
            None => Status::Continue,
        }
    }

    pub fn dispatch(&self, session_id: &str, tag: Tag) -> Status {
        self.notify(&Notification::new(session_id, tag))
    }

    pub fn dispatch_hangup(&self, session_id: &str, cause: &str) -> Status {
        self.notify(&Notification::hangup(session_id, cause))
    }

    /// Drop every session-scoped entry for `session_id`.
    pub fn release(&self, session_id: &str) -> bool {
        let removed = self.sessions.remove(session_id).is_some();
        if removed {
            tracing::debug!(session_id, "Released session handlers");
        }
        removed
    }

    pub fn contains(&self, session_id: &str, tag: Tag) -> bool {
        self.sessions
            .get(session_id)
            .is_some_and(|caps| caps.contains(tag))
    }

    pub fn has_default(&self, tag: Tag) -> bool {
        self.defaults.contains_key(&tag)
    }

    pub fn registered_tags(&self, session_id: &str) -> Vec<Tag> {
        self.sessions
            .get(session_id)
            .map(|caps| caps.tags().collect())
            .unwrap_or_default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

struct ReleaseOnDrop<'a> {
    registry: &'a HandlerRegistry,
    session_id: &'a str,
}

impl Drop for ReleaseOnDrop<'_> {
    fn drop(&mut self) {
        self.registry.release(self.session_id);
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
