//! Event records passed across the host boundary
//!
//! A record is an ordered set of named string headers plus an optional body.
//! Producers build with [`EventBuilder`]; consumers only ever see the
//! read-only [`EventRecord`].

mod builder;
mod record;

pub use builder::{EventBuilder, core_uuid};
pub use record::{BODY_KEY, CONTENT_LENGTH, EventRecord};
