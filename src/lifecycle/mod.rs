//! Call Lifecycle Module
//!
//! Types shared by everything that delivers or receives call-state
//! notifications: the [`Tag`] vocabulary, the [`Status`] a callback answers
//! with, and the [`CapabilitySet`] an application instance exposes.
//!
//! # Call-state progression
//!
//! ```text
//! on-init
//!    ↓
//! on-routing
//!    ↓
//! on-execute ⇄ on-soft-execute / on-exchange-media / on-consume-media
//!    ⇅
//! on-park / on-hibernate / on-reset
//!    ↓
//! on-reporting
//!    ↓
//! on-hangup (cause)
//!    ↓
//! on-destroy
//! ```
//!
//! The progression is driven entirely by the host. Nothing in this crate
//! tracks which state a session is in.
//!
//! # Example
//!
//! ```rust,ignore
//! use callbridge::lifecycle::{CapabilitySet, LifecycleHandler, Status};
//! use std::sync::Arc;
//!
//! struct CdrWriter;
//!
//! impl LifecycleHandler for CdrWriter {
//!     fn capabilities(self: Arc<Self>) -> CapabilitySet {
//!         CapabilitySet::new().on_reporting(move |session| {
//!             tracing::info!(session, "writing CDR");
//!             Status::Continue
//!         })
//!     }
//! }
//! ```

mod capability;
mod status;
mod tag;

pub use capability::{
    Callback, CapabilitySet, LifecycleHandler, Notification, hangup_callback, session_callback,
};
pub use status::{Status, StatusCodes};
pub use tag::Tag;
