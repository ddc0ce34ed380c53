//! Host-facing adapter
//!
//! The host engine speaks integers and strings. [`HostAdapter`] translates
//! between that surface and the typed core, and is the one place failures
//! are reported as diagnostics instead of returned as values.

use crate::bootstrap::Bootstrap;
use crate::error::BridgeError;
use crate::lifecycle::{Status, StatusCodes, Tag};
use crate::registry::HandlerRegistry;
use std::str::FromStr;
use std::sync::Arc;

pub struct HostAdapter {
    bootstrap: Bootstrap,
    codes: StatusCodes,
}

impl HostAdapter {
    pub fn new(bootstrap: Bootstrap, codes: StatusCodes) -> Self {
        Self { bootstrap, codes }
    }

    pub fn codes(&self) -> &StatusCodes {
        &self.codes
    }

    pub fn registry(&self) -> &Arc<HandlerRegistry> {
        self.bootstrap.registry()
    }

    pub fn bootstrap(&self) -> &Bootstrap {
        &self.bootstrap
    }

    /// Activate an application for a session; returns the host status code.
    pub fn activate(&self, session_id: &str, raw_args: &str) -> i32 {
        match self.bootstrap.activate(session_id, raw_args) {
            Ok(_) => self.codes.to_code(Status::Continue),
            Err(err) => {
                report(session_id, raw_args, &err);
                self.codes.to_code(Status::Error)
            }
        }
    }

    /// Deliver a state notification that carries no cause.
    pub fn on_state(&self, session_id: &str, tag: Tag) -> i32 {
        let status = if tag == Tag::Hangup {
            self.registry().dispatch_hangup(session_id, "")
        } else {
            self.registry().dispatch(session_id, tag)
        };
        self.codes.to_code(status)
    }

    pub fn on_hangup(&self, session_id: &str, cause: &str) -> i32 {
        self.codes
            .to_code(self.registry().dispatch_hangup(session_id, cause))
    }

    /// Deliver a notification named as the host names it (`on-park`,
    /// `on_park` or `onPark`). Unknown names get the neutral answer.
    pub fn on_state_named(&self, session_id: &str, tag: &str) -> i32 {
        match Tag::from_str(tag) {
            Ok(tag) => self.on_state(session_id, tag),
            Err(_) => {
                tracing::warn!(session_id, tag, "Unknown lifecycle notification");
                self.codes.to_code(Status::Continue)
            }
        }
    }
}

fn report(session_id: &str, raw_args: &str, err: &BridgeError) {
    let kind = err.kind();
    if err.is_resolution_error() {
        tracing::error!(
            session_id,
            args = raw_args,
            kind = kind.as_ref(),
            "Activation rejected: {err}. Usage: [archive.jar] qualified.Name [args...]"
        );
    } else {
        tracing::error!(
            session_id,
            args = raw_args,
            kind = kind.as_ref(),
            "Activation failed: {err:#}"
        );
    }
}
