//! Callback outcomes and their host-side numeric encoding

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Outcome returned by a lifecycle callback.
///
/// `Continue` is also the answer when nobody registered an opinion.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Handled; the host proceeds with its default processing.
    #[default]
    Continue,
    /// Not handled / stop further processing for this transition.
    Stop,
    Error,
}

impl Status {
    pub fn is_continue(self) -> bool {
        self == Status::Continue
    }
}

impl From<bool> for Status {
    fn from(handled: bool) -> Self {
        if handled { Status::Continue } else { Status::Stop }
    }
}

/// Numeric mapping of [`Status`] supplied by the host.
///
/// The default follows the usual host convention: `0` success, `1` false,
/// `9` general error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusCodes {
    pub continue_code: i32,
    pub stop_code: i32,
    pub error_code: i32,
}

impl Default for StatusCodes {
    fn default() -> Self {
        Self {
            continue_code: 0,
            stop_code: 1,
            error_code: 9,
        }
    }
}

impl StatusCodes {
    pub fn new(continue_code: i32, stop_code: i32, error_code: i32) -> Self {
        Self {
            continue_code,
            stop_code,
            error_code,
        }
    }

    pub fn to_code(&self, status: Status) -> i32 {
        match status {
            Status::Continue => self.continue_code,
            Status::Stop => self.stop_code,
            Status::Error => self.error_code,
        }
    }

    /// Unknown codes decode as [`Status::Error`].
    pub fn from_code(&self, code: i32) -> Status {
        if code == self.continue_code {
            Status::Continue
        } else if code == self.stop_code {
            Status::Stop
        } else {
            Status::Error
        }
    }
}
