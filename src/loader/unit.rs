use crate::lifecycle::CapabilitySet;
use std::sync::Arc;

/// A code unit addressable by a dotted qualified name.
///
/// This trait is typically implemented with `#[derive(Unit)]`:
///
/// ```rust,ignore
/// use callbridge::prelude::*;
///
/// #[derive(Default, Unit)]
/// #[unit(name = "org.example.Echo")]
/// pub struct Echo;
/// ```
pub trait Unit {
    const QUALIFIED_NAME: &'static str;
}

/// The entry point contract of an activatable application.
///
/// One instance is constructed per activation (or shared, see
/// [`super::Factory::shared`]) and `run` is called once with the session
/// identifier and the residual activation arguments. The call blocks the
/// host thread that activated the session.
///
/// # Example
///
/// ```rust,ignore
/// use callbridge::prelude::*;
///
/// #[derive(Default, Unit)]
/// #[unit(name = "org.example.Voicemail")]
/// pub struct Voicemail;
///
/// impl Application for Voicemail {
///     fn run(&self, session_id: &str, args: &str) -> anyhow::Result<()> {
///         tracing::info!(session_id, args, "voicemail answering");
///         Ok(())
///     }
///
///     fn capabilities(self: Arc<Self>) -> CapabilitySet {
///         CapabilitySet::new().on_hangup(|session, cause| {
///             tracing::info!(session, cause, "caller hung up");
///             Status::Continue
///         })
///     }
/// }
/// ```
pub trait Application: Send + Sync + 'static {
    /// Entry method.
    ///
    /// # Errors
    /// Any error is reported to the host as an application failure; the
    /// activation is abandoned and nothing stays registered for the session.
    fn run(&self, session_id: &str, args: &str) -> anyhow::Result<()>;

    /// Lifecycle callbacks this instance opts into. None by default.
    fn capabilities(self: Arc<Self>) -> CapabilitySet {
        CapabilitySet::new()
    }
}
