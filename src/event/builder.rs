use super::EventRecord;
use super::record::is_reserved;
use chrono::{Local, Utc};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

static EVENT_SEQUENCE: AtomicU64 = AtomicU64::new(0);
static CORE_UUID: OnceLock<Uuid> = OnceLock::new();

/// Identifier of this process, stamped on every delivered event.
pub fn core_uuid() -> Uuid {
    *CORE_UUID.get_or_init(Uuid::new_v4)
}

/// Producer-side construction of an [`EventRecord`].
///
/// # Example
/// ```
/// use callbridge::event::EventBuilder;
///
/// let event = EventBuilder::new()
///     .add_header("Event-Name", "CHANNEL_PARK")
///     .add_header("Unique-ID", "3f1c")
///     .set_body("parked")
///     .build();
///
/// assert_eq!(event.header("Event-Name"), Some("CHANNEL_PARK"));
/// ```
#[derive(Debug, Default)]
pub struct EventBuilder {
    record: EventRecord,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing record, e.g. to forward it with extra headers.
    pub fn from_record(record: EventRecord) -> Self {
        Self { record }
    }

    /// Add a header; a repeated name overwrites the previous value.
    ///
    /// `Content-Length` and `_body` are reserved: both wire forms derive
    /// them from the body, so they are ignored here.
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if is_reserved(&name) {
            tracing::warn!(header = %name, "Ignoring reserved event header");
            return self;
        }
        self.record.headers.insert(name, value.into());
        self
    }

    pub fn set_body(mut self, body: impl Into<String>) -> Self {
        self.record.body = Some(body.into());
        self
    }

    pub fn remove_header(mut self, name: &str) -> Self {
        self.record.headers.remove(name);
        self
    }

    /// Stamp the headers every delivered event carries: `Core-UUID`, local,
    /// GMT and microsecond timestamps, and a process-wide `Event-Sequence`.
    pub fn prepare_for_delivery(self) -> Self {
        let now = Utc::now();
        let seq = EVENT_SEQUENCE.fetch_add(1, Ordering::Relaxed) + 1;

        self.add_header("Core-UUID", core_uuid().to_string())
            .add_header(
                "Event-Date-Local",
                now.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
            )
            .add_header("Event-Date-GMT", now.to_rfc2822())
            .add_header("Event-Date-Timestamp", now.timestamp_micros().to_string())
            .add_header("Event-Sequence", seq.to_string())
    }

    pub fn build(self) -> EventRecord {
        self.record
    }
}
