use crate::error::{BridgeError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// JSON key under which the body travels.
pub const BODY_KEY: &str = "_body";
pub const CONTENT_LENGTH: &str = "Content-Length";

/// An event as seen by consumers: named headers plus an optional body.
///
/// Headers iterate in lexicographic order by name. There is no way to
/// mutate a record once built; producers use [`super::EventBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub(super) headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) body: Option<String>,
}

impl EventRecord {
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Number of headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.body.is_none()
    }

    /// Plain-text form: `Name: value` lines, then the body.
    ///
    /// With `encode` the values are percent-encoded so that newlines and
    /// separators cannot break the framing; without it each value is
    /// bracketed. A non-empty body is introduced by `Content-Length`.
    pub fn serialize_plain(&self, encode: bool) -> String {
        let mut out = String::new();
        for (name, value) in &self.headers {
            let rendered = if encode {
                url_encode(value)
            } else {
                format!("[{value}]")
            };
            let rendered: &str = if rendered.is_empty() { "_undef_" } else { &rendered };
            let _ = writeln!(out, "{name}: {rendered}");
        }

        match self.body.as_deref() {
            Some(body) if !body.is_empty() => {
                let _ = write!(out, "{CONTENT_LENGTH}: {}\n\n{body}", body.len());
            }
            _ => out.push('\n'),
        }
        out
    }

    /// Flat JSON object: headers by name, plus `Content-Length` and `_body`
    /// when a body is present.
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        for (name, value) in &self.headers {
            object.insert(name.clone(), Value::String(value.clone()));
        }
        if let Some(body) = &self.body {
            object.insert(
                CONTENT_LENGTH.to_string(),
                Value::String(body.len().to_string()),
            );
            object.insert(BODY_KEY.to_string(), Value::String(body.clone()));
        }
        Value::Object(object)
    }

    pub fn serialize_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_json()).map_err(|e| BridgeError::Event(e.to_string()))
    }

    /// Rebuild a record from the flat JSON form produced by [`Self::to_json`].
    pub fn from_json(input: &str) -> Result<EventRecord> {
        let value: Value =
            serde_json::from_str(input).map_err(|e| BridgeError::Event(e.to_string()))?;
        let Value::Object(object) = value else {
            return Err(BridgeError::Event("event JSON must be an object".to_string()));
        };

        let mut record = EventRecord::default();
        for (name, value) in object {
            let Value::String(value) = value else {
                return Err(BridgeError::Event(format!(
                    "header '{name}' must be a string"
                )));
            };
            if name == BODY_KEY {
                record.body = Some(value);
            } else if !is_reserved(&name) {
                record.headers.insert(name, value);
            }
        }
        Ok(record)
    }
}

/// Header names the wire forms derive from the body.
pub(super) fn is_reserved(name: &str) -> bool {
    name == BODY_KEY || name.eq_ignore_ascii_case(CONTENT_LENGTH)
}

// Characters that would break the `Name: value\n` framing or a URL.
const UNSAFE: &[u8] = b"\r\n #%&+:;<=>?@[\\]^`{|}\"";

fn url_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_graphic() && !UNSAFE.contains(&byte) {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventBuilder;

    #[test]
    fn test_plain_serialization_is_sorted() {
        let event = EventBuilder::new()
            .add_header("Unique-ID", "abc")
            .add_header("Channel-State", "CS_EXECUTE")
            .add_header("Answer-State", "answered")
            .build();

        assert_eq!(
            event.serialize_plain(true),
            "Answer-State: answered\nChannel-State: CS_EXECUTE\nUnique-ID: abc\n\n"
        );
    }

    #[test]
    fn test_plain_encodes_unsafe_values() {
        let event = EventBuilder::new()
            .add_header("Caller-ID-Name", "Alice Smith")
            .add_header("Note", "a:b\nc")
            .add_header("Empty", "")
            .build();

        let plain = event.serialize_plain(true);
        assert!(plain.contains("Caller-ID-Name: Alice%20Smith\n"));
        assert!(plain.contains("Note: a%3Ab%0Ac\n"));
        assert!(plain.contains("Empty: _undef_\n"));
    }

    #[test]
    fn test_plain_unencoded_brackets_values() {
        let event = EventBuilder::new().add_header("Name", "two words").build();
        assert_eq!(event.serialize_plain(false), "Name: [two words]\n\n");
    }

    #[test]
    fn test_plain_body_gets_content_length() {
        let event = EventBuilder::new()
            .add_header("Event-Name", "CUSTOM")
            .set_body("hello")
            .build();

        assert_eq!(
            event.serialize_plain(true),
            "Event-Name: CUSTOM\nContent-Length: 5\n\nhello"
        );
    }

    #[test]
    fn test_json_form() {
        let event = EventBuilder::new()
            .add_header("Event-Name", "CUSTOM")
            .set_body("payload")
            .build();

        let json = event.to_json();
        assert_eq!(json["Event-Name"], "CUSTOM");
        assert_eq!(json["Content-Length"], "7");
        assert_eq!(json["_body"], "payload");

        let parsed = EventRecord::from_json(&event.serialize_json().unwrap()).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_reserved_headers_are_derived_from_body() {
        let event = EventBuilder::new()
            .add_header("Content-Length", "999")
            .add_header("_body", "smuggled")
            .add_header("Event-Name", "CUSTOM")
            .set_body("x")
            .build();

        assert_eq!(event.header("Content-Length"), None);
        assert_eq!(event.header("_body"), None);
        assert_eq!(event.body(), Some("x"));

        let parsed = EventRecord::from_json(&event.serialize_json().unwrap()).unwrap();
        assert_eq!(parsed, event);
        assert_eq!(
            event.serialize_plain(true),
            "Event-Name: CUSTOM\nContent-Length: 1\n\nx"
        );
    }

    #[test]
    fn test_from_json_ignores_bodiless_content_length() {
        let parsed = EventRecord::from_json(r#"{"Content-Length": "4", "a": "1"}"#).unwrap();
        assert_eq!(parsed.header("Content-Length"), None);
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_from_json_rejects_non_string_values() {
        let err = EventRecord::from_json(r#"{"Event-Name": 7}"#).unwrap_err();
        assert!(matches!(err, BridgeError::Event(_)));

        let err = EventRecord::from_json("[]").unwrap_err();
        assert!(matches!(err, BridgeError::Event(_)));
    }

    #[test]
    fn test_serde_shape() {
        let event = EventBuilder::new().add_header("b", "2").add_header("a", "1").build();
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"headers":{"a":"1","b":"2"}}"#);
    }
}
