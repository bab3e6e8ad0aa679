use serde::Serialize;
use std::collections::BTreeMap;

/// One structured event record, built per log call and never persisted.
///
/// Every value is a string by the time the record exists; lazy suppliers in
/// the meta registry or per-call extras have already been invoked. The
/// record is read-only once built: both channel emissions reuse the same
/// instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LogEvent {
    fields: BTreeMap<String, String>,
}

impl LogEvent {
    pub(crate) fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn severity(&self) -> &str {
        self.get("severity").unwrap_or("")
    }

    pub fn message(&self) -> &str {
        self.get("message").unwrap_or("")
    }

    pub fn progname(&self) -> &str {
        self.get("progname").unwrap_or("")
    }

    pub fn timestamp(&self) -> &str {
        self.get("timestamp").unwrap_or("")
    }

    pub fn event_id(&self) -> &str {
        self.get("event_id").unwrap_or("")
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

/// Remove ANSI CSI color sequences (`ESC '[' ... 'm'`) from a message.
///
/// Matching is non-greedy, left-to-right and never crosses a newline. An
/// introducer with no terminating `m` on its line passes through unchanged;
/// a message with no sequences at all comes back as-is.
pub fn strip_ansi(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    let mut rest = message;

    while let Some(start) = rest.find("\u{1b}[") {
        let after = &rest[start + 2..];
        let line = after.split('\n').next().unwrap_or("");
        match line.find('m') {
            Some(end) => {
                out.push_str(&rest[..start]);
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[..start + 2]);
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_color_sequences() {
        assert_eq!("ared", strip_ansi("a\u{1b}[31mred"));
        assert_eq!("boldoff", strip_ansi("\u{1b}[1mbold\u{1b}[0moff"));
    }

    #[test]
    fn plain_message_is_unchanged() {
        assert_eq!("no escapes here", strip_ansi("no escapes here"));
        assert_eq!("", strip_ansi(""));
    }

    #[test]
    fn unterminated_introducer_passes_through() {
        assert_eq!("tail\u{1b}[31", strip_ansi("tail\u{1b}[31"));
    }

    #[test]
    fn sequences_do_not_cross_newlines() {
        assert_eq!("a\u{1b}[31\nmb", strip_ansi("a\u{1b}[31\nmb"));
    }

    #[test]
    fn accessors_read_known_fields() {
        let mut fields = BTreeMap::new();
        fields.insert("severity".to_string(), "DEBUG".to_string());
        fields.insert("message".to_string(), "hi".to_string());
        fields.insert("extra".to_string(), "x".to_string());
        let event = LogEvent::new(fields);

        assert_eq!("DEBUG", event.severity());
        assert_eq!("hi", event.message());
        assert_eq!(Some("x"), event.get("extra"));
        assert_eq!(None, event.get("missing"));
        assert_eq!("", event.progname());
    }

    #[test]
    fn serializes_as_a_flat_map() {
        let mut fields = BTreeMap::new();
        fields.insert("severity".to_string(), "INFO".to_string());
        let event = LogEvent::new(fields);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(r#"{"severity":"INFO"}"#, json);
    }
}
