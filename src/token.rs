use uuid::Uuid;

/// Provider of the opaque unique token embedded in every `event_id`.
///
/// Injectable so tests can pin the token to a known value.
pub trait TokenSource: Send + Sync {
    /// Produce the next token; unique per call, no further structure
    /// assumed.
    fn next(&self) -> String;
}

/// Default provider backed by random v4 UUIDs.
#[derive(Clone, Default)]
pub struct UuidTokenSource;

impl TokenSource for UuidTokenSource {
    fn next(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_tokens_are_unique() {
        let source = UuidTokenSource;
        assert_ne!(source.next(), source.next());
    }
}
