use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A field value that is either a fixed string or a zero-argument supplier
/// evaluated fresh every time an event is built.
#[derive(Clone)]
pub enum FieldValue {
    Text(String),
    Lazy(Arc<dyn Fn() -> String + Send + Sync>),
}

impl FieldValue {
    /// Wrap a supplier that is invoked on every [`resolve`](Self::resolve),
    /// never cached.
    pub fn lazy<F>(supplier: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        FieldValue::Lazy(Arc::new(supplier))
    }

    /// Produce the string value, invoking a lazy supplier if present.
    pub fn resolve(&self) -> String {
        match self {
            FieldValue::Text(value) => value.clone(),
            FieldValue::Lazy(supplier) => supplier(),
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => f.debug_tuple("Text").field(value).finish(),
            FieldValue::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Per-call extra fields merged into a built event, winning on collision.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// Process-lifetime fields merged into every built event.
///
/// Constructed with `hostname` and `pid` as ordinary static entries, both
/// captured once at logger construction. Lazy entries are re-evaluated on
/// every event build.
#[derive(Debug, Clone)]
pub struct MetaFieldRegistry {
    fields: BTreeMap<String, FieldValue>,
}

impl MetaFieldRegistry {
    pub fn new(hostname: &str, pid: u32) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("hostname".to_string(), FieldValue::from(hostname));
        fields.insert("pid".to_string(), FieldValue::Text(pid.to_string()));
        Self { fields }
    }

    /// Store a value for `key`, overwriting any prior entry. Pass a
    /// [`FieldValue::lazy`] to register a supplier.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Evaluate a snapshot into `out`, invoking lazy suppliers now.
    pub(crate) fn resolve_into(&self, out: &mut BTreeMap<String, String>) {
        for (key, value) in &self.fields {
            out.insert(key.clone(), value.resolve());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn defaults_hold_hostname_and_pid() {
        let registry = MetaFieldRegistry::new("box01", 4242);
        assert_eq!("box01", registry.get("hostname").unwrap().resolve());
        assert_eq!("4242", registry.get("pid").unwrap().resolve());
    }

    #[test]
    fn set_overwrites_prior_entry() {
        let mut registry = MetaFieldRegistry::new("box01", 1);
        registry.set("region", "us-east");
        registry.set("region", "eu-west");
        assert_eq!("eu-west", registry.get("region").unwrap().resolve());
    }

    #[test]
    fn lazy_values_are_reinvoked_every_resolve() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let mut registry = MetaFieldRegistry::new("box01", 1);
        registry.set(
            "tick",
            FieldValue::lazy(move || seen.fetch_add(1, Ordering::SeqCst).to_string()),
        );

        let mut first = BTreeMap::new();
        registry.resolve_into(&mut first);
        let mut second = BTreeMap::new();
        registry.resolve_into(&mut second);

        assert_eq!("0", first["tick"]);
        assert_eq!("1", second["tick"]);
        assert_eq!(2, calls.load(Ordering::SeqCst));
    }

    #[test]
    fn lazy_entry_can_be_replaced() {
        let mut registry = MetaFieldRegistry::new("box01", 1);
        registry.set("k", FieldValue::lazy(|| "v1".to_string()));
        assert_eq!("v1", registry.get("k").unwrap().resolve());
        registry.set("k", FieldValue::lazy(|| "v2".to_string()));
        assert_eq!("v2", registry.get("k").unwrap().resolve());
    }
}
