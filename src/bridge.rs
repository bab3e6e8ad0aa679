use crate::logger::LwesLogger;
use crate::meta::{FieldMap, FieldValue};
use crate::severity::Severity;
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// `tracing_subscriber` layer that forwards `tracing` events into a shared
/// [`LwesLogger`].
///
/// Event fields become per-call extras (the `message` field becomes the log
/// message, the event target an extra field named `target`). The logger's
/// own threshold applies. Configure the logger before wrapping it in the
/// `Arc`; the layer only needs `&self` access.
pub struct EventBridgeLayer {
    logger: Arc<LwesLogger>,
}

impl EventBridgeLayer {
    pub fn new(logger: Arc<LwesLogger>) -> Self {
        Self { logger }
    }
}

fn severity_for(level: &Level) -> Severity {
    match *level {
        Level::ERROR => Severity::Error,
        Level::WARN => Severity::Warn,
        Level::INFO => Severity::Info,
        // No finer level exists on the wire side.
        Level::DEBUG | Level::TRACE => Severity::Debug,
    }
}

impl<S> Layer<S> for EventBridgeLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event, _ctx: Context<'_, S>) {
        let mut extra = FieldMap::new();
        let mut message: Option<String> = None;

        let mut visitor = FieldVisitor {
            extra: &mut extra,
            message: &mut message,
        };
        event.record(&mut visitor);

        let meta = event.metadata();
        extra.insert("target".to_string(), FieldValue::from(meta.target()));

        let severity = severity_for(meta.level());
        // A layer has no way to propagate transport failures to the call
        // site that produced the tracing event.
        if let Err(e) = self
            .logger
            .log_with(severity, message.as_deref(), None, &extra)
        {
            eprintln!("event bridge emission failed: {e}");
        }
    }
}

struct FieldVisitor<'a> {
    extra: &'a mut FieldMap,
    message: &'a mut Option<String>,
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.message = Some(value.to_string());
        } else {
            self.extra
                .insert(field.name().to_string(), FieldValue::from(value));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.extra
            .insert(field.name().to_string(), FieldValue::Text(value.to_string()));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.extra
            .insert(field.name().to_string(), FieldValue::Text(value.to_string()));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.extra
            .insert(field.name().to_string(), FieldValue::Text(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let rendered = format!("{:?}", value);
        if field.name() == "message" {
            *self.message = Some(rendered);
        } else {
            self.extra
                .insert(field.name().to_string(), FieldValue::Text(rendered));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_emitter::MemoryEmitter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    fn bridged() -> (Arc<MemoryEmitter>, Arc<LwesLogger>) {
        let emitter = Arc::new(MemoryEmitter::new());
        let logger = Arc::new(LwesLogger::new(
            Arc::clone(&emitter) as Arc<dyn crate::emitter::Emitter>
        ));
        (emitter, logger)
    }

    #[test]
    fn tracing_events_become_structured_events() {
        let (emitter, logger) = bridged();
        let subscriber = Registry::default().with(EventBridgeLayer::new(Arc::clone(&logger)));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(code = 7, flag = true, "boom");
        });

        let emitted = emitter.emitted();
        assert_eq!(2, emitted.len());
        assert_eq!("LwesLogger::Full", emitted[0].0);
        assert_eq!("LwesLogger::Error", emitted[1].0);

        let event = &emitted[0].1;
        assert_eq!("boom", event.message());
        assert_eq!("ERROR", event.severity());
        assert_eq!(Some("7"), event.get("code"));
        assert_eq!(Some("true"), event.get("flag"));
        assert!(event.get("target").is_some());
    }

    #[test]
    fn trace_maps_to_debug_severity() {
        let (emitter, logger) = bridged();
        let subscriber = Registry::default().with(EventBridgeLayer::new(Arc::clone(&logger)));

        tracing::subscriber::with_default(subscriber, || {
            tracing::trace!("fine grained");
        });

        let emitted = emitter.emitted();
        assert_eq!("LwesLogger::Debug", emitted[1].0);
        assert_eq!("DEBUG", emitted[1].1.severity());
    }
}
