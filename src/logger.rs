use crate::config::LoggerConfig;
use crate::emitter::Emitter;
use crate::error::Error;
use crate::event::{strip_ansi, LogEvent};
use crate::meta::{FieldMap, FieldValue, MetaFieldRegistry};
use crate::namespace;
use crate::severity::{self, Severity};
use crate::text::TextSink;
use crate::token::{TokenSource, UuidTokenSource};
use chrono::Local;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Placeholder for entry points that carry no lazy message supplier.
const NO_SUPPLIER: Option<fn() -> String> = None;

/// Leveled logger that mirrors every accepted log call as one structured,
/// namespaced event on a wire [`Emitter`], then forwards the textual line to
/// an optional [`TextSink`].
///
/// All entry points are synchronous and complete before returning; the
/// relationship to the emitter is fire-and-forget. Mutators take `&mut self`
/// so a shared logger (e.g. behind an `Arc` for the tracing bridge) is
/// configured before it is shared.
pub struct LwesLogger {
    emitter: Arc<dyn Emitter>,
    text_sink: Option<Box<dyn TextSink>>,
    tokens: Box<dyn TokenSource>,
    meta: MetaFieldRegistry,
    namespace: String,
    datetime_format: String,
    level: Severity,
    full_logs_channel: Option<String>,
    full_logs_only: bool,
    progname: Option<String>,
    hostname: String,
    pid: u32,
}

impl LwesLogger {
    /// Create a logger with default configuration (namespace
    /// `"LwesLogger"`, full-logs channel `"Full"`, minimum level `Debug`).
    pub fn new(emitter: Arc<dyn Emitter>) -> Self {
        Self::with_config(emitter, LoggerConfig::default())
    }

    /// Create a logger from an explicit [`LoggerConfig`]. The namespace is
    /// normalized here; hostname and pid are captured once and become
    /// ordinary static meta fields.
    pub fn with_config(emitter: Arc<dyn Emitter>, config: LoggerConfig) -> Self {
        let hostname = hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .unwrap_or_else(|| "localhost".to_string());
        let pid = std::process::id();

        Self {
            emitter,
            text_sink: None,
            tokens: Box::new(UuidTokenSource),
            meta: MetaFieldRegistry::new(&hostname, pid),
            namespace: namespace::normalize(&config.namespace),
            datetime_format: config.datetime_format,
            level: config.level,
            full_logs_channel: config.full_logs_channel,
            full_logs_only: config.full_logs_only,
            progname: config.progname,
            hostname,
            pid,
        }
    }

    /// Attach the textual log device. Each accepted leveled call writes one
    /// formatted line here; raw appends write their bytes unformatted.
    pub fn with_text_sink(mut self, sink: Box<dyn TextSink>) -> Self {
        self.text_sink = Some(sink);
        self
    }

    /// Replace the unique-token provider (deterministic tokens in tests).
    pub fn with_token_source(mut self, tokens: Box<dyn TokenSource>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Reassign the namespace; the value is re-normalized on every
    /// assignment.
    pub fn set_namespace(&mut self, namespace: &str) {
        self.namespace = namespace::normalize(namespace);
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn set_level(&mut self, level: Severity) {
        self.level = level;
    }

    pub fn full_logs_channel(&self) -> Option<&str> {
        self.full_logs_channel.as_deref()
    }

    /// Name of the catch-all channel; `None` disables it.
    pub fn set_full_logs_channel(&mut self, channel: Option<String>) {
        self.full_logs_channel = channel;
    }

    pub fn full_logs_only(&self) -> bool {
        self.full_logs_only
    }

    /// Skip per-severity channels and emit only to the full-logs channel.
    pub fn set_full_logs_only(&mut self, full_logs_only: bool) {
        self.full_logs_only = full_logs_only;
    }

    pub fn progname(&self) -> Option<&str> {
        self.progname.as_deref()
    }

    pub fn set_progname(&mut self, progname: Option<String>) {
        self.progname = progname;
    }

    pub fn datetime_format(&self) -> &str {
        &self.datetime_format
    }

    pub fn set_datetime_format(&mut self, format: impl Into<String>) {
        self.datetime_format = format.into();
    }

    /// Register a meta field merged into every built event. Pass a
    /// [`FieldValue::lazy`] to re-evaluate the value on each build.
    pub fn meta_field(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.meta.set(key, value);
    }

    pub fn meta_fields(&self) -> &MetaFieldRegistry {
        &self.meta
    }

    /// Log a message at `severity`, emitting the structured event and the
    /// textual line. Below-threshold calls return `Ok(true)` without doing
    /// any work.
    pub fn add(
        &self,
        severity: Severity,
        message: Option<&str>,
        progname: Option<&str>,
    ) -> Result<bool, Error> {
        self.route(severity, message, progname, &FieldMap::new(), NO_SUPPLIER)
    }

    /// Alias binding for [`add`](Self::add); one operation, two names.
    pub fn log(
        &self,
        severity: Severity,
        message: Option<&str>,
        progname: Option<&str>,
    ) -> Result<bool, Error> {
        self.add(severity, message, progname)
    }

    /// Like [`add`](Self::add), but the message is produced by `supplier`.
    /// The supplier is invoked at most once, and never for a call filtered
    /// out by the threshold.
    pub fn add_lazy<F>(
        &self,
        severity: Severity,
        progname: Option<&str>,
        supplier: F,
    ) -> Result<bool, Error>
    where
        F: FnOnce() -> String,
    {
        self.route(severity, None, progname, &FieldMap::new(), Some(supplier))
    }

    /// Gated routing with per-call extra fields. Extras merge last and win
    /// on any key collision, including `event_id` and `timestamp`; lazy
    /// extras are invoked during the build.
    pub fn log_with(
        &self,
        severity: Severity,
        message: Option<&str>,
        progname: Option<&str>,
        extra: &FieldMap,
    ) -> Result<bool, Error> {
        self.route(severity, message, progname, extra, NO_SUPPLIER)
    }

    /// Dump `message` without any formatting. Emits an event with the
    /// severity sentinel (`"ANY"`, channel suffix `"Any"`), then writes the
    /// raw bytes to the text sink.
    pub fn append(&self, message: &str) -> Result<(), Error> {
        let event = self.build_event(None, Some(message), None, &FieldMap::new());
        self.dispatch(&event)?;
        if let Some(sink) = &self.text_sink {
            sink.write(message)?;
        }
        Ok(())
    }

    pub fn debug(&self, message: &str) -> Result<bool, Error> {
        self.add(Severity::Debug, Some(message), None)
    }

    pub fn info(&self, message: &str) -> Result<bool, Error> {
        self.add(Severity::Info, Some(message), None)
    }

    pub fn warn(&self, message: &str) -> Result<bool, Error> {
        self.add(Severity::Warn, Some(message), None)
    }

    pub fn error(&self, message: &str) -> Result<bool, Error> {
        self.add(Severity::Error, Some(message), None)
    }

    pub fn fatal(&self, message: &str) -> Result<bool, Error> {
        self.add(Severity::Fatal, Some(message), None)
    }

    pub fn unknown(&self, message: &str) -> Result<bool, Error> {
        self.add(Severity::Any, Some(message), None)
    }

    /// Build and emit one event without the threshold gate and without
    /// touching the text sink. Returns the record that was emitted.
    pub fn emit_log(
        &self,
        severity: Option<Severity>,
        message: Option<&str>,
        progname: Option<&str>,
        extra: &FieldMap,
    ) -> Result<LogEvent, Error> {
        let event = self.build_event(severity, message, progname, extra);
        self.dispatch(&event)?;
        Ok(event)
    }

    /// Build an event record without emitting it. Never fails: absent
    /// severity, message and progname all resolve through the defaulting
    /// chain. Supplier panics propagate to the caller.
    pub fn build_log_event<F>(
        &self,
        severity: Option<Severity>,
        message: Option<&str>,
        progname: Option<&str>,
        extra: &FieldMap,
        supplier: Option<F>,
    ) -> LogEvent
    where
        F: FnOnce() -> String,
    {
        let supplied = match (message, supplier) {
            (None, Some(supplier)) => Some(supplier()),
            _ => None,
        };
        self.build_event(severity, message.or(supplied.as_deref()), progname, extra)
    }

    fn route<F>(
        &self,
        severity: Severity,
        message: Option<&str>,
        progname: Option<&str>,
        extra: &FieldMap,
        supplier: Option<F>,
    ) -> Result<bool, Error>
    where
        F: FnOnce() -> String,
    {
        // Cost-avoidance contract: filtered-out calls never invoke the
        // supplier and perform zero emissions.
        if severity < self.level {
            return Ok(true);
        }

        let supplied = match (message, supplier) {
            (None, Some(supplier)) => Some(supplier()),
            _ => None,
        };
        let message = message.or(supplied.as_deref());

        let event = self.build_event(Some(severity), message, progname, extra);
        self.dispatch(&event)?;

        if let Some(sink) = &self.text_sink {
            let line = self.format_line(
                severity.name(),
                event.timestamp(),
                event.progname(),
                message.unwrap_or_else(|| event.message()),
            );
            sink.write(&line)?;
        }

        Ok(true)
    }

    /// Resolution order: severity sentinel, progname default, message from
    /// supplier result or progname; registry snapshot evaluated, builder
    /// fields layered on top, per-call extras merged last.
    fn build_event(
        &self,
        severity: Option<Severity>,
        message: Option<&str>,
        progname: Option<&str>,
        extra: &FieldMap,
    ) -> LogEvent {
        let severity = severity.unwrap_or(Severity::Any);
        let progname = progname.or(self.progname.as_deref()).unwrap_or("");
        let message = message.unwrap_or(progname);

        let event_id = format!(
            "{}::{}-{}",
            self.namespace,
            severity.channel_suffix(),
            self.tokens.next()
        );

        let mut fields = BTreeMap::new();
        self.meta.resolve_into(&mut fields);
        fields.insert("message".to_string(), strip_ansi(message));
        fields.insert("progname".to_string(), progname.to_string());
        fields.insert("severity".to_string(), severity.name().to_string());
        fields.insert(
            "timestamp".to_string(),
            Local::now().format(&self.datetime_format).to_string(),
        );
        fields.insert("event_id".to_string(), event_id);

        for (key, value) in extra {
            fields.insert(key.clone(), value.resolve());
        }

        LogEvent::new(fields)
    }

    /// Emit one record to the configured channel(s). Both emissions reuse
    /// the same record. The per-severity channel is derived from the event's
    /// `severity` field, so an extra-data override redirects it.
    fn dispatch(&self, event: &LogEvent) -> Result<(), Error> {
        if let Some(full) = &self.full_logs_channel {
            let channel = format!("{}::{}", self.namespace, full);
            self.emitter
                .emit(&channel, event)
                .map_err(|source| Error::Emit { channel, source })?;
        }

        if !self.full_logs_only {
            let channel = format!(
                "{}::{}",
                self.namespace,
                severity::capitalize(event.severity())
            );
            self.emitter
                .emit(&channel, event)
                .map_err(|source| Error::Emit { channel, source })?;
        }

        Ok(())
    }

    fn format_line(
        &self,
        severity: &str,
        timestamp: &str,
        progname: &str,
        message: &str,
    ) -> String {
        format!(
            "{} [{}#{}] {:>5} -- {}: {}\n",
            self.hostname, timestamp, self.pid, severity, progname, message
        )
    }
}
