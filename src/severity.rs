use std::fmt;

/// Log severity levels, ordered from least to most severe.
///
/// [`Severity::Any`] is the sentinel used when a call supplies no level at
/// all (raw appends); it sorts above every real level so it is never
/// filtered out by a minimum-level threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Any,
}

impl Severity {
    /// Canonical uppercase name, e.g. `"DEBUG"`. The sentinel reports
    /// itself as `"ANY"`.
    pub fn name(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Any => "ANY",
        }
    }

    /// Title-case form used in channel names and event ids, e.g. `"Debug"`.
    pub fn channel_suffix(self) -> &'static str {
        match self {
            Severity::Debug => "Debug",
            Severity::Info => "Info",
            Severity::Warn => "Warn",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal",
            Severity::Any => "Any",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Title-case a severity name: first character uppercased, remainder
/// lowercased (`"DEBUG" -> "Debug"`).
///
/// Channel names are derived from the *event field* value rather than the
/// original enum, so an extra-data override of `severity` redirects the
/// per-severity channel as well.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
