use crate::severity::Severity;

/// Default namespace prefixed to every channel name and event id.
pub const DEFAULT_NAMESPACE: &str = "LwesLogger";

/// Default timestamp pattern for the `timestamp` event field.
pub const DEFAULT_DATETIME_FORMAT: &str = "%b %d %H:%M:%S";

/// Environment variable names for convenient transport configuration from
/// deployed services. Purely helpers; the core types remain decoupled from
/// environment access.

/// Target address of the wire event bus.
pub const LWES_LOGGER_ADDRESS_ENV: &str = "LWES_LOGGER_ADDRESS";

/// Interface to bind the emitting socket to.
pub const LWES_LOGGER_IFACE_ENV: &str = "LWES_LOGGER_IFACE";

/// Destination port on the event bus.
pub const LWES_LOGGER_PORT_ENV: &str = "LWES_LOGGER_PORT";

/// Heartbeat interval in seconds; `0` disables the heartbeat.
pub const LWES_LOGGER_HEARTBEAT_ENV: &str = "LWES_LOGGER_HEARTBEAT";

/// Datagram TTL (multicast TTL for multicast targets).
pub const LWES_LOGGER_TTL_ENV: &str = "LWES_LOGGER_TTL";

/// Read an environment variable or fall back to a provided default.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Options recognized by the logger itself. `namespace` is normalized when
/// the logger is constructed, and again on every reassignment.
#[derive(Clone, Debug)]
pub struct LoggerConfig {
    pub namespace: String,
    pub datetime_format: String,
    /// Minimum severity accepted by the leveled entry points.
    pub level: Severity,
    /// Catch-all channel receiving every event; `None` disables it.
    pub full_logs_channel: Option<String>,
    /// Emit only to the full-logs channel, skipping per-severity channels.
    pub full_logs_only: bool,
    /// Logger-wide default progname.
    pub progname: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            level: Severity::Debug,
            full_logs_channel: Some("Full".to_string()),
            full_logs_only: false,
            progname: None,
        }
    }
}

/// Connection parameters forwarded verbatim to the wire transport.
#[derive(Clone, Debug)]
pub struct TransportConfig {
    pub address: String,
    pub iface: String,
    pub port: u16,
    /// Heartbeat interval in seconds; `0` disables the heartbeat.
    pub heartbeat: u64,
    pub ttl: u32,
}

impl TransportConfig {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            iface: "0.0.0.0".to_string(),
            port: 12345,
            heartbeat: 1,
            ttl: 1,
        }
    }

    /// Build a config from `LWES_LOGGER_*` environment variables. Returns
    /// `None` when no address is set; unparseable numeric values fall back
    /// to their defaults.
    pub fn from_env() -> Option<Self> {
        let address = std::env::var(LWES_LOGGER_ADDRESS_ENV).ok()?;
        let mut config = Self::new(address);
        config.iface = env_or(LWES_LOGGER_IFACE_ENV, &config.iface);
        config.port = env_or(LWES_LOGGER_PORT_ENV, "")
            .parse()
            .unwrap_or(config.port);
        config.heartbeat = env_or(LWES_LOGGER_HEARTBEAT_ENV, "")
            .parse()
            .unwrap_or(config.heartbeat);
        config.ttl = env_or(LWES_LOGGER_TTL_ENV, "")
            .parse()
            .unwrap_or(config.ttl);
        Some(config)
    }
}
