use crate::event::LogEvent;
use std::error::Error;

/// Destination for structured [`LogEvent`]s produced by the logger.
///
/// Implementations carry records to a concrete wire transport (UDP
/// multicast, a test buffer, etc). Emission is fire-and-forget from the
/// logger's point of view: no acknowledgement is consumed and no retry is
/// performed. When one record is dispatched to two channels, both calls
/// receive the same instance; implementations must treat it as read-only.
pub trait Emitter: Send + Sync {
    /// Emit a single record to the named channel.
    ///
    /// **Parameters**
    /// - `channel`: fully-qualified channel name, e.g. `"LwesLogger::Debug"`.
    /// - `event`: fully-populated record; every value already a string.
    ///
    /// **Returns**
    /// - `Ok(())` if the transport accepted the record.
    /// - `Err(..)` on transport failure. The logger propagates this to the
    ///   caller unchanged; it never retries or falls back to another
    ///   channel.
    fn emit(&self, channel: &str, event: &LogEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}
