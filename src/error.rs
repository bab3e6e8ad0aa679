use thiserror::Error;

/// Errors surfaced by the logging entry points.
///
/// The event path and the text path are independent: one may succeed while
/// the other fails, and neither is retried.
#[derive(Debug, Error)]
pub enum Error {
    /// The wire transport rejected or failed to send an emission.
    #[error("event emission failed on channel {channel}: {source}")]
    Emit {
        channel: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The textual log sink failed to accept a line.
    #[error("text sink write failed: {0}")]
    TextSink(#[from] std::io::Error),
}
