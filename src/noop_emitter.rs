use crate::emitter::Emitter;
use crate::event::LogEvent;
use std::error::Error;

/// An emitter that simply drops all records.
///
/// Useful for measuring the overhead of event building itself without any
/// network I/O, and for embedding the logger where no wire bus exists.
#[derive(Clone, Default)]
pub struct NoopEmitter;

impl Emitter for NoopEmitter {
    fn emit(&self, _channel: &str, _event: &LogEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}
