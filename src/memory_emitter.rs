use crate::emitter::Emitter;
use crate::event::LogEvent;
use std::error::Error;
use std::sync::Mutex;

/// An emitter that collects every emission in memory.
///
/// Intended for unit tests and local debugging; not suitable for long-lived
/// processes since the buffer grows without bound.
#[derive(Default)]
pub struct MemoryEmitter {
    emitted: Mutex<Vec<(String, LogEvent)>>,
}

impl MemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(channel, event)` pairs emitted so far, in order.
    pub fn emitted(&self) -> Vec<(String, LogEvent)> {
        self.emitted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.emitted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl Emitter for MemoryEmitter {
    fn emit(&self, channel: &str, event: &LogEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.emitted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((channel.to_string(), event.clone()));
        Ok(())
    }
}
