use std::sync::Arc;

use lwes_logger::bridge::EventBridgeLayer;
use lwes_logger::logger::LwesLogger;
use lwes_logger::memory_emitter::MemoryEmitter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Routes ordinary `tracing` macros through the event bridge. The memory
/// emitter stands in for a real wire transport so the demo can print what
/// would have gone onto the bus.
fn main() {
    let emitter = Arc::new(MemoryEmitter::new());
    let logger = Arc::new(LwesLogger::new(
        Arc::clone(&emitter) as Arc<dyn lwes_logger::emitter::Emitter>
    ));

    let subscriber = Registry::default()
        .with(EventBridgeLayer::new(Arc::clone(&logger)))
        .with(tracing_subscriber::fmt::layer());
    tracing::subscriber::with_default(subscriber, || {
        info!(service = "bridge-demo", "bridge demo started");
        error!(code = 500, "simulated failure");
    });

    for (channel, event) in emitter.emitted() {
        println!("{channel} -> {:?}", event.fields());
    }
}
