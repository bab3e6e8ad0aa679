use std::sync::Arc;

use lwes_logger::config::{LoggerConfig, TransportConfig};
use lwes_logger::logger::LwesLogger;
use lwes_logger::meta::FieldValue;
use lwes_logger::text::WriterSink;
use lwes_logger::udp::UdpEmitter;

/// Emits a handful of events to a local UDP listener. Pair it with e.g.
/// `nc -lu 12345` to watch the datagrams arrive.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let transport = TransportConfig::from_env()
        .unwrap_or_else(|| TransportConfig::new("127.0.0.1"));
    let emitter = UdpEmitter::new(&transport)?;

    let mut config = LoggerConfig::default();
    config.namespace = "udp_demo".to_string();
    config.progname = Some("udp-demo".to_string());

    let mut logger = LwesLogger::with_config(Arc::new(emitter), config)
        .with_text_sink(Box::new(WriterSink::new(std::io::stderr())));
    logger.meta_field("build", FieldValue::lazy(|| env!("CARGO_PKG_VERSION").to_string()));

    logger.info("demo started")?;
    logger.warn("something looks off")?;
    logger.error("and now it broke")?;
    logger.append("raw trailer line\n")?;

    Ok(())
}
