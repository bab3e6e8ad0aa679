pub mod config;
pub mod emitter;
pub mod error;
pub mod event;
pub mod logger;
pub mod memory_emitter;
pub mod meta;
pub mod namespace;
pub mod noop_emitter;
pub mod severity;
pub mod text;
pub mod token;

#[cfg(feature = "udp")]
pub mod udp;

#[cfg(feature = "bridge")]
pub mod bridge;
