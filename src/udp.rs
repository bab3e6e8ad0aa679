use crate::config::TransportConfig;
use crate::emitter::Emitter;
use crate::event::LogEvent;
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::io;
use std::net::{Ipv4Addr, SocketAddrV4, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Wire shape of one emission: the channel name plus the flat string
/// fields of the record.
#[derive(Serialize)]
struct WireEvent<'a> {
    name: &'a str,
    fields: &'a BTreeMap<String, String>,
}

/// UDP implementation of [`Emitter`].
///
/// Each emission is encoded as a single JSON datagram and sent to
/// `address:port`, best-effort. Multicast targets get the configured
/// multicast TTL; unicast targets the plain TTL. When the configured
/// heartbeat interval is non-zero, a detached thread emits a
/// `System::Heartbeat` datagram with a running count until the emitter is
/// dropped.
pub struct UdpEmitter {
    socket: UdpSocket,
    target: SocketAddrV4,
    stop: Arc<AtomicBool>,
}

impl UdpEmitter {
    /// Bind a socket on the configured interface and prepare the target
    /// address.
    ///
    /// **Returns**
    /// - `Ok(UdpEmitter)` ready to be wrapped in an `Arc<dyn Emitter>`.
    /// - `Err(..)` if the interface or address does not parse, or the
    ///   socket cannot be bound or configured.
    pub fn new(config: &TransportConfig) -> io::Result<Self> {
        let iface: Ipv4Addr = config
            .iface
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let address: Ipv4Addr = config
            .address
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let socket = UdpSocket::bind(SocketAddrV4::new(iface, 0))?;
        if address.is_multicast() {
            socket.set_multicast_ttl_v4(config.ttl)?;
        } else {
            socket.set_ttl(config.ttl)?;
        }

        let target = SocketAddrV4::new(address, config.port);
        let stop = Arc::new(AtomicBool::new(false));

        if config.heartbeat > 0 {
            spawn_heartbeat(
                socket.try_clone()?,
                target,
                config.heartbeat,
                Arc::clone(&stop),
            );
        }

        Ok(Self {
            socket,
            target,
            stop,
        })
    }

    fn encode(channel: &str, fields: &BTreeMap<String, String>) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&WireEvent {
            name: channel,
            fields,
        })
    }
}

impl Emitter for UdpEmitter {
    fn emit(&self, channel: &str, event: &LogEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        let payload = Self::encode(channel, event.fields())?;
        self.socket.send_to(&payload, self.target)?;
        Ok(())
    }
}

impl Drop for UdpEmitter {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

fn spawn_heartbeat(socket: UdpSocket, target: SocketAddrV4, interval: u64, stop: Arc<AtomicBool>) {
    thread::spawn(move || {
        let mut count: u64 = 0;
        loop {
            thread::sleep(Duration::from_secs(interval));
            if stop.load(Ordering::SeqCst) {
                return;
            }
            count += 1;
            let mut fields = BTreeMap::new();
            fields.insert("count".to_string(), count.to_string());
            fields.insert("freq".to_string(), interval.to_string());
            if let Ok(payload) = UdpEmitter::encode("System::Heartbeat", &fields) {
                // Best-effort, like every other emission.
                let _ = socket.send_to(&payload, target);
            }
        }
    });
}
