use std::sync::Arc;
use std::time::Instant;

use lwes_logger::logger::LwesLogger;
use lwes_logger::noop_emitter::NoopEmitter;

fn main() {
    let logger = LwesLogger::new(Arc::new(NoopEmitter::default()));

    let n: u64 = 100_000;
    let start = Instant::now();

    for i in 0..n {
        logger
            .add_lazy(lwes_logger::severity::Severity::Error, None, || {
                format!("load test error, iteration {i}")
            })
            .expect("noop emitter never fails");
    }

    let elapsed = start.elapsed();
    println!(
        "default config: built {} events in {:?} (~{:.0} ev/s)",
        n,
        elapsed,
        n as f64 / elapsed.as_secs_f64()
    );
}
