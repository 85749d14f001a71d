//! # Example: shutdown_chain
//!
//! A service that releases its resources in a fixed order on Ctrl-C / SIGTERM.
//!
//! Demonstrates how to:
//! - Compose cleanup steps with [`chain!`] and [`Chain::builder`].
//! - Arm them with [`Closer`] and wait on the [`Completion`] with a grace period.
//! - Keep a second, no-op registration armed next to the real one.
//!
//! ## Flow
//! ```text
//! main ──► Closer::register(done, chain)   (armed, returns immediately)
//!      ──► tokio::spawn(serve)
//!      ──► completion.wait_with(&cfg)
//!             ▲
//! Ctrl-C ─────┴── chain: stop accepting ─► drain ─► close pool ─► Report
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example shutdown_chain
//! # then press Ctrl-C
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use closer::{Chain, Closer, Config, chain, closer, rendezvous};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let accepting = Arc::new(AtomicBool::new(true));

    // 1. Cleanup steps, in the order they must run
    let stop = accepting.clone();
    let cleanup = Chain::builder()
        .then_named("stop-accepting", move || stop.store(false, Ordering::SeqCst))
        .then_named("drain", || std::thread::sleep(Duration::from_millis(200)))
        .then_named("close-pool", || -> Result<(), std::io::Error> { Ok(()) })
        .then_action(Arc::new(chain![|| println!("1"), || println!("2"), || println!("3")]))
        .build();

    // 2. Arm it
    let cfg = Config {
        grace: Duration::from_secs(5),
        ..Config::named("demo")
    };
    let (done, mut completion) = rendezvous();
    Closer::builder(cfg.clone())
        .with_log_writer()
        .build()
        .register(done, cleanup)?;

    // 3. A placeholder registration; its completion is simply ignored
    let (noop_done, _noop_completion) = rendezvous();
    closer(noop_done, Chain::noop())?;

    // 4. Run the service
    let serving = accepting.clone();
    tokio::spawn(async move {
        while serving.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(500)).await;
            println!("[service] tick");
        }
    });

    // 5. Wait for cleanup, bounded by the grace period
    let report = completion.wait_with(&cfg).await?;
    println!(
        "main after close: signal={} actions={} failures={} elapsed={:?}",
        report.signal,
        report.chain.invoked,
        report.chain.failures.len(),
        report.chain.elapsed
    );
    Ok(())
}
