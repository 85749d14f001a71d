//! # Example: custom_observer
//!
//! Attaches a custom [`Observe`] implementation and triggers the registration
//! from inside the process through a [`SignalHub`] instead of the OS.
//!
//! ## Flow
//! ```text
//! SignalHub::deliver(Terminate) ──► HubReceiver ──► registration task
//!                                                     ├─► SignalReceived
//!                                                     ├─► ActionStarting / ActionCompleted / ActionFailed (per action)
//!                                                     ├─► ChainCompleted
//!                                                     └─► CompletionPublished ──► Timings.on_event()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example custom_observer
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use closer::{Closer, Config, Event, EventKind, Observe, SignalHub, SignalKind, chain, rendezvous};

/// Collects per-action timings.
#[derive(Default)]
struct Timings(Mutex<Vec<(String, u32)>>);

impl Observe for Timings {
    fn on_event(&self, ev: &Event) {
        match ev.kind {
            EventKind::ActionCompleted | EventKind::ActionFailed => {
                let name = ev.action.as_deref().unwrap_or("<unknown>").to_string();
                let ms = ev.elapsed_ms.unwrap_or(0);
                if let Ok(mut t) = self.0.lock() {
                    t.push((name, ms));
                }
            }
            EventKind::SignalReceived => {
                println!("[obs] fired by {:?}", ev.signal);
            }
            _ => {}
        }
    }

    fn name(&self) -> &'static str {
        "timings"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let timings = Arc::new(Timings::default());
    let hub = SignalHub::new(Config::default().hub_capacity_clamped());

    let closer = Closer::builder(Config::named("observed"))
        .with_observers(vec![timings.clone()])
        .build();

    let (done, mut completion) = rendezvous();
    closer.register_with(
        done,
        chain![
            || std::thread::sleep(Duration::from_millis(30)),
            || Err::<(), _>("remote already closed"),
            || std::thread::sleep(Duration::from_millis(10)),
        ],
        hub.subscribe(),
    )?;

    hub.deliver(SignalKind::Terminate);
    let report = completion.wait_timeout(Duration::from_secs(2)).await?;

    for failure in &report.chain.failures {
        println!("[main] action #{} {} failed: {}", failure.index, failure.name, failure.error);
    }
    for (name, ms) in timings.0.lock().map(|t| t.clone()).unwrap_or_default() {
        println!("[main] {name}: {ms}ms");
    }
    Ok(())
}
