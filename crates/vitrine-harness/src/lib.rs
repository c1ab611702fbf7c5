#![forbid(unsafe_code)]

//! Deterministic test harness for the Vitrine catalog.
//!
//! - [`RecordingView`] - in-memory fake of the storefront markup
//! - [`CatalogSimulator`] - browser stand-in with a host-driven clock
//! - [`fixtures`] - card sets shared by tests
//!
//! Set `VITRINE_LOG=debug` to see controller logs while tests run.

pub mod fixtures;
pub mod simulator;
pub mod view;

pub use simulator::{CatalogSimulator, TimerStats};
pub use view::{FakeCard, FakeControl, FakeToggle, RecordingView};

/// Route `tracing` output to the test writer, filtered by `VITRINE_LOG`.
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("VITRINE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
