use std::sync::atomic::AtomicBool;

use tracing::Level;

const LOG_ENV: &str = "ROLLDOWN_LOG";

static IS_INIT: AtomicBool = AtomicBool::new(false);

/// Installs the global subscriber once, only if `ROLLDOWN_LOG` is set.
///
/// `ROLLDOWN_LOG` takes `EnvFilter` directives, e.g. `ROLLDOWN_LOG=rolldown_bundle=trace`.
pub fn enable_tracing_on_demand() {
  if std::env::var_os(LOG_ENV).is_some() {
    init();
  }
}

pub fn init() {
  use tracing_subscriber::{fmt, prelude::*, EnvFilter};
  if !IS_INIT.swap(true, std::sync::atomic::Ordering::SeqCst) {
    // Another subscriber may already be installed, e.g. by a test harness.
    let _ = tracing_subscriber::registry()
      .with(fmt::layer())
      .with(EnvFilter::from_env(LOG_ENV))
      .with(
        tracing_subscriber::filter::Targets::new().with_targets(vec![("rolldown", Level::TRACE)]),
      )
      .try_init();
  }
}
