//! Logging setup for the desktop binary.
//!
//! `RUST_LOG` wins when set. Otherwise a default is installed that keeps our
//! own spans verbose in debug builds while quieting the chattier dependencies.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const DEBUG_FILTER: &str = "debug,eframe::native=warn,hyper_util=info,walkers=info,egui::context=warn,reqwest::connect=info,wgpu_core=warn,wgpu_hal=warn,naga=warn";
const RELEASE_FILTER: &str = "info,eframe::native=warn,egui::context=warn,wgpu_core=warn";

/// Default filter directives for this build profile
fn default_filter() -> &'static str {
    if cfg!(debug_assertions) {
        DEBUG_FILTER
    } else {
        RELEASE_FILTER
    }
}

/// Install the global tracing subscriber.
///
/// With the `profiling` feature, `profiling::scope!` and
/// `#[profiling::all_functions]` emit tracing spans that show up here too.
pub fn setup_logging() {
    let from_env = std::env::var("RUST_LOG").is_ok();
    let filter = if from_env {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default_filter())
    };

    let fmt_layer = fmt::layer().with_filter(filter);
    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        // Already installed (e.g. by a test harness)
        return;
    }

    if !from_env {
        tracing::info!("RUST_LOG not set, using default: {}", default_filter());
    }
}
