use super::logging::setup_logging;
use super::metadata::log_version_info;
use crate::app::{RoadRevealApp, Settings};

const APP_NAME: &str = "Road Reveal";

/// Native entry point, expects to run inside a tokio runtime
pub async fn native_main() -> eframe::Result {
    setup_logging();
    log_version_info();

    let settings = Settings::from_cli();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(APP_NAME),
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(RoadRevealApp::new(settings, cc)?))),
    )
}

/// Build the multi-threaded runtime used by the fetcher and run the app on it
pub fn run_native() -> eframe::Result {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("road-reveal-worker")
        .build()
        .map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;

    runtime.block_on(native_main())
}
