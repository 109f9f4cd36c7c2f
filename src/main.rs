mod app;
mod charts;
mod color;
mod config;
mod controller;
mod data;
mod error;
mod format;
mod routes;
mod state;
mod ui;

use app::HeiDashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let mut state = match DashboardConfig::load() {
        Ok(config) => AppState::new(config),
        Err(e) => {
            log::error!("Falling back to default config: {e:#}");
            let mut state = AppState::new(DashboardConfig::default());
            state.status_message = Some(format!("Error: {e:#}"));
            state
        }
    };
    let config_error = state.status_message.take();
    let source = state.config.source();
    state.open(Box::new(source));
    if let Some(msg) = config_error {
        state.status_message.get_or_insert(msg);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "HEI Environmental Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(HeiDashboardApp::new(state)))),
    )
}
