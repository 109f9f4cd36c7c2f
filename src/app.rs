use eframe::egui;

use crate::routes::Route;
use crate::state::AppState;
use crate::ui::{pages, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HeiDashboardApp {
    pub state: AppState,
}

impl HeiDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for HeiDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: navigation bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: data source ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui);
        });

        // ---- Central panel: current page ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.store.is_none() {
                pages::no_data(ui);
                return;
            }
            let state = &mut self.state;
            let go_to = match state.route.clone() {
                Route::Home => pages::home(ui, state),
                Route::MapView => {
                    pages::map_view(ui, state);
                    None
                }
                Route::RankingTable => pages::ranking(ui, state),
                Route::Comparison => {
                    pages::comparison(ui, state);
                    None
                }
                Route::University(name) => pages::overview(ui, state, &name),
                Route::NotFound(path) => pages::not_found(ui, state, &path),
            };
            if let Some(path) = go_to {
                state.navigate(&path);
            }
        });
    }
}
