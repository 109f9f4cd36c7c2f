use eframe::egui::{self, Color32, RichText, Ui};

use crate::routes::Route;
use crate::state::AppState;

const HESA_DATA_URL: &str = "https://www.hesa.ac.uk/data-and-analysis/estates/data.csv";

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / navigation bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    let mut go_to: Option<String> = None;

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if ui
            .selectable_label(state.route == Route::Home, RichText::new("HEI Environmental Dashboard").strong())
            .clicked()
        {
            go_to = Some(Route::Home.path());
        }
        for page in [Route::RankingTable, Route::Comparison, Route::MapView] {
            if ui.selectable_label(state.route == page, page.title()).clicked() {
                go_to = Some(page.path());
            }
        }

        ui.separator();

        if let (Some(ds), Some(store)) = (state.dataset(), &state.store) {
            ui.label(format!("{} institutions, {} rows", ds.institutions.len(), ds.entries.len()))
                .on_hover_text(store.describe());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });

    if let Some(path) = go_to {
        state.navigate(&path);
    }
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

pub fn footer(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.small("Data Source: HESA");
        ui.horizontal(|ui: &mut Ui| {
            ui.small("Data file canonical link:");
            ui.hyperlink_to(RichText::new(HESA_DATA_URL).small(), HESA_DATA_URL);
        });
        ui.small("Data file license: Creative Commons Attribution 4.0 International Licence");
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open HESA data folder")
        .set_directory(&state.config.data_dir)
        .pick_folder();

    if let Some(dir) = folder {
        log::info!("Opening data folder {}", dir.display());
        state.open_folder(dir);
    }
}
