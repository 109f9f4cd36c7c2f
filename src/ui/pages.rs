use eframe::egui::{self, RichText, Ui};

use super::{charts, field, map, select_many, select_one, table};
use crate::data::model::{ACADEMIC_YEARS, CLASSES};
use crate::routes::Route;
use crate::state::AppState;

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn placeholder(ui: &mut Ui, text: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new(text).weak());
    });
}

/// Shown on every page until a dataset is loaded.
pub fn no_data(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("No data loaded  (File → Open data folder…)");
    });
}

// ---------------------------------------------------------------------------
// Homepage and map view
// ---------------------------------------------------------------------------

pub fn home(ui: &mut Ui, state: &mut AppState) -> Option<String> {
    let mut go_to = None;
    ui.heading("Welcome to the England HEI Environmental Dashboard");
    ui.label("This dashboard provides an overview of the environmental performance of Higher Education Institutions (HEIs) in England.");
    ui.add_space(8.0);

    let first_university = state.institution_names.first().cloned();
    ui.columns(3, |cols| {
        let buttons = [
            ("Ranking Table", "See the ranking of all HEIs", Some(Route::RankingTable)),
            (
                "HEI overview",
                "Analyse the performance of a specific HEI",
                first_university.map(Route::University),
            ),
            ("HEI comparison", "Compare the performance of multiple HEIs", Some(Route::Comparison)),
        ];
        for (col, (title, description, route)) in cols.iter_mut().zip(buttons) {
            let text = format!("{title}\n{description}");
            let button = egui::Button::new(text).min_size(egui::vec2(col.available_width(), 56.0));
            if col.add_enabled(route.is_some(), button).clicked() {
                go_to = route.map(|r| r.path());
            }
        }
    });
    ui.add_space(8.0);

    egui::SidePanel::right("card_panel")
        .resizable(false)
        .default_width(220.0)
        .show_inside(ui, |ui: &mut Ui| {
            if let Some(path) = map::summary_card(ui, state.map.card.as_ref()) {
                go_to = Some(path);
            }
        });
    egui::SidePanel::left("map_filters")
        .resizable(false)
        .default_width(220.0)
        .show_inside(ui, |ui: &mut Ui| {
            ui.label("The map shows the location of HEIs in England. Hover over a point to see more information about the HEI.");
            ui.add_space(6.0);
            map_filters(ui, state);
        });
    egui::CentralPanel::default().show_inside(ui, |ui: &mut Ui| {
        let hovered = map::institution_map(ui, &state.map.view);
        state.hover(hovered);
    });
    go_to
}

pub fn map_view(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Map view");
    egui::SidePanel::left("map_view_filters")
        .resizable(false)
        .default_width(260.0)
        .show_inside(ui, |ui: &mut Ui| map_filters(ui, state));
    egui::CentralPanel::default().show_inside(ui, |ui: &mut Ui| {
        map::institution_map(ui, &state.map.view);
    });
}

fn map_filters(ui: &mut Ui, state: &mut AppState) {
    field(ui, "Filter Regions");
    if select_many(ui, "region-dropdown-map", "Select Region(s)", &state.region_options, &mut state.map.regions) {
        state.map_regions_changed();
    }
    ui.add_space(4.0);
    field(ui, "Filter HEIs");
    if select_many(ui, "hei-dropdown-map", "Select HEI(s)", &state.map.hei_options, &mut state.map.institutions) {
        state.map_institutions_changed();
    }
}

// ---------------------------------------------------------------------------
// Ranking table
// ---------------------------------------------------------------------------

pub fn ranking(ui: &mut Ui, state: &mut AppState) -> Option<String> {
    ui.heading("Ranking Table");
    let classes = owned(&CLASSES);
    let years = owned(&ACADEMIC_YEARS);

    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            field(ui, "Class");
            changed |= select_one(ui, "class-dropdown-rank", "Select a class", &classes, &mut state.ranking.class);
        });
        ui.vertical(|ui: &mut Ui| {
            field(ui, "Year");
            changed |= select_one(ui, "year-dropdown-rank", "Select a year", &years, &mut state.ranking.year);
        });
        ui.vertical(|ui: &mut Ui| {
            field(ui, "Region");
            changed |= select_many(ui, "region-dropdown-rank", "Filter Regions", &state.region_options, &mut state.ranking.regions);
        });
        ui.vertical(|ui: &mut Ui| {
            ui.add_space(ui.spacing().interact_size.y);
            if ui
                .add_enabled(state.ranking.table.is_some(), egui::Button::new("Export CSV…"))
                .clicked()
            {
                export(state);
            }
        });
    });
    if changed {
        state.ranking_changed();
    }
    ui.separator();

    let Some(ranking) = &state.ranking.table else {
        placeholder(ui, "Choose a class and a year to see the ranking.");
        return None;
    };
    if ranking.rows.is_empty() {
        placeholder(ui, "No institution reported figures for this selection.");
        return None;
    }
    match table::ranking_table(ui, ranking, state.ranking.sort)? {
        table::TableAction::Sort(column) => {
            state.sort_ranking(column);
            None
        }
        table::TableAction::Open(path) => Some(path),
    }
}

fn export(state: &mut AppState) {
    let Some(ranking) = &state.ranking.table else {
        return;
    };
    let name = format!(
        "ranking_{}_{}.csv",
        state.ranking.class.as_deref().unwrap_or("all"),
        state.ranking.year.as_deref().unwrap_or("all")
    )
    .replace(['/', ' '], "_");
    match table::export_csv(ranking, &name) {
        Ok(Some(path)) => state.status_message = Some(format!("Exported to {}", path.display())),
        Ok(None) => {}
        Err(e) => {
            log::error!("CSV export failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

pub fn comparison(ui: &mut Ui, state: &mut AppState) {
    ui.heading("HEI Comparison");
    let classes = owned(&CLASSES);
    let years = owned(&ACADEMIC_YEARS);

    egui::SidePanel::left("comparison_filters")
        .resizable(false)
        .default_width(280.0)
        .show_inside(ui, |ui: &mut Ui| {
            let page = &mut state.comparison;
            field(ui, "Year");
            let mut changed = select_many(ui, "year-dropdown-comparison", "Select Year(s)", &years, &mut page.years);
            field(ui, "Class");
            let class_changed = select_one(
                ui,
                "class-dropdown-comparison",
                "Choose a class to see available category markers",
                &classes,
                &mut page.class,
            );
            field(ui, "Category Marker");
            let marker_changed = select_one(
                ui,
                "category-marker-dropdown-comparison",
                "Choose a category marker to see available categories",
                &page.marker_options,
                &mut page.marker,
            );
            field(ui, "Category");
            changed |= select_one(
                ui,
                "category-dropdown-comparison",
                "Choose a category",
                &page.category_options,
                &mut page.category,
            );
            field(ui, "HEI");
            changed |= select_many(
                ui,
                "hei-dropdown-comparison",
                "Select HEI(s) to compare on the graph",
                &state.institution_names,
                &mut page.institutions,
            );

            if class_changed {
                state.comparison_class_changed();
            } else if marker_changed {
                state.comparison_marker_changed();
            } else if changed {
                state.comparison_changed();
            }
        });

    egui::CentralPanel::default().show_inside(ui, |ui: &mut Ui| match &state.comparison.chart {
        Some(chart) if !chart.bars.is_empty() => charts::comparison_chart(ui, chart),
        Some(chart) => {
            ui.heading(&chart.title);
            placeholder(ui, "No data for the selected institutions and years.");
        }
        None => placeholder(ui, "Select years, a category and institutions to compare."),
    });
}

// ---------------------------------------------------------------------------
// Institution overview
// ---------------------------------------------------------------------------

fn sidebar(ui: &mut Ui, state: &mut AppState) -> Option<String> {
    let mut go_to = None;
    let label = if state.overview.sidebar_open { "Hide HEIs" } else { "Other HEIs" };
    if ui.button(label).clicked() {
        state.overview.sidebar_open = !state.overview.sidebar_open;
    }
    if !state.overview.sidebar_open {
        return None;
    }
    let search = egui::TextEdit::singleline(&mut state.overview.search).hint_text("Search for a HEI");
    if ui.add(search).changed() {
        state.search_changed();
    }
    let current = state.route.path();
    egui::ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        for link in &state.overview.links {
            if ui.selectable_label(link.href == current, &link.label).clicked() {
                go_to = Some(link.href.clone());
            }
        }
    });
    go_to
}

pub fn overview(ui: &mut Ui, state: &mut AppState, institution: &str) -> Option<String> {
    let mut go_to = None;
    egui::SidePanel::left("overview_sidebar")
        .default_width(220.0)
        .show_inside(ui, |ui: &mut Ui| go_to = sidebar(ui, state));

    egui::CentralPanel::default().show_inside(ui, |ui: &mut Ui| {
        ui.heading(institution);
        ui.label(format!(
            "Use this page to see how {institution} has performed between {} - {} in various environmental categories.",
            ACADEMIC_YEARS[0],
            ACADEMIC_YEARS[ACADEMIC_YEARS.len() - 1]
        ));
        ui.label(RichText::new("You can analyse other universities using the button to the side.").strong());
        ui.add_space(6.0);

        let classes = owned(&CLASSES);
        let (mut class_changed, mut marker_changed) = (false, false);
        ui.columns(2, |cols| {
            field(&mut cols[0], "Class");
            class_changed = select_one(
                &mut cols[0],
                "class-dropdown",
                "Choose a class to see options for 'Category Marker'",
                &classes,
                &mut state.overview.class,
            );
            field(&mut cols[1], "Category Marker");
            marker_changed = select_one(
                &mut cols[1],
                "category-marker-dropdown",
                "Choose a category marker to see a graph",
                &state.overview.marker_options,
                &mut state.overview.marker,
            );
        });
        if class_changed {
            state.overview_class_changed(institution);
        } else if marker_changed {
            state.overview_chart_changed(institution);
        }
        ui.separator();

        match &state.overview.chart {
            Some(chart) if !chart.series.is_empty() => charts::trend_chart(ui, chart),
            Some(chart) => {
                ui.heading(&chart.title);
                placeholder(ui, "Choose a category marker to see a graph.");
            }
            None => placeholder(ui, "Choose a class to see options for 'Category Marker'."),
        }
    });
    go_to
}

// ---------------------------------------------------------------------------
// Not found
// ---------------------------------------------------------------------------

pub fn not_found(ui: &mut Ui, state: &mut AppState, path: &str) -> Option<String> {
    let mut go_to = None;
    if path.starts_with("/university/") {
        egui::SidePanel::left("overview_sidebar")
            .default_width(220.0)
            .show_inside(ui, |ui: &mut Ui| go_to = sidebar(ui, state));
        egui::CentralPanel::default().show_inside(ui, |ui: &mut Ui| {
            ui.heading("University not found");
            ui.label("The university you are looking for does not exist in our database.");
            ui.label("Please choose a university from the sidebar.");
        });
        return go_to;
    }
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading("404 - Not Found");
        ui.label(format!("The page \"{path}\" does not exist."));
        if ui.link("Return to homepage").clicked() {
            go_to = Some(Route::Home.path());
        }
    });
    go_to
}
