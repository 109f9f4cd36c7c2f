use std::fmt::Display;
use std::path::PathBuf;

use crate::charts::card::SummaryCard;
use crate::charts::comparison::ComparisonChart;
use crate::charts::map::MapView;
use crate::charts::trend::TrendChart;
use crate::config::DashboardConfig;
use crate::controller::{self, DropdownOptions, MapTrigger, NavLink, Update};
use crate::data::loader::DataSource;
use crate::data::model::{Dataset, REGION};
use crate::data::pivot::RankingTable;
use crate::data::store::DataStore;
use crate::data::taxonomy::distinct_values;
use crate::routes::{self, Route};

// ---------------------------------------------------------------------------
// Per-page selections and the outputs computed from them
// ---------------------------------------------------------------------------

/// Homepage and map view.
#[derive(Default)]
pub struct MapPage {
    pub regions: Vec<String>,
    pub institutions: Vec<String>,
    pub trigger: MapTrigger,
    /// Institutions offered for the current region selection.
    pub hei_options: Vec<String>,
    pub view: MapView,
    pub card: Option<SummaryCard>,
}

#[derive(Default)]
pub struct RankingPage {
    pub class: Option<String>,
    pub year: Option<String>,
    pub regions: Vec<String>,
    pub table: Option<RankingTable>,
    /// Sort column and direction; `None` keeps the alphabetical order.
    pub sort: Option<(usize, bool)>,
}

#[derive(Default)]
pub struct ComparisonPage {
    pub years: Vec<String>,
    pub class: Option<String>,
    pub marker: Option<String>,
    pub category: Option<String>,
    pub institutions: Vec<String>,
    pub marker_options: Vec<String>,
    pub category_options: Vec<String>,
    pub chart: Option<ComparisonChart>,
}

/// Institution overview with its searchable sidebar.
#[derive(Default)]
pub struct OverviewPage {
    pub search: String,
    pub sidebar_open: bool,
    pub links: Vec<NavLink>,
    pub class: Option<String>,
    pub marker: Option<String>,
    pub marker_options: Vec<String>,
    pub chart: Option<TrendChart>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded snapshot (None until a data folder loads successfully).
    pub store: Option<DataStore>,

    pub route: Route,

    /// Region names in first-seen order, shared by every region filter.
    pub region_options: Vec<String>,

    /// Every institution name, for the comparison dropdown.
    pub institution_names: Vec<String>,

    pub map: MapPage,
    pub ranking: RankingPage,
    pub comparison: ComparisonPage,
    pub overview: OverviewPage,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

/// Keep the value of a successful query; record a failed one in `status`.
fn settle<T, E: Display>(status: &mut Option<String>, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("Query failed: {e}");
            *status = Some(format!("Error: {e}"));
            None
        }
    }
}

/// Install new dropdown options and clear the dependent choice.
fn apply_options(update: Update<DropdownOptions>, options: &mut Vec<String>, value: &mut Option<String>) {
    if let Update::Replace(new) = update {
        *options = new.options;
        *value = new.value;
    }
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let ranking = RankingPage {
            class: Some(config.default_class.clone()),
            year: Some(config.default_year.clone()),
            ..Default::default()
        };
        Self {
            config,
            store: None,
            route: Route::Home,
            region_options: Vec::new(),
            institution_names: Vec::new(),
            map: MapPage::default(),
            ranking,
            comparison: ComparisonPage::default(),
            overview: OverviewPage::default(),
            status_message: None,
        }
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.store.as_ref().map(DataStore::dataset)
    }

    /// Load a first snapshot from `source`, replacing any previous one.
    pub fn open(&mut self, source: Box<dyn DataSource>) {
        let description = source.describe();
        match DataStore::open(source) {
            Ok(store) => {
                self.store = Some(store);
                self.status_message = None;
                self.refresh_all();
            }
            Err(e) => {
                log::error!("Failed to load {description}: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Point the configured CSV file names at another folder and load it.
    pub fn open_folder(&mut self, dir: PathBuf) {
        self.config.data_dir = dir;
        let source = self.config.source();
        self.open(Box::new(source));
    }

    /// Re-read the current source; a failure keeps the shown data.
    pub fn reload(&mut self) {
        match self.store.as_mut().map(DataStore::reload) {
            None => {
                let source = self.config.source();
                self.open(Box::new(source));
            }
            Some(Ok(())) => {
                self.status_message = None;
                self.refresh_all();
            }
            Some(Err(e)) => {
                self.status_message = Some(format!("Reload failed, showing previous data: {e:#}"));
            }
        }
    }

    /// Recompute option lists and every page output from the snapshot.
    fn refresh_all(&mut self) {
        let Some(ds) = self.store.as_ref().map(DataStore::dataset) else {
            return;
        };
        let status = &mut self.status_message;
        self.region_options = settle(status, distinct_values(&ds.institutions, REGION)).unwrap_or_default();
        self.institution_names = settle(status, ds.institution_names()).unwrap_or_default();

        self.map_regions_changed();
        self.map.trigger = MapTrigger::Initial;
        self.refresh_map();
        self.ranking_changed();
        self.search_changed();
        if let Route::University(name) = self.route.clone() {
            self.overview_chart_changed(&name);
        }
        self.comparison_changed();
    }

    // -- routing ------------------------------------------------------------

    pub fn navigate(&mut self, path: &str) {
        let Some(ds) = self.store.as_ref().map(DataStore::dataset) else {
            self.route = Route::NotFound(path.to_string());
            return;
        };
        let Some(route) = settle(&mut self.status_message, routes::resolve(path, ds)) else {
            return;
        };
        log::debug!("Navigate to {path} -> {route:?}");
        if let Route::University(_) = route {
            self.overview.class = None;
            self.overview.marker = None;
            self.overview.marker_options.clear();
            self.overview.chart = None;
        }
        self.route = route;
    }

    // -- map ----------------------------------------------------------------

    pub fn map_regions_changed(&mut self) {
        let Some(ds) = self.store.as_ref().map(DataStore::dataset) else {
            return;
        };
        let status = &mut self.status_message;
        if let Some(options) = settle(status, controller::hei_options(ds, &self.map.regions)) {
            self.map.hei_options = options;
        }
        self.map.trigger = MapTrigger::Regions;
        self.refresh_map();
    }

    pub fn map_institutions_changed(&mut self) {
        self.map.trigger = MapTrigger::Institutions;
        self.refresh_map();
    }

    fn refresh_map(&mut self) {
        let Some(ds) = self.store.as_ref().map(DataStore::dataset) else {
            return;
        };
        let result = controller::update_map(ds, self.map.trigger, &self.map.regions, &self.map.institutions);
        if let Some(view) = settle(&mut self.status_message, result) {
            self.map.view = view;
        }
    }

    pub fn hover(&mut self, ukprn: Option<i64>) {
        let Some(ds) = self.store.as_ref().map(DataStore::dataset) else {
            return;
        };
        if self.map.card.as_ref().map(|c| c.ukprn) == ukprn {
            return;
        }
        if let Some(update) = settle(&mut self.status_message, controller::display_card(ds, ukprn)) {
            update.apply_to(&mut self.map.card);
        }
    }

    // -- ranking table ------------------------------------------------------

    pub fn ranking_changed(&mut self) {
        let Some(ds) = self.store.as_ref().map(DataStore::dataset) else {
            return;
        };
        let page = &mut self.ranking;
        let result = controller::update_table(ds, page.class.as_deref(), page.year.as_deref(), &page.regions);
        if let Some(update) = settle(&mut self.status_message, result) {
            if update.apply_to(&mut page.table) {
                page.sort = None;
            }
        }
    }

    /// Clicking the current sort column flips direction.
    pub fn sort_ranking(&mut self, column: usize) {
        self.ranking.sort = match self.ranking.sort {
            Some((current, ascending)) if current == column => Some((column, !ascending)),
            _ => Some((column, column == 0)),
        };
    }

    // -- comparison ---------------------------------------------------------

    pub fn comparison_class_changed(&mut self) {
        let Some(ds) = self.store.as_ref().map(DataStore::dataset) else {
            return;
        };
        let page = &mut self.comparison;
        let result = controller::update_category_markers(ds, page.class.as_deref());
        if let Some(update) = settle(&mut self.status_message, result) {
            if matches!(update, Update::Replace(_)) {
                page.category_options.clear();
                page.category = None;
            }
            apply_options(update, &mut page.marker_options, &mut page.marker);
        }
        self.comparison_changed();
    }

    pub fn comparison_marker_changed(&mut self) {
        let Some(ds) = self.store.as_ref().map(DataStore::dataset) else {
            return;
        };
        let page = &mut self.comparison;
        let result = controller::update_categories(ds, page.marker.as_deref());
        if let Some(update) = settle(&mut self.status_message, result) {
            apply_options(update, &mut page.category_options, &mut page.category);
        }
        self.comparison_changed();
    }

    pub fn comparison_changed(&mut self) {
        let Some(ds) = self.store.as_ref().map(DataStore::dataset) else {
            return;
        };
        let page = &mut self.comparison;
        let result = controller::update_bar_chart(ds, &page.institutions, &page.years, page.category.as_deref());
        if let Some(update) = settle(&mut self.status_message, result) {
            update.apply_to(&mut page.chart);
        }
    }

    // -- institution overview -----------------------------------------------

    pub fn search_changed(&mut self) {
        let Some(ds) = self.store.as_ref().map(DataStore::dataset) else {
            return;
        };
        let result = controller::search_institutions(ds, &self.overview.search);
        if let Some(links) = settle(&mut self.status_message, result) {
            self.overview.links = links;
        }
    }

    pub fn overview_class_changed(&mut self, institution: &str) {
        let Some(ds) = self.store.as_ref().map(DataStore::dataset) else {
            return;
        };
        let page = &mut self.overview;
        let result = controller::update_category_markers(ds, page.class.as_deref());
        if let Some(update) = settle(&mut self.status_message, result) {
            apply_options(update, &mut page.marker_options, &mut page.marker);
        }
        self.overview_chart_changed(institution);
    }

    pub fn overview_chart_changed(&mut self, institution: &str) {
        let Some(ds) = self.store.as_ref().map(DataStore::dataset) else {
            return;
        };
        let page = &mut self.overview;
        let result = controller::update_line_chart(ds, institution, page.class.as_deref(), page.marker.as_deref());
        if let Some(update) = settle(&mut self.status_message, result) {
            update.apply_to(&mut page.chart);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn loaded() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.open(Box::new(fixtures::source()));
        state
    }

    #[test]
    fn opening_computes_every_page() {
        let state = loaded();
        assert!(state.status_message.is_none());
        assert_eq!(state.region_options, vec!["South West", "London", "North East", "North West"]);
        assert_eq!(state.map.view.markers.len(), 8);
        assert_eq!(state.map.hei_options.len(), 8);
        let table = state.ranking.table.as_ref().unwrap();
        assert_eq!(table.rows.len(), 4);
        assert_eq!(state.overview.links.len(), 8);
        assert!(state.comparison.chart.is_none());
    }

    #[test]
    fn failed_open_reports_status() {
        let mut state = AppState::new(DashboardConfig::default());
        state.open(Box::new(crate::data::loader::InMemorySource::new("nope\n1\n", "")));
        assert!(state.store.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }

    #[test]
    fn clearing_class_keeps_previous_table() {
        let mut state = loaded();
        let before = state.ranking.table.clone();
        state.ranking.class = None;
        state.ranking_changed();
        assert_eq!(state.ranking.table, before);
    }

    #[test]
    fn comparison_dropdowns_cascade() {
        let mut state = loaded();
        state.comparison.class = Some("Energy".into());
        state.comparison_class_changed();
        assert_eq!(state.comparison.marker_options, vec!["Energy consumption", "Energy sources"]);

        state.comparison.marker = Some("Energy consumption".into());
        state.comparison_marker_changed();
        state.comparison.category = Some("Total energy consumption (kWh)".into());
        state.comparison.institutions = vec!["University of Exeter".into(), "University of Bath".into()];
        state.comparison.years = vec!["2021/22".into()];
        state.comparison_changed();
        assert_eq!(state.comparison.chart.as_ref().unwrap().bars.len(), 2);

        // A new class clears the marker and category below it.
        state.comparison.class = Some("Finances and people".into());
        state.comparison_class_changed();
        assert_eq!(state.comparison.marker, None);
        assert_eq!(state.comparison.category, None);
        assert!(state.comparison.category_options.is_empty());
    }

    #[test]
    fn navigation_resolves_university_pages() {
        let mut state = loaded();
        state.navigate("/university/University%20of%20Bath");
        assert_eq!(state.route, Route::University("University of Bath".into()));
        state.navigate("/university/Nowhere");
        assert_eq!(state.route, Route::NotFound("/university/Nowhere".into()));
    }

    #[test]
    fn sort_toggles_on_repeated_column() {
        let mut state = loaded();
        state.sort_ranking(2);
        assert_eq!(state.ranking.sort, Some((2, false)));
        state.sort_ranking(2);
        assert_eq!(state.ranking.sort, Some((2, true)));
        state.sort_ranking(0);
        assert_eq!(state.ranking.sort, Some((0, true)));
    }
}
