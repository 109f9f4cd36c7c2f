//! Page controllers as typed request/response functions.
//!
//! Each function answers one user interaction from the current snapshot.
//! A required selection that is missing yields [`Update::NoUpdate`]: the
//! dependent output keeps whatever it showed before.

use crate::charts::card::{summary_card, SummaryCard};
use crate::charts::comparison::{comparison_series, ComparisonChart};
use crate::charts::map::{map_markers, MapView};
use crate::charts::trend::{trend_series, TrendChart};
use crate::data::filter::{filter_table, filters};
use crate::data::model::{Dataset, PROVIDER, REGION};
use crate::data::pivot::{pivot_ranking, RankingTable};
use crate::data::taxonomy::{category_marker_options, category_options};
use crate::error::QueryError;
use crate::routes::institution_path;

#[derive(Debug, Clone, PartialEq)]
pub enum Update<T> {
    /// Leave the output as it is.
    NoUpdate,
    Replace(T),
}

impl<T> Update<T> {
    /// Write a replacement into `slot`; returns whether anything changed.
    pub fn apply_to(self, slot: &mut Option<T>) -> bool {
        match self {
            Update::NoUpdate => false,
            Update::Replace(value) => {
                *slot = Some(value);
                true
            }
        }
    }
}

/// Empty strings count as "nothing selected".
fn chosen(selection: Option<&str>) -> Option<&str> {
    selection.filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Homepage map
// ---------------------------------------------------------------------------

/// Which map filter the user touched last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapTrigger {
    #[default]
    Initial,
    Regions,
    Institutions,
}

/// Institution names offered by the map's institution dropdown.
pub fn hei_options(dataset: &Dataset, regions: &[String]) -> Result<Vec<String>, QueryError> {
    let located = filter_table(&dataset.institutions, &filters([(REGION, regions)]))?;
    let names = located.column(PROVIDER)?.map(str::to_string).collect();
    Ok(names)
}

/// Redraw the map using only the filter that triggered the change.
pub fn update_map(
    dataset: &Dataset,
    trigger: MapTrigger,
    regions: &[String],
    institutions: &[String],
) -> Result<MapView, QueryError> {
    match trigger {
        MapTrigger::Initial => map_markers(dataset, None, None),
        MapTrigger::Regions => map_markers(dataset, Some(regions), None),
        MapTrigger::Institutions => map_markers(dataset, None, Some(institutions)),
    }
}

pub fn display_card(
    dataset: &Dataset,
    hovered_ukprn: Option<i64>,
) -> Result<Update<SummaryCard>, QueryError> {
    match hovered_ukprn {
        Some(ukprn) => Ok(Update::Replace(summary_card(dataset, ukprn)?)),
        None => Ok(Update::NoUpdate),
    }
}

// ---------------------------------------------------------------------------
// Dependent dropdowns
// ---------------------------------------------------------------------------

/// New options for a dependent dropdown; its previous choice is cleared.
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownOptions {
    pub options: Vec<String>,
    pub value: Option<String>,
}

impl DropdownOptions {
    fn cleared(options: Vec<String>) -> Self {
        DropdownOptions {
            options,
            value: None,
        }
    }
}

pub fn update_category_markers(
    dataset: &Dataset,
    class: Option<&str>,
) -> Result<Update<DropdownOptions>, QueryError> {
    let Some(class) = chosen(class) else {
        return Ok(Update::NoUpdate);
    };
    let options = category_marker_options(&dataset.entries, class)?;
    Ok(Update::Replace(DropdownOptions::cleared(options)))
}

pub fn update_categories(
    dataset: &Dataset,
    category_marker: Option<&str>,
) -> Result<Update<DropdownOptions>, QueryError> {
    let Some(marker) = chosen(category_marker) else {
        return Ok(Update::NoUpdate);
    };
    let options = category_options(&dataset.entries, marker)?;
    Ok(Update::Replace(DropdownOptions::cleared(options)))
}

// ---------------------------------------------------------------------------
// Charts and table
// ---------------------------------------------------------------------------

pub fn update_line_chart(
    dataset: &Dataset,
    institution: &str,
    class: Option<&str>,
    category_marker: Option<&str>,
) -> Result<Update<TrendChart>, QueryError> {
    let Some(class) = chosen(class) else {
        return Ok(Update::NoUpdate);
    };
    if !dataset.has_institution(institution)? {
        return Err(QueryError::UnknownInstitution(institution.to_string()));
    }
    let chart = trend_series(dataset, institution, class, chosen(category_marker))?;
    Ok(Update::Replace(chart))
}

pub fn update_bar_chart(
    dataset: &Dataset,
    institutions: &[String],
    years: &[String],
    category: Option<&str>,
) -> Result<Update<ComparisonChart>, QueryError> {
    let Some(category) = chosen(category) else {
        return Ok(Update::NoUpdate);
    };
    if institutions.is_empty() || years.is_empty() {
        return Ok(Update::NoUpdate);
    }
    let chart = comparison_series(dataset, institutions, years, category)?;
    Ok(Update::Replace(chart))
}

pub fn update_table(
    dataset: &Dataset,
    class: Option<&str>,
    year: Option<&str>,
    regions: &[String],
) -> Result<Update<RankingTable>, QueryError> {
    let (Some(class), Some(year)) = (chosen(class), chosen(year)) else {
        return Ok(Update::NoUpdate);
    };
    let table = pivot_ranking(dataset, class, year, Some(regions))?;
    Ok(Update::Replace(table))
}

// ---------------------------------------------------------------------------
// Overview sidebar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

/// Sidebar links whose name contains `query`, ignoring case. An empty query
/// lists every institution.
pub fn search_institutions(dataset: &Dataset, query: &str) -> Result<Vec<NavLink>, QueryError> {
    let needle = query.trim().to_lowercase();
    Ok(dataset
        .institution_names()?
        .into_iter()
        .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
        .map(|name| NavLink {
            href: institution_path(&name),
            label: name,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn hei_options_follow_region_selection() {
        let ds = fixtures::dataset();
        assert_eq!(hei_options(&ds, &[]).unwrap().len(), ds.institutions.len());
        assert_eq!(
            hei_options(&ds, &owned(&["North East"])).unwrap(),
            owned(&["Newcastle University"])
        );
    }

    #[test]
    fn map_uses_only_the_triggering_filter() {
        let ds = fixtures::dataset();
        let regions = owned(&["London"]);
        let heis = owned(&["University of Exeter"]);

        let by_region = update_map(&ds, MapTrigger::Regions, &regions, &heis).unwrap();
        assert_eq!(by_region.markers.len(), 4);

        let by_hei = update_map(&ds, MapTrigger::Institutions, &regions, &heis).unwrap();
        assert_eq!(by_hei.markers.len(), 1);
        assert_eq!(by_hei.markers[0].name, "University of Exeter");

        let initial = update_map(&ds, MapTrigger::Initial, &regions, &heis).unwrap();
        assert_eq!(initial.markers.len(), ds.institutions.len());
    }

    #[test]
    fn card_needs_a_hover() {
        let ds = fixtures::dataset();
        assert_eq!(display_card(&ds, None).unwrap(), Update::NoUpdate);
        let Update::Replace(card) = display_card(&ds, Some(10007850)).unwrap() else {
            panic!("expected a card");
        };
        assert_eq!(card.total_income, "358M");
    }

    #[test]
    fn dropdowns_skip_without_selection() {
        let ds = fixtures::dataset();
        assert_eq!(update_category_markers(&ds, None).unwrap(), Update::NoUpdate);
        assert_eq!(update_category_markers(&ds, Some("")).unwrap(), Update::NoUpdate);
        assert_eq!(update_categories(&ds, None).unwrap(), Update::NoUpdate);
    }

    #[test]
    fn dropdowns_clear_dependent_value() {
        let ds = fixtures::dataset();
        assert_eq!(
            update_categories(&ds, Some("Floor area")).unwrap(),
            Update::Replace(DropdownOptions {
                options: owned(&["Gross internal area (m2)", "Non-residential floor area (m2)"]),
                value: None,
            })
        );
    }

    #[test]
    fn line_chart_requires_class() {
        let ds = fixtures::dataset();
        assert_eq!(
            update_line_chart(&ds, "University of Exeter", None, Some("Energy consumption")).unwrap(),
            Update::NoUpdate
        );
        let Update::Replace(chart) =
            update_line_chart(&ds, "University of Exeter", Some("Energy"), None).unwrap()
        else {
            panic!("expected a chart");
        };
        assert_eq!(chart.title, "Trend of categories:");
    }

    #[test]
    fn line_chart_for_unknown_institution_is_not_found() {
        let ds = fixtures::dataset();
        assert_eq!(
            update_line_chart(&ds, "Hogwarts", Some("Energy"), None).unwrap_err(),
            QueryError::UnknownInstitution("Hogwarts".into())
        );
    }

    #[test]
    fn bar_chart_requires_every_selection() {
        let ds = fixtures::dataset();
        let heis = owned(&["University of Bath"]);
        let years = owned(&["2021/22"]);
        let category = Some("Total income (£)");
        assert_eq!(update_bar_chart(&ds, &[], &years, category).unwrap(), Update::NoUpdate);
        assert_eq!(update_bar_chart(&ds, &heis, &[], category).unwrap(), Update::NoUpdate);
        assert_eq!(update_bar_chart(&ds, &heis, &years, None).unwrap(), Update::NoUpdate);
        assert!(matches!(
            update_bar_chart(&ds, &heis, &years, category).unwrap(),
            Update::Replace(chart) if chart.bars.len() == 1
        ));
    }

    #[test]
    fn table_requires_class_and_year() {
        let ds = fixtures::dataset();
        assert_eq!(update_table(&ds, None, Some("2021/22"), &[]).unwrap(), Update::NoUpdate);
        assert_eq!(update_table(&ds, Some("Energy"), None, &[]).unwrap(), Update::NoUpdate);
        let mut shown = None;
        assert!(update_table(&ds, Some("Energy"), Some("2021/22"), &[])
            .unwrap()
            .apply_to(&mut shown));
        assert_eq!(shown.unwrap().rows.len(), 2);
    }

    #[test]
    fn sidebar_search_is_case_insensitive() {
        let ds = fixtures::dataset();
        let links = search_institutions(&ds, "bath").unwrap();
        assert_eq!(
            links,
            vec![NavLink {
                label: "University of Bath".into(),
                href: "/university/University%20of%20Bath".into(),
            }]
        );
        assert_eq!(search_institutions(&ds, "  ").unwrap().len(), ds.institutions.len());
    }
}
