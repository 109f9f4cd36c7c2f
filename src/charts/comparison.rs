use super::LegendEntry;
use crate::color::ColorMap;
use crate::data::filter::{filter_table, filters};
use crate::data::model::{
    coerce_numeric, Dataset, ACADEMIC_YEAR, CATEGORY, CATEGORY_MARKER, PROVIDER, VALUE,
};
use crate::data::taxonomy::distinct_values;
use crate::error::QueryError;

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonBar {
    pub institution: String,
    pub year: String,
    pub value: Option<f64>,
}

/// Grouped bar chart: one group per institution, one bar per year.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonChart {
    pub title: String,
    /// Bar groups in first-seen order.
    pub institutions: Vec<String>,
    /// Years present in the data, ascending, each with its shared colour.
    pub years: Vec<LegendEntry>,
    pub bars: Vec<ComparisonBar>,
}

impl ComparisonChart {
    pub fn group_index(&self, institution: &str) -> Option<usize> {
        self.institutions.iter().position(|i| i == institution)
    }
}

/// Compare `category` across the selected institutions and years.
/// Exact duplicate rows are counted once.
pub fn comparison_series(
    dataset: &Dataset,
    institutions: &[String],
    years: &[String],
    category: &str,
) -> Result<ComparisonChart, QueryError> {
    let mut selection = filters([(ACADEMIC_YEAR, years), (PROVIDER, institutions)]);
    selection.insert(CATEGORY.to_string(), [category.to_string()].into());
    let rows = filter_table(&dataset.entries, &selection)?.dedup_rows();

    let title = match rows.column(CATEGORY_MARKER)?.next() {
        Some(marker) => format!("{marker}: {category}"),
        None => category.to_string(),
    };

    let mut year_labels = distinct_values(&rows, ACADEMIC_YEAR)?;
    year_labels.sort();
    let colors = ColorMap::new(year_labels);
    let year_legend = colors
        .legend_entries()
        .iter()
        .map(|(label, color)| LegendEntry {
            label: label.clone(),
            color: *color,
        })
        .collect();

    let (year_idx, provider_idx, value_idx) = (
        rows.column_index(ACADEMIC_YEAR)?,
        rows.column_index(PROVIDER)?,
        rows.column_index(VALUE)?,
    );
    let bars = rows
        .rows
        .iter()
        .map(|row| ComparisonBar {
            institution: row[provider_idx].clone(),
            year: row[year_idx].clone(),
            value: coerce_numeric(&row[value_idx]),
        })
        .collect::<Vec<_>>();

    log::debug!("Comparison of {category} for {institutions:?} in {years:?}: {} bars", bars.len());

    Ok(ComparisonChart {
        title,
        institutions: distinct_values(&rows, PROVIDER)?,
        years: year_legend,
        bars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::data::model::TOTAL_EMISSIONS;

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn groups_by_institution_with_one_colour_per_year() {
        let ds = fixtures::dataset();
        let chart = comparison_series(
            &ds,
            &owned(&["University of Exeter", "University of Bath"]),
            &owned(&["2021/22", "2020/21"]),
            TOTAL_EMISSIONS,
        )
        .unwrap();

        assert_eq!(chart.title, format!("Scope 1 and 2: {TOTAL_EMISSIONS}"));
        assert_eq!(chart.institutions, owned(&["University of Exeter", "University of Bath"]));
        let years: Vec<&str> = chart.years.iter().map(|y| y.label.as_str()).collect();
        assert_eq!(years, vec!["2020/21", "2021/22"]);
        assert_ne!(chart.years[0].color, chart.years[1].color);
        assert_eq!(chart.group_index("University of Bath"), Some(1));
    }

    #[test]
    fn exact_duplicates_count_once() {
        let ds = fixtures::dataset();
        let chart = comparison_series(
            &ds,
            &owned(&["University of Bath"]),
            &owned(&["2020/21"]),
            TOTAL_EMISSIONS,
        )
        .unwrap();
        assert_eq!(
            chart.bars,
            vec![ComparisonBar {
                institution: "University of Bath".into(),
                year: "2020/21".into(),
                value: Some(18_000_000.0),
            }]
        );
    }

    #[test]
    fn same_category_under_two_markers_is_not_a_duplicate() {
        let ds = fixtures::dataset();
        let chart = comparison_series(
            &ds,
            &owned(&["University of Exeter"]),
            &owned(&["2021/22"]),
            TOTAL_EMISSIONS,
        )
        .unwrap();
        assert_eq!(chart.bars.len(), 2);
    }

    #[test]
    fn institution_without_rows_gives_empty_chart() {
        let ds = fixtures::dataset();
        let chart = comparison_series(
            &ds,
            &owned(&["Royal Northern College of Music"]),
            &owned(&["2021/22"]),
            TOTAL_EMISSIONS,
        )
        .unwrap();
        assert!(chart.bars.is_empty());
        assert!(chart.years.is_empty());
        assert_eq!(chart.title, TOTAL_EMISSIONS);
    }
}
