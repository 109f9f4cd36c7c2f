use crate::data::filter::{filter_table, filters};
use crate::data::model::{
    coerce_numeric, Dataset, Table, ACADEMIC_YEAR, CATEGORY, LATEST_YEAR, PROVIDER, TOTAL_EMISSIONS,
    TOTAL_INCOME, VALUE,
};
use crate::error::QueryError;
use crate::format::format_number;
use crate::routes::institution_path;

pub const NO_DATA: &str = "No data";

/// Key metrics shown when hovering an institution on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub ukprn: i64,
    pub name: String,
    pub href: String,
    pub year: &'static str,
    /// Formatted total income, or [`NO_DATA`].
    pub total_income: String,
    /// Formatted scope 1 and 2 emissions, or [`NO_DATA`].
    pub total_emissions: String,
}

/// Build the card for `ukprn` from the latest academic year.
pub fn summary_card(dataset: &Dataset, ukprn: i64) -> Result<SummaryCard, QueryError> {
    let institution = dataset.institution_by_ukprn(ukprn)?;
    let latest = filter_table(
        &dataset.entries,
        &filters([
            (PROVIDER, [institution.name.as_str()]),
            (ACADEMIC_YEAR, [LATEST_YEAR]),
        ]),
    )?;

    Ok(SummaryCard {
        ukprn,
        href: institution_path(&institution.name),
        year: LATEST_YEAR,
        total_income: formatted_metric(&latest, TOTAL_INCOME)?,
        total_emissions: formatted_metric(&latest, TOTAL_EMISSIONS)?,
        name: institution.name,
    })
}

/// First numeric value of `category`, formatted; [`NO_DATA`] when none.
fn formatted_metric(rows: &Table, category: &str) -> Result<String, QueryError> {
    let category_idx = rows.column_index(CATEGORY)?;
    let value_idx = rows.column_index(VALUE)?;
    Ok(rows
        .rows
        .iter()
        .filter(|row| row[category_idx] == category)
        .find_map(|row| coerce_numeric(&row[value_idx]))
        .map(format_number)
        .unwrap_or_else(|| NO_DATA.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn formats_latest_year_metrics() {
        let ds = fixtures::dataset();
        let card = summary_card(&ds, 10007792).unwrap();
        assert_eq!(card.name, "University of Exeter");
        assert_eq!(card.total_income, "567.8M");
        assert_eq!(card.total_emissions, "25.4M");
        assert_eq!(card.href, "/university/University%20of%20Exeter");
        assert_eq!(card.year, "2021/22");
    }

    #[test]
    fn institution_without_metrics_reports_no_data() {
        let ds = fixtures::dataset();
        let card = summary_card(&ds, 10005553).unwrap();
        assert_eq!(card.total_income, NO_DATA);
        assert_eq!(card.total_emissions, NO_DATA);
    }

    #[test]
    fn older_years_are_ignored() {
        let ds = fixtures::dataset();
        // Newcastle only reports income for 2020/21.
        let card = summary_card(&ds, 10007799).unwrap();
        assert_eq!(card.total_income, NO_DATA);
        assert_eq!(card.total_emissions, NO_DATA);
    }

    #[test]
    fn blank_and_text_values_report_no_data() {
        let ds = fixtures::dataset();
        let card = summary_card(&ds, 10007843).unwrap();
        assert_eq!(card.name, "St Mary's University, Twickenham");
        assert_eq!(card.total_income, NO_DATA);
        assert_eq!(card.total_emissions, NO_DATA);
    }

    #[test]
    fn unknown_ukprn_is_not_found() {
        let ds = fixtures::dataset();
        assert_eq!(
            summary_card(&ds, 42).unwrap_err(),
            QueryError::UnknownUkprn(42)
        );
    }
}
