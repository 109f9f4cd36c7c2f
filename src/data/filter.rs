use std::collections::{BTreeMap, BTreeSet};

use super::model::Table;
use crate::error::QueryError;

// ---------------------------------------------------------------------------
// Filter predicate: which values are accepted per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column_name → set of accepted values.
/// An empty set means "no filter" for that column.
pub type FilterState = BTreeMap<String, BTreeSet<String>>;

/// Build a [`FilterState`] from `(column, accepted values)` pairs.
pub fn filters<'a, I, V>(pairs: I) -> FilterState
where
    I: IntoIterator<Item = (&'a str, V)>,
    V: IntoIterator,
    V::Item: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(col, vals)| {
            (
                col.to_string(),
                vals.into_iter().map(|v| v.as_ref().to_string()).collect(),
            )
        })
        .collect()
}

/// Return indices of rows that pass all active filters.
///
/// A row passes a column filter when:
/// * The accepted set for that column is empty → passes (no constraint)
/// * The row's value for that column is in the accepted set → passes
///
/// Every named column must exist, even when its set is empty.
pub fn filtered_indices(table: &Table, filters: &FilterState) -> Result<Vec<usize>, QueryError> {
    let mut active = Vec::with_capacity(filters.len());
    for (col, accepted) in filters {
        let idx = table.column_index(col)?;
        if !accepted.is_empty() {
            active.push((idx, accepted));
        }
    }

    Ok(table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            active
                .iter()
                .all(|(idx, accepted)| accepted.contains(row[*idx].as_str()))
        })
        .map(|(i, _)| i)
        .collect())
}

/// The subset of `table` passing `filters`, in original row order.
pub fn filter_table(table: &Table, filters: &FilterState) -> Result<Table, QueryError> {
    let indices = filtered_indices(table, filters)?;
    Ok(table.select(&indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::data::model::{ACADEMIC_YEAR, CLASS, PROVIDER, REGION};

    #[test]
    fn empty_accepted_set_means_no_restriction() {
        let ds = fixtures::dataset();
        let none: [&str; 0] = [];
        let out = filter_table(&ds.entries, &filters([(CLASS, none), (ACADEMIC_YEAR, none)])).unwrap();
        assert_eq!(out, ds.entries);
    }

    #[test]
    fn no_filters_returns_everything() {
        let ds = fixtures::dataset();
        let out = filter_table(&ds.institutions, &FilterState::new()).unwrap();
        assert_eq!(out.len(), ds.institutions.len());
    }

    #[test]
    fn columns_compose_as_and() {
        let ds = fixtures::dataset();
        let out = filter_table(
            &ds.entries,
            &filters([
                (CLASS, vec!["Energy"]),
                (PROVIDER, vec!["University of Bath", "King's College London"]),
            ]),
        )
        .unwrap();
        assert_eq!(out.len(), 1);
        let providers: Vec<&str> = out.column(PROVIDER).unwrap().collect();
        assert_eq!(providers, vec!["University of Bath"]);
    }

    #[test]
    fn membership_keeps_row_order() {
        let ds = fixtures::dataset();
        let out = filter_table(&ds.institutions, &filters([(REGION, ["London"])])).unwrap();
        let names: Vec<&str> = out.column(PROVIDER).unwrap().collect();
        assert_eq!(
            names,
            vec![
                "University College London",
                "King's College London",
                "Guildhall School of Music & Drama",
                "St Mary's University, Twickenham",
            ]
        );
    }

    #[test]
    fn unknown_column_fails_even_when_unrestricted() {
        let ds = fixtures::dataset();
        let none: [&str; 0] = [];
        let err = filter_table(&ds.entries, &filters([("Region", none)])).unwrap_err();
        assert!(matches!(err, QueryError::MissingColumn { column, .. } if column == "Region"));
    }
}
