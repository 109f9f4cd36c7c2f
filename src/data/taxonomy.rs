use std::collections::HashSet;

use super::filter::{filter_table, filters};
use super::model::{Table, CATEGORY, CATEGORY_MARKER, CLASS};
use crate::error::QueryError;

/// Distinct values of `column` in first-seen order.
pub fn distinct_values(table: &Table, column: &str) -> Result<Vec<String>, QueryError> {
    let mut seen = HashSet::new();
    Ok(table
        .column(column)?
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect())
}

/// Category markers recorded under `class`.
pub fn category_marker_options(entries: &Table, class: &str) -> Result<Vec<String>, QueryError> {
    let in_class = filter_table(entries, &filters([(CLASS, [class])]))?;
    distinct_values(&in_class, CATEGORY_MARKER)
}

/// Categories recorded under `category_marker`.
pub fn category_options(entries: &Table, category_marker: &str) -> Result<Vec<String>, QueryError> {
    let under_marker = filter_table(entries, &filters([(CATEGORY_MARKER, [category_marker])]))?;
    distinct_values(&under_marker, CATEGORY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;
    use crate::data::model::CLASSES;

    #[test]
    fn markers_in_first_seen_order() {
        let ds = fixtures::dataset();
        assert_eq!(
            category_marker_options(&ds.entries, "Energy").unwrap(),
            vec!["Energy consumption", "Energy sources"]
        );
        assert_eq!(
            category_marker_options(&ds.entries, "Emissions and waste").unwrap(),
            vec!["Scope 1 and 2", "Carbon reduction", "Waste"]
        );
    }

    #[test]
    fn every_marker_has_categories() {
        let ds = fixtures::dataset();
        for class in CLASSES {
            for marker in category_marker_options(&ds.entries, class).unwrap() {
                let categories = category_options(&ds.entries, &marker).unwrap();
                assert!(!categories.is_empty(), "{class} / {marker} has no categories");
            }
        }
    }

    #[test]
    fn unknown_class_has_no_markers() {
        let ds = fixtures::dataset();
        assert!(category_marker_options(&ds.entries, "Catering").unwrap().is_empty());
    }
}
