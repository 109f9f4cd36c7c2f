use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

use anyhow::{Context, Result};

use super::filter::{filter_table, filters};
use super::model::{
    coerce_numeric, Dataset, ACADEMIC_YEAR, CATEGORY, CLASS, EXCLUDED_CATEGORY, PROVIDER, REGION,
    VALUE,
};
use super::taxonomy::distinct_values;
use crate::error::QueryError;
use crate::routes::institution_path;

// ---------------------------------------------------------------------------
// Ranking table – one row per institution, one column per category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RankingRow {
    pub institution: String,
    /// Overview page of the institution.
    pub href: String,
    /// One cell per category column; `None` renders blank.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankingTable {
    /// `"HE Provider"` followed by the category columns.
    pub columns: Vec<String>,
    pub rows: Vec<RankingRow>,
}

impl RankingTable {
    pub fn categories(&self) -> &[String] {
        &self.columns[1..]
    }

    /// Rows ordered by `column` (0 is the institution name). Blank cells
    /// sort last in either direction.
    pub fn sorted_rows(&self, column: usize, ascending: bool) -> Vec<&RankingRow> {
        let mut rows: Vec<&RankingRow> = self.rows.iter().collect();
        if column == 0 {
            rows.sort_by(|a, b| a.institution.cmp(&b.institution));
            if !ascending {
                rows.reverse();
            }
            return rows;
        }
        let cell = |row: &RankingRow| row.values.get(column - 1).copied().flatten();
        rows.sort_by(|a, b| match (cell(a), cell(b)) {
            (Some(x), Some(y)) if ascending => x.total_cmp(&y),
            (Some(x), Some(y)) => y.total_cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        rows
    }

    /// Write the table as CSV: a header row, then one record per institution
    /// with missing cells left empty.
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(out);
        wtr.write_record(&self.columns)
            .context("writing ranking header")?;
        for row in &self.rows {
            let mut record = Vec::with_capacity(self.columns.len());
            record.push(row.institution.clone());
            record.extend(
                row.values
                    .iter()
                    .map(|v| v.map(|x| x.to_string()).unwrap_or_default()),
            );
            wtr.write_record(&record)
                .with_context(|| format!("writing ranking row for {}", row.institution))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Pivot the metric rows of `class` in `year` into a ranking table.
///
/// With a non-empty `regions` slice only institutions located in those
/// regions are kept. Several numeric values for the same institution and
/// category are averaged.
pub fn pivot_ranking(
    dataset: &Dataset,
    class: &str,
    year: &str,
    regions: Option<&[String]>,
) -> Result<RankingTable, QueryError> {
    let mut selection = filters([(CLASS, [class]), (ACADEMIC_YEAR, [year])]);

    if let Some(regions) = regions.filter(|r| !r.is_empty()) {
        let located = filter_table(&dataset.institutions, &filters([(REGION, regions)]))?;
        let providers: BTreeSet<String> = located.column(PROVIDER)?.map(str::to_string).collect();
        if providers.is_empty() {
            return Ok(empty_ranking());
        }
        selection.insert(PROVIDER.to_string(), providers);
    }

    let rows = filter_table(&dataset.entries, &selection)?;

    let categories: Vec<String> = distinct_values(&rows, CATEGORY)?
        .into_iter()
        .filter(|c| c != EXCLUDED_CATEGORY)
        .collect();

    let provider_idx = rows.column_index(PROVIDER)?;
    let category_idx = rows.column_index(CATEGORY)?;
    let value_idx = rows.column_index(VALUE)?;

    // (sum, count) per category, institutions kept sorted by name.
    let mut cells: BTreeMap<&str, Vec<(f64, usize)>> = BTreeMap::new();
    for row in &rows.rows {
        let acc = cells
            .entry(row[provider_idx].as_str())
            .or_insert_with(|| vec![(0.0, 0); categories.len()]);
        let Some(col) = categories.iter().position(|c| *c == row[category_idx]) else {
            continue;
        };
        if let Some(v) = coerce_numeric(&row[value_idx]) {
            acc[col].0 += v;
            acc[col].1 += 1;
        }
    }

    let ranking_rows = cells
        .into_iter()
        .map(|(name, acc)| RankingRow {
            institution: name.to_string(),
            href: institution_path(name),
            values: acc
                .into_iter()
                .map(|(sum, n)| (n > 0).then(|| sum / n as f64))
                .collect(),
        })
        .collect::<Vec<_>>();

    log::debug!(
        "Ranking for {class} {year} (regions {regions:?}): {} rows x {} categories",
        ranking_rows.len(),
        categories.len()
    );

    let mut columns = Vec::with_capacity(categories.len() + 1);
    columns.push(PROVIDER.to_string());
    columns.extend(categories);
    Ok(RankingTable {
        columns,
        rows: ranking_rows,
    })
}

fn empty_ranking() -> RankingTable {
    RankingTable {
        columns: vec![PROVIDER.to_string()],
        rows: Vec::new(),
    }
}
