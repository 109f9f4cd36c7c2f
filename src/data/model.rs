use crate::error::QueryError;

// ---------------------------------------------------------------------------
// Column names and fixed vocabularies of the HESA estates dataset
// ---------------------------------------------------------------------------

pub const UKPRN: &str = "UKPRN";
pub const PROVIDER: &str = "HE Provider";
pub const REGION: &str = "Region of HE provider";
pub const LAT: &str = "lat";
pub const LON: &str = "lon";

pub const ACADEMIC_YEAR: &str = "Academic Year";
pub const CLASS: &str = "Class";
pub const CATEGORY_MARKER: &str = "Category marker";
pub const CATEGORY: &str = "Category";
pub const VALUE: &str = "Value";

/// Columns read from the institution reference table.
pub const INSTITUTION_COLUMNS: [&str; 5] = [UKPRN, PROVIDER, REGION, LAT, LON];

/// Columns read from the metric fact table.
pub const ENTRY_COLUMNS: [&str; 6] = [
    ACADEMIC_YEAR,
    PROVIDER,
    CLASS,
    CATEGORY_MARKER,
    CATEGORY,
    VALUE,
];

/// Reporting periods, oldest first.
pub const ACADEMIC_YEARS: [&str; 4] = ["2018/19", "2019/20", "2020/21", "2021/22"];

/// Year used for the summary card's key metrics.
pub const LATEST_YEAR: &str = "2021/22";

/// Top-level metric classes in display order.
pub const CLASSES: [&str; 5] = [
    "Building and spaces",
    "Energy",
    "Emissions and waste",
    "Transport and environment",
    "Finances and people",
];

/// Never shown as a ranking column: it is a yes/no flag, not a metric.
pub const EXCLUDED_CATEGORY: &str = "Environmental management system external verification";

pub const TOTAL_INCOME: &str = "Total income (£)";
pub const TOTAL_EMISSIONS: &str = "Total scope 1 and 2 carbon emissions (Kg CO2e)";

/// Position of `year` in [`ACADEMIC_YEARS`].
pub fn year_index(year: &str) -> Option<usize> {
    ACADEMIC_YEARS.iter().position(|y| *y == year)
}

/// Interpret a raw cell as a number. Empty, non-numeric and non-finite
/// cells are missing data.
pub fn coerce_numeric(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Table – raw string cells addressed by column name
// ---------------------------------------------------------------------------

/// A rectangular table of raw CSV cells. Every row has `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Table { columns, rows }
    }

    /// Index of `name`, or a [`QueryError::MissingColumn`].
    pub fn column_index(&self, name: &str) -> Result<usize, QueryError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| QueryError::MissingColumn {
                column: name.to_string(),
                available: self.columns.clone(),
            })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the cells of one column in row order.
    pub fn column<'a>(
        &'a self,
        name: &str,
    ) -> Result<impl Iterator<Item = &'a str> + 'a, QueryError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| row[idx].as_str()))
    }

    /// A new table holding the rows at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Drop rows identical to an earlier row, keeping first occurrences.
    pub fn dedup_rows(&self) -> Table {
        let mut seen = std::collections::HashSet::new();
        let rows = self
            .rows
            .iter()
            .filter(|row| seen.insert(row.as_slice()))
            .cloned()
            .collect();
        Table {
            columns: self.columns.clone(),
            rows,
        }
    }
}

// ---------------------------------------------------------------------------
// Institution – one row of the reference table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Institution {
    pub ukprn: i64,
    pub name: String,
    pub region: String,
    /// `None` until the provider has been geocoded.
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Typed rows of an institution table. Rows whose UKPRN is not an integer
/// are skipped.
pub fn read_institutions(table: &Table) -> Result<Vec<Institution>, QueryError> {
    let (ukprn, name, region, lat, lon) = (
        table.column_index(UKPRN)?,
        table.column_index(PROVIDER)?,
        table.column_index(REGION)?,
        table.column_index(LAT)?,
        table.column_index(LON)?,
    );

    let mut out = Vec::with_capacity(table.len());
    for row in &table.rows {
        let Ok(id) = row[ukprn].trim().parse::<i64>() else {
            log::warn!("Skipping institution '{}' with UKPRN '{}'", row[name], row[ukprn]);
            continue;
        };
        out.push(Institution {
            ukprn: id,
            name: row[name].clone(),
            region: row[region].clone(),
            lat: coerce_numeric(&row[lat]),
            lon: coerce_numeric(&row[lon]),
        });
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// Dataset – the two tables every query reads from
// ---------------------------------------------------------------------------

/// Immutable snapshot of the reference and metric tables.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// `UKPRN`, `HE Provider`, `Region of HE provider`, `lat`, `lon`.
    pub institutions: Table,
    /// Long-format metric facts, see [`ENTRY_COLUMNS`].
    pub entries: Table,
}

impl Dataset {
    /// Typed view of the reference table.
    pub fn institution_records(&self) -> Result<Vec<Institution>, QueryError> {
        read_institutions(&self.institutions)
    }

    /// Institution display names in reference-table order.
    pub fn institution_names(&self) -> Result<Vec<String>, QueryError> {
        Ok(self
            .institutions
            .column(PROVIDER)?
            .map(str::to_string)
            .collect())
    }

    pub fn has_institution(&self, name: &str) -> Result<bool, QueryError> {
        Ok(self.institutions.column(PROVIDER)?.any(|n| n == name))
    }

    pub fn institution_by_ukprn(&self, ukprn: i64) -> Result<Institution, QueryError> {
        self.institution_records()?
            .into_iter()
            .find(|inst| inst.ukprn == ukprn)
            .ok_or(QueryError::UnknownUkprn(ukprn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn coerce_numeric_treats_text_as_missing() {
        assert_eq!(coerce_numeric("12.5"), Some(12.5));
        assert_eq!(coerce_numeric(" 7 "), Some(7.0));
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("Yes"), None);
        assert_eq!(coerce_numeric("NaN"), None);
    }

    #[test]
    fn missing_column_names_the_column() {
        let table = Table::new(vec!["a".into()], vec![vec!["1".into()]]);
        let err = table.column_index("b").unwrap_err();
        assert_eq!(
            err,
            QueryError::MissingColumn {
                column: "b".into(),
                available: vec!["a".into()],
            }
        );
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let row = |a: &str, b: &str| vec![a.to_string(), b.to_string()];
        let table = Table::new(
            vec!["a".into(), "b".into()],
            vec![row("1", "x"), row("2", "y"), row("1", "x")],
        );
        assert_eq!(table.dedup_rows().rows, vec![row("1", "x"), row("2", "y")]);
    }

    #[test]
    fn institution_records_keep_null_coordinates() {
        let ds = fixtures::dataset();
        let records = ds.institution_records().unwrap();
        let ungeocoded = records
            .iter()
            .find(|i| i.name == "Royal Northern College of Music")
            .unwrap();
        assert_eq!(ungeocoded.lat, None);
        assert_eq!(ungeocoded.lon, None);
        assert_eq!(records.len(), ds.institutions.len());
    }

    #[test]
    fn lookup_by_unknown_ukprn_is_not_found() {
        let ds = fixtures::dataset();
        assert_eq!(
            ds.institution_by_ukprn(1).unwrap_err(),
            QueryError::UnknownUkprn(1)
        );
    }
}
