use crate::color::{ColorMap, Rgb};
use crate::data::filter::{filter_table, filters};
use crate::data::model::{
    coerce_numeric, year_index, Dataset, ACADEMIC_YEAR, ACADEMIC_YEARS, CATEGORY, CATEGORY_MARKER,
    CLASS, PROVIDER, VALUE,
};
use crate::error::QueryError;

/// One line of the trend chart: a category's value in each academic year.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub category: String,
    pub color: Rgb,
    /// Indexed like [`ACADEMIC_YEARS`]; `None` is a gap.
    pub values: [Option<f64>; 4],
}

impl TrendSeries {
    /// Runs of consecutive known values as `[year_index, value]` points.
    /// A missing year ends a run; nothing is interpolated across it.
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut out = Vec::new();
        let mut current = Vec::new();
        for (i, v) in self.values.iter().enumerate() {
            match v {
                Some(v) => current.push([i as f64, *v]),
                None if !current.is_empty() => out.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub title: String,
    pub years: [&'static str; 4],
    pub series: Vec<TrendSeries>,
}

/// Trend of every category under `category_marker` for one institution and
/// class. Without a marker the chart is empty with a generic title.
pub fn trend_series(
    dataset: &Dataset,
    institution: &str,
    class: &str,
    category_marker: Option<&str>,
) -> Result<TrendChart, QueryError> {
    let title = match category_marker {
        Some(marker) => format!("Trend of '{marker}' categories:"),
        None => "Trend of categories:".to_string(),
    };
    let mut chart = TrendChart {
        title,
        years: ACADEMIC_YEARS,
        series: Vec::new(),
    };
    let Some(marker) = category_marker else {
        return Ok(chart);
    };

    let rows = filter_table(
        &dataset.entries,
        &filters([
            (PROVIDER, [institution]),
            (CLASS, [class]),
            (CATEGORY_MARKER, [marker]),
        ]),
    )?;
    let (year_idx, category_idx, value_idx) = (
        rows.column_index(ACADEMIC_YEAR)?,
        rows.column_index(CATEGORY)?,
        rows.column_index(VALUE)?,
    );

    // Sort chronologically; rows outside the known years cannot be placed.
    let mut dated: Vec<(usize, &Vec<String>)> = rows
        .rows
        .iter()
        .filter_map(|row| Some((year_index(&row[year_idx])?, row)))
        .collect();
    dated.sort_by_key(|(year, _)| *year);

    // (category, per-year (sum, count))
    let mut grouped: Vec<(&str, [(f64, usize); 4])> = Vec::new();
    for (year, row) in dated {
        let category = row[category_idx].as_str();
        let slot = match grouped.iter().position(|(c, _)| *c == category) {
            Some(i) => i,
            None => {
                grouped.push((category, [(0.0, 0); 4]));
                grouped.len() - 1
            }
        };
        if let Some(v) = coerce_numeric(&row[value_idx]) {
            let cell = &mut grouped[slot].1[year];
            cell.0 += v;
            cell.1 += 1;
        }
    }

    let colors = ColorMap::new(grouped.iter().map(|(c, _)| *c));
    chart.series = grouped
        .into_iter()
        .map(|(category, acc)| TrendSeries {
            category: category.to_string(),
            color: colors.color_for(category),
            values: acc.map(|(sum, n)| (n > 0).then(|| sum / n as f64)),
        })
        .collect();

    log::debug!(
        "Trend for {institution} / {class} / {marker}: {} series",
        chart.series.len()
    );
    Ok(chart)
}
