/// Presentation builders: turn filtered/pivoted data into the shaped
/// structures the UI renders (markers, series, cards).
///
/// ```text
///   Dataset ──filter──► rows ──group/pivot──► MapView | TrendChart
///                                             ComparisonChart | SummaryCard
/// ```
///
/// Nothing here knows about egui; colours are plain sRGB triples.
pub mod card;
pub mod comparison;
pub mod map;
pub mod trend;

use crate::color::Rgb;

/// One legend line: label and swatch colour.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgb,
}
