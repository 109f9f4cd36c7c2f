use super::LegendEntry;
use crate::color::{ColorMap, Rgb};
use crate::data::filter::{filter_table, filters};
use crate::data::model::{read_institutions, Dataset, PROVIDER, REGION};
use crate::error::QueryError;

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    /// Key for [`super::card::summary_card`].
    pub ukprn: i64,
    pub name: String,
    pub region: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapView {
    pub markers: Vec<MapMarker>,
    /// One entry per region present among the markers, first-seen order.
    pub legend: Vec<LegendEntry>,
    /// Mean (lat, lon) of the geocoded markers.
    pub center: Option<(f64, f64)>,
}

impl MapView {
    /// Geocoded markers as `(marker, lat, lon)`.
    pub fn placed(&self) -> impl Iterator<Item = (&MapMarker, f64, f64)> {
        self.markers
            .iter()
            .filter_map(|m| Some((m, m.lat?, m.lon?)))
    }

    /// The placed marker closest to (`lat`, `lon`) within `radius` degrees.
    pub fn nearest(&self, lat: f64, lon: f64, radius: f64) -> Option<&MapMarker> {
        self.placed()
            .map(|(m, mlat, mlon)| (m, (mlat - lat).hypot(mlon - lon)))
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(m, _)| m)
    }
}

/// Markers for the institutions matching the optional region and
/// institution selections. Absent or empty selections do not restrict.
pub fn map_markers(
    dataset: &Dataset,
    regions: Option<&[String]>,
    institutions: Option<&[String]>,
) -> Result<MapView, QueryError> {
    let selection = filters([
        (REGION, regions.unwrap_or_default()),
        (PROVIDER, institutions.unwrap_or_default()),
    ]);
    let located = read_institutions(&filter_table(&dataset.institutions, &selection)?)?;

    let colors = ColorMap::new(located.iter().map(|inst| inst.region.as_str()));
    let legend = colors
        .legend_entries()
        .iter()
        .map(|(label, color)| LegendEntry {
            label: label.clone(),
            color: *color,
        })
        .collect();

    let markers: Vec<MapMarker> = located
        .into_iter()
        .map(|inst| MapMarker {
            color: colors.color_for(&inst.region),
            ukprn: inst.ukprn,
            name: inst.name,
            region: inst.region,
            lat: inst.lat,
            lon: inst.lon,
        })
        .collect();

    let mut view = MapView {
        markers,
        legend,
        center: None,
    };
    let (n, lat_sum, lon_sum) = view
        .placed()
        .fold((0usize, 0.0, 0.0), |(n, a, b), (_, lat, lon)| (n + 1, a + lat, b + lon));
    if n > 0 {
        view.center = Some((lat_sum / n as f64, lon_sum / n as f64));
    }

    log::debug!(
        "Map for regions {regions:?}, institutions {institutions:?}: {} markers",
        view.markers.len()
    );
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    fn names(view: &MapView) -> Vec<&str> {
        view.markers.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn london_only_with_single_legend_entry() {
        let ds = fixtures::dataset();
        let london = vec!["London".to_string()];
        let view = map_markers(&ds, Some(london.as_slice()), None).unwrap();
        assert_eq!(view.markers.len(), 4);
        assert!(view.markers.iter().all(|m| m.region == "London"));
        assert_eq!(view.legend.len(), 1);
        assert_eq!(view.legend[0].label, "London");
        assert!(view.markers.iter().all(|m| m.color == view.legend[0].color));
    }

    #[test]
    fn unfiltered_map_has_one_legend_entry_per_region() {
        let ds = fixtures::dataset();
        let view = map_markers(&ds, None, None).unwrap();
        assert_eq!(view.markers.len(), ds.institutions.len());
        let labels: Vec<&str> = view.legend.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["South West", "London", "North East", "North West"]);
    }

    #[test]
    fn institution_filter_carries_ukprn() {
        let ds = fixtures::dataset();
        let pick = vec!["University of Bath".to_string()];
        let view = map_markers(&ds, None, Some(pick.as_slice())).unwrap();
        assert_eq!(names(&view), vec!["University of Bath"]);
        assert_eq!(view.markers[0].ukprn, 10007850);
        assert_eq!(view.center, Some((51.3782, -2.3264)));
    }

    #[test]
    fn ungeocoded_markers_are_kept_but_not_placed() {
        let ds = fixtures::dataset();
        let north_west = vec!["North West".to_string()];
        let view = map_markers(&ds, Some(north_west.as_slice()), None).unwrap();
        assert_eq!(names(&view), vec!["Royal Northern College of Music"]);
        assert_eq!(view.placed().count(), 0);
        assert_eq!(view.center, None);
    }

    #[test]
    fn nearest_marker_within_radius() {
        let ds = fixtures::dataset();
        let view = map_markers(&ds, None, None).unwrap();
        let hit = view.nearest(50.74, -3.53, 0.1).unwrap();
        assert_eq!(hit.name, "University of Exeter");
        assert!(view.nearest(60.0, 10.0, 0.1).is_none());
    }
}
