use eframe::egui::{self, RichText, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use super::color32;
use crate::charts::card::{SummaryCard, NO_DATA};
use crate::charts::map::MapView;

/// Hover distance as a share of the visible longitude span.
const HOVER_FRACTION: f64 = 0.02;

// ---------------------------------------------------------------------------
// Institution map
// ---------------------------------------------------------------------------

/// Scatter the geocoded institutions by longitude/latitude, one legend entry
/// per region. Returns the UKPRN under the pointer, if any.
pub fn institution_map(ui: &mut Ui, view: &MapView) -> Option<i64> {
    let mut plot = Plot::new("england_map")
        .legend(Legend::default())
        // 1 / cos(54°): keeps England's proportions at its mean latitude
        .data_aspect(1.7)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if let Some((lat, lon)) = view.center {
        plot = plot.include_x(lon).include_y(lat);
    }

    plot.show(ui, |plot_ui| {
        for entry in &view.legend {
            let points = region_points(view, &entry.label);
            // Regions without a geocoded institution stay out of the legend.
            if points.is_empty() {
                continue;
            }
            plot_ui.points(
                Points::new(PlotPoints::from(points))
                    .name(&entry.label)
                    .color(color32(entry.color))
                    .radius(5.0),
            );
        }

        let pointer = plot_ui.pointer_coordinate()?;
        let radius = plot_ui.plot_bounds().width() * HOVER_FRACTION;
        view.nearest(pointer.y, pointer.x, radius).map(|m| m.ukprn)
    })
    .inner
}

/// `[lon, lat]` of the geocoded markers in `region`.
fn region_points(view: &MapView, region: &str) -> Vec<[f64; 2]> {
    view.placed()
        .filter(|(m, _, _)| m.region == region)
        .map(|(_, lat, lon)| [lon, lat])
        .collect()
}

// ---------------------------------------------------------------------------
// Summary card
// ---------------------------------------------------------------------------

/// Card beside the map. Returns the overview path when its link is clicked.
pub fn summary_card(ui: &mut Ui, card: Option<&SummaryCard>) -> Option<String> {
    let Some(card) = card else {
        ui.label("Hover over an institution to see its key figures.");
        return None;
    };

    let mut clicked = None;
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.heading(&card.name);
        ui.label(card_subtitle(card));
        ui.label(RichText::new(format!("Academic year {}", card.year)).weak());
        ui.separator();
        ui.label("Total income");
        ui.label(metric(&card.total_income, "£", ""));
        ui.add_space(4.0);
        ui.label("Scope 1 and 2 emissions");
        ui.label(metric(&card.total_emissions, "", " kg CO2e"));
        ui.add_space(6.0);
        if ui.link("View overview").clicked() {
            clicked = Some(card.href.clone());
        }
    });
    clicked
}

fn card_subtitle(card: &SummaryCard) -> String {
    format!("UKPRN: {}", card.ukprn)
}

fn metric(value: &str, prefix: &str, unit: &str) -> RichText {
    let text = if value == NO_DATA {
        value.to_string()
    } else {
        format!("{prefix}{value}{unit}")
    };
    RichText::new(text).size(20.0).strong()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::card::summary_card;
    use crate::charts::map::map_markers;
    use crate::data::fixtures;

    #[test]
    fn regions_without_coordinates_plot_nothing() {
        let view = map_markers(&fixtures::dataset(), None, None).unwrap();
        assert!(view.legend.iter().any(|l| l.label == "North West"));
        assert!(region_points(&view, "North West").is_empty());
        assert_eq!(
            region_points(&view, "North East"),
            vec![[-1.6147, 54.9790]]
        );
    }

    #[test]
    fn card_subtitle_shows_ukprn() {
        let card = summary_card(&fixtures::dataset(), 10007850).unwrap();
        assert_eq!(card_subtitle(&card), "UKPRN: 10007850");
    }
}
