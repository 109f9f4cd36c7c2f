use eframe::egui::Ui;
use egui_plot::{uniform_grid_spacer, Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use super::color32;
use crate::charts::comparison::ComparisonChart;
use crate::charts::trend::TrendChart;

/// Axis label for an integer tick, blank between ticks.
fn tick_label<S: AsRef<str>>(labels: &[S], value: f64) -> String {
    let index = value.round();
    if (value - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels
        .get(index as usize)
        .map(|s| s.as_ref().to_string())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Trend line chart (institution overview)
// ---------------------------------------------------------------------------

/// One line per category over the academic years. Missing years break the
/// line instead of joining its neighbours.
pub fn trend_chart(ui: &mut Ui, chart: &TrendChart) {
    ui.heading(&chart.title);
    let years = chart.years;

    Plot::new("overview_line_chart")
        .legend(Legend::default())
        .x_axis_label("Academic Year")
        .y_axis_label("Value")
        .include_x(-0.25)
        .include_x(years.len() as f64 - 0.75)
        .include_y(0.0)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
        .x_axis_formatter(move |mark, _range| tick_label(&years, mark.value))
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let color = color32(series.color);
                for segment in series.segments() {
                    plot_ui.line(
                        Line::new(PlotPoints::from(segment.clone()))
                            .name(&series.category)
                            .color(color)
                            .width(2.0),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from(segment))
                            .name(&series.category)
                            .color(color)
                            .radius(3.0),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Grouped bar chart (comparison)
// ---------------------------------------------------------------------------

const GROUP_WIDTH: f64 = 0.8;

/// Bars grouped by institution, one colour per academic year.
pub fn comparison_chart(ui: &mut Ui, chart: &ComparisonChart) {
    ui.heading(&chart.title);
    let groups = chart.institutions.clone();
    let per_group = chart.years.len().max(1) as f64;
    let bar_width = GROUP_WIDTH / per_group;

    Plot::new("bar_chart")
        .legend(Legend::default())
        .x_axis_label("HE Provider")
        .y_axis_label("Value")
        .include_y(0.0)
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 1.0, 1.0]))
        .x_axis_formatter(move |mark, _range| tick_label(&groups, mark.value))
        .show(ui, |plot_ui| {
            for (slot, year) in chart.years.iter().enumerate() {
                let offset = (slot as f64 - (per_group - 1.0) / 2.0) * bar_width;
                let bars: Vec<Bar> = chart
                    .bars
                    .iter()
                    .filter(|bar| bar.year == year.label)
                    .filter_map(|bar| {
                        let group = chart.group_index(&bar.institution)?;
                        Some(
                            Bar::new(group as f64 + offset, bar.value?)
                                .width(bar_width * 0.95)
                                .name(&bar.institution),
                        )
                    })
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(&year.label)
                        .color(color32(year.color)),
                );
            }
        });
}
