pub mod charts;
pub mod map;
pub mod pages;
pub mod panels;
pub mod table;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::color::Rgb;

pub fn color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.red, c.green, c.blue)
}

/// Single-choice dropdown. Returns true when the choice changed.
pub fn select_one(
    ui: &mut Ui,
    id: &str,
    placeholder: &str,
    options: &[String],
    value: &mut Option<String>,
) -> bool {
    let mut changed = false;
    let shown = value.clone().unwrap_or_else(|| placeholder.to_string());
    egui::ComboBox::from_id_salt(id)
        .selected_text(shown)
        .width(ui.available_width().min(320.0))
        .show_ui(ui, |ui: &mut Ui| {
            for option in options {
                let selected = value.as_deref() == Some(option.as_str());
                if ui.selectable_label(selected, option).clicked() && !selected {
                    *value = Some(option.clone());
                    changed = true;
                }
            }
        });
    changed
}

/// Multi-choice dropdown with a checkbox per option. Keeps `selected` in
/// option order. Returns true when the selection changed.
pub fn select_many(
    ui: &mut Ui,
    id: &str,
    placeholder: &str,
    options: &[String],
    selected: &mut Vec<String>,
) -> bool {
    let mut changed = false;
    let shown = match selected.len() {
        0 => placeholder.to_string(),
        1 => selected[0].clone(),
        n => format!("{n} selected"),
    };
    egui::ComboBox::from_id_salt(id)
        .selected_text(shown)
        .width(ui.available_width().min(320.0))
        .show_ui(ui, |ui: &mut Ui| {
            if !selected.is_empty() && ui.small_button("Clear").clicked() {
                selected.clear();
                changed = true;
            }
            for option in options {
                let mut checked = selected.contains(option);
                if ui.checkbox(&mut checked, option).changed() {
                    changed = true;
                    if checked {
                        selected.push(option.clone());
                    } else {
                        selected.retain(|s| s != option);
                    }
                }
            }
        });
    if changed {
        selected.sort_by_key(|s| options.iter().position(|o| o == s));
    }
    changed
}

/// Label above a control, like a form field.
pub fn field(ui: &mut Ui, label: &str) {
    ui.label(RichText::new(label).strong());
}
