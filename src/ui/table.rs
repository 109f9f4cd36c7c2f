use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::pivot::{RankingRow, RankingTable};

/// What the user clicked inside the table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableAction {
    Sort(usize),
    Open(String),
}

fn header_text(name: &str, column: usize, sort: Option<(usize, bool)>) -> String {
    match sort {
        Some((c, true)) if c == column => format!("{name} ⏶"),
        Some((c, false)) if c == column => format!("{name} ⏷"),
        _ => name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Ranking table
// ---------------------------------------------------------------------------

/// Render the ranking table with clickable sort headers and institution
/// links. Blank cells are values the institution did not report.
pub fn ranking_table(ui: &mut Ui, table: &RankingTable, sort: Option<(usize, bool)>) -> Option<TableAction> {
    let rows: Vec<&RankingRow> = match sort {
        Some((column, ascending)) => table.sorted_rows(column, ascending),
        None => table.rows.iter().collect(),
    };
    let mut action = None;

    egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::auto().at_least(220.0))
            .columns(Column::auto().at_least(110.0), table.categories().len())
            .min_scrolled_height(0.0)
            .header(36.0, |mut header| {
                for (i, name) in table.columns.iter().enumerate() {
                    header.col(|ui| {
                        if ui.button(header_text(name, i, sort)).clicked() {
                            action = Some(TableAction::Sort(i));
                        }
                    });
                }
            })
            .body(|body| {
                body.rows(20.0, rows.len(), |mut row| {
                    let ranking_row = rows[row.index()];
                    row.col(|ui| {
                        if ui.link(&ranking_row.institution).clicked() {
                            action = Some(TableAction::Open(ranking_row.href.clone()));
                        }
                    });
                    for value in &ranking_row.values {
                        row.col(|ui| {
                            if let Some(v) = value {
                                ui.label(v.to_string());
                            }
                        });
                    }
                });
            });
    });
    action
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Ask for a destination and write the table there. `Ok(None)` when the
/// dialog was cancelled.
pub fn export_csv(table: &RankingTable, suggested_name: &str) -> Result<Option<PathBuf>> {
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export ranking table")
        .set_file_name(suggested_name)
        .add_filter("CSV", &["csv"])
        .save_file()
    else {
        return Ok(None);
    };

    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    table
        .write_csv(BufWriter::new(file))
        .with_context(|| format!("exporting to {}", path.display()))?;
    log::info!("Exported {} ranking rows to {}", table.rows.len(), path.display());
    Ok(Some(path))
}
