use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::FilteredView;
use crate::data::model::Record;

const HEADERS: [&str; 6] = [
    "Country",
    "Year",
    "Total Energy Consumption (TWh)",
    "Carbon Emissions (Million Tons)",
    "Fossil Fuel Dependency (%)",
    "Renewable Energy Share (%)",
];

// ---------------------------------------------------------------------------
// Raw data table (central panel, Raw Data tab)
// ---------------------------------------------------------------------------

/// Render the filtered records as a table with a dimensions caption.
pub fn raw_data_table(ui: &mut Ui, view: &FilteredView) {
    ui.heading("Raw Data");
    ui.add_space(4.0);

    let rows: Vec<&Record> = view.rows().collect();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(120.0))
        .columns(Column::remainder(), HEADERS.len() - 1)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let rec = rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.country);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(rec.year.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2}", rec.energy_twh));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2}", rec.emissions_mt));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2}", rec.fossil_pct));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.2}", rec.renewable_pct));
                });
            });
        });

    ui.add_space(6.0);
    ui.label(
        RichText::new(format!(
            "Data Dimensions: {} rows × {} columns",
            rows.len(),
            HEADERS.len()
        ))
        .strong(),
    );
}
