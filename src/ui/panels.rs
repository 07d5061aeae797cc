use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::aggregate::CorrelationMode;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new("⚡ Energy and Carbon Emission Review").strong());
        ui.separator();

        if state.loading {
            ui.spinner();
            ui.label("Fetching dataset…");
        } else if let Some(ds) = state.dataset {
            let visible = state.view.as_ref().map(|v| v.len()).unwrap_or(0);
            ui.label(format!("{} records loaded, {} visible", ds.len(), visible));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Country multi-select ----
            let header = if state.selection.countries.is_empty() {
                format!("Country  (all {})", dataset.countries.len())
            } else {
                format!(
                    "Country  ({}/{})",
                    state.selection.countries.len(),
                    dataset.countries.len()
                )
            };
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("country_filter")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_countries();
                        }
                        if ui.small_button("Clear").clicked() {
                            state.clear_countries();
                        }
                    });
                    for country in &dataset.countries {
                        let mut text = RichText::new(country);
                        if let Some(colors) = &state.colors {
                            text = text.color(colors.color_for(country));
                        }
                        let mut checked = state.selection.countries.contains(country);
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_country(country);
                        }
                    }
                });

            // ---- Year multi-select ----
            let header = if state.selection.years.is_empty() {
                format!("Year  (all {})", dataset.years.len())
            } else {
                format!(
                    "Year  ({}/{})",
                    state.selection.years.len(),
                    dataset.years.len()
                )
            };
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("year_filter")
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_years();
                        }
                        if ui.small_button("Clear").clicked() {
                            state.clear_years();
                        }
                    });
                    for &year in &dataset.years {
                        let mut checked = state.selection.years.contains(&year);
                        if ui.checkbox(&mut checked, year.to_string()).changed() {
                            state.toggle_year(year);
                        }
                    }
                });

            ui.separator();

            // ---- Energy range ----
            ui.strong("Energy range (TWh)");
            let (min, max) = dataset.energy_bounds;
            if ui
                .checkbox(&mut state.range_enabled, "Restrict total energy")
                .changed()
            {
                state.refilter();
            }
            if state.range_enabled {
                let changed = ui
                    .add(
                        egui::Slider::new(&mut state.range_draft.0, min..=max)
                            .text("min"),
                    )
                    .changed()
                    | ui
                        .add(
                            egui::Slider::new(&mut state.range_draft.1, min..=max)
                                .text("max"),
                        )
                        .changed();
                if changed {
                    // Keep the interval well-formed while dragging.
                    if state.range_draft.1 < state.range_draft.0 {
                        state.range_draft.1 = state.range_draft.0;
                    }
                    state.refilter();
                }
            }

            ui.separator();

            // ---- Chart options ----
            ui.strong("Chart options");
            ui.checkbox(&mut state.options.show_regression, "Show regression line");
            ui.checkbox(&mut state.options.log_scale, "Use log scale");
            ui.horizontal(|ui: &mut Ui| {
                ui.radio_value(
                    &mut state.options.mode,
                    CorrelationMode::CountryTotals,
                    "Country totals",
                );
                ui.radio_value(
                    &mut state.options.mode,
                    CorrelationMode::PerRecord,
                    "Per record",
                );
            });
        });
}
