use eframe::egui::{Color32, RichText, Ui};

use crate::data::aggregate;
use crate::data::filter::FilteredView;
use crate::state::{AppState, ViewTab};
use crate::ui::{plot, table};

const WARNING_COLOR: Color32 = Color32::from_rgb(255, 193, 7);

// ---------------------------------------------------------------------------
// Central panel – tab strip + active view
// ---------------------------------------------------------------------------

/// Render the central panel: tab strip, empty-selection halt, active view.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.loading {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Fetching dataset…");
        });
        return;
    }

    if state.dataset.is_none() {
        // Load failure is fatal: nothing to explore.
        let msg = state
            .status_message
            .clone()
            .unwrap_or_else(|| "Dataset unavailable.".to_string());
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(RichText::new(msg).color(Color32::RED));
        });
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        for tab in ViewTab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.label());
        }
    });
    ui.separator();

    // Empty selection halts before any aggregation runs.
    if state.empty_selection() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(
                RichText::new(
                    "⚠ No data available for the selected filters. \
                     Please adjust your selection.",
                )
                .size(16.0)
                .color(WARNING_COLOR),
            );
        });
        return;
    }

    let Some(view) = &state.view else { return };
    match state.tab {
        ViewTab::Metrics => metrics_view(ui, view),
        ViewTab::Trends => plot::trend_plot(ui, view),
        ViewTab::Correlation => {
            plot::correlation_plot(ui, view, state.options, state.colors.as_ref())
        }
        ViewTab::RawData => table::raw_data_table(ui, view),
    }
}

// ---------------------------------------------------------------------------
// Metrics view
// ---------------------------------------------------------------------------

fn metrics_view(ui: &mut Ui, view: &FilteredView) {
    let summary = aggregate::summary(view);

    ui.add_space(8.0);
    ui.heading("Key Metrics");
    ui.add_space(8.0);

    ui.columns(2, |cols: &mut [Ui]| {
        metric_card(
            &mut cols[0],
            "Total Energy Consumption (TWh)",
            &aggregate::format_thousands(summary.total_energy_twh),
        );
        metric_card(
            &mut cols[1],
            "Average Carbon Emissions (Million Tons)",
            &format!("{:.2}", summary.avg_emissions_mt),
        );
    });
}

fn metric_card(ui: &mut Ui, label: &str, value: &str) {
    ui.group(|ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.add_space(6.0);
            ui.label(RichText::new(label).size(13.0).color(Color32::GRAY));
            ui.label(RichText::new(value).size(28.0).strong());
            ui.add_space(6.0);
        });
    });
}
