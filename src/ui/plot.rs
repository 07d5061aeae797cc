use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::color::CountryColors;
use crate::data::aggregate::{self, Regression};
use crate::data::filter::FilteredView;
use crate::state::ChartOptions;

const FOSSIL_COLOR: Color32 = Color32::from_rgb(231, 76, 60);
const RENEWABLE_COLOR: Color32 = Color32::from_rgb(46, 204, 113);
const REGRESSION_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

// ---------------------------------------------------------------------------
// Yearly trend (central panel, Trends tab)
// ---------------------------------------------------------------------------

/// Fossil vs renewable share over time, averaged per year.
pub fn trend_plot(ui: &mut Ui, view: &FilteredView) {
    let trend = aggregate::yearly_trend(view);

    ui.heading("Fossil vs Renewable Energy Over Time");

    let fossil: PlotPoints = trend
        .iter()
        .map(|t| [t.year as f64, t.fossil_pct_mean])
        .collect();
    let renewable: PlotPoints = trend
        .iter()
        .map(|t| [t.year as f64, t.renewable_pct_mean])
        .collect();

    Plot::new("yearly_trend")
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label("Share (%)")
        .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(fossil)
                    .name("Fossil Fuel Dependency (%)")
                    .color(FOSSIL_COLOR)
                    .width(2.0),
            );
            plot_ui.line(
                Line::new(renewable)
                    .name("Renewable Energy Share (%)")
                    .color(RENEWABLE_COLOR)
                    .width(2.0),
            );
        });
}

// ---------------------------------------------------------------------------
// Correlation scatter (central panel, Correlation tab)
// ---------------------------------------------------------------------------

/// Energy vs emissions scatter with optional regression overlay and
/// optional log-scaled axes.
pub fn correlation_plot(
    ui: &mut Ui,
    view: &FilteredView,
    options: ChartOptions,
    colors: Option<&CountryColors>,
) {
    let points = aggregate::correlation_points(view, options.mode);
    // The fit always follows the active point set, so switching modes
    // changes the overlay even for an unchanged view.
    let regression = options
        .show_regression
        .then(|| aggregate::linear_regression(&points))
        .flatten();

    ui.heading("Correlation: Energy vs Carbon Emissions per Country");

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    for p in &points {
        x_min = x_min.min(p.energy_twh);
        x_max = x_max.max(p.energy_twh);
    }

    let log_scale = options.log_scale;
    let to_display = |v: f64| if log_scale { v.log10() } else { v };

    let mut plot = Plot::new("correlation")
        .legend(Legend::default())
        .x_axis_label(if log_scale {
            "Total Energy Consumption (TWh, log scale)"
        } else {
            "Total Energy Consumption (TWh)"
        })
        .y_axis_label(if log_scale {
            "Carbon Emissions (Million Tons, log scale)"
        } else {
            "Carbon Emissions (Million Tons)"
        });

    if log_scale {
        plot = plot
            .x_axis_formatter(|mark, _range| format_magnitude(mark.value))
            .y_axis_formatter(|mark, _range| format_magnitude(mark.value));
    } else if let (Some(xd), Some(yd)) = (
        aggregate::padded_domain(points.iter().map(|p| p.energy_twh)),
        aggregate::padded_domain(points.iter().map(|p| p.emissions_mt)),
    ) {
        plot = plot
            .include_x(xd.0)
            .include_x(xd.1)
            .include_y(yd.0)
            .include_y(yd.1);
    }

    // One Points element per country: one legend entry, one colour.
    let mut by_country: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &points {
        if log_scale && (p.energy_twh <= 0.0 || p.emissions_mt <= 0.0) {
            // Non-positive values have no log-scale position.
            continue;
        }
        by_country
            .entry(p.country.as_str())
            .or_default()
            .push([to_display(p.energy_twh), to_display(p.emissions_mt)]);
    }

    plot.show(ui, |plot_ui| {
        for (country, pts) in by_country {
            let color = colors
                .map(|c| c.color_for(country))
                .unwrap_or(Color32::LIGHT_BLUE);
            plot_ui.points(
                Points::new(PlotPoints::from(pts))
                    .name(country)
                    .color(color)
                    .radius(5.0),
            );
        }

        if let Some(fit) = regression {
            plot_ui.line(
                Line::new(PlotPoints::from(sample_regression(
                    &fit, x_min, x_max, log_scale,
                )))
                    .name("Regression")
                    .color(REGRESSION_COLOR)
                    .width(2.0),
            );
        }
    });
}

/// Sample the fitted line across the x domain.  Sampling (rather than two
/// endpoints) keeps the overlay correct under the log transform, where a
/// straight line in data space is a curve on screen.
fn sample_regression(fit: &Regression, x_min: f64, x_max: f64, log_scale: bool) -> Vec<[f64; 2]> {
    const SAMPLES: usize = 64;
    (0..=SAMPLES)
        .filter_map(|i| {
            let x = x_min + (x_max - x_min) * i as f64 / SAMPLES as f64;
            let y = fit.predict(x);
            if log_scale {
                (x > 0.0 && y > 0.0).then(|| [x.log10(), y.log10()])
            } else {
                Some([x, y])
            }
        })
        .collect()
}

/// Tick label showing the original magnitude for a log10-transformed axis.
fn format_magnitude(log_value: f64) -> String {
    let v = 10f64.powf(log_value);
    if v >= 1000.0 {
        aggregate::format_thousands(v)
    } else if v >= 1.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}
