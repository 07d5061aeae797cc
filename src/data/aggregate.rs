use std::collections::BTreeMap;

use super::filter::FilteredView;

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Scalar summary over a filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_energy_twh: f64,
    pub avg_emissions_mt: f64,
}

/// Sum of energy consumption and mean of carbon emissions.  Callers must
/// handle the empty view beforehand (the empty-selection halt); over an
/// empty view the average is NaN.
pub fn summary(view: &FilteredView) -> Summary {
    let mut total = 0.0;
    let mut emissions = 0.0;
    let mut n = 0usize;
    for rec in view.rows() {
        total += rec.energy_twh;
        emissions += rec.emissions_mt;
        n += 1;
    }
    Summary {
        total_energy_twh: total,
        avg_emissions_mt: if n == 0 { f64::NAN } else { emissions / n as f64 },
    }
}

// ---------------------------------------------------------------------------
// Grouped aggregates
// ---------------------------------------------------------------------------

/// Mean fossil dependency and renewable share for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyTrend {
    pub year: i32,
    pub fossil_pct_mean: f64,
    pub renewable_pct_mean: f64,
}

/// Group by year and average the two percentage series.  One row per
/// distinct year present in the view, ascending.
pub fn yearly_trend(view: &FilteredView) -> Vec<YearlyTrend> {
    let mut groups: BTreeMap<i32, (f64, f64, usize)> = BTreeMap::new();
    for rec in view.rows() {
        let entry = groups.entry(rec.year).or_insert((0.0, 0.0, 0));
        entry.0 += rec.fossil_pct;
        entry.1 += rec.renewable_pct;
        entry.2 += 1;
    }
    groups
        .into_iter()
        .map(|(year, (fossil, renewable, n))| YearlyTrend {
            year,
            fossil_pct_mean: fossil / n as f64,
            renewable_pct_mean: renewable / n as f64,
        })
        .collect()
}

/// Summed energy and emissions for one country.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryTotal {
    pub country: String,
    pub energy_twh: f64,
    pub emissions_mt: f64,
}

/// Group by country and sum both absolute series.  One row per distinct
/// country present in the view, sorted by name.
pub fn country_totals(view: &FilteredView) -> Vec<CountryTotal> {
    let mut groups: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for rec in view.rows() {
        let entry = groups.entry(rec.country.as_str()).or_insert((0.0, 0.0));
        entry.0 += rec.energy_twh;
        entry.1 += rec.emissions_mt;
    }
    groups
        .into_iter()
        .map(|(country, (energy, emissions))| CountryTotal {
            country: country.to_string(),
            energy_twh: energy,
            emissions_mt: emissions,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation point set + regression
// ---------------------------------------------------------------------------

/// Which point set feeds the correlation scatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorrelationMode {
    /// One point per country, series summed.
    #[default]
    CountryTotals,
    /// One point per country-year record.
    PerRecord,
}

/// One scatter point with its tooltip fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationPoint {
    pub country: String,
    /// Present only in per-record mode.
    pub year: Option<i32>,
    pub energy_twh: f64,
    pub emissions_mt: f64,
}

/// The active correlation point set for the given mode.
pub fn correlation_points(view: &FilteredView, mode: CorrelationMode) -> Vec<CorrelationPoint> {
    match mode {
        CorrelationMode::CountryTotals => country_totals(view)
            .into_iter()
            .map(|t| CorrelationPoint {
                country: t.country,
                year: None,
                energy_twh: t.energy_twh,
                emissions_mt: t.emissions_mt,
            })
            .collect(),
        CorrelationMode::PerRecord => view
            .rows()
            .map(|rec| CorrelationPoint {
                country: rec.country.clone(),
                year: Some(rec.year),
                energy_twh: rec.energy_twh,
                emissions_mt: rec.emissions_mt,
            })
            .collect(),
    }
}

/// Ordinary-least-squares line fit of emissions on energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit `emissions = slope * energy + intercept` over the active point set.
/// `None` with fewer than two points or zero variance in x.
pub fn linear_regression(points: &[CorrelationPoint]) -> Option<Regression> {
    let n = points.len();
    if n < 2 {
        return None;
    }
    let nf = n as f64;
    let mean_x = points.iter().map(|p| p.energy_twh).sum::<f64>() / nf;
    let mean_y = points.iter().map(|p| p.emissions_mt).sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for p in points {
        let dx = p.energy_twh - mean_x;
        sxx += dx * dx;
        sxy += dx * (p.emissions_mt - mean_y);
    }
    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some(Regression {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// Linear-scale axis domain: data min/max padded by 10% on each side.
pub fn padded_domain(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() {
        Some((min * 0.9, max * 1.1))
    } else {
        None
    }
}

/// Thousands-grouped integer rendering, e.g. `1234567.8` → `"1,234,568"`.
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
