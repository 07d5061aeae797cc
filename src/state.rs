use crate::color::CountryColors;
use crate::data::aggregate::CorrelationMode;
use crate::data::filter::{FilterSelection, FilteredView};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// View selection + chart options
// ---------------------------------------------------------------------------

/// Which central view is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewTab {
    #[default]
    Metrics,
    Trends,
    Correlation,
    RawData,
}

impl ViewTab {
    pub const ALL: [ViewTab; 4] = [
        ViewTab::Metrics,
        ViewTab::Trends,
        ViewTab::Correlation,
        ViewTab::RawData,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ViewTab::Metrics => "Metrics",
            ViewTab::Trends => "Trends",
            ViewTab::Correlation => "Correlation",
            ViewTab::RawData => "Raw Data",
        }
    }
}

/// Presentation options for the correlation view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartOptions {
    pub show_regression: bool,
    pub log_scale: bool,
    pub mode: CorrelationMode,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            show_regression: true,
            log_scale: false,
            mode: CorrelationMode::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the background fetch completes).
    pub dataset: Option<&'static Dataset>,

    /// Current filter selections.
    pub selection: FilterSelection,

    /// Records passing the current filters (cached, rebuilt by `refilter`).
    pub view: Option<FilteredView<'static>>,

    /// Active central view.
    pub tab: ViewTab,

    /// Correlation chart options.
    pub options: ChartOptions,

    /// Per-country colour assignments.
    pub colors: Option<CountryColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the initial fetch is still in flight.
    pub loading: bool,

    /// Whether the energy-range predicate is active.
    pub range_enabled: bool,

    /// Range-slider positions, kept while the range filter is disabled so
    /// re-enabling restores the last interval.
    pub range_draft: (f64, f64),
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: FilterSelection::default(),
            view: None,
            tab: ViewTab::default(),
            options: ChartOptions::default(),
            colors: None,
            status_message: None,
            loading: true,
            range_enabled: false,
            range_draft: (0.0, 0.0),
        }
    }
}

impl AppState {
    /// Ingest the loaded dataset: seed colours and range bounds, start with
    /// an unrestricted selection.
    pub fn set_dataset(&mut self, dataset: &'static Dataset) {
        self.colors = Some(CountryColors::new(&dataset.countries));
        self.range_draft = dataset.energy_bounds;
        self.range_enabled = false;
        self.selection = FilterSelection::default();
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.refilter();
    }

    /// Record a fatal load failure.
    pub fn fail_load(&mut self, message: String) {
        self.status_message = Some(message);
        self.loading = false;
    }

    /// Recompute the filtered view after a selection change.
    pub fn refilter(&mut self) {
        self.selection.energy_range = self.range_enabled.then_some(self.range_draft);
        self.view = self
            .dataset
            .map(|ds| FilteredView::new(ds, &self.selection));
    }

    /// The empty-selection outcome: data is loaded but every row was
    /// filtered out.  A normal terminal state, not an error.
    pub fn empty_selection(&self) -> bool {
        self.dataset.is_some() && self.view.as_ref().is_some_and(|v| v.is_empty())
    }

    /// Toggle a single country in the selection.
    pub fn toggle_country(&mut self, country: &str) {
        if !self.selection.countries.remove(country) {
            self.selection.countries.insert(country.to_string());
        }
        self.refilter();
    }

    /// Toggle a single year in the selection.
    pub fn toggle_year(&mut self, year: i32) {
        if !self.selection.years.remove(&year) {
            self.selection.years.insert(year);
        }
        self.refilter();
    }

    /// Select every country explicitly.
    pub fn select_all_countries(&mut self) {
        if let Some(ds) = self.dataset {
            self.selection.countries = ds.countries.clone();
            self.refilter();
        }
    }

    /// Clear the country dimension (no restriction).
    pub fn clear_countries(&mut self) {
        self.selection.countries.clear();
        self.refilter();
    }

    /// Select every year explicitly.
    pub fn select_all_years(&mut self) {
        if let Some(ds) = self.dataset {
            self.selection.years = ds.years.clone();
            self.refilter();
        }
    }

    /// Clear the year dimension (no restriction).
    pub fn clear_years(&mut self) {
        self.selection.years.clear();
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn rec(country: &str, year: i32, energy: f64) -> Record {
        Record {
            country: country.to_string(),
            year,
            energy_twh: energy,
            emissions_mt: 10.0,
            fossil_pct: 50.0,
            renewable_pct: 50.0,
        }
    }

    fn leaked_dataset() -> &'static Dataset {
        Box::leak(Box::new(Dataset::from_records(vec![
            rec("A", 2000, 100.0),
            rec("B", 2001, 200.0),
        ])))
    }

    #[test]
    fn set_dataset_starts_unrestricted() {
        let mut state = AppState::default();
        assert!(state.loading);

        state.set_dataset(leaked_dataset());
        assert!(!state.loading);
        assert!(state.selection.is_unrestricted());
        assert_eq!(state.view.as_ref().unwrap().len(), 2);
        assert_eq!(state.range_draft, (100.0, 200.0));
        assert!(!state.empty_selection());
    }

    #[test]
    fn toggling_twice_restores_unrestricted() {
        let mut state = AppState::default();
        state.set_dataset(leaked_dataset());

        state.toggle_country("A");
        assert_eq!(state.view.as_ref().unwrap().len(), 1);
        state.toggle_country("A");
        assert!(state.selection.is_unrestricted());
        assert_eq!(state.view.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn absent_year_selection_is_the_empty_outcome() {
        let mut state = AppState::default();
        state.set_dataset(leaked_dataset());

        state.toggle_year(1990);
        assert!(state.empty_selection());

        state.clear_years();
        assert!(!state.empty_selection());
    }

    #[test]
    fn range_filter_activates_through_refilter() {
        let mut state = AppState::default();
        state.set_dataset(leaked_dataset());

        state.range_enabled = true;
        state.range_draft = (150.0, 250.0);
        state.refilter();
        assert_eq!(state.selection.energy_range, Some((150.0, 250.0)));
        assert_eq!(state.view.as_ref().unwrap().len(), 1);

        state.range_enabled = false;
        state.refilter();
        assert_eq!(state.selection.energy_range, None);
        assert_eq!(state.view.as_ref().unwrap().len(), 2);
    }
}
