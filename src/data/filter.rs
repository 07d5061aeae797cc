use std::collections::BTreeSet;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// FilterSelection – user-chosen inclusion criteria
// ---------------------------------------------------------------------------

/// User-chosen inclusion criteria.  An empty set on a dimension means "no
/// restriction on that dimension"; a `None` range means the range predicate
/// is inactive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    pub countries: BTreeSet<String>,
    pub years: BTreeSet<i32>,
    /// Closed interval over total energy consumption, `[lo, hi]` inclusive.
    pub energy_range: Option<(f64, f64)>,
}

impl FilterSelection {
    /// Whether this selection keeps the given record.  All active predicates
    /// are ANDed.
    pub fn keeps(&self, rec: &Record) -> bool {
        if !self.countries.is_empty() && !self.countries.contains(&rec.country) {
            return false;
        }
        if !self.years.is_empty() && !self.years.contains(&rec.year) {
            return false;
        }
        if let Some((lo, hi)) = self.energy_range {
            if rec.energy_twh < lo || rec.energy_twh > hi {
                return false;
            }
        }
        true
    }

    /// True when no predicate is active, i.e. filtering is the identity.
    pub fn is_unrestricted(&self) -> bool {
        self.countries.is_empty() && self.years.is_empty() && self.energy_range.is_none()
    }
}

/// Indices of records passing all active filters, in dataset order.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.keeps(rec))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – subset of the dataset passing the filters
// ---------------------------------------------------------------------------

/// The subsequence of dataset records satisfying a [`FilterSelection`],
/// preserving source order.  Borrows the dataset; recomputed on every
/// selection change, never mutating the dataset itself.
#[derive(Debug)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a Dataset, selection: &FilterSelection) -> Self {
        Self {
            dataset,
            indices: filtered_indices(dataset, selection),
        }
    }

    /// Iterate over retained records in dataset order.
    pub fn rows(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.indices.iter().map(|&i| &self.dataset.records[i])
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether every record was filtered out (the empty-selection outcome).
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn rec(
        country: &str,
        year: i32,
        energy: f64,
        emissions: f64,
        fossil: f64,
        renewable: f64,
    ) -> Record {
        Record {
            country: country.to_string(),
            year,
            energy_twh: energy,
            emissions_mt: emissions,
            fossil_pct: fossil,
            renewable_pct: renewable,
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::from_records(vec![
            rec("A", 2000, 100.0, 50.0, 30.0, 70.0),
            rec("A", 2001, 120.0, 55.0, 25.0, 75.0),
            rec("B", 2000, 200.0, 90.0, 60.0, 40.0),
        ])
    }

    fn countries(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn unrestricted_selection_is_identity() {
        let ds = sample_dataset();
        let selection = FilterSelection::default();
        assert!(selection.is_unrestricted());

        let view = FilteredView::new(&ds, &selection);
        assert_eq!(view.len(), ds.len());
        assert!(view.rows().eq(ds.records.iter()));
    }

    #[test]
    fn country_filter_keeps_matching_rows_in_order() {
        let ds = sample_dataset();
        let selection = FilterSelection {
            countries: countries(&["A"]),
            ..Default::default()
        };

        let view = FilteredView::new(&ds, &selection);
        let years: Vec<i32> = view.rows().map(|r| r.year).collect();
        assert_eq!(years, vec![2000, 2001]);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let ds = sample_dataset();
        let selection = FilterSelection {
            countries: countries(&["A"]),
            years: [2000].into_iter().collect(),
            ..Default::default()
        };

        let view = FilteredView::new(&ds, &selection);
        assert_eq!(view.len(), 1);
        let only = view.rows().next().unwrap();
        assert_eq!((only.country.as_str(), only.year), ("A", 2000));
    }

    #[test]
    fn retained_rows_satisfy_all_predicates_and_dropped_violate_one() {
        let ds = sample_dataset();
        let selection = FilterSelection {
            countries: countries(&["A", "B"]),
            years: [2000].into_iter().collect(),
            energy_range: Some((150.0, 250.0)),
        };

        let kept = filtered_indices(&ds, &selection);
        for (i, rec) in ds.records.iter().enumerate() {
            if kept.contains(&i) {
                assert!(selection.keeps(rec));
            } else {
                let violates_country = !selection.countries.contains(&rec.country);
                let violates_year = !selection.years.contains(&rec.year);
                let violates_range = rec.energy_twh < 150.0 || rec.energy_twh > 250.0;
                assert!(violates_country || violates_year || violates_range);
            }
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let ds = sample_dataset();
        let selection = FilterSelection {
            energy_range: Some((100.0, 120.0)),
            ..Default::default()
        };

        let view = FilteredView::new(&ds, &selection);
        assert_eq!(view.len(), 2);

        let degenerate = FilterSelection {
            energy_range: Some((200.0, 200.0)),
            ..Default::default()
        };
        assert_eq!(FilteredView::new(&ds, &degenerate).len(), 1);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample_dataset();
        let selection = FilterSelection {
            countries: countries(&["A"]),
            energy_range: Some((0.0, 110.0)),
            ..Default::default()
        };

        let first = filtered_indices(&ds, &selection);
        let second = filtered_indices(&ds, &selection);
        assert_eq!(first, second);
    }

    #[test]
    fn dimension_order_does_not_matter() {
        let ds = sample_dataset();
        let both = FilterSelection {
            countries: countries(&["A"]),
            years: [2001].into_iter().collect(),
            ..Default::default()
        };

        // Filter by country first, then re-filter the survivors by year.
        let by_country = FilterSelection {
            countries: countries(&["A"]),
            ..Default::default()
        };
        let survivors: Vec<Record> = FilteredView::new(&ds, &by_country)
            .rows()
            .cloned()
            .collect();
        let narrowed = Dataset::from_records(survivors);
        let by_year = FilterSelection {
            years: [2001].into_iter().collect(),
            ..Default::default()
        };

        let sequential: Vec<Record> = FilteredView::new(&narrowed, &by_year)
            .rows()
            .cloned()
            .collect();
        let combined: Vec<Record> = FilteredView::new(&ds, &both).rows().cloned().collect();
        assert_eq!(sequential, combined);
    }

    #[test]
    fn absent_year_yields_empty_view() {
        let ds = sample_dataset();
        let selection = FilterSelection {
            years: [1999].into_iter().collect(),
            ..Default::default()
        };

        let view = FilteredView::new(&ds, &selection);
        assert!(view.is_empty());
    }
}
