/// SalaryDash Filtered View
///
/// A FilteredView is a read-only subset of a `RecordStore`. Like a table
/// view it keeps a mapping from view positions to store positions instead
/// of copying rows, so building one is a single pass over the store and the
/// store itself is never touched.
///
/// Views are recomputed from scratch on every criteria change.

use crate::criteria::FilterCriteria;
use crate::record::{Record, REQUIRED_COLUMNS};
use crate::store::RecordStore;
use log::{debug, warn};

/// Apply criteria to a store.
///
/// A record is kept iff its year, seniority, contract and company size are
/// each selected. Store order is preserved. Any empty selection yields an
/// empty view.
///
/// ```
/// use salarydash::{filter, FilterCriteria, Record, RecordStore};
///
/// let store = RecordStore::from_records(vec![
///     Record::new(2023, "senior", "full-time", "large", "Data Scientist", "remote", "USA", 150000.0),
///     Record::new(2023, "junior", "full-time", "small", "Analyst", "onsite", "BRA", 40000.0),
/// ]);
/// let mut criteria = FilterCriteria::all(&store);
/// criteria.sizes.retain(|s| s == "large");
///
/// let view = filter(&store, &criteria);
/// assert_eq!(view.len(), 1);
/// assert_eq!(view.get(0).unwrap().title, "Data Scientist");
/// ```
pub fn filter<'a>(store: &'a RecordStore, criteria: &FilterCriteria) -> FilteredView<'a> {
    let view_to_store: Vec<usize> = if criteria.selects_nothing() {
        Vec::new()
    } else {
        store
            .iter()
            .enumerate()
            .filter(|(_, record)| criteria.matches(record))
            .map(|(i, _)| i)
            .collect()
    };

    debug!("filtered {} of {} records", view_to_store.len(), store.len());
    if view_to_store.is_empty() {
        warn!("current filters match no records");
    }

    FilteredView { store, view_to_store }
}

#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    store: &'a RecordStore,
    view_to_store: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// A view over every record of the store.
    pub fn full(store: &'a RecordStore) -> Self {
        FilteredView {
            store,
            view_to_store: (0..store.len()).collect(),
        }
    }

    /// Filter this view again. Applying the criteria that produced the view
    /// returns the same rows.
    pub fn refine(&self, criteria: &FilterCriteria) -> FilteredView<'a> {
        let view_to_store = self
            .view_to_store
            .iter()
            .copied()
            .filter(|&i| criteria.matches(&self.store.records()[i]))
            .collect();
        FilteredView {
            store: self.store,
            view_to_store,
        }
    }

    pub fn len(&self) -> usize {
        self.view_to_store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.view_to_store.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a Record> {
        self.view_to_store
            .get(index)
            .and_then(|&i| self.store.get(i))
    }

    /// Store position of a view row.
    pub fn store_index(&self, view_index: usize) -> Option<usize> {
        self.view_to_store.get(view_index).copied()
    }

    pub fn store_indices(&self) -> &[usize] {
        &self.view_to_store
    }

    /// Rows of the view in store order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let records = self.store.records();
        self.view_to_store.iter().map(move |&i| &records[i])
    }

    /// Compensation of every row, in view order.
    pub fn compensations(&self) -> Vec<f64> {
        self.records().map(|r| r.usd).collect()
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Export the rows as CSV with the source column names.
    pub fn to_csv(&self) -> String {
        let mut result = REQUIRED_COLUMNS.join(",");
        result.push('\n');

        for r in self.records() {
            let fields = [
                r.year.to_string(),
                escape_csv(&r.seniority),
                escape_csv(&r.contract),
                escape_csv(&r.company_size),
                escape_csv(&r.title),
                escape_csv(&r.remote),
                escape_csv(&r.country),
                r.usd.to_string(),
            ];
            result.push_str(&fields.join(","));
            result.push('\n');
        }
        result
    }

    /// Export the rows as a pretty-printed JSON array of objects.
    pub fn to_json(&self) -> Result<String, String> {
        let rows: Vec<&Record> = self.records().collect();
        serde_json::to_string_pretty(&rows).map_err(|e| format!("JSON serialization error: {}", e))
    }
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
