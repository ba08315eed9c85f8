/// Dashboard sessions and the recompute pipeline.
///
/// A session pairs the loaded store with the user's current criteria. Every
/// change to the criteria is followed by a full recomputation through
/// `compute_dashboard`; nothing is cached between recomputations.
///
/// # Examples
///
/// ```
/// use salarydash::{FilterColumn, FilterValue, Record, RecordStore, Session};
/// use std::sync::Arc;
///
/// let store = Arc::new(RecordStore::from_records(vec![
///     Record::new(2023, "senior", "full-time", "large", "Data Scientist", "remote", "USA", 150000.0),
///     Record::new(2023, "junior", "full-time", "small", "Analyst", "onsite", "BRA", 40000.0),
/// ]));
///
/// let mut session = Session::new(store);
/// assert_eq!(session.dashboard().metrics.record_count, 2);
///
/// session.select(FilterColumn::CompanySize, vec![FilterValue::from("small")]).unwrap();
/// assert_eq!(session.dashboard().metrics.most_common_title, "Analyst");
/// ```

use crate::charts::{aggregate, ChartData};
use crate::criteria::FilterCriteria;
use crate::error::CriteriaError;
use crate::metrics::{summarize, MetricTile, Metrics};
use crate::record::{FilterColumn, FilterValue};
use crate::store::RecordStore;
use crate::view::{filter, FilteredView};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Everything the presentation layer draws for one set of criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub metrics: Metrics,
    pub tiles: Vec<MetricTile>,
    pub charts: ChartData,
}

/// Run the whole pipeline: filter, summarize, aggregate.
pub fn compute_dashboard(store: &RecordStore, criteria: &FilterCriteria) -> Dashboard {
    let view = filter(store, criteria);
    let metrics = summarize(&view);
    let charts = aggregate(&view);
    debug!(
        "recomputed dashboard: {} records, mean {:.2}",
        metrics.record_count, metrics.mean_compensation
    );

    Dashboard {
        tiles: metrics.tiles(),
        metrics,
        charts,
    }
}

/// Selectable values of one filter column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub column: FilterColumn,
    pub label: String,
    pub available: Vec<FilterValue>,
    pub selected: Vec<FilterValue>,
}

/// Session-scoped state: the shared store and this user's criteria.
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<RecordStore>,
    criteria: FilterCriteria,
}

impl Session {
    /// Start a session with every value selected.
    pub fn new(store: Arc<RecordStore>) -> Self {
        let criteria = FilterCriteria::all(&store);
        Session { store, criteria }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the selection of one column.
    ///
    /// Every value must exist in the store. On error the previous selection
    /// is kept.
    pub fn select(&mut self, column: FilterColumn, values: Vec<FilterValue>) -> Result<(), CriteriaError> {
        let mut next = self.criteria.clone();
        next.set(column, values)?;
        next.validate(&self.store)?;
        self.criteria = next;
        Ok(())
    }

    /// Replace all four selections at once, validated like `select`.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> Result<(), CriteriaError> {
        criteria.validate(&self.store)?;
        self.criteria = criteria;
        Ok(())
    }

    /// Restore the default "everything selected" criteria.
    pub fn reset(&mut self) {
        self.criteria = FilterCriteria::all(&self.store);
    }

    /// Options for the four selection widgets.
    pub fn options(&self) -> Vec<FilterOptions> {
        FilterColumn::ALL
            .iter()
            .map(|&column| FilterOptions {
                column,
                label: column.label().to_string(),
                available: self.store.distinct_values(column),
                selected: self.criteria.values(column),
            })
            .collect()
    }

    pub fn view(&self) -> FilteredView<'_> {
        filter(&self.store, &self.criteria)
    }

    pub fn dashboard(&self) -> Dashboard {
        compute_dashboard(&self.store, &self.criteria)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn session() -> Session {
        Session::new(Arc::new(RecordStore::from_records(vec![
            Record::new(2023, "senior", "full-time", "large", "Data Scientist", "remote", "USA", 150000.0),
            Record::new(2023, "junior", "full-time", "small", "Analyst", "onsite", "BRA", 40000.0),
        ])))
    }

    #[test]
    fn test_default_dashboard() {
        let d = session().dashboard();
        assert_eq!(d.metrics.mean_compensation, 95000.0);
        assert_eq!(d.metrics.max_compensation, 150000.0);
        assert_eq!(d.metrics.record_count, 2);
        assert_eq!(d.metrics.most_common_title, "Data Scientist");
        assert_eq!(d.tiles.len(), 4);
        assert!(!d.charts.is_no_data());
    }

    #[test]
    fn test_select_size() {
        let mut s = session();
        s.select(FilterColumn::CompanySize, vec![FilterValue::from("large")]).unwrap();
        assert_eq!(s.view().len(), 1);
        let d = s.dashboard();
        assert_eq!(d.metrics.record_count, 1);
        assert_eq!(d.metrics.mean_compensation, 150000.0);
        assert_eq!(d.metrics.max_compensation, 150000.0);
    }

    #[test]
    fn test_empty_years_gives_empty_dashboard() {
        let mut s = session();
        s.select(FilterColumn::Year, Vec::new()).unwrap();
        let d = s.dashboard();
        assert_eq!(d.metrics, Metrics::empty());
        assert!(d.charts.top_titles.is_no_data());
        assert!(d.charts.distribution.is_no_data());
        assert!(d.charts.remote_modes.is_no_data());
        assert!(d.charts.country_means.is_no_data());
    }

    #[test]
    fn test_select_unknown_value_keeps_previous() {
        let mut s = session();
        s.select(FilterColumn::Seniority, vec![FilterValue::from("junior")]).unwrap();
        let before = s.criteria().clone();

        let err = s
            .select(FilterColumn::Seniority, vec![FilterValue::from("junior"), FilterValue::from("intern")])
            .unwrap_err();
        assert_eq!(
            err,
            CriteriaError::UnknownValue {
                column: "seniority".to_string(),
                value: "intern".to_string(),
            }
        );
        assert_eq!(s.criteria(), &before);
    }

    #[test]
    fn test_reset_and_options() {
        let mut s = session();
        s.select(FilterColumn::Contract, Vec::new()).unwrap();
        assert!(s.view().is_empty());

        s.reset();
        assert_eq!(s.view().len(), 2);

        let options = s.options();
        assert_eq!(options.len(), 4);
        assert_eq!(options[0].column, FilterColumn::Year);
        assert_eq!(options[0].available, vec![FilterValue::Year(2023)]);
        assert_eq!(options[3].available, options[3].selected);
        assert_eq!(options[3].label, "Company size");
    }

    #[test]
    fn test_set_criteria_validates() {
        let mut s = session();
        let mut criteria = FilterCriteria::empty();
        criteria.years.insert(1999);
        assert!(s.set_criteria(criteria).is_err());
        assert!(s.set_criteria(FilterCriteria::empty()).is_ok());
        assert!(s.dashboard().charts.is_no_data());
    }
}
