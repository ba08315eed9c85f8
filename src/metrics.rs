/// Scalar summary metrics of a filtered view.
///
/// Every metric has a defined value for an empty view (0, 0, 0 and an
/// empty title), so the presentation layer never sees a fault for a filter
/// that matches nothing.

use crate::view::FilteredView;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub mean_compensation: f64,
    pub max_compensation: f64,
    pub record_count: usize,
    pub most_common_title: String,
}

impl Metrics {
    /// Metrics of an empty view.
    pub fn empty() -> Self {
        Metrics {
            mean_compensation: 0.0,
            max_compensation: 0.0,
            record_count: 0,
            most_common_title: String::new(),
        }
    }

    /// The four labelled tiles shown above the charts.
    pub fn tiles(&self) -> Vec<MetricTile> {
        vec![
            MetricTile::new("Average salary", format_usd(self.mean_compensation)),
            MetricTile::new("Maximum salary", format_usd(self.max_compensation)),
            MetricTile::new("Total records", self.record_count.to_string()),
            MetricTile::new("Most common title", self.most_common_title.clone()),
        ]
    }
}

/// A labelled, pre-formatted metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricTile {
    pub label: String,
    pub value: String,
}

impl MetricTile {
    pub fn new(label: &str, value: String) -> Self {
        MetricTile {
            label: label.to_string(),
            value,
        }
    }
}

/// Format an annual USD amount the way the metric tiles show it.
///
/// ```
/// assert_eq!(salarydash::format_usd(95000.0), "US$95000.00");
/// ```
pub fn format_usd(amount: f64) -> String {
    format!("US${:.2}", amount)
}

/// Summarize a view.
///
/// ```
/// use salarydash::{summarize, FilteredView, Record, RecordStore};
///
/// let store = RecordStore::from_records(vec![
///     Record::new(2023, "senior", "full-time", "large", "Data Scientist", "remote", "USA", 150000.0),
///     Record::new(2023, "junior", "full-time", "small", "Analyst", "onsite", "BRA", 40000.0),
/// ]);
/// let metrics = summarize(&FilteredView::full(&store));
///
/// assert_eq!(metrics.mean_compensation, 95000.0);
/// assert_eq!(metrics.max_compensation, 150000.0);
/// assert_eq!(metrics.record_count, 2);
/// assert_eq!(metrics.most_common_title, "Data Scientist");
/// ```
pub fn summarize(view: &FilteredView<'_>) -> Metrics {
    if view.is_empty() {
        return Metrics::empty();
    }

    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    for r in view.records() {
        sum += r.usd;
        max = max.max(r.usd);
    }

    Metrics {
        mean_compensation: sum / view.len() as f64,
        max_compensation: max,
        record_count: view.len(),
        most_common_title: most_common_title(view),
    }
}

/// Most frequent title; ties go to the title seen first in store order.
/// Blank titles are missing values and never win.
fn most_common_title(view: &FilteredView<'_>) -> String {
    // title -> (count, first position)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (pos, r) in view.records().enumerate().filter(|(_, r)| !r.title.is_empty()) {
        counts.entry(r.title.as_str()).or_insert((0, pos)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(title, _)| title.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::FilterCriteria;
    use crate::record::Record;
    use crate::store::RecordStore;
    use crate::view::filter;

    fn two_rows() -> RecordStore {
        RecordStore::from_records(vec![
            Record::new(2023, "senior", "full-time", "large", "Data Scientist", "remote", "USA", 150000.0),
            Record::new(2023, "junior", "full-time", "small", "Analyst", "onsite", "BRA", 40000.0),
        ])
    }

    #[test]
    fn test_summarize_all() {
        let s = two_rows();
        let m = summarize(&filter(&s, &FilterCriteria::all(&s)));
        assert_eq!(m.mean_compensation, 95000.0);
        assert_eq!(m.max_compensation, 150000.0);
        assert_eq!(m.record_count, 2);
        assert_eq!(m.most_common_title, "Data Scientist");
    }

    #[test]
    fn test_summarize_single_size() {
        let s = two_rows();
        let mut criteria = FilterCriteria::all(&s);
        criteria.sizes = ["large".to_string()].into_iter().collect();
        let m = summarize(&filter(&s, &criteria));
        assert_eq!(m.record_count, 1);
        assert_eq!(m.mean_compensation, 150000.0);
        assert_eq!(m.max_compensation, 150000.0);
    }

    #[test]
    fn test_summarize_empty() {
        let s = two_rows();
        let mut criteria = FilterCriteria::all(&s);
        criteria.years.clear();
        assert_eq!(summarize(&filter(&s, &criteria)), Metrics::empty());
    }

    #[test]
    fn test_most_common_title_counts_and_ties() {
        let s = RecordStore::from_records(vec![
            Record::new(2023, "a", "b", "c", "Analyst", "x", "USA", 1.0),
            Record::new(2023, "a", "b", "c", "Engineer", "x", "USA", 1.0),
            Record::new(2023, "a", "b", "c", "Engineer", "x", "USA", 1.0),
            Record::new(2023, "a", "b", "c", "Analyst", "x", "USA", 1.0),
            Record::new(2023, "a", "b", "c", "Scientist", "x", "USA", 1.0),
        ]);
        // Analyst and Engineer both appear twice; Analyst comes first.
        assert_eq!(summarize(&FilteredView::full(&s)).most_common_title, "Analyst");

        let s = RecordStore::from_records(vec![
            Record::new(2023, "a", "b", "c", "Analyst", "x", "USA", 1.0),
            Record::new(2023, "a", "b", "c", "Engineer", "x", "USA", 1.0),
            Record::new(2023, "a", "b", "c", "Engineer", "x", "USA", 1.0),
        ]);
        assert_eq!(summarize(&FilteredView::full(&s)).most_common_title, "Engineer");
    }

    #[test]
    fn test_most_common_title_skips_blank_titles() {
        let s = RecordStore::from_records(vec![
            Record::new(2023, "a", "b", "c", "", "x", "USA", 500000.0),
            Record::new(2023, "a", "b", "c", "", "x", "USA", 400000.0),
            Record::new(2023, "a", "b", "c", "Analyst", "x", "USA", 1000.0),
            Record::new(2023, "a", "b", "c", "Data Science", "x", "", 90000.0),
        ]);
        let m = summarize(&FilteredView::full(&s));
        // blank-title rows still count towards the scalar metrics
        assert_eq!(m.record_count, 4);
        assert_eq!(m.max_compensation, 500000.0);
        assert_eq!(m.most_common_title, "Analyst");

        let blanks = RecordStore::from_records(vec![Record::new(2023, "a", "b", "c", "", "x", "USA", 1.0)]);
        assert_eq!(summarize(&FilteredView::full(&blanks)).most_common_title, "");
    }

    #[test]
    fn test_tiles() {
        let s = two_rows();
        let tiles = summarize(&FilteredView::full(&s)).tiles();
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0], MetricTile::new("Average salary", "US$95000.00".to_string()));
        assert_eq!(tiles[1].value, "US$150000.00");
        assert_eq!(tiles[2].value, "2");
        assert_eq!(tiles[3].value, "Data Scientist");

        let empty = Metrics::empty().tiles();
        assert_eq!(empty[0].value, "US$0.00");
        assert_eq!(empty[3].value, "");
    }
}
