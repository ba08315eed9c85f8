/// Grouped tables behind the dashboard charts.
///
/// Each chart is computed independently from the filtered view and wrapped
/// in a `Panel`. An empty view turns every panel into `Panel::NoData` with a
/// message for the user instead of handing the renderer a degenerate chart.
///
/// Nothing here draws; binning, colors and layout belong to the renderer.

use crate::view::FilteredView;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Number of rows in the top-titles chart.
pub const TOP_TITLES_LIMIT: usize = 10;

/// Job title whose per-country averages are mapped.
pub const REFERENCE_TITLE: &str = "Data Science";

const TOP_TITLES_CHART: &str = "Top 10 titles by average salary";
const DISTRIBUTION_CHART: &str = "Annual salary distribution";
const REMOTE_CHART: &str = "Share of work arrangements";
const COUNTRY_CHART: &str = "Average data science salary by country";

/// One chart's content, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Panel<T> {
    Ready { title: String, data: T },
    NoData { title: String, message: String },
}

impl<T> Panel<T> {
    fn build(view: &FilteredView<'_>, title: &str, what: &str, compute: impl FnOnce() -> T) -> Self {
        if view.is_empty() {
            Panel::NoData {
                title: title.to_string(),
                message: format!("No data to display in the {} chart.", what),
            }
        } else {
            Panel::Ready {
                title: title.to_string(),
                data: compute(),
            }
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Panel::Ready { title, .. } | Panel::NoData { title, .. } => title,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Panel::Ready { data, .. } => Some(data),
            Panel::NoData { .. } => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Panel::NoData { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleMean {
    pub title: String,
    pub mean_usd: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeCount {
    pub mode: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryMean {
    /// ISO3 country code
    pub country: String,
    pub mean_usd: f64,
}

/// All chart tables for one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub top_titles: Panel<Vec<TitleMean>>,
    pub distribution: Panel<Vec<f64>>,
    pub remote_modes: Panel<Vec<ModeCount>>,
    pub country_means: Panel<Vec<CountryMean>>,
}

impl ChartData {
    /// Returns true if no panel has data.
    pub fn is_no_data(&self) -> bool {
        self.top_titles.is_no_data()
            && self.distribution.is_no_data()
            && self.remote_modes.is_no_data()
            && self.country_means.is_no_data()
    }
}

/// Compute every chart table for a view.
pub fn aggregate(view: &FilteredView<'_>) -> ChartData {
    ChartData {
        top_titles: Panel::build(view, TOP_TITLES_CHART, "titles", || {
            top_titles_by_mean(view, TOP_TITLES_LIMIT)
        }),
        distribution: Panel::build(view, DISTRIBUTION_CHART, "distribution", || view.compensations()),
        remote_modes: Panel::build(view, REMOTE_CHART, "work arrangement", || remote_mode_counts(view)),
        country_means: Panel::build(view, COUNTRY_CHART, "country", || {
            country_means_for_title(view, REFERENCE_TITLE)
        }),
    }
}

/// The `limit` titles with the highest mean compensation, ordered ascending
/// by mean. Titles with equal means keep alphabetical order. Rows with a
/// blank title are left out.
pub fn top_titles_by_mean(view: &FilteredView<'_>, limit: usize) -> Vec<TitleMean> {
    let rows = view
        .records()
        .filter(|r| !r.title.is_empty())
        .map(|r| (r.title.as_str(), r.usd));

    let mut means: Vec<TitleMean> = grouped_means(rows)
        .into_iter()
        .map(|(title, mean_usd)| TitleMean { title, mean_usd })
        .collect();

    means.sort_by(|a, b| b.mean_usd.total_cmp(&a.mean_usd));
    means.truncate(limit);
    means.sort_by(|a, b| a.mean_usd.total_cmp(&b.mean_usd));
    means
}

/// Occurrences of each remote-work mode, most frequent first. Modes with
/// equal counts keep the order they first appear in.
pub fn remote_mode_counts(view: &FilteredView<'_>) -> Vec<ModeCount> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in view.records() {
        let count = counts.entry(r.remote.as_str()).or_insert_with(|| {
            order.push(r.remote.as_str());
            0
        });
        *count += 1;
    }

    let mut result: Vec<ModeCount> = order
        .into_iter()
        .map(|mode| ModeCount {
            mode: mode.to_string(),
            count: counts[mode],
        })
        .collect();
    result.sort_by(|a, b| b.count.cmp(&a.count));
    result
}

/// Mean compensation per country among rows whose title is exactly `title`,
/// sorted by country code. Rows with a blank country are left out.
pub fn country_means_for_title(view: &FilteredView<'_>, title: &str) -> Vec<CountryMean> {
    let rows = view
        .records()
        .filter(|r| r.title == title && !r.country.is_empty())
        .map(|r| (r.country.as_str(), r.usd));

    grouped_means(rows)
        .into_iter()
        .map(|(country, mean_usd)| CountryMean { country, mean_usd })
        .collect()
}

/// Group (key, value) pairs by key and average the values. Keys come back
/// sorted.
fn grouped_means<'r>(rows: impl Iterator<Item = (&'r str, f64)>) -> Vec<(String, f64)> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for (key, value) in rows {
        let entry = groups.entry(key).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(key, (sum, count))| (key.to_string(), sum / count as f64))
        .collect()
}
