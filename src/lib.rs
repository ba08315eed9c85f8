/// SalaryDash - Salary Dashboard Engine
///
/// The filter-and-aggregate core behind an interactive dashboard of
/// data-industry salaries. A dataset is loaded once into a `RecordStore`;
/// every change to the user's `FilterCriteria` recomputes a `FilteredView`,
/// its summary `Metrics` and the `ChartData` a renderer draws from.
///
/// Rendering is not part of this crate. With the `server` feature the
/// computed results are served as JSON over HTTP and WebSocket.

pub mod error;
pub mod record;
pub mod source;
pub mod store;
pub mod criteria;
pub mod view;
pub mod metrics;
pub mod charts;
pub mod session;
pub mod config;
pub mod messages;

pub use error::{ConfigError, CriteriaError, LoadError};
pub use record::{FilterColumn, FilterValue, Record};
pub use source::{DataSource, DEFAULT_SOURCE_URL};
pub use store::RecordStore;
pub use criteria::FilterCriteria;
pub use view::{filter, FilteredView};
pub use metrics::{format_usd, summarize, MetricTile, Metrics};
pub use charts::{aggregate, ChartData, CountryMean, ModeCount, Panel, TitleMean, REFERENCE_TITLE, TOP_TITLES_LIMIT};
pub use session::{compute_dashboard, Dashboard, FilterOptions, Session};

// WebSocket server modules - only when server feature is enabled
#[cfg(feature = "server")]
pub mod websocket;
#[cfg(feature = "server")]
pub mod server;
