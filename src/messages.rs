/// Message types exchanged with the presentation layer
use crate::criteria::FilterCriteria;
use crate::error::CriteriaError;
use crate::record::{FilterColumn, FilterValue, Record};
use crate::session::{Dashboard, FilterOptions};
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};

/// Criteria as sent by a client. An omitted column means "every value".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriteriaRequest {
    #[serde(default)]
    pub years: Option<Vec<FilterValue>>,
    #[serde(default)]
    pub seniorities: Option<Vec<FilterValue>>,
    #[serde(default)]
    pub contracts: Option<Vec<FilterValue>>,
    #[serde(default)]
    pub sizes: Option<Vec<FilterValue>>,
}

impl CriteriaRequest {
    /// Resolve against a store, rejecting values the store does not hold.
    pub fn into_criteria(self, store: &RecordStore) -> Result<FilterCriteria, CriteriaError> {
        let mut criteria = FilterCriteria::all(store);
        let selections = [
            (FilterColumn::Year, self.years),
            (FilterColumn::Seniority, self.seniorities),
            (FilterColumn::Contract, self.contracts),
            (FilterColumn::CompanySize, self.sizes),
        ];
        for (column, values) in selections {
            if let Some(values) = values {
                criteria.set(column, values)?;
            }
        }
        criteria.validate(store)?;
        Ok(criteria)
    }
}

/// Messages sent from client to server
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Request the selection widgets' options
    Options,

    /// Replace the selection of one filter column
    Select {
        column: FilterColumn,
        values: Vec<FilterValue>,
    },

    /// Restore the default selections
    Reset,

    /// Request the dashboard for the current selections
    Dashboard,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    Options { filters: Vec<FilterOptions> },

    Dashboard { dashboard: Dashboard },

    Error { message: String },
}

/// Filtered rows for the detailed data table.
#[derive(Debug, Clone, Serialize)]
pub struct RecordsResponse<'a> {
    pub count: usize,
    pub records: Vec<&'a Record>,
}
