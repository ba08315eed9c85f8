/// SalaryDash Record Implementation
///
/// A Record is one salary observation. Records are loaded once into a
/// `RecordStore` and never modified afterwards.
///
/// Four columns are filterable: year, seniority, contract type and company
/// size. Each filterable column has a value type with a natural order
/// (numeric for years, lexicographic for the text labels), exposed through
/// `FilterValue`.

use crate::error::CriteriaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Source column names. These are a fixed contract with the published dataset.
pub const YEAR: &str = "ano";
pub const TITLE: &str = "cargo";
pub const SENIORITY: &str = "senioridade";
pub const CONTRACT: &str = "contrato";
pub const COMPANY_SIZE: &str = "tamanho_empresa";
pub const REMOTE: &str = "remoto";
pub const COUNTRY: &str = "residencia_iso3";
pub const USD: &str = "usd";

/// Every column a source must provide, in export order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    YEAR,
    SENIORITY,
    CONTRACT,
    COMPANY_SIZE,
    TITLE,
    REMOTE,
    COUNTRY,
    USD,
];

/// One salary observation.
///
/// Serializes with the source column names so exported rows look like the
/// dataset they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "senioridade")]
    pub seniority: String,
    #[serde(rename = "contrato")]
    pub contract: String,
    #[serde(rename = "tamanho_empresa")]
    pub company_size: String,
    #[serde(rename = "cargo")]
    pub title: String,
    #[serde(rename = "remoto")]
    pub remote: String,
    #[serde(rename = "residencia_iso3")]
    pub country: String,
    /// Annual compensation in USD
    pub usd: f64,
}

impl Record {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        seniority: &str,
        contract: &str,
        company_size: &str,
        title: &str,
        remote: &str,
        country: &str,
        usd: f64,
    ) -> Self {
        Record {
            year,
            seniority: seniority.to_string(),
            contract: contract.to_string(),
            company_size: company_size.to_string(),
            title: title.to_string(),
            remote: remote.to_string(),
            country: country.to_string(),
            usd,
        }
    }

    /// Returns the text label of a categorical filter column, or None for `Year`.
    pub fn label(&self, column: FilterColumn) -> Option<&str> {
        match column {
            FilterColumn::Year => None,
            FilterColumn::Seniority => Some(&self.seniority),
            FilterColumn::Contract => Some(&self.contract),
            FilterColumn::CompanySize => Some(&self.company_size),
        }
    }
}

/// The four columns a user can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterColumn {
    Year,
    Seniority,
    Contract,
    CompanySize,
}

impl FilterColumn {
    pub const ALL: [FilterColumn; 4] = [
        FilterColumn::Year,
        FilterColumn::Seniority,
        FilterColumn::Contract,
        FilterColumn::CompanySize,
    ];

    /// Label for the selection widget.
    pub fn label(&self) -> &'static str {
        match self {
            FilterColumn::Year => "Years",
            FilterColumn::Seniority => "Seniority",
            FilterColumn::Contract => "Contract type",
            FilterColumn::CompanySize => "Company size",
        }
    }
}

impl fmt::Display for FilterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterColumn::Year => "year",
            FilterColumn::Seniority => "seniority",
            FilterColumn::Contract => "contract",
            FilterColumn::CompanySize => "company_size",
        };
        f.write_str(name)
    }
}

impl FromStr for FilterColumn {
    type Err = CriteriaError;

    /// Accepts the English names as well as the source column names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "year" | "years" | "ano" => Ok(FilterColumn::Year),
            "seniority" | "senioridade" => Ok(FilterColumn::Seniority),
            "contract" | "contrato" => Ok(FilterColumn::Contract),
            "company_size" | "companysize" | "size" | "tamanho_empresa" => {
                Ok(FilterColumn::CompanySize)
            }
            _ => Err(CriteriaError::UnknownColumn(s.to_string())),
        }
    }
}

/// A value of a filterable column.
///
/// Years order numerically and labels lexicographically. A single column
/// only ever holds one variant, so the cross-variant order never matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Year(i32),
    Label(String),
}

impl FilterValue {
    /// Returns the year, accepting a numeric label such as `"2023"`.
    pub fn as_year(&self) -> Option<i32> {
        match self {
            FilterValue::Year(y) => Some(*y),
            FilterValue::Label(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            FilterValue::Label(s) => Some(s),
            FilterValue::Year(_) => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Year(y) => write!(f, "{}", y),
            FilterValue::Label(s) => f.write_str(s),
        }
    }
}

impl From<i32> for FilterValue {
    fn from(year: i32) -> Self {
        FilterValue::Year(year)
    }
}

impl From<&str> for FilterValue {
    fn from(label: &str) -> Self {
        FilterValue::Label(label.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(label: String) -> Self {
        FilterValue::Label(label)
    }
}
