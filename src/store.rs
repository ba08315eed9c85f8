/// SalaryDash Record Store
///
/// The store holds every record of the dataset in memory, in source order.
/// It is built once per session and is read-only afterwards; filters and
/// aggregations only ever borrow it.
///
/// # Examples
///
/// ```
/// use salarydash::{FilterColumn, FilterValue, RecordStore};
///
/// let csv = "ano,senioridade,contrato,tamanho_empresa,cargo,remoto,residencia_iso3,usd\n\
///            2024,senior,integral,grande,Data Scientist,remoto,USA,150000\n\
///            2023,junior,integral,pequena,Analyst,presencial,BRA,40000\n";
/// let store = RecordStore::from_csv(csv).unwrap();
///
/// assert_eq!(store.len(), 2);
/// assert_eq!(
///     store.distinct_values(FilterColumn::Year),
///     vec![FilterValue::Year(2023), FilterValue::Year(2024)]
/// );
/// ```

use crate::error::LoadError;
use crate::record::{self, FilterColumn, FilterValue, Record, REQUIRED_COLUMNS};
use crate::source::DataSource;
use log::{info, warn};
use std::collections::{BTreeSet, HashMap};

/// In-memory, immutable table of salary records.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Load the store from a source. A failure is final: no partial store is
    /// ever returned.
    pub fn load(source: &DataSource) -> Result<Self, LoadError> {
        let result = source.fetch().and_then(|text| Self::from_csv(&text));
        match &result {
            Ok(store) => info!("loaded {} salary records from {}", store.len(), source),
            Err(e) => warn!("failed to load salary records from {}: {}", source, e),
        }
        result
    }

    /// Build a store from already typed records.
    pub fn from_records(records: Vec<Record>) -> Self {
        RecordStore { records }
    }

    /// Parse a store from CSV text.
    ///
    /// The first line is the header. Columns are matched by name, so their
    /// order is free and extra columns are ignored. Every name in
    /// `REQUIRED_COLUMNS` must be present. Year, seniority, contract,
    /// company size and compensation must be non-empty on every row; the
    /// remaining text fields may be empty. Blank lines are skipped.
    pub fn from_csv(csv: &str) -> Result<Self, LoadError> {
        let mut all_rows = parse_csv_rows(csv);

        if all_rows.is_empty() {
            return Err(LoadError::Empty);
        }

        let header: Vec<String> = all_rows.remove(0).into_iter().map(|h| h.trim().to_string()).collect();
        if header.iter().all(|h| h.is_empty()) {
            return Err(LoadError::Empty);
        }
        let layout = ColumnLayout::from_header(&header)?;

        let mut records = Vec::with_capacity(all_rows.len());
        for (i, row) in all_rows.iter().enumerate() {
            if row.iter().all(|f| f.trim().is_empty()) {
                continue;
            }
            let record = layout
                .build_record(row, header.len())
                .map_err(|message| LoadError::Malformed { line: i + 1, message })?;
            records.push(record);
        }

        Ok(RecordStore { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Distinct values of a filter column, sorted in the column's natural
    /// order (ascending years, lexicographic labels).
    pub fn distinct_values(&self, column: FilterColumn) -> Vec<FilterValue> {
        match column {
            FilterColumn::Year => self.distinct_years().into_iter().map(FilterValue::Year).collect(),
            _ => self
                .distinct_labels(column)
                .into_iter()
                .map(FilterValue::Label)
                .collect(),
        }
    }

    pub fn distinct_years(&self) -> BTreeSet<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// Distinct labels of a categorical column. Empty for `Year`.
    pub fn distinct_labels(&self, column: FilterColumn) -> BTreeSet<String> {
        self.records
            .iter()
            .filter_map(|r| r.label(column))
            .map(str::to_string)
            .collect()
    }

    /// Returns true if `value` occurs in `column`.
    pub fn contains_value(&self, column: FilterColumn, value: &FilterValue) -> bool {
        match column {
            FilterColumn::Year => match value.as_year() {
                Some(year) => self.records.iter().any(|r| r.year == year),
                None => false,
            },
            _ => match value.as_label() {
                Some(label) => self.records.iter().any(|r| r.label(column) == Some(label)),
                None => false,
            },
        }
    }
}


// ============================================================================
// CSV parsing helpers
// ============================================================================

/// Position of each required column in the header.
struct ColumnLayout {
    positions: HashMap<&'static str, usize>,
}

impl ColumnLayout {
    fn from_header(header: &[String]) -> Result<Self, LoadError> {
        let mut positions = HashMap::new();
        let mut missing = Vec::new();

        for name in REQUIRED_COLUMNS {
            match header.iter().position(|h| h == name) {
                Some(idx) => {
                    positions.insert(name, idx);
                }
                None => missing.push(name.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(ColumnLayout { positions })
        } else {
            Err(LoadError::MissingColumns(missing))
        }
    }

    fn field<'r>(&self, row: &'r [String], name: &str) -> &'r str {
        self.positions
            .get(name)
            .and_then(|&idx| row.get(idx))
            .map(|s| s.trim())
            .unwrap_or("")
    }

    fn required<'r>(&self, row: &'r [String], name: &str) -> Result<&'r str, String> {
        let value = self.field(row, name);
        if value.is_empty() {
            Err(format!("Missing value for column '{}'", name))
        } else {
            Ok(value)
        }
    }

    fn build_record(&self, row: &[String], expected_fields: usize) -> Result<Record, String> {
        if row.len() != expected_fields {
            return Err(format!(
                "Column count mismatch: header has {}, but row has {} values",
                expected_fields,
                row.len()
            ));
        }

        let year_str = self.required(row, record::YEAR)?;
        let year = parse_year(year_str)?;

        let usd_str = self.required(row, record::USD)?;
        let usd: f64 = usd_str
            .parse()
            .map_err(|_| format!("Cannot parse '{}' as compensation", usd_str))?;
        if !usd.is_finite() {
            return Err(format!("Cannot parse '{}' as compensation", usd_str));
        }
        if usd < 0.0 {
            return Err(format!("Compensation must not be negative, got '{}'", usd_str));
        }

        Ok(Record {
            year,
            seniority: self.required(row, record::SENIORITY)?.to_string(),
            contract: self.required(row, record::CONTRACT)?.to_string(),
            company_size: self.required(row, record::COMPANY_SIZE)?.to_string(),
            title: self.field(row, record::TITLE).to_string(),
            remote: self.field(row, record::REMOTE).to_string(),
            country: self.field(row, record::COUNTRY).to_string(),
            usd,
        })
    }
}

/// Years may be written as floats ("2023.0") by dataframe exports.
fn parse_year(value: &str) -> Result<i32, String> {
    if let Ok(year) = value.parse::<i32>() {
        return Ok(year);
    }
    match value.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => Ok(f as i32),
        _ => Err(format!("Cannot parse '{}' as year", value)),
    }
}

/// Parse a CSV string into rows, handling quoted fields with embedded newlines
fn parse_csv_rows(csv: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut current_row = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut chars = csv.trim_start_matches('\u{feff}').chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current_field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                current_row.push(std::mem::take(&mut current_field));
            }
            '\n' if !in_quotes => {
                current_row.push(std::mem::take(&mut current_field));
                rows.push(std::mem::take(&mut current_row));
            }
            // \r\n line endings
            '\r' if !in_quotes => {}
            _ => current_field.push(c),
        }
    }

    if !current_field.is_empty() || !current_row.is_empty() {
        current_row.push(current_field);
        rows.push(current_row);
    }

    rows
}
