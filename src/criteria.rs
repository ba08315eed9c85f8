/// Filter criteria: one set of allowed values per filterable column.
///
/// An empty set selects nothing. It is never read as "no filter", so a
/// user who clears a selection sees an empty dashboard.

use crate::error::CriteriaError;
use crate::record::{FilterColumn, FilterValue, Record};
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub years: BTreeSet<i32>,
    pub seniorities: BTreeSet<String>,
    pub contracts: BTreeSet<String>,
    pub sizes: BTreeSet<String>,
}

impl FilterCriteria {
    /// Criteria that match no record.
    pub fn empty() -> Self {
        FilterCriteria {
            years: BTreeSet::new(),
            seniorities: BTreeSet::new(),
            contracts: BTreeSet::new(),
            sizes: BTreeSet::new(),
        }
    }

    /// Default criteria: every value present in the store is selected.
    pub fn all(store: &RecordStore) -> Self {
        FilterCriteria {
            years: store.distinct_years(),
            seniorities: store.distinct_labels(FilterColumn::Seniority),
            contracts: store.distinct_labels(FilterColumn::Contract),
            sizes: store.distinct_labels(FilterColumn::CompanySize),
        }
    }

    /// Membership test for a single record.
    #[inline]
    pub fn matches(&self, record: &Record) -> bool {
        self.years.contains(&record.year)
            && self.seniorities.contains(&record.seniority)
            && self.contracts.contains(&record.contract)
            && self.sizes.contains(&record.company_size)
    }

    /// Returns true if any column has an empty selection.
    pub fn selects_nothing(&self) -> bool {
        self.years.is_empty()
            || self.seniorities.is_empty()
            || self.contracts.is_empty()
            || self.sizes.is_empty()
    }

    /// Current selection of a column, in natural order.
    pub fn values(&self, column: FilterColumn) -> Vec<FilterValue> {
        match column {
            FilterColumn::Year => self.years.iter().copied().map(FilterValue::Year).collect(),
            _ => self
                .labels(column)
                .map(|labels| labels.iter().cloned().map(FilterValue::Label).collect())
                .unwrap_or_default(),
        }
    }

    /// Replace the selection of one column.
    ///
    /// Values are only checked for type here; use `validate` to check them
    /// against a store.
    pub fn set<I>(&mut self, column: FilterColumn, values: I) -> Result<(), CriteriaError>
    where
        I: IntoIterator<Item = FilterValue>,
    {
        match column {
            FilterColumn::Year => {
                let mut years = BTreeSet::new();
                for value in values {
                    let year = value.as_year().ok_or_else(|| unknown(column, &value))?;
                    years.insert(year);
                }
                self.years = years;
            }
            _ => {
                let mut labels = BTreeSet::new();
                for value in values {
                    match value {
                        FilterValue::Label(label) => {
                            labels.insert(label);
                        }
                        other => return Err(unknown(column, &other)),
                    }
                }
                if let Some(target) = self.labels_mut(column) {
                    *target = labels;
                }
            }
        }
        Ok(())
    }

    /// Check that every selected value exists in the store.
    pub fn validate(&self, store: &RecordStore) -> Result<(), CriteriaError> {
        for column in FilterColumn::ALL {
            for value in self.values(column) {
                if !store.contains_value(column, &value) {
                    return Err(unknown(column, &value));
                }
            }
        }
        Ok(())
    }

    fn labels(&self, column: FilterColumn) -> Option<&BTreeSet<String>> {
        match column {
            FilterColumn::Year => None,
            FilterColumn::Seniority => Some(&self.seniorities),
            FilterColumn::Contract => Some(&self.contracts),
            FilterColumn::CompanySize => Some(&self.sizes),
        }
    }

    fn labels_mut(&mut self, column: FilterColumn) -> Option<&mut BTreeSet<String>> {
        match column {
            FilterColumn::Year => None,
            FilterColumn::Seniority => Some(&mut self.seniorities),
            FilterColumn::Contract => Some(&mut self.contracts),
            FilterColumn::CompanySize => Some(&mut self.sizes),
        }
    }
}

fn unknown(column: FilterColumn, value: &FilterValue) -> CriteriaError {
    CriteriaError::UnknownValue {
        column: column.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        RecordStore::from_records(vec![
            Record::new(2023, "senior", "full-time", "large", "Data Scientist", "remote", "USA", 150000.0),
            Record::new(2023, "junior", "full-time", "small", "Analyst", "onsite", "BRA", 40000.0),
            Record::new(2021, "mid", "contract", "medium", "Data Engineer", "hybrid", "DEU", 80000.0),
        ])
    }

    #[test]
    fn test_all_selects_every_distinct_value() {
        let s = store();
        let criteria = FilterCriteria::all(&s);
        assert_eq!(criteria.years.iter().copied().collect::<Vec<_>>(), vec![2021, 2023]);
        assert_eq!(criteria.sizes.len(), 3);
        assert!(s.iter().all(|r| criteria.matches(r)));
        assert!(!criteria.selects_nothing());
    }

    #[test]
    fn test_empty_matches_nothing() {
        let s = store();
        let criteria = FilterCriteria::empty();
        assert!(criteria.selects_nothing());
        assert!(s.iter().all(|r| !criteria.matches(r)));
    }

    #[test]
    fn test_set_replaces_selection() {
        let s = store();
        let mut criteria = FilterCriteria::all(&s);
        criteria.set(FilterColumn::CompanySize, vec![FilterValue::from("large")]).unwrap();
        assert_eq!(criteria.values(FilterColumn::CompanySize), vec![FilterValue::from("large")]);

        criteria.set(FilterColumn::Year, vec![FilterValue::from("2021")]).unwrap();
        assert_eq!(criteria.values(FilterColumn::Year), vec![FilterValue::Year(2021)]);

        criteria.set(FilterColumn::Seniority, Vec::new()).unwrap();
        assert!(criteria.selects_nothing());
    }

    #[test]
    fn test_set_rejects_wrong_type() {
        let mut criteria = FilterCriteria::empty();
        assert!(criteria.set(FilterColumn::Year, vec![FilterValue::from("recent")]).is_err());
        assert!(criteria.set(FilterColumn::Contract, vec![FilterValue::Year(2023)]).is_err());
    }

    #[test]
    fn test_validate_against_store() {
        let s = store();
        let mut criteria = FilterCriteria::all(&s);
        assert!(criteria.validate(&s).is_ok());

        criteria.set(FilterColumn::Contract, vec![FilterValue::from("internship")]).unwrap();
        assert_eq!(
            criteria.validate(&s),
            Err(CriteriaError::UnknownValue {
                column: "contract".to_string(),
                value: "internship".to_string(),
            })
        );
    }

    #[test]
    fn test_criteria_json_round_trip_shape() {
        let criteria = FilterCriteria::all(&store());
        let json = serde_json::to_value(&criteria).unwrap();
        assert_eq!(json["years"], serde_json::json!([2021, 2023]));
        assert_eq!(json["contracts"], serde_json::json!(["contract", "full-time"]));
    }
}
