// src/catalog/grouping.rs

use crate::catalog::normalize::{DEFAULT_CITY, DEFAULT_PHONE, NO_AGENCY_NAME};
use crate::catalog::record::ListingRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Group key for records without an owning agency.
pub const NO_AGENCY_KEY: &str = "no-agency";

/// Aggregate view of one agency within a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgencySummary {
    pub agency_id: String,
    pub name: String,
    pub city: String,
    pub phone: String,
    pub count: usize,
}

/// Agency selector on a grouped section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AgencyFilter {
    #[default]
    All,
    Agency(String),
}

impl AgencyFilter {
    /// `"all"` (or empty) selects everything, anything else is an agency id.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | "all" => AgencyFilter::All,
            id => AgencyFilter::Agency(id.to_string()),
        }
    }

    pub fn as_value(&self) -> &str {
        match self {
            AgencyFilter::All => "all",
            AgencyFilter::Agency(id) => id,
        }
    }
}

/// By-agency partition of a record list plus its summaries.
///
/// Groups hold indices into the list the index was built from, so the index
/// has to be rebuilt whenever that list is replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupingIndex {
    groups: HashMap<String, Vec<usize>>,
    summaries: Vec<AgencySummary>,
}

pub fn group_key(record: &ListingRecord) -> &str {
    record
        .agency
        .as_ref()
        .map(|a| a.id.as_str())
        .unwrap_or(NO_AGENCY_KEY)
}

impl GroupingIndex {
    pub fn build(records: &[ListingRecord]) -> Self {
        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        let mut summaries: Vec<AgencySummary> = Vec::new();

        for (i, record) in records.iter().enumerate() {
            let key = group_key(record);

            if !groups.contains_key(key) {
                let summary = match &record.agency {
                    Some(a) => AgencySummary {
                        agency_id: a.id.clone(),
                        name: a.name.clone(),
                        city: a.city.clone(),
                        phone: a.phone.clone(),
                        count: 0,
                    },
                    None => AgencySummary {
                        agency_id: NO_AGENCY_KEY.to_string(),
                        name: NO_AGENCY_NAME.to_string(),
                        city: DEFAULT_CITY.to_string(),
                        phone: DEFAULT_PHONE.to_string(),
                        count: 0,
                    },
                };
                summaries.push(summary);
            }

            groups.entry(key.to_string()).or_default().push(i);
        }

        for summary in &mut summaries {
            summary.count = groups.get(&summary.agency_id).map_or(0, Vec::len);
        }
        // sort_by is stable: equal counts keep encounter order
        summaries.sort_by(|a, b| b.count.cmp(&a.count));

        Self { groups, summaries }
    }

    pub fn summaries(&self) -> &[AgencySummary] {
        &self.summaries
    }

    /// Group keys in summary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.summaries.iter().map(|s| s.agency_id.as_str())
    }

    pub fn group_len(&self, key: &str) -> usize {
        self.groups.get(key).map_or(0, Vec::len)
    }

    /// Records of one group, in list order.
    pub fn group<'a>(&'a self, records: &'a [ListingRecord], key: &str) -> Vec<&'a ListingRecord> {
        self.groups
            .get(key)
            .map(|idx| idx.iter().filter_map(|&i| records.get(i)).collect())
            .unwrap_or_default()
    }

    /// Summaries selected by `filter`, in summary order.
    pub fn filtered<'a>(&'a self, filter: &AgencyFilter) -> Vec<&'a AgencySummary> {
        match filter {
            AgencyFilter::All => self.summaries.iter().collect(),
            AgencyFilter::Agency(id) => self
                .summaries
                .iter()
                .filter(|s| &s.agency_id == id)
                .collect(),
        }
    }

    pub fn total(&self) -> usize {
        self.summaries.iter().map(|s| s.count).sum()
    }
}
