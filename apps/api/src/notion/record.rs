//! Flat record view of a Notion page: field name → scalar string.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::notion::{Page, FIELD_DATE_OF_APPLICATION};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record(BTreeMap<String, String>);

impl Record {
    pub fn from_page(page: &Page) -> Self {
        Record(
            page.properties
                .iter()
                .map(|(name, value)| (name.clone(), value.as_scalar()))
                .collect(),
        )
    }

    /// Field lookup; missing fields read as empty, matching the store's
    /// behavior for a property with no value.
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }
}

impl FromIterator<(String, String)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Record(iter.into_iter().collect())
    }
}

/// Sorts records by "Date of application" descending. ISO-8601 dates sort
/// lexicographically, so string ordering is chronological ordering.
pub fn sort_by_application_date(records: &mut [Record]) {
    records.sort_by(|a, b| {
        b.get(FIELD_DATE_OF_APPLICATION)
            .cmp(a.get(FIELD_DATE_OF_APPLICATION))
    });
}
