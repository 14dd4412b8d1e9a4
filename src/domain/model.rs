use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One contract disclosure entry as returned by the datastore. No schema is
/// enforced; fields are read defensively by the consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

/// Response envelope of a `datastore_search` call. The `result` path is
/// absent in some error-ish payloads, so everything defaults to empty.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub result: SearchResult,
}

/// One page of search results plus pagination metadata.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Aggregate statistics over one accumulated result set.
///
/// `average_value` is NaN when no record carried a parseable
/// `contract_value`. `top_vendors` holds at most five entries, descending by
/// count, ties in first-seen order.
#[derive(Debug, Clone)]
pub struct Summary {
    pub average_value: f64,
    pub frequency: usize,
    pub top_vendors: Vec<(String, usize)>,
}

/// Transform-stage output: the fetched records, their summary (`None` when
/// nothing was fetched) and the CSV rendering used by the load stage.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub records: Vec<Record>,
    pub summary: Option<Summary>,
    pub csv_output: String,
}
