use crate::domain::model::{Record, Summary};
use std::collections::HashMap;

const TOP_VENDOR_LIMIT: usize = 5;

/// Parse the `contract_value` field of a record.
///
/// A missing field (or JSON null) counts as zero; a value that is present
/// but not numeric is excluded from the mean entirely.
pub fn parse_contract_value(record: &Record) -> Option<f64> {
    match record.data.get("contract_value") {
        None | Some(serde_json::Value::Null) => Some(0.0),
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    }
}

/// Compute aggregate statistics over one result set.
///
/// Returns `None` for an empty result set, so callers must branch on the
/// "no records" case instead of reading zeroed statistics.
pub fn summarize(records: &[Record]) -> Option<Summary> {
    if records.is_empty() {
        return None;
    }

    let mut sum = 0.0;
    let mut parsed = 0usize;
    for record in records {
        if let Some(value) = parse_contract_value(record) {
            sum += value;
            parsed += 1;
        }
    }
    // Mean over the parseable values only. NaN when nothing parsed.
    let average_value = if parsed > 0 {
        sum / parsed as f64
    } else {
        f64::NAN
    };

    Some(Summary {
        average_value,
        frequency: records.len(),
        top_vendors: top_vendors(records, TOP_VENDOR_LIMIT),
    })
}

/// Rank vendors by occurrence count, descending. Ties keep the order in
/// which the vendors were first seen.
fn top_vendors(records: &[Record], limit: usize) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        if let Some(name) = record.data.get("vendor_name").and_then(|v| v.as_str()) {
            match index.get(name) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(name.to_string(), counts.len());
                    counts.push((name.to_string(), 1));
                }
            }
        }
    }

    // Stable sort keeps first-seen order within equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}
