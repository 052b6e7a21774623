//! Second-pass gene consolidation: one representative record per gene.
//!
//! The knowledge base maps gene names one-to-one, so the streaming pass
//! deliberately does not deduplicate; this batch pass over the fully
//! materialized record list does, preserving first-seen gene order.

use fxhash::FxHashMap;
use serde_json::Value;

use crate::consts::{DEEP_DELETION, PREFERRED_SOURCE};

/// Group `records` by their `gene` field and pick one representative per
/// gene, in first-seen gene order. Within a group the precedence is:
/// first deep deletion, else first preferred-source + canonical entry,
/// else first preferred-source entry, else the first entry.
pub fn consolidate_by_gene(records: Vec<Value>) -> Vec<Value> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: FxHashMap<String, Vec<Value>> = FxHashMap::default();
    for record in records {
        let gene = record
            .get("gene")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if !groups.contains_key(&gene) {
            order.push(gene.clone());
        }
        groups.entry(gene).or_default().push(record);
    }

    order
        .into_iter()
        .filter_map(|gene| groups.remove(&gene))
        .map(pick_representative)
        .collect()
}

fn pick_representative(mut entries: Vec<Value>) -> Value {
    if let Some(i) = entries.iter().position(is_deep_deletion) {
        return entries.swap_remove(i);
    }
    if let Some(i) = entries
        .iter()
        .position(|e| is_preferred_source(e) && is_canonical(e))
    {
        return entries.swap_remove(i);
    }
    if let Some(i) = entries.iter().position(is_preferred_source) {
        return entries.swap_remove(i);
    }
    entries.swap_remove(0)
}

fn is_deep_deletion(entry: &Value) -> bool {
    entry.get("kbCategory").and_then(Value::as_str) == Some(DEEP_DELETION)
}

fn is_preferred_source(entry: &Value) -> bool {
    entry.get("source").and_then(Value::as_str) == Some(PREFERRED_SOURCE)
}

fn is_canonical(entry: &Value) -> bool {
    entry.get("isCanonical").and_then(Value::as_bool) == Some(true)
}
