//! Record reconciliation
//!
//! Combines previously persisted records with freshly extracted ones into a
//! single collection holding one record per `(category, technology)` key.
//!
//! # Fill policy
//!
//! Sources are folded in order. For every field, a later value replaces an
//! earlier one only if it has content after trimming; blank values never
//! erase what an earlier source captured. Keys seen in any source are always
//! kept, so the dataset only grows across runs.
//!
//! Everything here is pure: no I/O, no errors, and inputs are never mutated.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::models::{RecordKey, TechRecord};
use crate::parser::sanitize::has_content;

/// Result of reconciling a base collection with new records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Merged records, sorted by identity key
    pub records: Vec<TechRecord>,

    /// Keys not present in the base collection
    pub added: usize,

    /// Keys present in the base whose fields were filled in or replaced
    pub backfilled: usize,

    /// Whether the merged records differ from the base collection
    pub changed: bool,
}

/// Merge `incoming` into `base` using the fill policy
///
/// The output holds one record per key, ordered by key.
pub fn merge(base: &[TechRecord], incoming: &[TechRecord]) -> Vec<TechRecord> {
    merge_all([base, incoming])
}

/// Merge any number of record collections, earliest first
///
/// Duplicate keys inside a single collection are folded with the same fill
/// policy as duplicates across collections.
pub fn merge_all<'a, I>(sources: I) -> Vec<TechRecord>
where
    I: IntoIterator<Item = &'a [TechRecord]>,
{
    let mut merged: BTreeMap<RecordKey, TechRecord> = BTreeMap::new();

    for record in sources.into_iter().flatten() {
        match merged.entry(record.key()) {
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
            }
            Entry::Occupied(mut slot) => {
                let filled = fill(slot.get(), record);
                slot.insert(filled);
            }
        }
    }

    merged.into_values().collect()
}

/// Field-level fill of `existing` with the non-blank fields of `newer`
pub fn fill(existing: &TechRecord, newer: &TechRecord) -> TechRecord {
    fn pick(old: &str, new: &str) -> String {
        let chosen = if has_content(new) { new } else { old };
        chosen.to_string()
    }

    TechRecord {
        category: pick(&existing.category, &newer.category),
        technology: pick(&existing.technology, &newer.technology),
        description: pick(&existing.description, &newer.description),
        tags: pick(&existing.tags, &newer.tags),
        first_detected: pick(&existing.first_detected, &newer.first_detected),
        last_detected: pick(&existing.last_detected, &newer.last_detected),
        emojis: pick(&existing.emojis, &newer.emojis),
    }
}

/// Sort records by `(category, technology)` using literal string order
///
/// Records sharing a key are further ordered by their remaining fields so
/// the result is deterministic.
pub fn sort_records(records: &mut [TechRecord]) {
    // Derived `Ord` compares fields in declaration order: category first,
    // then technology, then the rest.
    records.sort();
}

/// Whether `merged` differs from `current`, ignoring record order
pub fn has_changed(current: &[TechRecord], merged: &[TechRecord]) -> bool {
    if current.len() != merged.len() {
        return true;
    }

    let mut current = current.to_vec();
    let mut merged = merged.to_vec();
    sort_records(&mut current);
    sort_records(&mut merged);

    current != merged
}

/// Merge `incoming` into `base` and summarize what the merge did
pub fn reconcile(base: &[TechRecord], incoming: &[TechRecord]) -> Reconciliation {
    let records = merge(base, incoming);
    let changed = has_changed(base, &records);

    let before: BTreeMap<RecordKey, TechRecord> = merge_all([base])
        .into_iter()
        .map(|record| (record.key(), record))
        .collect();

    let mut added = 0;
    let mut backfilled = 0;
    for record in &records {
        match before.get(&record.key()) {
            None => added += 1,
            Some(previous) if previous != record => backfilled += 1,
            Some(_) => {}
        }
    }

    tracing::debug!(
        base = base.len(),
        incoming = incoming.len(),
        merged = records.len(),
        added,
        backfilled,
        changed,
        "Records reconciled"
    );

    Reconciliation {
        records,
        added,
        backfilled,
        changed,
    }
}
