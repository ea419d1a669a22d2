// 🔍 Deduplication - drop repeated comment text across passes
// Stable: the first record with a given text (in pass order) is kept

use crate::dataset::ClassifiedRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// DUPLICATE MATCH RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    /// Index (in the input) of the record that was kept
    pub kept_index: usize,

    /// Index (in the input) of the record that was dropped
    pub dropped_index: usize,

    /// Human-readable reason
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct DedupResult {
    pub kept: Vec<ClassifiedRecord>,
    pub duplicates: Vec<DuplicateMatch>,
}

// ============================================================================
// DEDUPLICATION
// ============================================================================

/// Remove records whose comment text was already seen. Comparison is
/// byte-exact; no trimming or case folding.
pub fn dedup_by_comment(records: Vec<ClassifiedRecord>) -> DedupResult {
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut result = DedupResult::default();

    for (index, record) in records.into_iter().enumerate() {
        if let Some(&kept_index) = first_seen.get(&record.comment) {
            result.duplicates.push(DuplicateMatch {
                kept_index,
                dropped_index: index,
                reason: format!(
                    "Duplicate comment text of record {} (post {})",
                    kept_index, record.post.post_id
                ),
            });
            continue;
        }

        first_seen.insert(record.comment.clone(), index);
        result.kept.push(record);
    }

    result
}

// ============================================================================
// TESTS
// ============================================================================
