//! Fuzzy code-duplication detection.
//!
//! Normalize -> window -> hash -> verify: non-comment lines collapse to a
//! canonical form, a sliding window of four lines hashes into buckets,
//! and every candidate pair is confirmed with Jaccard word similarity
//! before it is reported. A bounded quadratic pass additionally catches
//! near-duplicates whose hashes differ. Deterministic: the same text
//! always yields the same match list.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::extract::lines::{classify_lines, LineKind};
use crate::profile::LanguageProfile;

/// Lines per comparison window.
const WINDOW: usize = 4;
/// Confirmed-match similarity floor.
const MIN_SIMILARITY: f64 = 0.80;
/// The quadratic near-duplicate scan stops above this many windows.
const QUADRATIC_LIMIT: usize = 512;
/// At most this many matches are reported, best first.
const MAX_REPORTED: usize = 5;

/// One confirmed duplicate region pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateMatch {
    /// 1-based starting line of the earlier window.
    pub line_a: usize,
    /// 1-based starting line of the later window.
    pub line_b: usize,
    pub window: usize,
    pub similarity: f64,
}

struct NormalizedWindow {
    start_line: usize,
    joined: String,
    hash: u64,
}

/// Detect duplicated regions in a file.
pub fn analyze(text: &str, profile: &LanguageProfile) -> Vec<DuplicateMatch> {
    let windows = build_windows(text, profile);
    if windows.len() < 2 {
        return Vec::new();
    }

    // Hash-bucket candidates first.
    let mut buckets: HashMap<u64, Vec<usize>> = HashMap::new();
    for (idx, w) in windows.iter().enumerate() {
        buckets.entry(w.hash).or_default().push(idx);
    }

    let mut candidates: BTreeSet<(usize, usize)> = BTreeSet::new();
    for indices in buckets.values() {
        for (pos, &i) in indices.iter().enumerate() {
            for &j in &indices[pos + 1..] {
                if disjoint(i, j) {
                    candidates.insert((i.min(j), i.max(j)));
                }
            }
        }
    }

    // Bounded quadratic pass for near-duplicates with differing hashes.
    if windows.len() <= QUADRATIC_LIMIT {
        for i in 0..windows.len() {
            for j in (i + WINDOW)..windows.len() {
                candidates.insert((i, j));
            }
        }
    }

    let mut matches = Vec::new();
    let mut reported: HashSet<(usize, usize)> = HashSet::new();
    for (i, j) in candidates {
        let similarity = jaccard(&windows[i].joined, &windows[j].joined);
        if similarity < MIN_SIMILARITY {
            continue;
        }
        let key = (windows[i].start_line, windows[j].start_line);
        if !reported.insert(key) {
            continue;
        }
        matches.push(DuplicateMatch {
            line_a: key.0,
            line_b: key.1,
            window: WINDOW,
            similarity,
        });
    }

    matches.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.line_a.cmp(&b.line_a))
            .then(a.line_b.cmp(&b.line_b))
    });
    matches.truncate(MAX_REPORTED);
    matches
}

/// Sliding windows over normalized code lines, keeping original line
/// numbers.
fn build_windows(text: &str, profile: &LanguageProfile) -> Vec<NormalizedWindow> {
    let kinds = classify_lines(text, profile);
    let mut kept: Vec<(usize, String)> = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if kinds.get(idx) == Some(&LineKind::Code) {
            kept.push((idx + 1, normalize(line)));
        }
    }

    let mut windows = Vec::new();
    if kept.len() < WINDOW {
        return windows;
    }
    for chunk in kept.windows(WINDOW) {
        let joined = chunk
            .iter()
            .map(|(_, l)| l.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let mut hasher = DefaultHasher::new();
        joined.hash(&mut hasher);
        windows.push(NormalizedWindow {
            start_line: chunk[0].0,
            hash: hasher.finish(),
            joined,
        });
    }
    windows
}

/// Collapse whitespace runs and lower-case.
fn normalize(line: &str) -> String {
    line.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Overlapping windows trivially match; require full separation.
fn disjoint(i: usize, j: usize) -> bool {
    i.abs_diff(j) >= WINDOW
}

/// Shared-word ratio between two normalized window texts.
fn jaccard(a: &str, b: &str) -> f64 {
    let set_a: HashSet<&str> = a.split_whitespace().collect();
    let set_b: HashSet<&str> = b.split_whitespace().collect();
    if set_a.is_empty() && set_b.is_empty() {
        return 1.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}
