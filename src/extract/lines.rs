//! Shared blank/comment/code line classification.
//!
//! All three extraction tiers use this scanner so that line accounting is
//! consistent regardless of which backend produced the structure. A line is
//! blank when empty after trimming, comment when it begins with a
//! single-line marker or sits inside a multi-line comment/doc-string
//! region, code otherwise. Block regions are tracked with a toggling state
//! that follows delimiter occurrences in order, which handles symmetric
//! delimiters (Python's triple quotes) and `/* ... */` pairs alike.

use crate::profile::LanguageProfile;

/// Classification of a single source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Code,
}

/// Aggregate line counts for a file. `code + comment + blank == total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineCounts {
    pub total: usize,
    pub code: usize,
    pub comment: usize,
    pub blank: usize,
}

/// Classify every line of `text`. An empty input classifies as a single
/// blank line so that downstream totals are never zero.
pub fn classify_lines(text: &str, profile: &LanguageProfile) -> Vec<LineKind> {
    if text.is_empty() {
        return vec![LineKind::Blank];
    }

    let mut kinds = Vec::new();
    // Index into profile.block_comment for the currently open region.
    let mut open_block: Option<usize> = None;

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            kinds.push(LineKind::Blank);
            continue;
        }

        let was_in_block = open_block.is_some();
        let starts_line_comment = !was_in_block
            && profile
                .line_comment
                .iter()
                .any(|m| trimmed.starts_with(m));

        if starts_line_comment {
            kinds.push(LineKind::Comment);
            continue;
        }

        let starts_block = !was_in_block
            && profile
                .block_comment
                .iter()
                .any(|(open, _)| trimmed.starts_with(open));

        // Only the portion before a trailing line comment participates in
        // block-state transitions.
        let scan_region = profile
            .line_comment
            .iter()
            .filter_map(|m| line.find(m))
            .min()
            .map(|idx| &line[..idx])
            .unwrap_or(line);
        advance_block_state(scan_region, profile, &mut open_block);

        if was_in_block || starts_block {
            kinds.push(LineKind::Comment);
        } else {
            kinds.push(LineKind::Code);
        }
    }

    kinds
}

/// Count blank/comment/code lines using [`classify_lines`].
pub fn count_lines(text: &str, profile: &LanguageProfile) -> LineCounts {
    let kinds = classify_lines(text, profile);
    let mut counts = LineCounts {
        total: kinds.len(),
        ..LineCounts::default()
    };
    for kind in kinds {
        match kind {
            LineKind::Blank => counts.blank += 1,
            LineKind::Comment => counts.comment += 1,
            LineKind::Code => counts.code += 1,
        }
    }
    counts
}

/// Walk delimiter occurrences left to right, toggling the open-region
/// state. Opening and closing markers of the active pair are consumed in
/// order, so `*/ code /*` and an odd count of `"""` both land in the right
/// state.
fn advance_block_state(
    line: &str,
    profile: &LanguageProfile,
    open_block: &mut Option<usize>,
) {
    let mut pos = 0;
    loop {
        match *open_block {
            Some(pair_idx) => {
                let (_, close) = profile.block_comment[pair_idx];
                match line[pos..].find(close) {
                    Some(rel) => {
                        pos += rel + close.len();
                        *open_block = None;
                    }
                    None => return,
                }
            }
            None => {
                // Earliest opening marker of any pair wins.
                let next = profile
                    .block_comment
                    .iter()
                    .enumerate()
                    .filter_map(|(i, (open, _))| {
                        line[pos..].find(open).map(|rel| (rel, i, open.len()))
                    })
                    .min();
                match next {
                    Some((rel, pair_idx, open_len)) => {
                        pos += rel + open_len;
                        *open_block = Some(pair_idx);
                    }
                    None => return,
                }
            }
        }
    }
}
