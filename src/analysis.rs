//! Text analysis utilities shared by lexical retrieval and embedding.
//!
//! Tokenization uses Unicode word boundaries so that queries and documents
//! agree on term extraction regardless of punctuation or script.

use unicode_segmentation::UnicodeSegmentation;

/// Split text into lowercase word tokens on Unicode word boundaries.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

/// Calculate the Levenshtein distance between two strings.
///
/// This is the minimum number of single-character edits (insertions,
/// deletions, or substitutions) required to change one word into another.
/// Operates on characters, not bytes.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row dynamic programming: previous and current distance rows.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Whether `candidate` matches `term` within the given edit budget.
///
/// The length difference is a lower bound on the edit distance, so clearly
/// distant candidates are rejected without running the full calculation.
pub fn fuzzy_match(term: &str, candidate: &str, max_edits: u32) -> bool {
    if term == candidate {
        return true;
    }
    let len_diff = term.chars().count().abs_diff(candidate.chars().count());
    if len_diff > max_edits as usize {
        return false;
    }
    levenshtein_distance(term, candidate) <= max_edits as usize
}
