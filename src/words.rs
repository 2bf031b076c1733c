use crate::types::WordCount;
use std::collections::HashMap;

/// Rank the `k` most frequent words across `titles`.
///
/// Titles are joined with a space, lowercased and split on runs of non-word
/// characters (anything outside `[A-Za-z0-9_]`, so digits and underscores
/// are part of words). Single-character tokens are dropped except "a" and
/// "i". Words with equal counts keep their first-occurrence order, so the
/// ranking is deterministic.
pub fn top_words(titles: &[String], k: usize) -> Vec<WordCount> {
    if k == 0 || titles.is_empty() {
        return Vec::new();
    }

    let text = titles.join(" ").to_lowercase();

    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<WordCount> = Vec::new();

    for token in text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_')) {
        if !counts_as_word(token) {
            continue;
        }
        match seen.get(token) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                seen.insert(token, counts.len());
                counts.push(WordCount {
                    word: token.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(k);
    counts
}

/// A word must be at least two characters long, or be exactly "a" or "i".
fn counts_as_word(token: &str) -> bool {
    token.len() > 1 || token == "a" || token == "i"
}
