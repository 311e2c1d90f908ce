//! Local keyword extraction by word and word-pair frequency.

use std::collections::HashMap;

/// Conjunctions, articles and short auxiliaries that never make a keyword.
const STOP_WORDS: [&str; 33] = [
    "and", "the", "to", "a", "of", "for", "in", "with", "on", "is", "that", "this", "it", "by",
    "from", "or", "as", "an", "at", "be", "are", "you", "your", "has", "have", "had", "was",
    "were", "will", "would", "could", "should", "can",
];

const PUNCTUATION: [char; 14] = [
    '.', ',', '!', '?', ';', ':', '(', ')', '[', ']', '{', '}', '"', '\'',
];

/// Tokens this short (in characters) are dropped.
const MAX_SHORT_TOKEN: usize = 3;

const TOP_WORDS: usize = 5;
const TOP_PAIRS: usize = 5;

/// Top single words followed by top adjacent word pairs in `text`.
///
/// Pairs are formed from the filtered token sequence, so a removed stop
/// word does not break adjacency. Ties keep first-occurrence order.
pub fn frequent_phrases(text: &str) -> Vec<String> {
    let tokens = tokenize(text);
    let pairs: Vec<String> = tokens
        .windows(2)
        .map(|w| format!("{} {}", w[0], w[1]))
        .collect();

    let mut phrases = most_common(tokens, TOP_WORDS);
    phrases.extend(most_common(pairs, TOP_PAIRS));
    phrases
}

/// Lowercased tokens with punctuation, stop words and short tokens removed.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() > MAX_SHORT_TOKEN && !STOP_WORDS.contains(t))
        .map(String::from)
        .collect()
}

fn most_common(items: Vec<String>, n: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut position: HashMap<String, usize> = HashMap::new();

    for item in items {
        match position.get(&item) {
            Some(&i) => counts[i].1 += 1,
            None => {
                position.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }

    // Stable sort: equal counts stay in first-occurrence order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(n).map(|(phrase, _)| phrase).collect()
}
