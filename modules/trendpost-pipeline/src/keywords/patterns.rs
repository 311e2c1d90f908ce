//! Deterministic keyword candidates built from the product name and category.

/// Phrases longer than this (in characters) are dropped.
const MAX_PHRASE_CHARS: usize = 60;

const MAX_PATTERN_KEYWORDS: usize = 5;

/// The first five template phrases that fit, in template order.
pub fn pattern_keywords(name: &str, category: &str) -> Vec<String> {
    let patterns = [
        format!("best {name}"),
        format!("top {name} {category}"),
        format!("{name} review"),
        format!("affordable {name}"),
        format!("{name} vs"),
        format!("how to choose {name}"),
        format!("{name} for beginners"),
        format!("{name} features"),
        format!("{name} buying guide"),
        format!("{category} {name} comparison"),
    ];

    patterns
        .into_iter()
        .filter(|p| p.chars().count() <= MAX_PHRASE_CHARS)
        .take(MAX_PATTERN_KEYWORDS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_fills_five_slots_in_order() {
        let phrases = pattern_keywords("UltraWidget", "home-kitchen");
        assert_eq!(
            phrases,
            vec![
                "best UltraWidget",
                "top UltraWidget home-kitchen",
                "UltraWidget review",
                "affordable UltraWidget",
                "UltraWidget vs",
            ]
        );
        assert!(phrases.iter().all(|p| p.contains("UltraWidget")));
    }

    #[test]
    fn long_phrases_are_skipped() {
        let phrases =
            pattern_keywords("Wireless Bluetooth Earbuds with Noise Cancellation", "electronics");
        assert_eq!(
            phrases,
            vec![
                "best Wireless Bluetooth Earbuds with Noise Cancellation",
                "Wireless Bluetooth Earbuds with Noise Cancellation review",
                "Wireless Bluetooth Earbuds with Noise Cancellation vs",
                "Wireless Bluetooth Earbuds with Noise Cancellation features",
            ]
        );
    }

    #[test]
    fn exactly_sixty_characters_is_kept() {
        let name = "x".repeat(55);
        let phrases = pattern_keywords(&name, "c");
        assert_eq!(phrases[0].chars().count(), 60);
        assert!(phrases[0].starts_with("best "));
    }

    #[test]
    fn very_long_name_yields_nothing() {
        assert!(pattern_keywords(&"y".repeat(80), "electronics").is_empty());
    }
}
