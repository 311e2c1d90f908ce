//! Deterministic blog body used when no LLM content is available.

use trendpost_common::{KeywordSet, Product};

const CALL_TO_ACTION: &str =
    "Don't miss out on experiencing what could be the perfect addition to your collection!";

/// Sentence slots, one per keyword.
const KEYWORD_SLOTS: usize = 4;

/// One sentence working `keyword` in, framed by what the keyword asks for.
pub fn keyword_sentence(keyword: &str, product_name: &str) -> String {
    let lower = keyword.to_lowercase();
    if lower.contains("best") {
        format!("When looking for the {keyword}, the {product_name} stands out.")
    } else if lower.contains("review") {
        format!("In our {keyword}, we found the {product_name} impressive.")
    } else if lower.contains("guide") {
        format!("Any {keyword} would be incomplete without the {product_name}.")
    } else {
        format!("The {product_name} is great for those searching for {keyword}.")
    }
}

/// A heading followed by exactly five paragraphs, separated by blank lines.
/// Paragraphs whose keyword sentence is missing keep their slot.
pub fn template_content(product: &Product, keywords: &KeywordSet, year: i32) -> String {
    let name = &product.name;
    let category = product.category_words();

    let sentences: Vec<String> = keywords
        .iter()
        .take(KEYWORD_SLOTS)
        .map(|k| keyword_sentence(k, name))
        .collect();
    let sentence = |i: usize| sentences.get(i).map(String::as_str).unwrap_or("");

    let price_clause = if product.price.is_empty() {
        format!("The {name} has caught the attention of many.")
    } else {
        format!("The {name}, priced at {}, has caught the attention of many.", product.price)
    };

    let heading = format!("Exploring the {name}: A {year} Must-Have");
    let paragraphs = [
        format!(
            "Are you in the market for a new {category}? {price_clause} {}",
            sentence(0)
        ),
        format!(
            "With a unique combination of features and quality, the {name} offers excellent value. {}",
            sentence(1)
        ),
        sentence(2).to_string(),
        format!(
            "Whether you're a beginner or an expert in {category}, consider the {name} to elevate your experience. {}",
            sentence(3)
        ),
        CALL_TO_ACTION.to_string(),
    ];

    std::iter::once(heading)
        .chain(paragraphs.into_iter().map(|p| p.trim_end().to_string()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
