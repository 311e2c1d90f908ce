use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Category used when the collection stage hands over a row without one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Upper bound on keywords kept per product.
pub const MAX_KEYWORDS: usize = 4;

// --- Input ---

/// A raw row from the collection stage. Every field may be missing.
///
/// Numeric and boolean values are accepted and kept as text, since exports
/// often write `price` or `rating` as bare numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::UInt(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Any JSON scalar as text; `null` as `None`. Arrays and objects are rejected.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

// --- Product ---

/// A validated product. `name` and `category` are never empty; optional
/// fields are empty strings when the source did not provide them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub rating: String,
}

impl Product {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            price: String::new(),
            url: String::new(),
            image_url: String::new(),
            rating: String::new(),
        }
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = rating.into();
        self
    }

    /// Category slug with hyphens turned into spaces ("home-kitchen" → "home kitchen").
    pub fn category_words(&self) -> String {
        self.category.replace('-', " ")
    }

    /// The first `n` whitespace-separated words of the name, space-joined.
    pub fn name_prefix(&self, n: usize) -> String {
        self.name.split_whitespace().take(n).collect::<Vec<_>>().join(" ")
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = PipelineError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let name = record
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| PipelineError::InputInvalid("product name is missing".into()))?;

        let category = record
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Ok(Self {
            name,
            category,
            price: record.price.unwrap_or_default(),
            url: record.url.unwrap_or_default(),
            image_url: record.image_url.unwrap_or_default(),
            rating: record.rating.unwrap_or_default(),
        })
    }
}

// --- Keywords ---

/// Ordered, distinct, non-empty keywords, at most [`MAX_KEYWORDS`] long.
/// Earlier entries come from higher-priority sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    /// Keep the first occurrence of each candidate (case-sensitive), drop
    /// blanks, and cut to [`MAX_KEYWORDS`].
    pub fn from_candidates<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let keywords = candidates
            .into_iter()
            .map(Into::into)
            .filter(|k| !k.trim().is_empty())
            .filter(|k| seen.insert(k.clone()))
            .take(MAX_KEYWORDS)
            .collect();
        Self(keywords)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.0.iter().any(|k| k == keyword)
    }

    /// Comma-separated form used in prompts and logs.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(candidates: Vec<String>) -> Self {
        Self::from_candidates(candidates)
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(set: KeywordSet) -> Self {
        set.0
    }
}

/// The artifact handed from keyword selection to content generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductKeywords {
    #[serde(flatten)]
    pub product: Product,
    pub keywords: KeywordSet,
}

// --- Blog posts ---

/// Which branch of the content chain wrote the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    Llm,
    Template,
}

impl std::fmt::Display for ContentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentSource::Llm => write!(f, "llm"),
            ContentSource::Template => write!(f, "template"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub content: String,
    pub product_name: String,
    pub product_price: String,
    pub product_url: String,
    pub product_image_url: String,
    pub keywords: KeywordSet,
    pub category: String,
    pub date_created: NaiveDate,
    pub content_source: ContentSource,
}

impl BlogPost {
    /// Assemble a post, carrying the product's pass-through fields unchanged.
    pub fn assemble(
        product: &Product,
        keywords: KeywordSet,
        title: String,
        content: String,
        content_source: ContentSource,
        date_created: NaiveDate,
    ) -> Self {
        Self {
            title,
            content,
            product_name: product.name.clone(),
            product_price: product.price.clone(),
            product_url: product.url.clone(),
            product_image_url: product.image_url.clone(),
            keywords,
            category: product.category.clone(),
            date_created,
            content_source,
        }
    }
}
