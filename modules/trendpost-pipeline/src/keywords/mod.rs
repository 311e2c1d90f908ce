pub mod frequency;
pub mod patterns;
pub mod pipeline;
pub mod providers;

pub use frequency::frequent_phrases;
pub use patterns::pattern_keywords;
pub use pipeline::{KeywordPipeline, KeywordStrategy};
pub use providers::{build_keyword_providers, SerpApiProvider, SerperProvider};
