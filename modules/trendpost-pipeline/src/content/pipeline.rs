use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, info, warn};
use trendpost_common::{BlogPost, ContentSource, KeywordSet, Product};

use super::template::template_content;
use super::title::TitleGenerator;
use crate::traits::ContentProvider;

/// Turns a product and its keywords into a blog post. One provider attempt,
/// then the template. Never fails.
pub struct ContentPipeline {
    provider: Arc<dyn ContentProvider>,
    titles: TitleGenerator,
}

impl ContentPipeline {
    pub fn new(provider: Arc<dyn ContentProvider>, titles: TitleGenerator) -> Self {
        Self { provider, titles }
    }

    /// Build a post dated today (local time).
    pub async fn build(&self, product: &Product, keywords: KeywordSet) -> BlogPost {
        self.build_on(product, keywords, Local::now().date_naive()).await
    }

    /// Build a post dated `today`.
    pub async fn build_on(&self, product: &Product, keywords: KeywordSet, today: NaiveDate) -> BlogPost {
        let year = today.year();
        let title = self.titles.title_for(product, year);

        let (content, source) = match self.provider.generate(product, &keywords).await {
            Ok(content) => (content, ContentSource::Llm),
            Err(e) => {
                if e.is_unavailable() {
                    debug!(provider = self.provider.name(), "No content provider, using template");
                } else {
                    warn!(
                        provider = e.provider(),
                        product = %product.name,
                        error = %e,
                        "Content generation failed, using template"
                    );
                }
                (template_content(product, &keywords, year), ContentSource::Template)
            }
        };

        info!(product = %product.name, source = %source, %title, "Generated blog post");
        BlogPost::assemble(product, keywords, title, content, source, today)
    }
}
