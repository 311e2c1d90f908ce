//! Drives a batch of products through the keyword and content stages.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use trendpost_common::{AppConfig, BlogPost, Product, ProductKeywords, ProductRecord};

use crate::content::{build_content_provider, ContentPipeline, TitleGenerator};
use crate::keywords::{build_keyword_providers, KeywordPipeline};
use crate::sinks::{ProductRow, RecordSink};
use crate::throttle::Throttle;

/// An input record that produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedProduct {
    /// Position in the input list.
    pub index: usize,
    pub name: Option<String>,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub processed: usize,
    pub skipped: Vec<SkippedProduct>,
    pub sink_failures: usize,
    /// Posts in input order.
    pub posts: Vec<BlogPost>,
}

pub struct BatchRunner {
    keywords: KeywordPipeline,
    content: ContentPipeline,
    keyword_sink: Arc<dyn RecordSink<ProductKeywords>>,
    post_sink: Arc<dyn RecordSink<BlogPost>>,
    keyword_throttle: Throttle,
    content_throttle: Throttle,
    concurrency: usize,
    sink_failures: AtomicUsize,
}

impl BatchRunner {
    /// Unthrottled, one product at a time.
    pub fn new(
        keywords: KeywordPipeline,
        content: ContentPipeline,
        keyword_sink: Arc<dyn RecordSink<ProductKeywords>>,
        post_sink: Arc<dyn RecordSink<BlogPost>>,
    ) -> Self {
        Self {
            keywords,
            content,
            keyword_sink,
            post_sink,
            keyword_throttle: Throttle::disabled(),
            content_throttle: Throttle::disabled(),
            concurrency: 1,
            sink_failures: AtomicUsize::new(0),
        }
    }

    pub fn with_throttles(mut self, keyword: Throttle, content: Throttle) -> Self {
        self.keyword_throttle = keyword;
        self.content_throttle = content;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Wire providers, throttles and concurrency from `config`.
    pub fn from_config(
        config: &AppConfig,
        keyword_sink: Arc<dyn RecordSink<ProductKeywords>>,
        post_sink: Arc<dyn RecordSink<BlogPost>>,
    ) -> Result<Self> {
        let providers = build_keyword_providers(config)?;
        let content_provider = build_content_provider(config);
        info!(
            keyword_providers = providers.iter().filter(|p| p.has_credential()).count(),
            content_provider = content_provider.name(),
            "Providers configured"
        );

        Ok(Self::new(
            KeywordPipeline::new(providers),
            ContentPipeline::new(content_provider, TitleGenerator::random()),
            keyword_sink,
            post_sink,
        )
        .with_throttles(
            Throttle::new(config.keyword_delay),
            Throttle::new(config.content_delay),
        )
        .with_concurrency(config.concurrency))
    }

    pub async fn run(&self, records: Vec<ProductRecord>) -> RunReport {
        self.run_rows(records.into_iter().map(Ok).collect()).await
    }

    /// Like [`run`](Self::run), for rows as read by
    /// [`load_products`](crate::sinks::load_products). Unreadable rows are
    /// reported as skipped at their input position.
    pub async fn run_rows(&self, rows: Vec<ProductRow>) -> RunReport {
        let total = rows.len();
        let mut report = RunReport::default();
        let mut products = Vec::with_capacity(total);

        for (index, row) in rows.into_iter().enumerate() {
            let (name, validated) = match row {
                Ok(record) => (record.name.clone(), Product::try_from(record)),
                Err(e) => (None, Err(e)),
            };
            match validated {
                Ok(product) => products.push((index, product)),
                Err(e) => {
                    warn!(index, error = %e, "Skipping product");
                    report.skipped.push(SkippedProduct {
                        index,
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(total, valid = products.len(), concurrency = self.concurrency, "Starting run");

        report.posts = stream::iter(products)
            .map(|(index, product)| self.process(index, total, product))
            .buffered(self.concurrency)
            .collect()
            .await;
        report.processed = report.posts.len();
        report.sink_failures = self.sink_failures.swap(0, Ordering::SeqCst);

        info!(
            processed = report.processed,
            skipped = report.skipped.len(),
            sink_failures = report.sink_failures,
            "Run complete"
        );
        report
    }

    async fn process(&self, index: usize, total: usize, product: Product) -> BlogPost {
        info!(product = %product.name, position = index + 1, total, "Processing product");

        self.keyword_throttle.ready().await;
        let keywords = self.keywords.select(&product).await;
        let artifact = ProductKeywords {
            product,
            keywords,
        };
        self.persist(&*self.keyword_sink, &artifact, "keywords").await;

        self.content_throttle.ready().await;
        let post = self.content.build(&artifact.product, artifact.keywords.clone()).await;
        self.persist(&*self.post_sink, &post, "post").await;

        post
    }

    async fn persist<T: Sync>(&self, sink: &dyn RecordSink<T>, record: &T, kind: &str) {
        if let Err(e) = sink.persist(record).await {
            warn!(kind, error = %e, "Failed to persist record");
            self.sink_failures.fetch_add(1, Ordering::SeqCst);
        }
    }
}
