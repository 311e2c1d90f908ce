use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use trendpost_common::AppConfig;
use trendpost_pipeline::sinks::{load_products, JsonLinesSink};
use trendpost_pipeline::BatchRunner;

#[derive(Parser)]
#[command(name = "trendpost", about = "Turn trending products into SEO blog posts")]
struct Cli {
    /// Product list written by the collection stage (JSON array)
    #[arg(long, default_value = "data/trending_products.json")]
    input: PathBuf,

    /// Where to write per-product keyword artifacts (JSON lines)
    #[arg(long, default_value = "data/product_keywords.jsonl")]
    keywords_output: PathBuf,

    /// Where to write blog posts (JSON lines)
    #[arg(long, default_value = "data/blog_posts.jsonl")]
    output: PathBuf,

    /// Products processed concurrently; overrides PIPELINE_CONCURRENCY
    #[arg(long)]
    concurrency: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("trendpost=info".parse()?))
        .init();

    info!("trendpost starting...");

    let mut config = AppConfig::from_env()?;
    if let Some(concurrency) = cli.concurrency {
        config.concurrency = concurrency.max(1);
    }

    let rows = load_products(&cli.input).await?;
    info!(count = rows.len(), input = %cli.input.display(), "Loaded products");

    let keyword_sink = Arc::new(JsonLinesSink::create(&cli.keywords_output).await?);
    let post_sink = Arc::new(JsonLinesSink::create(&cli.output).await?);
    let runner = BatchRunner::from_config(&config, keyword_sink, post_sink)?;

    let report = runner.run_rows(rows).await;

    for skipped in &report.skipped {
        warn!(
            index = skipped.index,
            name = skipped.name.as_deref().unwrap_or("<missing>"),
            reason = %skipped.reason,
            "Product skipped"
        );
    }
    if let Some(sample) = report.posts.first() {
        info!(title = %sample.title, keywords = %sample.keywords.joined(), source = %sample.content_source, "Sample post");
    }
    info!(
        processed = report.processed,
        skipped = report.skipped.len(),
        sink_failures = report.sink_failures,
        keywords_output = %cli.keywords_output.display(),
        output = %cli.output.display(),
        "Done"
    );

    Ok(())
}
