//! End-to-end runs with no credentials configured.
//!
//! Run with: cargo test -p trendpost-pipeline --test batch_run_test

use std::sync::Arc;

use trendpost_common::{AppConfig, BlogPost, ContentSource, ProductKeywords, ProductRecord};
use trendpost_pipeline::content::template::keyword_sentence;
use trendpost_pipeline::keywords::pattern_keywords;
use trendpost_pipeline::sinks::{load_products, JsonLinesSink, MemorySink};
use trendpost_pipeline::testing::record;
use trendpost_pipeline::BatchRunner;

fn offline_runner(
    keywords: Arc<MemorySink<ProductKeywords>>,
    posts: Arc<MemorySink<BlogPost>>,
) -> BatchRunner {
    BatchRunner::from_config(&AppConfig::offline(), keywords, posts).unwrap()
}

#[tokio::test]
async fn earbuds_offline_scenario() {
    let keyword_sink = Arc::new(MemorySink::new());
    let post_sink = Arc::new(MemorySink::new());
    let runner = offline_runner(keyword_sink.clone(), post_sink.clone());
    let name = "Wireless Bluetooth Earbuds with Noise Cancellation";

    let report = runner.run(vec![record(name, "electronics", "$49.99")]).await;

    assert_eq!(report.processed, 1);
    let post = &post_sink.records()[0];
    assert!(post.keywords.len() >= 3);
    let patterns = pattern_keywords(name, "electronics");
    assert!(post.keywords.iter().all(|k| patterns.iter().any(|p| p == k)));

    assert_eq!(post.content_source, ContentSource::Template);
    for keyword in post.keywords.iter() {
        assert!(post.content.contains(&keyword_sentence(keyword, name)));
    }
    assert!(post.content.contains("priced at $49.99"));
    assert_eq!(post.category, "electronics");

    let artifact = &keyword_sink.records()[0];
    assert_eq!(artifact.product.name, name);
    assert_eq!(artifact.keywords, post.keywords);
}

#[tokio::test]
async fn every_valid_product_gets_a_post() {
    let post_sink = Arc::new(MemorySink::new());
    let runner = offline_runner(Arc::new(MemorySink::new()), post_sink.clone());
    let records = vec![
        record("UltraWidget", "home-kitchen", "$19.99"),
        record(
            "Professional Grade Stainless Steel Countertop Convection Toaster Oven",
            "home-kitchen",
            "$129.00",
        ),
        ProductRecord {
            name: Some("Mystery Box".into()),
            ..Default::default()
        },
        ProductRecord {
            name: Some("   ".into()),
            category: Some("toys-games".into()),
            ..Default::default()
        },
    ];

    let report = runner.run(records).await;

    assert_eq!(report.processed, 3);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 3);
    for post in post_sink.records() {
        assert!(!post.title.is_empty());
        assert!(!post.content.is_empty());
        assert!(!post.keywords.is_empty());
    }
    assert_eq!(post_sink.records()[2].category, "general");
}

#[tokio::test]
async fn json_lines_outputs_round_trip_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("trending_products.json");
    tokio::fs::write(
        &input,
        r#"[
            {"name": "UltraWidget", "price": "$19.99", "rating": "4.5 out of 5 stars",
             "url": "https://www.example.com/product1",
             "image_url": "https://example.com/image1.jpg", "category": "home-kitchen"},
            {"price": "$5.00", "category": "toys-games"}
        ]"#,
    )
    .await
    .unwrap();
    let keywords_path = dir.path().join("out").join("product_keywords.jsonl");
    let posts_path = dir.path().join("out").join("blog_posts.jsonl");

    let rows = load_products(&input).await.unwrap();
    let runner = BatchRunner::from_config(
        &AppConfig::offline(),
        Arc::new(JsonLinesSink::create(&keywords_path).await.unwrap()),
        Arc::new(JsonLinesSink::create(&posts_path).await.unwrap()),
    )
    .unwrap();
    let report = runner.run_rows(rows).await;

    assert_eq!(report.processed, 1);
    assert_eq!(report.sink_failures, 0);

    let raw = tokio::fs::read_to_string(&keywords_path).await.unwrap();
    let artifact: ProductKeywords = serde_json::from_str(raw.trim_end()).unwrap();
    assert_eq!(artifact.product.rating, "4.5 out of 5 stars");
    assert_eq!(
        artifact.keywords.as_slice(),
        ["best UltraWidget", "top UltraWidget home-kitchen", "UltraWidget review", "affordable UltraWidget"]
    );

    let raw = tokio::fs::read_to_string(&posts_path).await.unwrap();
    let lines: Vec<&str> = raw.lines().collect();
    assert_eq!(lines.len(), 1);
    let post: BlogPost = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(post.product_url, "https://www.example.com/product1");
    assert_eq!(post.product_image_url, "https://example.com/image1.jpg");
    assert_eq!(post.keywords, artifact.keywords);
}

#[tokio::test]
async fn mixed_input_file_still_produces_posts_for_good_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("trending_products.json");
    tokio::fs::write(
        &input,
        r#"[
            {"name": "Desk Lamp", "price": "$19.99", "category": "home-kitchen"},
            {"name": "Office Chair", "price": 89.0, "rating": 4.5, "category": "home-kitchen"},
            {"name": {"en": "Tent"}, "category": "sports-outdoors"}
        ]"#,
    )
    .await
    .unwrap();
    let post_sink = Arc::new(MemorySink::new());
    let runner = offline_runner(Arc::new(MemorySink::new()), post_sink.clone());

    let rows = load_products(&input).await.unwrap();
    let report = runner.run_rows(rows).await;

    assert_eq!(report.processed, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 2);
    assert!(report.skipped[0].reason.starts_with("Invalid input"));

    let posts = post_sink.records();
    assert_eq!(posts[0].product_name, "Desk Lamp");
    assert_eq!(posts[1].product_name, "Office Chair");
    assert_eq!(posts[1].product_price, "89");
    assert!(posts[1].content.contains("priced at 89"));
}
