pub mod content;
pub mod keywords;
pub mod runner;
pub mod sinks;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod throttle;
pub mod traits;

pub use content::{ContentPipeline, TitleGenerator};
pub use keywords::KeywordPipeline;
pub use runner::{BatchRunner, RunReport, SkippedProduct};
pub use traits::{ContentProvider, KeywordProvider, NoopContentProvider};
