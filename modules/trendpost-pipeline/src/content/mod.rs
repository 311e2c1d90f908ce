pub mod llm;
pub mod pipeline;
pub mod template;
pub mod title;

pub use llm::{build_content_provider, LlmContentProvider};
pub use pipeline::ContentPipeline;
pub use template::template_content;
pub use title::{FixedPicker, RandomPicker, SeededPicker, TemplatePicker, TitleGenerator, TITLE_TEMPLATES};
