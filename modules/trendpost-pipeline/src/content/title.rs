use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use trendpost_common::Product;

/// Words of the product name used in titles.
const TITLE_NAME_WORDS: usize = 6;

pub const TITLE_TEMPLATES: [&str; 5] = [
    "Discover Why {product_name} is Trending Right Now",
    "Top Reasons to Consider the {product_name} in {current_year}",
    "Is the {product_name} Worth Your Money? Our Take",
    "Why the {product_name} is a Game-Changer for {category} Enthusiasts",
    "The {product_name}: A Comprehensive Review",
];

/// Chooses which title template to use.
pub trait TemplatePicker: Send + Sync {
    /// An index in `0..count`.
    fn pick(&self, count: usize) -> usize;
}

/// Uniform random pick from the thread-local generator.
pub struct RandomPicker;

impl TemplatePicker for RandomPicker {
    fn pick(&self, count: usize) -> usize {
        rand::rng().random_range(0..count)
    }
}

/// Reproducible sequence of picks.
pub struct SeededPicker(Mutex<StdRng>);

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self(Mutex::new(StdRng::seed_from_u64(seed)))
    }
}

impl TemplatePicker for SeededPicker {
    fn pick(&self, count: usize) -> usize {
        match self.0.lock() {
            Ok(mut rng) => rng.random_range(0..count),
            Err(poisoned) => poisoned.into_inner().random_range(0..count),
        }
    }
}

/// Always the same template.
pub struct FixedPicker(pub usize);

impl TemplatePicker for FixedPicker {
    fn pick(&self, count: usize) -> usize {
        self.0 % count
    }
}

pub struct TitleGenerator {
    picker: Arc<dyn TemplatePicker>,
}

impl TitleGenerator {
    pub fn new(picker: Arc<dyn TemplatePicker>) -> Self {
        Self { picker }
    }

    pub fn random() -> Self {
        Self::new(Arc::new(RandomPicker))
    }

    pub fn title_for(&self, product: &Product, year: i32) -> String {
        let index = self.picker.pick(TITLE_TEMPLATES.len()).min(TITLE_TEMPLATES.len() - 1);
        render_title(TITLE_TEMPLATES[index], product, year)
    }
}

/// Fill a title template. The product name goes in last so braces inside it
/// are never treated as placeholders.
pub fn render_title(template: &str, product: &Product, year: i32) -> String {
    template
        .replace("{current_year}", &year.to_string())
        .replace("{category}", &title_case(&product.category_words()))
        .replace("{product_name}", &product.name_prefix(TITLE_NAME_WORDS))
}

/// Capitalize the first letter of every alphabetic run and lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
