pub mod generated;

pub use generated::{GeneratedArticle, parse_generated_text};
