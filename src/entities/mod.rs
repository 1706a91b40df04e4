pub mod prelude;

pub mod articles;
pub mod generation_quota;
pub mod keyword_suggestions_cache;
pub mod keywords;
pub mod style_guides;
