pub mod article;
pub mod keyword;
pub mod quota;
pub mod style_guide;
pub mod suggestion_cache;
