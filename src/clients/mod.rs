pub mod dataforseo;
pub mod gemini;

pub use dataforseo::DataForSeoClient;
pub use gemini::GeminiClient;
