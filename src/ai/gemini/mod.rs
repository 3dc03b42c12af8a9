pub mod client;
pub mod extract;
pub mod types;

pub use client::{GeminiClient, GeminiHttpClient};
pub use extract::extract_text;
