//! Generation provider integration
//!
//! A provider turns a prompt into generated text. The Gemini client is the
//! production implementation; `MockProvider` backs tests and local harnesses.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiClient;
pub use mock::MockProvider;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generate text for `prompt`.
    ///
    /// Fails with `Error::Transport`, `Error::Provider`, or `Error::Extraction`.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
