//! Chapter generation: prompt assembly, provider calls, and title derivation.

use crate::ai::GenerationProvider;
use crate::models::{GenerationRequest, GenerationResult, PromptSource};
use crate::{prompts, Result};
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_TITLE: &str = "Untitled Story";
pub const DEFAULT_CONTEXT_CHAPTERS: usize = 2;
pub const MAX_CONTEXT_CHAPTERS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedChapter {
    pub chapter: String,
    /// Present only for first chapters.
    pub title: Option<String>,
}

/// Turns generation requests into chapters using a single provider.
///
/// Holds no per-story state; all continuity arrives in the request.
#[derive(Clone)]
pub struct ChapterOrchestrator {
    provider: Arc<dyn GenerationProvider>,
    context_chapters: usize,
}

impl ChapterOrchestrator {
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            provider,
            context_chapters: DEFAULT_CONTEXT_CHAPTERS,
        }
    }

    /// Number of leading prior chapters quoted, clamped to `1..=MAX_CONTEXT_CHAPTERS`.
    pub fn with_context_chapters(mut self, context_chapters: usize) -> Self {
        self.context_chapters = context_chapters.clamp(1, MAX_CONTEXT_CHAPTERS);
        self
    }

    pub fn build_prompt(&self, source: &PromptSource) -> String {
        match source {
            PromptSource::Explicit(prompt) => prompt.clone(),
            PromptSource::Templated {
                genre,
                characters,
                previous_chapters,
            } => prompts::chapter(
                genre.as_deref(),
                characters.as_deref(),
                previous_chapters,
                self.context_chapters,
            ),
        }
    }

    /// Generate one chapter, plus a title when `is_first_chapter` is set.
    ///
    /// The title call runs only after the chapter succeeded and never fails the
    /// chapter; it degrades to [`DEFAULT_TITLE`].
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedChapter> {
        let prompt = self.build_prompt(&request.source);
        let chapter = self.provider.generate(&prompt).await?;
        info!(
            chars = chapter.len(),
            first = request.is_first_chapter,
            "Generated chapter"
        );

        let title = if request.is_first_chapter {
            Some(self.generate_title(&chapter).await)
        } else {
            None
        };

        Ok(GeneratedChapter { chapter, title })
    }

    async fn generate_title(&self, chapter: &str) -> String {
        match self.provider.generate(&prompts::title(chapter)).await {
            Ok(text) => {
                let title = text.trim();
                if title.is_empty() {
                    warn!("Title generation returned blank text, using default title");
                    DEFAULT_TITLE.to_string()
                } else {
                    title.to_string()
                }
            }
            Err(e) => {
                warn!("Title generation failed, using default title: {}", e);
                DEFAULT_TITLE.to_string()
            }
        }
    }

    /// Like [`generate`](Self::generate) but folds every failure into the result.
    pub async fn handle(&self, request: &GenerationRequest) -> GenerationResult {
        match self.generate(request).await {
            Ok(generated) => GenerationResult::success(generated.chapter, generated.title),
            Err(e) => {
                tracing::error!("Error generating chapter: {}", e);
                GenerationResult::failure(&e)
            }
        }
    }
}
