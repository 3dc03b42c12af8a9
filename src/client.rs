//! Client for a running `/generate-chapter` endpoint.
//!
//! Builds the start and continue requests from story state and only touches a
//! [`StorySession`] once a complete response has arrived.

use crate::models::{GenerateChapterBody, GenerationResult, Genre};
use crate::session::StorySession;
use crate::{prompts, Error, Result};
use reqwest::Client;

pub struct StoryClient {
    client: Client,
    endpoint: String,
}

impl StoryClient {
    /// `base_url` is the orchestrator root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: &str) -> Self {
        Self::new_with_client(base_url, Client::new())
    }

    pub fn new_with_client(base_url: &str, client: Client) -> Self {
        Self {
            client,
            endpoint: format!("{}/generate-chapter", base_url.trim_end_matches('/')),
        }
    }

    pub fn opening_body(genre: Genre, characters: &str) -> GenerateChapterBody {
        GenerateChapterBody {
            prompt: Some(prompts::opening(genre.as_str(), characters)),
            genre: Some(genre.to_string()),
            characters: Some(characters.to_string()),
            previous_chapters: Some(Vec::new()),
            is_first_chapter: Some(true),
        }
    }

    pub fn continuation_body(session: &StorySession) -> GenerateChapterBody {
        GenerateChapterBody {
            prompt: Some(prompts::continuation(
                session.genre().as_str(),
                session.story_so_far(),
            )),
            genre: Some(session.genre().to_string()),
            characters: Some(session.characters().to_string()),
            previous_chapters: Some(session.chapters().to_vec()),
            is_first_chapter: Some(false),
        }
    }

    pub async fn start_story(&self, genre: Genre, characters: &str) -> Result<StorySession> {
        let characters = characters.trim();
        if characters.is_empty() {
            return Err(Error::ClientRequest(
                "Please select a genre and enter characters/themes".to_string(),
            ));
        }

        let result = self.request(&Self::opening_body(genre, characters)).await?;
        match (result.title, result.chapter) {
            (Some(title), Some(chapter)) => Ok(StorySession::start(
                title,
                genre,
                characters.to_string(),
                chapter,
            )),
            _ => Err(Error::ClientRequest(
                "Response is missing the title or chapter".to_string(),
            )),
        }
    }

    /// Append the next chapter; `session` is untouched on any failure.
    pub async fn next_chapter(&self, session: &mut StorySession) -> Result<()> {
        let result = self.request(&Self::continuation_body(session)).await?;
        let chapter = result
            .chapter
            .ok_or_else(|| Error::ClientRequest("Response is missing the chapter".to_string()))?;

        session.append_chapter(chapter);
        Ok(())
    }

    async fn request(&self, body: &GenerateChapterBody) -> Result<GenerationResult> {
        tracing::debug!("Requesting chapter from {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::ClientRequest(format!("Could not reach story server: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::ClientRequest(format!("Could not read response: {}", e)))?;

        let result: GenerationResult = serde_json::from_str(&text).map_err(|e| {
            Error::ClientRequest(format!("Unexpected response (status {}): {}", status, e))
        })?;

        if !result.ok {
            let message = result
                .error
                .unwrap_or_else(|| format!("Request failed with status {}", status));
            return Err(Error::ClientRequest(message));
        }

        Ok(result)
    }
}
