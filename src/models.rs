//! Data models and structures
//!
//! Defines the story genres, the `/generate-chapter` wire payloads, and the
//! environment-driven service configuration.

use crate::ai::gemini::client::DEFAULT_BASE_URL;
use crate::orchestrator::{DEFAULT_CONTEXT_CHAPTERS, MAX_CONTEXT_CHAPTERS};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Genre {
    Fantasy,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Mystery,
    Romance,
    Comedy,
    Thriller,
}

impl Genre {
    pub const ALL: [Genre; 6] = [
        Genre::Fantasy,
        Genre::SciFi,
        Genre::Mystery,
        Genre::Romance,
        Genre::Comedy,
        Genre::Thriller,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Fantasy => "Fantasy",
            Genre::SciFi => "Sci-Fi",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::Comedy => "Comedy",
            Genre::Thriller => "Thriller",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "fantasy" => Ok(Genre::Fantasy),
            "sci-fi" | "scifi" | "sci fi" => Ok(Genre::SciFi),
            "mystery" => Ok(Genre::Mystery),
            "romance" => Ok(Genre::Romance),
            "comedy" => Ok(Genre::Comedy),
            "thriller" => Ok(Genre::Thriller),
            _ => Err(format!("Unknown genre '{}'", input.trim())),
        }
    }
}

// `/generate-chapter` request/response models

/// JSON body accepted by `POST /generate-chapter`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateChapterBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_chapters: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_first_chapter: Option<bool>,
}

/// Where the chapter prompt comes from. Exactly one shape is used per call.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptSource {
    /// Caller-supplied prompt, forwarded verbatim.
    Explicit(String),
    /// Prompt assembled from story state.
    Templated {
        genre: Option<String>,
        characters: Option<String>,
        previous_chapters: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub source: PromptSource,
    pub is_first_chapter: bool,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<GenerateChapterBody> for GenerationRequest {
    fn from(body: GenerateChapterBody) -> Self {
        let is_first_chapter = body.is_first_chapter.unwrap_or(false);

        let source = match body.prompt.filter(|p| !p.is_empty()) {
            Some(prompt) => PromptSource::Explicit(prompt),
            None => PromptSource::Templated {
                genre: non_blank(body.genre),
                characters: non_blank(body.characters),
                previous_chapters: body.previous_chapters.unwrap_or_default(),
            },
        };

        Self {
            source,
            is_first_chapter,
        }
    }
}

/// Normalized result returned to the caller of `/generate-chapter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<serde_json::Value>,
}

impl GenerationResult {
    pub fn success(chapter: String, title: Option<String>) -> Self {
        Self {
            ok: true,
            chapter: Some(chapter),
            title,
            error: None,
            raw_response: None,
        }
    }

    pub fn failure(error: &Error) -> Self {
        Self {
            ok: false,
            chapter: None,
            title: None,
            error: Some(error.to_string()),
            raw_response: error.raw_response().cloned(),
        }
    }
}

// Configuration
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub bind_addr: SocketAddr,
    /// Number of leading prior chapters quoted in templated prompts.
    pub context_chapters: usize,
    /// Per-call provider timeout; `None` leaves the transport default.
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Config("GEMINI_API_KEY not set".to_string()))?;

        let bind = lookup("STORYFORGE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = bind
            .parse::<SocketAddr>()
            .map_err(|e| Error::Config(format!("Invalid STORYFORGE_BIND '{}': {}", bind, e)))?;

        let context_chapters = match lookup("STORYFORGE_CONTEXT_CHAPTERS") {
            Some(raw) => {
                let count = raw.trim().parse::<usize>().map_err(|e| {
                    Error::Config(format!(
                        "Invalid STORYFORGE_CONTEXT_CHAPTERS '{}': {}",
                        raw, e
                    ))
                })?;
                if !(1..=MAX_CONTEXT_CHAPTERS).contains(&count) {
                    return Err(Error::Config(format!(
                        "STORYFORGE_CONTEXT_CHAPTERS must be between 1 and {}, got {}",
                        MAX_CONTEXT_CHAPTERS, count
                    )));
                }
                count
            }
            None => DEFAULT_CONTEXT_CHAPTERS,
        };

        let timeout = match lookup("GEMINI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    Error::Config(format!("Invalid GEMINI_TIMEOUT_SECS '{}': {}", raw, e))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_key,
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: lookup("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            bind_addr,
            context_chapters,
            timeout,
        })
    }
}
