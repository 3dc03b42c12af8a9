//! StoryForge - an interactive fiction generator
//!
//! Serves a chapter generation endpoint that turns story state into prompts,
//! calls a text-generation provider, and normalizes the reply. A terminal
//! client keeps the story itself and exports it as plain text.

pub mod ai;
pub mod client;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod server;
pub mod session;
pub mod terminal;

pub use error::{Error, Result};
