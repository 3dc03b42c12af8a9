//! Client-held story state and the plain-text export.

use crate::models::Genre;
use crate::orchestrator::DEFAULT_TITLE;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

const RULE_CHAR: char = '━';
const RULE_WIDTH: usize = 50;

/// A story in progress.
///
/// `chapters` is never empty and `story_so_far` is always the chapters joined
/// by one blank line.
#[derive(Debug, Clone, PartialEq)]
pub struct StorySession {
    title: String,
    genre: Genre,
    characters: String,
    chapters: Vec<String>,
    story_so_far: String,
}

impl StorySession {
    pub fn start(title: String, genre: Genre, characters: String, first_chapter: String) -> Self {
        Self {
            title,
            genre,
            characters,
            story_so_far: first_chapter.clone(),
            chapters: vec![first_chapter],
        }
    }

    pub fn append_chapter(&mut self, text: String) {
        self.story_so_far.push_str("\n\n");
        self.story_so_far.push_str(&text);
        self.chapters.push(text);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn characters(&self) -> &str {
        &self.characters
    }

    pub fn chapters(&self) -> &[String] {
        &self.chapters
    }

    pub fn story_so_far(&self) -> &str {
        &self.story_so_far
    }

    pub fn export_text(&self) -> String {
        let rule = format!("\n\n{}\n\n", RULE_CHAR.to_string().repeat(RULE_WIDTH));
        let body = self
            .chapters
            .iter()
            .enumerate()
            .map(|(index, chapter)| format!("Chapter {}\n\n{}", index + 1, chapter))
            .collect::<Vec<_>>()
            .join(&rule);

        format!(
            "{}\nGenre: {}\nWritten by StoryForge AI\n\n{}",
            self.title, self.genre, body
        )
    }

    /// Title with whitespace runs replaced by hyphens, plus `.txt`.
    pub fn download_file_name(&self) -> String {
        let stem = self
            .title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .replace(['/', '\\'], "-");

        if stem.is_empty() {
            format!("{}.txt", DEFAULT_TITLE.replace(' ', "-"))
        } else {
            format!("{}.txt", stem)
        }
    }

    /// Write the export into `dir`, returning the file path.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.download_file_name());
        fs::write(&path, self.export_text())?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session(title: &str, chapters: &[&str]) -> StorySession {
        let mut session = StorySession::start(
            title.to_string(),
            Genre::Mystery,
            "a retired detective".to_string(),
            chapters[0].to_string(),
        );
        for chapter in &chapters[1..] {
            session.append_chapter(chapter.to_string());
        }
        session
    }

    #[test]
    fn test_start_holds_one_chapter() {
        let session = session("Echoes", &["It began in the fog."]);
        assert_eq!(session.chapters().to_vec(), vec!["It began in the fog.".to_string()]);
        assert_eq!(session.story_so_far(), "It began in the fog.");
        assert_eq!(session.genre(), Genre::Mystery);
        assert_eq!(session.characters(), "a retired detective");
    }

    #[test]
    fn test_append_keeps_story_so_far_in_sync() {
        let texts = ["one", "two", "three", "four", "five"];
        let session = session("Counting", &texts);

        assert_eq!(session.chapters().len(), texts.len());
        assert_eq!(session.story_so_far(), texts.join("\n\n"));
        assert_eq!(session.story_so_far(), session.chapters().join("\n\n"));
    }

    #[test]
    fn test_export_text_layout() {
        let session = session("Echoes", &["The bell rang.", "Nobody answered."]);

        let rule = "━".repeat(50);
        let expected = format!(
            "Echoes\nGenre: Mystery\nWritten by StoryForge AI\n\n\
             Chapter 1\n\nThe bell rang.\n\n{rule}\n\n\
             Chapter 2\n\nNobody answered.",
            rule = rule
        );
        assert_eq!(session.export_text(), expected);
    }

    #[test]
    fn test_export_single_chapter_has_no_rule() {
        let session = session("Alone", &["Just one."]);
        assert!(!session.export_text().contains('━'));
    }

    #[test]
    fn test_download_file_name() {
        assert_eq!(
            session("The  Lost\tMap", &["x"]).download_file_name(),
            "The-Lost-Map.txt"
        );
        assert_eq!(
            session("Either/Or", &["x"]).download_file_name(),
            "Either-Or.txt"
        );
        assert_eq!(session("  ", &["x"]).download_file_name(), "Untitled-Story.txt");
    }

    #[test]
    fn test_save_to_writes_export() {
        let dir = tempfile::tempdir().unwrap();
        let session = session("Echoes", &["The bell rang.", "Nobody answered."]);

        let path = session.save_to(dir.path()).unwrap();

        assert_eq!(path, dir.path().join("Echoes.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), session.export_text());
    }
}
