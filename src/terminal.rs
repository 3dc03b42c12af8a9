//! Interactive terminal front end for writing a story against a running server.

use crate::client::StoryClient;
use crate::models::Genre;
use crate::session::StorySession;
use crate::Result;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub struct StoryDesk<W: Write> {
    client: StoryClient,
    session: Option<StorySession>,
    out_dir: PathBuf,
    out: W,
}

impl<W: Write> StoryDesk<W> {
    pub fn new(client: StoryClient, out_dir: PathBuf, out: W) -> Self {
        Self {
            client,
            session: None,
            out_dir,
            out,
        }
    }

    pub fn session(&self) -> Option<&StorySession> {
        self.session.as_ref()
    }

    /// Discard the current story.
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Run until `quit` or end of input.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();

        loop {
            if self.session.is_none() {
                writeln!(self.out, "\nStoryForge: co-create your next adventure")?;
                for (index, genre) in Genre::ALL.iter().enumerate() {
                    writeln!(self.out, "  {}. {}", index + 1, genre)?;
                }
                self.prompt("Choose a genre: ")?;
                let Some(line) = lines.next_line().await? else {
                    return Ok(());
                };
                let genre = match parse_genre(&line) {
                    Some(genre) => genre,
                    None => {
                        writeln!(self.out, "Unknown genre '{}'", line.trim())?;
                        continue;
                    }
                };

                self.prompt("Characters/themes: ")?;
                let Some(characters) = lines.next_line().await? else {
                    return Ok(());
                };

                writeln!(self.out, "Generating your story...")?;
                match self.client.start_story(genre, &characters).await {
                    Ok(session) => {
                        self.show_opening(&session)?;
                        self.session = Some(session);
                    }
                    Err(e) => {
                        writeln!(self.out, "Failed to generate story: {}. Please try again.", e)?;
                    }
                }
                continue;
            }

            self.prompt("[n]ext chapter, [d]ownload, [r]eset, [q]uit: ")?;
            let Some(line) = lines.next_line().await? else {
                return Ok(());
            };

            match line.trim().to_ascii_lowercase().as_str() {
                "n" | "next" => self.next_chapter().await?,
                "d" | "download" => self.download()?,
                "r" | "reset" => {
                    self.reset();
                    writeln!(self.out, "Your adventure awaits... Start a new story anytime!")?;
                }
                "q" | "quit" => return Ok(()),
                other => writeln!(self.out, "Unknown command '{}'", other)?,
            }
        }
    }

    async fn next_chapter(&mut self) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        writeln!(self.out, "Generating next chapter...")?;
        match self.client.next_chapter(session).await {
            Ok(()) => {
                let number = session.chapters().len();
                let text = session.chapters()[number - 1].clone();
                writeln!(self.out, "\nChapter {}\n\n{}\n", number, text)?;
            }
            Err(e) => {
                writeln!(
                    self.out,
                    "Failed to generate next chapter: {}. Please try again.",
                    e
                )?;
            }
        }
        Ok(())
    }

    fn download(&mut self) -> Result<()> {
        if let Some(session) = &self.session {
            match session.save_to(&self.out_dir) {
                Ok(path) => writeln!(self.out, "Saved {}", path.display())?,
                Err(e) => writeln!(self.out, "Failed to save story: {}", e)?,
            }
        }
        Ok(())
    }

    fn show_opening(&mut self, session: &StorySession) -> Result<()> {
        writeln!(self.out, "\n{}\n{}\n", session.title(), session.genre())?;
        writeln!(self.out, "Chapter 1\n\n{}\n", session.chapters()[0])?;
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.out, "{}", text)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Accepts a 1-based menu number or a genre name.
fn parse_genre(input: &str) -> Option<Genre> {
    let input = input.trim();
    match input.parse::<usize>() {
        Ok(n) if (1..=Genre::ALL.len()).contains(&n) => Some(Genre::ALL[n - 1]),
        Ok(_) => None,
        Err(_) => input.parse().ok(),
    }
}
