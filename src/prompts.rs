//! Prompt templates for chapter, title, and client-side story requests.

pub const CHAPTER: &str = include_str!("../data/prompts/chapter.txt");
pub const CONTEXT: &str = include_str!("../data/prompts/context.txt");
pub const TITLE: &str = include_str!("../data/prompts/title.txt");
pub const OPENING: &str = include_str!("../data/prompts/opening.txt");
pub const CONTINUATION: &str = include_str!("../data/prompts/continuation.txt");

pub const FALLBACK_GENRE: &str = "general fiction";
pub const FALLBACK_CHARACTERS: &str = "an original cast of characters";
pub const CHAPTER_DIVIDER: &str = "\n\n---\n\n";

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is a single pass over the template, so placeholder-like text
/// inside a value is left alone. Unknown placeholders are kept verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        match after_open.find("}}") {
            Some(end) => {
                let key = &after_open[..end];
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => result.push_str(value),
                    None => {
                        result.push_str("{{");
                        result.push_str(key);
                        result.push_str("}}");
                    }
                }
                rest = &after_open[end + 2..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    result.push_str(rest);
    result
}

/// Prompt used when the caller did not supply one.
///
/// Only the first `context_chapters` prior chapters are quoted; the chapter
/// number always counts the full history.
pub fn chapter(
    genre: Option<&str>,
    characters: Option<&str>,
    previous_chapters: &[String],
    context_chapters: usize,
) -> String {
    let genre = genre.unwrap_or(FALLBACK_GENRE);
    let characters = characters.unwrap_or(FALLBACK_CHARACTERS);
    let chapter_number = (previous_chapters.len() + 1).to_string();

    let quoted: Vec<&str> = previous_chapters
        .iter()
        .take(context_chapters)
        .map(String::as_str)
        .collect();
    let context = if quoted.is_empty() {
        String::new()
    } else {
        render(CONTEXT, &[("chapters", &quoted.join(CHAPTER_DIVIDER))])
    };

    render(
        CHAPTER,
        &[
            ("genre", genre),
            ("characters", characters),
            ("context", &context),
            ("chapter_number", &chapter_number),
        ],
    )
}

pub fn title(chapter: &str) -> String {
    render(TITLE, &[("chapter", chapter)])
}

pub fn opening(genre: &str, characters: &str) -> String {
    render(OPENING, &[("genre", genre), ("characters", characters)])
}

pub fn continuation(genre: &str, story_so_far: &str) -> String {
    render(
        CONTINUATION,
        &[("genre", genre), ("story_so_far", story_so_far)],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "cats"), ("b", "dogs")]),
            "cats and dogs"
        );
    }

    #[test]
    fn test_render_does_not_expand_values() {
        assert_eq!(
            render("{{a}} / {{b}}", &[("a", "{{b}}"), ("b", "x")]),
            "{{b}} / x"
        );
    }

    #[test]
    fn test_render_keeps_unknown_and_unclosed_placeholders() {
        assert_eq!(render("{{missing}} {{open", &[]), "{{missing}} {{open");
    }

    #[test]
    fn test_templates_have_placeholders() {
        assert!(CHAPTER.contains("{{genre}}"));
        assert!(CHAPTER.contains("{{characters}}"));
        assert!(CHAPTER.contains("{{context}}"));
        assert!(CHAPTER.contains("{{chapter_number}}"));
        assert!(CONTEXT.contains("{{chapters}}"));
        assert!(TITLE.contains("{{chapter}}"));
        assert!(OPENING.contains("{{characters}}"));
        assert!(CONTINUATION.contains("{{story_so_far}}"));
    }

    #[test]
    fn test_first_chapter_prompt_has_no_context() {
        let prompt = chapter(Some("Fantasy"), Some("a lost map"), &[], 2);
        assert!(prompt.contains("writing a Fantasy story"));
        assert!(prompt.contains("Characters/Themes: a lost map"));
        assert!(prompt.contains("Write Chapter 1 of this story"));
        assert!(prompt.contains("300-400 words"));
        assert!(prompt.contains("no chapter headers or labels"));
        assert!(!prompt.contains("Context from previous chapters"));
    }

    #[test]
    fn test_chapter_prompt_uses_fallbacks() {
        let prompt = chapter(None, None, &[], 2);
        assert!(prompt.contains(FALLBACK_GENRE));
        assert!(prompt.contains(FALLBACK_CHARACTERS));
    }

    #[test]
    fn test_chapter_prompt_quotes_only_leading_chapters() {
        let previous = vec![
            "First chapter.".to_string(),
            "Second chapter.".to_string(),
            "Third chapter.".to_string(),
        ];
        let prompt = chapter(Some("Mystery"), Some("a detective"), &previous, 2);

        assert!(prompt.contains("Context from previous chapters"));
        assert!(prompt.contains("First chapter.\n\n---\n\nSecond chapter."));
        assert!(!prompt.contains("Third chapter."));
        assert!(prompt.contains("Write Chapter 4 of this story"));
    }

    #[test]
    fn test_title_prompt_embeds_chapter() {
        let prompt = title("Once upon a time...");
        assert!(prompt.contains("Once upon a time..."));
        assert!(prompt.contains("3 to 6 words"));
        assert!(prompt.contains("Don't add quotes"));
    }

    #[test]
    fn test_client_prompts() {
        let opening = opening("Sci-Fi", "two rival engineers");
        assert!(opening.starts_with("Write the first chapter (around 300 words) of a Sci-Fi story"));
        assert!(opening.contains("featuring two rival engineers"));

        let next = continuation("Sci-Fi", "It began.\n\nIt continued.");
        assert!(next.starts_with("Continue this Sci-Fi story naturally"));
        assert!(next.contains("The story so far: It began.\n\nIt continued.."));
    }
}
