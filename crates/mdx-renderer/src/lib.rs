//! Markdown to HTML rendering.
//!
//! Wraps [`pulldown-cmark`](https://docs.rs/pulldown-cmark) with the GFM
//! extensions the documentation engine expects (tables, strikethrough,
//! task lists) and optional extraction of the first H1 heading as the
//! document title. MDX documents are never rendered here; the server
//! returns their raw source and leaves component evaluation to the
//! frontend runtime.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

/// Result of rendering a markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// The rendered HTML output.
    pub html: String,
    /// Title extracted from the first H1 heading, if extraction was
    /// requested and the document contains one.
    pub title: Option<String>,
}

/// Configurable markdown renderer.
///
/// # Examples
///
/// ```
/// use mdx_renderer::MarkdownRenderer;
///
/// let result = MarkdownRenderer::new()
///     .with_title_extraction()
///     .render("# Getting Started\n\nHello.");
/// assert_eq!(result.title.as_deref(), Some("Getting Started"));
/// ```
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    gfm: bool,
    extract_title: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    /// Create a renderer with GFM extensions enabled and title
    /// extraction disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            extract_title: false,
        }
    }

    /// Enable or disable GitHub Flavored Markdown extensions.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Capture the text of the first H1 heading as the document title.
    #[must_use]
    pub fn with_title_extraction(mut self) -> Self {
        self.extract_title = true;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown text to HTML.
    #[must_use]
    pub fn render(&self, markdown: &str) -> RenderResult {
        let events: Vec<Event<'_>> = Parser::new_ext(markdown, self.parser_options()).collect();

        let title = if self.extract_title {
            first_h1_text(&events)
        } else {
            None
        };

        let mut output = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut output, events.into_iter());

        RenderResult {
            html: output,
            title,
        }
    }
}

/// Collect the plain text of the first level-one heading.
fn first_h1_text(events: &[Event<'_>]) -> Option<String> {
    let mut in_h1 = false;
    let mut text = String::new();

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) if in_h1 => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return None;
                }
                return Some(trimmed.to_owned());
            }
            Event::Text(t) | Event::Code(t) if in_h1 => text.push_str(t),
            _ => {}
        }
    }

    None
}
