//! Markdown rendering.

use pulldown_cmark::{Options, Parser, html};
use quire_processor::{Mode, Page, Processor, ProcessorError};

/// Renders page content from Markdown to HTML.
///
/// GFM tables, footnotes, strikethrough and task lists are enabled.
pub struct Markdown;

impl Markdown {
    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
    }
}

impl Processor for Markdown {
    fn process(&self, page: &mut Page, _args: &[&str]) -> Result<(), ProcessorError> {
        let parser = Parser::new_ext(&page.content, Self::options());
        let mut rendered = String::with_capacity(page.content.len() * 3 / 2);
        html::push_html(&mut rendered, parser);
        page.content = rendered;
        Ok(())
    }

    fn description(&self) -> &str {
        "render page content from Markdown to HTML"
    }

    fn mode(&self) -> Mode {
        Mode::POST
    }
}
