//! Content unit passed through processors.

use std::path::PathBuf;

use crate::Command;

/// A page being built.
///
/// Processors read and mutate pages; dispatch itself never looks inside.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Page {
    /// File the page was loaded from.
    pub source: PathBuf,
    /// Output path relative to the output directory (`/`-separated).
    pub path: String,
    /// Current page content.
    pub content: String,
    /// Commands applied to this page, in order.
    pub commands: Vec<Command>,
    /// Set when the page should not be written.
    pub ignored: bool,
}

impl Page {
    /// Create a page with no commands.
    #[must_use]
    pub fn new(
        source: impl Into<PathBuf>,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            path: path.into(),
            content: content.into(),
            commands: Vec::new(),
            ignored: false,
        }
    }

    /// Set the page's command list.
    #[must_use]
    pub fn with_commands<I, C>(mut self, commands: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Command>,
    {
        self.commands = commands.into_iter().map(Into::into).collect();
        self
    }
}
