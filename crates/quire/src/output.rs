//! Progress lines for `quire` on stderr.

use std::fmt::Display;
use std::path::Path;

use console::{Term, style};

/// Reports what happened to each page.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// Page written to `target` (green).
    pub(crate) fn written(&self, source: &Path, target: &Path) {
        self.line(style(written_line(source, target)).green());
    }

    /// Page skipped by the `ignore` processor (yellow).
    pub(crate) fn ignored(&self, source: &Path) {
        self.line(style(ignored_line(source)).yellow());
    }

    /// Command failed (red).
    pub(crate) fn failed(&self, err: &dyn Display) {
        self.line(style(format!("error: {err}")).red());
    }

    fn line(&self, msg: impl Display) {
        let _ = self.term.write_line(&msg.to_string());
    }
}

fn written_line(source: &Path, target: &Path) -> String {
    format!("{} -> {}", source.display(), target.display())
}

fn ignored_line(source: &Path) -> String {
    format!("{} ignored", source.display())
}
