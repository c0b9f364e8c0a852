//! Build session and processor registry.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

use crate::Processor;

/// Mapping from command name to processor.
pub type ProcessorMap = HashMap<String, Box<dyn Processor>>;

/// A build session.
///
/// Owns the processor registry for the duration of the build. The registry
/// is installed once and only read afterwards, so a `Site` can be shared
/// across threads that dispatch commands for different pages.
#[derive(Default)]
pub struct Site {
    processors: ProcessorMap,
}

impl Site {
    /// Create a site with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a site with the given registry.
    #[must_use]
    pub fn with_processors(processors: ProcessorMap) -> Self {
        let mut site = Self::new();
        site.init_processors(processors);
        site
    }

    /// Install the processor registry, replacing any previous one.
    ///
    /// Entries are not merged: processors absent from `processors` are gone
    /// afterwards.
    pub fn init_processors(&mut self, processors: ProcessorMap) {
        if !self.processors.is_empty() {
            tracing::warn!(
                previous = self.processors.len(),
                next = processors.len(),
                "Replacing an already initialized processor registry"
            );
        }
        tracing::debug!(count = processors.len(), "Processors initialized");
        self.processors = processors;
    }

    /// Look up a processor by name.
    #[must_use]
    pub fn processor(&self, name: &str) -> Option<&dyn Processor> {
        self.processors.get(name).map(Box::as_ref)
    }

    /// Number of registered processors, hidden ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Whether no processors are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Visible processors sorted by name.
    ///
    /// Processors with [`Mode::HIDDEN`](crate::Mode::HIDDEN) are skipped.
    /// Each entry renders as one summary block through [`fmt::Display`].
    pub fn summary(&self) -> impl Iterator<Item = SummaryEntry<'_>> {
        let mut entries: Vec<(&str, &dyn Processor)> = self
            .processors
            .iter()
            .map(|(name, processor)| (name.as_str(), processor.as_ref()))
            .collect();
        entries.sort_unstable_by_key(|(name, _)| *name);

        entries
            .into_iter()
            .filter(|(_, processor)| !processor.mode().is_hidden())
            .map(|(name, processor)| SummaryEntry {
                name,
                preprocessor: processor.mode().is_pre(),
                description: processor.description(),
            })
    }

    /// Write the summary to `out`.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for entry in self.summary() {
            write!(out, "{entry}")?;
        }
        Ok(())
    }

    /// Write the summary to standard output.
    pub fn print_summary(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.write_summary(&mut out)?;
        out.flush()
    }
}

impl fmt::Debug for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.processors.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Site").field("processors", &names).finish()
    }
}

/// One visible processor in [`Site::summary`].
///
/// Renders as:
///
/// ```text
/// - name (preprocessor)
///     description
/// ```
///
/// The `(preprocessor)` marker is present only for pre-phase processors and
/// the description line is indented with a tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SummaryEntry<'a> {
    /// Registry name.
    pub name: &'a str,
    /// Whether the processor runs in the pre phase.
    pub preprocessor: bool,
    /// Processor description.
    pub description: &'a str,
}

impl fmt::Display for SummaryEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {}", self.name)?;
        if self.preprocessor {
            f.write_str(" (preprocessor)")?;
        }
        write!(f, "\n\t{}\n", self.description)
    }
}
