//! Processor registry and command dispatch for quire.
//!
//! A build session ([`Site`]) owns a registry of named [`Processor`]s. Each
//! [`Page`] carries a list of [`Command`] strings written in a small
//! directive language:
//!
//! ```text
//! markdown
//! ext .html
//! :tr a-z A-Z
//! ```
//!
//! The first token names a processor, the remaining space-separated tokens are
//! its arguments. A leading `:` is shorthand for the `external` processor.
//!
//! # Two-Phase Processing
//!
//! Every page's command list is replayed twice: once in [`Phase::Pre`] and
//! once in [`Phase::Post`]. A processor runs in exactly one of the two passes,
//! selected by the [`Mode::PRE`] flag. Commands for the other pass are skipped
//! without error.
//!
//! # Example
//!
//! ```
//! use quire_processor::{Command, Mode, Page, Phase, Processor, ProcessorError, ProcessorMap, Site};
//!
//! struct Upper;
//!
//! impl Processor for Upper {
//!     fn process(&self, page: &mut Page, _args: &[&str]) -> Result<(), ProcessorError> {
//!         page.content = page.content.to_uppercase();
//!         Ok(())
//!     }
//!
//!     fn description(&self) -> &str {
//!         "uppercase the page content"
//!     }
//!
//!     fn mode(&self) -> Mode {
//!         Mode::POST
//!     }
//! }
//!
//! let mut processors = ProcessorMap::new();
//! processors.insert("upper".to_owned(), Box::new(Upper));
//! let site = Site::with_processors(processors);
//!
//! let mut page = Page::new("index.md", "index.md", "hello");
//! site.process_command(&mut page, &Command::from("upper"), Phase::Pre).unwrap();
//! assert_eq!(page.content, "hello");
//! site.process_command(&mut page, &Command::from("upper"), Phase::Post).unwrap();
//! assert_eq!(page.content, "HELLO");
//! ```

mod command;
mod dispatch;
mod mode;
mod page;
mod processor;
mod site;
#[cfg(test)]
mod test_support;

pub use command::{Command, EXTERNAL_PREFIX, EXTERNAL_PROCESSOR, ParsedCommand};
pub use dispatch::DispatchError;
pub use mode::{Mode, Phase};
pub use page::Page;
pub use processor::{Processor, ProcessorError};
pub use site::{ProcessorMap, Site, SummaryEntry};
