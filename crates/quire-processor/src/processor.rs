//! Processor trait.

use crate::{Mode, Page};

/// Error returned by a processor. The cause is opaque to dispatch.
pub type ProcessorError = Box<dyn std::error::Error + Send + Sync>;

/// A named build step applied to pages.
///
/// Processors are registered in a [`Site`](crate::Site) under a name and
/// selected by the first token of a [`Command`](crate::Command).
///
/// # Thread Safety
///
/// One instance is shared by every page of a build session, possibly across
/// threads. State that is not page-local must be synchronized by the
/// implementation.
///
/// # Example
///
/// ```
/// use quire_processor::{Mode, Page, Processor, ProcessorError};
///
/// struct Prepend;
///
/// impl Processor for Prepend {
///     fn process(&self, page: &mut Page, args: &[&str]) -> Result<(), ProcessorError> {
///         page.content.insert_str(0, &args.join(" "));
///         Ok(())
///     }
///
///     fn description(&self) -> &str {
///         "prepend arguments to the page content"
///     }
///
///     fn mode(&self) -> Mode {
///         Mode::POST
///     }
/// }
/// ```
pub trait Processor: Send + Sync {
    /// Apply the processor to `page`.
    ///
    /// `args` are the command tokens after the processor name; the slice may
    /// be empty.
    fn process(&self, page: &mut Page, args: &[&str]) -> Result<(), ProcessorError>;

    /// One-line human-readable summary.
    fn description(&self) -> &str;

    /// Phase and visibility flags. Must return the same value for the
    /// processor's whole lifetime.
    fn mode(&self) -> Mode;
}
