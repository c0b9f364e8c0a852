//! `quire processors` command implementation.

use quire_processor::Site;
use quire_processors::builtin_processors;

use crate::error::CliError;

/// Print the summary of visible processors to stdout.
pub(crate) fn execute() -> Result<(), CliError> {
    let site = Site::with_processors(builtin_processors());
    site.print_summary()?;
    Ok(())
}
