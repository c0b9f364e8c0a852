//! Built-in processors for quire.
//!
//! | Name | Phase | Effect |
//! |------|-------|--------|
//! | `external` | post | pipe content through a program |
//! | `markdown` | post | render Markdown to HTML |
//! | `ext` | pre | change the output extension |
//! | `rename` | pre | change the output path |
//! | `directorify` | pre | `a/b.html` becomes `a/b/index.html` |
//! | `ignore` | pre | do not write the page |
//!
//! [`builtin_processors`] returns all of them keyed by name, ready for
//! [`Site::with_processors`](quire_processor::Site::with_processors).

mod external;
mod markdown;
mod paths;

use std::io;
use std::process::ExitStatus;

use quire_processor::{EXTERNAL_PROCESSOR, Processor, ProcessorMap};

pub use external::External;
pub use markdown::Markdown;
pub use paths::{Directorify, Ext, Ignore, Rename};

/// Error returned by the built-in processors.
#[derive(Debug, thiserror::Error)]
pub enum BuiltinError {
    /// A required argument was not supplied.
    #[error("{processor}: missing argument: {expected}")]
    MissingArgument {
        /// Processor name.
        processor: &'static str,
        /// What the argument should be.
        expected: &'static str,
    },
    /// A path processor produced an output path that is not allowed.
    #[error("{processor}: invalid output path '{path}': {reason}")]
    InvalidPath {
        /// Processor name.
        processor: &'static str,
        /// Offending path.
        path: String,
        /// Why the path was rejected.
        reason: &'static str,
    },
    /// The external program could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The external program exited unsuccessfully.
    #[error("'{program}' exited with {status}: {stderr}")]
    ExitStatus {
        /// Program name.
        program: String,
        /// Exit status.
        status: ExitStatus,
        /// Captured standard error, trimmed.
        stderr: String,
    },
    /// The external program wrote output that is not UTF-8.
    #[error("'{program}' produced non-UTF-8 output")]
    NonUtf8Output {
        /// Program name.
        program: String,
    },
    /// I/O error while talking to the external program.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// All built-in processors keyed by command name.
#[must_use]
pub fn builtin_processors() -> ProcessorMap {
    let processors: [(&str, Box<dyn Processor>); 6] = [
        (EXTERNAL_PROCESSOR, Box::new(External)),
        ("markdown", Box::new(Markdown)),
        ("ext", Box::new(Ext)),
        ("rename", Box::new(Rename)),
        ("directorify", Box::new(Directorify)),
        ("ignore", Box::new(Ignore)),
    ];

    processors
        .into_iter()
        .map(|(name, processor)| (name.to_owned(), processor))
        .collect()
}
