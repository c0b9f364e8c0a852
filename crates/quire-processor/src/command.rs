//! Command directive parsing.
//!
//! A command is a single line: `name arg1 arg2 ...`. Tokens are separated by
//! single spaces and passed through verbatim. There is no quoting, so an
//! argument can never contain a space.

use std::borrow::Cow;
use std::fmt;

/// Prefix that routes a command to the [`EXTERNAL_PROCESSOR`].
pub const EXTERNAL_PREFIX: &str = ":";

/// Processor name that `:`-prefixed commands dispatch to.
pub const EXTERNAL_PROCESSOR: &str = "external";

/// A raw command directive attached to a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Command(String);

/// A command split into processor name and arguments.
#[derive(Debug, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// Processor name (first token).
    pub name: &'a str,
    /// Positional arguments (remaining tokens).
    pub args: Vec<&'a str>,
}

impl Command {
    /// Create a command from a raw directive line.
    #[must_use]
    pub fn new(line: impl Into<String>) -> Self {
        Self(line.into())
    }

    /// The raw directive line.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The directive with the `:` shorthand expanded to `external `.
    ///
    /// ```
    /// use quire_processor::Command;
    ///
    /// assert_eq!(Command::from(":echo hi").normalized(), "external echo hi");
    /// assert_eq!(Command::from("markdown").normalized(), "markdown");
    /// ```
    #[must_use]
    pub fn normalized(&self) -> Cow<'_, str> {
        match self.0.strip_prefix(EXTERNAL_PREFIX) {
            Some(rest) => Cow::Owned(format!("{EXTERNAL_PROCESSOR} {rest}")),
            None => Cow::Borrowed(&self.0),
        }
    }

    /// Split the directive into processor name and arguments.
    ///
    /// Produces the same tokens as splitting [`normalized`](Self::normalized)
    /// without allocating the rewritten line. An empty command yields an
    /// empty name.
    #[must_use]
    pub fn parse(&self) -> ParsedCommand<'_> {
        if let Some(rest) = self.0.strip_prefix(EXTERNAL_PREFIX) {
            return ParsedCommand {
                name: EXTERNAL_PROCESSOR,
                args: rest.split(' ').collect(),
            };
        }

        let mut bits = self.0.split(' ');
        let name = bits.next().unwrap_or_default();
        ParsedCommand {
            name,
            args: bits.collect(),
        }
    }
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        Self::new(line)
    }
}

impl From<String> for Command {
    fn from(line: String) -> Self {
        Self(line)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
