//! Processor modes and build phases.

use std::fmt;

bitflags::bitflags! {
    /// Phase and visibility flags of a processor.
    ///
    /// Flags combine with `|`. A processor without [`PRE`](Self::PRE) runs in
    /// the post phase, whether or not [`POST`](Self::POST) is set.
    /// [`HIDDEN`](Self::HIDDEN) only affects [`Site::summary`](crate::Site::summary).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Mode: u8 {
        /// Runs during the pre phase.
        const PRE = 1;
        /// Omitted from the processor summary.
        const HIDDEN = 1 << 1;
        /// Runs during the post phase.
        const POST = 1 << 2;
    }
}

impl Mode {
    /// Whether the processor belongs to the pre phase.
    #[must_use]
    pub fn is_pre(self) -> bool {
        self.contains(Self::PRE)
    }

    /// Whether the processor is hidden from summaries.
    #[must_use]
    pub fn is_hidden(self) -> bool {
        self.contains(Self::HIDDEN)
    }

    /// Whether a processor with this mode takes part in `phase`.
    #[must_use]
    pub fn runs_in(self, phase: Phase) -> bool {
        self.is_pre() == phase.is_pre()
    }
}

/// One of the two passes over a page's commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// First pass: path and metadata changes.
    Pre,
    /// Second pass: content transformation.
    Post,
}

impl Phase {
    /// Both phases in execution order.
    pub const ALL: [Self; 2] = [Self::Pre, Self::Post];

    /// Whether this is the pre phase.
    #[must_use]
    pub fn is_pre(self) -> bool {
        matches!(self, Self::Pre)
    }
}

impl From<bool> for Phase {
    fn from(pre: bool) -> Self {
        if pre { Self::Pre } else { Self::Post }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pre => f.write_str("pre"),
            Self::Post => f.write_str("post"),
        }
    }
}
