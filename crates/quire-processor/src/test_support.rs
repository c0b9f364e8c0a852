//! Recording processors for tests.

use std::sync::{Arc, Mutex};

use crate::{Mode, Page, Processor, ProcessorError, ProcessorMap};

/// One recorded `process` call.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Call {
    pub(crate) path: String,
    pub(crate) args: Vec<String>,
}

pub(crate) type Calls = Arc<Mutex<Vec<Call>>>;

/// Processor that records its invocations and optionally fails.
pub(crate) struct Recorder {
    mode: Mode,
    description: String,
    calls: Calls,
    failure: Option<String>,
}

impl Recorder {
    pub(crate) fn new(mode: Mode, description: &str) -> (Box<dyn Processor>, Calls) {
        Self::build(mode, description, None)
    }

    pub(crate) fn failing(mode: Mode, message: &str) -> (Box<dyn Processor>, Calls) {
        Self::build(mode, "always fails", Some(message.to_owned()))
    }

    fn build(
        mode: Mode,
        description: &str,
        failure: Option<String>,
    ) -> (Box<dyn Processor>, Calls) {
        let calls = Calls::default();
        let recorder = Self {
            mode,
            description: description.to_owned(),
            calls: Arc::clone(&calls),
            failure,
        };
        (Box::new(recorder), calls)
    }
}

impl Processor for Recorder {
    fn process(&self, page: &mut Page, args: &[&str]) -> Result<(), ProcessorError> {
        self.calls.lock().unwrap().push(Call {
            path: page.path.clone(),
            args: args.iter().map(|arg| (*arg).to_owned()).collect(),
        });
        match &self.failure {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn mode(&self) -> Mode {
        self.mode
    }
}

pub(crate) fn registry<'a>(
    entries: impl IntoIterator<Item = (&'a str, Box<dyn Processor>)>,
) -> ProcessorMap {
    entries
        .into_iter()
        .map(|(name, processor)| (name.to_owned(), processor))
        .collect()
}
