//! Command dispatch.
//!
//! Resolves a [`Command`] against the [`Site`] registry and runs the matching
//! processor when it belongs to the requested [`Phase`].

use crate::{Command, Page, Phase, ProcessorError, Site};

/// Error returned by command dispatch.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The command names a processor that is not registered.
    #[error("processor '{name}' not found")]
    ProcessorNotFound {
        /// Name parsed from the command.
        name: String,
    },
    /// The processor ran and failed.
    ///
    /// The display prefixes the processor name. The processor's own error is
    /// kept as-is and is returned by [`std::error::Error::source`].
    #[error("processor '{name}' failed: {source}")]
    Processor {
        /// Name of the failing processor.
        name: String,
        /// Error returned by the processor, unchanged.
        #[source]
        source: ProcessorError,
    },
}

impl Site {
    /// Run a single command against `page` for one phase.
    ///
    /// Processors outside `phase` are skipped and `Ok(())` is returned
    /// without calling them. Nothing is retried or rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::ProcessorNotFound`] if the command's name is not
    /// registered (including the empty name of an empty command), and
    /// [`DispatchError::Processor`] if the processor itself fails. The latter
    /// wraps the processor's error without altering it; reach it via `source()`.
    pub fn process_command(
        &self,
        page: &mut Page,
        command: &Command,
        phase: Phase,
    ) -> Result<(), DispatchError> {
        let parsed = command.parse();

        let Some(processor) = self.processor(parsed.name) else {
            return Err(DispatchError::ProcessorNotFound {
                name: parsed.name.to_owned(),
            });
        };

        if !processor.mode().runs_in(phase) {
            tracing::trace!(processor = parsed.name, %phase, "Not in phase, skipped");
            return Ok(());
        }

        tracing::debug!(
            processor = parsed.name,
            args = ?parsed.args,
            page = %page.path,
            %phase,
            "Running processor"
        );

        processor
            .process(page, &parsed.args)
            .map_err(|source| DispatchError::Processor {
                name: parsed.name.to_owned(),
                source,
            })
    }

    /// Replay all of the page's commands, in order, for one phase.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first dispatch error. Changes made by earlier
    /// commands stay applied.
    pub fn process_page(&self, page: &mut Page, phase: Phase) -> Result<(), DispatchError> {
        let commands = page.commands.clone();
        for command in &commands {
            self.process_command(page, command, phase)?;
        }
        Ok(())
    }

    /// Run the page through the pre phase, then the post phase.
    ///
    /// # Errors
    ///
    /// Returns the first dispatch error from either pass.
    pub fn process(&self, page: &mut Page) -> Result<(), DispatchError> {
        for phase in Phase::ALL {
            self.process_page(page, phase)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::test_support::{Call, Recorder, registry};
    use crate::{Mode, Processor, ProcessorMap};

    fn call(path: &str, args: &[&str]) -> Call {
        Call {
            path: path.to_owned(),
            args: args.iter().map(|arg| (*arg).to_owned()).collect(),
        }
    }

    #[test]
    fn test_post_processor_skipped_in_pre_phase() {
        let (markdown, calls) = Recorder::new(Mode::POST, "render markdown");
        let site = Site::with_processors(registry([("markdown", markdown)]));
        let mut page = Page::new("index.md", "index.md", "");

        site.process_command(&mut page, &"markdown".into(), Phase::Pre)
            .unwrap();
        assert!(calls.lock().unwrap().is_empty());

        site.process_command(&mut page, &"markdown".into(), Phase::Post)
            .unwrap();
        assert_eq!(*calls.lock().unwrap(), vec![call("index.md", &[])]);
    }

    #[test]
    fn test_pre_processor_skipped_in_post_phase() {
        let (ext, calls) = Recorder::new(Mode::PRE, "change extension");
        let site = Site::with_processors(registry([("ext", ext)]));
        let mut page = Page::new("a.md", "a.md", "");

        site.process_command(&mut page, &"ext .html".into(), Phase::Post)
            .unwrap();
        assert!(calls.lock().unwrap().is_empty());

        site.process_command(&mut page, &"ext .html".into(), Phase::Pre)
            .unwrap();
        assert_eq!(*calls.lock().unwrap(), vec![call("a.md", &[".html"])]);
    }

    #[test]
    fn test_processor_without_phase_flags_runs_in_post() {
        let (plain, calls) = Recorder::new(Mode::empty(), "no flags");
        let site = Site::with_processors(registry([("plain", plain)]));
        let mut page = Page::default();

        site.process_command(&mut page, &"plain".into(), Phase::Pre)
            .unwrap();
        site.process_command(&mut page, &"plain".into(), Phase::Post)
            .unwrap();
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_hidden_does_not_affect_dispatch() {
        let (tpl, calls) = Recorder::new(Mode::PRE | Mode::HIDDEN, "templating");
        let site = Site::with_processors(registry([("tpl", tpl)]));
        let mut page = Page::default();

        site.process_command(&mut page, &"tpl base".into(), Phase::Pre)
            .unwrap();
        assert_eq!(*calls.lock().unwrap(), vec![call("", &["base"])]);
    }

    #[test]
    fn test_external_shorthand_dispatch() {
        let (external, calls) = Recorder::new(Mode::POST, "run a command");
        let site = Site::with_processors(registry([("external", external)]));
        let mut page = Page::default();

        site.process_command(&mut page, &":echo hi".into(), Phase::Post)
            .unwrap();
        site.process_command(&mut page, &"external echo hi".into(), Phase::Post)
            .unwrap();

        let calls = calls.lock().unwrap();
        assert_eq!(calls[0], call("", &["echo", "hi"]));
        assert_eq!(calls[0], calls[1]);
    }

    #[test]
    fn test_external_shorthand_requires_registration() {
        let (echo, calls) = Recorder::new(Mode::POST, "echo");
        let site = Site::with_processors(registry([("echo", echo)]));
        let mut page = Page::default();

        let err = site
            .process_command(&mut page, &":echo hi".into(), Phase::Post)
            .unwrap_err();
        assert!(
            matches!(&err, DispatchError::ProcessorNotFound { name } if name == "external"),
            "got {err:?}"
        );
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_processor() {
        let site = Site::new();
        let mut page = Page::default();

        let err = site
            .process_command(&mut page, &"foo bar".into(), Phase::Post)
            .unwrap_err();
        assert!(matches!(&err, DispatchError::ProcessorNotFound { name } if name == "foo"));
        assert_eq!(err.to_string(), "processor 'foo' not found");
    }

    #[test]
    fn test_unknown_processor_reported_in_either_phase() {
        let (markdown, calls) = Recorder::new(Mode::POST, "render markdown");
        let site = Site::with_processors(registry([("markdown", markdown)]));
        let mut page = Page::default();

        for phase in Phase::ALL {
            let err = site
                .process_command(&mut page, &"missing".into(), phase)
                .unwrap_err();
            assert!(matches!(err, DispatchError::ProcessorNotFound { .. }));
        }
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_empty_command_is_not_found() {
        let (markdown, _) = Recorder::new(Mode::POST, "render markdown");
        let site = Site::with_processors(registry([("markdown", markdown)]));
        let mut page = Page::default();

        let err = site
            .process_command(&mut page, &Command::default(), Phase::Post)
            .unwrap_err();
        assert!(matches!(&err, DispatchError::ProcessorNotFound { name } if name.is_empty()));
    }

    #[test]
    fn test_processor_error_propagated() {
        let (broken, calls) = Recorder::failing(Mode::POST, "template missing");
        let site = Site::with_processors(registry([("template", broken)]));
        let mut page = Page::default();

        let err = site
            .process_command(&mut page, &"template base.html".into(), Phase::Post)
            .unwrap_err();

        assert!(matches!(&err, DispatchError::Processor { name, .. } if name == "template"));
        assert_eq!(
            err.to_string(),
            "processor 'template' failed: template missing"
        );
        assert_eq!(err.source().unwrap().to_string(), "template missing");
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_processor_error_skipped_outside_phase() {
        let (broken, calls) = Recorder::failing(Mode::PRE, "boom");
        let site = Site::with_processors(registry([("broken", broken)]));
        let mut page = Page::default();

        site.process_command(&mut page, &"broken".into(), Phase::Post)
            .unwrap();
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_args_passed_verbatim() {
        let (external, calls) = Recorder::new(Mode::POST, "run a command");
        let site = Site::with_processors(registry([("external", external)]));
        let mut page = Page::default();

        // Arguments with spaces cannot be expressed: quotes are kept as-is.
        site.process_command(&mut page, &r#":echo "a b""#.into(), Phase::Post)
            .unwrap();
        assert_eq!(
            *calls.lock().unwrap(),
            vec![call("", &["echo", "\"a", "b\""])]
        );
    }

    /// Appends its name to the page content, recording phase order.
    struct Append {
        text: &'static str,
        mode: Mode,
    }

    impl Processor for Append {
        fn process(&self, page: &mut Page, args: &[&str]) -> Result<(), ProcessorError> {
            page.content.push_str(self.text);
            for arg in args {
                page.content.push_str(arg);
            }
            Ok(())
        }

        fn description(&self) -> &str {
            self.text
        }

        fn mode(&self) -> Mode {
            self.mode
        }
    }

    fn append_site() -> Site {
        let mut processors = ProcessorMap::new();
        processors.insert(
            "pre".to_owned(),
            Box::new(Append {
                text: "[pre]",
                mode: Mode::PRE,
            }),
        );
        processors.insert(
            "post".to_owned(),
            Box::new(Append {
                text: "[post]",
                mode: Mode::POST,
            }),
        );
        Site::with_processors(processors)
    }

    #[test]
    fn test_process_runs_pre_pass_before_post_pass() {
        let site = append_site();
        let mut page = Page::default().with_commands(["post 1", "pre 2", "post 3", "pre 4"]);

        site.process(&mut page).unwrap();
        assert_eq!(page.content, "[pre]2[pre]4[post]1[post]3");
    }

    #[test]
    fn test_process_page_single_phase() {
        let site = append_site();
        let mut page = Page::default().with_commands(["post a", "pre b"]);

        site.process_page(&mut page, Phase::Pre).unwrap();
        assert_eq!(page.content, "[pre]b");
    }

    #[test]
    fn test_process_stops_at_first_error_without_rollback() {
        let site = append_site();
        let mut page = Page::default().with_commands(["pre 1", "missing", "pre 2"]);

        let err = site.process(&mut page).unwrap_err();
        assert!(matches!(&err, DispatchError::ProcessorNotFound { name } if name == "missing"));
        assert_eq!(page.content, "[pre]1");
    }

    #[test]
    fn test_concurrent_dispatch_shares_registry() {
        let (markdown, calls) = Recorder::new(Mode::POST, "render markdown");
        let site = Arc::new(Site::with_processors(registry([("markdown", markdown)])));
        let errors = Arc::new(Mutex::new(Vec::new()));

        std::thread::scope(|scope| {
            for i in 0..4 {
                let site = Arc::clone(&site);
                let errors = Arc::clone(&errors);
                scope.spawn(move || {
                    let mut page = Page::new("", format!("page-{i}.md"), "");
                    if let Err(err) =
                        site.process_command(&mut page, &"markdown".into(), Phase::Post)
                    {
                        errors.lock().unwrap().push(err.to_string());
                    }
                });
            }
        });

        assert!(errors.lock().unwrap().is_empty());
        assert_eq!(calls.lock().unwrap().len(), 4);
    }
}
