//! External program processor.
//!
//! `external tr a-z A-Z` (or the shorthand `:tr a-z A-Z`) runs the program with
//! the page content on stdin and replaces the content with its stdout.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use quire_processor::{Mode, Page, Processor, ProcessorError};

use crate::BuiltinError;

/// Pipes page content through an external program.
///
/// The program runs in the directory of the page's source file.
pub struct External;

impl Processor for External {
    fn process(&self, page: &mut Page, args: &[&str]) -> Result<(), ProcessorError> {
        let Some((program, program_args)) = args.split_first().filter(|(p, _)| !p.is_empty())
        else {
            return Err(BuiltinError::MissingArgument {
                processor: "external",
                expected: "a program to run",
            }
            .into());
        };

        let mut command = Command::new(program);
        command
            .args(program_args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = page.source.parent().filter(|d| !d.as_os_str().is_empty()) {
            command.current_dir(dir);
        }

        tracing::debug!(program, args = ?program_args, "Spawning external processor");
        let mut child = command.spawn().map_err(|source| BuiltinError::Spawn {
            program: (*program).to_owned(),
            source,
        })?;

        // Feed stdin from a separate thread so a program that writes before
        // reading all input cannot deadlock on a full pipe.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = page.content.clone();
            std::thread::spawn(move || stdin.write_all(input.as_bytes()))
        });

        let output = child.wait_with_output().map_err(BuiltinError::Io)?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Ok(())) => {}
                // The program may exit without reading its input.
                Ok(Err(err)) if err.kind() == io::ErrorKind::BrokenPipe => {}
                Ok(Err(err)) => return Err(BuiltinError::Io(err).into()),
                Err(_) => {
                    return Err(
                        BuiltinError::Io(io::Error::other("stdin writer panicked")).into(),
                    );
                }
            }
        }

        if !output.status.success() {
            return Err(BuiltinError::ExitStatus {
                program: (*program).to_owned(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            }
            .into());
        }

        page.content =
            String::from_utf8(output.stdout).map_err(|_| BuiltinError::NonUtf8Output {
                program: (*program).to_owned(),
            })?;
        Ok(())
    }

    fn description(&self) -> &str {
        "pipe page content through a program (external <program> [args...], or :<program> [args...])"
    }

    fn mode(&self) -> Mode {
        Mode::POST
    }
}
