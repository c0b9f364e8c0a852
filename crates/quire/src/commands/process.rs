//! `quire process` command implementation.

use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use clap::Args;
use quire_config::{CliSettings, Config};
use quire_processor::{Page, Site};
use quire_processors::builtin_processors;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the process command.
#[derive(Args)]
pub(crate) struct ProcessArgs {
    /// Source file to process.
    file: PathBuf,

    /// Command to apply, repeatable (default: `[commands] default` from config).
    #[arg(short = 'C', long = "command", value_name = "COMMAND")]
    commands: Vec<String>,

    /// Write the result to stdout instead of the output directory.
    #[arg(long)]
    stdout: bool,

    /// Path to configuration file (default: auto-discover quire.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ProcessArgs {
    /// Execute the process command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the source cannot be read,
    /// a command fails, or the result cannot be written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let commands = if self.commands.is_empty() {
            config.commands.default.clone()
        } else {
            self.commands
        };
        if commands.is_empty() {
            return Err(CliError::Validation(
                "no commands given: pass --command or set [commands] default in quire.toml"
                    .to_owned(),
            ));
        }

        let content = fs::read_to_string(&self.file)?;
        let path = page_path(&self.file, &config.site_resolved.source_dir);
        let mut page = Page::new(&self.file, path, content).with_commands(commands);

        let site = Site::with_processors(builtin_processors());
        site.process(&mut page)?;

        if page.ignored {
            output.ignored(&self.file);
            return Ok(());
        }

        if self.stdout {
            let mut out = io::stdout().lock();
            out.write_all(page.content.as_bytes())?;
            out.flush()?;
            return Ok(());
        }

        let target = output_target(&config.site_resolved.output_dir, &page.path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &page.content)?;
        tracing::info!(source = %self.file.display(), target = %target.display(), "Page written");
        output.written(&self.file, &target);

        Ok(())
    }
}

/// Output path of `file` relative to `source_dir`, `/`-separated.
///
/// Files outside the source directory keep only their file name.
fn page_path(file: &Path, source_dir: &Path) -> String {
    let file_abs = file.canonicalize().unwrap_or_else(|_| file.to_path_buf());
    let source_abs = source_dir
        .canonicalize()
        .unwrap_or_else(|_| source_dir.to_path_buf());

    let relative = match file_abs.strip_prefix(&source_abs) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => file.file_name().map(PathBuf::from).unwrap_or_default(),
    };

    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Location of `page_path` under `output_dir`.
///
/// Rejects empty paths and paths that are absolute or contain `..`, so a page
/// can never be written outside the output directory.
fn output_target(output_dir: &Path, page_path: &str) -> Result<PathBuf, CliError> {
    let relative = Path::new(page_path);
    let inside = relative
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir));
    if page_path.is_empty() || !inside {
        return Err(CliError::Validation(format!(
            "output path '{page_path}' is not inside the output directory"
        )));
    }
    Ok(output_dir.join(relative))
}
