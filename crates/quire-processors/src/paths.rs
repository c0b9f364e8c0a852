//! Output path processors.
//!
//! All of these run in the pre phase so that the final output path is known
//! before content is transformed.

use quire_processor::{Mode, Page, Processor, ProcessorError};

use crate::BuiltinError;

/// Changes the output file extension: `ext .html`.
pub struct Ext;

impl Processor for Ext {
    fn process(&self, page: &mut Page, args: &[&str]) -> Result<(), ProcessorError> {
        let ext = first_arg(args, "ext", "an extension such as .html")?;
        let ext = ext.trim_start_matches('.');

        let (dir, file) = split_file_name(&page.path);
        if file.is_empty() {
            return Err(invalid_path("ext", &page.path, "no file name to change").into());
        }
        let stem = file_stem(file);
        let path = if ext.is_empty() {
            format!("{dir}{stem}")
        } else {
            format!("{dir}{stem}.{ext}")
        };
        page.path = checked_path("ext", path)?;
        Ok(())
    }

    fn description(&self) -> &str {
        "change the output file extension (ext .html)"
    }

    fn mode(&self) -> Mode {
        Mode::PRE
    }
}

/// Sets the output path: `rename about/index.html` or `rename archive/`.
pub struct Rename;

impl Processor for Rename {
    fn process(&self, page: &mut Page, args: &[&str]) -> Result<(), ProcessorError> {
        let target = first_arg(args, "rename", "a target path")?;
        let target = target.trim_start_matches('/');

        let path = if target.ends_with('/') {
            let (_, file) = split_file_name(&page.path);
            format!("{target}{file}")
        } else {
            target.to_owned()
        };
        page.path = checked_path("rename", path)?;
        Ok(())
    }

    fn description(&self) -> &str {
        "change the output path (rename <path>, or rename <dir>/ to keep the file name)"
    }

    fn mode(&self) -> Mode {
        Mode::PRE
    }
}

/// Moves `a/b.html` to `a/b/index.html`.
pub struct Directorify;

impl Processor for Directorify {
    fn process(&self, page: &mut Page, _args: &[&str]) -> Result<(), ProcessorError> {
        let (dir, file) = split_file_name(&page.path);
        let stem = file_stem(file);
        if stem == "index" || stem.is_empty() {
            return Ok(());
        }

        let ext = file_extension(file).unwrap_or("html");
        page.path = checked_path("directorify", format!("{dir}{stem}/index.{ext}"))?;
        Ok(())
    }

    fn description(&self) -> &str {
        "move page to <name>/index.<ext> so it is served from a directory URL"
    }

    fn mode(&self) -> Mode {
        Mode::PRE
    }
}

/// Excludes the page from output.
pub struct Ignore;

impl Processor for Ignore {
    fn process(&self, page: &mut Page, _args: &[&str]) -> Result<(), ProcessorError> {
        page.ignored = true;
        Ok(())
    }

    fn description(&self) -> &str {
        "do not write the page to the output directory"
    }

    fn mode(&self) -> Mode {
        Mode::PRE
    }
}

fn first_arg<'a>(
    args: &[&'a str],
    processor: &'static str,
    expected: &'static str,
) -> Result<&'a str, BuiltinError> {
    args.first()
        .copied()
        .filter(|arg| !arg.is_empty())
        .ok_or(BuiltinError::MissingArgument {
            processor,
            expected,
        })
}

/// Reject paths that would leave the output directory.
fn checked_path(processor: &'static str, path: String) -> Result<String, BuiltinError> {
    if path.split('/').any(|segment| segment == "..") {
        return Err(invalid_path(processor, &path, "'..' segments are not allowed"));
    }
    Ok(path)
}

fn invalid_path(processor: &'static str, path: &str, reason: &'static str) -> BuiltinError {
    BuiltinError::InvalidPath {
        processor,
        path: path.to_owned(),
        reason,
    }
}

/// Split `a/b/c.md` into `("a/b/", "c.md")`.
fn split_file_name(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    }
}

/// File name without its last extension. Dotfiles keep their name.
fn file_stem(file: &str) -> &str {
    match file.rfind('.') {
        Some(idx) if idx > 0 => &file[..idx],
        _ => file,
    }
}

fn file_extension(file: &str) -> Option<&str> {
    match file.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file.len() => Some(&file[idx + 1..]),
        _ => None,
    }
}
