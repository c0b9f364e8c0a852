//! `${VAR}` expansion for string fields of `quire.toml`.

use std::borrow::Cow;
use std::env::VarError;

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` in a single value.
///
/// `field` is the dotted key reported when a variable cannot be resolved.
pub(crate) fn expand(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| std::env::var(name).map(Some))
        .map(Cow::into_owned)
        .map_err(|err| {
            let problem = match err.cause {
                VarError::NotPresent => "not set",
                VarError::NotUnicode(_) => "not valid unicode",
            };
            ConfigError::EnvVar {
                field: field.to_owned(),
                message: format!("${{{}}} {problem}", err.var_name),
            }
        })
}

/// Expand an optional field in place. `None` stays `None`.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand(raw, field)?);
    }
    Ok(())
}

/// Expand every entry of a list field in place. Errors report `field[idx]`.
pub(crate) fn expand_list(values: &mut [String], field: &str) -> Result<(), ConfigError> {
    for (idx, value) in values.iter_mut().enumerate() {
        *value = expand(value, &format!("{field}[{idx}]"))?;
    }
    Ok(())
}
