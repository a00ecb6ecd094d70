//! Generator options.
//!
//! protoc forwards `--erlproto_opt=key=value,...` as the request parameter
//! string; [`GeneratorOptions::from_parameter`] parses it.

use crate::error::CodegenError;

/// Options controlling code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    verbose: bool,
}

impl GeneratorOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { verbose: true }
    }

    /// Sets whether generated files are logged at info level.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns true if generated files are logged at info level.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Parses a comma-separated `key=value` parameter string.
    ///
    /// An empty string yields the defaults.
    ///
    /// # Errors
    /// Returns `CodegenError::Parameter` for unknown keys, missing values and
    /// values that do not parse.
    pub fn from_parameter(parameter: &str) -> Result<Self, CodegenError> {
        let mut options = Self::new();

        for item in parameter.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let Some((key, value)) = item.split_once('=') else {
                return Err(CodegenError::parameter(item, "expected key=value"));
            };

            match key.trim() {
                "verbose" => {
                    let verbose = value
                        .trim()
                        .parse::<bool>()
                        .map_err(|e| CodegenError::parameter(item, e.to_string()))?;
                    options = options.verbose(verbose);
                }
                other => {
                    return Err(CodegenError::parameter(
                        item,
                        format!("unknown option '{other}'"),
                    ));
                }
            }
        }

        Ok(options)
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::new()
    }
}
