//! Secret and setting lookup
//!
//! Values are read from the process environment first and then from an
//! optional `.env` file. The file is parsed once; the process environment is
//! never modified.

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum EnvError {
    /// The `.env` file exists but could not be parsed
    #[error("Failed to read env file '{path}': {detail}")]
    File { path: String, detail: String },
}

/// Layered key-value source: process environment, then `.env` file
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    file_values: HashMap<String, String>,
    use_process_env: bool,
}

impl EnvSource {
    /// Read only the process environment
    pub fn from_process() -> Self {
        Self {
            file_values: HashMap::new(),
            use_process_env: true,
        }
    }

    /// Read the process environment, falling back to the given `.env` file
    ///
    /// A missing file is not an error; it simply contributes no values.
    pub fn with_file(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let path = path.as_ref();
        let mut source = Self::from_process();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "env file not found, using process env only");
            return Ok(source);
        }

        let to_error = |e: dotenvy::Error| EnvError::File {
            path: path.display().to_string(),
            detail: e.to_string(),
        };

        for item in dotenvy::from_path_iter(path).map_err(to_error)? {
            let (key, value) = item.map_err(to_error)?;
            // Editors on Windows like to prepend a byte order mark
            let key = key.trim_start_matches('\u{feff}').trim().to_string();
            source.file_values.insert(key, value.trim().to_string());
        }

        tracing::debug!(
            path = %path.display(),
            keys = source.file_values.len(),
            "loaded env file"
        );
        Ok(source)
    }

    /// Build a source from explicit pairs, ignoring the process environment
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            file_values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            use_process_env: false,
        }
    }

    /// Look up a key; blank values count as absent
    pub fn get(&self, name: &str) -> Option<String> {
        if self.use_process_env {
            if let Ok(value) = std::env::var(name) {
                let value = value.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }

        self.file_values
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Look up the first key that has a value
    pub fn get_any(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|name| self.get(name))
    }
}
