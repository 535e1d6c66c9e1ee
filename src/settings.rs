//! Generator settings: schema dialect and output location.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_SCHEMA_URL: &str = "http://json-schema.org/draft-04/schema#";
pub const DEFAULT_TARGET_DIR: &str = "schemas";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorSettings {
    /// Written to the root `$schema` key.
    pub schema_url: String,
    /// Directory the writer places schema files in. Must already exist.
    pub target_dir: PathBuf,
    /// Indent written schema files.
    pub pretty: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            schema_url: DEFAULT_SCHEMA_URL.to_string(),
            target_dir: PathBuf::from(DEFAULT_TARGET_DIR),
            pretty: true,
        }
    }
}

impl GeneratorSettings {
    /// Read settings from a JSON file; missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source).map_err(|error| match error {
            Error::Settings { path: json_path, message, .. } => Error::Settings {
                source_path: path.to_path_buf(),
                path: json_path,
                message,
            },
            other => other,
        })
    }

    /// Deserialize with JSON-path context in error messages.
    pub fn from_json_str(src: &str) -> Result<Self> {
        let de = &mut serde_json::Deserializer::from_str(src);
        serde_path_to_error::deserialize::<_, Self>(de).map_err(|err| Error::Settings {
            source_path: PathBuf::new(),
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.schema_url.trim().is_empty() {
            return Err(Error::InvalidSettings("schema_url must not be empty".into()));
        }
        if let Err(error) = url::Url::parse(&self.schema_url) {
            return Err(Error::InvalidSettings(format!(
                "schema_url is not an absolute URI ({error}): {}",
                self.schema_url
            )));
        }
        if self.target_dir.as_os_str().is_empty() {
            return Err(Error::InvalidSettings("target_dir must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_fill_missing_keys() {
        let settings = GeneratorSettings::from_json_str(r#"{ "target_dir": "out" }"#).unwrap();
        assert_eq!(settings.schema_url, DEFAULT_SCHEMA_URL);
        assert_eq!(settings.target_dir, PathBuf::from("out"));
        assert!(settings.pretty);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn errors_carry_the_json_path() {
        let err = GeneratorSettings::from_json_str(r#"{ "pretty": "yes" }"#).unwrap_err();
        match err {
            Error::Settings { path, .. } => assert_eq!(path, "pretty"),
            other => panic!("unexpected error: {other}"),
        }
        let err = GeneratorSettings::from_json_str(r#"{ "schemaUrl": "x" }"#).unwrap_err();
        assert!(matches!(err, Error::Settings { .. }));
    }

    #[test]
    fn load_reports_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "schema_url": 4 }}"#).unwrap();
        let err = GeneratorSettings::load(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("schema_url"), "{message}");
        assert!(message.contains(&file.path().display().to_string()), "{message}");
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut settings = GeneratorSettings::default();
        settings.schema_url = "  ".into();
        assert!(settings.validate().is_err());

        settings.schema_url = "draft-04".into();
        assert!(settings.validate().is_err());

        settings.schema_url = "http://".into();
        assert!(settings.validate().is_err());

        settings.schema_url = "urn:example:dialect".into();
        assert!(settings.validate().is_ok());

        settings.schema_url = "https://json-schema.org/draft/2020-12/schema".into();
        settings.target_dir = PathBuf::new();
        assert!(settings.validate().is_err());
    }
}
