//! Persist generated schemas as `<title>_<yyyyMMddHHmmss>_jsonschema.json`.
use std::fs::{File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::describe::Describe;
use crate::error::Result;
use crate::schema::SchemaDocument;
use crate::settings::GeneratorSettings;
use crate::translate::SchemaGenerator;

/// File stem used for documents without a title (generated from a null input).
pub const UNTITLED: &str = "untitled";

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const FILE_SUFFIX: &str = "jsonschema.json";

static UNSAFE_FILE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9._\-]+").expect("static regex"));

#[derive(Debug, Clone)]
pub struct SchemaWriter {
    generator: SchemaGenerator,
    target_dir: PathBuf,
    pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSchema {
    pub path: PathBuf,
    pub text: String,
}

impl SchemaWriter {
    pub fn new(settings: &GeneratorSettings) -> Self {
        Self {
            generator: SchemaGenerator::new(settings),
            target_dir: settings.target_dir.clone(),
            pretty: settings.pretty,
        }
    }

    pub fn generator(&self) -> &SchemaGenerator {
        &self.generator
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    pub fn generate_and_write<T>(&self, value: Option<&T>) -> Result<WrittenSchema>
    where
        T: Describe + Serialize + ?Sized,
    {
        self.write(&self.generator.generate(value))
    }

    /// Serialize `doc` and write it to a fresh file; never overwrites.
    pub fn write(&self, doc: &SchemaDocument) -> Result<WrittenSchema> {
        let text = if self.pretty { doc.to_json_pretty()? } else { doc.to_json_string()? };
        let stem = doc.title().map(sanitize_title).unwrap_or_else(|| UNTITLED.to_string());
        let timestamp = Local::now();

        let mut attempt = 0_u32;
        loop {
            let path = self.target_dir.join(file_name(&stem, &timestamp, attempt));
            match create_fresh(&path, |file| file.write_all(text.as_bytes())) {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote schema");
                    return Ok(WrittenSchema { path, text });
                }
                // same title within the same second
                Err(error) if error.kind() == ErrorKind::AlreadyExists => attempt += 1,
                Err(error) => return Err(error.into()),
            }
        }
    }
}

/// Create `path`, which must not exist yet, and fill it. A partially written
/// file is removed before the error is returned.
fn create_fresh(path: &Path, fill: impl FnOnce(&mut File) -> io::Result<()>) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    if let Err(error) = fill(&mut file) {
        drop(file);
        let _ = std::fs::remove_file(path);
        return Err(error);
    }
    Ok(())
}

/// `<stem>_<timestamp>_jsonschema.json`, with `_<n>` before the suffix on retries.
pub fn file_name(stem: &str, timestamp: &DateTime<Local>, attempt: u32) -> String {
    let timestamp = timestamp.format(TIMESTAMP_FORMAT);
    if attempt == 0 {
        format!("{stem}_{timestamp}_{FILE_SUFFIX}")
    } else {
        format!("{stem}_{timestamp}_{attempt}_{FILE_SUFFIX}")
    }
}

/// Keep a title usable as a single path component.
pub fn sanitize_title(title: &str) -> String {
    let cleaned = UNSAFE_FILE_CHARS.replace_all(title.trim(), "_");
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() { UNTITLED.to_string() } else { cleaned.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn writer_in(dir: &Path) -> SchemaWriter {
        SchemaWriter::new(&GeneratorSettings {
            target_dir: dir.to_path_buf(),
            ..GeneratorSettings::default()
        })
    }

    #[test]
    fn file_name_pattern() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(file_name("Car", &at, 0), "Car_20240309070501_jsonschema.json");
        assert_eq!(file_name("Car", &at, 2), "Car_20240309070501_2_jsonschema.json");
    }

    #[test]
    fn titles_are_sanitized() {
        assert_eq!(sanitize_title("Car"), "Car");
        assert_eq!(sanitize_title("../etc/passwd"), "_etc_passwd");
        assert_eq!(sanitize_title("Map<String, Value>"), "Map_String_Value_");
        assert_eq!(sanitize_title(".."), UNTITLED);
    }

    #[test]
    fn writes_named_file_and_returns_text() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(dir.path());
        let written = writer.write(&writer.generator().generate_json(&json!({ "id": 1 }))).unwrap();

        let name = written.path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("Value_"), "{name}");
        assert!(name.ends_with("_jsonschema.json"), "{name}");
        assert_eq!(std::fs::read_to_string(&written.path).unwrap(), written.text);
        assert!(written.text.contains("\n  \"$schema\""));
    }

    #[test]
    fn null_document_uses_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(dir.path());
        let written = writer.generate_and_write::<serde_json::Value>(None).unwrap();
        let name = written.path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("untitled_"), "{name}");
        assert_eq!(written.text, "{\n  \"type\": \"null\"\n}");
    }

    #[test]
    fn repeated_writes_never_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(dir.path());
        let doc = writer.generator().generate_json(&json!({ "id": 1 }));
        let paths: Vec<PathBuf> = (0..3).map(|_| writer.write(&doc).unwrap().path).collect();
        assert_ne!(paths[0], paths[1]);
        assert_ne!(paths[1], paths[2]);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let writer = writer_in(&dir.path().join("missing"));
        let err = writer.generate_and_write(Some(&json!({ "id": 1 }))).unwrap_err();
        match err {
            crate::Error::Io(error) => assert_eq!(error.kind(), ErrorKind::NotFound),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn failed_fill_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Car_20240309070501_jsonschema.json");
        let err = create_fresh(&path, |file| {
            file.write_all(b"{\"$schema\"")?;
            Err(io::Error::new(ErrorKind::WriteZero, "disk full"))
        })
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WriteZero);
        assert!(!path.exists());

        create_fresh(&path, |file| file.write_all(b"{}")).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
        let err = create_fresh(&path, |file| file.write_all(b"[]")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn compact_output() {
        let dir = tempfile::tempdir().unwrap();
        let writer = SchemaWriter::new(&GeneratorSettings {
            target_dir: dir.path().to_path_buf(),
            pretty: false,
            ..GeneratorSettings::default()
        });
        let written = writer.generate_and_write(Some(&json!({ "id": 1 }))).unwrap();
        assert_eq!(
            written.text,
            concat!(
                r#"{"$schema":"http://json-schema.org/draft-04/schema#","title":"Value","type":"object","#,
                r#""properties":{"id":{"type":"integer"}},"required":["id"]}"#,
            ),
        );
    }
}
