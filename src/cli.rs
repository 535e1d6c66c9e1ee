//! Minimal CLI: JSON documents → persisted JSON Schema files
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use jsonschema_gen::{GeneratorSettings, SchemaDocument, SchemaWriter};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// generate JSON Schema documents from sample JSON files
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    /// only log errors
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// log debug output
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// generate a schema per input document and write it to the target directory
    Schema(SchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// JSON settings file (`schema_url`, `target_dir`, `pretty`)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// value for the root `$schema` key
    #[arg(long)]
    schema_url: Option<String>,

    /// directory schema files are written to (created if missing)
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// write compact JSON instead of indented
    #[arg(long, default_value_t = false)]
    compact: bool,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,

    /// root `title` (defaults to each input's file stem)
    #[arg(long)]
    title: Option<String>,

    /// print schemas to stdout instead of writing files
    #[arg(long, default_value_t = false)]
    stdout: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_process(&self, mut apply: impl FnMut(&Path, serde_json::Value) -> anyhow::Result<()>) -> anyhow::Result<()> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .map_err(|error| anyhow!("failed to resolve input file paths: {error}"))?;
        for source_path in source_paths {
            let source_path_str = source_path.to_string_lossy().to_string();
            tracing::debug!(path = %source_path_str, "reading input");
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read source file ({source_path_str})"))?;
            let json_value = serde_json::from_str::<serde_json::Value>(&source)
                .with_context(|| format!("failed to parse JSON source file ({source_path_str})"))?;
            let json_value = match self.json_pointer.as_deref() {
                None => json_value,
                Some(pointer) => json_value
                    .pointer(pointer)
                    .cloned()
                    .with_context(|| format!("JSON pointer {pointer} matched nothing in {source_path_str}"))?,
            };
            apply(&source_path, json_value)?;
        }
        Ok(())
    }
}

impl OutputSettings {
    fn resolve(&self) -> anyhow::Result<GeneratorSettings> {
        let mut settings = match self.settings.as_ref() {
            Some(path) => GeneratorSettings::load(path)?,
            None => GeneratorSettings::default(),
        };
        if let Some(schema_url) = self.schema_url.as_ref() {
            settings.schema_url = schema_url.clone();
        }
        if let Some(out_dir) = self.out_dir.as_ref() {
            settings.target_dir = out_dir.clone();
        }
        if self.compact {
            settings.pretty = false;
        }
        settings.validate()?;
        Ok(settings)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        init_tracing(self.quiet, self.verbose)?;
        match &self.cmd {
            Command::Schema(target) => {
                let settings = target.output_settings.resolve()?;
                let writer = SchemaWriter::new(&settings);
                if !target.stdout {
                    std::fs::create_dir_all(&settings.target_dir).with_context(|| {
                        format!("failed to create target directory {}", settings.target_dir.display())
                    })?;
                }
                target.input_settings.load_process(|source_path, value| {
                    let mut doc = writer.generator().generate_json(&value);
                    doc.set_title(document_title(target.title.as_deref(), source_path));
                    if target.stdout {
                        println!("{}", render(&doc, settings.pretty)?);
                        return Ok(());
                    }
                    let written = writer.write(&doc)?;
                    tracing::info!(
                        input = %source_path.display(),
                        output = %written.path.display(),
                        "schema written"
                    );
                    Ok(())
                })
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("JSONSCHEMA_GEN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn document_title(explicit: Option<&str>, source_path: &Path) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| source_path.file_stem().map(|stem| stem.to_string_lossy().to_string()))
        .unwrap_or_else(|| jsonschema_gen::writer::UNTITLED.to_string())
}

fn render(doc: &SchemaDocument, pretty: bool) -> jsonschema_gen::Result<String> {
    if pretty { doc.to_json_pretty() } else { doc.to_json_string() }
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                return Err(format!("glob pattern matched no files: {pattern}").into());
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_prefers_flag_then_file_stem() {
        assert_eq!(document_title(Some("Car"), Path::new("data/car.json")), "Car");
        assert_eq!(document_title(None, Path::new("data/car.json")), "car");
    }

    #[test]
    fn literal_and_glob_inputs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();

        let pattern = dir.path().join("*.json").to_string_lossy().to_string();
        let paths = resolve_file_path_patterns([pattern.as_str()]).unwrap();
        assert_eq!(paths.len(), 2);

        let missing = dir.path().join("*.ndjson").to_string_lossy().to_string();
        assert!(resolve_file_path_patterns([missing.as_str()]).is_err());

        let literal = resolve_file_path_patterns(["not-checked.json"]).unwrap();
        assert_eq!(literal, vec![PathBuf::from("not-checked.json")]);
    }

    #[test]
    fn cli_flags_layer_over_defaults() {
        let cli = CommandLineInterface::try_parse_from([
            "jsonschema-gen", "schema", "-i", "a.json", "--out-dir", "out", "--compact",
        ])
        .unwrap();
        let Command::Schema(target) = &cli.cmd;
        let settings = target.output_settings.resolve().unwrap();
        assert_eq!(settings.target_dir, PathBuf::from("out"));
        assert!(!settings.pretty);
        assert_eq!(settings.schema_url, jsonschema_gen::settings::DEFAULT_SCHEMA_URL);
    }
}
