pub mod error;

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

pub use error::{MrpError, MrpResult};

pub struct Environment<I = ()> {
    input_json: serde_json::Map<String, Value>,
    pub input: Option<I>,
    pub seed: u64,
    pub replicate: u64,
    pub files: HashMap<String, PathBuf>,
    output: Value,
}

impl Environment {
    pub fn from_json(data: Value) -> Self {
        let mut input_json = data
            .get("input")
            .and_then(|v| v.as_object())
            .cloned()
            .unwrap_or_default();

        let seed = take_u64(&mut input_json, "seed");
        let replicate = take_u64(&mut input_json, "replicate");

        let files = data
            .get("model")
            .and_then(|m| m.get("files"))
            .and_then(|f| f.as_object())
            .map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), PathBuf::from(s))))
                    .collect()
            })
            .unwrap_or_default();

        let output = data.get("output").cloned().unwrap_or(Value::Null);

        Self {
            input_json,
            input: None,
            seed,
            replicate,
            files,
            output,
        }
    }

    /// Parses a run envelope written either as a JSON object or as a TOML
    /// document with the same tables.
    pub fn parse(raw: &str) -> MrpResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(MrpError::EmptyInput);
        }
        let data: Value = if raw.starts_with('{') {
            serde_json::from_str(raw)?
        } else {
            let doc: toml::Table = toml::from_str(raw)?;
            debug!("parsed TOML run envelope");
            serde_json::to_value(doc)?
        };
        Ok(Self::from_json(data))
    }

    pub fn read_stdin() -> MrpResult<String> {
        let mut raw = String::new();
        io::stdin().read_to_string(&mut raw)?;
        Ok(raw)
    }

    pub fn with_input_type<I: DeserializeOwned>(self) -> MrpResult<Environment<I>> {
        let input_value = Value::Object(self.input_json.clone());
        let input = serde_json::from_value(input_value).map_err(MrpError::InvalidInput)?;
        Ok(Environment {
            input_json: self.input_json,
            input: Some(input),
            seed: self.seed,
            replicate: self.replicate,
            files: self.files,
            output: self.output,
        })
    }
}

impl<I> Environment<I> {
    pub fn input_json(&self) -> &serde_json::Map<String, Value> {
        &self.input_json
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        let output = &self.output;

        // Flat output
        if output.get("spec").and_then(|v| v.as_str()) == Some("filesystem") {
            return output
                .get("dir")
                .and_then(|v| v.as_str())
                .map(PathBuf::from);
        }

        // Profiled output, "default" wins when present
        if let Some(profiles) = output.get("profile").and_then(|v| v.as_object()) {
            let selected = profiles
                .get("default")
                .or_else(|| profiles.values().next());
            if let Some(profile) = selected
                && profile.get("spec").and_then(|v| v.as_str()) == Some("filesystem")
            {
                return profile
                    .get("dir")
                    .and_then(|v| v.as_str())
                    .map(PathBuf::from);
            }
        }

        None
    }

    pub fn write(&self, filename: &str, data: &[u8]) -> MrpResult<()> {
        if let Some(dir) = self.output_dir() {
            fs::create_dir_all(&dir)?;
            let path = dir.join(filename);
            debug!(path = %path.display(), bytes = data.len(), "writing output file");
            fs::write(path, data)?;
        } else {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.flush()?;
        }
        Ok(())
    }

    pub fn write_csv(&self, filename: &str, headers: &[&str], rows: &[Vec<String>]) -> MrpResult<()> {
        if let Some(dir) = self.output_dir() {
            fs::create_dir_all(&dir)?;
            let path = dir.join(filename);
            debug!(path = %path.display(), rows = rows.len(), "writing csv output");
            write_records(csv::Writer::from_path(path)?, headers, rows)
        } else {
            write_records(csv::Writer::from_writer(io::stdout()), headers, rows)
        }
    }
}

/// Removes a protocol key from the model input, defaulting to 0.
fn take_u64(input: &mut serde_json::Map<String, Value>, key: &str) -> u64 {
    input.remove(key).and_then(|v| v.as_u64()).unwrap_or(0)
}

fn write_records<W: Write>(
    mut wtr: csv::Writer<W>,
    headers: &[&str],
    rows: &[Vec<String>],
) -> MrpResult<()> {
    wtr.write_record(headers)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Params {
        days: i64,
    }

    #[test]
    fn test_from_json_basic() {
        let data = json!({
            "input": {
                "seed": 42,
                "replicate": 1,
                "days": 30
            },
            "model": {
                "files": {
                    "reference": "/tmp/reference.csv"
                }
            },
            "output": {
                "spec": "filesystem",
                "dir": "/tmp/output"
            }
        });
        let ctx = Environment::from_json(data);
        assert_eq!(ctx.seed, 42);
        assert_eq!(ctx.replicate, 1);
        assert_eq!(ctx.input_json().get("days").unwrap().as_i64().unwrap(), 30);
        assert!(!ctx.input_json().contains_key("seed"));
        assert!(!ctx.input_json().contains_key("replicate"));
        assert_eq!(
            ctx.files.get("reference").unwrap(),
            &PathBuf::from("/tmp/reference.csv")
        );
        assert_eq!(ctx.output_dir(), Some(PathBuf::from("/tmp/output")));
    }

    #[test]
    fn test_with_input_type() {
        let data = json!({
            "input": {
                "seed": 42,
                "days": 12
            }
        });
        let ctx = Environment::from_json(data).with_input_type::<Params>().unwrap();
        assert_eq!(ctx.input, Some(Params { days: 12 }));
        assert_eq!(ctx.seed, 42);
    }

    #[test]
    fn test_with_input_type_rejects_bad_field() {
        let data = json!({ "input": { "days": "twelve" } });
        let err = Environment::from_json(data)
            .with_input_type::<Params>()
            .err()
            .unwrap();
        assert!(matches!(err, MrpError::InvalidInput(_)));
    }

    #[test]
    fn test_parse_json_envelope() {
        let ctx = Environment::parse(r#" {"input": {"days": 7, "seed": 3}} "#).unwrap();
        assert_eq!(ctx.seed, 3);
        assert_eq!(ctx.input_json().get("days").unwrap().as_i64(), Some(7));
    }

    #[test]
    fn test_parse_toml_envelope() {
        let raw = r#"
            [input]
            days = 9
            replicate = 2

            [output]
            spec = "filesystem"
            dir = "/tmp/toml-out"
        "#;
        let ctx = Environment::parse(raw).unwrap();
        assert_eq!(ctx.replicate, 2);
        assert_eq!(ctx.input_json().get("days").unwrap().as_i64(), Some(9));
        assert_eq!(ctx.output_dir(), Some(PathBuf::from("/tmp/toml-out")));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            Environment::parse("  \n").err().unwrap(),
            MrpError::EmptyInput
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            Environment::parse("{ not json").err().unwrap(),
            MrpError::Json(_)
        ));
        assert!(matches!(
            Environment::parse("days").err().unwrap(),
            MrpError::Toml(_)
        ));
    }

    #[test]
    fn test_output_dir_profiled() {
        let data = json!({
            "input": { "days": 20, "trajectory": true },
            "output": {
                "profile": {
                    "scratch": { "spec": "filesystem", "dir": "/tmp/outbreak-scratch" },
                    "default": { "spec": "filesystem", "dir": "/tmp/outbreak-runs" }
                }
            }
        });
        let ctx = Environment::from_json(data);
        assert_eq!(ctx.output_dir(), Some(PathBuf::from("/tmp/outbreak-runs")));
    }

    #[test]
    fn test_output_dir_profiled_without_default() {
        let data = json!({
            "input": { "days": 20 },
            "output": {
                "profile": {
                    "console": { "spec": "stdout" }
                }
            }
        });
        assert_eq!(Environment::from_json(data).output_dir(), None);
    }

    #[test]
    fn test_output_dir_stdout_spec() {
        let data = json!({
            "input": { "days": 6 },
            "output": { "spec": "stdout", "dir": "/tmp/ignored" }
        });
        assert_eq!(Environment::from_json(data).output_dir(), None);
    }

    #[test]
    fn test_bare_input_defaults() {
        let ctx = Environment::from_json(json!({ "input": { "days": 1 } }));
        assert_eq!(ctx.seed, 0);
        assert_eq!(ctx.replicate, 0);
        assert_eq!(ctx.input_json().len(), 1);
        assert!(ctx.files.is_empty());
        assert_eq!(ctx.output_dir(), None);
    }

    #[test]
    fn test_write_to_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested");
        let ctx = Environment::from_json(json!({
            "output": { "spec": "filesystem", "dir": dir.to_str().unwrap() }
        }));
        ctx.write("total.txt", b"16\n").unwrap();
        ctx.write_csv("rows.csv", &["day", "total"], &[vec!["1".into(), "1".into()]])
            .unwrap();
        assert_eq!(fs::read_to_string(dir.join("total.txt")).unwrap(), "16\n");
        assert_eq!(
            fs::read_to_string(dir.join("rows.csv")).unwrap(),
            "day,total\n1,1\n"
        );
    }
}
