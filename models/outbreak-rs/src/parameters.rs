use mrp::Environment;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::error::{OutbreakError, OutbreakResult};

const KNOWN_KEYS: [&str; 2] = ["days", "trajectory"];

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Parameters {
    /// Day to report, day 1 being the first patient's infection.
    pub days: i64,
    /// Write every day's counts as CSV instead of the final total.
    #[serde(default)]
    pub trajectory: bool,
}

/// Reads the run input: either a bare day count or a run envelope in JSON
/// or TOML.
pub fn load(raw: &str) -> OutbreakResult<Environment<Parameters>> {
    let trimmed = raw.trim();
    let env = if let Ok(days) = trimmed.parse::<i64>() {
        Environment::from_json(json!({ "input": { "days": days } }))
    } else if trimmed.is_empty() || trimmed.starts_with('{') || trimmed.contains('=') {
        // Empty input is reported by the envelope parser.
        Environment::parse(trimmed)?
    } else {
        return Err(OutbreakError::MalformedInput(format!(
            "expected a day count, got {trimmed:?}"
        )));
    };

    for key in env.input_json().keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn!(key = %key, "ignoring unknown input key");
        }
    }
    if env.seed != 0 || env.replicate != 0 {
        warn!(
            seed = env.seed,
            replicate = env.replicate,
            "model is deterministic, seed and replicate are ignored"
        );
    }

    Ok(env.with_input_type::<Parameters>()?)
}
