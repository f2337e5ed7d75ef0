//! Scripted pedal inputs: a list of timed segments, loaded from JSON or picked
//! from a few built-in drives.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown scenario '{0}' (built-ins: launch, cruise, coast, brake, idle)")]
    Unknown(String),
    #[error("scenario '{0}' has no segments")]
    Empty(String),
    #[error("segment {index} of '{name}' has a non-positive duration")]
    BadDuration { name: String, index: usize },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub duration_s: f64,
    #[serde(default)]
    pub throttle: f64,
    #[serde(default)]
    pub brake: f64,
}

impl Segment {
    fn new(duration_s: f64, throttle: f64, brake: f64) -> Self {
        Segment { duration_s, throttle, brake }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub segments: Vec<Segment>,
}

impl Scenario {
    pub fn builtin(name: &str) -> Option<Self> {
        let segments = match name {
            "launch" => vec![Segment::new(20.0, 1.0, 0.0)],
            "cruise" => vec![
                Segment::new(10.0, 1.0, 0.0),
                Segment::new(2.0, 0.0, 0.0),
                Segment::new(30.0, 0.25, 0.0),
            ],
            "coast" => vec![Segment::new(12.0, 1.0, 0.0), Segment::new(20.0, 0.0, 0.0)],
            "brake" => vec![Segment::new(10.0, 1.0, 0.0), Segment::new(8.0, 0.0, 1.0)],
            "idle" => vec![Segment::new(30.0, 0.0, 0.0)],
            _ => return None,
        };
        Some(Scenario {
            name: name.to_string(),
            segments,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// A built-in name, or otherwise a path to a JSON scenario file.
    pub fn load(name_or_path: &str) -> Result<Self, ScenarioError> {
        if let Some(scenario) = Self::builtin(name_or_path) {
            return Ok(scenario);
        }
        let path = Path::new(name_or_path);
        if !path.exists() {
            return Err(ScenarioError::Unknown(name_or_path.to_string()));
        }
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.segments.is_empty() {
            return Err(ScenarioError::Empty(self.name.clone()));
        }
        for (index, segment) in self.segments.iter().enumerate() {
            if !(segment.duration_s > 0.0) {
                return Err(ScenarioError::BadDuration {
                    name: self.name.clone(),
                    index,
                });
            }
        }
        Ok(())
    }

    pub fn duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_s).sum()
    }

    /// Pedal positions `(throttle, brake)` at time `t`; both released after the end.
    pub fn inputs_at(&self, t: f64) -> (f64, f64) {
        let mut start = 0.0;
        for segment in &self.segments {
            let end = start + segment.duration_s;
            if t < end {
                return (segment.throttle, segment.brake);
            }
            start = end;
        }
        (0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_valid() {
        for name in ["launch", "cruise", "coast", "brake", "idle"] {
            let scenario = Scenario::builtin(name).unwrap();
            assert!(scenario.validate().is_ok(), "{}", name);
            assert!(scenario.duration() > 0.0);
        }
        assert!(Scenario::builtin("donuts").is_none());
    }

    #[test]
    fn test_inputs_follow_segments() {
        let scenario = Scenario::builtin("brake").unwrap();
        assert_eq!(scenario.inputs_at(0.0), (1.0, 0.0));
        assert_eq!(scenario.inputs_at(9.99), (1.0, 0.0));
        assert_eq!(scenario.inputs_at(10.0), (0.0, 1.0));
        assert_eq!(scenario.inputs_at(18.0), (0.0, 0.0));
    }

    #[test]
    fn test_parse_json_with_defaults() {
        let json = r#"{ "name": "tip-in", "segments": [
            { "duration_s": 2.0 },
            { "duration_s": 1.5, "throttle": 0.6 }
        ] }"#;
        let scenario = Scenario::from_json_str(json).unwrap();
        assert_eq!(scenario.segments[0], Segment::new(2.0, 0.0, 0.0));
        assert_eq!(scenario.inputs_at(2.5), (0.6, 0.0));
        assert_eq!(scenario.duration(), 3.5);
    }

    #[test]
    fn test_rejects_empty_and_zero_length() {
        let empty = r#"{ "name": "nothing", "segments": [] }"#;
        assert!(matches!(Scenario::from_json_str(empty), Err(ScenarioError::Empty(_))));

        let zero = r#"{ "name": "blink", "segments": [{ "duration_s": 0.0, "throttle": 1.0 }] }"#;
        assert!(matches!(
            Scenario::from_json_str(zero),
            Err(ScenarioError::BadDuration { index: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            Scenario::load("no-such-scenario-file.json"),
            Err(ScenarioError::Unknown(_))
        ));
    }
}
