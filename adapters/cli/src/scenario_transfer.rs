#![allow(clippy::missing_errors_doc)]

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use glam::Vec2;
use lane_clash_core::UnitKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const SCRIPT_DOMAIN: &str = "lane";
const SCRIPT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded script payload.
pub(crate) const SCRIPT_HEADER: &str = "lane:v1";
/// Delimiter used to separate the prefix, arena dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Player-side deployment script replayed against a fresh match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct DeploymentScript {
    /// Arena width the script was authored for.
    pub width: u32,
    /// Arena height the script was authored for.
    pub height: u32,
    /// Deployments in the order they should be committed.
    pub steps: Vec<ScriptStep>,
}

impl DeploymentScript {
    /// Encodes the script into a single-line string suitable for clipboard
    /// transfer.
    #[must_use]
    pub(crate) fn encode(&self) -> String {
        let payload = SerializableScript {
            steps: self.steps.clone(),
        };
        let json = serde_json::to_vec(&payload).expect("script serialization never fails");
        let encoded = STANDARD_NO_PAD.encode(json);
        format!("{SCRIPT_HEADER}:{}x{}:{encoded}", self.width, self.height)
    }

    /// Decodes a script from the provided string representation.
    pub(crate) fn decode(value: &str) -> Result<Self, ScenarioError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ScenarioError::EmptyPayload);
        }

        let mut parts = trimmed.split(FIELD_DELIMITER);
        let domain = parts.next().ok_or(ScenarioError::MissingPrefix)?;
        let version = parts.next().ok_or(ScenarioError::MissingVersion)?;
        let dimensions = parts.next().ok_or(ScenarioError::MissingDimensions)?;
        let payload = parts.next().ok_or(ScenarioError::MissingPayload)?;

        if domain != SCRIPT_DOMAIN {
            return Err(ScenarioError::InvalidPrefix(domain.to_owned()));
        }
        if version != SCRIPT_VERSION {
            return Err(ScenarioError::UnsupportedVersion(version.to_owned()));
        }

        let (width, height) = parse_dimensions(dimensions)?;
        let bytes = STANDARD_NO_PAD.decode(payload.as_bytes())?;
        let decoded: SerializableScript = serde_json::from_slice(&bytes)?;

        Ok(Self {
            width,
            height,
            steps: decoded.steps,
        })
    }
}

/// Single deployment captured within a script.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct ScriptStep {
    /// Simulated milliseconds into the match at which the card is committed.
    pub at_ms: u64,
    /// Name of the unit to deploy. Unknown names resolve to the knight so a
    /// hand-edited script never aborts a replay.
    pub unit: String,
    /// Horizontal component of the commit point.
    pub x: f32,
    /// Vertical component of the commit point.
    pub y: f32,
}

impl ScriptStep {
    /// Simulated instant the step fires at.
    #[must_use]
    pub(crate) fn at(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }

    /// Unit kind named by the step, falling back to the knight.
    #[must_use]
    pub(crate) fn kind(&self) -> UnitKind {
        UnitKind::from_name(&self.unit)
    }

    /// Commit point of the step.
    #[must_use]
    pub(crate) fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct SerializableScript {
    steps: Vec<ScriptStep>,
}

/// Errors that can occur while decoding scenario transfer strings.
#[derive(Debug, Error)]
pub(crate) enum ScenarioError {
    /// The provided string was empty or contained only whitespace.
    #[error("scenario payload was empty")]
    EmptyPayload,
    /// The prefix segment was missing from the encoded script.
    #[error("scenario string is missing the prefix")]
    MissingPrefix,
    /// The encoded script did not contain a version segment.
    #[error("scenario string is missing the version")]
    MissingVersion,
    /// The encoded script did not include arena dimensions.
    #[error("scenario string is missing the arena dimensions")]
    MissingDimensions,
    /// The encoded script did not include the payload segment.
    #[error("scenario string is missing the payload")]
    MissingPayload,
    /// The encoded script used an unexpected prefix segment.
    #[error("scenario prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The encoded script used an unsupported version identifier.
    #[error("scenario version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The arena dimensions could not be parsed from the encoded script.
    #[error("could not parse arena dimensions '{0}'")]
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode scenario payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
    /// The decoded payload could not be deserialised.
    #[error("could not parse scenario payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), ScenarioError> {
    let (width, height) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| ScenarioError::InvalidDimensions(dimensions.to_owned()))?;

    let width = width
        .trim()
        .parse::<u32>()
        .map_err(|_| ScenarioError::InvalidDimensions(dimensions.to_owned()))?;
    let height = height
        .trim()
        .parse::<u32>()
        .map_err(|_| ScenarioError::InvalidDimensions(dimensions.to_owned()))?;

    if width == 0 || height == 0 {
        return Err(ScenarioError::InvalidDimensions(dimensions.to_owned()));
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_empty_script() {
        let script = DeploymentScript {
            width: 800,
            height: 600,
            steps: Vec::new(),
        };

        let encoded = script.encode();
        assert!(encoded.starts_with(&format!("{SCRIPT_HEADER}:800x600:")));

        let decoded = DeploymentScript::decode(&encoded).expect("script decodes");
        assert_eq!(script, decoded);
    }

    #[test]
    fn round_trip_populated_script() {
        let script = DeploymentScript {
            width: 800,
            height: 600,
            steps: vec![
                ScriptStep {
                    at_ms: 0,
                    unit: "knight".to_owned(),
                    x: 400.0,
                    y: 450.0,
                },
                ScriptStep {
                    at_ms: 5500,
                    unit: "wizard".to_owned(),
                    x: 250.0,
                    y: 520.0,
                },
            ],
        };

        let encoded = script.encode();
        let decoded = DeploymentScript::decode(&encoded).expect("script decodes");
        assert_eq!(script, decoded);
        assert_eq!(decoded.steps[1].kind(), UnitKind::Wizard);
    }

    #[test]
    fn unknown_unit_names_resolve_to_the_knight() {
        let step = ScriptStep {
            at_ms: 100,
            unit: "dragon".to_owned(),
            x: 400.0,
            y: 450.0,
        };
        assert_eq!(step.kind(), UnitKind::Knight);
    }

    #[test]
    fn foreign_prefixes_are_rejected() {
        let script = DeploymentScript {
            width: 800,
            height: 600,
            steps: Vec::new(),
        };
        let encoded = script.encode().replacen("lane", "duel", 1);

        assert!(matches!(
            DeploymentScript::decode(&encoded),
            Err(ScenarioError::InvalidPrefix(prefix)) if prefix == "duel"
        ));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let script = DeploymentScript {
            width: 800,
            height: 600,
            steps: Vec::new(),
        };
        let encoded = script.encode().replacen("800x600", "0x600", 1);

        assert!(matches!(
            DeploymentScript::decode(&encoded),
            Err(ScenarioError::InvalidDimensions(_))
        ));
    }
}
