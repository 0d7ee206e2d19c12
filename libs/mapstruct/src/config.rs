use serde::Deserialize;

use crate::error::MapError;

/// Mapper options — parsed from TOML or built in code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapOptions {
    /// Maximum record nesting depth. The top-level record is depth 0.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// What sequence coercions do with elements already in the destination.
    #[serde(default)]
    pub sequence_mode: SequenceMode,

    /// How a negative signed dynamic value lands in an unsigned field.
    #[serde(default)]
    pub negative_dynamic: NegativePolicy,
}

fn default_max_depth() -> usize {
    64
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            sequence_mode: SequenceMode::default(),
            negative_dynamic: NegativePolicy::default(),
        }
    }
}

/// Applies to the converting sequence branches (string→unsigned,
/// string→f32, record→record). Identical element kinds always replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceMode {
    /// Converted elements are appended after whatever the destination holds.
    #[default]
    Append,
    /// The destination sequence is cleared first.
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativePolicy {
    /// Negative values become 0.
    #[default]
    Saturate,
    /// Two's complement reinterpretation as `u64`.
    Reinterpret,
    /// Field is skipped.
    Reject,
}

impl MapOptions {
    /// Parse options from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, MapError> {
        let options: Self = toml::from_str(toml_str)
            .map_err(|e| MapError::Config(e.to_string()).with_context("map options"))?;
        options.validate().map_err(|e| e.with_context("map options"))?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), MapError> {
        if self.max_depth == 0 {
            return Err(MapError::Config("max_depth must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(MapOptions::parse("").unwrap(), MapOptions::default());
    }

    #[test]
    fn parses_all_options() {
        let options = MapOptions::parse(
            r#"
            max_depth = 8
            sequence_mode = "replace"
            negative_dynamic = "reject"
            "#,
        )
        .unwrap();
        assert_eq!(options.max_depth, 8);
        assert_eq!(options.sequence_mode, SequenceMode::Replace);
        assert_eq!(options.negative_dynamic, NegativePolicy::Reject);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let err = MapOptions::parse("max_depth = 0").unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
        assert_eq!(
            err.to_string(),
            "config error: map options: max_depth must be at least 1"
        );
    }

    #[test]
    fn unknown_policy_is_a_config_error() {
        let err = MapOptions::parse(r#"negative_dynamic = "wrap""#).unwrap_err();
        assert!(matches!(err, MapError::Config(_)));
    }
}
