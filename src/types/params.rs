//! Filter parameter schemas and values.
//!
//! Each filter declares an ordered schema of typed parameters. Callers
//! supply a loose name→value map (deserialized from host JSON); resolution
//! overlays it onto the schema defaults, producing a fully-populated
//! [`ResolvedParams`]. Unknown caller keys are ignored, numeric values are
//! clamped to their declared bounds, and unknown choice values fall back to
//! the default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single declared filter parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: ParamKind,
}

impl ParamSpec {
    /// Declare a bounded numeric parameter.
    pub fn numeric(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            name,
            kind: ParamKind::Numeric { min, max, default },
        }
    }

    /// Declare an on/off toggle.
    pub fn boolean(name: &'static str, default: bool) -> Self {
        Self {
            name,
            kind: ParamKind::Boolean { default },
        }
    }

    /// Declare a fixed-option choice.
    pub fn choice(name: &'static str, options: Vec<&'static str>, default: &'static str) -> Self {
        Self {
            name,
            kind: ParamKind::Choice { options, default },
        }
    }
}

/// The kind of a parameter: a tagged union, validated at configuration time.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ParamKind {
    /// A floating-point value clamped to [min, max].
    Numeric { min: f32, max: f32, default: f32 },
    /// An on/off toggle.
    Boolean { default: bool },
    /// One of a fixed set of options.
    Choice {
        options: Vec<&'static str>,
        default: &'static str,
    },
}

/// A concrete parameter value, as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f32),
    Text(String),
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Number(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

/// Caller-supplied parameter overrides, keyed by parameter name.
pub type UserParams = HashMap<String, ParamValue>;

/// A fully-populated parameter set: every schema entry has a value.
#[derive(Debug, Clone, Default)]
pub struct ResolvedParams {
    values: HashMap<&'static str, ParamValue>,
}

impl ResolvedParams {
    /// Numeric value of a parameter. Falls back to 0.0 for a name the
    /// schema never declared.
    pub fn get_number(&self, name: &str) -> f32 {
        match self.values.get(name) {
            Some(ParamValue::Number(v)) => *v,
            _ => 0.0,
        }
    }

    /// Numeric value rounded to a non-negative integer.
    pub fn get_usize(&self, name: &str) -> usize {
        self.get_number(name).round().max(0.0) as usize
    }

    /// Numeric value truncated to a seed word.
    pub fn get_seed(&self, name: &str) -> u32 {
        self.get_number(name).round().max(0.0) as u32
    }

    /// Boolean value of a parameter. Falls back to false.
    pub fn get_bool(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(ParamValue::Bool(true)))
    }

    /// Choice value of a parameter. Falls back to the empty string.
    pub fn get_str(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(ParamValue::Text(s)) => s,
            _ => "",
        }
    }
}

/// Overlay caller-supplied values onto a schema's defaults.
pub fn resolve(schema: &[ParamSpec], user: &UserParams) -> ResolvedParams {
    let mut values = HashMap::with_capacity(schema.len());

    for spec in schema {
        let supplied = user.get(spec.name);
        let value = match &spec.kind {
            ParamKind::Numeric { min, max, default } => {
                let v = match supplied {
                    Some(ParamValue::Number(v)) => v.clamp(*min, *max),
                    _ => *default,
                };
                ParamValue::Number(v)
            }
            ParamKind::Boolean { default } => {
                let v = match supplied {
                    Some(ParamValue::Bool(v)) => *v,
                    _ => *default,
                };
                ParamValue::Bool(v)
            }
            ParamKind::Choice { options, default } => {
                let v = match supplied {
                    Some(ParamValue::Text(s)) if options.iter().any(|o| o == s) => s.clone(),
                    _ => default.to_string(),
                };
                ParamValue::Text(v)
            }
        };
        values.insert(spec.name, value);
    }

    ResolvedParams { values }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Vec<ParamSpec> {
        vec![
            ParamSpec::numeric("threshold", 0.0, 255.0, 128.0),
            ParamSpec::boolean("halftone", false),
            ParamSpec::choice("dithering", vec!["none", "ordered"], "none"),
        ]
    }

    #[test]
    fn test_resolve_defaults() {
        let resolved = resolve(&schema(), &UserParams::new());
        assert_eq!(resolved.get_number("threshold"), 128.0);
        assert!(!resolved.get_bool("halftone"));
        assert_eq!(resolved.get_str("dithering"), "none");
    }

    #[test]
    fn test_resolve_overlays_caller_values() {
        let mut user = UserParams::new();
        user.insert("threshold".to_string(), 64.0.into());
        user.insert("halftone".to_string(), true.into());
        user.insert("dithering".to_string(), "ordered".into());

        let resolved = resolve(&schema(), &user);
        assert_eq!(resolved.get_number("threshold"), 64.0);
        assert!(resolved.get_bool("halftone"));
        assert_eq!(resolved.get_str("dithering"), "ordered");
    }

    #[test]
    fn test_resolve_clamps_numeric_bounds() {
        let mut user = UserParams::new();
        user.insert("threshold".to_string(), 900.0.into());
        let resolved = resolve(&schema(), &user);
        assert_eq!(resolved.get_number("threshold"), 255.0);

        user.insert("threshold".to_string(), (-5.0).into());
        let resolved = resolve(&schema(), &user);
        assert_eq!(resolved.get_number("threshold"), 0.0);
    }

    #[test]
    fn test_resolve_ignores_unknown_keys() {
        let mut user = UserParams::new();
        user.insert("nonsense".to_string(), 1.0.into());
        let resolved = resolve(&schema(), &user);
        assert_eq!(resolved.get_number("nonsense"), 0.0);
        assert_eq!(resolved.get_number("threshold"), 128.0);
    }

    #[test]
    fn test_resolve_rejects_unknown_choice() {
        let mut user = UserParams::new();
        user.insert("dithering".to_string(), "glitter".into());
        let resolved = resolve(&schema(), &user);
        assert_eq!(resolved.get_str("dithering"), "none");
    }

    #[test]
    fn test_resolve_ignores_mistyped_values() {
        let mut user = UserParams::new();
        user.insert("threshold".to_string(), "loud".into());
        user.insert("halftone".to_string(), 3.0.into());
        let resolved = resolve(&schema(), &user);
        assert_eq!(resolved.get_number("threshold"), 128.0);
        assert!(!resolved.get_bool("halftone"));
    }

    #[test]
    fn test_user_params_from_json() {
        let user: UserParams =
            serde_json::from_str(r#"{"threshold": 32, "halftone": true, "dithering": "ordered"}"#)
                .unwrap();
        let resolved = resolve(&schema(), &user);
        assert_eq!(resolved.get_number("threshold"), 32.0);
        assert!(resolved.get_bool("halftone"));
        assert_eq!(resolved.get_str("dithering"), "ordered");
    }

    #[test]
    fn test_schema_serializes_for_host_ui() {
        let json = serde_json::to_value(schema()).unwrap();
        assert_eq!(json[0]["name"], "threshold");
        assert_eq!(json[0]["kind"], "numeric");
        assert_eq!(json[2]["options"][1], "ordered");
    }
}
