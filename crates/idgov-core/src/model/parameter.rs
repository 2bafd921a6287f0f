//! Attribute constraint values attached to an entitlement.
//!
//! `ParameterValue` is the typed form used by the codec. `RawParameterValue`
//! is what people write in policy documents (`{enforcement, type, values}`);
//! converting raw -> typed is where enforcement names, type names and value
//! shapes are validated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{IdGovError, Result};

/// How strictly a constraint is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Enforcement {
    Allowed,
    Mandatory,
    Default,
    Excluded,
}

impl Enforcement {
    /// Wire code (`enforcementTypes` entry).
    pub fn code(self) -> i32 {
        match self {
            Enforcement::Excluded => 0,
            Enforcement::Allowed => 1,
            Enforcement::Default => 2,
            Enforcement::Mandatory => 3,
        }
    }

    /// Inverse of [`Enforcement::code`].
    pub fn from_code(code: i32) -> Result<Self> {
        match code {
            0 => Ok(Enforcement::Excluded),
            1 => Ok(Enforcement::Allowed),
            2 => Ok(Enforcement::Default),
            3 => Ok(Enforcement::Mandatory),
            other => Err(IdGovError::InvalidEnforcementCode(other)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Enforcement::Allowed => "allowed",
            Enforcement::Mandatory => "mandatory",
            Enforcement::Default => "default",
            Enforcement::Excluded => "excluded",
        }
    }
}

impl FromStr for Enforcement {
    type Err = IdGovError;

    /// Case-insensitive: "Allowed", "ALLOWED" and "allowed" are the same.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "allowed" => Ok(Enforcement::Allowed),
            "mandatory" => Ok(Enforcement::Mandatory),
            "default" => Ok(Enforcement::Default),
            "excluded" => Ok(Enforcement::Excluded),
            _ => Err(IdGovError::InvalidEnforcement(s.to_string())),
        }
    }
}

impl fmt::Display for Enforcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraint kind plus its payload.
///
/// Invariants: `Constant` holds a non-empty list; `Regex` and `Script` hold
/// exactly one raw string; `Null` holds nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterKind {
    Constant(Vec<String>),
    Regex(String),
    Null,
    Script(String),
}

impl ParameterKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ParameterKind::Constant(_) => "constant",
            ParameterKind::Regex(_) => "regex",
            ParameterKind::Null => "null",
            ParameterKind::Script(_) => "script",
        }
    }
}

/// One constraint on an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawParameterValue", into = "RawParameterValue")]
pub struct ParameterValue {
    pub enforcement: Enforcement,
    pub kind: ParameterKind,
}

impl ParameterValue {
    pub fn new(enforcement: Enforcement, kind: ParameterKind) -> Self {
        Self { enforcement, kind }
    }

    pub fn constant<I, S>(enforcement: Enforcement, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            enforcement,
            ParameterKind::Constant(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn script(enforcement: Enforcement, text: impl Into<String>) -> Self {
        Self::new(enforcement, ParameterKind::Script(text.into()))
    }

    pub fn regex(enforcement: Enforcement, pattern: impl Into<String>) -> Self {
        Self::new(enforcement, ParameterKind::Regex(pattern.into()))
    }

    pub fn null(enforcement: Enforcement) -> Self {
        Self::new(enforcement, ParameterKind::Null)
    }
}

/// `values` as written in a document: a bare string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValues {
    One(String),
    Many(Vec<String>),
}

/// Document form of a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawParameterValue {
    pub enforcement: String,
    /// Field name is `type` in documents.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<RawValues>,
}

impl TryFrom<RawParameterValue> for ParameterValue {
    type Error = IdGovError;

    fn try_from(raw: RawParameterValue) -> Result<Self> {
        let enforcement: Enforcement = raw.enforcement.parse()?;
        let type_name = raw.kind.to_ascii_lowercase();

        let kind = match type_name.as_str() {
            "constant" => match raw.values {
                Some(RawValues::One(v)) => ParameterKind::Constant(vec![v]),
                Some(RawValues::Many(vs)) if !vs.is_empty() => ParameterKind::Constant(vs),
                _ => {
                    return Err(IdGovError::InvalidParameterValues(
                        "constant requires at least one value".into(),
                    ))
                }
            },
            "script" | "regex" => {
                let text = match raw.values {
                    Some(RawValues::One(v)) => v,
                    Some(RawValues::Many(mut vs)) if vs.len() == 1 => vs.remove(0),
                    _ => {
                        return Err(IdGovError::InvalidParameterValues(format!(
                            "{type_name} requires exactly one value"
                        )))
                    }
                };
                if type_name == "script" {
                    ParameterKind::Script(text)
                } else {
                    ParameterKind::Regex(text)
                }
            }
            // values supplied alongside null are ignored
            "null" => ParameterKind::Null,
            _ => return Err(IdGovError::InvalidParameterType(raw.kind)),
        };

        Ok(ParameterValue { enforcement, kind })
    }
}

impl From<ParameterValue> for RawParameterValue {
    fn from(v: ParameterValue) -> Self {
        let kind = v.kind.type_name().to_string();
        let values = match v.kind {
            ParameterKind::Constant(vs) => Some(RawValues::Many(vs)),
            ParameterKind::Regex(s) | ParameterKind::Script(s) => Some(RawValues::One(s)),
            ParameterKind::Null => None,
        };
        RawParameterValue {
            enforcement: v.enforcement.as_str().to_string(),
            kind,
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;

    fn raw(enforcement: &str, kind: &str, values: Option<RawValues>) -> RawParameterValue {
        RawParameterValue {
            enforcement: enforcement.into(),
            kind: kind.into(),
            values,
        }
    }

    #[test]
    fn enforcement_names_are_case_insensitive() {
        assert_eq!("Allowed".parse::<Enforcement>().unwrap(), Enforcement::Allowed);
        assert_eq!("MANDATORY".parse::<Enforcement>().unwrap(), Enforcement::Mandatory);
        assert_eq!("default".parse::<Enforcement>().unwrap(), Enforcement::Default);
        assert_eq!("Excluded".parse::<Enforcement>().unwrap(), Enforcement::Excluded);
    }

    #[test]
    fn unknown_enforcement_is_rejected() {
        let err = "optional".parse::<Enforcement>().unwrap_err();
        assert_eq!(err.code().as_str(), "INVALID_ENFORCEMENT");
    }

    #[test]
    fn enforcement_codes_match_wire_table() {
        for (e, code) in [
            (Enforcement::Excluded, 0),
            (Enforcement::Allowed, 1),
            (Enforcement::Default, 2),
            (Enforcement::Mandatory, 3),
        ] {
            assert_eq!(e.code(), code);
            assert_eq!(Enforcement::from_code(code).unwrap(), e);
        }
        assert!(Enforcement::from_code(7).is_err());
    }

    #[test]
    fn type_names_are_case_insensitive() {
        let v = ParameterValue::try_from(raw("Allowed", "REGEX", Some(RawValues::One("^a$".into()))))
            .unwrap();
        assert_eq!(v.kind, ParameterKind::Regex("^a$".into()));

        let v = ParameterValue::try_from(raw("allowed", "Constant", Some(RawValues::One("x".into()))))
            .unwrap();
        assert_eq!(v.kind, ParameterKind::Constant(vec!["x".into()]));
    }

    #[test]
    fn null_ignores_supplied_values() {
        let v = ParameterValue::try_from(raw("excluded", "null", Some(RawValues::One("junk".into()))))
            .unwrap();
        assert_eq!(v, ParameterValue::null(Enforcement::Excluded));
    }

    #[test]
    fn shape_violations_are_rejected() {
        let empty = raw("allowed", "constant", Some(RawValues::Many(vec![])));
        assert_eq!(
            ParameterValue::try_from(empty).unwrap_err().code().as_str(),
            "INVALID_PARAMETER_VALUES"
        );

        let two_scripts = raw(
            "allowed",
            "script",
            Some(RawValues::Many(vec!["a".into(), "b".into()])),
        );
        assert!(ParameterValue::try_from(two_scripts).is_err());

        let unknown = raw("allowed", "lookup", None);
        assert_eq!(
            ParameterValue::try_from(unknown).unwrap_err().code().as_str(),
            "INVALID_PARAMETER_TYPE"
        );
    }

    #[test]
    fn enforcement_is_checked_before_type() {
        let bad = raw("sometimes", "lookup", None);
        assert_eq!(
            ParameterValue::try_from(bad).unwrap_err().code().as_str(),
            "INVALID_ENFORCEMENT"
        );
    }

    #[test]
    fn deserializes_from_document_form() {
        let v: ParameterValue = serde_json::from_str(
            r#"{"enforcement":"Default","type":"script","values":"return 'test';"}"#,
        )
        .unwrap();
        assert_eq!(v, ParameterValue::script(Enforcement::Default, "return 'test';"));

        let s = serde_json::to_value(ParameterValue::constant(Enforcement::Allowed, ["a", "b"]))
            .unwrap();
        assert_eq!(
            s,
            serde_json::json!({"enforcement":"allowed","type":"constant","values":["a","b"]})
        );
    }
}
