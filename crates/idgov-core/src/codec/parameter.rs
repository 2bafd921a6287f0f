//! Attribute parameter codec.
//!
//! Wire form: three parallel arrays (`values`, `enforcementTypes`,
//! `expressionTypes`), one triple per index. Type tagging rules:
//! - constant: one triple per literal, value wrapped in `"`, code 0
//! - null:     `return null;`, code 10
//! - script:   raw text, code 10
//! - regex:    raw pattern, code 20
//!
//! Null and script share code 10. The only way back is matching the sentinel
//! text, which lives in [`classify`] and nowhere else. A script whose text is
//! exactly `return null;` therefore decodes as null.
//!
//! Decoding is per triple: a constant with two literals comes back as two
//! one-literal constants.

use tracing::{debug, warn};

use crate::error::{IdGovError, Result};
use crate::model::{Enforcement, ParameterKind, ParameterValue, RawParameterValue};
use crate::wire::{ArrayOf, WSServiceAttributeParameter};

/// Sentinel script text used for `null` constraints.
pub const NULL_SENTINEL: &str = "return null;";

/// `expressionTypes` codes.
pub const EXPR_CONSTANT: i32 = 0;
pub const EXPR_SCRIPT: i32 = 10;
pub const EXPR_REGEX: i32 = 20;

/// One index across the three parallel arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub value: String,
    pub enforcement: i32,
    pub expression: i32,
}

impl Triple {
    fn new(value: String, enforcement: Enforcement, expression: i32) -> Self {
        Self {
            value,
            enforcement: enforcement.code(),
            expression,
        }
    }
}

/// Expand one constraint into its wire triples.
pub fn expand(value: &ParameterValue) -> Vec<Triple> {
    let e = value.enforcement;
    match &value.kind {
        ParameterKind::Constant(literals) => literals
            .iter()
            .map(|s| Triple::new(format!("\"{s}\""), e, EXPR_CONSTANT))
            .collect(),
        ParameterKind::Null => vec![Triple::new(NULL_SENTINEL.to_string(), e, EXPR_SCRIPT)],
        ParameterKind::Script(text) => {
            if text == NULL_SENTINEL {
                warn!("script text equals the null sentinel; it will read back as null");
            }
            vec![Triple::new(text.clone(), e, EXPR_SCRIPT)]
        }
        ParameterKind::Regex(pattern) => vec![Triple::new(pattern.clone(), e, EXPR_REGEX)],
    }
}

/// Flatten triples into the parallel-array record, preserving order.
pub fn flatten<I>(name: &str, triples: I) -> WSServiceAttributeParameter
where
    I: IntoIterator<Item = Triple>,
{
    let mut values = Vec::new();
    let mut enforcements = Vec::new();
    let mut expressions = Vec::new();

    for t in triples {
        values.push(t.value);
        enforcements.push(t.enforcement);
        expressions.push(t.expression);
    }

    WSServiceAttributeParameter {
        name: name.to_string(),
        values: ArrayOf::new(values),
        expression_types: ArrayOf::new(expressions),
        enforcement_types: ArrayOf::new(enforcements),
    }
}

/// Split a wire record back into triples. The three arrays must line up.
pub fn unflatten(param: &WSServiceAttributeParameter) -> Result<Vec<Triple>> {
    let n = param.values.len();
    if param.enforcement_types.len() != n || param.expression_types.len() != n {
        return Err(IdGovError::MalformedParameter(format!(
            "{}: values={} enforcementTypes={} expressionTypes={}",
            param.name,
            n,
            param.enforcement_types.len(),
            param.expression_types.len()
        )));
    }

    Ok(param
        .values
        .item
        .iter()
        .zip(&param.enforcement_types.item)
        .zip(&param.expression_types.item)
        .map(|((value, enforcement), expression)| Triple {
            value: value.clone(),
            enforcement: *enforcement,
            expression: *expression,
        })
        .collect())
}

/// Recover the constraint kind of one raw wire value.
///
/// Quoted text is a constant regardless of code; the null sentinel wins over
/// code 10; otherwise code 20 is a regex and anything else is a script.
pub fn classify(raw: &str, expression: i32) -> ParameterKind {
    if let Some(literal) = unquote(raw) {
        return ParameterKind::Constant(vec![literal.to_string()]);
    }
    if raw == NULL_SENTINEL {
        return ParameterKind::Null;
    }
    if expression == EXPR_REGEX {
        ParameterKind::Regex(raw.to_string())
    } else {
        ParameterKind::Script(raw.to_string())
    }
}

fn unquote(raw: &str) -> Option<&str> {
    if !raw.starts_with('"') || !raw.ends_with('"') {
        return None;
    }
    // a lone `"` is both opening and closing quote
    Some(raw.get(1..raw.len() - 1).unwrap_or(""))
}

/// Encode one attribute's constraints.
pub fn encode(attribute: &str, values: &[ParameterValue]) -> WSServiceAttributeParameter {
    let param = flatten(attribute, values.iter().flat_map(expand));
    debug!(
        attribute,
        constraints = values.len(),
        triples = param.values.len(),
        "parameter encoded"
    );
    param
}

/// Encode document-form constraints, validating them first.
pub fn encode_raw(attribute: &str, values: &[RawParameterValue]) -> Result<WSServiceAttributeParameter> {
    let typed = values
        .iter()
        .cloned()
        .map(ParameterValue::try_from)
        .collect::<Result<Vec<_>>>()?;
    Ok(encode(attribute, &typed))
}

/// Decode one wire parameter into one constraint per triple.
pub fn decode(param: &WSServiceAttributeParameter) -> Result<Vec<ParameterValue>> {
    unflatten(param)?
        .into_iter()
        .map(|t| {
            Ok(ParameterValue {
                enforcement: Enforcement::from_code(t.enforcement)?,
                kind: classify(&t.value, t.expression),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::model::RawValues;

    #[test]
    fn constant_expands_one_triple_per_literal() {
        let p = encode(
            "ercompany",
            &[ParameterValue::constant(Enforcement::Allowed, ["a", "b"])],
        );
        assert_eq!(p.values.item, vec!["\"a\"", "\"b\""]);
        assert_eq!(p.expression_types.item, vec![0, 0]);
        assert_eq!(p.enforcement_types.item, vec![1, 1]);
    }

    #[test]
    fn decode_is_triple_granular() {
        let p = encode(
            "ercompany",
            &[ParameterValue::constant(Enforcement::Allowed, ["a", "b"])],
        );
        assert_eq!(
            decode(&p).unwrap(),
            vec![
                ParameterValue::constant(Enforcement::Allowed, ["a"]),
                ParameterValue::constant(Enforcement::Allowed, ["b"]),
            ]
        );
    }

    #[test]
    fn single_value_constraints_round_trip() {
        let cases = [
            ParameterValue::script(Enforcement::Default, "return 'test';"),
            ParameterValue::regex(Enforcement::Allowed, r"^[\s\w]+$"),
            ParameterValue::null(Enforcement::Excluded),
            ParameterValue::constant(Enforcement::Mandatory, ["1018117"]),
        ];
        for c in cases {
            let wire = encode("attr", std::slice::from_ref(&c));
            assert_eq!(decode(&wire).unwrap(), vec![c]);
        }
    }

    #[test]
    fn null_encodes_to_sentinel_regardless_of_values() {
        let raw = RawParameterValue {
            enforcement: "Excluded".into(),
            kind: "null".into(),
            values: Some(RawValues::Many(vec!["ignored".into()])),
        };
        let p = encode_raw("attr", &[raw]).unwrap();
        assert_eq!(p.values.item, vec![NULL_SENTINEL]);
        assert_eq!(p.expression_types.item, vec![EXPR_SCRIPT]);
        assert_eq!(p.enforcement_types.item, vec![0]);
        assert_eq!(decode(&p).unwrap(), vec![ParameterValue::null(Enforcement::Excluded)]);
    }

    #[test]
    fn script_equal_to_sentinel_reads_back_as_null() {
        let p = encode(
            "attr",
            &[ParameterValue::script(Enforcement::Default, NULL_SENTINEL)],
        );
        assert_eq!(decode(&p).unwrap(), vec![ParameterValue::null(Enforcement::Default)]);
    }

    #[test]
    fn order_is_entry_then_within_entry() {
        let p = encode(
            "ercompany",
            &[
                ParameterValue::script(Enforcement::Default, "return 'test';"),
                ParameterValue::null(Enforcement::Excluded),
                ParameterValue::constant(Enforcement::Allowed, ["test1", "test2"]),
                ParameterValue::regex(Enforcement::Allowed, "^x$"),
            ],
        );
        assert_eq!(
            p.values.item,
            vec!["return 'test';", "return null;", "\"test1\"", "\"test2\"", "^x$"]
        );
        assert_eq!(p.expression_types.item, vec![10, 10, 0, 0, 20]);
        assert_eq!(p.enforcement_types.item, vec![2, 0, 1, 1, 1]);
    }

    #[test]
    fn classify_rules() {
        assert_eq!(classify("\"x\"", 20), ParameterKind::Constant(vec!["x".into()]));
        assert_eq!(classify("\"\"", 0), ParameterKind::Constant(vec!["".into()]));
        assert_eq!(classify("\"", 0), ParameterKind::Constant(vec!["".into()]));
        assert_eq!(classify(NULL_SENTINEL, 20), ParameterKind::Null);
        assert_eq!(classify("^a$", 20), ParameterKind::Regex("^a$".into()));
        assert_eq!(classify("return 1;", 10), ParameterKind::Script("return 1;".into()));
        assert_eq!(classify("bare", 0), ParameterKind::Script("bare".into()));
    }

    #[test]
    fn mismatched_arrays_are_rejected() {
        let mut p = encode("attr", &[ParameterValue::regex(Enforcement::Allowed, "x")]);
        p.enforcement_types.item.push(1);
        assert_eq!(decode(&p).unwrap_err().code().as_str(), "MALFORMED_PARAMETER");
    }

    #[test]
    fn unknown_enforcement_code_is_rejected() {
        let mut p = encode("attr", &[ParameterValue::regex(Enforcement::Allowed, "x")]);
        p.enforcement_types.item[0] = 9;
        assert_eq!(decode(&p).unwrap_err().code().as_str(), "INVALID_ENFORCEMENT");
    }
}
