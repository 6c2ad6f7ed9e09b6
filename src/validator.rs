//! Validator descriptions and their translation into Flow type expressions.
//!
//! Validators form a small recursive language:
//! - `{"type": t}`: exactly `t`
//! - `{"oneOfNodeTypes": [..]}`: any of the named types
//! - `{"oneOf": [..]}`: any of the literal values
//! - `{"chainOf": [..]}`: every link must hold. Only two chains are
//!   understood: `[array, each]` and `[string, oneOf]`.
//!
//! Anything else deserializes into [`Validator::Unknown`] and fails to
//! translate with [`TranslateError::UnrecognizedShape`].

use serde::{Deserialize, Serialize};

use crate::emit::JoinIter as _;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Validator {
    #[serde(rename = "type")]
    Exact(String),
    #[serde(
        rename = "oneOfNodeTypes",
        alias = "oneOfNodeOrValueTypes",
        alias = "oneOfTypes"
    )]
    OneOfTypes(Vec<String>),
    #[serde(rename = "oneOf")]
    OneOfValues(Vec<Literal>),
    #[serde(rename = "chainOf")]
    ChainOf(Vec<Validator>),
    #[serde(rename = "each")]
    Each(Box<Validator>),
    /// Kept verbatim for diagnostics.
    #[serde(untagged)]
    Unknown(serde_json::Value),
}

const ARRAY_MARKER: &str = "array";
const STRING_MARKER: &str = "string";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Null,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranslateError {
    #[error("unrecognized validator shape: {}", dump(.0))]
    UnrecognizedShape(Validator),

    #[error("`{0}` validator has no members")]
    EmptyUnion(&'static str),
}

fn dump(validator: &Validator) -> String {
    serde_json::to_value(validator)
        .map(|v| v.to_string())
        .unwrap_or_else(|_| format!("{validator:?}"))
}

impl Validator {
    /// Renders the validator as a compact JSON string.
    pub fn dump(&self) -> String {
        dump(self)
    }

    pub fn array_of(each: Validator) -> Self {
        Validator::ChainOf(vec![
            Validator::Exact(ARRAY_MARKER.into()),
            Validator::Each(Box::new(each)),
        ])
    }

    pub fn string_enum<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Validator::ChainOf(vec![
            Validator::Exact(STRING_MARKER.into()),
            Validator::OneOfValues(
                values
                    .into_iter()
                    .map(|v| Literal::String(v.into()))
                    .collect(),
            ),
        ])
    }
}

pub fn translate(validator: &Validator) -> Result<String, TranslateError> {
    match validator {
        Validator::Exact(ty) => Ok(ty.clone()),
        Validator::OneOfTypes(types) => {
            if types.is_empty() {
                return Err(TranslateError::EmptyUnion("oneOfNodeTypes"));
            }
            Ok(types.iter().join(" | ").to_string())
        }
        Validator::OneOfValues(values) => {
            if values.is_empty() {
                return Err(TranslateError::EmptyUnion("oneOf"));
            }
            Ok(values.iter().map(InspectLiteral).join(" | ").to_string())
        }
        Validator::ChainOf(links) => match links.as_slice() {
            [Validator::Exact(marker), Validator::Each(each)] if marker == ARRAY_MARKER => {
                Ok(format!("$ReadOnlyArray<{}>", translate(each)?))
            }
            [Validator::Exact(marker), Validator::OneOfValues(values)]
                if marker == STRING_MARKER =>
            {
                if values.is_empty() {
                    return Err(TranslateError::EmptyUnion("chainOf"));
                }
                Ok(values.iter().map(JsonLiteral).join(" | ").to_string())
            }
            _ => Err(TranslateError::UnrecognizedShape(validator.clone())),
        },
        Validator::Each(_) | Validator::Unknown(_) => {
            Err(TranslateError::UnrecognizedShape(validator.clone()))
        }
    }
}

/// Literal rendered the way node's `util.inspect` prints it.
#[derive(Clone, Copy)]
struct InspectLiteral<'a>(&'a Literal);

impl std::fmt::Display for InspectLiteral<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Literal::Bool(v) => write!(f, "{v}"),
            Literal::Number(v) => write!(f, "{v}"),
            Literal::Null => write!(f, "null"),
            Literal::String(s) => {
                let quote = if s.contains('\'') && !s.contains('"') {
                    '"'
                } else {
                    '\''
                };
                write!(f, "{quote}")?;
                for c in s.chars() {
                    match c {
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        c if c == quote => write!(f, "\\{c}")?,
                        c => write!(f, "{c}")?,
                    }
                }
                write!(f, "{quote}")
            }
        }
    }
}

#[derive(Clone, Copy)]
struct JsonLiteral<'a>(&'a Literal);

impl std::fmt::Display for JsonLiteral<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Literal::Bool(v) => write!(f, "{v}"),
            Literal::Number(v) => write!(f, "{v}"),
            Literal::Null => write!(f, "null"),
            Literal::String(s) => write!(f, "{}", serde_json::Value::from(s.as_str())),
        }
    }
}
