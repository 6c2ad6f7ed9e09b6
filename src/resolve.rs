//! Field type resolution: overrides first, then validators, then `mixed`.

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::registry::NodeKind;
use crate::validator::{TranslateError, Validator, translate};

/// Fixed types for fields whose validators are accurate but too broad
/// to be useful in the declarations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeOverrides {
    by_kind: FxHashMap<String, FxHashMap<String, String>>,
}

impl TypeOverrides {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table used for Babel's schema.
    pub fn babel() -> Self {
        let mut overrides = Self::empty();
        for kind in [
            "ClassMethod",
            "ClassProperty",
            "ObjectMethod",
            "ObjectProperty",
            "TSDeclareMethod",
        ] {
            overrides.insert(kind, "key", "Expression");
        }
        for kind in ["MemberExpression", "OptionalMemberExpression"] {
            overrides.insert(kind, "property", "Expression");
        }
        overrides.insert("Identifier", "name", "string");
        overrides
    }

    pub fn with(mut self, kind: &str, field: &str, ty: &str) -> Self {
        self.insert(kind, field, ty);
        self
    }

    pub fn insert(&mut self, kind: &str, field: &str, ty: &str) {
        self.by_kind
            .entry(kind.to_owned())
            .or_default()
            .insert(field.to_owned(), ty.to_owned());
    }

    pub fn get(&self, kind: &str, field: &str) -> Option<&str> {
        self.by_kind
            .get(kind)
            .and_then(|fields| fields.get(field))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_kind.values().map(|fields| fields.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A field whose validator could not be narrowed to a type.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub kind: String,
    pub field: String,
    pub validator: Validator,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unrecognized validator type for {}.{}: {}",
            self.kind,
            self.field,
            self.validator.dump()
        )
    }
}

pub struct Resolver<'a> {
    overrides: &'a TypeOverrides,
    unknown: &'a str,
    cache: FxHashMap<(&'a str, &'a str), String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Resolver<'a> {
    pub fn new(overrides: &'a TypeOverrides, unknown: &'a str) -> Self {
        Self {
            overrides,
            unknown,
            cache: FxHashMap::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Type expression for `kind.field`.
    ///
    /// Unrecognized validators are recorded as diagnostics and resolve to
    /// the unknown type. Any other translator failure is returned.
    pub fn resolve(&mut self, kind: &'a NodeKind, field: &'a str) -> Result<String> {
        if let Some(ty) = self.cache.get(&(kind.name.as_str(), field)) {
            return Ok(ty.clone());
        }

        let ty = self.resolve_uncached(kind, field)?;
        self.cache.insert((kind.name.as_str(), field), ty.clone());
        Ok(ty)
    }

    fn resolve_uncached(&mut self, kind: &NodeKind, field: &str) -> Result<String> {
        let Some(spec) = kind.field(field) else {
            return Err(Error::UnknownField {
                kind: kind.name.clone(),
                field: field.to_owned(),
            });
        };

        if let Some(ty) = self.overrides.get(&kind.name, field) {
            return Ok(ty.to_owned());
        }

        let Some(validator) = &spec.validate else {
            return Ok(self.unknown.to_owned());
        };

        match translate(validator) {
            Ok(ty) => Ok(ty),
            Err(TranslateError::UnrecognizedShape(validator)) => {
                tracing::warn!(
                    kind = %kind.name,
                    field,
                    validator = %validator.dump(),
                    "unrecognized validator type, falling back to `{}`",
                    self.unknown,
                );
                self.diagnostics.push(Diagnostic {
                    kind: kind.name.clone(),
                    field: field.to_owned(),
                    validator,
                });
                Ok(self.unknown.to_owned())
            }
            Err(source) => Err(Error::Translate {
                kind: kind.name.clone(),
                field: field.to_owned(),
                source,
            }),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
