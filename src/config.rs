//! Configuration for declaration and wrapper emission.

use crate::resolve::TypeOverrides;

#[derive(Clone, Debug)]
pub struct Config {
    /// Name of the generating entry point, used in the disclaimer header
    pub(crate) source: String,
    /// Alias every node kind belongs to
    pub(crate) universal_alias: String,
    /// Type used when a field cannot be narrowed
    pub(crate) unknown_type: String,
    /// Name of the exported function which installs the delegate
    pub(crate) delegate_setter: String,
    /// Name of the aggregate object in the wrapper module
    pub(crate) module_name: String,
    /// Aliases which are never emitted as unions
    pub(crate) excluded_aliases: Vec<String>,
    /// Fall back to the ambient current location in constructors
    pub(crate) ambient_location: bool,
    pub(crate) overrides: TypeOverrides,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: env!("CARGO_PKG_NAME").into(),
            universal_alias: "BabelNode".into(),
            unknown_type: "mixed".into(),
            delegate_setter: "setBabelTypes".into(),
            module_name: "BabelTypes".into(),
            // `Function` is not a polymorphic type
            excluded_aliases: vec!["Function".into()],
            ambient_location: true,
            overrides: TypeOverrides::babel(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, value: impl Into<String>) -> Self {
        self.source = value.into();
        self
    }

    pub fn universal_alias(mut self, value: impl Into<String>) -> Self {
        self.universal_alias = value.into();
        self
    }

    pub fn unknown_type(mut self, value: impl Into<String>) -> Self {
        self.unknown_type = value.into();
        self
    }

    pub fn delegate_setter(mut self, value: impl Into<String>) -> Self {
        self.delegate_setter = value.into();
        self
    }

    pub fn module_name(mut self, value: impl Into<String>) -> Self {
        self.module_name = value.into();
        self
    }

    pub fn excluded_aliases<S: Into<String>>(mut self, value: impl IntoIterator<Item = S>) -> Self {
        self.excluded_aliases = value.into_iter().map(Into::into).collect();
        self
    }

    /// When disabled, constructors without an explicit location
    /// produce nodes with `loc: null`, and the wrapper module has no
    /// current location state.
    pub fn ambient_location(mut self, value: bool) -> Self {
        self.ambient_location = value;
        self
    }

    pub fn overrides(mut self, value: TypeOverrides) -> Self {
        self.overrides = value;
        self
    }

    pub(crate) fn disclaimer(&self) -> String {
        format!("AUTOMATICALLY GENERATED BY {}", self.source)
    }

    pub(crate) fn is_excluded_alias(&self, alias: &str) -> bool {
        self.excluded_aliases.iter().any(|a| a == alias)
    }
}
