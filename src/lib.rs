//! Generates Flow declarations and a builder wrapper module
//! from a node schema registry.
//!
//! ```no_run
//! let registry = nodegen::Registry::load("schema/babel.json")?;
//! let generated = nodegen::generate(&registry, &nodegen::Config::default())?;
//! print!("{}", generated.declarations);
//! # Ok::<(), nodegen::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod registry;
pub mod resolve;
pub mod validator;

pub mod emit;
pub mod output;

pub use config::Config;
pub use error::{Error, Result};
pub use registry::{FieldSpec, NodeKind, Registry};
pub use resolve::{Diagnostic, Resolver, TypeOverrides};
pub use validator::{Literal, TranslateError, Validator};

#[derive(Debug, Clone)]
pub struct Generated {
    pub declarations: String,
    pub wrapper: String,
    /// Fields which fell back to the unknown type.
    pub diagnostics: Vec<Diagnostic>,
}

pub fn generate(registry: &Registry, config: &Config) -> Result<Generated> {
    let mut resolver = Resolver::new(&config.overrides, &config.unknown_type);

    let declarations = emit::emit_declarations(registry, &mut resolver, config)?;
    let wrapper = emit::emit_wrapper(registry, &mut resolver, config)?;

    let diagnostics = resolver.into_diagnostics();
    tracing::debug!(
        kinds = registry.len(),
        unresolved = diagnostics.len(),
        "generated declarations and wrapper"
    );

    Ok(Generated {
        declarations,
        wrapper,
        diagnostics,
    })
}
