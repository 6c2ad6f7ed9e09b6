//! `declare class` blocks for every node kind, followed by alias unions.

use std::fmt::Write as _;

use indexmap::{IndexMap, IndexSet};

use super::emit_disclaimer;
use crate::config::Config;
use crate::error::Result;
use crate::registry::{NodeKind, Registry};
use crate::resolve::Resolver;

const LOCATION: &str = "type Location = {start: {line: number, column: number}, end: {line: number, column: number}};";

const JSX_VALUE: &str =
    "type JSXValue = JSXText | JSXExpressionContainer | JSXSpreadChild | JSXElement;";

/// Conflicts with the `static` modifier inside `declare class`.
const SKIPPED_FIELD: &str = "static";

/// Alias name to member kinds, in the order aliases are first seen.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AliasMap {
    members: IndexMap<String, IndexSet<String>>,
}

impl AliasMap {
    pub fn record(&mut self, alias: &str, kind: &str) {
        if let Some(members) = self.members.get_mut(alias) {
            members.insert(kind.to_owned());
        } else {
            self.members
                .insert(alias.to_owned(), IndexSet::from([kind.to_owned()]));
        }
    }

    pub fn members(&self, alias: &str) -> Option<impl Iterator<Item = &str> + '_> {
        self.members
            .get(alias)
            .map(|members| members.iter().map(String::as_str))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> + '_ {
        self.members.iter().map(|(alias, members)| (alias.as_str(), members))
    }
}

pub fn emit_declarations<'a>(
    registry: &'a Registry,
    resolver: &mut Resolver<'a>,
    config: &Config,
) -> Result<String> {
    let mut out = String::new();
    let mut aliases = AliasMap::default();

    emit_disclaimer(&mut out, &config.disclaimer());
    ln!(out);
    ln!(out, "{LOCATION}");
    ln!(out);

    for kind in registry.kinds() {
        emit_kind(&mut out, kind, resolver, config, &mut aliases)?;
    }

    emit_alias_unions(&mut out, &aliases, config);

    ln!(out, "{JSX_VALUE}");

    Ok(out)
}

fn emit_kind<'a>(
    out: &mut String,
    kind: &'a NodeKind,
    resolver: &mut Resolver<'a>,
    config: &Config,
    aliases: &mut AliasMap,
) -> Result<()> {
    let name = &kind.name;
    ln!(out, "declare class {name} {{");
    ln!(out, "  type: '{name}';");
    ln!(out, "  loc: ?Location;");
    for (field, spec) in kind.fields_in_order() {
        if field == SKIPPED_FIELD {
            continue;
        }
        let ty = resolver.resolve(kind, field)?;
        let optional = if spec.is_omittable() { "?" } else { "" };
        ln!(out, "  {field}: {optional}{ty};");
    }
    ln!(out);

    let universal = std::iter::once(&config.universal_alias);
    for alias in kind.aliases.iter().chain(universal) {
        ln!(out, "  // alias: {alias}");
        aliases.record(alias, name);
    }

    ln!(out, "}}");
    ln!(out);

    Ok(())
}

fn emit_alias_unions(out: &mut String, aliases: &AliasMap, config: &Config) {
    for (alias, members) in aliases.iter() {
        if config.is_excluded_alias(alias) {
            continue;
        }

        ln!(out, "type {alias} = (");
        for kind in members {
            ln!(out, "  | {kind}");
        }
        ln!(out, ");");
        ln!(out);
    }
}
