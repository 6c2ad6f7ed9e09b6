//! The wrapper module around the delegate node library.
//!
//! Every node kind gets four functions on one exported object:
//! - `<kind>(...fields)` builds a node and stamps it with a location
//! - `is<Kind>(value, opts)` forwards to the delegate predicate
//! - `assert<Kind>(value, opts)` forwards to the delegate assertion
//! - `as<Kind>(value, opts)` returns `value` if the predicate holds, `undefined` otherwise
//!
//! Constructors accept one extra trailing argument: if the last argument
//! has object-valued `start` and `end` properties it is taken as the node's
//! location and not forwarded to the delegate. This is a structural check,
//! so a trailing field value of the same shape is indistinguishable from a
//! location.
//!
//! Without an explicit location, constructors fall back to the module-wide
//! current location. That state is shared by all callers, so constructing
//! nodes from concurrent contexts which each rely on it will race.

use std::fmt::Write as _;

use super::{JoinIter as _, emit_disclaimer};
use crate::config::Config;
use crate::error::Result;
use crate::registry::{NodeKind, Registry};
use crate::resolve::Resolver;

pub fn emit_wrapper<'a>(
    registry: &'a Registry,
    resolver: &mut Resolver<'a>,
    config: &Config,
) -> Result<String> {
    let mut out = String::new();

    emit_disclaimer(&mut out, &config.disclaimer());
    ln!(out, "// @flow");
    ln!(out);
    emit_state(&mut out, config);
    ln!(out);

    ln!(out, "const {} = {{", config.module_name);
    for kind in registry.kinds() {
        emit_builder(&mut out, kind, resolver, config)?;
    }
    for kind in registry.kinds() {
        emit_predicate(&mut out, kind);
    }
    for kind in registry.kinds() {
        emit_assertion(&mut out, kind);
    }
    for kind in registry.kinds() {
        emit_cast(&mut out, kind);
    }
    ln!(out, "}}");
    ln!(out);
    ln!(out, "export default {};", config.module_name);

    Ok(out)
}

fn emit_state(out: &mut String, config: &Config) {
    ln!(out, "let t: any = null;");
    if config.ambient_location {
        ml!(
            out,
            "
            let currentLocation: any = null;
            export function getCurrentLocation(): Location {{ return currentLocation; }}
            export function setCurrentLocation(loc: Location): Location {{ return currentLocation = loc; }}
            "
        );
    }
    ln!(
        out,
        "export function {}(_t: Object): Object {{ return t = _t; }}",
        config.delegate_setter
    );
}

fn emit_builder<'a>(
    out: &mut String,
    kind: &'a NodeKind,
    resolver: &mut Resolver<'a>,
    config: &Config,
) -> Result<()> {
    let name = &kind.name;

    let mut params = Vec::with_capacity(kind.builder_keys.len());
    for (field, spec) in kind.builder_fields() {
        let ty = resolver.resolve(kind, field)?;
        let optional = if spec.is_omittable() { "?" } else { "" };
        let prefix = if is_reserved(field) { "_" } else { "" };
        params.push(format!("{prefix}{field}: {optional}{ty}"));
    }

    let fallback = if config.ambient_location {
        "getCurrentLocation()"
    } else {
        "null"
    };

    ln!(
        out,
        "  {builder}({params}): {name} {{",
        builder = builder_name(name),
        params = params.iter().join(", "),
    );
    ln!(out, "    const args = ([].slice: any).call(arguments);");
    ln!(out, "    let loc = args[args.length - 1];");
    ln!(
        out,
        "    const hasLoc = (loc && typeof loc === 'object' && typeof loc.start === 'object' && typeof loc.end === 'object');"
    );
    ln!(out, "    if (hasLoc) {{");
    ln!(out, "      args.pop();");
    ln!(out, "    }}");
    ln!(
        out,
        "    return {{...t.{name}.apply(t, args), loc: hasLoc ? (loc: any) : {fallback}}};"
    );
    ln!(out, "  }},");

    Ok(())
}

fn emit_predicate(out: &mut String, kind: &NodeKind) {
    let name = &kind.name;
    ln!(out, "  is{name}(value: any, opts?: Object): boolean {{");
    ln!(out, "    return t.is{name}.apply(t, arguments);");
    ln!(out, "  }},");
}

fn emit_assertion(out: &mut String, kind: &NodeKind) {
    let name = &kind.name;
    ln!(out, "  assert{name}(value: {name}, opts?: Object): mixed {{");
    ln!(out, "    return t.assert{name}.apply(t, arguments);");
    ln!(out, "  }},");
}

fn emit_cast(out: &mut String, kind: &NodeKind) {
    let name = &kind.name;
    ln!(out, "  as{name}(value: any, opts?: Object): {name} | void {{");
    ln!(
        out,
        "    return t.is{name}.apply(t, arguments) ? (value: any) : undefined;"
    );
    ln!(out, "  }},");
}

/// `JSXElement` -> `jSXElement`, matching the delegate's builder names.
fn builder_name(kind: &str) -> String {
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Names which cannot be used as parameter names in strict mode code,
/// plus `arguments` and `eval`. Constructor bodies read `arguments`.
fn is_reserved(name: &str) -> bool {
    matches!(
        name,
        "arguments"
            | "eval"
            | "break"
            | "case"
            | "catch"
            | "class"
            | "const"
            | "continue"
            | "debugger"
            | "default"
            | "delete"
            | "do"
            | "else"
            | "enum"
            | "export"
            | "extends"
            | "false"
            | "finally"
            | "for"
            | "function"
            | "if"
            | "implements"
            | "import"
            | "in"
            | "instanceof"
            | "interface"
            | "let"
            | "new"
            | "null"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "return"
            | "static"
            | "super"
            | "switch"
            | "this"
            | "throw"
            | "true"
            | "try"
            | "typeof"
            | "var"
            | "void"
            | "while"
            | "with"
            | "yield"
            | "await"
    )
}
