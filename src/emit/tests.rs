use indoc::indoc;
use serde_json::json;

use crate::{Config, Error, Registry, TypeOverrides, Validator, generate};

fn identifier() -> Registry {
    Registry::from_value(json!({
        "builderKeys": { "Identifier": ["name"] },
        "nodeFields": { "Identifier": { "name": { "validate": { "type": "string" } } } },
        "aliasKeys": { "Identifier": ["Expression"] },
    }))
    .unwrap()
}

fn class_members() -> Registry {
    Registry::from_value(json!({
        "builderKeys": {
            "ClassMethod": ["kind", "key", "params", "body", "computed", "static"],
            "FunctionExpression": ["id", "params", "body"],
            "ReturnStatement": ["argument"],
            "ExportDefaultDeclaration": ["declaration"],
            "ClassDeclaration": ["id", "superClass", "body"],
        },
        "nodeFields": {
            "ClassMethod": {
                "kind": {
                    "validate": { "chainOf": [{ "type": "string" }, { "oneOf": ["get", "set", "method", "constructor"] }] },
                    "default": "method",
                },
                "key": { "validate": { "anyOf": ["Identifier"] } },
                "params": {
                    "validate": { "chainOf": [{ "type": "array" }, { "each": { "oneOfNodeTypes": ["Identifier", "Pattern", "RestElement"] } }] },
                },
                "body": { "validate": { "type": "BlockStatement" } },
                "computed": { "validate": { "type": "boolean" }, "default": false },
                "static": { "validate": { "type": "boolean" }, "optional": true },
                "async": { "validate": { "type": "boolean" }, "default": false },
            },
            "FunctionExpression": {
                "id": { "validate": { "type": "Identifier" }, "optional": true },
                "params": {
                    "validate": { "chainOf": [{ "type": "array" }, { "each": { "oneOfNodeTypes": ["Identifier", "Pattern", "RestElement"] } }] },
                },
                "body": { "validate": { "type": "BlockStatement" } },
                "generator": { "validate": { "type": "boolean" }, "default": false },
            },
            "ReturnStatement": {
                "argument": { "validate": { "type": "Expression" }, "optional": true },
            },
            "ExportDefaultDeclaration": {
                "declaration": {
                    "validate": { "oneOfNodeTypes": ["FunctionDeclaration", "ClassDeclaration", "Expression"] },
                },
            },
            "ClassDeclaration": {
                "id": { "validate": { "type": "Identifier" } },
                "superClass": { "validate": { "type": "Expression" }, "optional": true },
                "body": { "validate": { "type": "ClassBody" } },
            },
        },
        "aliasKeys": {
            "ClassMethod": ["Function", "Scopable", "BlockParent", "FunctionParent", "Method"],
            "FunctionExpression": ["Scopable", "Function", "BlockParent", "FunctionParent", "Expression", "Pureish"],
            "ReturnStatement": ["Statement", "Terminatorless", "CompletionStatement"],
            "ExportDefaultDeclaration": ["Statement", "Declaration", "ModuleDeclaration", "ExportDeclaration"],
            "ClassDeclaration": ["Scopable", "Class", "Statement", "Declaration", "Pureish"],
        },
    }))
    .unwrap()
}

#[test]
fn identifier_declarations() {
    let generated = generate(&identifier(), &Config::default()).unwrap();
    assert_eq!(
        generated.declarations,
        indoc! {"
            // AUTOMATICALLY GENERATED BY nodegen

            type Location = {start: {line: number, column: number}, end: {line: number, column: number}};

            declare class Identifier {
              type: 'Identifier';
              loc: ?Location;
              name: string;

              // alias: Expression
              // alias: BabelNode
            }

            type Expression = (
              | Identifier
            );

            type BabelNode = (
              | Identifier
            );

            type JSXValue = JSXText | JSXExpressionContainer | JSXSpreadChild | JSXElement;
        "}
    );
    assert!(generated.diagnostics.is_empty());
}

#[test]
fn identifier_wrapper() {
    let generated = generate(&identifier(), &Config::default()).unwrap();
    assert_eq!(
        generated.wrapper,
        indoc! {"
            // AUTOMATICALLY GENERATED BY nodegen
            // @flow

            let t: any = null;
            let currentLocation: any = null;
            export function getCurrentLocation(): Location { return currentLocation; }
            export function setCurrentLocation(loc: Location): Location { return currentLocation = loc; }
            export function setBabelTypes(_t: Object): Object { return t = _t; }

            const BabelTypes = {
              identifier(name: string): Identifier {
                const args = ([].slice: any).call(arguments);
                let loc = args[args.length - 1];
                const hasLoc = (loc && typeof loc === 'object' && typeof loc.start === 'object' && typeof loc.end === 'object');
                if (hasLoc) {
                  args.pop();
                }
                return {...t.Identifier.apply(t, args), loc: hasLoc ? (loc: any) : getCurrentLocation()};
              },
              isIdentifier(value: any, opts?: Object): boolean {
                return t.isIdentifier.apply(t, arguments);
              },
              assertIdentifier(value: Identifier, opts?: Object): mixed {
                return t.assertIdentifier.apply(t, arguments);
              },
              asIdentifier(value: any, opts?: Object): Identifier | void {
                return t.isIdentifier.apply(t, arguments) ? (value: any) : undefined;
              },
            }

            export default BabelTypes;
        "}
    );
}

#[test]
fn optional_fields() {
    let generated = generate(&class_members(), &Config::default()).unwrap();

    assert!(generated.declarations.contains("  argument: ?Expression;\n"));
    assert!(generated.wrapper.contains("  returnStatement(argument: ?Expression): ReturnStatement {\n"));

    // defaults make a field omittable too
    assert!(generated.declarations.contains("  computed: ?boolean;\n"));
    assert!(generated.declarations.contains("  generator: ?boolean;\n"));
    assert!(generated.declarations.contains("  kind: ?\"get\" | \"set\" | \"method\" | \"constructor\";\n"));
}

#[test]
fn fields_follow_builder_order() {
    let generated = generate(&class_members(), &Config::default()).unwrap();
    assert!(generated.declarations.contains(indoc! {"
        declare class FunctionExpression {
          type: 'FunctionExpression';
          loc: ?Location;
          id: ?Identifier;
          params: $ReadOnlyArray<Identifier | Pattern | RestElement>;
          body: BlockStatement;
          generator: ?boolean;
    "}));
}

#[test]
fn reserved_fields() {
    let generated = generate(&class_members(), &Config::default()).unwrap();

    // `static` never appears as a declared field
    assert!(!generated.declarations.contains("  static:"));
    assert!(generated.declarations.contains("  computed: ?boolean;\n  async: ?boolean;\n"));

    assert!(generated.wrapper.contains(
        "  classMethod(kind: ?\"get\" | \"set\" | \"method\" | \"constructor\", key: Expression, \
         params: $ReadOnlyArray<Identifier | Pattern | RestElement>, body: BlockStatement, \
         computed: ?boolean, _static: ?boolean): ClassMethod {\n"
    ));
    assert!(generated.wrapper.contains(
        "  exportDefaultDeclaration(declaration: FunctionDeclaration | ClassDeclaration | Expression): ExportDefaultDeclaration {\n"
    ));
}

#[test]
fn unrecognized_validator_falls_back() {
    let config = Config::default().overrides(TypeOverrides::empty());
    let generated = generate(&class_members(), &config).unwrap();

    assert!(generated.declarations.contains("  key: mixed;\n"));
    assert!(generated.wrapper.contains("key: mixed, "));

    // resolved once, shared by both outputs
    assert_eq!(generated.diagnostics.len(), 1);
    let diagnostic = &generated.diagnostics[0];
    assert_eq!(diagnostic.kind, "ClassMethod");
    assert_eq!(diagnostic.field, "key");
    assert!(matches!(diagnostic.validator, Validator::Unknown(_)));
}

#[test]
fn function_alias_is_not_a_union() {
    let generated = generate(&class_members(), &Config::default()).unwrap();
    let decls = &generated.declarations;

    assert!(decls.contains("  // alias: Function\n"));
    assert!(!decls.contains("type Function = ("));
    assert!(decls.contains(indoc! {"
        type Scopable = (
          | ClassDeclaration
          | ClassMethod
          | FunctionExpression
        );
    "}));
    assert!(decls.contains(indoc! {"
        type BabelNode = (
          | ClassDeclaration
          | ClassMethod
          | ExportDefaultDeclaration
          | FunctionExpression
          | ReturnStatement
        );
    "}));
}

#[test]
fn alias_unions_in_discovery_order() {
    let generated = generate(&class_members(), &Config::default()).unwrap();
    let decls = &generated.declarations;

    let position = |alias: &str| decls.find(&format!("type {alias} = (")).unwrap();
    let order = [
        "Scopable",
        "Class",
        "Statement",
        "Declaration",
        "Pureish",
        "BabelNode",
        "BlockParent",
        "FunctionParent",
        "Method",
        "ExportDeclaration",
    ];
    for pair in order.windows(2) {
        assert!(position(pair[0]) < position(pair[1]), "{pair:?}");
    }
    assert!(decls.ends_with(
        "type JSXValue = JSXText | JSXExpressionContainer | JSXSpreadChild | JSXElement;\n"
    ));
}

#[test]
fn function_families_are_grouped() {
    let generated = generate(&class_members(), &Config::default()).unwrap();
    let wrapper = &generated.wrapper;

    let last_builder = wrapper.find("  returnStatement(").unwrap();
    let first_predicate = wrapper.find("  isClassDeclaration(").unwrap();
    let last_predicate = wrapper.find("  isReturnStatement(").unwrap();
    let first_assertion = wrapper.find("  assertClassDeclaration(").unwrap();
    let last_assertion = wrapper.find("  assertReturnStatement(").unwrap();
    let first_cast = wrapper.find("  asClassDeclaration(").unwrap();

    assert!(last_builder < first_predicate);
    assert!(last_predicate < first_assertion);
    assert!(last_assertion < first_cast);
}

#[test]
fn trailing_location_is_not_forwarded() {
    let generated = generate(&class_members(), &Config::default()).unwrap();
    assert!(generated.wrapper.contains(concat!(
        "  returnStatement(argument: ?Expression): ReturnStatement {\n",
        "    const args = ([].slice: any).call(arguments);\n",
        "    let loc = args[args.length - 1];\n",
        "    const hasLoc = (loc && typeof loc === 'object' && typeof loc.start === 'object' && typeof loc.end === 'object');\n",
        "    if (hasLoc) {\n",
        "      args.pop();\n",
        "    }\n",
        "    return {...t.ReturnStatement.apply(t, args), loc: hasLoc ? (loc: any) : getCurrentLocation()};\n",
        "  },\n",
    )));
}

#[test]
fn explicit_locations_only() {
    let config = Config::default().ambient_location(false);
    let generated = generate(&identifier(), &config).unwrap();

    assert!(!generated.wrapper.contains("currentLocation"));
    assert!(!generated.wrapper.contains("getCurrentLocation"));
    assert!(
        generated
            .wrapper
            .contains("loc: hasLoc ? (loc: any) : null};\n")
    );
}

#[test]
fn configured_names() {
    let config = Config::default()
        .source("scripts/generate-nodes")
        .universal_alias("AnyNode")
        .delegate_setter("setDelegate")
        .module_name("Nodes")
        .unknown_type("any")
        .excluded_aliases(["Expression"]);
    let generated = generate(&identifier(), &config).unwrap();

    assert!(
        generated
            .declarations
            .starts_with("// AUTOMATICALLY GENERATED BY scripts/generate-nodes\n")
    );
    assert!(generated.declarations.contains("type AnyNode = (\n  | Identifier\n);\n"));
    assert!(!generated.declarations.contains("type Expression = ("));
    assert!(generated.wrapper.contains("export function setDelegate(_t: Object): Object"));
    assert!(generated.wrapper.contains("const Nodes = {\n"));
    assert!(generated.wrapper.ends_with("export default Nodes;\n"));
}

#[test]
fn output_is_deterministic() {
    let registry = class_members();
    let a = generate(&registry, &Config::default()).unwrap();
    let b = generate(&registry, &Config::default()).unwrap();
    assert_eq!(a.declarations, b.declarations);
    assert_eq!(a.wrapper, b.wrapper);
}

#[test]
fn duplicate_alias_membership() {
    let registry = Registry::from_value(json!({
        "builderKeys": { "ThisExpression": [] },
        "nodeFields": { "ThisExpression": {} },
        "aliasKeys": { "ThisExpression": ["Expression", "Expression"] },
    }))
    .unwrap();
    let generated = generate(&registry, &Config::default()).unwrap();

    assert!(
        generated
            .declarations
            .contains("type Expression = (\n  | ThisExpression\n);\n")
    );
    assert!(generated.wrapper.contains("  thisExpression(): ThisExpression {\n"));
}

#[test]
fn empty_union_aborts() {
    let registry = Registry::from_value(json!({
        "builderKeys": { "Program": ["body"] },
        "nodeFields": {
            "Program": {
                "body": { "validate": { "chainOf": [{ "type": "array" }, { "each": { "oneOfNodeTypes": [] } }] } },
            },
        },
    }))
    .unwrap();
    let err = generate(&registry, &Config::default()).unwrap_err();
    assert!(matches!(err, Error::Translate { ref kind, ref field, .. } if kind == "Program" && field == "body"));
}
