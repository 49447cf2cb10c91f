use indoc::indoc;
use nodegen_core::Colors;

use crate::Config;
use crate::dump::dump;
use crate::test_utils::{compile_json, compile_json_with, dump_json};

const SMALL_AST: &str = indoc! {r#"
    {
        "types": [
            {"name": "Node", "final": false},
            {"name": "Expr", "base": "Node", "final": false},
            {
                "name": "Literal",
                "base": "Expr",
                "members": [{"name": "value", "kind": "data", "type": "i64", "simple": true}]
            },
            {
                "name": "Call",
                "base": "Expr",
                "members": [
                    {"name": "func", "kind": "node", "type": "Expr"},
                    {"name": "args", "kind": "node_list", "type": "Expr"}
                ]
            },
            {"name": "Stmt", "base": "Node", "final": false},
            {
                "name": "ExprStmt",
                "base": "Stmt",
                "members": [{"name": "expr", "kind": "node", "type": "Expr"}]
            }
        ]
    }
"#};

#[test]
fn dump_hierarchy() {
    let res = dump_json(SMALL_AST);

    insta::assert_snapshot!(res, @r"
    [types]
    Node 1..3
      Expr 1..2
        Call 1
        Literal 2
      Stmt 3..3
        ExprStmt 3

    [tags]
    Call = 1
    Literal = 2
    FirstExpr = 1
    LastExpr = 2
    ExprStmt = 3
    FirstStmt = 3
    LastStmt = 3
    FirstNode = 1
    LastNode = 3

    [slots]
    NodeList<Expr>  ; visit_expr_list
    NodePtr<Expr>  ; visit_expr
    ");
}

#[test]
fn dump_unions() {
    let res = dump_json(indoc! {r#"
        {
            "unions": [
                {
                    "name": "TokenData",
                    "tag": {"name": "TokenDataType", "underlying": "u8"},
                    "format": "define",
                    "variants": [
                        {"kind": "struct", "name": "None"},
                        {"kind": "alias", "name": "Integer", "target": "i64"},
                        {"kind": "alias", "name": "Float", "target": "f64"},
                        {"kind": "alias", "name": "String", "target": "InternedString"}
                    ]
                },
                {
                    "name": "Terminator",
                    "tag": {"name": "TerminatorType", "underlying": "u8", "start": 1},
                    "storage": "movable",
                    "final": false,
                    "variants": [
                        {
                            "kind": "struct",
                            "name": "Jump",
                            "members": [{"name": "target", "kind": "data", "type": "BlockId"}]
                        },
                        {
                            "kind": "struct",
                            "name": "Return",
                            "members": [
                                {"name": "value", "kind": "data", "type": "LocalId", "required": false}
                            ]
                        },
                        {"kind": "alias", "name": "Entry", "target": "Handlers", "pass_as": "move"}
                    ]
                }
            ]
        }
    "#});

    insta::assert_snapshot!(res, @r"
    [union TokenData] TokenDataType: u8
    0 None
    1 Integer = i64
    2 Float = f64
    3 String = InternedString
    ; storage=trivial format=define equality=none hash=none doc=member

    [union Terminator] TerminatorType: u8 (non-final)
    1 Jump { target: BlockId }
    2 Return { value?: LocalId }
    3 Entry = Handlers (move)
    ; storage=movable format=none equality=none hash=none doc=member
    ");
}

#[test]
fn dump_public_types() {
    let model = compile_json_with(
        indoc! {r#"
            {
                "types": [
                    {"name": "Value", "final": false},
                    {"name": "Null", "base": "Value", "public": true},
                    {"name": "Integer", "base": "Value", "final": false, "public": true},
                    {"name": "SmallInteger", "base": "Integer"},
                    {"name": "HeapInteger", "base": "Integer"},
                    {"name": "HashTable", "base": "Value", "public": "Map"},
                    {"name": "Code", "base": "Value"}
                ]
            }
        "#},
        &Config::new().root("Value"),
    );

    let res = dump(&model, Colors::OFF);

    insta::assert_snapshot!(res, @r"
    [types]
    Value 1..5
      Code 1
      HashTable 2
      Integer 3..4
        HeapInteger 3
        SmallInteger 4
      Null 5

    [tags]
    Code = 1
    HashTable = 2
    HeapInteger = 3
    SmallInteger = 4
    FirstInteger = 3
    LastInteger = 4
    Null = 5
    FirstValue = 1
    LastValue = 5

    [public]
    Integer  ; HeapInteger, SmallInteger
    Map  ; HashTable
    Null  ; Null
    ");
}

#[test]
fn dump_with_colors() {
    let model = compile_json(SMALL_AST);

    let res = dump(&model, Colors::ON);

    assert!(res.starts_with("\x1b[34m[types]\x1b[0m\n"));
    assert!(res.contains("Call \x1b[32m1\x1b[0m"));
    assert!(res.contains("Expr \x1b[2m1..2\x1b[0m"));
}

#[test]
fn dump_empty_schema() {
    assert_eq!(dump_json("{}"), "");
}
