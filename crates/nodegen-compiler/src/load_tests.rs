use indoc::indoc;

use crate::compile::Schema;
use crate::model::{
    DocMode, FormatMode, HashMode, IntWidth, MemberKind, PassAs, StorageMode, TypeRef,
    VariantKind, WalkOrder,
};
use crate::Error;

fn load(json: &str) -> crate::Result<Schema> {
    Schema::from_json(json)
}

#[test]
fn load_types() {
    let schema = load(indoc! {r#"
        {
            "types": [
                {"name": "Node", "final": false, "rendered_name": "AstNode", "doc": "Root."},
                {
                    "name": "Binding",
                    "base": "Node",
                    "walk_order": "derived_first",
                    "members": [
                        {"name": "is_const", "kind": "data", "type": "bool", "simple": true},
                        {"name": "path", "kind": "data_list", "type": "InternedString"},
                        {"name": "spec", "kind": "node", "type": "Node", "required": false},
                        {"name": "items", "kind": "node_list", "type": "Node"}
                    ]
                },
                {"name": "HashTable", "base": "Node", "public": "Map"},
                {"name": "Tuple", "base": "Node", "public": true},
                {"name": "Code", "base": "Node", "public": false}
            ]
        }
    "#})
    .unwrap();

    let [node, binding, table, tuple, code] = &schema.types[..] else {
        panic!("expected five types");
    };

    assert!(!node.is_final);
    assert_eq!(node.rendered_name("Ast"), "AstNode");
    assert_eq!(node.doc.as_deref(), Some("Root."));

    assert!(binding.is_final);
    assert_eq!(binding.base, Some(TypeRef::Name("Node".into())));
    assert_eq!(binding.walk_order, WalkOrder::DerivedFirst);
    let kinds: Vec<_> = binding.members.iter().map(|m| m.kind.as_str()).collect();
    assert_eq!(kinds, ["data", "data_list", "node", "node_list"]);
    assert_eq!(
        binding.members[0].kind,
        MemberKind::Data {
            data_type: "bool".into(),
            simple: true
        }
    );
    assert!(!binding.members[2].is_required());

    assert_eq!(table.public_name.as_deref(), Some("Map"));
    assert_eq!(tuple.public_name.as_deref(), Some("Tuple"));
    assert!(!code.is_public());
}

#[test]
fn load_unions() {
    let schema = load(indoc! {r#"
        {
            "unions": [
                {
                    "name": "BytecodeMember",
                    "tag": {"name": "BytecodeMemberType", "underlying": "u8", "doc": "Member type."},
                    "doc": "A module member.",
                    "format": "define",
                    "hash": "define",
                    "equality": "define",
                    "doc_mode": "tag",
                    "storage": "movable",
                    "final": false,
                    "variants": [
                        {
                            "kind": "struct",
                            "name": "Variable",
                            "doc": "A variable.",
                            "members": [
                                {"name": "name", "kind": "data", "type": "BytecodeMemberID"},
                                {"name": "initial_value", "kind": "data", "type": "BytecodeMemberID"}
                            ]
                        },
                        {
                            "kind": "alias",
                            "name": "Handlers",
                            "target": "std::vector<BlockId>",
                            "pass_as": "move",
                            "argument_name": "handlers_list",
                            "accessor_name": "as_handler_list"
                        }
                    ]
                }
            ]
        }
    "#})
    .unwrap();

    let union = &schema.unions[0];
    assert_eq!(union.name, "BytecodeMember");
    assert_eq!(union.tag.underlying, IntWidth::U8);
    assert_eq!(union.tag.start_value, None);
    assert_eq!(union.tag.doc.as_deref(), Some("Member type."));
    assert_eq!(union.doc.as_deref(), Some("A module member."));
    assert!(!union.is_final);

    let caps = union.capabilities;
    assert_eq!(caps.storage, StorageMode::Movable);
    assert_eq!(caps.format, FormatMode::Define);
    assert_eq!(caps.hash, HashMode::Define);
    assert_eq!(caps.doc_mode, DocMode::Tag);

    let variable = union.variant_named("Variable").unwrap();
    assert_eq!(variable.members().len(), 2);
    assert_eq!(variable.doc.as_deref(), Some("A variable."));

    let handlers = union.variant_named("Handlers").unwrap();
    assert!(matches!(
        handlers.kind,
        VariantKind::Alias {
            pass_as: PassAs::Move,
            ..
        }
    ));
    assert_eq!(handlers.names.argument, "handlers_list");
    assert_eq!(handlers.names.accessor, "as_handler_list");
    assert_eq!(handlers.names.factory, "make_handlers");
}

#[test]
fn invalid_walk_order() {
    let err = load(r#"{"types": [{"name": "A", "walk_order": "sideways"}]}"#).unwrap_err();

    assert_eq!(err.to_string(), "invalid walk order `sideways` for type `A`");
}

#[test]
fn invalid_member_pass_as() {
    let err = load(indoc! {r#"
        {"types": [{"name": "Call", "members": [
            {"name": "args", "kind": "data", "type": "Args", "pass_as": "borrow"}
        ]}]}
    "#})
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid passing convention `borrow` in `Call` (expected copy or move)"
    );
}

#[test]
fn invalid_alias_pass_as() {
    let err = load(indoc! {r#"
        {"unions": [{"name": "U", "tag": {"name": "T", "underlying": "u8"}, "variants": [
            {"kind": "alias", "name": "V", "target": "X", "pass_as": "borrow"}
        ]}]}
    "#})
    .unwrap_err();

    assert!(matches!(err, Error::InvalidPassAs { owner, .. } if owner == "U::V"));
}

#[test]
fn invalid_storage_mode() {
    let err = load(indoc! {r#"
        {"unions": [{"name": "U", "tag": {"name": "T", "underlying": "u8"}, "storage": "sticky"}]}
    "#})
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "invalid storage mode `sticky` for union `U` (expected trivial or movable)"
    );
}

#[test]
fn invalid_capability() {
    let err = load(indoc! {r#"
        {"unions": [{"name": "U", "tag": {"name": "T", "underlying": "u8"}, "equality": "deep"}]}
    "#})
    .unwrap_err();

    assert_eq!(err.to_string(), "invalid equality mode `deep` for union `U`");
}

#[test]
fn invalid_tag_width() {
    let err = load(r#"{"unions": [{"name": "U", "tag": {"name": "T", "underlying": "i8"}}]}"#)
        .unwrap_err();

    assert_eq!(err.to_string(), "invalid underlying type `i8` for tag `T`");
}

#[test]
fn malformed_document() {
    let err = load(r#"{"types": [{"name": 1}]}"#).unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
    assert!(err.to_string().starts_with("malformed schema document: "));
}
