use indoc::indoc;

use super::*;
use crate::model::{IntWidth, MemberKind, VariantKind};

fn load_tuple_member() -> Instr {
    Instr::new("LoadTupleMember", "Load `tuple.index` into target.").params([
        Param::local("tuple"),
        Param::integer("index", "u32"),
        Param::local("target"),
    ])
}

#[test]
fn param_kinds() {
    let cases = [
        (Param::local("a"), "BytecodeRegister", "u32", "local"),
        (Param::param("a"), "BytecodeParam", "u32", "param"),
        (Param::module("a"), "BytecodeMemberID", "u32", "module"),
        (Param::offset("a"), "BytecodeOffset", "u32", "offset"),
        (Param::integer("a", "i64"), "i64", "i64", "constant"),
        (Param::float("a"), "f64", "f64", "constant"),
    ];

    for (param, rendered, raw, description) in cases {
        assert_eq!(param.kind.rendered_type(), rendered);
        assert_eq!(param.kind.raw_type(), raw);
        assert_eq!(param.kind.description(), description);
    }
}

#[test]
fn full_doc_lists_arguments() {
    let doc = load_tuple_member().full_doc();

    assert_eq!(
        doc,
        indoc! {"
            Load `tuple.index` into target.

            Arguments:
              - tuple (local, u32)
              - index (constant, u32)
              - target (local, u32)"}
    );
}

#[test]
fn full_doc_without_arguments() {
    let pop = Instr::new("Pop", "Pop the top from the stack.");

    assert_eq!(pop.full_doc(), "Pop the top from the stack.");
}

#[test]
fn variant_members_use_rendered_types() {
    let variant = load_tuple_member().to_variant();

    let members: Vec<_> = variant
        .members()
        .iter()
        .map(|m| match &m.kind {
            MemberKind::Data { data_type, .. } => (m.name.as_str(), data_type.as_str()),
            other => panic!("unexpected member kind {other:?}"),
        })
        .collect();
    assert_eq!(
        members,
        [
            ("tuple", "BytecodeRegister"),
            ("index", "u32"),
            ("target", "BytecodeRegister"),
        ]
    );
    assert!(matches!(variant.kind, VariantKind::Struct { .. }));
    assert_eq!(variant.names.factory, "make_load_tuple_member");
}

#[test]
fn operand_names_avoid_keywords() {
    let load_method = Instr::new("LoadMethod", "Load the method called name from the given object.")
        .params([
            Param::local("object"),
            Param::module("name"),
            Param::local("this"),
            Param::local("method"),
        ]);

    let variant = load_method.to_variant();

    let names: Vec<_> = variant.members().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["object", "name", "this_", "method"]);
    // The operand listing keeps the declared name.
    assert!(variant.doc.unwrap().contains("  - this (local, u32)"));
}

#[test]
fn operand_docs_carry_over() {
    let jmp = Instr::new("Jmp", "Unconditional jump.")
        .params([Param::offset("offset").doc("Absolute jump target.")]);

    let variant = jmp.to_variant();

    assert_eq!(
        variant.members()[0].doc.as_deref(),
        Some("Absolute jump target.")
    );
}

#[test]
fn lower_instruction_list() {
    let instrs = [
        Instr::new("LoadNull", "Load null into the target.").params([Param::local("target")]),
        load_tuple_member(),
        Instr::new("Pop", "Pop the top from the stack."),
    ];

    let union = lower_instructions(
        "BytecodeInstr",
        Tag::new("BytecodeOp", IntWidth::U8).start_value(1),
        &instrs,
    );

    let names: Vec<_> = union.variants.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["LoadNull", "LoadTupleMember", "Pop"]);
    assert_eq!(union.tag.first_value(), 1);
    assert!(union.variant_named("Pop").unwrap().members().is_empty());
}
