use super::*;
use crate::model::{IntWidth, Member, PassAs, StorageMode, Tag, Variant};

fn token_data() -> UnionSchema {
    UnionSchema::new("TokenData", Tag::new("TokenDataType", IntWidth::U8))
        .doc("Represents the value of a token.")
        .variants([
            Variant::unit("None").doc("The token has no value."),
            Variant::alias("Integer", "i64"),
            Variant::alias("Float", "f64"),
            Variant::alias("String", "InternedString"),
        ])
}

#[test]
fn valid_union() {
    validate_union(&token_data()).unwrap();
}

#[test]
fn empty_union_is_valid() {
    let union = UnionSchema::new("Empty", Tag::new("EmptyType", IntWidth::U8));

    validate_union(&union).unwrap();
    assert!(tag_values(&union).is_empty());
}

#[test]
fn tag_doc_mode_requires_tag_doc() {
    let union = token_data().doc_mode(DocMode::Tag);

    let err = validate_union(&union).unwrap_err();
    assert_eq!(
        err.to_string(),
        "union `TokenData` documents its tag but tag `TokenDataType` has no doc"
    );
}

#[test]
fn tag_doc_mode_with_tag_doc() {
    let mut union = token_data().doc_mode(DocMode::Tag);
    union.tag = union.tag.clone().doc("Type tag of TokenData.");

    validate_union(&union).unwrap();
}

#[test]
fn duplicate_variant() {
    let union = token_data().variant(Variant::alias("Integer", "u64"));

    let err = validate_union(&union).unwrap_err();
    assert!(matches!(
        err,
        Error::DuplicateVariant { union, variant } if union == "TokenData" && variant == "Integer"
    ));
}

#[test]
fn self_referential_alias() {
    let union = token_data().variant(Variant::alias("Nested", "TokenData"));

    let err = validate_union(&union).unwrap_err();
    assert_eq!(
        err.to_string(),
        "alias variant `Nested` of union `TokenData` wraps the union itself"
    );
}

#[test]
fn alias_to_other_union_is_allowed() {
    let union = UnionSchema::new("Outer", Tag::new("OuterType", IntWidth::U8))
        .variant(Variant::alias("Data", "TokenData").pass_as(PassAs::Move));

    validate_union(&union).unwrap();
}

#[test]
fn node_members_rejected() {
    let union = UnionSchema::new("Terminator", Tag::new("TerminatorType", IntWidth::U8)).variant(
        Variant::structure("Jump", [Member::node("target", "Block")]),
    );

    let err = validate_union(&union).unwrap_err();
    assert!(matches!(err, Error::UnsupportedUnionMember { member, .. } if member == "target"));
}

#[test]
fn duplicate_struct_member() {
    let union = UnionSchema::new("Terminator", Tag::new("TerminatorType", IntWidth::U8)).variant(
        Variant::structure(
            "Branch",
            [
                Member::data("target", "BlockId"),
                Member::data("target", "BlockId"),
            ],
        ),
    );

    let err = validate_union(&union).unwrap_err();
    assert_eq!(
        err.to_string(),
        "member `target` is declared twice in `Terminator::Branch`"
    );
}

#[test]
fn variants_must_fit_tag_width() {
    let variants = (0..256).map(|i| Variant::unit(format!("V{i}")));
    let union = UnionSchema::new("Wide", Tag::new("WideType", IntWidth::U8)).variants(variants);

    validate_union(&union).unwrap();

    let shifted = UnionSchema {
        tag: Tag::new("WideType", IntWidth::U8).start_value(1),
        ..union
    };
    let err = validate_union(&shifted).unwrap_err();
    assert_eq!(
        err.to_string(),
        "tag value 256 for `WideType::V255` does not fit in u8"
    );
}

#[test]
fn tag_values_follow_declaration_order() {
    let union = UnionSchema::new("Op", Tag::new("OpType", IntWidth::U8).start_value(1)).variants([
        Variant::unit("LoadNull"),
        Variant::unit("LoadFalse"),
        Variant::unit("LoadTrue"),
    ]);

    let values: Vec<_> = tag_values(&union)
        .into_iter()
        .map(|e| (e.label, e.value))
        .collect();
    assert_eq!(
        values,
        [
            ("LoadNull".to_string(), 1),
            ("LoadFalse".to_string(), 2),
            ("LoadTrue".to_string(), 3),
        ]
    );
}

#[test]
fn tag_values_at_the_end_of_u64() {
    let tag = Tag::new("WideType", IntWidth::U64).start_value(u64::MAX);
    let union = UnionSchema::new("Wide", tag).variant(Variant::unit("Only"));

    validate_union(&union).unwrap();

    let values = tag_values(&union);
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].value, u64::MAX);

    let two = union.variant(Variant::unit("Second"));
    let err = validate_union(&two).unwrap_err();
    assert!(matches!(err, Error::TagOverflow { width: IntWidth::U64, .. }));
}

#[test]
fn union_set_keeps_insertion_order() {
    let mut set = UnionSet::new();
    set.insert_all([
        token_data(),
        UnionSchema::new("Terminator", Tag::new("TerminatorType", IntWidth::U8))
            .storage(StorageMode::Movable)
            .variant(Variant::unit("None")),
    ])
    .unwrap();

    let names: Vec<_> = set.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["TokenData", "Terminator"]);
    assert_eq!(set.len(), 2);
    assert_eq!(
        set.get("Terminator").unwrap().capabilities.storage,
        StorageMode::Movable
    );
    assert_eq!(set.tag_owner("TokenDataType"), Some("TokenData"));
}

#[test]
fn union_set_rejects_duplicate_names() {
    let mut set = UnionSet::new();
    set.insert(token_data()).unwrap();

    let mut again = token_data();
    again.tag = Tag::new("OtherType", IntWidth::U8);
    let err = set.insert(again).unwrap_err();
    assert_eq!(err.to_string(), "duplicate union name `TokenData`");
}

#[test]
fn union_set_rejects_shared_tags() {
    let mut set = UnionSet::new();
    set.insert(token_data()).unwrap();

    let other = UnionSchema::new("Other", Tag::new("TokenDataType", IntWidth::U8));
    let err = set.insert(other).unwrap_err();
    assert_eq!(
        err.to_string(),
        "tag `TokenDataType` of union `Other` already belongs to union `TokenData`"
    );
    assert_eq!(set.len(), 1);
}

#[test]
fn union_set_rejects_invalid_unions() {
    let mut set = UnionSet::new();

    let err = set
        .insert(token_data().doc_mode(DocMode::Tag))
        .unwrap_err();
    assert!(matches!(err, Error::MissingDoc { .. }));
    assert!(set.is_empty());
    assert_eq!(set.tag_owner("TokenDataType"), None);
}
