pub mod fixtures;

use fixtures::*;
use mcf_format::prelude::*;
use mcf_format::{Arguments, FieldDescriptor, Schema};

#[test]
fn test_positional_base64_roundtrip() {
    let mapper = Mapper::for_format(Format::McfBase64);

    let composed = mapper.serialize(&credential()).unwrap();
    assert_eq!(composed, "$PBKDF2-SHA256$1$ABEiMw==$3q2+7w==");

    let restored: Credential = mapper.deserialize(&composed).unwrap();
    assert_eq!(restored, credential());
}

#[test]
fn test_positional_hex_roundtrip() {
    let mapper = Mapper::for_format(Format::McfHex);

    let composed = mapper.serialize(&credential()).unwrap();
    assert_eq!(composed, "$PBKDF2-SHA256$1$00112233$deadbeef");
    assert_eq!(mapper.deserialize::<Credential>(&composed).unwrap(), credential());
}

#[test]
fn test_named_sections_use_declared_keys() {
    let mapper = Mapper::for_format(Format::Parameters);

    let composed = mapper.serialize(&credential()).unwrap();
    assert_eq!(composed, "identifier=PBKDF2-SHA256,v=1,salt=ABEiMw==,hash=3q2+7w==");
    assert_eq!(mapper.deserialize::<Credential>(&composed).unwrap(), credential());
}

#[test]
fn test_untagged_fields_are_skipped_and_defaulted() {
    let mapper = Mapper::for_format(Format::McfHex);
    let labelled = Credential { label: Some("ops".into()), ..credential() };

    let sections = mapper.to_sections(&labelled).unwrap();
    assert_eq!(sections.len(), 4);

    let restored: Credential = mapper.from_sections(sections).unwrap();
    assert_eq!(restored.label, None);
}

#[test]
fn test_setters_follow_order_not_declaration() {
    let mapper = Mapper::for_format(Format::McfBase64);

    let composed = mapper.serialize(&settings()).unwrap();
    assert_eq!(composed, "$primary$0.25$true$#");
    assert_eq!(mapper.deserialize::<Settings>(&composed).unwrap(), settings());
}

#[test]
fn test_section_count_mismatch() {
    let mapper = Mapper::for_format(Format::McfHex);
    let err = mapper.deserialize::<Credential>("$PBKDF2-SHA256$1$00").unwrap_err();

    assert!(matches!(err, FormatError::SectionCountMismatch { expected: 4, actual: 3, .. }));
}

#[test]
fn test_invalid_value_is_wrapped_with_field() {
    let mapper = Mapper::for_format(Format::McfHex);
    let err = mapper.deserialize::<Credential>("$PBKDF2-SHA256$one$00$ff").unwrap_err();

    let FormatError::SerializationFailure { field, .. } = &err else {
        panic!("expected a serialization failure, got {err:?}");
    };
    assert_eq!(*field, "v");
    assert!(matches!(err.root_cause(), FormatError::InvalidValue { target_type: "u32", .. }));
}

#[test]
fn test_delimiter_in_value_is_rejected() {
    let mapper = Mapper::for_format(Format::McfBase64);
    let bad = Settings { name: "a$b".into(), ..settings() };

    let err = mapper.serialize(&bad).unwrap_err();
    assert!(matches!(err, FormatError::MalformedSection { .. }));
}

#[test]
fn test_unregistered_field_type_is_unsupported() {
    let mapper = Mapper::new(mcf_format::profile::basic().build(), Positional);
    let err = mapper.serialize(&credential()).unwrap_err();

    assert!(matches!(err.root_cause(), FormatError::UnsupportedConversion { .. }));
}

#[derive(Debug)]
struct ReadOnlyPair {
    left: String,
    right: String,
}

impl McfModel for ReadOnlyPair {
    fn schema() -> Schema<Self> {
        Schema::new()
            .field(FieldDescriptor::writable(
                0,
                "left",
                |p: &Self| &p.left,
                |p: &mut Self, v: String| p.left = v,
            ))
            .field(FieldDescriptor::readonly(1, "right", |p: &Self| &p.right))
            .empty(|| Self { left: String::new(), right: String::new() })
    }
}

#[test]
fn test_missing_write_accessor() {
    let mapper = Mapper::for_format(Format::McfBase64);
    let pair = ReadOnlyPair { left: "l".into(), right: "r".into() };
    assert_eq!(mapper.serialize(&pair).unwrap(), "$l$r");

    let err = mapper.deserialize::<ReadOnlyPair>("$l$r").unwrap_err();
    let FormatError::SerializationFailure { field, source, .. } = err else {
        panic!("expected a serialization failure");
    };
    assert_eq!(field, "right");
    assert!(matches!(*source, FormatError::MissingAccessor { field: "right", .. }));
}

struct Gapped;

impl McfModel for Gapped {
    fn schema() -> Schema<Self> {
        Schema::new()
            .field(FieldDescriptor::readonly(0, "a", |_: &Self| &0_i32))
            .field(FieldDescriptor::readonly(1, "b", |_: &Self| &0_i32))
            .field(FieldDescriptor::readonly(3, "d", |_: &Self| &0_i32))
            .creator(|_: &mut Arguments| Ok(Self))
    }
}

#[derive(Debug)]
struct Colliding;

impl McfModel for Colliding {
    fn schema() -> Schema<Self> {
        Schema::new()
            .field(FieldDescriptor::readonly(0, "a", |_: &Self| &0_i32))
            .field(FieldDescriptor::readonly(0, "b", |_: &Self| &0_i32))
            .field(FieldDescriptor::readonly(1, "c", |_: &Self| &0_i32))
            .creator(|_: &mut Arguments| Ok(Self))
    }
}

#[test]
fn test_order_validation_surfaces_through_mapper() {
    let mapper = Mapper::for_format(Format::McfBase64);

    let err = mapper.serialize(&Gapped).unwrap_err();
    assert!(matches!(err, FormatError::NonContiguousOrder { expected: 2, found: 3, .. }));

    let err = mapper.deserialize::<Colliding>("$0$0$0").unwrap_err();
    assert!(matches!(err, FormatError::DuplicateOrder { order: 0, .. }));
}

#[test]
fn test_custom_converter_extends_profile() {
    #[derive(Debug, PartialEq)]
    struct Rounds(u16);

    #[mcf_model]
    #[derive(Debug, PartialEq)]
    struct Tuned {
        #[mcf(order = 0)]
        rounds: Rounds,
    }

    let registry = mcf_format::profile::base64()
        .to_builder()
        .register::<Rounds, String>(
            |r| Ok(format!("rounds={}", r.0)),
            |s| {
                s.strip_prefix("rounds=")
                    .and_then(|n| n.parse().ok())
                    .map(Rounds)
                    .ok_or_else(|| FormatError::from("bad rounds"))
            },
        )
        .build();
    let mapper = Mapper::new(registry, Positional);

    let composed = mapper.serialize(&Tuned { rounds: Rounds(5000) }).unwrap();
    assert_eq!(composed, "$rounds=5000");
    assert_eq!(mapper.deserialize::<Tuned>(&composed).unwrap(), Tuned { rounds: Rounds(5000) });
}
