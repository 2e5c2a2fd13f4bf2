use mcf_derive::mcf_model;
use mcf_format as mapped;
use mapped::{Format, Mapper};

#[mcf_model(construct = "setters", crate = "mapped")]
#[derive(Debug, Default, PartialEq)]
struct Tuning {
    #[mcf(order = 1, name = "r")]
    rounds: u32,
    #[mcf(order = 0)]
    label: String,
    cached: bool,
}

#[mcf_model(crate = "::mcf_format")]
#[derive(Debug, PartialEq)]
struct Digest {
    #[mcf(order = 0)]
    identifier: String,
    #[mcf(order = 1)]
    hash: Vec<u8>,
}

fn main() {
    let mapper = Mapper::for_format(Format::Parameters);

    let tuning = Tuning { rounds: 3, label: "primary".into(), cached: true };
    let text = mapper.serialize(&tuning).unwrap();
    assert_eq!(text, "label=primary,r=3");
    let restored: Tuning = mapper.deserialize(&text).unwrap();
    assert_eq!(restored, Tuning { cached: false, ..tuning });

    let hex = Mapper::for_format(Format::McfHex);
    let digest = Digest { identifier: "SHA-256".into(), hash: vec![0xca, 0xfe] };
    let text = hex.serialize(&digest).unwrap();
    assert_eq!(text, "$SHA-256$cafe");
    assert_eq!(hex.deserialize::<Digest>(&text).unwrap(), digest);
}
