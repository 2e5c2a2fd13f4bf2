use mcf_derive::mcf_model;

#[mcf_model]
struct Digest {
    #[mcf(order = 4294967296)]
    hash: Vec<u8>,
}

fn main() {}
