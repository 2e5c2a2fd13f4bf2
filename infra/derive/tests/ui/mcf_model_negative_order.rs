use mcf_derive::mcf_model;

#[mcf_model]
struct Digest {
    #[mcf(order = -1)]
    hash: Vec<u8>,
}

fn main() {}
