use mcf_derive::mcf_model;

#[mcf_model]
struct Digest {
    #[mcf(order = 0, width = 8)]
    hash: Vec<u8>,
}

fn main() {}
