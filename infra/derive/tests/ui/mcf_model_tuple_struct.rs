use mcf_derive::mcf_model;

#[mcf_model]
struct Pair(u32, u32);

fn main() {}
