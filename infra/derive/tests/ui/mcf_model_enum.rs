use mcf_derive::mcf_model;

#[mcf_model]
enum Shape {
    Circle,
}

fn main() {}
