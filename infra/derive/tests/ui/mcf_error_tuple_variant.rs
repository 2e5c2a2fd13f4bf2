use mcf_derive::mcf_error;

#[mcf_error]
pub enum DemoError {
    Io(std::io::Error),
}

fn main() {}
