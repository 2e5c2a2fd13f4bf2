use mcf_derive::mcf_error;

#[mcf_error]
pub enum DemoError {
    #[error("Missing record{:?}", .context)]
    Missing { context: Option<String> },
}

fn main() {}
