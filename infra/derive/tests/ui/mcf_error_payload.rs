use mcf_derive::mcf_error;
use std::borrow::Cow;

#[mcf_error]
#[derive(Clone)]
pub enum LayoutError {
    #[error("Order {order} declared twice in {entity}{}", format_context(.context))]
    Duplicate { entity: &'static str, order: u32, context: Option<Cow<'static, str>> },

    #[error("Nested failure in {field}{}: {source}", format_context(.context))]
    Nested { field: &'static str, source: Box<LayoutError>, context: Option<Cow<'static, str>> },
}

fn main() {
    let inner = LayoutError::Duplicate { entity: "Demo", order: 1, context: None };
    let outer = LayoutError::Nested { field: "hash", source: Box::new(inner), context: None };

    let annotated: Result<(), LayoutError> = Err(outer.clone());
    let err = annotated.context("mapping").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Nested failure in hash (mapping): Order 1 declared twice in Demo"
    );
    assert!(std::error::Error::source(&outer).is_some());
}
