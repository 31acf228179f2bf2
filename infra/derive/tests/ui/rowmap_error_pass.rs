use rowmap_derive::rowmap_error;
use std::borrow::Cow;

#[rowmap_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Bad column{}: {column}", format_context(.context))]
    Column { column: usize, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("boom")).context("reading rows")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.kind(), "Io");
    assert_eq!(DemoError::from("oops").kind(), "Internal");
}
