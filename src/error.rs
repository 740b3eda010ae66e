use std::error;
use std::fmt::{self, Display};

/// Errors from grammar construction and the parse entry points.
///
/// A failed match is not an error; it is reported as an ordinary
/// `Ok(false)` / `Ok(None)` outcome so callers can tell "input did not
/// match" apart from a misconfigured grammar.
#[derive(Debug)]
pub enum Error {
    /// The requested rule name is not registered in the grammar.
    UnknownRule(String),
    /// Zero-length terminal literals are rejected at construction time.
    EmptyTerminal,
    /// Members can only be appended to alternations and concatenations.
    NotAGroup(&'static str),
    /// The operation is not implemented for this combinator variant.
    Unsupported {
        operation: &'static str,
        combinator: &'static str,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnknownRule(name) => write!(f, "no rule named '{}'", name),
            Error::EmptyTerminal => write!(f, "terminal literal must not be empty"),
            Error::NotAGroup(desc) => write!(f, "cannot add members to {}", desc),
            Error::Unsupported {
                operation,
                combinator,
            } => write!(f, "{} is not implemented for {}", operation, combinator),
        }
    }
}

impl error::Error for Error {}
