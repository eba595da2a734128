use nom::error::{ContextError, ParseError};
use std::fmt;

/// Parse error for motif strings: the unparsed input paired with context
/// messages, innermost first.
#[derive(Debug, PartialEq)]
pub struct MotifParsingError<'a> {
    pub errors: Vec<(&'a str, &'static str)>,
}

impl<'a> ParseError<&'a str> for MotifParsingError<'a> {
    fn from_error_kind(input: &'a str, _kind: nom::error::ErrorKind) -> Self {
        MotifParsingError {
            errors: vec![(input, "unrecognized motif syntax")],
        }
    }

    fn append(input: &'a str, _kind: nom::error::ErrorKind, mut other: Self) -> Self {
        other.errors.push((input, "while parsing an enclosing motif term"));
        other
    }
}

impl<'a> ContextError<&'a str> for MotifParsingError<'a> {
    fn add_context(input: &'a str, ctx: &'static str, mut other: Self) -> Self {
        other.errors.push((input, ctx));
        other
    }
}

impl fmt::Display for MotifParsingError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (input, ctx) in &self.errors {
            writeln!(f, "{}: {}", ctx, input)?;
        }
        Ok(())
    }
}

impl<'a> From<nom::error::Error<&'a str>> for MotifParsingError<'a> {
    fn from(err: nom::error::Error<&'a str>) -> Self {
        MotifParsingError {
            errors: vec![(err.input, "expected a motif identifier")],
        }
    }
}
