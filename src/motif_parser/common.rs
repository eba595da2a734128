use nom::{
    bytes::complete::tag,
    character::complete::{alphanumeric1, multispace0},
    combinator::recognize,
    error::ParseError,
    multi::many0,
    sequence::{delimited, pair},
    IResult, Parser,
};

pub fn ws<'a, O, E: ParseError<&'a str>, F>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
{
    delimited(multispace0, inner, multispace0)
}

// one or more alphanumerics followed by zero or more occurrences of an
// underscore and more alphanumerics, e.g. "a", "e1" or "foo_bar".
pub fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(alphanumeric1, many0(pair(tag("_"), alphanumeric1)))).parse(input)
}
