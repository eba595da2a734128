//! Parser for motif strings.
//!
//! A motif is a `;`-separated sequence of terms. Each term is a single vertex
//! reference `(a)` / `()`, or a directed edge `(a)-[e]->(b)` whose edge and
//! endpoint names are each optional, optionally prefixed with `!` to negate
//! the edge. Examples:
//!
//! ```text
//! (a)-[e]->(b); (b)-[e2]->(c)
//! (a)-[]->(b); !(b)-[]->(a)
//! ```

use nom::branch::alt;
use nom::character::complete::{char, multispace0};
use nom::combinator::{map, opt};
use nom::error::context;
use nom::multi::separated_list1;
use nom::{IResult, Parser};

use ast::{EdgePattern, MotifTerm, VertexPattern};
use common::{identifier, ws};
use errors::MotifParsingError;

pub mod ast;
mod common;
pub mod errors;

/// Parse a vertex reference: `(name)` or `()`.
fn parse_vertex(input: &str) -> IResult<&str, VertexPattern<'_>, MotifParsingError<'_>> {
    let (input, _) = char('(').parse(input)?;
    let (input, name) = ws(opt(identifier)).parse(input).map_err(to_motif_err)?;
    let (input, _) = context("expected `)` closing a vertex reference", char(')')).parse(input)?;
    Ok((input, VertexPattern { name }))
}

/// Parse the edge arrow between two vertex references: `-[name]->` or `-[]->`.
fn parse_arrow(input: &str) -> IResult<&str, Option<&str>, MotifParsingError<'_>> {
    let (input, _) = multispace0.parse(input)?;
    let (input, _) = char('-').parse(input)?;
    let (input, _) = context("expected `[` after `-` in an edge arrow", char('[')).parse(input)?;
    let (input, name) = ws(opt(identifier)).parse(input).map_err(to_motif_err)?;
    let (input, _) = context("expected `]` closing an edge name", char(']')).parse(input)?;
    let (input, _) = context("expected `->` completing an edge arrow", (char('-'), char('>')))
        .parse(input)?;
    Ok((input, name))
}

/// Parse one positive pattern: a vertex, or two vertices connected by an arrow.
fn parse_pattern(input: &str) -> IResult<&str, MotifTerm<'_>, MotifParsingError<'_>> {
    let (input, src) = parse_vertex(input)?;
    let (input, arrow) = opt(parse_arrow).parse(input)?;
    match arrow {
        None => Ok((input, MotifTerm::Vertex(src))),
        Some(name) => {
            let (input, _) = multispace0.parse(input)?;
            let (input, dst) =
                context("expected a vertex reference after `->`", parse_vertex).parse(input)?;
            Ok((input, MotifTerm::Edge(EdgePattern { name, src, dst })))
        }
    }
}

/// Parse one term: an optionally negated pattern. Negation is only legal on an
/// edge+endpoints group; `!(a)` alone is rejected.
fn parse_term(input: &str) -> IResult<&str, MotifTerm<'_>, MotifParsingError<'_>> {
    let (input, _) = multispace0.parse(input)?;
    let (input, negated) = opt(char('!')).parse(input)?;
    let (after, term) = parse_pattern(input)?;
    match (negated, term) {
        (None, term) => Ok((after, term)),
        (Some(_), MotifTerm::Edge(edge)) => Ok((after, MotifTerm::Negation(edge))),
        (Some(_), _) => Err(nom::Err::Failure(MotifParsingError {
            errors: vec![(input, "negation `!` must apply to an edge pattern")],
        })),
    }
}

fn parse_terms(input: &str) -> IResult<&str, Vec<MotifTerm<'_>>, MotifParsingError<'_>> {
    alt((
        separated_list1(ws(char(';')), parse_term),
        // A motif may be entirely empty (matches everything, yields no columns)
        map(multispace0, |_| vec![]),
    ))
    .parse(input)
}

/// Parse a complete motif string into its ordered term sequence.
///
/// The whole input must be consumed; trailing tokens are an error listing the
/// unparsed remainder.
pub fn parse_motif(input: &str) -> Result<Vec<MotifTerm<'_>>, MotifParsingError<'_>> {
    match parse_terms(input) {
        Ok((remainder, terms)) => {
            let trimmed = remainder.trim();
            if !trimmed.is_empty() {
                return Err(MotifParsingError {
                    errors: vec![(trimmed, "Unexpected tokens after motif")],
                });
            }
            Ok(terms)
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(e),
        Err(nom::Err::Incomplete(_)) => Err(MotifParsingError {
            errors: vec![(input, "Incomplete motif")],
        }),
    }
}

fn to_motif_err(err: nom::Err<nom::error::Error<&str>>) -> nom::Err<MotifParsingError<'_>> {
    err.map(MotifParsingError::from)
}
