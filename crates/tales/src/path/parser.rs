//! A `nom`-based grammar for composite TALES paths.
use super::{Path, PathComponent, PathPart};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_until, take_while},
    character::complete::char,
    combinator::{eof, map, peek},
    multi::separated_list1,
    sequence::{delimited, terminated},
};

pub(super) fn parse_path(input: &str) -> Path {
    let components = match alternatives(input) {
        Ok(("", components)) => components,
        // The grammar accepts every input; keep the text whole if that ever changes.
        _ => vec![PathComponent {
            parts: vec![PathPart::plain(input.trim())],
        }],
    };
    Path {
        text: input.to_string(),
        components,
    }
}

fn alternatives(input: &str) -> IResult<&str, Vec<PathComponent>> {
    separated_list1(char('|'), component).parse(input)
}

fn component(input: &str) -> IResult<&str, PathComponent> {
    map(separated_list1(char('/'), part), |parts| PathComponent { parts }).parse(input)
}

fn part(input: &str) -> IResult<&str, PathPart> {
    alt((
        terminated(interpolated, peek(alt((eof, tag("/"), tag("|"))))),
        plain,
    ))
    .parse(input)
}

fn interpolated(input: &str) -> IResult<&str, PathPart> {
    map(
        delimited(tag("${"), take_until("}"), char('}')),
        |inner: &str| PathPart::interpolated(inner.trim()),
    )
    .parse(input)
}

fn plain(input: &str) -> IResult<&str, PathPart> {
    map(take_while(|c: char| c != '/' && c != '|'), |name: &str| {
        PathPart::plain(name.trim())
    })
    .parse(input)
}
