use log::trace;
use winnow::prelude::*;
use winnow::combinator::{alt, eof, preceded, separated, terminated};
use winnow::token::{rest, take_till};

use crate::er_ast::{Attribute, KeyKind};

#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Key(KeyKind),
    Note(String),
    Ignored(String),
}

pub fn parse_tag(input: &str) -> Vec<Directive> {
    let mut input = input;
    // Every directive parser ends in a catch-all, so this only fails on
    // parser bugs; an unparseable tag carries no directives.
    directives(&mut input).unwrap_or_default()
}

/// Applies each directive of `tag` to `attr`, later directives winning.
pub fn apply_tag(attr: &mut Attribute, tag: &str) {
    for directive in parse_tag(tag) {
        match directive {
            Directive::Key(key) => attr.key = Some(key),
            Directive::Note(note) => attr.note = Some(note),
            Directive::Ignored(raw) => {
                trace!("ignoring tag directive `{raw}` on {}", attr.name);
            }
        }
    }
}

fn directives(input: &mut &str) -> winnow::Result<Vec<Directive>> {
    separated(1.., directive, ',').parse_next(input)
}

fn directive(input: &mut &str) -> winnow::Result<Directive> {
    let raw: &str = take_till(0.., ',').parse_next(input)?;
    let mut part = raw.trim();
    alt((
        key_directive.map(Directive::Key),
        preceded("note:", rest).map(|note: &str| Directive::Note(note.to_string())),
        rest.map(|other: &str| Directive::Ignored(other.to_string())),
    ))
    .parse_next(&mut part)
}

fn key_directive(input: &mut &str) -> winnow::Result<KeyKind> {
    terminated(
        alt((
            "pk".value(KeyKind::PrimaryKey),
            "fk".value(KeyKind::ForeignKey),
            "uk".value(KeyKind::UniqueKey),
        )),
        eof,
    )
    .parse_next(input)
}
