//! Grammar parser.
//!
//! The grammar is a nest of delimiters, outermost first:
//!
//! ```text
//! grammar        := declaration (';' declaration)*
//! declaration    := header ('=' variantList)?
//! header         := familyName '<' capabilityList
//! capabilityList := capabilityName (',' capabilityName)*
//! variantList    := variant ('|' variant)*
//! variant        := variantName ':' fieldListText
//! ```
//!
//! Each level is split in turn and every piece is trimmed. Blank declarations
//! (a trailing `;`, or whitespace after it) are skipped. The first malformed
//! declaration aborts the whole parse.

use std::ops::Range;

use tracing::debug;

use crate::error::{MalformedGrammar, MalformedKind};
use crate::field::FieldList;
use crate::model::{FamilySpec, Grammar, VariantSpec};

/// Parse grammar text into its families, in declaration order.
pub fn parse(source: &str) -> Result<Grammar, MalformedGrammar> {
    let mut families = Vec::new();
    for segment in Spanned::new(source).split(';') {
        let declaration = segment.trim();
        if declaration.is_empty() {
            continue;
        }
        let family = parse_declaration(declaration)?;
        debug!(
            family = %family.name,
            capabilities = ?family.parent_capabilities,
            variants = family.variants.len(),
            "parsed declaration"
        );
        families.push(family);
    }
    Ok(Grammar(families))
}

fn parse_declaration(declaration: Spanned<'_>) -> Result<FamilySpec, MalformedGrammar> {
    let (header, body) = match declaration.split_once('=') {
        Some((header, body)) => (header, Some(body)),
        None => (declaration, None),
    };

    let Some((name, capabilities)) = header.split_once('<') else {
        return Err(MalformedGrammar::new(
            MalformedKind::MissingCapabilityList,
            declaration.text,
            header.trim().span(),
        ));
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(MalformedGrammar::new(
            MalformedKind::EmptyFamilyName,
            declaration.text,
            name.span(),
        ));
    }

    let parent_capabilities = capabilities
        .split(',')
        .map(|capability| {
            let capability = capability.trim();
            if capability.is_empty() {
                Err(MalformedGrammar::new(
                    MalformedKind::EmptyCapability,
                    declaration.text,
                    capability.span(),
                ))
            } else {
                Ok(capability.text.to_string())
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    let variants = match body {
        Some(body) => body
            .split('|')
            .map(|variant| parse_variant(variant.trim(), name.text))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(FamilySpec {
        name: name.text.to_string(),
        parent_capabilities,
        variants,
        span: declaration.span(),
    })
}

fn parse_variant(variant: Spanned<'_>, family: &str) -> Result<VariantSpec, MalformedGrammar> {
    let Some((name, fields)) = variant.split_once(':') else {
        return Err(MalformedGrammar::new(
            MalformedKind::MissingFieldSeparator,
            variant.text,
            variant.span(),
        ));
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(MalformedGrammar::new(
            MalformedKind::EmptyVariantName,
            variant.text,
            name.span(),
        ));
    }

    Ok(VariantSpec {
        name: name.text.to_string(),
        field_list: FieldList::new(fields.trim().text),
        owning_family: family.to_string(),
        span: variant.span(),
    })
}

/// A slice of the grammar source that remembers where it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Spanned<'a> {
    text: &'a str,
    start: usize,
}

impl<'a> Spanned<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, start: 0 }
    }

    fn span(&self) -> Range<usize> {
        self.start..self.start + self.text.len()
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn trim(self) -> Self {
        let leading = self.text.len() - self.text.trim_start().len();
        Self {
            text: self.text.trim(),
            start: self.start + leading,
        }
    }

    fn split(self, delimiter: char) -> impl Iterator<Item = Spanned<'a>> {
        let start = self.start;
        let base = self.text.as_ptr() as usize;
        self.text.split(delimiter).map(move |piece| Spanned {
            text: piece,
            start: start + (piece.as_ptr() as usize - base),
        })
    }

    fn split_once(self, delimiter: char) -> Option<(Spanned<'a>, Spanned<'a>)> {
        let index = self.text.find(delimiter)?;
        let after = index + delimiter.len_utf8();
        Some((
            Spanned {
                text: &self.text[..index],
                start: self.start,
            },
            Spanned {
                text: &self.text[after..],
                start: self.start + after,
            },
        ))
    }
}
