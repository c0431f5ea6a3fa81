use std::ops::Range;

use thiserror::Error;

use crate::check::CapabilityIssue;

/// A declaration or variant that does not follow the delimiter structure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed grammar: {kind} in `{text}`")]
pub struct MalformedGrammar {
    pub kind: MalformedKind,
    /// The offending declaration (header problems) or variant (variant problems).
    pub text: String,
    /// Byte range of the problem in the grammar source.
    pub span: Range<usize>,
}

impl MalformedGrammar {
    pub(crate) fn new(kind: MalformedKind, text: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedKind {
    #[error("declaration header is missing `<` before its capability list")]
    MissingCapabilityList,
    #[error("declaration has an empty family name")]
    EmptyFamilyName,
    #[error("capability list has an empty entry")]
    EmptyCapability,
    #[error("variant is missing `:` between its name and field list")]
    MissingFieldSeparator,
    #[error("variant has an empty name")]
    EmptyVariantName,
}

/// Error returned by [`generate`](crate::generate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Malformed(#[from] MalformedGrammar),
    #[error("{} capability issue(s) found", .0.len())]
    Capabilities(Vec<CapabilityIssue>),
}
