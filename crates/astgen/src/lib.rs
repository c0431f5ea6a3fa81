//! Generator for sealed AST hierarchies with double-dispatch visitors.
//!
//! The input is a compact grammar of node families:
//!
//! ```text
//! Expr < Node = Literal: Object value | Unary: Token op, Expr right;
//! Stmt < Node;
//! ```
//!
//! Each family becomes a sealed marker interface, a `<Family>Visitor<T>`
//! interface (when the family has variants) and one record per variant whose
//! `accept` calls back into the matching `visit<Variant>` method.
//!
//! # Pipeline
//!
//! - [`parse`] turns grammar text into a [`Grammar`] of [`FamilySpec`]s
//! - [`check`] resolves capability references according to [`CapabilityCheck`]
//! - [`Emitter`] renders the model into a [`GeneratedSource`]
//!
//! [`generate`] runs all three steps.

mod check;
mod config;
mod emit;
mod error;
mod field;
mod model;
mod parse;
pub mod report;

pub use check::{CapabilityIssue, check};
pub use config::*;
pub use emit::*;
pub use error::*;
pub use field::*;
pub use model::*;
pub use parse::parse;

/// Parse, check and emit in one go.
///
/// Nothing is emitted when the grammar is malformed or when the capability
/// check is set to [`CapabilityCheck::Deny`] and finds issues. Under
/// [`CapabilityCheck::Warn`] each issue is logged.
#[tracing::instrument(skip_all)]
pub fn generate(source: &str, config: &GenerationConfig) -> Result<GeneratedSource, Error> {
    let grammar = parse(source)?;
    for issue in check(&grammar, config)? {
        tracing::warn!("{issue}");
    }
    let output = Emitter::new(config.clone()).emit(&grammar);
    tracing::info!(
        families = grammar.len(),
        lines = output.len(),
        "generated source"
    );
    Ok(output)
}
