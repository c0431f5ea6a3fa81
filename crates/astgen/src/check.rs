//! Name resolution over a parsed grammar.
//!
//! Every parent capability must name a declared family, the container type or
//! one of the configured extern capabilities. Family names must be unique, and
//! so must variant names, since all records share the container's namespace
//! with the families.

use std::ops::Range;

use indexmap::IndexMap;
use tracing::debug;

use crate::config::{CapabilityCheck, GenerationConfig};
use crate::error::Error;
use crate::model::Grammar;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CapabilityIssue {
    #[error("family `{family}` extends undeclared capability `{capability}`")]
    UnresolvedCapability {
        family: String,
        capability: String,
        span: Range<usize>,
    },
    #[error("family `{name}` is declared more than once")]
    DuplicateFamily {
        name: String,
        span: Range<usize>,
        first: Range<usize>,
    },
    #[error("variant `{name}` of family `{family}` is already declared in family `{first_family}`")]
    DuplicateVariant {
        name: String,
        family: String,
        first_family: String,
        span: Range<usize>,
        first: Range<usize>,
    },
    #[error("variant `{name}` of family `{family}` has the same name as a family")]
    VariantNamedAsFamily {
        name: String,
        family: String,
        span: Range<usize>,
        first: Range<usize>,
    },
}

impl CapabilityIssue {
    pub fn span(&self) -> Range<usize> {
        match self {
            CapabilityIssue::UnresolvedCapability { span, .. }
            | CapabilityIssue::DuplicateFamily { span, .. }
            | CapabilityIssue::DuplicateVariant { span, .. }
            | CapabilityIssue::VariantNamedAsFamily { span, .. } => span.clone(),
        }
    }

    /// Where the clashing name was first declared.
    pub fn first_span(&self) -> Option<Range<usize>> {
        match self {
            CapabilityIssue::UnresolvedCapability { .. } => None,
            CapabilityIssue::DuplicateFamily { first, .. }
            | CapabilityIssue::DuplicateVariant { first, .. }
            | CapabilityIssue::VariantNamedAsFamily { first, .. } => Some(first.clone()),
        }
    }
}

/// Run the checks selected by `config.capability_check`.
///
/// Under [`CapabilityCheck::Warn`] the issues are returned for the caller to
/// report; under [`CapabilityCheck::Deny`] any issue becomes
/// [`Error::Capabilities`].
pub fn check(grammar: &Grammar, config: &GenerationConfig) -> Result<Vec<CapabilityIssue>, Error> {
    if config.capability_check == CapabilityCheck::Off {
        return Ok(Vec::new());
    }
    let issues = find_issues(grammar, config);
    debug!(issues = issues.len(), "checked names");
    match config.capability_check {
        CapabilityCheck::Deny if !issues.is_empty() => Err(Error::Capabilities(issues)),
        _ => Ok(issues),
    }
}

fn find_issues(grammar: &Grammar, config: &GenerationConfig) -> Vec<CapabilityIssue> {
    let mut issues = Vec::new();

    let mut families: IndexMap<&str, Range<usize>> = IndexMap::new();
    let mut variants: IndexMap<&str, (&str, Range<usize>)> = IndexMap::new();
    for family in grammar.iter() {
        if let Some(first) = families.get(family.name.as_str()) {
            issues.push(CapabilityIssue::DuplicateFamily {
                name: family.name.clone(),
                span: family.span.clone(),
                first: first.clone(),
            });
        } else {
            families.insert(family.name.as_str(), family.span.clone());
        }

        for variant in &family.variants {
            if let Some((first_family, first)) = variants.get(variant.name.as_str()) {
                issues.push(CapabilityIssue::DuplicateVariant {
                    name: variant.name.clone(),
                    family: family.name.clone(),
                    first_family: first_family.to_string(),
                    span: variant.span.clone(),
                    first: first.clone(),
                });
            } else {
                variants.insert(
                    variant.name.as_str(),
                    (family.name.as_str(), variant.span.clone()),
                );
            }
        }
    }

    for family in grammar.iter() {
        for variant in &family.variants {
            if let Some(first) = families.get(variant.name.as_str()) {
                issues.push(CapabilityIssue::VariantNamedAsFamily {
                    name: variant.name.clone(),
                    family: family.name.clone(),
                    span: variant.span.clone(),
                    first: first.clone(),
                });
            }
        }
    }

    let resolves = |name: &str| {
        families.contains_key(name)
            || name == config.container
            || config.extern_capabilities.iter().any(|extern_| extern_ == name)
    };
    for family in grammar.iter() {
        for capability in &family.parent_capabilities {
            if !resolves(capability.as_str()) {
                issues.push(CapabilityIssue::UnresolvedCapability {
                    family: family.name.clone(),
                    capability: capability.clone(),
                    span: family.span.clone(),
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn config(policy: CapabilityCheck) -> GenerationConfig {
        GenerationConfig::builder().capability_check(policy).build()
    }

    #[test]
    fn test_resolved_grammar_is_clean() {
        let grammar = parse("Node<Ast;Expr<Node=Lit:int v;Stmt<Node;Print<Stmt=Show:Expr e").unwrap();
        assert_eq!(check(&grammar, &config(CapabilityCheck::Deny)), Ok(vec![]));
    }

    #[test]
    fn test_unresolved_capability() {
        let grammar = parse("Expr<Node=Lit:int v").unwrap();
        let issues = check(&grammar, &config(CapabilityCheck::Warn)).unwrap();
        assert_eq!(
            issues,
            vec![CapabilityIssue::UnresolvedCapability {
                family: "Expr".to_string(),
                capability: "Node".to_string(),
                span: 0..19,
            }]
        );
    }

    #[test]
    fn test_extern_capabilities_resolve() {
        let grammar = parse("Expr<Node, Serializable=Lit:int v").unwrap();
        let config = GenerationConfig::builder()
            .capability_check(CapabilityCheck::Deny)
            .extern_capabilities(vec!["Node".to_string(), "Serializable".to_string()])
            .build();
        assert_eq!(check(&grammar, &config), Ok(vec![]));
    }

    #[test]
    fn test_container_resolves() {
        let grammar = parse("Expr<MyLangAST=Lit:int v").unwrap();
        let config = GenerationConfig::builder()
            .container("MyLangAST")
            .capability_check(CapabilityCheck::Deny)
            .build();
        assert_eq!(check(&grammar, &config), Ok(vec![]));
    }

    #[test]
    fn test_duplicates() {
        let source = "Expr<Ast=Lit:int v;Expr<Ast;Stmt<Ast=Lit:String s";
        let grammar = parse(source).unwrap();
        let issues = check(&grammar, &config(CapabilityCheck::Warn)).unwrap();
        assert_eq!(issues.len(), 2);

        let duplicate_family = issues
            .iter()
            .find(|issue| matches!(issue, CapabilityIssue::DuplicateFamily { .. }))
            .unwrap();
        assert_eq!(&source[duplicate_family.span()], "Expr<Ast");
        assert_eq!(&source[duplicate_family.first_span().unwrap()], "Expr<Ast=Lit:int v");

        let duplicate_variant = issues
            .iter()
            .find(|issue| matches!(issue, CapabilityIssue::DuplicateVariant { .. }))
            .unwrap();
        assert_eq!(
            duplicate_variant.to_string(),
            "variant `Lit` of family `Stmt` is already declared in family `Expr`"
        );
    }

    #[test]
    fn test_variant_named_as_family() {
        let source = "Type<Ast=Type:int x;Expr<Ast=Lit:int v|Stmt:Expr e;Stmt<Ast";
        let grammar = parse(source).unwrap();
        let issues = check(&grammar, &config(CapabilityCheck::Warn)).unwrap();
        assert_eq!(
            issues,
            vec![
                CapabilityIssue::VariantNamedAsFamily {
                    name: "Type".to_string(),
                    family: "Type".to_string(),
                    span: 9..19,
                    first: 0..19,
                },
                CapabilityIssue::VariantNamedAsFamily {
                    name: "Stmt".to_string(),
                    family: "Expr".to_string(),
                    span: 39..50,
                    first: 51..59,
                },
            ]
        );
        assert_eq!(&source[issues[1].span()], "Stmt:Expr e");
        assert_eq!(&source[issues[1].first_span().unwrap()], "Stmt<Ast");

        assert!(matches!(
            check(&grammar, &config(CapabilityCheck::Deny)),
            Err(Error::Capabilities(issues)) if issues.len() == 2
        ));
    }

    #[test]
    fn test_deny_fails() {
        let grammar = parse("Expr<Node=Lit:int v;Stmt<Missing").unwrap();
        let Err(Error::Capabilities(issues)) = check(&grammar, &config(CapabilityCheck::Deny))
        else {
            panic!("expected capability error");
        };
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_off_skips() {
        let grammar = parse("Expr<Node;Expr<Node").unwrap();
        assert_eq!(check(&grammar, &config(CapabilityCheck::Off)), Ok(vec![]));
    }
}
