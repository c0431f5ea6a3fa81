//! Source-annotated diagnostics for grammar errors and capability issues.
//!
//! Reports are rendered with `annotate-snippets`:
//!
//! ```text
//! error: declaration header is missing `<` before its capability list
//!  --> ast.grammar:1:1
//!   |
//! 1 | Broken;
//!   | ^^^^^^ in `Broken`
//! ```

use std::borrow::Cow;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use crate::check::CapabilityIssue;
use crate::error::{Error, MalformedGrammar};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// A single diagnostic pointing into the grammar source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub severity: Severity,
    pub title: Cow<'static, str>,
    pub span: Range<usize>,
    pub label: Option<String>,
    /// Secondary location, e.g. the first declaration of a duplicate.
    pub related: Option<(Range<usize>, String)>,
}

impl Report {
    pub fn error(title: impl Into<Cow<'static, str>>, span: Range<usize>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            span,
            label: None,
            related: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_related(mut self, span: Range<usize>, label: impl Into<String>) -> Self {
        self.related = Some((span, label.into()));
        self
    }

    pub fn as_warning(mut self) -> Self {
        self.severity = Severity::Warning;
        self
    }
}

impl From<&MalformedGrammar> for Report {
    fn from(error: &MalformedGrammar) -> Self {
        Report::error(error.kind.to_string(), error.span.clone())
            .with_label(format!("in `{}`", error.text))
    }
}

impl From<&CapabilityIssue> for Report {
    fn from(issue: &CapabilityIssue) -> Self {
        let report = Report::error(issue.to_string(), issue.span());
        let label = match issue {
            CapabilityIssue::VariantNamedAsFamily { .. } => "family declared here",
            _ => "first declared here",
        };
        match issue.first_span() {
            Some(first) => report.with_related(first, label),
            None => report,
        }
    }
}

/// Every report carried by `error`.
pub fn reports(error: &Error) -> Vec<Report> {
    match error {
        Error::Malformed(error) => vec![error.into()],
        Error::Capabilities(issues) => issues.iter().map(Report::from).collect(),
    }
}

/// Reports for issues found under [`CapabilityCheck::Warn`](crate::CapabilityCheck::Warn),
/// which don't stop generation.
pub fn warnings(issues: &[CapabilityIssue]) -> Vec<Report> {
    issues
        .iter()
        .map(|issue| Report::from(issue).as_warning())
        .collect()
}

/// Render `report` against the grammar `source` read from `path`.
pub fn format_report(source: &str, path: &str, report: &Report, styled: bool) -> String {
    let level = match report.severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    };

    let span = clamp(&report.span, source);
    let mut primary = AnnotationKind::Primary.span(span);
    if let Some(label) = &report.label {
        primary = primary.label(label.as_str());
    }
    let mut snippet = Snippet::source(source)
        .line_start(1)
        .path(path)
        .annotation(primary);
    if let Some((span, label)) = &report.related {
        snippet = snippet.annotation(
            AnnotationKind::Context
                .span(clamp(span, source))
                .label(label.as_str()),
        );
    }

    let groups: Vec<Group<'_>> = vec![level.primary_title(report.title.as_ref()).element(snippet)];

    let renderer = if styled {
        Renderer::styled()
    } else {
        Renderer::plain()
    };
    renderer.render(&groups).to_string()
}

/// Render several reports separated by blank lines.
pub fn format_reports(source: &str, path: &str, reports: &[Report], styled: bool) -> String {
    reports
        .iter()
        .map(|report| format_report(source, path, report, styled))
        .collect::<Vec<_>>()
        .join("\n")
}

fn clamp(span: &Range<usize>, source: &str) -> Range<usize> {
    let start = span.start.min(source.len());
    let end = span.end.min(source.len()).max(start);
    start..end
}
