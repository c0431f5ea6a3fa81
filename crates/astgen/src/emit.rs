//! Java source emitter.
//!
//! For every family, in declaration order:
//!
//! 1. `<Family>Visitor<T>` with one `visit<Variant>` method per variant,
//!    skipped for marker-only families
//! 2. the sealed marker interface, with `accept` when the family has variants
//! 3. one record per variant implementing `accept` by calling its visit method
//!
//! All of it is nested in a single container interface.

use std::fmt::{self, Display};

use thisisplural::Plural;
use tracing::{debug, warn};

use crate::config::{FieldRendering, GenerationConfig};
use crate::model::{FamilySpec, Grammar, VariantSpec};

/// Generated source, one entry per line without line terminators.
#[derive(Debug, Clone, PartialEq, Eq, Default, Plural)]
pub struct GeneratedSource(pub Vec<String>);

impl Display for GeneratedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.0 {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

pub struct Emitter {
    config: GenerationConfig,
}

impl Emitter {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// Emit the whole file for `grammar`.
    pub fn emit(&self, grammar: &Grammar) -> GeneratedSource {
        let mut out = LineWriter::new(self.config.indent_width);

        out.line(format!("package {};", self.config.package));
        out.blank();
        if !self.config.imports.is_empty() {
            for import in &self.config.imports {
                out.line(format!("import {import};"));
            }
            out.blank();
        }

        out.open(format!("public interface {} {{", self.config.container));
        for (index, family) in grammar.iter().enumerate() {
            if index > 0 {
                out.blank();
            }
            self.emit_family(&mut out, family);
        }
        out.close("}");

        GeneratedSource(out.finish())
    }

    fn emit_family(&self, out: &mut LineWriter, family: &FamilySpec) {
        debug!(
            family = %family.name,
            variants = family.variants.len(),
            "emitting family"
        );

        if !family.is_marker_only() {
            self.emit_visitor(out, family);
            out.blank();
        }

        self.emit_marker(out, family);

        for variant in &family.variants {
            out.blank();
            self.emit_variant(out, family, variant);
        }
    }

    fn emit_visitor(&self, out: &mut LineWriter, family: &FamilySpec) {
        out.open(format!(
            "public static interface {}<T> {{",
            family.visitor_name()
        ));
        for variant in &family.variants {
            out.line(format!(
                "public T {}({} value);",
                variant.visit_method(),
                variant.name
            ));
        }
        out.close("}");
    }

    fn emit_marker(&self, out: &mut LineWriter, family: &FamilySpec) {
        out.open(format!(
            "public static sealed interface {} extends {} {{",
            family.name,
            family.parent_capabilities.join(", ")
        ));
        if !family.is_marker_only() {
            out.line(format!(
                "public <T> T accept({}<T> visitor);",
                family.visitor_name()
            ));
        }
        out.close("}");
    }

    fn emit_variant(&self, out: &mut LineWriter, family: &FamilySpec, variant: &VariantSpec) {
        out.open(format!(
            "public static record {}({}) implements {} {{",
            variant.name,
            self.render_fields(variant),
            family.name
        ));
        out.line("@Override");
        out.open(format!(
            "public <T> T accept({}<T> visitor) {{",
            family.visitor_name()
        ));
        out.line(format!("return visitor.{}(this);", variant.visit_method()));
        out.close("}");
        out.close("}");
    }

    fn render_fields(&self, variant: &VariantSpec) -> String {
        match self.config.fields {
            FieldRendering::Verbatim => variant.field_list.to_string(),
            FieldRendering::Normalized => match variant.field_list.fields() {
                Ok(fields) => fields
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", "),
                Err(error) => {
                    warn!(
                        variant = %variant.name,
                        family = %variant.owning_family,
                        %error,
                        "keeping field list verbatim"
                    );
                    variant.field_list.to_string()
                }
            },
        }
    }
}

/// Collects indented lines.
struct LineWriter {
    lines: Vec<String>,
    indent: usize,
    indent_width: usize,
}

impl LineWriter {
    fn new(indent_width: usize) -> Self {
        Self {
            lines: Vec::new(),
            indent: 0,
            indent_width,
        }
    }

    fn line(&mut self, text: impl AsRef<str>) {
        let padding = " ".repeat(self.indent * self.indent_width);
        self.lines.push(format!("{padding}{}", text.as_ref()));
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Write `text` and indent the following lines.
    fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.indent += 1;
    }

    /// Dedent and write `text`.
    fn close(&mut self, text: impl AsRef<str>) {
        self.indent = self.indent.saturating_sub(1);
        self.line(text);
    }

    fn finish(self) -> Vec<String> {
        self.lines
    }
}
