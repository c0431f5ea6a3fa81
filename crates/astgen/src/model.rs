//! In-memory model of a parsed grammar.

use std::ops::Range;

use serde::Serialize;
use thisisplural::Plural;

use crate::field::FieldList;

/// All families of a grammar, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Plural)]
pub struct Grammar(pub Vec<FamilySpec>);

impl Grammar {
    /// Find a family by name. Returns the first declaration when the name is duplicated.
    pub fn family(&self, name: &str) -> Option<&FamilySpec> {
        self.0.iter().find(|family| family.name == name)
    }
}

/// One polymorphic family such as `Expr`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FamilySpec {
    pub name: String,
    /// Capabilities the marker type extends, in declaration order. Never empty.
    pub parent_capabilities: Vec<String>,
    /// Empty for pure marker families.
    pub variants: Vec<VariantSpec>,
    /// Byte range of the declaration in the grammar source.
    #[serde(skip)]
    pub span: Range<usize>,
}

impl FamilySpec {
    /// Name of the generated visitor interface, e.g. `ExprVisitor`.
    pub fn visitor_name(&self) -> String {
        format!("{}Visitor", self.name)
    }

    /// A family without variants only produces its marker type.
    pub fn is_marker_only(&self) -> bool {
        self.variants.is_empty()
    }
}

/// One constructor of a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSpec {
    pub name: String,
    pub field_list: FieldList,
    /// Name of the family this variant belongs to.
    pub owning_family: String,
    #[serde(skip)]
    pub span: Range<usize>,
}

impl VariantSpec {
    /// Name of the visitor method dispatched to by this variant, e.g. `visitLiteral`.
    pub fn visit_method(&self) -> String {
        format!("visit{}", self.name)
    }
}
