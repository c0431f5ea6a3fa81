//! Field lists of variants.
//!
//! The grammar keeps a variant's fields as opaque text which is spliced into
//! the record header as-is. [`FieldList::fields`] additionally understands
//! the common `Type name, Type name` shape, which the emitter uses for
//! [`FieldRendering::Normalized`](crate::FieldRendering::Normalized).

use std::fmt::{self, Display};

use serde::Serialize;
use thiserror::Error;

/// Raw field list text of a variant, e.g. `Token op, Expr right`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct FieldList(String);

/// A single `Type name` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub ty: String,
    pub name: String,
}

impl Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("empty field at position {index}")]
    EmptyField { index: usize },
    #[error("field `{text}` has no type")]
    MissingType { text: String },
    #[error("`{name}` is not a valid field name")]
    InvalidName { name: String },
    #[error("unbalanced `{bracket}` in field list")]
    Unbalanced { bracket: char },
}

impl FieldList {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the text into `Type name` pairs.
    ///
    /// Only top-level commas separate fields, so `Map<K, V> entries` is one
    /// field. Everything before the last word is the type, including
    /// annotations, array brackets and varargs dots.
    pub fn fields(&self) -> Result<Vec<Field>, FieldError> {
        if self.0.trim().is_empty() {
            return Ok(Vec::new());
        }
        split_top_level(&self.0)?
            .into_iter()
            .enumerate()
            .map(|(index, entry)| parse_field(index, entry.trim()))
            .collect()
    }
}

impl Display for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn split_top_level(text: &str) -> Result<Vec<&str>, FieldError> {
    let mut stack = Vec::new();
    let mut entries = Vec::new();
    let mut start = 0;
    for (index, c) in text.char_indices() {
        match c {
            '<' | '(' | '[' => stack.push(c),
            '>' | ')' | ']' => {
                let open = match c {
                    '>' => '<',
                    ')' => '(',
                    _ => '[',
                };
                if stack.pop() != Some(open) {
                    return Err(FieldError::Unbalanced { bracket: c });
                }
            }
            ',' if stack.is_empty() => {
                entries.push(&text[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    if let Some(open) = stack.pop() {
        return Err(FieldError::Unbalanced { bracket: open });
    }
    entries.push(&text[start..]);
    Ok(entries)
}

fn parse_field(index: usize, entry: &str) -> Result<Field, FieldError> {
    if entry.is_empty() {
        return Err(FieldError::EmptyField { index });
    }
    let Some(split) = entry.rfind(char::is_whitespace) else {
        return Err(FieldError::MissingType {
            text: entry.to_string(),
        });
    };
    let ty = entry[..split].trim_end();
    let name = entry[split..].trim_start();
    if !is_identifier(name) {
        return Err(FieldError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(Field {
        ty: ty.split_whitespace().collect::<Vec<_>>().join(" "),
        name: name.to_string(),
    })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(ty: &str, name: &str) -> Field {
        Field {
            ty: ty.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_simple_fields() {
        let fields = FieldList::new("Token op, Expr right").fields().unwrap();
        assert_eq!(fields, vec![field("Token", "op"), field("Expr", "right")]);
    }

    #[test]
    fn test_empty_list() {
        assert!(FieldList::new("").fields().unwrap().is_empty());
        assert!(FieldList::new("   ").fields().unwrap().is_empty());
    }

    #[test]
    fn test_generic_commas_stay_in_type() {
        let fields = FieldList::new("Map<String, List<Expr>> scopes, int depth")
            .fields()
            .unwrap();
        assert_eq!(
            fields,
            vec![field("Map<String, List<Expr>>", "scopes"), field("int", "depth")]
        );
    }

    #[test]
    fn test_annotations_arrays_and_varargs() {
        let fields = FieldList::new("@Nullable  Expr init, int[] sizes, Object... rest")
            .fields()
            .unwrap();
        assert_eq!(
            fields,
            vec![
                field("@Nullable Expr", "init"),
                field("int[]", "sizes"),
                field("Object...", "rest"),
            ]
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            FieldList::new("int a,, int b").fields(),
            Err(FieldError::EmptyField { index: 1 })
        );
        assert_eq!(
            FieldList::new("int a,").fields(),
            Err(FieldError::EmptyField { index: 1 })
        );
        assert_eq!(
            FieldList::new("value").fields(),
            Err(FieldError::MissingType {
                text: "value".to_string()
            })
        );
        assert_eq!(
            FieldList::new("List<Expr items").fields(),
            Err(FieldError::Unbalanced { bracket: '<' })
        );
        assert_eq!(
            FieldList::new("Expr> items").fields(),
            Err(FieldError::Unbalanced { bracket: '>' })
        );
        assert_eq!(
            FieldList::new("int 1st").fields(),
            Err(FieldError::InvalidName {
                name: "1st".to_string()
            })
        );
    }
}
