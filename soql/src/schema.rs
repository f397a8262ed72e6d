//! Static per-type field descriptions.
//!
//! `#[derive(Soql)]` describes each annotated field once (Rust name,
//! annotation string, static [`Shape`]) and caches the parsed [`Schema`] in a
//! `OnceLock`, so traversal walks a fixed, declaration-ordered field list
//! instead of rediscovering it on every call.

use std::rc::Rc;
use std::sync::Arc;

use crate::error::{Error, TagError};
use crate::tag::{Category, Directive, parse_tag};
use crate::value::{Shape, Value};

/// A struct whose annotated fields can be rendered.
///
/// Normally implemented with `#[derive(Soql)]`:
///
/// ```
/// use soql::{Soql, marshal_select_clause};
///
/// #[derive(Soql)]
/// struct Account {
///     #[soql("selectColumn,fieldName=Id")]
///     id: String,
///     #[soql("selectColumn,fieldName=Name")]
///     name: String,
/// }
///
/// let columns = marshal_select_clause(&Account { id: String::new(), name: String::new() }, "").unwrap();
/// assert_eq!(columns, "Id,Name");
/// ```
pub trait Record {
    /// The cached schema of this type.
    fn describe() -> &'static Schema
    where
        Self: Sized;

    /// The cached schema of this value's type.
    fn schema(&self) -> &'static Schema;

    /// Value of the annotated field at `index` (declaration order).
    fn field(&self, index: usize) -> Value<'_>;
}

/// Something that may point at a record: the value itself, a reference, a
/// smart pointer, or an `Option` standing in for a nil pointer.
pub trait AsRecord {
    /// The record, or `None` for a nil pointer.
    fn as_record(&self) -> Option<&dyn Record>;
}

impl AsRecord for dyn Record + '_ {
    fn as_record(&self) -> Option<&dyn Record> {
        Some(self)
    }
}

impl<T: AsRecord + ?Sized> AsRecord for &T {
    fn as_record(&self) -> Option<&dyn Record> {
        (**self).as_record()
    }
}

impl<T: AsRecord> AsRecord for Option<T> {
    fn as_record(&self) -> Option<&dyn Record> {
        self.as_ref().and_then(AsRecord::as_record)
    }
}

macro_rules! pointer_as_record {
    ($($ptr:ident),*) => {$(
        impl<T: AsRecord + ?Sized> AsRecord for $ptr<T> {
            fn as_record(&self) -> Option<&dyn Record> {
                (**self).as_record()
            }
        }
    )*};
}

pointer_as_record!(Box, Rc, Arc);

/// Compile-time description of one annotated field.
#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    name: &'static str,
    tag: &'static str,
    shape: fn() -> Shape,
}

impl FieldDef {
    /// Describe a field by Rust name, annotation string and shape function.
    #[must_use]
    pub const fn new(name: &'static str, tag: &'static str, shape: fn() -> Shape) -> Self {
        Self { name, tag, shape }
    }
}

/// An annotated field after its annotation has been parsed and checked
/// against its shape.
#[derive(Debug)]
pub struct FieldSchema {
    index: usize,
    name: &'static str,
    directive: Directive<'static>,
    shape: Shape,
}

impl FieldSchema {
    fn build(record: &'static str, index: usize, def: &FieldDef) -> Result<Self, Error> {
        let invalid = |reason| Error::InvalidTag {
            record,
            field: def.name,
            reason,
        };

        let directive = parse_tag(def.tag).map_err(invalid)?;
        let shape = (def.shape)();
        let category = directive.category();

        let record_shaped = if category == Category::SelectChild {
            shape.holds_records()
        } else {
            shape.is_record()
        };
        if category.needs_record() && !record_shaped {
            return Err(invalid(TagError::NotARecord(category)));
        }
        if category.is_scalar_only() && shape.is_sequence() {
            return Err(invalid(TagError::ScalarOnly(category)));
        }

        Ok(Self {
            index,
            name: def.name,
            directive,
            shape,
        })
    }

    /// Position passed to [`Record::field`].
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Rust name of the field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The parsed annotation.
    #[must_use]
    pub const fn directive(&self) -> &Directive<'static> {
        &self.directive
    }

    /// Static shape of the field type.
    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Parsed description of a record type.
///
/// Holds either every annotated field in declaration order, or the first
/// annotation error, which every traversal of the type reports.
#[derive(Debug)]
pub struct Schema {
    name: &'static str,
    fields: Result<Vec<FieldSchema>, Error>,
}

impl Schema {
    /// Parse and validate field descriptions.
    ///
    /// Annotation errors are kept, not raised, so they surface from whichever
    /// call first walks the type.
    #[must_use]
    pub fn build(name: &'static str, defs: &[FieldDef]) -> Self {
        let fields = defs
            .iter()
            .enumerate()
            .map(|(index, def)| FieldSchema::build(name, index, def))
            .collect::<Result<Vec<_>, _>>();
        Self { name, fields }
    }

    /// Rust name of the record type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Annotated fields in declaration order.
    pub fn fields(&self) -> Result<&[FieldSchema], Error> {
        self.fields.as_deref().map_err(Clone::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::value::ToValue;

    #[test]
    fn test_build_keeps_declaration_order() {
        let schema = Schema::build(
            "Criteria",
            &[
                FieldDef::new("b", "likeClause,fieldName=B", Vec::<String>::shape),
                FieldDef::new("a", "equalsClause,fieldName=A", String::shape),
            ],
        );
        let fields = schema.fields().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name(), "b");
        assert_eq!(fields[0].index(), 0);
        assert_eq!(fields[1].directive().category(), Category::Equals);
    }

    #[test]
    fn test_first_invalid_tag_is_kept() {
        let schema = Schema::build(
            "Criteria",
            &[
                FieldDef::new("ok", "likeClause,fieldName=A", String::shape),
                FieldDef::new("bad", "invalidClause,fieldName=B", String::shape),
                FieldDef::new("worse", "equalsClause", String::shape),
            ],
        );
        let err = schema.fields().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidTag {
                record: "Criteria",
                field: "bad",
                reason: TagError::UnknownCategory("invalidClause".into()),
            }
        );
    }

    #[test]
    fn test_record_categories_need_record_shape() {
        let schema = Schema::build(
            "Parent",
            &[FieldDef::new(
                "child",
                "selectChild,fieldName=Children__r",
                String::shape,
            )],
        );
        let err = schema.fields().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTag);
        assert!(matches!(
            err,
            Error::InvalidTag {
                reason: TagError::NotARecord(Category::SelectChild),
                ..
            }
        ));
    }

    fn child_schema() -> &'static Schema {
        static SCHEMA: std::sync::OnceLock<Schema> = std::sync::OnceLock::new();
        SCHEMA.get_or_init(|| Schema::build("Child", &[]))
    }

    fn children_shape() -> Shape {
        Shape::Sequence(Box::new(Shape::Record(child_schema)))
    }

    #[test]
    fn test_select_child_accepts_sequence_of_records() {
        let schema = Schema::build(
            "Parent",
            &[FieldDef::new(
                "children",
                "selectChild,fieldName=Children__r",
                children_shape,
            )],
        );
        assert!(schema.fields().is_ok());

        // Only selectChild looks through the sequence
        let schema = Schema::build(
            "Parent",
            &[FieldDef::new("filter", "whereClause", children_shape)],
        );
        assert!(matches!(
            schema.fields(),
            Err(Error::InvalidTag {
                reason: TagError::NotARecord(Category::WhereClause),
                ..
            })
        ));
    }

    #[test]
    fn test_scalar_only_rejects_sequences() {
        let schema = Schema::build(
            "Criteria",
            &[FieldDef::new(
                "status",
                "equalsClause,fieldName=Status__c",
                Vec::<String>::shape,
            )],
        );
        assert!(matches!(
            schema.fields(),
            Err(Error::InvalidTag {
                reason: TagError::ScalarOnly(Category::Equals),
                ..
            })
        ));
    }
}
