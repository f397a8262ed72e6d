//! SELECT list rendering.

use super::query::{Scope, build_query};
use super::{Path, column_ref};
use crate::error::{Error, TagError};
use crate::schema::{FieldSchema, Record};
use crate::tag::Category;
use crate::trace::trace_skip;

/// Render the selected columns of a record, comma-joined in declaration
/// order.
///
/// Columns depend only on the schema; the record is needed for the WHERE
/// clauses of child sub-queries, and may be `None`.
pub(super) fn build_select(
    path: &Path<'_>,
    record: Option<&dyn Record>,
    prefix: &str,
) -> Result<String, Error> {
    let mut columns = Vec::new();
    for field in path.schema().fields()? {
        let directive = field.directive();
        let column = match (directive.category(), directive.field_name()) {
            (Category::SelectColumn, Some(name)) => build_column(path, field, record, prefix, name)?,
            (Category::SelectChild, Some(relationship)) => {
                build_child(path, field, record, relationship)?
            },
            _ => None,
        };
        columns.extend(column);
    }
    Ok(columns.join(","))
}

/// A plain column, or a nested record flattened under `prefix.name`.
fn build_column(
    path: &Path<'_>,
    field: &FieldSchema,
    record: Option<&dyn Record>,
    prefix: &str,
    name: &str,
) -> Result<Option<String>, Error> {
    let column = column_ref(prefix, name);
    let Some(nested) = field.shape().record_schema() else {
        return Ok(Some(column));
    };
    let nested_record = record.and_then(|record| record.field(field.index()).record());
    let Some(nested_path) = path.enter(nested, nested_record) else {
        trace_skip!(path.schema().name(), field.name(), Category::SelectColumn);
        return Ok(None);
    };
    let flattened = build_select(&nested_path, nested_record, &column)?;
    Ok(Some(flattened).filter(|flattened| !flattened.is_empty()))
}

/// `(SELECT .. FROM <relationship> ..)` for a child relationship.
///
/// A sequence of child query structs shares one sub-query; its WHERE clause
/// comes from the first element, and an empty sequence has none.
fn build_child(
    path: &Path<'_>,
    field: &FieldSchema,
    record: Option<&dyn Record>,
    relationship: &str,
) -> Result<Option<String>, Error> {
    let Some(child) = field.shape().element_schema() else {
        return Err(Error::InvalidTag {
            record: path.schema().name(),
            field: field.name(),
            reason: TagError::NotARecord(Category::SelectChild),
        });
    };
    let child_record = record.and_then(|record| record.field(field.index()).first_record());
    let Some(child_path) = path.enter(child, child_record) else {
        trace_skip!(path.schema().name(), field.name(), Category::SelectChild);
        return Ok(None);
    };
    let query = build_query(&child_path, child_record, Scope::Child(relationship))?
        .ok_or(Error::NoSelectClause {
            record: child.name(),
        })?;
    Ok(Some(format!("({query})")))
}
