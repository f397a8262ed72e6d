//! Query struct scanning and full query assembly.
//!
//! A query struct holds one `selectClause` field (the select-root, naming
//! the table), at most one `whereClause` field (the where-root), and
//! optionally one each of `orderByClause`, `limitClause` and `offsetClause`.
//! The same scan serves the top level and every child sub-query.

use super::filter::build_where;
use super::{Path, column_ref};
use super::select::build_select;
use crate::error::Error;
use crate::order::Order;
use crate::schema::{FieldSchema, Record, Schema};
use crate::tag::Category;
use crate::value::{Literal, Value};

/// Where a query is rendered.
#[derive(Debug, Clone, Copy)]
pub(super) enum Scope<'a> {
    /// Top level: `FROM <tableName>`, unprefixed columns.
    Root,
    /// Child sub-query: `FROM <relationship>`, columns prefixed with the
    /// child's `tableName`.
    Child(&'a str),
}

/// The query-level fields of a query struct.
#[derive(Default)]
struct QueryFields<'s> {
    select: Option<&'s FieldSchema>,
    filter: Option<&'s FieldSchema>,
    order: Option<&'s FieldSchema>,
    limit: Option<&'s FieldSchema>,
    offset: Option<&'s FieldSchema>,
}

impl<'s> QueryFields<'s> {
    /// Claim each query-level field, rejecting duplicates.
    fn scan(schema: &'s Schema) -> Result<Self, Error> {
        let record = schema.name();
        let mut query = Self::default();
        for field in schema.fields()? {
            let (slot, duplicate) = match field.directive().category() {
                Category::SelectClause => (
                    &mut query.select,
                    Error::MultipleSelectClause { record },
                ),
                Category::WhereClause => (
                    &mut query.filter,
                    Error::MultipleWhereClause { record },
                ),
                Category::OrderBy => (
                    &mut query.order,
                    Error::MultipleOrderByClause { record },
                ),
                Category::Limit => (&mut query.limit, Error::MultipleLimitClause { record }),
                Category::Offset => (&mut query.offset, Error::MultipleOffsetClause { record }),
                _ => continue,
            };
            if slot.replace(field).is_some() {
                return Err(duplicate);
            }
        }
        Ok(query)
    }

    fn is_empty(&self) -> bool {
        self.select.is_none()
            && self.filter.is_none()
            && self.order.is_none()
            && self.limit.is_none()
            && self.offset.is_none()
    }
}

/// Render `SELECT .. FROM ..[ WHERE ..][ ORDER BY ..][ LIMIT ..][ OFFSET ..]`.
///
/// Returns `Ok(None)` for a struct with no query-level fields at all. A
/// select-root cut off as a nil recursion renders no columns, so it is
/// [`Error::NoSelectClause`].
pub(super) fn build_query(
    path: &Path<'_>,
    record: Option<&dyn Record>,
    scope: Scope<'_>,
) -> Result<Option<String>, Error> {
    let schema = path.schema();
    let fields = QueryFields::scan(schema)?;
    let no_select = || Error::NoSelectClause {
        record: schema.name(),
    };
    let Some(select) = fields.select else {
        return if fields.is_empty() {
            Ok(None)
        } else {
            Err(no_select())
        };
    };

    // Validated as records when the schema was built.
    let table = select.directive().table_name().ok_or_else(no_select)?;
    let select_schema = select.shape().record_schema().ok_or_else(no_select)?;
    let (from, prefix) = match scope {
        Scope::Root => (table, ""),
        Scope::Child(relationship) => (relationship, table),
    };

    let select_record = nested(record, select);
    let select_path = path.enter(select_schema, select_record).ok_or_else(no_select)?;
    let columns = build_select(&select_path, select_record, prefix)?;
    if columns.is_empty() {
        return Err(no_select());
    }
    let mut query = format!("SELECT {columns} FROM {from}");

    if let Some(filter) = fields.filter {
        let filter_schema = filter.shape().record_schema().ok_or_else(no_select)?;
        let predicates = build_where(filter_schema, nested(record, filter), prefix)?;
        if !predicates.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&predicates);
        }
    }

    if let Some(order) = fields.order {
        let orders = value(record, order).map(Value::orders).unwrap_or_default();
        let terms = build_order(select_schema, &orders, prefix)?;
        if !terms.is_empty() {
            query.push_str(" ORDER BY ");
            query.push_str(&terms);
        }
    }

    for (keyword, field) in [("LIMIT", fields.limit), ("OFFSET", fields.offset)] {
        if let Some(n) = field.and_then(|field| count(record, field)) {
            query.push_str(&format!(" {keyword} {n}"));
        }
    }

    Ok(Some(query))
}

/// `col ASC|DESC` terms, each resolved against a plain column of the
/// select-root.
fn build_order(select: &'static Schema, orders: &[&Order], prefix: &str) -> Result<String, Error> {
    let columns = select.fields()?;
    let terms = orders
        .iter()
        .map(|order| {
            let column = columns
                .iter()
                .find(|field| {
                    field.name() == order.field
                        && field.directive().category() == Category::SelectColumn
                        && !field.shape().is_record()
                })
                .and_then(|field| field.directive().field_name())
                .ok_or_else(|| Error::InvalidOrderBy {
                    record: select.name(),
                    field: order.field.clone(),
                })?;
            Ok(format!("{} {}", column_ref(prefix, column), order.direction()))
        })
        .collect::<Result<Vec<_>, Error>>()?;
    Ok(terms.join(","))
}

fn value<'a>(record: Option<&'a dyn Record>, field: &FieldSchema) -> Option<Value<'a>> {
    record.map(|record| record.field(field.index()))
}

fn nested<'a>(record: Option<&'a dyn Record>, field: &FieldSchema) -> Option<&'a dyn Record> {
    value(record, field).and_then(Value::record)
}

/// A positive integer for LIMIT/OFFSET.
fn count(record: Option<&dyn Record>, field: &FieldSchema) -> Option<i64> {
    match value(record, field)?.literal()? {
        Literal::Int(n) if n > 0 => Some(n),
        _ => None,
    }
}
