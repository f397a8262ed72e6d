//! Traversal and rendering of annotated records.

mod filter;
mod query;
mod select;

use std::iter;

use crate::error::Error;
use crate::schema::{AsRecord, FieldSchema, Record, Schema};
use crate::trace::trace_result;
use crate::value::Value;

use filter::build_where;
use query::{Scope, build_query};
use select::build_select;

/// `prefix.name`, or `name` alone when there is no prefix.
fn column_ref(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// The record types being rendered, innermost first.
///
/// SELECT rendering follows schemas rather than values, so a type that
/// contains itself (`parent: Option<Box<Self>>`) would never bottom out.
/// Present values are always followed; past the last one, each record type
/// is expanded at most once.
#[derive(Clone, Copy)]
struct Path<'p> {
    schema: &'static Schema,
    present: bool,
    parent: Option<&'p Path<'p>>,
}

impl<'p> Path<'p> {
    const fn root(schema: &'static Schema) -> Self {
        Self {
            schema,
            present: true,
            parent: None,
        }
    }

    const fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Step into a nested record type, or `None` when a nil value would
    /// expand the same type again.
    fn enter(&'p self, schema: &'static Schema, record: Option<&dyn Record>) -> Option<Self> {
        let present = record.is_some();
        if !present {
            let mut nil_run =
                iter::successors(Some(self), |path| path.parent).take_while(|path| !path.present);
            if nil_run.any(|path| std::ptr::eq(path.schema, schema)) {
                return None;
            }
        }
        Some(Self {
            schema,
            present,
            parent: Some(self),
        })
    }
}

fn field_value<'a>(record: &'a dyn Record, field: &FieldSchema) -> Value<'a> {
    record.field(field.index())
}

/// Dereference the argument, or fail with [`Error::NilValue`].
fn resolve<T: AsRecord + ?Sized>(value: &T) -> Result<&dyn Record, Error> {
    value.as_record().ok_or(Error::NilValue {
        type_name: std::any::type_name::<T>(),
    })
}

/// Run one entry point and report its outcome.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn run<T: AsRecord + ?Sized>(
    entry: &'static str,
    value: &T,
    build: impl FnOnce(&dyn Record) -> Result<String, Error>,
) -> Result<String, Error> {
    let result = resolve(value).and_then(build);
    trace_result!(entry, std::any::type_name::<T>(), result);
    result
}

/// Render a full query from a query struct.
///
/// The struct needs exactly one `selectClause` field and at most one
/// `whereClause` field. A struct with no query-level fields at all renders
/// as an empty string.
///
/// # Example
///
/// ```
/// use soql::{Soql, marshal};
///
/// #[derive(Soql)]
/// struct Account {
///     #[soql("selectColumn,fieldName=Id")]
///     id: String,
///     #[soql("selectColumn,fieldName=Name")]
///     name: String,
/// }
///
/// #[derive(Soql)]
/// struct ByName {
///     #[soql("likeClause,fieldName=Name")]
///     names: Vec<String>,
/// }
///
/// #[derive(Soql)]
/// struct AccountQuery {
///     #[soql("selectClause,tableName=Account")]
///     select: Account,
///     #[soql("whereClause")]
///     filter: ByName,
/// }
///
/// let query = AccountQuery {
///     select: Account { id: String::new(), name: String::new() },
///     filter: ByName { names: vec!["Acme".into()] },
/// };
/// assert_eq!(
///     marshal(&query).unwrap(),
///     "SELECT Id,Name FROM Account WHERE Name LIKE '%Acme%'"
/// );
/// ```
///
/// # Errors
///
/// - [`Error::NilValue`] for a `None` argument.
/// - [`Error::InvalidTag`] for any invalid annotation reached.
/// - [`Error::MultipleSelectClause`] / [`Error::MultipleWhereClause`] (and
///   the ordering/limit/offset equivalents) for repeated query-level fields.
/// - [`Error::NoSelectClause`] when query-level fields exist without a
///   select-root, or the select-root renders no columns.
/// - [`Error::InvalidOrderBy`] for an ordering on an unknown column.
pub fn marshal<T: AsRecord + ?Sized>(value: &T) -> Result<String, Error> {
    run("marshal", value, |record| {
        build_query(&Path::root(record.schema()), Some(record), Scope::Root)
            .map(Option::unwrap_or_default)
    })
}

/// Render the SELECT column list of a struct, prefixing every column with
/// `relationship` when it is non-empty.
///
/// # Errors
///
/// - [`Error::NilValue`] for a `None` argument.
/// - [`Error::InvalidTag`] for any invalid annotation reached.
/// - [`Error::NoSelectClause`] (or any query error) from a `selectChild`
///   sub-query.
pub fn marshal_select_clause<T: AsRecord + ?Sized>(
    value: &T,
    relationship: &str,
) -> Result<String, Error> {
    run("select", value, |record| {
        build_select(&Path::root(record.schema()), Some(record), relationship)
    })
}

/// Render the WHERE predicates of a criteria struct, AND-joined.
///
/// Absent fields are left out; a struct with nothing present renders as an
/// empty string.
///
/// # Example
///
/// ```
/// use soql::{Soql, marshal_where_clause};
///
/// #[derive(Soql, Default)]
/// struct Criteria {
///     #[soql("inClause,fieldName=Role__r.Name")]
///     roles: Vec<String>,
///     #[soql("nullClause,fieldName=Last_Discovered_Date__c")]
///     allow_null: Option<bool>,
/// }
///
/// let criteria = Criteria { roles: vec!["db".into()], allow_null: Some(false) };
/// assert_eq!(
///     marshal_where_clause(&criteria).unwrap(),
///     "Role__r.Name IN ('db') AND Last_Discovered_Date__c != null"
/// );
/// assert_eq!(marshal_where_clause(&Criteria::default()).unwrap(), "");
/// ```
///
/// # Errors
///
/// - [`Error::NilValue`] for a `None` argument.
/// - [`Error::InvalidTag`] for any invalid annotation reached.
pub fn marshal_where_clause<T: AsRecord + ?Sized>(value: &T) -> Result<String, Error> {
    marshal_where_clause_with_prefix(value, "")
}

/// [`marshal_where_clause`] with every column prefixed by `relationship`.
///
/// # Errors
///
/// Same as [`marshal_where_clause`].
pub fn marshal_where_clause_with_prefix<T: AsRecord + ?Sized>(
    value: &T,
    relationship: &str,
) -> Result<String, Error> {
    run("where", value, |record| {
        build_where(record.schema(), Some(record), relationship)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_ref() {
        assert_eq!(column_ref("", "Name"), "Name");
        assert_eq!(column_ref("Role__r", "Name"), "Role__r.Name");
        assert_eq!(column_ref("A__r.B__r", "Id"), "A__r.B__r.Id");
    }

    fn schema_a() -> &'static Schema {
        static SCHEMA: std::sync::OnceLock<Schema> = std::sync::OnceLock::new();
        SCHEMA.get_or_init(|| Schema::build("A", &[]))
    }

    fn schema_b() -> &'static Schema {
        static SCHEMA: std::sync::OnceLock<Schema> = std::sync::OnceLock::new();
        SCHEMA.get_or_init(|| Schema::build("B", &[]))
    }

    #[test]
    fn test_path_expands_each_type_once_past_present_values() {
        let root = Path::root(schema_a());
        let b = root.enter(schema_b(), None).unwrap();
        assert_eq!(b.schema().name(), "B");

        // The root is present, so A may be expanded once more
        let a = b.enter(schema_a(), None).unwrap();
        assert!(a.enter(schema_a(), None).is_none());
        assert!(a.enter(schema_b(), None).is_none());
        assert!(b.enter(schema_b(), None).is_none());
    }
}
