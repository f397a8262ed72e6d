//! Ordering terms for `orderByClause` fields.

/// One `ORDER BY` term.
///
/// `field` is the Rust field name of a `selectColumn` in the query's
/// select-root struct; it renders as that column's `fieldName`.
///
/// ```
/// use soql::Order;
///
/// let order = vec![Order::desc("created"), Order::asc("name")];
/// assert!(order[0].desc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Order {
    /// Rust field name of the column to order by.
    pub field: String,
    /// Descending when true.
    pub desc: bool,
}

impl Order {
    /// Ascending order on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            desc: false,
        }
    }

    /// Descending order on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            desc: true,
        }
    }

    pub(crate) const fn direction(&self) -> &'static str {
        if self.desc { "DESC" } else { "ASC" }
    }
}
