//! Field annotation grammar.
//!
//! An annotation is a category keyword optionally followed by comma-separated
//! `key=value` options:
//!
//! ```text
//! <category>[,fieldName=<Name>]
//! selectClause,tableName=<SObject>
//! ```
//!
//! Parsing is a pure function of the string; checks that need the field's
//! type (e.g. `selectChild` on a non-record) happen when the schema is built.

use std::fmt;

use crate::error::TagError;

/// The rendering role of an annotated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Category {
    /// Select-root of a query struct: `selectClause,tableName=X`.
    SelectClause,
    /// Where-root of a query struct, or a nested filter group.
    WhereClause,
    /// Selected column, flattened when the field is a nested record.
    SelectColumn,
    /// Child relationship sub-query.
    SelectChild,
    /// `Field LIKE '%v%'`, OR-joined for several values.
    Like,
    /// `(NOT Field LIKE '%v%')`, AND-joined for several values.
    NotLike,
    /// `Field = v`
    Equals,
    /// `Field != v`
    NotEquals,
    /// `Field IN (v, ...)`
    In,
    /// `Field = null` / `Field != null` from an `Option<bool>`.
    Null,
    /// `Field > v`
    GreaterThan,
    /// `Field >= v`
    GreaterThanOrEquals,
    /// `Field < v`
    LessThan,
    /// `Field <= v`
    LessThanOrEquals,
    /// Query-level `ORDER BY`.
    OrderBy,
    /// Query-level `LIMIT`.
    Limit,
    /// Query-level `OFFSET`.
    Offset,
}

/// Option keys understood by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionKey {
    FieldName,
    TableName,
}

impl OptionKey {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "fieldName" => Some(Self::FieldName),
            "tableName" => Some(Self::TableName),
            _ => None,
        }
    }

    const fn key(self) -> &'static str {
        match self {
            Self::FieldName => "fieldName",
            Self::TableName => "tableName",
        }
    }
}

impl Category {
    /// Parse a category keyword (e.g. `"likeClause"`).
    ///
    /// # Example
    ///
    /// ```
    /// use soql::Category;
    ///
    /// assert_eq!(Category::from_keyword("inClause"), Some(Category::In));
    /// assert_eq!(Category::from_keyword("invalidClause"), None);
    /// ```
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "selectClause" => Some(Self::SelectClause),
            "whereClause" => Some(Self::WhereClause),
            "selectColumn" => Some(Self::SelectColumn),
            "selectChild" => Some(Self::SelectChild),
            "likeClause" => Some(Self::Like),
            "notLikeClause" => Some(Self::NotLike),
            "equalsClause" => Some(Self::Equals),
            "notEqualsClause" => Some(Self::NotEquals),
            "inClause" => Some(Self::In),
            "nullClause" => Some(Self::Null),
            "greaterThanClause" => Some(Self::GreaterThan),
            "greaterThanOrEqualsClause" => Some(Self::GreaterThanOrEquals),
            "lessThanClause" => Some(Self::LessThan),
            "lessThanOrEqualsClause" => Some(Self::LessThanOrEquals),
            "orderByClause" => Some(Self::OrderBy),
            "limitClause" => Some(Self::Limit),
            "offsetClause" => Some(Self::Offset),
            _ => None,
        }
    }

    /// The keyword as written in annotations.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::SelectClause => "selectClause",
            Self::WhereClause => "whereClause",
            Self::SelectColumn => "selectColumn",
            Self::SelectChild => "selectChild",
            Self::Like => "likeClause",
            Self::NotLike => "notLikeClause",
            Self::Equals => "equalsClause",
            Self::NotEquals => "notEqualsClause",
            Self::In => "inClause",
            Self::Null => "nullClause",
            Self::GreaterThan => "greaterThanClause",
            Self::GreaterThanOrEquals => "greaterThanOrEqualsClause",
            Self::LessThan => "lessThanClause",
            Self::LessThanOrEquals => "lessThanOrEqualsClause",
            Self::OrderBy => "orderByClause",
            Self::Limit => "limitClause",
            Self::Offset => "offsetClause",
        }
    }

    /// The single option this category takes, which is also required.
    const fn option(self) -> Option<OptionKey> {
        match self {
            Self::SelectClause => Some(OptionKey::TableName),
            Self::WhereClause | Self::OrderBy | Self::Limit | Self::Offset => None,
            _ => Some(OptionKey::FieldName),
        }
    }

    /// Whether the field must hold a nested record. `selectChild` also
    /// accepts a sequence of records.
    #[must_use]
    pub const fn needs_record(self) -> bool {
        matches!(
            self,
            Self::SelectClause | Self::WhereClause | Self::SelectChild
        )
    }

    /// Whether the category renders exactly one value.
    #[must_use]
    pub const fn is_scalar_only(self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::NotEquals
                | Self::GreaterThan
                | Self::GreaterThanOrEquals
                | Self::LessThan
                | Self::LessThanOrEquals
        )
    }

    /// The comparison operator of a scalar-only category.
    pub(crate) const fn comparison_op(self) -> Option<&'static str> {
        match self {
            Self::Equals => Some("="),
            Self::NotEquals => Some("!="),
            Self::GreaterThan => Some(">"),
            Self::GreaterThanOrEquals => Some(">="),
            Self::LessThan => Some("<"),
            Self::LessThanOrEquals => Some("<="),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A parsed, validated field annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    category: Category,
    target: &'a str,
}

impl<'a> Directive<'a> {
    /// The category keyword.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Rendered column/relationship name, for categories that take `fieldName`.
    #[must_use]
    pub const fn field_name(&self) -> Option<&'a str> {
        match self.category.option() {
            Some(OptionKey::FieldName) => Some(self.target),
            _ => None,
        }
    }

    /// Record-type name of a `selectClause`.
    #[must_use]
    pub const fn table_name(&self) -> Option<&'a str> {
        match self.category.option() {
            Some(OptionKey::TableName) => Some(self.target),
            _ => None,
        }
    }

    /// Relationship used in the `FROM` of a `selectChild` sub-query.
    #[must_use]
    pub const fn relationship_name(&self) -> Option<&'a str> {
        match self.category {
            Category::SelectChild => Some(self.target),
            _ => None,
        }
    }
}

impl fmt::Display for Directive<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category.option() {
            Some(option) => write!(f, "{},{}={}", self.category, option.key(), self.target),
            None => write!(f, "{}", self.category),
        }
    }
}

/// Parse one field annotation.
///
/// # Example
///
/// ```
/// use soql::{Category, parse_tag};
///
/// let directive = parse_tag("likeClause,fieldName=Host_Name__c").unwrap();
/// assert_eq!(directive.category(), Category::Like);
/// assert_eq!(directive.field_name(), Some("Host_Name__c"));
///
/// assert!(parse_tag("equalsClause").is_err()); // fieldName is required
/// ```
///
/// # Errors
///
/// Returns [`TagError`] for an unknown category, a missing required option,
/// or a malformed, unknown or repeated option.
pub fn parse_tag(tag: &str) -> Result<Directive<'_>, TagError> {
    let mut tokens = tag.split(',').map(str::trim);
    let keyword = tokens.next().unwrap_or_default();
    if keyword.is_empty() {
        return Err(TagError::Empty);
    }

    let category = Category::from_keyword(keyword)
        .ok_or_else(|| TagError::UnknownCategory(keyword.to_string()))?;

    let mut target: Option<&str> = None;
    for token in tokens {
        let Some((key, value)) = token.split_once('=') else {
            return Err(TagError::MalformedOption(token.to_string()));
        };
        let (key, value) = (key.trim(), value.trim());

        let option = OptionKey::from_key(key)
            .filter(|option| category.option() == Some(*option))
            .ok_or_else(|| TagError::UnknownOption {
                category,
                key: key.to_string(),
            })?;
        if value.is_empty() {
            return Err(TagError::MalformedOption(token.to_string()));
        }
        if target.replace(value).is_some() {
            return Err(TagError::DuplicateOption(option.key()));
        }
    }

    match (category.option(), target) {
        (Some(option), None) => Err(TagError::MissingOption {
            category,
            key: option.key(),
        }),
        (_, target) => Ok(Directive {
            category,
            target: target.unwrap_or_default(),
        }),
    }
}
