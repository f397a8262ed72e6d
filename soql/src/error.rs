//! Error taxonomy for marshalling.
//!
//! Every error aborts the current call; no partial query is ever returned
//! alongside one. Match on [`Error::kind`] instead of comparing messages.

use std::fmt;

use crate::tag::Category;

/// Why a field annotation was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TagError {
    /// The annotation string is empty.
    Empty,
    /// The category keyword is not recognized (e.g. `invalidClause`).
    UnknownCategory(String),
    /// An option token is not of the form `key=value`, or its value is empty.
    MalformedOption(String),
    /// The option key is unknown or not accepted by this category.
    UnknownOption {
        /// Category the option was attached to.
        category: Category,
        /// The offending key.
        key: String,
    },
    /// The same option was given twice.
    DuplicateOption(&'static str),
    /// A required option (`fieldName` / `tableName`) is missing.
    MissingOption {
        /// Category that requires the option.
        category: Category,
        /// The missing key.
        key: &'static str,
    },
    /// The category needs a nested record but the field is not one.
    NotARecord(Category),
    /// The category renders a single value but the field is a sequence.
    ScalarOnly(Category),
}

impl fmt::Display for TagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty annotation"),
            Self::UnknownCategory(keyword) => write!(f, "unknown category '{keyword}'"),
            Self::MalformedOption(token) => {
                write!(f, "malformed option '{token}', expected key=value")
            },
            Self::UnknownOption { category, key } => {
                write!(f, "option '{key}' is not accepted by {category}")
            },
            Self::DuplicateOption(key) => write!(f, "option '{key}' given more than once"),
            Self::MissingOption { category, key } => {
                write!(f, "{category} requires the '{key}' option")
            },
            Self::NotARecord(category) => {
                write!(f, "{category} can only be applied to a nested record field")
            },
            Self::ScalarOnly(category) => {
                write!(f, "{category} cannot be applied to a sequence field")
            },
        }
    }
}

impl std::error::Error for TagError {}

/// Discriminant of [`Error`], for matching without the attached context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A nil value was passed where a record was required.
    NilValue,
    /// A field annotation is invalid.
    InvalidTag,
    /// A query struct has no select-root.
    NoSelectClause,
    /// A query struct has more than one select-root.
    MultipleSelectClause,
    /// A query struct has more than one where-root.
    MultipleWhereClause,
    /// A query struct has more than one `orderByClause` field.
    MultipleOrderByClause,
    /// A query struct has more than one `limitClause` field.
    MultipleLimitClause,
    /// A query struct has more than one `offsetClause` field.
    MultipleOffsetClause,
    /// An ordering term names no selectable column.
    InvalidOrderBy,
}

/// Marshalling failure with the record and field it was detected on.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A nil pointer (`None`) was passed as the value to marshal.
    NilValue {
        /// Rust type of the nil argument.
        type_name: &'static str,
    },
    /// A field annotation failed validation.
    InvalidTag {
        /// Record declaring the field.
        record: &'static str,
        /// Rust name of the field.
        field: &'static str,
        /// What was wrong with it.
        reason: TagError,
    },
    /// No `selectClause` field, or the select-root renders no columns.
    NoSelectClause {
        /// The query record.
        record: &'static str,
    },
    /// More than one `selectClause` field.
    MultipleSelectClause {
        /// The query record.
        record: &'static str,
    },
    /// More than one `whereClause` field at query level.
    MultipleWhereClause {
        /// The query record.
        record: &'static str,
    },
    /// More than one `orderByClause` field.
    MultipleOrderByClause {
        /// The query record.
        record: &'static str,
    },
    /// More than one `limitClause` field.
    MultipleLimitClause {
        /// The query record.
        record: &'static str,
    },
    /// More than one `offsetClause` field.
    MultipleOffsetClause {
        /// The query record.
        record: &'static str,
    },
    /// An `Order` names a field that is not a plain column of the select-root.
    InvalidOrderBy {
        /// The select-root record.
        record: &'static str,
        /// The field name given in the ordering.
        field: String,
    },
}

impl Error {
    /// The kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NilValue { .. } => ErrorKind::NilValue,
            Self::InvalidTag { .. } => ErrorKind::InvalidTag,
            Self::NoSelectClause { .. } => ErrorKind::NoSelectClause,
            Self::MultipleSelectClause { .. } => ErrorKind::MultipleSelectClause,
            Self::MultipleWhereClause { .. } => ErrorKind::MultipleWhereClause,
            Self::MultipleOrderByClause { .. } => ErrorKind::MultipleOrderByClause,
            Self::MultipleLimitClause { .. } => ErrorKind::MultipleLimitClause,
            Self::MultipleOffsetClause { .. } => ErrorKind::MultipleOffsetClause,
            Self::InvalidOrderBy { .. } => ErrorKind::InvalidOrderBy,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NilValue { type_name } => write!(f, "nil value passed for {type_name}"),
            Self::InvalidTag {
                record,
                field,
                reason,
            } => write!(f, "invalid soql tag on {record}.{field}: {reason}"),
            Self::NoSelectClause { record } => write!(f, "{record} has no select clause"),
            Self::MultipleSelectClause { record } => {
                write!(f, "{record} has more than one selectClause field")
            },
            Self::MultipleWhereClause { record } => {
                write!(f, "{record} has more than one whereClause field")
            },
            Self::MultipleOrderByClause { record } => {
                write!(f, "{record} has more than one orderByClause field")
            },
            Self::MultipleLimitClause { record } => {
                write!(f, "{record} has more than one limitClause field")
            },
            Self::MultipleOffsetClause { record } => {
                write!(f, "{record} has more than one offsetClause field")
            },
            Self::InvalidOrderBy { record, field } => {
                write!(f, "cannot order by '{field}': not a column of {record}")
            },
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidTag { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
