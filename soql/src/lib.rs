// =============================================================================
// CRATE-LEVEL QUALITY LINTS
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
#![warn(unreachable_pub)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION
// =============================================================================
#![allow(clippy::doc_markdown)] // SOQL keywords and field names in docs
#![allow(clippy::format_push_string)] // Query assembly reads better with push_str
#![allow(clippy::match_same_arms)] // Category tables list each keyword explicitly
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::indexing_slicing))]

//! # soql - SOQL queries from annotated structs
//!
//! Annotate struct fields with `#[soql("...")]`, derive [`Soql`], and render
//! SELECT lists, WHERE clauses or whole queries.
//!
//! ## Quick Start
//!
//! ```
//! use soql::prelude::*;
//!
//! #[derive(Soql)]
//! struct Host {
//!     #[soql("selectColumn,fieldName=Id")]
//!     id: String,
//!     #[soql("selectColumn,fieldName=Host_Name__c")]
//!     host_name: String,
//! }
//!
//! #[derive(Soql, Default)]
//! struct HostCriteria {
//!     #[soql("likeClause,fieldName=Host_Name__c")]
//!     include: Vec<String>,
//!     #[soql("notEqualsClause,fieldName=Status__c")]
//!     status: String,
//! }
//!
//! #[derive(Soql)]
//! struct HostQuery {
//!     #[soql("selectClause,tableName=SM_Logical_Host__c")]
//!     select: Host,
//!     #[soql("whereClause")]
//!     filter: HostCriteria,
//!     #[soql("orderByClause")]
//!     order: Vec<Order>,
//!     #[soql("limitClause")]
//!     limit: u32,
//! }
//!
//! let query = HostQuery {
//!     select: Host { id: String::new(), host_name: String::new() },
//!     filter: HostCriteria {
//!         include: vec!["-db".into(), "-dbmgmt".into()],
//!         ..HostCriteria::default()
//!     },
//!     order: vec![Order::asc("host_name")],
//!     limit: 10,
//! };
//!
//! assert_eq!(
//!     marshal(&query).unwrap(),
//!     "SELECT Id,Host_Name__c FROM SM_Logical_Host__c \
//!      WHERE (Host_Name__c LIKE '%-db%' OR Host_Name__c LIKE '%-dbmgmt%') \
//!      ORDER BY Host_Name__c ASC LIMIT 10"
//! );
//! ```
//!
//! ## Categories
//!
//! | Annotation | Renders |
//! |------------|---------|
//! | `selectClause,tableName=T` | select-root of a query struct, `FROM T` |
//! | `whereClause` | where-root of a query struct, or a nested filter group |
//! | `selectColumn,fieldName=F` | `F`, or the flattened columns of a nested record |
//! | `selectChild,fieldName=R` | `(SELECT .. FROM R ..)` from a query struct, or the first of a list |
//! | `likeClause,fieldName=F` | `F LIKE '%v%'`, OR-joined |
//! | `notLikeClause,fieldName=F` | `(NOT F LIKE '%v%')`, AND-joined |
//! | `equalsClause,fieldName=F` | `F = v` |
//! | `notEqualsClause,fieldName=F` | `F != v` |
//! | `inClause,fieldName=F` | `F IN (v1,v2)` |
//! | `nullClause,fieldName=F` | `F = null` / `F != null` from `Option<bool>` |
//! | `greaterThanClause,fieldName=F` | `F > v` (also `greaterThanOrEquals`, `lessThan`, `lessThanOrEquals`) |
//! | `orderByClause` | `ORDER BY` from [`Order`] terms |
//! | `limitClause` / `offsetClause` | `LIMIT n` / `OFFSET n` |
//!
//! ## Presence
//!
//! Empty text, `0`, `0.0`, `false`, empty sequences and `None` are absent and
//! render nothing. `nullClause` is present whenever its `Option<bool>` is
//! `Some`.
//!
//! ## Features
//!
//! - `tracing`: emit `soql.marshal`, `soql.skip` and `soql.error` events.

// Lets `#[derive(Soql)]` expand to `::soql::...` inside this crate.
extern crate self as soql;

mod builder;
mod error;
mod order;
mod schema;
mod tag;
mod trace;
mod value;

pub use builder::{
    marshal, marshal_select_clause, marshal_where_clause, marshal_where_clause_with_prefix,
};
pub use error::{Error, ErrorKind, TagError};
pub use order::Order;
pub use schema::{AsRecord, FieldDef, FieldSchema, Record, Schema};
pub use tag::{Category, Directive, parse_tag};
pub use value::{Shape, ToValue, Value};

/// Derive [`Record`] from `#[soql("...")]` field annotations.
pub use soql_macros::Soql;

/// Prelude module for convenient imports.
///
/// ```
/// use soql::prelude::*;
///
/// #[derive(Soql)]
/// struct Role {
///     #[soql("selectColumn,fieldName=Name")]
///     name: String,
/// }
///
/// let columns = marshal_select_clause(&Role { name: String::new() }, "Role__r").unwrap();
/// assert_eq!(columns, "Role__r.Name");
/// ```
pub mod prelude {
    pub use crate::{
        AsRecord, Error, ErrorKind, Order, Record, Soql, marshal, marshal_select_clause,
        marshal_where_clause, marshal_where_clause_with_prefix,
    };
}

// ============================================================================
// API Contract Tests (compile-time assertions)
// ============================================================================
