// =============================================================================
// CRATE-LEVEL QUALITY LINTS (following Tokio/Serde standards)
// =============================================================================
#![forbid(unsafe_code)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]
// Note: unreachable_pub is not applicable to proc-macro crates where internal
// functions need pub visibility for module organization but aren't exported
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
// =============================================================================
// CLIPPY CONFIGURATION FOR PROC-MACRO CRATES
// =============================================================================
#![allow(clippy::doc_markdown)] // Annotation keywords in docs
#![allow(clippy::missing_errors_doc)] // # Errors sections - doc-heavy
#![allow(elided_lifetimes_in_paths)] // Common pattern with ParseStream

//! Proc-macros for `soql` - `#[derive(Soql)]` for annotated query structs.

use proc_macro::TokenStream;

mod derive;
mod diagnostics;
mod errors;

// ============================================================================
// DERIVE MACROS
// ============================================================================

/// Derive `soql::Record` from `#[soql("...")]` field annotations.
///
/// Each annotated field takes one string literal, a category keyword
/// optionally followed by `key=value` options:
///
/// ```ignore
/// #[derive(Soql)]
/// struct HostCriteria {
///     #[soql("likeClause,fieldName=Host_Name__c")]
///     include: Vec<String>,
///     #[soql("nullClause,fieldName=Last_Discovered_Date__c")]
///     allow_null: Option<bool>,
///     // Not rendered
///     note: String,
/// }
/// ```
///
/// The annotation string is checked when the type is first marshalled, so
/// an unknown category is reported as `soql::Error::InvalidTag` at runtime.
/// The derive also implements `soql::ToValue` (so the struct can be nested
/// in another record) and `soql::AsRecord`.
///
/// Only non-generic structs with named fields are supported.
#[proc_macro_derive(Soql, attributes(soql))]
pub fn derive_soql(input: TokenStream) -> TokenStream {
    derive::derive_soql_impl(input)
}
