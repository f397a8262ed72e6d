//! Property-based tests for WHERE clause rendering using proptest.
//!
//! These tests generate random criteria to check the joining and
//! parenthesization rules hold for any cardinality.

use proptest::prelude::*;
use soql::{Soql, marshal_where_clause};

#[derive(Soql, Default, Debug, Clone)]
struct Criteria {
    #[soql("likeClause,fieldName=Host_Name__c")]
    include: Vec<String>,
    #[soql("notLikeClause,fieldName=Host_Name__c")]
    exclude: Vec<String>,
    #[soql("inClause,fieldName=Role__r.Name")]
    roles: Vec<String>,
    #[soql("equalsClause,fieldName=Status__c")]
    status: String,
    #[soql("nullClause,fieldName=Last_Discovered_Date__c")]
    allow_null: Option<bool>,
}

fn term() -> impl Strategy<Value = String> {
    "[a-z0-9-]{1,8}"
}

fn terms() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(term(), 0..6)
}

fn criteria() -> impl Strategy<Value = Criteria> {
    (terms(), terms(), terms(), "[A-Za-z]{0,6}", any::<Option<bool>>()).prop_map(
        |(include, exclude, roles, status, allow_null)| Criteria {
            include,
            exclude,
            roles,
            status,
            allow_null,
        },
    )
}

// =============================================================================
// Cardinality Property Tests
// =============================================================================

proptest! {
    /// A like list is parenthesized only when it has more than one term
    #[test]
    fn like_parenthesized_only_when_plural(include in prop::collection::vec(term(), 1..8)) {
        let clause = marshal_where_clause(&Criteria { include: include.clone(), ..Default::default() }).unwrap();

        prop_assert_eq!(clause.matches(" LIKE ").count(), include.len());
        prop_assert_eq!(clause.matches(" OR ").count(), include.len() - 1);
        prop_assert_eq!(clause.starts_with('('), include.len() > 1);
    }

    /// Every not-like term is negated in its own parentheses
    #[test]
    fn not_like_terms_each_parenthesized(exclude in prop::collection::vec(term(), 1..8)) {
        let clause = marshal_where_clause(&Criteria { exclude: exclude.clone(), ..Default::default() }).unwrap();

        prop_assert_eq!(clause.matches("(NOT ").count(), exclude.len());
        prop_assert_eq!(clause.matches(" AND ").count(), exclude.len() - 1);
        prop_assert_eq!(clause.starts_with("(("), exclude.len() > 1);
    }

    /// An IN list holds every present value, comma-joined
    #[test]
    fn in_list_holds_every_value(roles in prop::collection::vec(term(), 1..8)) {
        let clause = marshal_where_clause(&Criteria { roles: roles.clone(), ..Default::default() }).unwrap();
        let quoted: Vec<String> = roles.iter().map(|role| format!("'{role}'")).collect();

        prop_assert_eq!(clause, format!("Role__r.Name IN ({})", quoted.join(",")));
    }
}

// =============================================================================
// Presence Property Tests
// =============================================================================

proptest! {
    /// Sequences of empty strings are absent
    #[test]
    fn empty_elements_render_nothing(count in 0usize..6) {
        let criteria = Criteria {
            include: vec![String::new(); count],
            exclude: vec![String::new(); count],
            roles: vec![String::new(); count],
            ..Default::default()
        };
        prop_assert_eq!(marshal_where_clause(&criteria).unwrap(), "");
    }

    /// Present fields are AND-joined with no dangling operator
    #[test]
    fn present_fields_and_joined(criteria in criteria()) {
        let clause = marshal_where_clause(&criteria).unwrap();
        let present = usize::from(!criteria.include.is_empty())
            + usize::from(!criteria.exclude.is_empty())
            + usize::from(!criteria.roles.is_empty())
            + usize::from(!criteria.status.is_empty())
            + usize::from(criteria.allow_null.is_some());

        prop_assert_eq!(clause.is_empty(), present == 0);
        prop_assert!(!clause.starts_with(" AND"));
        prop_assert!(!clause.ends_with("AND "));
        prop_assert!(!clause.contains(" AND  AND "));

        // Top-level joins: total ANDs minus those inside a not-like group
        let inner = criteria.exclude.len().saturating_sub(1);
        prop_assert_eq!(clause.matches(" AND ").count() - inner, present.saturating_sub(1));
    }

    /// Rendering is deterministic
    #[test]
    fn rendering_is_idempotent(criteria in criteria()) {
        let first = marshal_where_clause(&criteria).unwrap();
        let second = marshal_where_clause(&criteria.clone()).unwrap();
        prop_assert_eq!(first, second);
    }
}
