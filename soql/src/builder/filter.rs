//! WHERE fragment rendering.

use super::{column_ref, field_value};
use crate::error::Error;
use crate::schema::{FieldSchema, Record, Schema};
use crate::tag::Category;
use crate::trace::trace_skip;
use crate::value::{Literal, Value};

/// Render the WHERE predicates of a record, AND-joined in declaration order.
///
/// A `None` record still has its annotations checked, then renders as empty.
pub(crate) fn build_where(
    schema: &'static Schema,
    record: Option<&dyn Record>,
    prefix: &str,
) -> Result<String, Error> {
    let fields = schema.fields()?;
    let Some(record) = record else {
        return Ok(String::new());
    };

    let mut predicates = Vec::new();
    for field in fields {
        let value = field_value(record, field);
        let predicate = match field.directive().category() {
            Category::WhereClause => build_nested(field, value, prefix)?,
            _ => build_predicate(field, value, prefix),
        };
        if let Some(predicate) = predicate {
            predicates.push(predicate);
        } else {
            trace_skip!(schema.name(), field.name(), field.directive().category());
        }
    }

    Ok(predicates.join(" AND "))
}

/// A nested filter group splices into the parent's AND-chain unparenthesized.
fn build_nested(
    field: &FieldSchema,
    value: Value<'_>,
    prefix: &str,
) -> Result<Option<String>, Error> {
    let Some(schema) = field.shape().record_schema() else {
        return Ok(None);
    };
    let nested = build_where(schema, value.record(), prefix)?;
    Ok(Some(nested).filter(|nested| !nested.is_empty()))
}

/// Render one predicate, or `None` when the value is absent.
fn build_predicate(field: &FieldSchema, value: Value<'_>, prefix: &str) -> Option<String> {
    let directive = field.directive();
    let category = directive.category();
    let column = column_ref(prefix, directive.field_name()?);

    match category {
        Category::Like => {
            let terms: Vec<String> = texts(value)
                .map(|text| format!("{column} LIKE '%{text}%'"))
                .collect();
            match terms.len() {
                0 => None,
                1 => terms.into_iter().next(),
                _ => Some(format!("({})", terms.join(" OR "))),
            }
        },
        Category::NotLike => {
            let terms: Vec<String> = texts(value)
                .map(|text| format!("(NOT {column} LIKE '%{text}%')"))
                .collect();
            match terms.len() {
                0 => None,
                1 => terms.into_iter().next(),
                _ => Some(format!("({})", terms.join(" AND "))),
            }
        },
        Category::In => {
            let items: Vec<String> = value.literals().iter().map(ToString::to_string).collect();
            (!items.is_empty()).then(|| format!("{column} IN ({})", items.join(",")))
        },
        Category::Null => {
            let op = if value.flag()? { "=" } else { "!=" };
            Some(format!("{column} {op} null"))
        },
        _ => {
            let op = category.comparison_op()?;
            let literal = value.literal()?;
            Some(format!("{column} {op} {literal}"))
        },
    }
}

/// Present text values; patterns are only defined for text.
fn texts<'a>(value: Value<'a>) -> impl Iterator<Item = &'a str> {
    value.literals().into_iter().filter_map(Literal::text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDef;
    use crate::value::ToValue;

    struct Criteria {
        names: Vec<String>,
        status: String,
        allow_null: Option<bool>,
    }

    fn criteria_schema() -> &'static Schema {
        static SCHEMA: std::sync::OnceLock<Schema> = std::sync::OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::build(
                "Criteria",
                &[
                    FieldDef::new("names", "likeClause,fieldName=Name", Vec::<String>::shape),
                    FieldDef::new("status", "equalsClause,fieldName=Status__c", String::shape),
                    FieldDef::new(
                        "allow_null",
                        "nullClause,fieldName=Closed_Date__c",
                        Option::<bool>::shape,
                    ),
                ],
            )
        })
    }

    impl Record for Criteria {
        fn describe() -> &'static Schema {
            criteria_schema()
        }

        fn schema(&self) -> &'static Schema {
            criteria_schema()
        }

        fn field(&self, index: usize) -> Value<'_> {
            match index {
                0 => self.names.to_value(),
                1 => self.status.to_value(),
                2 => self.allow_null.to_value(),
                _ => Value::Unsupported,
            }
        }
    }

    fn render(criteria: &Criteria, prefix: &str) -> String {
        build_where(criteria_schema(), Some(criteria), prefix).unwrap()
    }

    #[test]
    fn test_empty_record_renders_nothing() {
        let criteria = Criteria {
            names: vec![],
            status: String::new(),
            allow_null: None,
        };
        assert_eq!(render(&criteria, ""), "");
        assert_eq!(build_where(criteria_schema(), None, "").unwrap(), "");
    }

    #[test]
    fn test_prefix_applies_to_every_column() {
        let criteria = Criteria {
            names: vec!["a".into(), "b".into()],
            status: "Open".into(),
            allow_null: Some(true),
        };
        assert_eq!(
            render(&criteria, "Case__r"),
            "(Case__r.Name LIKE '%a%' OR Case__r.Name LIKE '%b%') AND Case__r.Status__c = 'Open' AND Case__r.Closed_Date__c = null"
        );
    }

    #[test]
    fn test_empty_elements_are_dropped() {
        let criteria = Criteria {
            names: vec![String::new(), "a".into()],
            status: String::new(),
            allow_null: Some(false),
        };
        assert_eq!(
            render(&criteria, ""),
            "Name LIKE '%a%' AND Closed_Date__c != null"
        );
    }
}
