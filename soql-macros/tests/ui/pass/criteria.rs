use soql::{Soql, marshal_where_clause};

// Every filter category on owned, optional and sequence field types
#[derive(Soql, Default)]
struct HostCriteria {
    #[soql("likeClause,fieldName=Host_Name__c")]
    include: Vec<String>,
    #[soql("notLikeClause,fieldName=Host_Name__c")]
    exclude: Vec<String>,
    #[soql("inClause,fieldName=Role__r.Name")]
    roles: Vec<String>,
    #[soql("equalsClause,fieldName=Status__c")]
    status: String,
    #[soql("notEqualsClause,fieldName=Type__c")]
    not_type: Option<String>,
    #[soql("nullClause,fieldName=Last_Discovered_Date__c")]
    allow_null: Option<bool>,
    #[soql("greaterThanClause,fieldName=Cpu_Count__c")]
    min_cpus: u32,
    #[soql("lessThanOrEqualsClause,fieldName=Load__c")]
    max_load: f64,
    // Unannotated fields are ignored
    note: &'static str,
}

// Raw identifiers render under their plain name
#[derive(Soql, Default)]
struct RawNames {
    #[soql("equalsClause,fieldName=Type")]
    r#type: String,
}

fn main() {
    let criteria = HostCriteria {
        status: "Active".into(),
        note: "not rendered",
        ..Default::default()
    };
    assert_eq!(
        marshal_where_clause(&criteria).unwrap(),
        "Status__c = 'Active'"
    );
    let _ = criteria.note;
    let _ = marshal_where_clause(&RawNames::default());
}
