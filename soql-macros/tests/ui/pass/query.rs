use std::sync::Arc;

use soql::{Order, Soql, marshal};

#[derive(Soql, Default)]
struct Version {
    #[soql("selectColumn,fieldName=Version__c")]
    version: String,
}

#[derive(Soql, Default)]
struct VersionQuery {
    #[soql("selectClause,tableName=SM_Application_Versions__c")]
    select: Version,
    #[soql("orderByClause")]
    order: Option<Order>,
}

#[derive(Soql, Default)]
struct Application {
    #[soql("selectColumn,fieldName=Id")]
    id: String,
    #[soql("selectChild,fieldName=Application_Versions__r")]
    versions: VersionQuery,
}

// Nested records behind smart pointers and options
#[derive(Soql, Default)]
struct ApplicationQuery {
    #[soql("selectClause,tableName=SM_Application__c")]
    select: Box<Application>,
    #[soql("whereClause")]
    filter: Option<Arc<Filter>>,
    #[soql("limitClause")]
    limit: usize,
}

#[derive(Soql, Default)]
struct Filter {
    #[soql("equalsClause,fieldName=Name")]
    name: String,
}

fn main() {
    let query = ApplicationQuery::default();
    assert_eq!(
        marshal(&query).unwrap(),
        "SELECT Id,(SELECT SM_Application_Versions__c.Version__c FROM Application_Versions__r) FROM SM_Application__c"
    );
}
