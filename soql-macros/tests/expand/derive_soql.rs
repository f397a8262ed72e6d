// Test #[derive(Soql)] on a criteria struct
use soql::prelude::*;

#[derive(Soql)]
pub struct HostCriteria {
    #[soql("likeClause,fieldName=Host_Name__c")]
    pub include: Vec<String>,
    #[soql("nullClause,fieldName=Last_Discovered_Date__c")]
    pub allow_null: Option<bool>,
    pub note: String,
}

fn main() {}
