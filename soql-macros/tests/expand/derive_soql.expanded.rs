use soql::prelude::*;
pub struct HostCriteria {
    #[soql("likeClause,fieldName=Host_Name__c")]
    pub include: Vec<String>,
    #[soql("nullClause,fieldName=Last_Discovered_Date__c")]
    pub allow_null: Option<bool>,
    pub note: String,
}
impl ::soql::Record for HostCriteria {
    fn describe() -> &'static ::soql::Schema {
        static SCHEMA: ::std::sync::OnceLock<::soql::Schema> = ::std::sync::OnceLock::new();
        SCHEMA
            .get_or_init(|| ::soql::Schema::build(
                "HostCriteria",
                &[
                    ::soql::FieldDef::new(
                        "include",
                        "likeClause,fieldName=Host_Name__c",
                        <Vec<String> as ::soql::ToValue>::shape,
                    ),
                    ::soql::FieldDef::new(
                        "allow_null",
                        "nullClause,fieldName=Last_Discovered_Date__c",
                        <Option<bool> as ::soql::ToValue>::shape,
                    ),
                ],
            ))
    }
    fn schema(&self) -> &'static ::soql::Schema {
        <Self as ::soql::Record>::describe()
    }
    fn field(&self, index: usize) -> ::soql::Value<'_> {
        match index {
            0 => ::soql::ToValue::to_value(&self.include),
            1 => ::soql::ToValue::to_value(&self.allow_null),
            _ => ::soql::Value::Unsupported,
        }
    }
}
impl ::soql::ToValue for HostCriteria {
    fn to_value(&self) -> ::soql::Value<'_> {
        ::soql::Value::Record(self)
    }
    fn shape() -> ::soql::Shape {
        ::soql::Shape::Record(<Self as ::soql::Record>::describe)
    }
}
impl ::soql::AsRecord for HostCriteria {
    fn as_record(&self) -> ::std::option::Option<&dyn ::soql::Record> {
        ::std::option::Option::Some(self as &dyn ::soql::Record)
    }
}
fn main() {}
