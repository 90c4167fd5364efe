use serde_derive::Deserialize;
use std::collections::BTreeMap;

/// The permissions the logged in user has on a resource, keyed by name.
pub type Permissions = BTreeMap<String, serde_json::Value>;

/// Who created or last modified a resource, and when.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Meta {
    pub created_person: Option<MetaPerson>,
    pub created_date: Option<String>,
    pub modified_person: Option<MetaPerson>,
    pub modified_date: Option<String>,
}

/// A short reference to a person, as embedded in [`Meta`].
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetaPerson {
    pub title: Option<String>,
    pub domain_type: Option<String>,
    pub domain_identifier: Option<String>,
    pub api_url: Option<String>,
}
