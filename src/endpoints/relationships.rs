use crate::{transport::Transport, Error};
use serde_derive::Deserialize;

/// Fetch the people related to a person (spouse, children, ...).
pub(crate) async fn get_relationships(
    transport: &Transport,
    person_id: u64,
) -> Result<Vec<Relationship>, Error> {
    let resource = format!("persons/{}/relationships", person_id);
    let body = transport.get(&resource, true).await?;

    super::decode_data(&resource, &body)
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Relationship {
    #[serde(deserialize_with = "super::null_as_default")]
    pub relationship_type_id: u64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub relationship_name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub degree_of_relationship: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub relative: Relative,
}

/// The other end of a [`Relationship`].
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Relative {
    #[serde(deserialize_with = "super::null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub domain_type: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub domain_identifier: String,
    pub api_url: Option<String>,
    pub frontend_url: Option<String>,
    pub image_url: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub domain_attributes: DomainAttributes,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainAttributes {
    #[serde(deserialize_with = "super::null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub last_name: String,
    pub guid: Option<String>,
}
