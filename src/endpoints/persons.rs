use super::Meta;
use crate::{transport::Transport, Error};
use serde_derive::Deserialize;

const PAGE_SIZE: usize = 100;

/// Fetch every person, one page at a time, stopping at the first empty page.
pub(crate) async fn get_persons(
    transport: &Transport,
) -> Result<Vec<Person>, Error> {
    let mut persons = Vec::new();

    for page in 1_u32.. {
        let resource = format!("persons?page={}&limit={}", page, PAGE_SIZE);
        let body = transport.get(&resource, true).await?;
        let batch: Vec<Person> = super::decode_data(&resource, &body)?;

        if batch.is_empty() {
            break;
        }

        log::debug!("Received {} persons on page {}", batch.len(), page);
        persons.extend(batch);
    }

    Ok(persons)
}

/// A person record.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub guid: String,
    pub security_level_for_person: Option<i64>,
    pub edit_security_level_for_person: Option<i64>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub last_name: String,
    pub nickname: Option<String>,
    pub street: Option<String>,
    pub address_addition: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone_private: Option<String>,
    pub phone_work: Option<String>,
    pub mobile: Option<String>,
    pub birth_name: Option<String>,
    pub birthday: Option<String>,
    pub image_url: Option<String>,
    pub family_image_url: Option<String>,
    pub email: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub emails: Vec<Email>,
    pub family_status_id: Option<u64>,
    pub wedding_date: Option<String>,
    pub status_id: Option<u64>,
    pub date_of_baptism: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub can_chat: bool,
    pub invitation_status: Option<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub chat_active: bool,
    #[serde(deserialize_with = "super::null_as_default")]
    pub meta: Meta,
    #[serde(deserialize_with = "super::null_as_default")]
    pub is_archived: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Email {
    #[serde(deserialize_with = "super::null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub is_default: bool,
    pub contact_label_id: Option<u64>,
}
