//! The ChurchTools API's endpoints.

mod finance_accounts;
mod finance_clients;
mod finance_periods;
mod info;
mod login;
mod login_token;
mod meta;
mod persons;
mod relationships;

pub(crate) use finance_accounts::get_finance_accounts;
pub use finance_accounts::FinanceAccount;
pub(crate) use finance_clients::get_finance_clients;
pub use finance_clients::FinanceClient;
pub(crate) use finance_periods::get_finance_periods;
pub use finance_periods::FinancePeriod;
pub(crate) use info::get_info;
pub(crate) use login::login;
pub use login::LoginData;
pub(crate) use login_token::get_login_token;
pub use meta::{Meta, MetaPerson, Permissions};
pub(crate) use persons::get_persons;
pub use persons::{Email, Person};
pub(crate) use relationships::get_relationships;
pub use relationships::{DomainAttributes, Relationship, Relative};

use crate::Error;
use serde::de::{DeserializeOwned, Deserializer};
use serde_derive::Deserialize;

/// Almost every response wraps its payload in `{"data": ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Envelope<T> {
    data: T,
}

fn decode<T>(resource: &str, body: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(|source| Error::Decode {
        resource: resource.to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
        source,
    })
}

/// Decode the `data` field of a response.
fn decode_data<T>(resource: &str, body: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned,
{
    decode::<Envelope<T>>(resource, body).map(|envelope| envelope.data)
}

/// The server sends `null` for fields it has no value for, treat that the
/// same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    <Option<T> as serde::Deserialize>::deserialize(deserializer)
        .map(Option::unwrap_or_default)
}
