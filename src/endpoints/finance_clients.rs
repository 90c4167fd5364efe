use super::Meta;
use crate::{transport::Transport, Error};
use serde_derive::Deserialize;

const RESOURCE: &str = "finance/clients";

pub(crate) async fn get_finance_clients(
    transport: &Transport,
) -> Result<Vec<FinanceClient>, Error> {
    let body = transport.get(RESOURCE, true).await?;

    super::decode_data(RESOURCE, &body)
}

/// A legal entity (Mandant) that keeps its own books.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinanceClient {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub sort_key: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub meta: Meta,
}
