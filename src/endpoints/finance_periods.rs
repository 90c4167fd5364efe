use super::Permissions;
use crate::{transport::Transport, Error};
use serde_derive::Deserialize;

const RESOURCE: &str = "finance/accountingperiods";

/// Fetch the accounting periods. Use a [`crate::FinanceIndex`] to find out
/// which [`crate::FinanceClient`] each one belongs to.
pub(crate) async fn get_finance_periods(
    transport: &Transport,
) -> Result<Vec<FinancePeriod>, Error> {
    let body = transport.get(RESOURCE, true).await?;

    super::decode_data(RESOURCE, &body)
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancePeriod {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub is_closed: bool,
    #[serde(deserialize_with = "super::null_as_default")]
    pub client_id: u64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub permissions: Permissions,
}
