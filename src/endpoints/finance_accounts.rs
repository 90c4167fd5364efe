use super::{Meta, Permissions};
use crate::{transport::Transport, Error};
use serde_derive::Deserialize;

pub(crate) async fn get_finance_accounts(
    transport: &Transport,
    accounting_period_id: u64,
) -> Result<Vec<FinanceAccount>, Error> {
    let resource = format!(
        "finance/accounts?accounting_period_id={}",
        accounting_period_id
    );
    let body = transport.get(&resource, true).await?;

    super::decode_data(&resource, &body)
}

/// A ledger account within one accounting period.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinanceAccount {
    #[serde(deserialize_with = "super::null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub number: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub name: String,
    pub account_group_id: Option<u64>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub accounting_period_id: u64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub is_donation_account: bool,
    #[serde(deserialize_with = "super::null_as_default")]
    pub is_opening_balance_account: bool,
    /// In the smallest currency unit (e.g. cents).
    #[serde(deserialize_with = "super::null_as_default")]
    pub balance: i64,
    #[serde(deserialize_with = "super::null_as_default")]
    pub meta: Meta,
    #[serde(deserialize_with = "super::null_as_default")]
    pub permissions: Permissions,
}
