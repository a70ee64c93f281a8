//! JSON shapes exchanged with the bank.
//!
//! Every field is loosely typed here: vocabulary values and timestamps are
//! plain strings. The converters turn these records into the typed
//! [`crate::model`] values and back.
pub(crate) mod account_converter;
pub(crate) mod operation_converter;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum CodecError {
    #[error("invalid {domain}: {input}")]
    InvalidEnumValue { domain: &'static str, input: String },
    #[error("malformed timestamp: {input}")]
    MalformedTimestamp { input: String },
}

/// The bank sends `null` for blank requisites.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Same for amounts.
fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountInfoRecord {
    #[serde(deserialize_with = "null_as_empty")]
    pub company_id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub company_name: String,
    #[serde(deserialize_with = "null_as_empty_list")]
    pub bank_accounts: Vec<BankAccountRecord>,
}

fn null_as_empty_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BankAccountRecord {
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub account_name: String,
    #[serde(deserialize_with = "null_as_zero")]
    pub balance: f64,
    #[serde(deserialize_with = "null_as_empty")]
    pub bank_bic: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub bank_inn: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub bank_kpp: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub bank_correspondent_account: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub bank_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub begin_date: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub number: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub status: String,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationRecord {
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub company_id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub contragent_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub contragent_inn: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub contragent_kpp: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub contragent_bank_account_number: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub contragent_bank_name: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub contragent_bank_bic: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_zero")]
    pub amount: f64,
    #[serde(deserialize_with = "null_as_zero")]
    pub amount_with_commission: f64,
    #[serde(deserialize_with = "null_as_empty")]
    pub bank_account_number: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub payment_purpose: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub executed: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub created: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub doc_number: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub kbk: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub oktmo: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub payment_basis: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub tax_code: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub tax_doc_num: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub tax_doc_date: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub payer_status: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub uin: String,
}

/// Request body of the operation history endpoint. Unset filters are left
/// out of the JSON object entirely.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
pub struct OperationHistorySearchRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub till: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<u32>,
}
