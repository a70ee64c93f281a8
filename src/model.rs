mod timestamp;
mod vocabulary;

use chrono::{DateTime, FixedOffset};

pub use timestamp::{TimestampCodec, MOSCOW_UTC_OFFSET_SECS, TIMESTAMP_PATTERN};
pub use vocabulary::{
    BankAccountCategory, BankAccountStatus, Currency, OperationCategory, OperationStatus,
    Vocabulary, UNKNOWN,
};

/// A company the token has access to, together with its accounts.
#[derive(Debug, PartialEq, Clone)]
pub struct AccountInfo {
    pub company_id: String,
    pub company_name: String,
    pub bank_accounts: Vec<BankAccount>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct BankAccount {
    pub id: String,
    pub account_name: String,
    pub balance: f64,
    pub bank_bic: String,
    pub bank_inn: String,
    pub bank_kpp: String,
    pub bank_correspondent_account: String,
    pub bank_name: String,
    pub begin_date: DateTime<FixedOffset>,
    pub category: BankAccountCategory,
    pub currency: Currency,
    pub number: String,
    pub status: BankAccountStatus,
}

/// A single entry of an account's operation history.
///
/// The contragent is the other side of the payment. The fields after
/// `doc_number` are the Russian tax payment requisites, kept as the bank
/// sends them; the numbers in brackets are the payment order field codes.
#[derive(Debug, PartialEq, Clone)]
pub struct Operation {
    pub id: String,
    pub company_id: String,
    pub status: OperationStatus,
    pub category: OperationCategory,
    pub contragent_name: String,
    pub contragent_inn: String,
    pub contragent_kpp: String,
    pub contragent_bank_account_number: String,
    pub contragent_bank_name: String,
    pub contragent_bank_bic: String,
    pub currency: Currency,
    pub amount: f64,
    pub amount_with_commission: f64,
    pub bank_account_number: String,
    pub payment_purpose: String,
    pub executed: DateTime<FixedOffset>,
    pub created: DateTime<FixedOffset>,
    pub doc_number: String,
    /// Budget classification code (104).
    pub kbk: String,
    /// Municipality code (105).
    pub oktmo: String,
    /// (106)
    pub payment_basis: String,
    pub tax_code: String,
    /// (108)
    pub tax_doc_num: String,
    /// (109)
    pub tax_doc_date: String,
    /// (101)
    pub payer_status: String,
    /// Unique payment identifier.
    pub uin: String,
}

/// Filter for an operation history query.
///
/// Fields left at their default are not sent, and the bank applies its own
/// defaults for them.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct OperationHistorySearch {
    pub category: OperationCategory,
    pub from: Option<DateTime<FixedOffset>>,
    pub till: Option<DateTime<FixedOffset>>,
    /// Offset.
    pub skip: u32,
    /// Limit.
    pub records: u32,
}

impl OperationHistorySearch {
    pub fn category(mut self, category: OperationCategory) -> Self {
        self.category = category;
        self
    }

    pub fn since(mut self, from: DateTime<FixedOffset>) -> Self {
        self.from = Some(from);
        self
    }

    pub fn until(mut self, till: DateTime<FixedOffset>) -> Self {
        self.till = Some(till);
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = skip;
        self
    }

    pub fn records(mut self, records: u32) -> Self {
        self.records = records;
        self
    }
}
