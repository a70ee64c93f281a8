use std::{fmt, str::FromStr};

use crate::wire::CodecError;

/// Rendered for any value that has no entry in its vocabulary.
pub const UNKNOWN: &str = "unknown";

/// A closed set of values exchanged with the bank as plain strings.
///
/// Rendering never fails: values are built by this library, so a value
/// missing from [`Vocabulary::NAMES`] is rendered as [`UNKNOWN`]. Parsing
/// handles input coming from the bank and fails on anything outside the
/// table.
pub trait Vocabulary: Sized + Copy + PartialEq + 'static {
    /// Name of the value domain, reported in parse errors.
    const DOMAIN: &'static str;
    /// Canonical wire names.
    const NAMES: &'static [(Self, &'static str)];

    fn name(self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(value, _)| *value == self)
            .map(|(_, name)| *name)
            .unwrap_or(UNKNOWN)
    }

    /// Case-insensitive lookup against the canonical names.
    fn parse(input: &str) -> Result<Self, CodecError> {
        Self::NAMES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(input))
            .map(|(value, _)| *value)
            .ok_or_else(|| CodecError::InvalidEnumValue {
                domain: Self::DOMAIN,
                input: input.to_string(),
            })
    }
}

macro_rules! text_traits {
    ($($vocabulary:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $vocabulary {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.name())
                }
            }

            impl FromStr for $vocabulary {
                type Err = CodecError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$vocabulary as Vocabulary>::parse(s)
                }
            }
        )+
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BankAccountCategory {
    CheckingAccount,
    DepositAccount,
    TransitAccount,
    CardAccount,
    DepositRateAccount,
    ReservationAccounting,
}

impl Vocabulary for BankAccountCategory {
    const DOMAIN: &'static str = "bank account category";
    const NAMES: &'static [(Self, &'static str)] = &[
        (Self::CheckingAccount, "CheckingAccount"),
        (Self::DepositAccount, "DepositAccount"),
        (Self::TransitAccount, "TransitAccount"),
        (Self::CardAccount, "CardAccount"),
        (Self::DepositRateAccount, "DepositRateAccount"),
        (Self::ReservationAccounting, "ReservationAccounting"),
    ];
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Currency {
    Rur,
    Usd,
    Eur,
    Cny,
}

impl Vocabulary for Currency {
    const DOMAIN: &'static str = "currency";
    const NAMES: &'static [(Self, &'static str)] = &[
        (Self::Rur, "RUR"),
        (Self::Usd, "USD"),
        (Self::Eur, "EUR"),
        (Self::Cny, "CNY"),
    ];
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BankAccountStatus {
    New,
    Deleted,
    Closed,
    Freezed,
    ToClosed,
    ToOpen,
}

impl Vocabulary for BankAccountStatus {
    const DOMAIN: &'static str = "bank account status";
    const NAMES: &'static [(Self, &'static str)] = &[
        (Self::New, "New"),
        (Self::Deleted, "Deleted"),
        (Self::Closed, "Closed"),
        (Self::Freezed, "Freezed"),
        (Self::ToClosed, "ToClosed"),
        (Self::ToOpen, "ToOpen"),
    ];
}

/// Direction of an operation.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum OperationCategory {
    /// No category. Used as the "any category" filter of a history search,
    /// never sent or accepted on the wire.
    #[default]
    None,
    Debet,
    Credit,
}

impl Vocabulary for OperationCategory {
    const DOMAIN: &'static str = "operation category";
    const NAMES: &'static [(Self, &'static str)] =
        &[(Self::Debet, "Debet"), (Self::Credit, "Credit")];
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OperationStatus {
    SendToBank,
    Executed,
    RejectByBank,
    Canceled,
    Received,
}

impl Vocabulary for OperationStatus {
    const DOMAIN: &'static str = "operation status";
    const NAMES: &'static [(Self, &'static str)] = &[
        (Self::SendToBank, "SendToBank"),
        (Self::Executed, "Executed"),
        (Self::RejectByBank, "RejectByBank"),
        (Self::Canceled, "Canceled"),
        (Self::Received, "Received"),
    ];
}

text_traits!(
    BankAccountCategory,
    Currency,
    BankAccountStatus,
    OperationCategory,
    OperationStatus,
);
