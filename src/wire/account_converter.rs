use crate::model::{
    AccountInfo, BankAccount, BankAccountCategory, BankAccountStatus, Currency, TimestampCodec,
    Vocabulary,
};

use super::{AccountInfoRecord, BankAccountRecord, CodecError};

impl AccountInfo {
    /// Fails on the first account that does not decode; no partially
    /// decoded company is returned.
    pub fn from_wire(
        record: AccountInfoRecord,
        timestamps: &TimestampCodec,
    ) -> Result<Self, CodecError> {
        let AccountInfoRecord {
            company_id,
            company_name,
            bank_accounts,
        } = record;
        Ok(Self {
            company_id,
            company_name,
            bank_accounts: bank_accounts
                .into_iter()
                .map(|account| BankAccount::from_wire(account, timestamps))
                .collect::<Result<_, _>>()?,
        })
    }

    pub fn to_wire(&self, timestamps: &TimestampCodec) -> AccountInfoRecord {
        AccountInfoRecord {
            company_id: self.company_id.clone(),
            company_name: self.company_name.clone(),
            bank_accounts: self
                .bank_accounts
                .iter()
                .map(|account| account.to_wire(timestamps))
                .collect(),
        }
    }
}

impl BankAccount {
    pub fn from_wire(
        record: BankAccountRecord,
        timestamps: &TimestampCodec,
    ) -> Result<Self, CodecError> {
        let BankAccountRecord {
            id,
            account_name,
            balance,
            bank_bic,
            bank_inn,
            bank_kpp,
            bank_correspondent_account,
            bank_name,
            begin_date,
            category,
            currency,
            number,
            status,
        } = record;
        Ok(Self {
            id,
            account_name,
            balance,
            bank_bic,
            bank_inn,
            bank_kpp,
            bank_correspondent_account,
            bank_name,
            begin_date: timestamps.decode(&begin_date)?,
            category: BankAccountCategory::parse(&category)?,
            currency: Currency::parse(&currency)?,
            number,
            status: BankAccountStatus::parse(&status)?,
        })
    }

    pub fn to_wire(&self, timestamps: &TimestampCodec) -> BankAccountRecord {
        BankAccountRecord {
            id: self.id.clone(),
            account_name: self.account_name.clone(),
            balance: self.balance,
            bank_bic: self.bank_bic.clone(),
            bank_inn: self.bank_inn.clone(),
            bank_kpp: self.bank_kpp.clone(),
            bank_correspondent_account: self.bank_correspondent_account.clone(),
            bank_name: self.bank_name.clone(),
            begin_date: timestamps.encode(&self.begin_date),
            category: self.category.name().to_string(),
            currency: self.currency.name().to_string(),
            number: self.number.clone(),
            status: self.status.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use rstest::rstest;

    use crate::model::{
        AccountInfo, BankAccount, BankAccountCategory, BankAccountStatus, Currency,
        TimestampCodec,
    };
    use crate::wire::{AccountInfoRecord, BankAccountRecord, CodecError};

    fn account_record() -> BankAccountRecord {
        BankAccountRecord {
            id: "acc-1".to_string(),
            account_name: "Main".to_string(),
            balance: 1500.25,
            bank_bic: "044525092".to_string(),
            bank_inn: "2204000595".to_string(),
            bank_kpp: "771543001".to_string(),
            bank_correspondent_account: "30101810645250000092".to_string(),
            bank_name: "MODULBANK".to_string(),
            begin_date: "2019-05-20T00:00:00".to_string(),
            category: "checkingaccount".to_string(),
            currency: "rur".to_string(),
            number: "40702810070010113722".to_string(),
            status: "new".to_string(),
        }
    }

    #[test]
    fn bank_account_is_decoded_field_by_field() {
        let codec = TimestampCodec::moscow();
        let account = BankAccount::from_wire(account_record(), &codec).unwrap();

        assert_eq!(account.id, "acc-1");
        assert_eq!(account.balance, 1500.25);
        assert_eq!(account.bank_correspondent_account, "30101810645250000092");
        assert_eq!(
            account.begin_date,
            codec.zone().with_ymd_and_hms(2019, 5, 20, 0, 0, 0).unwrap()
        );
        assert_eq!(account.category, BankAccountCategory::CheckingAccount);
        assert_eq!(account.currency, Currency::Rur);
        assert_eq!(account.status, BankAccountStatus::New);
    }

    #[test]
    fn encoding_renders_canonical_names() {
        let codec = TimestampCodec::moscow();
        let account = BankAccount::from_wire(account_record(), &codec).unwrap();
        let record = account.to_wire(&codec);

        assert_eq!(record.category, "CheckingAccount");
        assert_eq!(record.currency, "RUR");
        assert_eq!(record.status, "New");
        assert_eq!(record.begin_date, "2019-05-20T00:00:00");
        assert_eq!(BankAccount::from_wire(record, &codec).unwrap(), account);
    }

    #[rstest]
    #[case(BankAccountRecord { category: "Savings".to_string(), ..account_record() }, "bank account category")]
    #[case(BankAccountRecord { currency: "GBP".to_string(), ..account_record() }, "currency")]
    #[case(BankAccountRecord { status: "Open".to_string(), ..account_record() }, "bank account status")]
    fn unknown_vocabulary_fails_the_account(
        #[case] record: BankAccountRecord,
        #[case] expected_domain: &str,
    ) {
        assert_matches!(
            BankAccount::from_wire(record, &TimestampCodec::moscow()),
            Err(CodecError::InvalidEnumValue { domain, .. }) if domain == expected_domain
        );
    }

    #[test]
    fn first_failing_field_is_reported() {
        let record = BankAccountRecord {
            begin_date: "20.05.2019".to_string(),
            currency: "GBP".to_string(),
            ..account_record()
        };
        assert_eq!(
            BankAccount::from_wire(record, &TimestampCodec::moscow()),
            Err(CodecError::MalformedTimestamp {
                input: "20.05.2019".to_string()
            })
        );
    }

    #[test]
    fn one_bad_account_discards_the_whole_company() {
        let record = AccountInfoRecord {
            company_id: "c1".to_string(),
            company_name: "Acme".to_string(),
            bank_accounts: vec![
                account_record(),
                BankAccountRecord {
                    status: "Gone".to_string(),
                    ..account_record()
                },
            ],
        };
        assert_matches!(
            AccountInfo::from_wire(record, &TimestampCodec::moscow()),
            Err(CodecError::InvalidEnumValue { .. })
        );
    }
}
