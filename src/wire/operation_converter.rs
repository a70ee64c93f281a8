use crate::model::{
    Currency, Operation, OperationCategory, OperationHistorySearch, OperationStatus,
    TimestampCodec, Vocabulary,
};

use super::{CodecError, OperationHistorySearchRecord, OperationRecord};

impl Operation {
    pub fn from_wire(
        record: OperationRecord,
        timestamps: &TimestampCodec,
    ) -> Result<Self, CodecError> {
        let OperationRecord {
            id,
            company_id,
            status,
            category,
            contragent_name,
            contragent_inn,
            contragent_kpp,
            contragent_bank_account_number,
            contragent_bank_name,
            contragent_bank_bic,
            currency,
            amount,
            amount_with_commission,
            bank_account_number,
            payment_purpose,
            executed,
            created,
            doc_number,
            kbk,
            oktmo,
            payment_basis,
            tax_code,
            tax_doc_num,
            tax_doc_date,
            payer_status,
            uin,
        } = record;
        Ok(Self {
            id,
            company_id,
            status: OperationStatus::parse(&status)?,
            category: OperationCategory::parse(&category)?,
            contragent_name,
            contragent_inn,
            contragent_kpp,
            contragent_bank_account_number,
            contragent_bank_name,
            contragent_bank_bic,
            currency: Currency::parse(&currency)?,
            amount,
            amount_with_commission,
            bank_account_number,
            payment_purpose,
            executed: timestamps.decode(&executed)?,
            created: timestamps.decode(&created)?,
            doc_number,
            kbk,
            oktmo,
            payment_basis,
            tax_code,
            tax_doc_num,
            tax_doc_date,
            payer_status,
            uin,
        })
    }

    pub fn to_wire(&self, timestamps: &TimestampCodec) -> OperationRecord {
        OperationRecord {
            id: self.id.clone(),
            company_id: self.company_id.clone(),
            status: self.status.name().to_string(),
            category: self.category.name().to_string(),
            contragent_name: self.contragent_name.clone(),
            contragent_inn: self.contragent_inn.clone(),
            contragent_kpp: self.contragent_kpp.clone(),
            contragent_bank_account_number: self.contragent_bank_account_number.clone(),
            contragent_bank_name: self.contragent_bank_name.clone(),
            contragent_bank_bic: self.contragent_bank_bic.clone(),
            currency: self.currency.name().to_string(),
            amount: self.amount,
            amount_with_commission: self.amount_with_commission,
            bank_account_number: self.bank_account_number.clone(),
            payment_purpose: self.payment_purpose.clone(),
            executed: timestamps.encode(&self.executed),
            created: timestamps.encode(&self.created),
            doc_number: self.doc_number.clone(),
            kbk: self.kbk.clone(),
            oktmo: self.oktmo.clone(),
            payment_basis: self.payment_basis.clone(),
            tax_code: self.tax_code.clone(),
            tax_doc_num: self.tax_doc_num.clone(),
            tax_doc_date: self.tax_doc_date.clone(),
            payer_status: self.payer_status.clone(),
            uin: self.uin.clone(),
        }
    }
}

impl OperationHistorySearch {
    pub fn to_wire(&self, timestamps: &TimestampCodec) -> OperationHistorySearchRecord {
        OperationHistorySearchRecord {
            category: (self.category != OperationCategory::None)
                .then(|| self.category.name().to_string()),
            from: self.from.map(|from| timestamps.encode(&from)),
            till: self.till.map(|till| timestamps.encode(&till)),
            skip: (self.skip != 0).then_some(self.skip),
            records: (self.records != 0).then_some(self.records),
        }
    }
}
