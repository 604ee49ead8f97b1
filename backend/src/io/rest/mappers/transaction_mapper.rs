use crate::domain::models::{coerce_amount, parse_date_only, Transaction as DomainTransaction};
use shared::BankingTransaction;
use tracing::warn;

pub struct TransactionMapper;

impl TransactionMapper {
    pub fn to_domain(dto: BankingTransaction) -> DomainTransaction {
        let date = parse_date_only(&dto.transaction_date);
        if date.is_none() {
            warn!(
                "Transaction {:?} has an invalid date '{}'",
                dto.id, dto.transaction_date
            );
        }

        DomainTransaction {
            id: dto.id,
            amount: coerce_amount(&dto.amount),
            raw_date: dto.transaction_date,
            date,
            day_of_month: dto.transaction_day,
            merchant_name: dto.merchant_name,
            subscription_merchant_key: dto.subscription_merchant_key,
            subscription_name: dto.subscription_name,
            currency: dto.currency,
        }
    }

    pub fn to_domain_list(dtos: Vec<BankingTransaction>) -> Vec<DomainTransaction> {
        dtos.into_iter().map(Self::to_domain).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn banking_transaction(date: &str, amount: serde_json::Value) -> BankingTransaction {
        BankingTransaction {
            id: Some("tx-1".to_string()),
            transaction_date: date.to_string(),
            transaction_day: Some(29),
            amount,
            merchant_name: Some("NETFLIX.COM".to_string()),
            subscription_merchant_key: Some("netflix".to_string()),
            subscription_name: Some("Netflix".to_string()),
            currency: Some("MYR".to_string()),
        }
    }

    #[test]
    fn test_to_domain() {
        let domain = TransactionMapper::to_domain(banking_transaction("2024-02-29", json!(45)));

        assert_eq!(domain.id.as_deref(), Some("tx-1"));
        assert_eq!(domain.date, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(domain.day_of_month, Some(29));
        assert_eq!(domain.amount, 45.0);
        assert_eq!(domain.merchant_key(), "netflix");
        assert_eq!(domain.display_name(), "Netflix");
        assert_eq!(domain.currency.as_deref(), Some("MYR"));
    }

    #[test]
    fn test_to_domain_coerces_bad_amount() {
        let domain = TransactionMapper::to_domain(banking_transaction("2024-02-29", json!("n/a")));
        assert_eq!(domain.amount, 0.0);

        let domain = TransactionMapper::to_domain(banking_transaction("2024-02-29", json!(null)));
        assert_eq!(domain.amount, 0.0);
    }

    #[test]
    fn test_to_domain_keeps_invalid_date() {
        let domain = TransactionMapper::to_domain(banking_transaction("29/02/2024", json!(45)));

        assert_eq!(domain.date, None);
        assert_eq!(domain.raw_date, "29/02/2024");
    }
}
