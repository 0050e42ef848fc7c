//! Contract entity model and DTOs.

use chrono::NaiveDate;
use minicrm_core::contract::ContractStatus;
use minicrm_core::types::{DbId, Timestamp};
use minicrm_core::validation::{date_range, non_negative, not_blank};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A row from the `contracts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contract {
    pub id: DbId,
    pub client_id: DbId,
    pub title: String,
    pub amount: Decimal,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub status: ContractStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A contract joined with its client's name, as returned by list/get.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContractWithClient {
    pub id: DbId,
    pub client_id: DbId,
    pub client_name: String,
    pub title: String,
    pub amount: Decimal,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub status: ContractStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new contract.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_create_dates"))]
pub struct CreateContract {
    pub client_id: DbId,
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: String,
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Defaults to `en_cours` if omitted.
    pub status: Option<ContractStatus>,
}

/// DTO for updating an existing contract. All fields are optional.
///
/// Dates present in the payload are checked against each other here;
/// `ContractRepo::update` checks the merged range against the stored row.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_update_dates"))]
pub struct UpdateContract {
    pub client_id: Option<DbId>,
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: Option<String>,
    #[validate(custom(function = "non_negative"))]
    pub amount: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<ContractStatus>,
}

fn validate_create_dates(input: &CreateContract) -> Result<(), ValidationError> {
    date_range(input.start_date, input.end_date)
}

fn validate_update_dates(input: &UpdateContract) -> Result<(), ValidationError> {
    date_range(input.start_date, input.end_date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn contract(amount: &str) -> CreateContract {
        CreateContract {
            client_id: 1,
            title: "Hosting 2026".to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            start_date: None,
            end_date: None,
            status: None,
        }
    }

    #[test]
    fn accepts_zero_amount() {
        assert!(contract("0").validate().is_ok());
    }

    #[test]
    fn rejects_negative_amount() {
        let errors = contract("-1").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }

    #[test]
    fn rejects_blank_title() {
        let mut input = contract("10");
        input.title = "   ".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn rejects_inverted_dates() {
        let mut input = contract("10");
        input.start_date = NaiveDate::from_ymd_opt(2026, 5, 1);
        input.end_date = NaiveDate::from_ymd_opt(2026, 4, 1);
        assert!(input.validate().is_err());
    }

    #[test]
    fn status_deserializes_from_storage_name() {
        let input: CreateContract = serde_json::from_value(serde_json::json!({
            "client_id": 3,
            "title": "Maintenance",
            "amount": 250.5,
            "status": "actif"
        }))
        .unwrap();
        assert_eq!(input.status, Some(ContractStatus::Actif));
        assert_eq!(input.amount, Decimal::from_str("250.5").unwrap());
    }
}
