use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Account, Amount};

/// Body of `POST /v1/accounts`.
#[derive(Debug, Deserialize, PartialEq)]
pub struct CreateAccountRequest {
    pub id: String,
    #[serde(default)]
    pub balance: Decimal,
}

impl From<CreateAccountRequest> for Account {
    fn from(request: CreateAccountRequest) -> Self {
        Account::with_balance(request.id, request.balance)
    }
}

/// Parameters of `POST /v1/accounts/transfers`, from the query string or a form body.
#[derive(Debug, Deserialize, PartialEq)]
pub struct TransferParams {
    #[serde(rename = "accountFrom")]
    pub account_from: String,
    #[serde(rename = "accountTo")]
    pub account_to: String,
    pub amount: Decimal,
}

impl TransferParams {
    /// Validates the amount sign, the only check left to the boundary.
    pub fn amount(&self) -> Result<Amount, crate::Error> {
        Amount::new(self.amount)
    }
}

/// Account as rendered by `GET /v1/accounts/{id}`.
///
/// The balance is serialized as a decimal string so no precision is lost.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AccountResponse {
    pub id: String,
    pub balance: Decimal,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            balance: account.balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_create_request_with_balance() {
        let request: CreateAccountRequest =
            serde_json::from_str(r#"{"id":"Id-123","balance":1000}"#).unwrap();
        assert_eq!(
            request,
            CreateAccountRequest {
                id: "Id-123".to_string(),
                balance: dec!(1000),
            }
        );
    }

    #[test]
    fn test_parse_create_request_fractional_balance_is_exact() {
        let request: CreateAccountRequest =
            serde_json::from_str(r#"{"id":"a","balance":0.1}"#).unwrap();
        assert_eq!(request.balance, dec!(0.1));

        let request: CreateAccountRequest =
            serde_json::from_str(r#"{"id":"a","balance":"123.4567"}"#).unwrap();
        assert_eq!(request.balance, dec!(123.4567));
    }

    #[test]
    fn test_parse_create_request_keeps_every_digit() {
        let request: CreateAccountRequest =
            serde_json::from_str(r#"{"id":"a","balance":1234567890.123456789}"#).unwrap();
        assert_eq!(request.balance, dec!(1234567890.123456789));

        let request: CreateAccountRequest =
            serde_json::from_str(r#"{"id":"a","balance":0.30000000000000004441}"#).unwrap();
        assert_eq!(request.balance, dec!(0.30000000000000004441));
    }

    #[test]
    fn test_parse_create_request_defaults_balance() {
        let request: CreateAccountRequest = serde_json::from_str(r#"{"id":"Id-123"}"#).unwrap();
        assert_eq!(request.balance, Decimal::ZERO);
    }

    #[test]
    fn test_parse_create_request_missing_id() {
        let result: Result<CreateAccountRequest, _> = serde_json::from_str(r#"{"balance":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_transfer_params_amount_sign() {
        let params = TransferParams {
            account_from: "001".to_string(),
            account_to: "002".to_string(),
            amount: dec!(-1),
        };
        assert_eq!(params.amount(), Err(crate::Error::NegativeAmount));
    }

    #[test]
    fn test_account_response_serializes_balance_as_string() {
        let response = AccountResponse::from(Account::with_balance("001", dec!(400.0)));
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"id":"001","balance":"400.0"}"#
        );
    }
}
