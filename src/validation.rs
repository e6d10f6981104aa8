//! Turning raw donation submissions into checked `NewDonation`s.
//!
//! Fields arrive as loose JSON so that a wrong type (`"amount": "10"`) is
//! reported as a validation error with our own message instead of a
//! deserializer rejection. Checks run in a fixed order and the first failure
//! wins: numbers, amount, method, donor fields.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::error::AppError;

pub const MIN_NUMBER: i32 = 1;
pub const MAX_NUMBER: i32 = 80;
/// Largest accepted donation amount. Keeps the `raised` total of a full
/// board far inside `i64`.
pub const MAX_AMOUNT: i64 = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Venmo,
    Cashapp,
    Paypal,
    Zelle,
    Manual,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Venmo,
        PaymentMethod::Cashapp,
        PaymentMethod::Paypal,
        PaymentMethod::Zelle,
        PaymentMethod::Manual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Venmo => "venmo",
            PaymentMethod::Cashapp => "cashapp",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::Zelle => "zelle",
            PaymentMethod::Manual => "manual",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                AppError::InvalidRequest(format!(
                    "method must be one of venmo, cashapp, paypal, zelle, manual (got {:?})",
                    s
                ))
            })
    }
}

/// Body of `POST /api/donations`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    /// Amount pledged, a positive integer
    #[serde(default)]
    #[schema(value_type = i64, example = 10)]
    pub amount: Option<Value>,
    /// Slot numbers being claimed, each between 1 and 80
    #[serde(default)]
    #[schema(value_type = Vec<i32>, example = json!([3, 7]))]
    pub numbers: Option<Value>,
    /// Payment method
    #[serde(default)]
    #[schema(value_type = PaymentMethod)]
    pub method: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String)]
    pub donor_name: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String)]
    pub donor_phone: Option<Value>,
    #[serde(default)]
    #[schema(value_type = String)]
    pub donor_address: Option<Value>,
}

/// A donation that passed validation and is ready for the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDonation {
    pub amount: i64,
    /// Ascending, no duplicates.
    pub numbers: Vec<i32>,
    pub method: PaymentMethod,
    pub donor_name: String,
    pub donor_phone: String,
    pub donor_address: String,
}

impl DonationRequest {
    pub fn validate(&self) -> Result<NewDonation, AppError> {
        let numbers = parse_numbers(self.numbers.as_ref())?;
        let amount = parse_amount(self.amount.as_ref())?;
        let method = parse_method(self.method.as_ref())?;
        let donor_name = required_text(self.donor_name.as_ref(), "donorName")?;
        let donor_phone = required_text(self.donor_phone.as_ref(), "donorPhone")?;
        let donor_address = required_text(self.donor_address.as_ref(), "donorAddress")?;

        Ok(NewDonation {
            amount,
            numbers,
            method,
            donor_name,
            donor_phone,
            donor_address,
        })
    }
}

/// Non-empty array of integers within the slot range, collapsed to a sorted set.
pub fn parse_numbers(raw: Option<&Value>) -> Result<Vec<i32>, AppError> {
    let items = match raw {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => {
            return Err(AppError::InvalidRequest(
                "numbers must be a non-empty list of integers".to_string(),
            ))
        }
    };

    let mut numbers = BTreeSet::new();
    for item in items {
        let n = item
            .as_i64()
            .ok_or_else(|| {
                AppError::InvalidRequest("numbers must be a non-empty list of integers".to_string())
            })?;
        let n = i32::try_from(n)
            .ok()
            .filter(|n| (MIN_NUMBER..=MAX_NUMBER).contains(n))
            .ok_or_else(|| {
                AppError::InvalidRequest(format!(
                    "numbers must be between {} and {} (got {})",
                    MIN_NUMBER, MAX_NUMBER, n
                ))
            })?;
        numbers.insert(n);
    }

    Ok(numbers.into_iter().collect())
}

pub fn parse_amount(raw: Option<&Value>) -> Result<i64, AppError> {
    let amount = raw
        .and_then(Value::as_i64)
        .filter(|amount| *amount > 0)
        .ok_or_else(|| AppError::InvalidRequest("amount must be a positive integer".to_string()))?;
    if amount > MAX_AMOUNT {
        return Err(AppError::InvalidRequest(format!(
            "amount must not exceed {}",
            MAX_AMOUNT
        )));
    }
    Ok(amount)
}

fn parse_method(raw: Option<&Value>) -> Result<PaymentMethod, AppError> {
    match raw {
        Some(Value::String(s)) => s.parse(),
        _ => Err(AppError::InvalidRequest(
            "method must be one of venmo, cashapp, paypal, zelle, manual".to_string(),
        )),
    }
}

fn required_text(raw: Option<&Value>, field: &str) -> Result<String, AppError> {
    match raw {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(AppError::InvalidRequest(format!("{} is required", field))),
    }
}
