use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionDirection {
    Inflow,
    Outflow,
}

impl fmt::Display for TransactionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionDirection::Inflow => write!(f, "INFLOW"),
            TransactionDirection::Outflow => write!(f, "OUTFLOW"),
        }
    }
}

impl FromStr for TransactionDirection {
    type Err = ();

    /// Lenient parse: trims and case-folds. Unrecognized strings are an
    /// `Err` so callers can carry them as `None` instead of failing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INFLOW" => Ok(TransactionDirection::Inflow),
            "OUTFLOW" => Ok(TransactionDirection::Outflow),
            _ => Err(()),
        }
    }
}

/// Merchant/category taxonomy codes supplied by an external enrichment
/// service (e.g. `primary: "RENT_AND_UTILITIES"`, `detailed:
/// "RENT_AND_UTILITIES_GAS_AND_ELECTRICITY"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalFinanceCategory {
    #[serde(default)]
    pub primary: String,
    #[serde(default)]
    pub detailed: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// A single bank-statement transaction as handed to the classifier.
///
/// Mandatory shape is minimal (description, amount, direction); everything
/// else is optional metadata from CSV columns or an enrichment merge. The
/// classifier only reads a transaction, never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<TransactionDirection>,
    /// Free-form upstream hint. Conventionally "income" or "expense", but
    /// extractors also emit richer values ("payroll", "interest") that the
    /// rules probe by substring, so this is deliberately not an enum.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default = "default_currency")]
    pub iso_currency_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_finance_category: Option<PersonalFinanceCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcc: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Transaction {
    pub fn new(description: &str, amount: Decimal, direction: TransactionDirection) -> Self {
        Transaction {
            id: None,
            date: None,
            description: description.to_string(),
            amount: Some(amount),
            direction: Some(direction),
            kind: None,
            iso_currency_code: default_currency(),
            merchant_name: None,
            personal_finance_category: None,
            payment_channel: None,
            location: None,
            date_posted: None,
            mcc: None,
        }
    }

    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.to_string());
        self
    }

    pub fn with_merchant_name(mut self, merchant_name: &str) -> Self {
        self.merchant_name = Some(merchant_name.to_string());
        self
    }

    pub fn with_category(mut self, primary: &str, detailed: &str) -> Self {
        self.personal_finance_category = Some(PersonalFinanceCategory {
            primary: primary.to_string(),
            detailed: detailed.to_string(),
        });
        self
    }
}
