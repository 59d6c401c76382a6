//! Keyword tables behind the rule chains.
//!
//! The built-in sets mirror current SNAP triage policy; a deployment can
//! override individual sets from a TOML file while absent keys keep the
//! defaults. Matching everywhere is case-folded substring containment.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Income side.

/// Inflows that are the household's own money moving around.
pub const EXCLUDE_KEYWORDS: &[&str] = &[
    "transfer",
    "zelle from self",
    "from my account",
    "internal transfer",
];

/// Inflows that are reimbursements, refunds, loans, and similar non-income.
pub const NOT_INCOME_KEYWORDS: &[&str] = &[
    "reimbursement",
    "refund",
    "chargeback",
    "returned item",
    "cash advance",
    "loan",
    "disbursement",
    "venmo transfer between",
    "paypal transfer between",
];

pub const EARNED_KEYWORDS: &[&str] = &[
    "payroll",
    "paycheck",
    "wages",
    "salary",
    "direct deposit",
    "adp",
    "gusto",
    "workday",
    "paychex",
    "square payroll",
];

pub const UNEARNED_KEYWORDS: &[&str] = &[
    "unemployment",
    "social security",
    "ssi",
    "ssdi",
    "pension",
    "child support",
    "alimony",
];

pub const BANK_INTEREST_KEYWORDS: &[&str] = &["interest earned", "interest", "int earned"];

// Expense side.

pub const TRANSFER_KEYWORDS: &[&str] = &[
    "transfer",
    "to savings",
    "internal transfer",
    "zelle to self",
    "venmo to self",
    "cash app to self",
];

pub const CREDIT_CARD_PAYMENT_KEYWORDS: &[&str] = &[
    "credit card payment",
    "cc payment",
    "payment to chase",
    "payment to amex",
    "payment to citi",
    "card payment",
];

pub const SHELTER_KEYWORDS: &[&str] = &[
    "rent",
    "landlord",
    "property mgmt",
    "property management",
    "leasing",
    "apt",
    "apartment",
    "mortgage",
    "mtg",
];

pub const UTILITY_KEYWORDS: &[&str] = &[
    "coned",
    "con ed",
    "con edison",
    "national grid",
    "electric",
    "gas bill",
    "energy",
    "xcel",
    "water",
    "sewer",
    "trash",
    "waste",
    "utility",
    "internet",
    "spectrum",
    "verizon fios",
    "comcast",
    "xfinity",
    "heat",
    "heating",
];

/// Secondary heuristic applied to the merchant name alone when no utility
/// keyword hits directly.
pub const UTILITY_MERCHANT_TERMS: &[&str] = &["energy", "electric", "gas", "utility", "power"];

pub const INTERNET_KEYWORDS: &[&str] = &["internet", "fios", "spectrum", "comcast", "xfinity"];

pub const ELECTRIC_KEYWORDS: &[&str] = &["electric", "coned", "con ed", "con edison", "xcel"];

pub const GAS_KEYWORDS: &[&str] = &["national grid", "gas bill", "gas"];

pub const CHILDCARE_KEYWORDS: &[&str] = &[
    "daycare",
    "childcare",
    "child care",
    "nursery",
    "preschool",
    "after school",
    "babysitter",
    "nanny",
    "care.com",
    "bright horizons",
    "kindercare",
];

pub const MEDICAL_KEYWORDS: &[&str] = &[
    "pharmacy",
    "rx",
    "prescription",
    "copay",
    "co-pay",
    "hospital",
    "clinic",
    "medical",
    "doctor",
    "dental",
    "vision",
    "therap",
    "medicare",
    "medicaid premium",
];

pub const CHILD_SUPPORT_KEYWORDS: &[&str] = &["child support", "support payment", "iv-d", "ocse"];

#[derive(Error, Debug)]
pub enum KeywordConfigError {
    #[error("invalid keyword config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The active keyword sets for one classifier instance.
///
/// Loaded once at startup; the rule chains only borrow it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordSets {
    pub exclude: Vec<String>,
    pub not_income: Vec<String>,
    pub earned: Vec<String>,
    pub unearned: Vec<String>,
    pub bank_interest: Vec<String>,
    pub transfer: Vec<String>,
    pub credit_card_payment: Vec<String>,
    pub shelter: Vec<String>,
    pub utility: Vec<String>,
    pub utility_merchant_terms: Vec<String>,
    pub internet: Vec<String>,
    pub electric: Vec<String>,
    pub gas: Vec<String>,
    pub childcare: Vec<String>,
    pub medical: Vec<String>,
    pub child_support: Vec<String>,
}

impl Default for KeywordSets {
    fn default() -> Self {
        KeywordSets {
            exclude: owned(EXCLUDE_KEYWORDS),
            not_income: owned(NOT_INCOME_KEYWORDS),
            earned: owned(EARNED_KEYWORDS),
            unearned: owned(UNEARNED_KEYWORDS),
            bank_interest: owned(BANK_INTEREST_KEYWORDS),
            transfer: owned(TRANSFER_KEYWORDS),
            credit_card_payment: owned(CREDIT_CARD_PAYMENT_KEYWORDS),
            shelter: owned(SHELTER_KEYWORDS),
            utility: owned(UTILITY_KEYWORDS),
            utility_merchant_terms: owned(UTILITY_MERCHANT_TERMS),
            internet: owned(INTERNET_KEYWORDS),
            electric: owned(ELECTRIC_KEYWORDS),
            gas: owned(GAS_KEYWORDS),
            childcare: owned(CHILDCARE_KEYWORDS),
            medical: owned(MEDICAL_KEYWORDS),
            child_support: owned(CHILD_SUPPORT_KEYWORDS),
        }
    }
}

impl KeywordSets {
    /// Parses a TOML override. Keys absent from the document keep their
    /// built-in defaults.
    pub fn from_toml(toml_content: &str) -> Result<Self, KeywordConfigError> {
        let mut sets: KeywordSets = toml::from_str(toml_content)?;
        sets.fold_case();
        Ok(sets)
    }

    /// Matching lowers the transaction text, never the keyword, so stored
    /// keywords must themselves be lowercase.
    fn fold_case(&mut self) {
        let sets = [
            &mut self.exclude,
            &mut self.not_income,
            &mut self.earned,
            &mut self.unearned,
            &mut self.bank_interest,
            &mut self.transfer,
            &mut self.credit_card_payment,
            &mut self.shelter,
            &mut self.utility,
            &mut self.utility_merchant_terms,
            &mut self.internet,
            &mut self.electric,
            &mut self.gas,
            &mut self.childcare,
            &mut self.medical,
            &mut self.child_support,
        ];
        for set in sets {
            for keyword in set.iter_mut() {
                *keyword = keyword.trim().to_lowercase();
            }
        }
    }
}

fn owned(set: &[&str]) -> Vec<String> {
    set.iter().map(|k| k.to_string()).collect()
}
