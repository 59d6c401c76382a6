use serde::{Deserialize, Serialize};
use std::fmt;

/// How sure the rules engine is about a verdict. Defaults to Medium;
/// anything ambiguous gets Low and a review flag rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeState {
    CountableIncome,
    ExcludedIncome,
    NotIncome,
    FlagForReview,
}

impl fmt::Display for IncomeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncomeState::CountableIncome => write!(f, "COUNTABLE_INCOME"),
            IncomeState::ExcludedIncome => write!(f, "EXCLUDED_INCOME"),
            IncomeState::NotIncome => write!(f, "NOT_INCOME"),
            IncomeState::FlagForReview => write!(f, "FLAG_FOR_REVIEW"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncomeType {
    EarnedIncome,
    UnearnedIncome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseState {
    CountableDeduction,
    NotDeductible,
    NotExpense,
    FlagForReview,
}

impl fmt::Display for ExpenseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseState::CountableDeduction => write!(f, "COUNTABLE_DEDUCTION"),
            ExpenseState::NotDeductible => write!(f, "NOT_DEDUCTIBLE"),
            ExpenseState::NotExpense => write!(f, "NOT_EXPENSE"),
            ExpenseState::FlagForReview => write!(f, "FLAG_FOR_REVIEW"),
        }
    }
}

/// SNAP deduction buckets. `None` marks transactions that are definitively
/// an expense but never deductible (e.g. credit-card payments).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeductionType {
    Shelter,
    Utilities,
    Medical,
    Childcare,
    ChildSupportPaid,
    LegalChildSupport,
    None,
}

/// Verdict of the income classifier for one transaction.
///
/// Immutable value created once per call; optional fields are omitted from
/// the serialized form when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapClassification {
    pub final_state: IncomeState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_type: Option<IncomeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<String>,
    #[serde(default)]
    pub confidence: Confidence,
}

impl SnapClassification {
    pub fn new(final_state: IncomeState, reason_code: &str, confidence: Confidence) -> Self {
        SnapClassification {
            final_state,
            income_type: None,
            category: None,
            reason_code: Some(reason_code.to_string()),
            confidence,
        }
    }

    pub fn countable(
        income_type: IncomeType,
        category: &str,
        reason_code: &str,
        confidence: Confidence,
    ) -> Self {
        SnapClassification {
            final_state: IncomeState::CountableIncome,
            income_type: Some(income_type),
            category: Some(category.to_string()),
            reason_code: Some(reason_code.to_string()),
            confidence,
        }
    }
}

/// Verdict of the expense/deduction classifier for one transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseClassification {
    pub final_state: ExpenseState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deduction_type: Option<DeductionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<String>,
    #[serde(default)]
    pub confidence: Confidence,
}

impl ExpenseClassification {
    pub fn new(final_state: ExpenseState, reason_code: &str, confidence: Confidence) -> Self {
        ExpenseClassification {
            final_state,
            deduction_type: None,
            category: None,
            reason_code: Some(reason_code.to_string()),
            confidence,
        }
    }

    pub fn deduction(
        deduction_type: DeductionType,
        category: &str,
        reason_code: &str,
        confidence: Confidence,
    ) -> Self {
        ExpenseClassification {
            final_state: ExpenseState::CountableDeduction,
            deduction_type: Some(deduction_type),
            category: Some(category.to_string()),
            reason_code: Some(reason_code.to_string()),
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn income_result_omits_unset_fields() {
        let c = SnapClassification::new(IncomeState::NotIncome, "OUTFLOW_TRANSACTION", Confidence::High);
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["final_state"], "NOT_INCOME");
        assert_eq!(json["confidence"], "high");
        assert_eq!(json["reason_code"], "OUTFLOW_TRANSACTION");
        assert!(json.get("income_type").is_none());
        assert!(json.get("category").is_none());
    }

    #[test]
    fn income_result_serializes_all_set_fields() {
        let c = SnapClassification::countable(
            IncomeType::EarnedIncome,
            "WAGES_OR_PAYROLL",
            "EARNED_INCOME_SOURCE",
            Confidence::Medium,
        );
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["final_state"], "COUNTABLE_INCOME");
        assert_eq!(json["income_type"], "EARNED_INCOME");
        assert_eq!(json["category"], "WAGES_OR_PAYROLL");
        assert_eq!(json["confidence"], "medium");
    }

    #[test]
    fn expense_result_serializes_deduction_type() {
        let c = ExpenseClassification::deduction(
            DeductionType::ChildSupportPaid,
            "CHILD_SUPPORT",
            "CHILD_SUPPORT_PAYMENT",
            Confidence::Medium,
        );
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["final_state"], "COUNTABLE_DEDUCTION");
        assert_eq!(json["deduction_type"], "CHILD_SUPPORT_PAID");
    }

    #[test]
    fn confidence_defaults_to_medium() {
        assert_eq!(Confidence::default(), Confidence::Medium);
        let c: SnapClassification =
            serde_json::from_str(r#"{"final_state": "FLAG_FOR_REVIEW"}"#).unwrap();
        assert_eq!(c.confidence, Confidence::Medium);
    }

    #[test]
    fn confidence_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Confidence::High).unwrap(), "\"high\"");
        assert_eq!(format!("{}", Confidence::Low), "low");
    }
}
