//! The two rule chains. Each rule is a pure function that either returns a
//! fully populated verdict or declines with `None`; the chains are fixed
//! priority orders and the first verdict wins. Every rule re-derives its
//! own predicates from the raw transaction, so no rule depends on an
//! earlier one having run.

use elig_core::{
    Confidence, DeductionType, ExpenseClassification, ExpenseState, IncomeState, IncomeType,
    SnapClassification, Transaction, TransactionDirection,
};
use rust_decimal::Decimal;

use crate::helpers::{
    contains_any_keyword, is_utility_category, matches_utility_keyword, normalized,
};
use crate::keywords::KeywordSets;

pub(crate) type IncomeRuleFn = fn(&Transaction, &KeywordSets) -> Option<SnapClassification>;
pub(crate) type ExpenseRuleFn = fn(&Transaction, &KeywordSets) -> Option<ExpenseClassification>;

/// Income chain, highest priority first.
pub(crate) const INCOME_RULES: &[(&str, IncomeRuleFn)] = &[
    ("not_inflow_or_nonpositive", not_inflow_or_nonpositive),
    ("not_income_keywords", not_income_keywords),
    ("exclude_keywords", exclude_keywords),
    ("earned_income", earned_income),
    ("unearned_income", unearned_income),
    ("bank_interest", bank_interest),
    ("gift_or_irregular", gift_or_irregular),
];

/// Expense chain, highest priority first.
pub(crate) const EXPENSE_RULES: &[(&str, ExpenseRuleFn)] = &[
    ("missing_amount", missing_amount),
    ("not_expense", not_expense),
    ("transfer_keywords", transfer_keywords),
    ("credit_card_payment", credit_card_payment),
    ("shelter", shelter),
    ("utilities", utilities),
    ("childcare", childcare),
    ("medical", medical),
    ("child_support", child_support),
];

fn description(tx: &Transaction) -> String {
    normalized(&tx.description)
}

fn kind(tx: &Transaction) -> String {
    normalized(tx.kind.as_deref().unwrap_or(""))
}

fn merchant(tx: &Transaction) -> String {
    normalized(tx.merchant_name.as_deref().unwrap_or(""))
}

// ---------------------------------------------------------------------------
// Income rules
// ---------------------------------------------------------------------------

/// Polarity guard: only positive inflows can be income at all.
fn not_inflow_or_nonpositive(tx: &Transaction, _kw: &KeywordSets) -> Option<SnapClassification> {
    let amount = tx.amount.unwrap_or(Decimal::ZERO);

    match tx.direction {
        Some(TransactionDirection::Inflow) if amount <= Decimal::ZERO => Some(
            SnapClassification::new(
                IncomeState::NotIncome,
                "OUTFLOW_OR_NONPOSITIVE",
                Confidence::High,
            ),
        ),
        Some(TransactionDirection::Inflow) => None,
        // Outflows and transactions with no usable direction.
        _ => Some(SnapClassification::new(
            IncomeState::NotIncome,
            "OUTFLOW_TRANSACTION",
            Confidence::High,
        )),
    }
}

/// Reimbursements, refunds, loans, chargebacks: money in, but not income.
fn not_income_keywords(tx: &Transaction, kw: &KeywordSets) -> Option<SnapClassification> {
    contains_any_keyword(&description(tx), &kw.not_income).then(|| {
        SnapClassification::new(
            IncomeState::NotIncome,
            "REIMBURSEMENT_REFUND_LOAN_OR_SIMILAR",
            Confidence::Medium,
        )
    })
}

/// Transfers between the household's own accounts.
fn exclude_keywords(tx: &Transaction, kw: &KeywordSets) -> Option<SnapClassification> {
    contains_any_keyword(&description(tx), &kw.exclude).then(|| {
        SnapClassification::new(
            IncomeState::NotIncome,
            "INTERNAL_TRANSFER_OR_NONINCOME_TRANSFER",
            Confidence::Medium,
        )
    })
}

fn earned_income(tx: &Transaction, kw: &KeywordSets) -> Option<SnapClassification> {
    (contains_any_keyword(&description(tx), &kw.earned) || kind(tx).contains("payroll")).then(
        || {
            SnapClassification::countable(
                IncomeType::EarnedIncome,
                "WAGES_OR_PAYROLL",
                "EARNED_INCOME_SOURCE",
                Confidence::Medium,
            )
        },
    )
}

fn unearned_income(tx: &Transaction, kw: &KeywordSets) -> Option<SnapClassification> {
    contains_any_keyword(&description(tx), &kw.unearned).then(|| {
        SnapClassification::countable(
            IncomeType::UnearnedIncome,
            "BENEFITS_OR_SUPPORT",
            "UNEARNED_INCOME_SOURCE",
            Confidence::Medium,
        )
    })
}

fn bank_interest(tx: &Transaction, kw: &KeywordSets) -> Option<SnapClassification> {
    (contains_any_keyword(&description(tx), &kw.bank_interest) || kind(tx).contains("interest"))
        .then(|| {
            SnapClassification::countable(
                IncomeType::UnearnedIncome,
                "BANK_INTEREST",
                "BANK_INTEREST_IS_UNEARNED_INCOME",
                Confidence::High,
            )
        })
}

/// Low-confidence heuristic; gifts may be excluded income but always need a
/// human decision.
fn gift_or_irregular(tx: &Transaction, _kw: &KeywordSets) -> Option<SnapClassification> {
    let desc = description(tx);
    (desc.contains("gift") || desc.contains("birthday")).then(|| {
        SnapClassification::new(
            IncomeState::FlagForReview,
            "POSSIBLE_GIFT_OR_IRREGULAR_INCOME",
            Confidence::Low,
        )
    })
}

/// Fallback when no income rule matched.
pub(crate) fn default_income() -> SnapClassification {
    SnapClassification::new(IncomeState::FlagForReview, "UNKNOWN_SOURCE", Confidence::Low)
}

// ---------------------------------------------------------------------------
// Expense rules
// ---------------------------------------------------------------------------

fn missing_amount(tx: &Transaction, _kw: &KeywordSets) -> Option<ExpenseClassification> {
    tx.amount.is_none().then(|| {
        ExpenseClassification::new(
            ExpenseState::FlagForReview,
            "MISSING_AMOUNT",
            Confidence::Low,
        )
    })
}

/// Not an outflow by any signal (type hint, direction, sign).
fn not_expense(tx: &Transaction, _kw: &KeywordSets) -> Option<ExpenseClassification> {
    let is_expense = kind(tx) == "expense"
        || tx.direction == Some(TransactionDirection::Outflow)
        || tx.amount.unwrap_or(Decimal::ZERO) < Decimal::ZERO;

    (!is_expense).then(|| {
        ExpenseClassification::new(
            ExpenseState::NotExpense,
            "NOT_AN_EXPENSE_TRANSACTION",
            Confidence::High,
        )
    })
}

fn transfer_keywords(tx: &Transaction, kw: &KeywordSets) -> Option<ExpenseClassification> {
    contains_any_keyword(&description(tx), &kw.transfer).then(|| {
        ExpenseClassification::new(
            ExpenseState::NotExpense,
            "INTERNAL_TRANSFER",
            Confidence::Medium,
        )
    })
}

/// Paying down debt is spending, but never a SNAP deduction.
fn credit_card_payment(tx: &Transaction, kw: &KeywordSets) -> Option<ExpenseClassification> {
    contains_any_keyword(&description(tx), &kw.credit_card_payment).then(|| ExpenseClassification {
        final_state: ExpenseState::NotDeductible,
        deduction_type: Some(DeductionType::None),
        category: Some("CREDIT_CARD_PAYMENT".to_string()),
        reason_code: Some("PAYING_DEBT_NOT_DEDUCTION".to_string()),
        confidence: Confidence::Medium,
    })
}

fn shelter(tx: &Transaction, kw: &KeywordSets) -> Option<ExpenseClassification> {
    let desc = description(tx);
    let merchant_name = merchant(tx);

    let is_rent_category = tx.personal_finance_category.as_ref().is_some_and(|c| {
        c.primary.to_uppercase().contains("RENT_AND_UTILITIES")
            && c.detailed.to_uppercase().contains("RENT")
    });

    if !(is_rent_category
        || contains_any_keyword(&desc, &kw.shelter)
        || contains_any_keyword(&merchant_name, &kw.shelter))
    {
        return None;
    }

    let category = if desc.contains("mortgage") || desc.contains("mtg") {
        "MORTGAGE"
    } else {
        "RENT"
    };
    Some(ExpenseClassification::deduction(
        DeductionType::Shelter,
        category,
        "SHELTER_COST",
        Confidence::Medium,
    ))
}

fn utilities(tx: &Transaction, kw: &KeywordSets) -> Option<ExpenseClassification> {
    let desc = description(tx);
    let merchant_name = merchant(tx);

    if !(is_utility_category(tx.personal_finance_category.as_ref())
        || matches_utility_keyword(&desc, &merchant_name, kw))
    {
        return None;
    }

    // Sub-category resolution order matters: internet, then electric, then
    // gas; generic hits land in the low-confidence catch-all.
    let (category, confidence) = if contains_any_keyword(&desc, &kw.internet) {
        ("INTERNET_OR_PHONE", Confidence::Medium)
    } else if contains_any_keyword(&desc, &kw.electric) {
        ("ELECTRIC", Confidence::Medium)
    } else if contains_any_keyword(&desc, &kw.gas) {
        ("GAS", Confidence::Medium)
    } else {
        ("UTILITIES_OTHER", Confidence::Low)
    };

    Some(ExpenseClassification::deduction(
        DeductionType::Utilities,
        category,
        "UTILITY_EXPENSE_SUA_EVIDENCE",
        confidence,
    ))
}

/// Countable only while the payer works or trains; the reason code carries
/// that conditionality for the reviewer.
fn childcare(tx: &Transaction, kw: &KeywordSets) -> Option<ExpenseClassification> {
    contains_any_keyword(&description(tx), &kw.childcare).then(|| {
        ExpenseClassification::deduction(
            DeductionType::Childcare,
            "DEPENDENT_CARE",
            "DEPENDENT_CARE_IF_WORK_OR_TRAINING",
            Confidence::Medium,
        )
    })
}

/// Medical costs deduct only for elderly/disabled members, which the
/// transaction cannot tell us; flag instead of auto-counting.
fn medical(tx: &Transaction, kw: &KeywordSets) -> Option<ExpenseClassification> {
    contains_any_keyword(&description(tx), &kw.medical).then(|| ExpenseClassification {
        final_state: ExpenseState::FlagForReview,
        deduction_type: Some(DeductionType::Medical),
        category: Some("MEDICAL_EXPENSE".to_string()),
        reason_code: Some("MEDICAL_DEDUCTION_ONLY_IF_ELDERLY_OR_DISABLED".to_string()),
        confidence: Confidence::Low,
    })
}

fn child_support(tx: &Transaction, kw: &KeywordSets) -> Option<ExpenseClassification> {
    contains_any_keyword(&description(tx), &kw.child_support).then(|| {
        ExpenseClassification::deduction(
            DeductionType::ChildSupportPaid,
            "CHILD_SUPPORT",
            "CHILD_SUPPORT_PAYMENT",
            Confidence::Medium,
        )
    })
}

/// Fallback when no expense rule matched.
pub(crate) fn default_expense() -> ExpenseClassification {
    ExpenseClassification::new(
        ExpenseState::NotDeductible,
        "NOT_A_COUNTABLE_DEDUCTION",
        Confidence::Medium,
    )
}
