//! End-to-end scenarios for the two rule chains: chain ordering,
//! case-insensitivity, idempotence, and the polarity invariants.

use elig_classify::{classify_expense, classify_income};
use elig_core::{
    DeductionType, ExpenseState, IncomeState, IncomeType, Transaction, TransactionDirection,
};
use rust_decimal::Decimal;
use std::str::FromStr;

fn inflow(desc: &str, amount: &str) -> Transaction {
    Transaction::new(
        desc,
        Decimal::from_str(amount).unwrap(),
        TransactionDirection::Inflow,
    )
}

fn outflow(desc: &str, amount: &str) -> Transaction {
    Transaction::new(
        desc,
        Decimal::from_str(amount).unwrap(),
        TransactionDirection::Outflow,
    )
}

#[test]
fn payroll_direct_deposit_is_earned_income() {
    let c = classify_income(&inflow("ACME PAYROLL DIRECT DEPOSIT", "2000"));
    assert_eq!(c.final_state, IncomeState::CountableIncome);
    assert_eq!(c.income_type, Some(IncomeType::EarnedIncome));
    assert_eq!(c.category.as_deref(), Some("WAGES_OR_PAYROLL"));
}

#[test]
fn xcel_energy_is_electric_utility_via_keywords() {
    let tx = outflow("XCEL ENERGY", "-85.00").with_kind("expense");
    let c = classify_expense(&tx);
    assert_eq!(c.final_state, ExpenseState::CountableDeduction);
    assert_eq!(c.deduction_type, Some(DeductionType::Utilities));
    assert_eq!(c.category.as_deref(), Some("ELECTRIC"));
}

#[test]
fn zelle_to_self_is_internal_transfer() {
    let c = classify_expense(&outflow("ZELLE TO SELF SAVINGS", "-300"));
    assert_eq!(c.final_state, ExpenseState::NotExpense);
    assert_eq!(c.reason_code.as_deref(), Some("INTERNAL_TRANSFER"));
}

#[test]
fn interest_earned_is_unearned_income_high_confidence() {
    let c = classify_income(&inflow("INTEREST EARNED", "0.42"));
    assert_eq!(c.final_state, IncomeState::CountableIncome);
    assert_eq!(c.income_type, Some(IncomeType::UnearnedIncome));
    assert_eq!(c.category.as_deref(), Some("BANK_INTEREST"));
    assert_eq!(c.confidence, elig_core::Confidence::High);
}

#[test]
fn unknown_merchant_is_not_a_countable_deduction() {
    let tx = outflow("RANDOM MERCHANT XYZ", "40").with_kind("expense");
    let c = classify_expense(&tx);
    assert_eq!(c.final_state, ExpenseState::NotDeductible);
    assert_eq!(c.reason_code.as_deref(), Some("NOT_A_COUNTABLE_DEDUCTION"));
}

#[test]
fn outflows_and_nonpositive_inflows_are_never_countable_income() {
    let candidates = vec![
        outflow("ACME PAYROLL DIRECT DEPOSIT", "-2000"),
        outflow("INTEREST EARNED", "-1"),
        inflow("ACME PAYROLL DIRECT DEPOSIT", "0"),
        inflow("SOCIAL SECURITY SSA", "-10"),
    ];
    for tx in candidates {
        let c = classify_income(&tx);
        assert_ne!(
            c.final_state,
            IncomeState::CountableIncome,
            "tx: {}",
            tx.description
        );
    }
}

#[test]
fn positive_inflows_are_never_countable_deductions() {
    let candidates = vec![
        inflow("RENT REBATE", "50"),
        inflow("XCEL ENERGY REFUND", "85"),
        inflow("BRIGHT HORIZONS", "20"),
    ];
    for tx in candidates {
        let c = classify_expense(&tx);
        assert_ne!(
            c.final_state,
            ExpenseState::CountableDeduction,
            "tx: {}",
            tx.description
        );
    }
}

#[test]
fn earlier_rule_wins_when_both_would_match() {
    // "transfer" (expense rule 3) and "rent" (rule 5) both present: the
    // transfer guard is earlier and must win.
    let c = classify_expense(&outflow("TRANSFER FOR RENT", "-900"));
    assert_eq!(c.final_state, ExpenseState::NotExpense);
    assert_eq!(c.reason_code.as_deref(), Some("INTERNAL_TRANSFER"));

    // Income side: "refund" (rule 2) beats "payroll" (rule 4).
    let c = classify_income(&inflow("PAYROLL REFUND ADJUSTMENT", "120"));
    assert_eq!(c.final_state, IncomeState::NotIncome);
    assert_eq!(
        c.reason_code.as_deref(),
        Some("REIMBURSEMENT_REFUND_LOAN_OR_SIMILAR")
    );
}

#[test]
fn keyword_matching_is_case_insensitive() {
    let upper = classify_expense(&outflow("RENT PAYMENT", "-1000"));
    let lower = classify_expense(&outflow("rent payment", "-1000"));
    assert_eq!(upper, lower);
    assert_eq!(upper.final_state, ExpenseState::CountableDeduction);
}

#[test]
fn classification_is_idempotent() {
    let tx = inflow("GUSTO PAY 123", "1550.25");
    assert_eq!(classify_income(&tx), classify_income(&tx));

    let tx = outflow("CVS PHARMACY", "-12.99");
    assert_eq!(classify_expense(&tx), classify_expense(&tx));
}

#[test]
fn every_verdict_carries_a_reason_code() {
    let descriptions = [
        "ACME PAYROLL",
        "ZELLE FROM SELF",
        "AMAZON REFUND",
        "SOCIAL SECURITY",
        "INTEREST",
        "GIFT FROM MOM",
        "MYSTERY 99",
    ];
    for desc in descriptions {
        let c = classify_income(&inflow(desc, "10"));
        assert!(c.reason_code.is_some_and(|r| !r.is_empty()), "income: {desc}");
    }

    let descriptions = [
        "TO SAVINGS",
        "CC PAYMENT",
        "LANDLORD LLC",
        "CON ED",
        "KINDERCARE",
        "RX COPAY",
        "OCSE PAYMENT",
        "MYSTERY 99",
    ];
    for desc in descriptions {
        let c = classify_expense(&outflow(desc, "-10"));
        assert!(c.reason_code.is_some_and(|r| !r.is_empty()), "expense: {desc}");
    }
}

#[test]
fn missing_amount_outflow_is_flagged() {
    let mut tx = outflow("SOMETHING", "-1");
    tx.amount = None;
    let c = classify_expense(&tx);
    assert_eq!(c.final_state, ExpenseState::FlagForReview);
    assert_eq!(c.reason_code.as_deref(), Some("MISSING_AMOUNT"));
}

#[test]
fn gift_description_flags_for_review() {
    let c = classify_income(&inflow("GIFT FROM GRANDMA", "100"));
    assert_eq!(c.final_state, IncomeState::FlagForReview);
    assert_eq!(
        c.reason_code.as_deref(),
        Some("POSSIBLE_GIFT_OR_IRREGULAR_INCOME")
    );
}
