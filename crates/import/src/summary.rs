use elig_classify::Classifier;
use elig_core::{
    ExpenseClassification, SnapClassification, Transaction, TransactionDirection,
};
use rust_decimal::Decimal;
use serde::Serialize;

/// Either classifier's verdict, serialized flat (the variant tag never
/// appears on the wire; the field sets are disjoint enough to audit).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClassificationOutcome {
    Income(SnapClassification),
    Expense(ExpenseClassification),
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub snap_classification: ClassificationOutcome,
}

/// A whole statement's worth of classified transactions plus totals.
/// Totals follow the upstream wire shape (camelCase keys).
#[derive(Debug, Clone, Serialize)]
pub struct StatementSummary {
    pub transactions: Vec<ClassifiedTransaction>,
    #[serde(rename = "totalExpenses")]
    pub total_expenses: Decimal,
    #[serde(rename = "totalIncome")]
    pub total_income: Decimal,
    pub period: String,
}

fn is_income(tx: &Transaction) -> bool {
    match tx.kind.as_deref() {
        Some(kind) => kind.trim().eq_ignore_ascii_case("income"),
        None => tx.direction == Some(TransactionDirection::Inflow),
    }
}

/// Attaches a classification to every transaction and totals the statement.
///
/// The income/expense route comes from the `type` hint, falling back to the
/// direction; conversely a transaction without a direction gets one derived
/// from its hint before classification, since the polarity guards key on it.
pub fn summarize(
    transactions: Vec<Transaction>,
    period: &str,
    classifier: &Classifier,
) -> StatementSummary {
    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;

    let transactions = transactions
        .into_iter()
        .map(|mut tx| {
            let income = is_income(&tx);
            if tx.direction.is_none() {
                tx.direction = Some(if income {
                    TransactionDirection::Inflow
                } else {
                    TransactionDirection::Outflow
                });
            }

            let amount = tx.amount.unwrap_or(Decimal::ZERO);
            let snap_classification = if income {
                total_income += amount;
                ClassificationOutcome::Income(classifier.classify_income(&tx))
            } else {
                total_expenses += amount;
                ClassificationOutcome::Expense(classifier.classify_expense(&tx))
            };

            ClassifiedTransaction {
                transaction: tx,
                snap_classification,
            }
        })
        .collect();

    StatementSummary {
        transactions,
        total_expenses,
        total_income,
        period: period.to_string(),
    }
}
