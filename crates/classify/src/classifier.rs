use elig_core::{ExpenseClassification, SnapClassification, Transaction};

use crate::keywords::KeywordSets;
use crate::rules::{default_expense, default_income, EXPENSE_RULES, INCOME_RULES};

/// Facade over the two rule chains. Holds the active keyword tables;
/// stateless otherwise, so one instance can classify any number of
/// transactions from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    keywords: KeywordSets,
}

impl Classifier {
    pub fn new(keywords: KeywordSets) -> Self {
        Classifier { keywords }
    }

    /// Classifies a transaction for SNAP income purposes. Total over any
    /// well-formed input: absent fields read as empty/zero, and anything
    /// the chain cannot place is flagged for review, never an error.
    pub fn classify_income(&self, tx: &Transaction) -> SnapClassification {
        for (name, rule) in INCOME_RULES {
            if let Some(result) = rule(tx, &self.keywords) {
                tracing::debug!(rule = *name, state = %result.final_state, "income rule matched");
                return result;
            }
        }
        default_income()
    }

    /// Classifies an outflow as a SNAP deduction candidate.
    pub fn classify_expense(&self, tx: &Transaction) -> ExpenseClassification {
        for (name, rule) in EXPENSE_RULES {
            if let Some(result) = rule(tx, &self.keywords) {
                tracing::debug!(rule = *name, state = %result.final_state, "expense rule matched");
                return result;
            }
        }
        default_expense()
    }
}

/// [`Classifier::classify_income`] with the built-in keyword tables.
pub fn classify_income(tx: &Transaction) -> SnapClassification {
    Classifier::default().classify_income(tx)
}

/// [`Classifier::classify_expense`] with the built-in keyword tables.
pub fn classify_expense(tx: &Transaction) -> ExpenseClassification {
    Classifier::default().classify_expense(tx)
}
