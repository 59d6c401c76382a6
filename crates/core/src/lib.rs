pub mod classification;
pub mod transaction;

pub use classification::{
    Confidence, DeductionType, ExpenseClassification, ExpenseState, IncomeState, IncomeType,
    SnapClassification,
};
pub use transaction::{Location, PersonalFinanceCategory, Transaction, TransactionDirection};
