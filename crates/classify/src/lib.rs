//! SNAP classification rules engine.
//!
//! Two independent rule chains — income and expense — each an ordered list
//! of pure rules evaluated first-match-wins, with a conservative default
//! when nothing matches. Entry points are [`Classifier::classify_income`]
//! and [`Classifier::classify_expense`] (or the free functions of the same
//! names for default keyword tables).

pub mod classifier;
pub mod helpers;
pub mod keywords;
mod rules;

pub use classifier::{classify_expense, classify_income, Classifier};
pub use keywords::{KeywordConfigError, KeywordSets};
