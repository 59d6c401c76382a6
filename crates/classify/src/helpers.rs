//! Shared predicates used by the rule chains. All pure functions over the
//! raw transaction fields; no rule depends on another having run first.

use elig_core::PersonalFinanceCategory;

use crate::keywords::KeywordSets;

/// Trim + lowercase, applied to every free-text field before matching.
pub fn normalized(text: &str) -> String {
    text.trim().to_lowercase()
}

/// True if any keyword is a substring of `text`. Callers pass already
/// normalized text; the keyword tables are stored lowercase.
pub fn contains_any_keyword<S: AsRef<str>>(text: &str, keywords: &[S]) -> bool {
    keywords.iter().any(|k| text.contains(k.as_ref()))
}

/// True if the enrichment taxonomy marks the transaction as a utility.
pub fn is_utility_category(category: Option<&PersonalFinanceCategory>) -> bool {
    let Some(category) = category else {
        return false;
    };
    let primary = category.primary.to_uppercase();
    let detailed = category.detailed.to_uppercase();
    primary.contains("RENT_AND_UTILITIES")
        || detailed.contains("RENT_AND_UTILITIES")
        || detailed.contains("GAS_AND_ELECTRICITY")
        || primary.contains("UTILITIES")
}

/// Utility keyword test over description and merchant name, with a
/// merchant-name-only fallback on generic provider terms ("energy",
/// "power", ...) when no direct keyword hits.
pub fn matches_utility_keyword(desc: &str, merchant_name: &str, keywords: &KeywordSets) -> bool {
    let direct = keywords
        .utility
        .iter()
        .any(|k| desc.contains(k.as_str()) || merchant_name.contains(k.as_str()));

    if direct || merchant_name.is_empty() {
        return direct;
    }

    contains_any_keyword(merchant_name, &keywords.utility_merchant_terms)
}
