//! Merges an already-fetched enrichment response into base transactions.
//!
//! The enrichment service has no transaction ids in its response, so rows
//! are matched back by (description, amount, direction). Fetching the
//! response is the caller's job; this module only understands its shape.

use elig_core::{Location, PersonalFinanceCategory, Transaction, TransactionDirection};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Counterparty {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Enrichments {
    #[serde(default)]
    pub counterparties: Vec<Counterparty>,
    #[serde(default)]
    pub personal_finance_category: Option<PersonalFinanceCategory>,
    #[serde(default)]
    pub payment_channel: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
}

/// One row of the enrichment response body.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichedTransaction {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub enrichments: Option<Enrichments>,
}

/// The service has returned both a bare list and an object wrapping one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EnrichResponse {
    Wrapped {
        #[serde(default)]
        enriched_transactions: Vec<EnrichedTransaction>,
    },
    List(Vec<EnrichedTransaction>),
}

/// Parses a raw enrichment response body, accepting either a bare array or
/// an `{"enriched_transactions": [...]}` wrapper.
pub fn parse_enrich_response(body: &str) -> Result<Vec<EnrichedTransaction>, serde_json::Error> {
    Ok(match serde_json::from_str::<EnrichResponse>(body)? {
        EnrichResponse::Wrapped {
            enriched_transactions,
        } => enriched_transactions,
        EnrichResponse::List(list) => list,
    })
}

type MatchKey = (String, Option<Decimal>, Option<TransactionDirection>);

fn match_key(
    description: &str,
    amount: Option<Decimal>,
    direction: Option<TransactionDirection>,
) -> MatchKey {
    (description.to_string(), amount, direction)
}

/// Copies merchant name, category taxonomy, payment channel, and location
/// from matching enriched rows onto the base transactions. Base rows with
/// no match pass through untouched; the `type` hint is derived from the
/// direction when absent so downstream summarizing can route them.
pub fn merge_enriched(
    base: Vec<Transaction>,
    enriched: &[EnrichedTransaction],
) -> Vec<Transaction> {
    let enriched_map: HashMap<MatchKey, &EnrichedTransaction> = enriched
        .iter()
        .map(|e| {
            let direction = e
                .direction
                .as_deref()
                .and_then(|d| TransactionDirection::from_str(d).ok());
            (match_key(&e.description, e.amount, direction), e)
        })
        .collect();

    base.into_iter()
        .map(|mut tx| {
            if tx.kind.is_none() {
                tx.kind = tx.direction.map(|d| match d {
                    TransactionDirection::Inflow => "income".to_string(),
                    TransactionDirection::Outflow => "expense".to_string(),
                });
            }

            let key = match_key(&tx.description, tx.amount, tx.direction);
            if let Some(e) = enriched_map.get(&key) {
                if let Some(enrichments) = &e.enrichments {
                    let merchant = enrichments
                        .counterparties
                        .iter()
                        .find(|cp| cp.kind == "merchant");
                    if let Some(merchant) = merchant {
                        tx.merchant_name = merchant.name.clone();
                    }
                    tx.personal_finance_category =
                        enrichments.personal_finance_category.clone();
                    tx.payment_channel = enrichments.payment_channel.clone();
                    if enrichments.location.is_some() {
                        tx.location = enrichments.location.clone();
                    }
                }
            }
            tx
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_tx(desc: &str, amount: &str, direction: TransactionDirection) -> Transaction {
        Transaction::new(desc, Decimal::from_str(amount).unwrap(), direction)
    }

    const RESPONSE: &str = r#"{
        "enriched_transactions": [
            {
                "description": "XCEL ENERGY",
                "amount": -85.00,
                "direction": "OUTFLOW",
                "enrichments": {
                    "counterparties": [
                        {"type": "marketplace", "name": "Not This One"},
                        {"type": "merchant", "name": "Xcel Energy"}
                    ],
                    "personal_finance_category": {
                        "primary": "RENT_AND_UTILITIES",
                        "detailed": "RENT_AND_UTILITIES_GAS_AND_ELECTRICITY"
                    },
                    "payment_channel": "online",
                    "location": {"city": "Denver", "region": "CO"}
                }
            }
        ]
    }"#;

    #[test]
    fn parses_wrapped_and_bare_responses() {
        let wrapped = parse_enrich_response(RESPONSE).unwrap();
        assert_eq!(wrapped.len(), 1);

        let bare = parse_enrich_response(r#"[{"description": "X"}]"#).unwrap();
        assert_eq!(bare.len(), 1);
        assert!(bare[0].enrichments.is_none());
    }

    #[test]
    fn merges_merchant_and_category_on_match() {
        let enriched = parse_enrich_response(RESPONSE).unwrap();
        let base = vec![base_tx("XCEL ENERGY", "-85.00", TransactionDirection::Outflow)];
        let merged = merge_enriched(base, &enriched);

        let tx = &merged[0];
        assert_eq!(tx.merchant_name.as_deref(), Some("Xcel Energy"));
        assert_eq!(
            tx.personal_finance_category.as_ref().unwrap().primary,
            "RENT_AND_UTILITIES"
        );
        assert_eq!(tx.payment_channel.as_deref(), Some("online"));
        assert_eq!(tx.location.as_ref().unwrap().city.as_deref(), Some("Denver"));
        // Kind hint derived from direction.
        assert_eq!(tx.kind.as_deref(), Some("expense"));
    }

    #[test]
    fn unmatched_rows_pass_through() {
        let enriched = parse_enrich_response(RESPONSE).unwrap();
        let base = vec![base_tx("SOMETHING ELSE", "-10", TransactionDirection::Outflow)];
        let merged = merge_enriched(base, &enriched);
        assert!(merged[0].merchant_name.is_none());
        assert!(merged[0].personal_finance_category.is_none());
    }

    #[test]
    fn direction_mismatch_is_no_match() {
        // Direction participates in the match key: a refund with the same
        // description and amount must not pick up the outflow's enrichments.
        let enriched = parse_enrich_response(RESPONSE).unwrap();
        let base = vec![base_tx("XCEL ENERGY", "-85.00", TransactionDirection::Inflow)];
        let merged = merge_enriched(base, &enriched);
        assert!(merged[0].merchant_name.is_none());
        assert!(merged[0].personal_finance_category.is_none());
    }

    #[test]
    fn amount_mismatch_is_no_match() {
        let enriched = parse_enrich_response(RESPONSE).unwrap();
        let base = vec![base_tx("XCEL ENERGY", "-84.99", TransactionDirection::Outflow)];
        let merged = merge_enriched(base, &enriched);
        assert!(merged[0].merchant_name.is_none());
    }

    #[test]
    fn existing_kind_hint_is_preserved() {
        let base =
            vec![base_tx("X", "5", TransactionDirection::Inflow).with_kind("payroll")];
        let merged = merge_enriched(base, &[]);
        assert_eq!(merged[0].kind.as_deref(), Some("payroll"));
    }
}
