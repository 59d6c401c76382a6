//! Thin ingestion glue around the classifier: CSV reading, merging an
//! already-fetched enrichment response, and whole-statement summaries.
//! Nothing here talks to the network; callers hand us parsed bytes.

pub mod csv;
pub mod enrich;
pub mod summary;

pub use crate::csv::{read_transactions, CsvError};
pub use enrich::{merge_enriched, parse_enrich_response, EnrichedTransaction, Enrichments};
pub use summary::{summarize, ClassificationOutcome, ClassifiedTransaction, StatementSummary};
