use chrono::NaiveDate;
use elig_core::{Transaction, TransactionDirection};
use rust_decimal::Decimal;
use std::io::Read;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("No data rows")]
    NoDataRows,
}

/// Reads transactions from a headered CSV with columns
/// `id, description, amount, direction, iso_currency_code` plus optional
/// `city, region, date_posted, mcc`.
///
/// Amounts tolerate `$`, thousands separators, and parenthesized negatives.
/// Unrecognized direction strings are carried as `None` so the classifier's
/// guards can flag them instead of this reader erroring out.
pub fn read_transactions<R: Read>(data: R) -> Result<Vec<Transaction>, CsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let required =
        |name: &str| col(name).ok_or_else(|| CsvError::MissingColumn(name.to_string()));

    let id_col = required("id")?;
    let description_col = required("description")?;
    let amount_col = required("amount")?;
    let direction_col = required("direction")?;
    let currency_col = col("iso_currency_code");
    let city_col = col("city");
    let region_col = col("region");
    let date_posted_col = col("date_posted");
    let mcc_col = col("mcc");

    let mut transactions = Vec::new();

    for result in reader.records() {
        let record = result?;
        if record.is_empty() {
            continue;
        }

        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        let amount = field(Some(amount_col))
            .map(parse_amount)
            .transpose()?;
        let direction = field(Some(direction_col))
            .and_then(|s| TransactionDirection::from_str(s).ok());
        let date_posted = field(date_posted_col).map(parse_date).transpose()?;

        let city = field(city_col).map(|s| s.to_string());
        let region = field(region_col).map(|s| s.to_string());
        let location = (city.is_some() || region.is_some())
            .then(|| elig_core::Location { city, region });

        transactions.push(Transaction {
            id: field(Some(id_col)).map(|s| s.to_string()),
            date: None,
            description: field(Some(description_col)).unwrap_or_default().to_string(),
            amount,
            direction,
            kind: None,
            iso_currency_code: field(currency_col).unwrap_or("USD").to_string(),
            merchant_name: None,
            personal_finance_category: None,
            payment_channel: None,
            location,
            date_posted,
            mcc: field(mcc_col).map(|s| s.to_string()),
        });
    }

    if transactions.is_empty() {
        return Err(CsvError::NoDataRows);
    }

    Ok(transactions)
}

fn parse_date(s: &str) -> Result<NaiveDate, CsvError> {
    let s = s.trim();
    for fmt in &[
        "%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%m-%d-%Y",
    ] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }
    Err(CsvError::InvalidDate(s.to_string()))
}

fn parse_amount(s: &str) -> Result<Decimal, CsvError> {
    let s = s.trim();
    let (negative, s) = if s.starts_with('(') && s.ends_with(')') {
        (true, &s[1..s.len() - 1])
    } else {
        (false, s)
    };
    let cleaned = s.replace([',', '$', ' '], "");
    let mut dec =
        Decimal::from_str(&cleaned).map_err(|_| CsvError::InvalidAmount(s.to_string()))?;
    if negative {
        dec = -dec;
    }
    Ok(dec)
}
