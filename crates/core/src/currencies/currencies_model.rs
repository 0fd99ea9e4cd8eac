//! Currency domain models.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CurrencyError;
use crate::errors::ValidationError;
use crate::Result;

lazy_static! {
    /// Tracked symbols: 1 to 10 uppercase letters or digits.
    static ref SYMBOL_REGEX: Regex = Regex::new(r"^[A-Z0-9]{1,10}$").expect("Invalid regex pattern");
}

/// A tracked cryptocurrency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub id: String,
    pub symbol: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Currency {
    /// Validates `raw` and creates a currency with a fresh id.
    pub fn new(raw: &str) -> Result<Self> {
        let symbol = normalize_symbol(raw)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            symbol,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Trims and uppercases `raw`, then checks it against the symbol pattern.
///
/// Pure; no storage or provider lookups happen here.
pub fn normalize_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim().to_uppercase();
    if SYMBOL_REGEX.is_match(&symbol) {
        Ok(symbol)
    } else {
        Err(CurrencyError::InvalidSymbol(raw.trim().to_string()).into())
    }
}

/// One page of the registry listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    pub fn new(limit: i64, offset: i64) -> Result<Self> {
        if limit <= 0 {
            return Err(ValidationError::InvalidInput(format!(
                "page size must be positive, got {}",
                limit
            ))
            .into());
        }
        if offset < 0 {
            return Err(ValidationError::InvalidInput(format!(
                "offset must not be negative, got {}",
                offset
            ))
            .into());
        }
        Ok(Self { limit, offset })
    }

    /// The page after this one.
    pub fn next(self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset + self.limit,
        }
    }
}
