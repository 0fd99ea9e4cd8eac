//! Tests for symbol validation and paging.

use crate::currencies::{normalize_symbol, Currency, CurrencyError, PageRequest};
use crate::Error;

// ==================== Symbol normalization ====================

#[test]
fn test_normalizes_case_and_whitespace() {
    for raw in ["btc", "BTC", "  Btc ", "\tbTc\n"] {
        assert_eq!(normalize_symbol(raw).unwrap(), "BTC");
    }
}

#[test]
fn test_accepts_digits_and_max_length() {
    assert_eq!(normalize_symbol("1inch").unwrap(), "1INCH");
    assert_eq!(normalize_symbol("abcdefghij").unwrap(), "ABCDEFGHIJ");
}

#[test]
fn test_rejects_malformed_symbols() {
    for raw in ["", "   ", "abcdefghijk", "BTC-USD", "ETH.X", "D0GE!", "ÄBC", "B T C"] {
        let err = normalize_symbol(raw).unwrap_err();
        assert!(
            matches!(err, Error::Currency(CurrencyError::InvalidSymbol(_))),
            "{raw:?} should be rejected, got {err:?}"
        );
    }
}

// ==================== Currency construction ====================

#[test]
fn test_new_currency_sets_identity_and_timestamps() {
    let a = Currency::new(" eth ").unwrap();
    let b = Currency::new("ETH").unwrap();

    assert_eq!(a.symbol, "ETH");
    assert_eq!(a.symbol, b.symbol);
    assert_ne!(a.id, b.id);
    assert_eq!(a.created_at, a.updated_at);
}

#[test]
fn test_new_currency_rejects_invalid_symbol() {
    assert!(matches!(
        Currency::new("not a symbol"),
        Err(Error::Currency(CurrencyError::InvalidSymbol(_)))
    ));
}

// ==================== PageRequest ====================

#[test]
fn test_page_request_validation() {
    assert!(PageRequest::new(100, 0).is_ok());
    assert!(matches!(PageRequest::new(0, 0), Err(Error::Validation(_))));
    assert!(matches!(PageRequest::new(-5, 0), Err(Error::Validation(_))));
    assert!(matches!(PageRequest::new(10, -1), Err(Error::Validation(_))));
}

#[test]
fn test_page_request_next() {
    let page = PageRequest::new(100, 0).unwrap().next().next();
    assert_eq!(page, PageRequest { limit: 100, offset: 200 });
}
