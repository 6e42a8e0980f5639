//! Format checks and argument guards shared by the leaf conditions.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, SieveError};

/// Loose e-mail shape: local part, `@`, dotted domain with a 2+ letter TLD.
pub static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Standard Base64 alphabet with up to two padding characters.
pub static BASE64: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+/]*={0,2}$").expect("valid base64 regex"));

/// Returns `true` if `value` parses as a JSON document.
///
/// Blank strings are not JSON.
pub fn is_valid_json(value: &str) -> bool {
    if value.trim().is_empty() {
        return false;
    }
    serde_json::from_str::<serde_json::Value>(value).is_ok()
}

/// Returns `true` if `value` looks like padded Base64.
pub fn is_base64(value: &str) -> bool {
    !value.is_empty() && value.len() % 4 == 0 && BASE64.is_match(value)
}

/// Returns `true` if `value` looks like an e-mail address.
pub fn is_email(value: &str) -> bool {
    !value.is_empty() && EMAIL.is_match(value)
}

/// Fails with `OutOfRange` unless `value` is greater than zero.
pub fn ensure_positive(name: &'static str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(SieveError::OutOfRange {
            name,
            value,
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

/// Checks a 1-based page number and a page size.
pub fn ensure_pagination(page: usize, page_size: usize) -> Result<()> {
    ensure_positive("page", saturate(page))?;
    ensure_positive("page_size", saturate(page_size))
}

/// Fails with `InvalidArgument` if `value` is empty or only whitespace.
pub fn ensure_not_blank(name: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SieveError::invalid(name, "must not be blank"));
    }
    Ok(())
}

/// Fails with `InvalidArgument` if `min > max` or the bounds do not order
/// (a NaN bound).
pub fn ensure_ordered<N: PartialOrd + std::fmt::Display>(min: N, max: N) -> Result<()> {
    match min.partial_cmp(&max) {
        Some(Ordering::Greater) => Err(SieveError::invalid(
            "min",
            format!("{min} is greater than max {max}"),
        )),
        None => Err(SieveError::invalid(
            "min",
            format!("{min} and {max} cannot be ordered"),
        )),
        Some(_) => Ok(()),
    }
}

fn saturate(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
