//! Text conditions.
//!
//! Accessors may return any `S: AsRef<str>`, so `&String`, `&str` and
//! `&Box<str>` fields all work. An optional string can be read with
//! `|u| u.nick.as_deref().unwrap_or("")`; the empty string stands in for a
//! missing value, which most checks here reject.
//!
//! Lengths are counted in `char`s. Letter and digit classes are Unicode
//! aware.

use regex::Regex;

use crate::condition::Condition;
use crate::error::{Result, SieveError};
use crate::filter::Filter;
use crate::leaves::Accessor;
use crate::validation;

impl<T: ?Sized + 'static> Filter<T> {
    fn add_text<S, F, C>(&mut self, accessor: F, check: C) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
        C: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.add_via(accessor, Condition::new(move |s: &S| check(s.as_ref())))
    }

    /// Non-empty and at least `min` characters long.
    pub fn min_length<S, F>(&mut self, accessor: F, min: usize) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, move |s| !s.is_empty() && s.chars().count() >= min)
    }

    /// Non-empty and at most `max` characters long.
    pub fn max_length<S, F>(&mut self, accessor: F, max: usize) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, move |s| !s.is_empty() && s.chars().count() <= max)
    }

    /// Exactly `length` characters long.
    pub fn exact_length<S, F>(&mut self, accessor: F, length: usize) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, move |s| s.chars().count() == length)
    }

    /// Non-empty and matching `pattern`.
    ///
    /// The pattern is compiled once, here. An empty pattern fails with
    /// [`SieveError::InvalidArgument`], a malformed one with
    /// [`SieveError::InvalidRegex`].
    pub fn regex_match<S, F>(&mut self, accessor: F, pattern: &str) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        if pattern.is_empty() {
            return Err(SieveError::invalid("pattern", "must not be empty"));
        }
        let regex = Regex::new(pattern)?;
        self.add_text(accessor, move |s| !s.is_empty() && regex.is_match(s))
    }

    /// The empty string.
    pub fn empty<S, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, str::is_empty)
    }

    /// Any non-empty string.
    pub fn not_empty<S, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, |s| !s.is_empty())
    }

    /// Shaped like an e-mail address.
    pub fn is_email<S, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, validation::is_email)
    }

    /// Starts with `prefix` (case-sensitive).
    pub fn starts_with<S, F>(&mut self, accessor: F, prefix: &str) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        let prefix = prefix.to_string();
        self.add_text(accessor, move |s| s.starts_with(prefix.as_str()))
    }

    /// Ends with `suffix` (case-sensitive).
    pub fn ends_with<S, F>(&mut self, accessor: F, suffix: &str) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        let suffix = suffix.to_string();
        self.add_text(accessor, move |s| s.ends_with(suffix.as_str()))
    }

    /// Contains `needle`.
    ///
    /// Case is ignored unless the filter's configuration turns
    /// [`ignore_case`](crate::SieveConfig::ignore_case) off.
    pub fn contains<S, F>(&mut self, accessor: F, needle: &str) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        let matcher = Matcher::new(needle, self.config().ignore_case);
        self.add_text(accessor, move |s| matcher.is_in(s))
    }

    /// Equal to `value` ignoring case.
    pub fn equals_ignore_case<S, F>(&mut self, accessor: F, value: &str) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        let value = value.to_lowercase();
        self.add_text(accessor, move |s| s.to_lowercase() == value)
    }

    /// No leading or trailing whitespace.
    pub fn trimmed<S, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, |s| s == s.trim())
    }

    /// Non-empty and only decimal digits.
    pub fn has_only_digits<S, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, |s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()))
    }

    /// Non-empty and only alphabetic characters.
    pub fn has_only_letters<S, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, |s| !s.is_empty() && s.chars().all(char::is_alphabetic))
    }

    /// At least one letter and at least one digit.
    pub fn has_letters_and_numbers<S, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, |s| {
            s.chars().any(char::is_alphabetic) && s.chars().any(|c| c.is_ascii_digit())
        })
    }

    /// At least one character that is neither a letter nor a digit.
    pub fn has_special_characters<S, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, |s| s.chars().any(|c| !c.is_alphanumeric()))
    }

    /// Parses as a JSON document.
    pub fn is_json<S, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, validation::is_valid_json)
    }

    /// Does not parse as a JSON document. Blank strings count as not JSON.
    pub fn is_not_json<S, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, |s| !validation::is_valid_json(s))
    }

    /// Padded Base64 text.
    pub fn is_base64<S, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, validation::is_base64)
    }

    /// Non-empty text that is not padded Base64.
    pub fn is_not_base64<S, F>(&mut self, accessor: F) -> Result<&mut Self>
    where
        S: AsRef<str> + ?Sized + 'static,
        F: for<'a> Fn(&'a T) -> &'a S + Send + Sync + 'static,
    {
        self.add_text(accessor, |s| !s.is_empty() && !validation::is_base64(s))
    }

    /// Searches several text fields for any of the whitespace-separated
    /// `terms`.
    ///
    /// Adds one condition per accessor, each requiring that field to contain
    /// at least one term. Case handling follows
    /// [`contains`](Self::contains).
    ///
    /// ```
    /// use standout_sieve::{field, Filter};
    ///
    /// struct Doc {
    ///     title: String,
    ///     body: String,
    /// }
    ///
    /// let mut filter = Filter::new();
    /// filter
    ///     .contains_any(
    ///         "rust tokio",
    ///         vec![field(|d: &Doc| d.title.as_str()), field(|d: &Doc| d.body.as_str())],
    ///     )
    ///     .unwrap();
    ///
    /// let doc = Doc { title: "Async Rust".into(), body: "built on Tokio".into() };
    /// assert!(filter.build().test(&doc));
    /// ```
    pub fn contains_any(&mut self, terms: &str, accessors: Vec<Accessor<T, str>>) -> Result<&mut Self> {
        validation::ensure_not_blank("terms", terms)?;
        if accessors.is_empty() {
            return Err(SieveError::invalid("accessors", "at least one is required"));
        }

        let ignore_case = self.config().ignore_case;
        let matchers: Vec<Matcher> = terms
            .split_whitespace()
            .map(|term| Matcher::new(term, ignore_case))
            .collect();

        for accessor in accessors {
            let matchers = matchers.clone();
            self.add_text(
                move |item: &T| accessor(item),
                move |s| matchers.iter().any(|m| m.is_in(s)),
            )?;
        }
        Ok(self)
    }
}

/// Substring search with optional case folding.
#[derive(Debug, Clone)]
struct Matcher {
    needle: String,
    ignore_case: bool,
}

impl Matcher {
    fn new(needle: &str, ignore_case: bool) -> Self {
        let needle = if ignore_case {
            needle.to_lowercase()
        } else {
            needle.to_string()
        };
        Matcher {
            needle,
            ignore_case,
        }
    }

    fn is_in(&self, haystack: &str) -> bool {
        if self.ignore_case {
            haystack.to_lowercase().contains(self.needle.as_str())
        } else {
            haystack.contains(self.needle.as_str())
        }
    }
}
