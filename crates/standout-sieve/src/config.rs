//! Filter configuration.
//!
//! A [`SieveConfig`] travels with every [`Filter`](crate::Filter) and is
//! inherited by the sub-filters created for groups. It can be built in code
//! or loaded from YAML / JSON:
//!
//! ```
//! use standout_sieve::{Clock, SieveConfig};
//!
//! let config = SieveConfig::from_yaml_str("ignore_case: false\nclock: utc\n").unwrap();
//! assert!(!config.ignore_case);
//! assert_eq!(config.clock, Clock::Utc);
//! assert!(config.reject_degenerate);
//! ```

use chrono::{Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};

/// Source of "now" for date conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clock {
    /// The local wall clock.
    #[default]
    Local,
    /// Coordinated universal time.
    Utc,
}

impl Clock {
    /// Returns the current date and time.
    pub fn now(self) -> NaiveDateTime {
        match self {
            Clock::Local => Local::now().naive_local(),
            Clock::Utc => Utc::now().naive_utc(),
        }
    }

    /// Returns the current date.
    pub fn today(self) -> NaiveDate {
        self.now().date()
    }
}

/// Options shared by a filter and all of its groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SieveConfig {
    /// Reject literal and zero-left conditions in `add`.
    pub reject_degenerate: bool,
    /// Substring checks (`contains`, `contains_any`) ignore case.
    pub ignore_case: bool,
    /// Clock used by date conditions.
    pub clock: Clock,
}

impl Default for SieveConfig {
    fn default() -> Self {
        SieveConfig {
            reject_degenerate: true,
            ignore_case: true,
            clock: Clock::Local,
        }
    }
}

impl SieveConfig {
    /// Parses a configuration from YAML. Missing keys take their defaults.
    pub fn from_yaml_str(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| SieveError::InvalidConfig(e.to_string()))
    }

    /// Parses a configuration from JSON. Missing keys take their defaults.
    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).map_err(|e| SieveError::InvalidConfig(e.to_string()))
    }

    /// Sets whether degenerate conditions are rejected.
    pub fn reject_degenerate(mut self, reject: bool) -> Self {
        self.reject_degenerate = reject;
        self
    }

    /// Sets whether substring checks ignore case.
    pub fn ignore_case(mut self, ignore: bool) -> Self {
        self.ignore_case = ignore;
        self
    }

    /// Sets the clock used by date conditions.
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SieveConfig::default();
        assert!(config.reject_degenerate);
        assert!(config.ignore_case);
        assert_eq!(config.clock, Clock::Local);
    }

    #[test]
    fn yaml_partial() {
        let config = SieveConfig::from_yaml_str("reject_degenerate: false").unwrap();
        assert!(!config.reject_degenerate);
        assert!(config.ignore_case);
    }

    #[test]
    fn json_full() {
        let config = SieveConfig::from_json_str(
            r#"{"reject_degenerate": true, "ignore_case": false, "clock": "utc"}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            SieveConfig::default().ignore_case(false).clock(Clock::Utc)
        );
    }

    #[test]
    fn unknown_key_rejected() {
        let err = SieveConfig::from_json_str(r#"{"strict": true}"#).unwrap_err();
        assert!(matches!(err, SieveError::InvalidConfig(_)));
    }

    #[test]
    fn bad_clock_rejected() {
        assert!(SieveConfig::from_yaml_str("clock: martian").is_err());
    }

    #[test]
    fn clock_today_matches_now() {
        let clock = Clock::Utc;
        let before = clock.now().date();
        let today = clock.today();
        assert!(today >= before);
    }
}
