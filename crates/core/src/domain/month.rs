use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::DomainError;

/// A calendar month in `YYYY-MM` form, the grain at which progress reports
/// are filed. Lexicographic order on the inner string is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month(String);

impl Month {
    /// The month containing the current wall-clock date (UTC).
    pub fn current() -> Self {
        let now = Utc::now();
        Self(format!("{:04}-{:02}", now.year(), now.month()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Month {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = match s.split_once('-') {
            Some((year, month)) => {
                year.len() == 4
                    && year.bytes().all(|b| b.is_ascii_digit())
                    && month.len() == 2
                    && month.bytes().all(|b| b.is_ascii_digit())
                    && (1..=12).contains(&month.parse::<u8>().unwrap_or(0))
            }
            None => false,
        };

        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::InvalidMonth(s.to_string()))
        }
    }
}

impl TryFrom<String> for Month {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(value: Month) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_month_round_trips() {
        let month: Month = "2024-11".parse().expect("2024-11 should parse");
        assert_eq!(month.as_str(), "2024-11");
        assert_eq!(month.to_string(), "2024-11");
    }

    #[test]
    fn rejects_malformed_input() {
        for input in ["", "2024", "2024-13", "2024-00", "24-11", "2024-1", "2024/11", "abcd-ef"] {
            assert_eq!(
                input.parse::<Month>(),
                Err(DomainError::InvalidMonth(input.to_string())),
                "'{input}' should be rejected"
            );
        }
    }

    #[test]
    fn current_month_is_well_formed() {
        let month = Month::current();
        assert!(month.as_str().parse::<Month>().is_ok());
    }

    #[test]
    fn lexicographic_order_is_chronological() {
        let older: Month = "2024-09".parse().expect("valid");
        let newer: Month = "2024-11".parse().expect("valid");
        assert!(older < newer);
    }
}
