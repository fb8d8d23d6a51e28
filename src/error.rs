// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error taxonomy shared by every period operation.
//!
//! Three kinds are kept distinct: a field outside its legal range
//! ([`PeriodError::Range`]), a required argument that was not supplied
//! ([`PeriodError::InvalidArgument`]) and text that no grammar accepts
//! ([`PeriodError::Format`]).

use crate::granularity::Granularity;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type PeriodResult<T> = Result<T, PeriodError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    /// A constructor received a field value outside its legal range.
    #[error("{field} ({value}) outside valid range {min}..={max}")]
    Range {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A required argument (time zone, calendar, ...) was absent or unusable.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    /// No accepted grammar matched the input text.
    #[error("cannot parse {text:?} as {granularity}: {reason}")]
    Format {
        text: String,
        granularity: Granularity,
        reason: &'static str,
    },
}

impl PeriodError {
    pub(crate) fn absent(name: &'static str) -> Self {
        PeriodError::InvalidArgument {
            name,
            reason: "argument is required".to_string(),
        }
    }

    pub(crate) fn format(text: &str, granularity: Granularity, reason: &'static str) -> Self {
        PeriodError::Format {
            text: text.to_string(),
            granularity,
            reason,
        }
    }

    /// The rejected text, for [`PeriodError::Format`] errors.
    pub fn rejected_text(&self) -> Option<&str> {
        match self {
            PeriodError::Format { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Checks `value` against an inclusive range, naming the field on failure.
pub(crate) fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> PeriodResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(PeriodError::Range {
            field,
            value,
            min,
            max,
        })
    }
}
