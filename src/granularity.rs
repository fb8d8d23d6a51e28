// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar resolution levels.

use crate::error::PeriodError;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The resolution of a regular time period, ordered from finest to coarsest.
///
/// `Week` sits between `Day` and `Month` in the ordering even though weeks do
/// not nest inside months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Granularity {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Granularity {
    /// Every granularity, finest first.
    pub const ALL: [Granularity; 9] = [
        Granularity::Millisecond,
        Granularity::Second,
        Granularity::Minute,
        Granularity::Hour,
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Quarter,
        Granularity::Year,
    ];

    /// Lowercase label, also used by `FromStr` and serde.
    pub const fn label(self) -> &'static str {
        match self {
            Granularity::Millisecond => "millisecond",
            Granularity::Second => "second",
            Granularity::Minute => "minute",
            Granularity::Hour => "hour",
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        }
    }

    /// The next finer granularity that subdivides this one.
    ///
    /// Weeks are subdivided into days; `Millisecond` is its own finer level.
    pub const fn finer(self) -> Granularity {
        match self {
            Granularity::Year => Granularity::Quarter,
            Granularity::Quarter => Granularity::Month,
            Granularity::Month | Granularity::Week => Granularity::Day,
            Granularity::Day => Granularity::Hour,
            Granularity::Hour => Granularity::Minute,
            Granularity::Minute => Granularity::Second,
            Granularity::Second | Granularity::Millisecond => Granularity::Millisecond,
        }
    }

    /// The containing granularity along the containment chain.
    ///
    /// Days are contained in months (not weeks); `Year` is its own parent.
    pub const fn coarser(self) -> Granularity {
        match self {
            Granularity::Millisecond => Granularity::Second,
            Granularity::Second => Granularity::Minute,
            Granularity::Minute => Granularity::Hour,
            Granularity::Hour => Granularity::Day,
            Granularity::Day => Granularity::Month,
            Granularity::Week | Granularity::Quarter | Granularity::Year => Granularity::Year,
            Granularity::Month => Granularity::Quarter,
        }
    }

    /// `true` for granularities below a whole day.
    pub const fn is_sub_day(self) -> bool {
        matches!(
            self,
            Granularity::Millisecond | Granularity::Second | Granularity::Minute | Granularity::Hour
        )
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Granularity {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Granularity::ALL
            .into_iter()
            .find(|g| g.label() == wanted)
            .ok_or_else(|| PeriodError::InvalidArgument {
                name: "granularity",
                reason: format!("unknown granularity {s:?}"),
            })
    }
}

#[cfg(feature = "serde")]
impl Serialize for Granularity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Granularity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
