// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Walking consecutive periods of one granularity.
//!
//! All iterators stop silently at the supported range boundary (1900 and
//! 9999), where `next`/`previous` return `None`.
//!
//! ```
//! use calperiod::{timeline, Month, RegularTimePeriod};
//!
//! let first = Month::new(11, 2000).unwrap();
//! let last = Month::new(2, 2001).unwrap();
//! let months: Vec<_> = timeline::between(first, last)
//!     .unwrap()
//!     .map(|m| m.iso_string())
//!     .collect();
//! assert_eq!(months, ["2000-11", "2000-12", "2001-01", "2001-02"]);
//! ```

use crate::error::{PeriodError, PeriodResult};
use crate::granularity::Granularity;
use crate::period::RegularTimePeriod;
use std::iter::FusedIterator;

/// Unbounded walk in one direction, starting with the given period.
#[derive(Debug, Clone)]
pub struct Steps<P> {
    current: Option<P>,
    forward: bool,
}

impl<P: RegularTimePeriod> Iterator for Steps<P> {
    type Item = P;

    fn next(&mut self) -> Option<P> {
        let current = self.current?;
        self.current = if self.forward {
            current.next()
        } else {
            current.previous()
        };
        Some(current)
    }
}

impl<P: RegularTimePeriod> FusedIterator for Steps<P> {}

/// `start`, then every following period up to 9999.
pub fn forward<P: RegularTimePeriod>(start: P) -> Steps<P> {
    Steps {
        current: Some(start),
        forward: true,
    }
}

/// `start`, then every preceding period down to 1900.
pub fn backward<P: RegularTimePeriod>(start: P) -> Steps<P> {
    Steps {
        current: Some(start),
        forward: false,
    }
}

/// Inclusive range of periods, iterable from both ends.
#[derive(Debug, Clone)]
pub struct Between<P> {
    front: Option<P>,
    back: Option<P>,
}

impl<P: RegularTimePeriod> Iterator for Between<P> {
    type Item = P;

    fn next(&mut self) -> Option<P> {
        let (front, back) = (self.front?, self.back?);
        if front == back {
            self.front = None;
            self.back = None;
        } else {
            // A step past `back` lands on `back` itself so the end is always yielded.
            self.front = match front.next() {
                Some(p) if p.serial_index() <= back.serial_index() => Some(p),
                _ => Some(back),
            };
        }
        Some(front)
    }
}

impl<P: RegularTimePeriod> DoubleEndedIterator for Between<P> {
    fn next_back(&mut self) -> Option<P> {
        let (front, back) = (self.front?, self.back?);
        if front == back {
            self.front = None;
            self.back = None;
        } else {
            self.back = match back.previous() {
                Some(p) if p.serial_index() >= front.serial_index() => Some(p),
                _ => Some(front),
            };
        }
        Some(back)
    }
}

impl<P: RegularTimePeriod> FusedIterator for Between<P> {}

fn same_granularity<P: RegularTimePeriod>(first: &P, last: &P) -> PeriodResult<Granularity> {
    let granularity = first.granularity();
    if granularity == last.granularity() {
        Ok(granularity)
    } else {
        Err(PeriodError::InvalidArgument {
            name: "last",
            reason: format!(
                "granularity {} differs from {}",
                last.granularity(),
                granularity
            ),
        })
    }
}

/// Every period from `first` to `last`, both included.
///
/// The end points are yielded even when `next` never reaches one of them,
/// as with week 53 of a 52-week year.
///
/// Empty when `last` precedes `first`; fails when the two periods have
/// different granularities.
pub fn between<P: RegularTimePeriod>(first: P, last: P) -> PeriodResult<Between<P>> {
    same_granularity(&first, &last)?;
    if last.serial_index() < first.serial_index() {
        return Ok(Between {
            front: None,
            back: None,
        });
    }
    Ok(Between {
        front: Some(first),
        back: Some(last),
    })
}

/// Signed number of `next` steps leading from `from` to `to`.
///
/// Serial indices are contiguous for every granularity except weeks, whose
/// index reserves 53 slots per year; those are counted by walking.
pub fn steps_between<P: RegularTimePeriod>(from: &P, to: &P) -> PeriodResult<i64> {
    if same_granularity(from, to)? != Granularity::Week {
        return Ok(to.serial_index() - from.serial_index());
    }
    let (low, high, sign) = if from.serial_index() <= to.serial_index() {
        (*from, *to, 1)
    } else {
        (*to, *from, -1)
    };
    let steps = forward(low).take_while(|w| w.serial_index() < high.serial_index()).count();
    Ok(sign * steps as i64)
}
