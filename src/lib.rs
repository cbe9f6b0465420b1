//! Fixed-point universal time.
//!
//! An [`Instant`] is a time (or a duration) measured from a fixed epoch as
//! three components: whole days, whole seconds within the day and fractional
//! nanoseconds within the second. Values are kept in a single canonical form
//! after every construction and every addition or subtraction, including
//! results that fall below the epoch:
//!
//! ```
//! use universal_time::Instant;
//!
//! let a = Instant::new(0, 0, 0.0);
//! let b = Instant::new(0, 0, 1.0);
//! let d = a - b;
//! assert_eq!((d.days(), d.seconds(), d.nanoseconds()), (-1, 86_399, 999_999_999.0));
//! assert!(d < a);
//! ```
//!
//! Day 0 can be mapped to a civil date using one of two [`Epoch`]s:
//!
//! ```
//! use universal_time::{Epoch, Instant};
//!
//! let t = Instant::new(1, 3_600, 0.0);
//! let civil = t.to_civil(Epoch::SnoPlus).unwrap();
//! assert_eq!(civil.to_string(), "2010-01-02 01:00:00");
//! ```
//!
//! The normalization itself is available as a pure function over a raw
//! [`Triple`], see the [`normalize`](normalize/index.html) module.

#[macro_use]
mod checked_impl;

pub mod calendar;
pub mod error;
pub mod instant;
pub mod normalize;

pub use calendar::Epoch;
pub use error::{Error, Result};
pub use instant::Instant;
pub use normalize::{checked_normalize, normalize, CarryRule, Triple, NANOS_PER_SEC, SECONDS_PER_DAY};
