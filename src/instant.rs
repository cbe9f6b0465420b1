use std::{
  cmp::Ordering,
  convert::TryFrom,
  fmt,
  ops::{Add, AddAssign, Sub, SubAssign},
  time::Duration,
};

use log::warn;
use num_traits::Zero;
use static_assertions::assert_impl_all;

use crate::{
  error::{Error, Result},
  normalize::{normalize, normalize_wide, CarryRule, Triple, Wide, NANOS_PER_SEC, SECONDS_PER_DAY},
};

/// Time since the epoch, or a duration, as whole days, seconds within the day
/// and nanoseconds within the second.
///
/// Every constructor and every arithmetic operation leaves the value in
/// canonical form: `0 <= seconds < 86400` and `0 <= nanoseconds < 1e9`. The
/// sign of the value is carried by `days` alone, so one second before the
/// epoch is `(-1, 86399, 0.0)`.
///
/// Comparison is only meaningful between canonical values, which is all this
/// type ever holds.
#[derive(Debug, Clone, Copy)]
pub struct Instant {
  days: i64,
  seconds: i64,
  nanoseconds: f64,
}

assert_impl_all!(Instant: Copy, Send, Sync);

impl Instant {
  pub const ZERO: Instant = Instant {
    days: 0,
    seconds: 0,
    nanoseconds: 0.0,
  };

  /// Builds an instant from arbitrary components. Out of range or negative
  /// low-order fields are carried or borrowed into the higher ones.
  ///
  /// `nanoseconds` must be finite. Non-finite values are not rejected, but
  /// the result compares unordered with everything.
  ///
  /// Rebuilding an instant from the fields of an existing one gives the same
  /// value back bit for bit when it is at or after the epoch. Before the
  /// epoch the sign correction moves `nanoseconds` through `-1e9` and back,
  /// which may change its last bits.
  pub fn new(days: i64, seconds: i64, nanoseconds: f64) -> Instant {
    if !nanoseconds.is_finite() {
      warn!(
        "Instant::new: non-finite nanoseconds {} (days={}, seconds={})",
        nanoseconds, days, seconds
      );
    }
    Instant::from(normalize(
      Triple::new(days, seconds, nanoseconds),
      CarryRule::default(),
    ))
  }

  /// Converts a signed number of seconds.
  pub fn from_secs_f64(secs: f64) -> Result<Instant> {
    if !secs.is_finite() {
      return Error::not_finite(secs);
    }
    let whole = secs.floor();
    let days = (whole / SECONDS_PER_DAY as f64).floor();
    // i64::MAX as f64 rounds up, so stay strictly below it
    if days.abs() >= i64::MAX as f64 {
      return Error::out_of_range("seconds exceed the day range");
    }
    let seconds = whole - days * SECONDS_PER_DAY as f64;
    Ok(Instant::new(
      days as i64,
      seconds as i64,
      (secs - whole) * NANOS_PER_SEC,
    ))
  }

  pub fn days(&self) -> i64 {
    self.days
  }

  pub fn seconds(&self) -> i64 {
    self.seconds
  }

  pub fn nanoseconds(&self) -> f64 {
    self.nanoseconds
  }

  /// True if the value lies before the epoch.
  pub fn is_negative(&self) -> bool {
    self.days < 0
  }

  /// The represented value in seconds. Loses sub-microsecond precision
  /// once `days` grows past a few thousand years.
  pub fn total_seconds(&self) -> f64 {
    Triple::from(*self).total_seconds()
  }

  pub fn equals(&self, other: &Instant) -> bool {
    self.days == other.days
      && self.seconds == other.seconds
      && self.nanoseconds == other.nanoseconds
  }

  /// Lexicographic comparison over days, then seconds, then nanoseconds.
  pub fn less_than(&self, other: &Instant) -> bool {
    match self.days.cmp(&other.days) {
      Ordering::Less => true,
      Ordering::Greater => false,
      Ordering::Equal => match self.seconds.cmp(&other.seconds) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => self.nanoseconds < other.nanoseconds,
      },
    }
  }

  pub fn plus(self, rhs: Instant) -> Instant {
    self + rhs
  }

  pub fn minus(self, rhs: Instant) -> Instant {
    self - rhs
  }

  pub fn add_in_place(&mut self, rhs: &Instant) -> &mut Instant {
    *self += *rhs;
    self
  }

  pub fn subtract_in_place(&mut self, rhs: &Instant) -> &mut Instant {
    *self -= *rhs;
    self
  }

  /// Addition that returns `None` instead of overflowing `days`. Otherwise
  /// the result is identical to `self + rhs`.
  pub fn checked_add(&self, rhs: &Instant) -> Option<Instant> {
    self.sum(rhs).checked().map(Instant::from)
  }

  /// Subtraction that returns `None` instead of overflowing `days`. Otherwise
  /// the result is identical to `self - rhs`.
  pub fn checked_sub(&self, rhs: &Instant) -> Option<Instant> {
    self.difference(rhs).checked().map(Instant::from)
  }

  // Both the operators and the checked forms go through these, so they
  // round nanoseconds identically.
  fn sum(&self, rhs: &Instant) -> Wide {
    let raw = Wide {
      days: i128::from(self.days) + i128::from(rhs.days),
      seconds: self.seconds + rhs.seconds,
      nanoseconds: self.nanoseconds + rhs.nanoseconds,
    };
    normalize_wide(raw, CarryRule::Floor)
  }

  fn difference(&self, rhs: &Instant) -> Wide {
    let raw = Wide {
      days: i128::from(self.days) - i128::from(rhs.days),
      seconds: self.seconds - rhs.seconds,
      nanoseconds: self.nanoseconds - rhs.nanoseconds,
    };
    normalize_wide(raw, CarryRule::Floor)
  }
}

impl From<Triple> for Instant {
  fn from(t: Triple) -> Instant {
    Instant {
      days: t.days,
      seconds: t.seconds,
      nanoseconds: t.nanoseconds,
    }
  }
}

impl From<Instant> for Triple {
  fn from(instant: Instant) -> Triple {
    Triple::new(instant.days, instant.seconds, instant.nanoseconds)
  }
}

impl Default for Instant {
  fn default() -> Instant {
    Instant::ZERO
  }
}

impl PartialEq for Instant {
  fn eq(&self, other: &Instant) -> bool {
    self.equals(other)
  }
}

// <=, > and >= all come out of partial_cmp, so they cannot disagree with
// less_than and equals.
impl PartialOrd for Instant {
  fn partial_cmp(&self, other: &Instant) -> Option<Ordering> {
    if self.equals(other) {
      Some(Ordering::Equal)
    } else if self.less_than(other) {
      Some(Ordering::Less)
    } else if other.less_than(self) {
      Some(Ordering::Greater)
    } else {
      None
    }
  }
}

impl AddAssign for Instant {
  fn add_assign(&mut self, rhs: Instant) {
    *self = Instant::from(self.sum(&rhs).wrapping());
  }
}

impl SubAssign for Instant {
  fn sub_assign(&mut self, rhs: Instant) {
    *self = Instant::from(self.difference(&rhs).wrapping());
  }
}

impl Add for Instant {
  type Output = Instant;

  fn add(self, rhs: Instant) -> Instant {
    let mut sum = self;
    sum += rhs;
    sum
  }
}

impl Sub for Instant {
  type Output = Instant;

  fn sub(self, rhs: Instant) -> Instant {
    let mut difference = self;
    difference -= rhs;
    difference
  }
}

impl Zero for Instant {
  fn zero() -> Instant {
    Instant::ZERO
  }

  fn is_zero(&self) -> bool {
    self.equals(&Instant::ZERO)
  }
}

mod instant_checked {
  use super::Instant;
  checked_impl!(CheckedAdd, checked_add, Instant);
  checked_impl!(CheckedSub, checked_sub, Instant);
}

impl From<Duration> for Instant {
  fn from(duration: Duration) -> Instant {
    let secs = duration.as_secs();
    let per_day = SECONDS_PER_DAY as u64;
    Instant::new(
      (secs / per_day) as i64,
      (secs % per_day) as i64,
      f64::from(duration.subsec_nanos()),
    )
  }
}

/// Fractional nanoseconds are truncated.
impl TryFrom<Instant> for Duration {
  type Error = Error;

  fn try_from(instant: Instant) -> Result<Duration> {
    if instant.is_negative() {
      return Err(Error::Negative);
    }
    let secs = (instant.days as u64)
      .checked_mul(SECONDS_PER_DAY as u64)
      .and_then(|s| s.checked_add(instant.seconds as u64));
    match secs {
      Some(secs) => Ok(Duration::new(secs, instant.nanoseconds as u32)),
      None => Error::out_of_range("seconds do not fit in u64"),
    }
  }
}

impl fmt::Display for Instant {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}d {}s {}ns", self.days, self.seconds, self.nanoseconds)
  }
}
