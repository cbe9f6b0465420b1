//! Normalization of a raw (days, seconds, nanoseconds) triple into canonical
//! form.
//!
//! The algorithm runs in two phases:
//!
//! 1. A sign correction pass keyed on the lexicographic sign of the triple as
//!    given (see [`Triple::in_order`]). It moves a single unit between
//!    adjacent fields so that low-order fields agree in sign with the most
//!    significant nonzero field.
//! 2. An unconditional carry pass which forces nanoseconds into `[0, 1e9)` and
//!    seconds into `[0, 86400)`, moving the overflow to the next field up.
//!
//! Subtracting two canonical triples field by field typically leaves one
//! field negative while the total is positive (or the other way round). The
//! first phase resolves exactly that case with one borrow.

use std::convert::TryFrom;

use log::trace;
use static_assertions::const_assert_eq;

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const NANOS_PER_SEC: f64 = 1.0e9;

const_assert_eq!(SECONDS_PER_DAY, 24 * 60 * 60);

/// Unnormalized time components. Any combination of values is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Triple {
  pub days: i64,
  pub seconds: i64,
  pub nanoseconds: f64,
}

impl Triple {
  pub const fn new(days: i64, seconds: i64, nanoseconds: f64) -> Triple {
    Triple {
      days,
      seconds,
      nanoseconds,
    }
  }

  /// Lexicographic sign test: the most significant nonzero field decides.
  /// A field only counts when all more significant fields are exactly zero.
  ///
  /// This is not the sign of the real value: `(1, -100000, 0)` is "in order"
  /// even though it represents a negative number of seconds.
  pub fn in_order(&self) -> bool {
    Wide::from(*self).in_order()
  }

  /// True if both low-order fields are inside their canonical ranges.
  pub fn is_canonical(&self) -> bool {
    (0..SECONDS_PER_DAY).contains(&self.seconds)
      && self.nanoseconds >= 0.0
      && self.nanoseconds < NANOS_PER_SEC
  }

  /// The represented value in seconds.
  pub fn total_seconds(&self) -> f64 {
    self.days as f64 * SECONDS_PER_DAY as f64 + self.seconds as f64 + self.nanoseconds / NANOS_PER_SEC
  }
}

/// Division used when carrying overflow into the next field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarryRule {
  /// Floor division. Always yields a canonical triple.
  Floor,
  /// Division truncating toward zero, as an integer cast of the float
  /// quotient does. Can leave negative seconds or nanoseconds behind when the
  /// sign correction pass did not absorb the whole negative part.
  Truncate,
}

impl Default for CarryRule {
  fn default() -> CarryRule {
    CarryRule::Floor
  }
}

impl CarryRule {
  fn seconds_in(self, nanoseconds: f64) -> i64 {
    let quotient = nanoseconds / NANOS_PER_SEC;
    match self {
      CarryRule::Floor => quotient.floor() as i64,
      CarryRule::Truncate => quotient as i64,
    }
  }

  fn days_in(self, seconds: i64) -> i64 {
    match self {
      CarryRule::Floor => seconds.div_euclid(SECONDS_PER_DAY),
      CarryRule::Truncate => seconds / SECONDS_PER_DAY,
    }
  }
}

/// Bring `raw` into canonical form (for [`CarryRule::Floor`]) without
/// changing the value it represents.
///
/// A day count that ends up outside the `i64` range wraps around; use
/// [`checked_normalize`] to detect that.
pub fn normalize(raw: Triple, rule: CarryRule) -> Triple {
  normalize_wide(Wide::from(raw), rule).wrapping()
}

/// Like [`normalize`], but `None` if the resulting day count does not fit in
/// an `i64`.
pub fn checked_normalize(raw: Triple, rule: CarryRule) -> Option<Triple> {
  normalize_wide(Wide::from(raw), rule).checked()
}

/// A triple whose day count cannot overflow while it is being normalized.
/// Sums of two `i64` day counts fit as well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Wide {
  pub days: i128,
  pub seconds: i64,
  pub nanoseconds: f64,
}

impl Wide {
  fn in_order(&self) -> bool {
    if self.days < 0 {
      return false;
    }
    if self.days == 0 && self.seconds < 0 {
      return false;
    }
    if self.days == 0 && self.seconds == 0 && self.nanoseconds < 0.0 {
      return false;
    }
    true
  }

  pub fn wrapping(self) -> Triple {
    Triple::new(self.days as i64, self.seconds, self.nanoseconds)
  }

  pub fn checked(self) -> Option<Triple> {
    let days = i64::try_from(self.days).ok()?;
    Some(Triple::new(days, self.seconds, self.nanoseconds))
  }
}

impl From<Triple> for Wide {
  fn from(t: Triple) -> Wide {
    Wide {
      days: i128::from(t.days),
      seconds: t.seconds,
      nanoseconds: t.nanoseconds,
    }
  }
}

pub(crate) fn normalize_wide(raw: Wide, rule: CarryRule) -> Wide {
  trace!("normalize {:?} with {:?}", raw, rule);

  let mut corrected = raw;
  if corrected.in_order() {
    corrected = borrow_up(corrected);
  }
  // Re-tested on purpose: a single borrow can turn a triple like
  // (1, -100000, 0) lexicographically negative.
  if !corrected.in_order() {
    corrected = borrow_down(corrected);
  }
  trace!("sign corrected: {:?}", corrected);

  let carried = carry(corrected, rule);
  trace!("carried: {:?}", carried);
  carried
}

// Non-negative branch: lend one unit to a negative low-order field.
fn borrow_up(t: Wide) -> Wide {
  let mut t = t;
  if t.nanoseconds < 0.0 {
    t.seconds -= 1;
    t.nanoseconds += NANOS_PER_SEC;
  }
  if t.seconds < 0 {
    t.days -= 1;
    t.seconds += SECONDS_PER_DAY;
  }
  t
}

// Negative branch: push one unit of a positive low-order field upward.
fn borrow_down(t: Wide) -> Wide {
  let mut t = t;
  if t.nanoseconds > 0.0 {
    t.seconds += 1;
    t.nanoseconds -= NANOS_PER_SEC;
  }
  if t.seconds > 0 {
    t.days += 1;
    t.seconds -= SECONDS_PER_DAY;
  }
  t
}

fn carry(t: Wide, rule: CarryRule) -> Wide {
  let overflow_seconds = rule.seconds_in(t.nanoseconds);
  let mut seconds = t.seconds + overflow_seconds;
  let mut nanoseconds = t.nanoseconds - overflow_seconds as f64 * NANOS_PER_SEC;

  if rule == CarryRule::Floor {
    // Rounding of the subtraction above may land just outside [0, 1e9).
    if nanoseconds < 0.0 {
      seconds -= 1;
      nanoseconds += NANOS_PER_SEC;
    }
    if nanoseconds >= NANOS_PER_SEC {
      seconds += 1;
      nanoseconds -= NANOS_PER_SEC;
    }
  }

  let overflow_days = rule.days_in(seconds);
  Wide {
    days: t.days + i128::from(overflow_days),
    seconds: seconds - overflow_days * SECONDS_PER_DAY,
    nanoseconds,
  }
}
