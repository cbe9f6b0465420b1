use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use log::debug;

use crate::{
  error::{Error, Result},
  instant::Instant,
};

/// Civil date that day 0 of an [`Instant`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Epoch {
  /// Midnight, 1 January 2010 (GMT).
  SnoPlus,
  /// Midnight, 1 January 1996 (GMT).
  Sno,
}

impl Default for Epoch {
  fn default() -> Epoch {
    Epoch::SnoPlus
  }
}

impl Epoch {
  pub fn from_sno_plus(sno_plus: bool) -> Epoch {
    if sno_plus {
      Epoch::SnoPlus
    } else {
      Epoch::Sno
    }
  }

  pub fn year(self) -> i32 {
    match self {
      Epoch::SnoPlus => 2010,
      Epoch::Sno => 1996,
    }
  }

  pub fn first_day(self) -> Result<NaiveDate> {
    match NaiveDate::from_ymd_opt(self.year(), 1, 1) {
      Some(date) => Ok(date),
      None => Error::out_of_range("epoch year"),
    }
  }
}

impl Instant {
  /// Civil date and time of this instant counted from `epoch`.
  ///
  /// Sub-nanosecond fractions are dropped.
  pub fn to_civil(&self, epoch: Epoch) -> Result<NaiveDateTime> {
    let first_day = epoch.first_day()?;
    let days = self.days();
    let date = if days >= 0 {
      first_day.checked_add_days(Days::new(days as u64))
    } else {
      first_day.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    let date = match date {
      Some(date) => date,
      None => {
        debug!("to_civil: day {} from {:?} is not representable", days, epoch);
        return Error::out_of_range("date outside the calendar range");
      }
    };

    // canonical fields are always inside these ranges
    let time = NaiveTime::from_num_seconds_from_midnight_opt(
      self.seconds() as u32,
      self.nanoseconds() as u32,
    );
    match time {
      Some(time) => Ok(date.and_time(time)),
      None => {
        debug!("to_civil: time of day from {} is not representable", self);
        Error::out_of_range("time of day")
      }
    }
  }

  /// Inverse of [`Instant::to_civil`]. A leap second is folded into the
  /// following second.
  pub fn from_civil(datetime: NaiveDateTime, epoch: Epoch) -> Result<Instant> {
    let days = datetime
      .date()
      .signed_duration_since(epoch.first_day()?)
      .num_days();
    let time = datetime.time();
    Ok(Instant::new(
      days,
      i64::from(time.num_seconds_from_midnight()),
      f64::from(time.nanosecond()),
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, nano: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
      .unwrap()
      .and_hms_nano_opt(h, min, s, nano)
      .unwrap()
  }

  #[test]
  fn day_zero_is_new_year() {
    assert_eq!(
      Instant::ZERO.to_civil(Epoch::SnoPlus),
      Ok(datetime(2010, 1, 1, 0, 0, 0, 0))
    );
    assert_eq!(
      Instant::ZERO.to_civil(Epoch::Sno),
      Ok(datetime(1996, 1, 1, 0, 0, 0, 0))
    );
  }

  #[test]
  fn boolean_selector() {
    assert_eq!(Epoch::from_sno_plus(true), Epoch::SnoPlus);
    assert_eq!(Epoch::from_sno_plus(false), Epoch::Sno);
    assert_eq!(Epoch::default(), Epoch::SnoPlus);
  }

  #[test]
  fn days_roll_over_months_and_years() {
    let t = Instant::new(365, 3_661, 5.0e8);
    assert_eq!(
      t.to_civil(Epoch::SnoPlus),
      Ok(datetime(2011, 1, 1, 1, 1, 1, 500_000_000))
    );
    // 1996 is a leap year
    assert_eq!(
      Instant::new(59, 0, 0.0).to_civil(Epoch::Sno),
      Ok(datetime(1996, 2, 29, 0, 0, 0, 0))
    );
  }

  #[test]
  fn negative_days_precede_epoch() {
    let t = Instant::new(0, -1, 0.0);
    assert_eq!(
      t.to_civil(Epoch::SnoPlus),
      Ok(datetime(2009, 12, 31, 23, 59, 59, 0))
    );
  }

  #[test]
  fn out_of_calendar_range() {
    let t = Instant::new(i64::MAX / 2, 0, 0.0);
    assert!(matches!(
      t.to_civil(Epoch::SnoPlus),
      Err(Error::OutOfRange { .. })
    ));
  }

  #[test]
  fn civil_round_trip() {
    let t = Instant::new(-5_000, 45_296, 789.0);
    let civil = t.to_civil(Epoch::Sno).unwrap();
    assert_eq!(Instant::from_civil(civil, Epoch::Sno), Ok(t));
  }

  #[test]
  fn leap_second_is_folded() {
    let leap = datetime(2015, 6, 30, 23, 59, 59, 1_500_000_000);
    let t = Instant::from_civil(leap, Epoch::SnoPlus).unwrap();
    let expected = Instant::from_civil(datetime(2015, 7, 1, 0, 0, 0, 500_000_000), Epoch::SnoPlus);
    assert_eq!(Ok(t), expected);
  }
}
