use std::result;

/// This is a specialized Result, similar to std::io::Result
pub type Result<T> = result::Result<T, Error>;

/// Failures of the conversions between [`Instant`](crate::Instant) and other
/// time representations.
///
/// Construction, addition and subtraction of instants never fail, so none of
/// these are produced by the arithmetic itself.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
  /// A floating point input was NaN or infinite.
  #[error("value {value} is not finite")]
  NotFinite { value: f64 },
  /// The instant lies before the epoch, but the target type cannot hold
  /// negative values.
  #[error("instant is before the epoch")]
  Negative,
  /// The value does not fit into the target representation.
  #[error("out of range: {reason}")]
  OutOfRange { reason: String },
}

impl Error {
  pub fn not_finite<T>(value: f64) -> Result<T> {
    Err(Error::NotFinite { value })
  }

  pub fn out_of_range<T>(reason: &str) -> Result<T> {
    Err(Error::OutOfRange {
      reason: reason.to_string(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn helpers_wrap_in_err() {
    let r: Result<()> = Error::out_of_range("year 300000");
    assert_eq!(
      r,
      Err(Error::OutOfRange {
        reason: "year 300000".to_string()
      })
    );
    let r: Result<u8> = Error::not_finite(f64::INFINITY);
    assert!(matches!(r, Err(Error::NotFinite { .. })));
  }

  #[test]
  fn usable_as_std_error() {
    let e: Box<dyn std::error::Error> = Box::new(Error::NotFinite { value: f64::NAN });
    assert_eq!(e.to_string(), "value NaN is not finite");
  }

  #[test]
  fn display() {
    assert_eq!(
      Error::Negative.to_string(),
      "instant is before the epoch"
    );
    assert_eq!(
      Error::OutOfRange {
        reason: "too many days".to_string()
      }
      .to_string(),
      "out of range: too many days"
    );
  }
}
