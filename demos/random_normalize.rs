//! Feeds random, mostly non-canonical triples through `Instant::new` and
//! checks the results.
//!
//! Run with `RUST_LOG=trace` to see every normalization step.

use log::{error, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use universal_time::{Epoch, Instant, NANOS_PER_SEC, SECONDS_PER_DAY};

const ROUNDS: usize = 90_000;
const SEED: u64 = 5;

fn main() {
  env_logger::init();

  let mut rng = StdRng::seed_from_u64(SEED);
  let mut negative = 0;
  let mut failures = 0;
  let mut latest = Instant::ZERO;

  for n in 0..ROUNDS {
    let days = 2 * ((rng.gen::<f64>() * 100.0) as i64 - 50);
    let seconds = 2 * ((rng.gen::<f64>() * 100_000.0) as i64 - 50_000);
    let nanoseconds = (rng.gen::<f64>() - 0.5) * 2.0e9;

    let instant = Instant::new(days, seconds, nanoseconds);
    if instant.is_negative() {
      negative += 1;
    }

    let canonical = (0..SECONDS_PER_DAY).contains(&instant.seconds())
      && instant.nanoseconds() >= 0.0
      && instant.nanoseconds() < NANOS_PER_SEC;
    let expected =
      days as f64 * SECONDS_PER_DAY as f64 + seconds as f64 + nanoseconds / NANOS_PER_SEC;
    if !canonical || (instant.total_seconds() - expected).abs() > 1.0e-6 {
      error!(
        "round {}: ({}, {}, {}) normalized to {}",
        n, days, seconds, nanoseconds, instant
      );
      failures += 1;
    }
    if instant > latest {
      latest = instant;
    }
  }

  info!("{} of {} instants were before the epoch", negative, ROUNDS);
  match latest.to_civil(Epoch::SnoPlus) {
    Ok(civil) => info!("latest instant {} is {}", latest, civil),
    Err(e) => error!("latest instant {} has no civil date: {}", latest, e),
  }

  println!("{} rounds, {} failures", ROUNDS, failures);
  if failures > 0 {
    std::process::exit(1);
  }
}
