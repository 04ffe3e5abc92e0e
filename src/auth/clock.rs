//! Time sources that stamp `FX-ACCESS-TIMESTAMP`.

// self
use crate::_prelude::*;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_MICRO: i128 = 1_000;

/// Decimal seconds since the Unix epoch, exactly as placed in the canonical message and header.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Timestamp(String);
impl Timestamp {
	/// Wraps an already rendered timestamp string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Renders nanoseconds since the epoch as `<seconds>.<fraction>`.
	///
	/// The fraction has microsecond resolution with trailing zeros trimmed, keeping at least one
	/// digit: `1700000000.0`, `1700000000.25`, `1700000000.123456`.
	pub fn from_unix_nanos(nanos: i128) -> Self {
		let seconds = nanos.div_euclid(NANOS_PER_SECOND);
		let micros = nanos.rem_euclid(NANOS_PER_SECOND) / NANOS_PER_MICRO;
		let fraction = format!("{micros:06}");
		let fraction = fraction.trim_end_matches('0');
		let fraction = if fraction.is_empty() { "0" } else { fraction };

		Self(format!("{seconds}.{fraction}"))
	}

	/// Returns the rendered timestamp.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for Timestamp {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Display for Timestamp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
impl From<OffsetDateTime> for Timestamp {
	fn from(moment: OffsetDateTime) -> Self {
		Self::from_unix_nanos(moment.unix_timestamp_nanos())
	}
}

/// Source of signing timestamps.
pub trait TimeSource
where
	Self: Send + Sync,
{
	/// Returns the timestamp for a signature about to be computed.
	fn now(&self) -> Timestamp;
}

/// Wall clock backed by [`OffsetDateTime::now_utc`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;
impl TimeSource for SystemClock {
	fn now(&self) -> Timestamp {
		OffsetDateTime::now_utc().into()
	}
}

/// Clock frozen at a single timestamp; used for golden vectors and tests.
#[derive(Clone, Debug)]
pub struct FixedClock(Timestamp);
impl FixedClock {
	/// Freezes the clock at `timestamp`.
	pub fn new(timestamp: Timestamp) -> Self {
		Self(timestamp)
	}
}
impl TimeSource for FixedClock {
	fn now(&self) -> Timestamp {
		self.0.clone()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn renders_whole_seconds_with_single_zero() {
		let whole = Timestamp::from_unix_nanos(1_700_000_000 * NANOS_PER_SECOND);

		assert_eq!(whole.as_str(), "1700000000.0");
	}

	#[test]
	fn trims_trailing_zeros_at_microsecond_resolution() {
		let base = 1_700_000_000 * NANOS_PER_SECOND;

		assert_eq!(Timestamp::from_unix_nanos(base + 250_000_000).as_str(), "1700000000.25");
		assert_eq!(Timestamp::from_unix_nanos(base + 123_456_789).as_str(), "1700000000.123456");
		assert_eq!(Timestamp::from_unix_nanos(base + 999).as_str(), "1700000000.0");
	}

	#[test]
	fn converts_from_offset_date_time() {
		let moment = datetime!(2023-11-14 22:13:20.5 UTC);

		assert_eq!(Timestamp::from(moment).as_str(), "1700000000.5");
	}

	#[test]
	fn system_clock_reads_current_time() {
		let before = OffsetDateTime::now_utc().unix_timestamp();
		let stamped = SystemClock.now();
		let seconds: i64 = stamped
			.as_str()
			.split_once('.')
			.and_then(|(seconds, _)| seconds.parse().ok())
			.expect("System clock should render `<seconds>.<fraction>`.");

		assert!(seconds >= before);
	}

	#[test]
	fn fixed_clock_repeats_its_timestamp() {
		let clock = FixedClock::new(Timestamp::new("1700000000.0"));

		assert_eq!(clock.now(), clock.now());
		assert_eq!(clock.now().as_str(), "1700000000.0");
	}
}
