use chrono::{Local, NaiveDateTime};

/// Source of wall-clock readings.
pub trait Clock {
	fn now(&self) -> NaiveDateTime;
}

/// The system's local time.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
	fn now(&self) -> NaiveDateTime {
		Local::now().naive_local()
	}
}

/// Always reads the same instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
	fn now(&self) -> NaiveDateTime {
		self.0
	}
}

impl<C: Clock + ?Sized> Clock for &C {
	fn now(&self) -> NaiveDateTime {
		(**self).now()
	}
}

/// `05 Mar 2024`: two-digit day, English month abbreviation, four-digit year.
pub fn date_line(now: NaiveDateTime) -> String {
	now.format("%d %b %Y").to_string()
}

/// `14:03:09`: zero-padded 24-hour time.
pub fn time_line(now: NaiveDateTime) -> String {
	now.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;

	fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(y, m, d)
			.unwrap()
			.and_hms_opt(h, min, s)
			.unwrap()
	}

	#[test]
	fn date_format() {
		assert_eq!(date_line(at(2024, 3, 5, 14, 3, 9)), "05 Mar 2024");
		assert_eq!(date_line(at(1999, 12, 31, 0, 0, 0)), "31 Dec 1999");
	}

	#[test]
	fn time_format() {
		assert_eq!(time_line(at(2024, 3, 5, 14, 3, 9)), "14:03:09");
		assert_eq!(time_line(at(2024, 3, 5, 0, 0, 0)), "00:00:00");
		assert_eq!(time_line(at(2024, 3, 5, 23, 59, 59)), "23:59:59");
	}

	#[test]
	fn every_month_abbreviates_to_three_letters() {
		for month in 1..=12 {
			let line = date_line(at(2024, month, 1, 12, 0, 0));
			let parts: Vec<&str> = line.split(' ').collect();
			assert_eq!(parts.len(), 3, "{line}");
			assert_eq!(parts[0].len(), 2, "{line}");
			assert_eq!(parts[1].len(), 3, "{line}");
			assert!(parts[1].chars().all(|c| c.is_ascii_alphabetic()), "{line}");
			assert_eq!(parts[2].len(), 4, "{line}");
		}
	}

	#[test]
	fn fixed_clock_does_not_move() {
		let clock = FixedClock(at(2024, 3, 5, 14, 3, 9));
		assert_eq!(clock.now(), clock.now());
		assert_eq!((&clock).now(), at(2024, 3, 5, 14, 3, 9));
	}

	#[test]
	fn local_clock_formats_fit_the_display() {
		let now = LocalClock.now();
		assert_eq!(date_line(now).len(), 11);
		assert_eq!(time_line(now).len(), 8);
	}
}
