use chrono::NaiveDateTime;

use super::{date_line, time_line, Error, Result};

/// Number of characters on one display line.
pub const COLUMNS: usize = 16;

/// Number of lines on the display.
pub const ROWS: usize = 2;

/// Largest write the driver's `content` attribute accepts: two full lines and their newlines.
pub const MAX_WRITE: usize = ROWS * (COLUMNS + 1);

/// Greeting shown at the start of every demo cycle.
pub const GREETING: [&str; ROWS] = ["LCD DRIVER DEMO", "  Marcin Klos"];

/// A group of display lines delivered to the device in one write.
///
/// The driver redraws the whole screen on each write to `content`, padding short lines with
/// spaces, so a frame is the unit of both output and flushing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
	lines: Vec<String>,
}

impl Frame {
	/// Build a frame, checking that it fits the display.
	pub fn new<I, S>(lines: I) -> Result<Self>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let lines: Vec<String> = lines.into_iter().map(Into::into).collect();

		if lines.is_empty() {
			return Err(Error::EmptyFrame);
		}

		if lines.len() > ROWS {
			return Err(Error::TooManyLines { count: lines.len() });
		}

		for line in &lines {
			if line.contains(['\n', '\r']) {
				return Err(Error::EmbeddedNewline { line: line.clone() });
			}

			if !line.is_ascii() {
				return Err(Error::NonAscii { line: line.clone() });
			}

			if line.len() > COLUMNS {
				return Err(Error::LineTooWide {
					line: line.clone(),
					width: line.len(),
				});
			}
		}

		Ok(Self { lines })
	}

	pub fn greeting() -> Self {
		Self {
			lines: GREETING.map(String::from).into(),
		}
	}

	/// Date on the first line, time on the second, both from the same reading.
	pub fn timestamp(now: NaiveDateTime) -> Self {
		Self {
			lines: vec![date_line(now), time_line(now)],
		}
	}

	pub fn lines(&self) -> &[String] {
		&self.lines
	}

	/// The bytes written to the device: every line followed by `\n`, padded with blank lines to
	/// [`ROWS`] lines so no row keeps text from an earlier frame.
	pub fn encode(&self) -> Vec<u8> {
		let mut buf = Vec::with_capacity(MAX_WRITE);
		self.encode_into(&mut buf);
		buf
	}

	pub fn encode_into(&self, buf: &mut Vec<u8>) {
		for line in &self.lines {
			buf.extend_from_slice(line.as_bytes());
			buf.push(b'\n');
		}

		// the driver only pads rows it is given a terminator for
		for _ in self.lines.len()..ROWS {
			buf.push(b'\n');
		}
	}
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
	fn greeting_bytes() {
		assert_eq!(
			Frame::greeting().encode(),
			b"LCD DRIVER DEMO\n  Marcin Klos\n"
		);
	}

	#[test]
	fn greeting_passes_validation() {
		assert_eq!(Frame::new(GREETING).unwrap(), Frame::greeting());
	}

	#[test]
	fn timestamp_bytes() {
		assert_eq!(
			Frame::timestamp(at(2024, 3, 5, 14, 3, 9)).encode(),
			b"05 Mar 2024\n14:03:09\n"
		);
	}

	#[test]
	fn timestamp_pads_small_values() {
		assert_eq!(
			Frame::timestamp(at(2025, 1, 2, 3, 4, 5)).encode(),
			b"02 Jan 2025\n03:04:05\n"
		);
	}

	#[test]
	fn single_line_frame() {
		let frame = Frame::new(["hello"]).unwrap();
		assert_eq!(frame.encode(), b"hello\n\n");
		assert_eq!(frame.lines(), ["hello"]);
	}

	#[test]
	fn every_frame_covers_all_rows() {
		let frames = [
			Frame::greeting(),
			Frame::new(["hi"]).unwrap(),
			Frame::new([""]).unwrap(),
			Frame::new(["a", "b"]).unwrap(),
			Frame::timestamp(at(2024, 3, 5, 14, 3, 9)),
		];
		for frame in frames {
			let encoded = frame.encode();
			let newlines = encoded.iter().filter(|&&b| b == b'\n').count();
			assert_eq!(newlines, ROWS, "{frame:?}");
			assert!(encoded.len() <= MAX_WRITE, "{frame:?}");
		}
	}

	#[test]
	fn blank_lines_are_allowed() {
		let frame = Frame::new(["", ""]).unwrap();
		assert_eq!(frame.encode(), b"\n\n");
	}

	#[test]
	fn full_frame_fits_one_write() {
		let line = "x".repeat(COLUMNS);
		let frame = Frame::new([line.clone(), line]).unwrap();
		assert_eq!(frame.encode().len(), MAX_WRITE);
	}

	#[test]
	fn rejects_empty() {
		assert!(matches!(
			Frame::new(Vec::<String>::new()),
			Err(Error::EmptyFrame)
		));
	}

	#[test]
	fn rejects_three_lines() {
		assert!(matches!(
			Frame::new(["a", "b", "c"]),
			Err(Error::TooManyLines { count: 3 })
		));
	}

	#[test]
	fn rejects_wide_line() {
		assert!(matches!(
			Frame::new(["seventeen chars!!"]),
			Err(Error::LineTooWide { width: 17, .. })
		));
	}

	#[test]
	fn rejects_non_ascii() {
		assert!(matches!(
			Frame::new(["Marcin Kłos"]),
			Err(Error::NonAscii { .. })
		));
	}

	#[test]
	fn rejects_newline_in_line() {
		assert!(matches!(
			Frame::new(["one\ntwo"]),
			Err(Error::EmbeddedNewline { .. })
		));
	}
}
