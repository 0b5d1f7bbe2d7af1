use std::{
	fs::{File, OpenOptions},
	io::Write,
	path::{Path, PathBuf},
};

use tracing::{debug, instrument};

use super::{Error, Result, WriterSink};

/// Where the driver registers the display on a Raspberry Pi: I2C bus 1, PCF8574 at 0x27.
pub const DEFAULT_DEVICE: &str = "/sys/bus/i2c/devices/1-0027";

/// Write-only control attributes of the device.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Attribute {
	Backlight,
	/// Underline cursor. Blinking overrides it.
	CursorState,
	CursorBlink,
	DisplayState,
	/// Any value but `0` clears the screen.
	DisplayClear,
}

impl Attribute {
	pub fn file_name(self) -> &'static str {
		match self {
			Self::Backlight => "backlight",
			Self::CursorState => "cursor_state",
			Self::CursorBlink => "cursor_blink",
			Self::DisplayState => "display_state",
			Self::DisplayClear => "display_clear",
		}
	}
}

/// The sysfs directory of an `lcd_drv` display.
#[derive(Clone, Debug)]
pub struct Panel {
	root: PathBuf,
}

impl Panel {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	pub fn content_path(&self) -> PathBuf {
		self.root.join("content")
	}

	/// Open the text attribute for the lifetime of the returned sink.
	///
	/// The file is never created: if it doesn't exist, the driver isn't there.
	#[instrument(level = "debug")]
	pub fn open_content(&self) -> Result<WriterSink<File>> {
		let path = self.content_path();
		let file = OpenOptions::new()
			.append(true)
			.open(&path)
			.map_err(|source| Error::Open { path, source })?;
		Ok(WriterSink::new(file))
	}

	#[instrument(level = "debug")]
	pub fn set(&self, attribute: Attribute, on: bool) -> Result<()> {
		let path = self.root.join(attribute.file_name());
		let value: &[u8] = if on { b"1" } else { b"0" };

		OpenOptions::new()
			.write(true)
			.truncate(true)
			.open(&path)
			.and_then(|mut file| file.write_all(value))
			.map_err(|source| Error::Attribute {
				name: attribute.file_name(),
				path,
				source,
			})?;

		debug!(attribute = attribute.file_name(), on, "attribute set");
		Ok(())
	}

	pub fn clear(&self) -> Result<()> {
		self.set(Attribute::DisplayClear, true)
	}
}

impl Default for Panel {
	fn default() -> Self {
		Self::new(DEFAULT_DEVICE)
	}
}
