use std::path::PathBuf;

use miette::Diagnostic;

use super::{COLUMNS, ROWS};

/// Error type for display operations.
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum Error {
	#[error("failed to open display content at {}", .path.display())]
	#[diagnostic(help("check that the lcd_drv module is loaded and the device path is correct"))]
	Open {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write to display")]
	#[diagnostic(help("the device went away or rejected the write (frames are limited to 34 bytes)"))]
	Write(#[source] std::io::Error),

	#[error("failed to set {name} at {}", .path.display())]
	#[diagnostic(help("check that the lcd_drv module is loaded and the device path is correct"))]
	Attribute {
		name: &'static str,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("a frame needs at least one line")]
	EmptyFrame,

	#[error("a frame holds at most {max} lines, got {count}", max = ROWS)]
	TooManyLines { count: usize },

	#[error("line {line:?} is {width} characters wide, the display has {max} columns", max = COLUMNS)]
	LineTooWide { line: String, width: usize },

	#[error("line {line:?} contains characters outside of ASCII")]
	#[diagnostic(help("the HD44780 character ROM only covers ASCII reliably"))]
	NonAscii { line: String },

	#[error("line {line:?} contains a line terminator")]
	#[diagnostic(help("pass each display line separately"))]
	EmbeddedNewline { line: String },
}

/// Convenience type for Results in this module.
pub type Result<T> = std::result::Result<T, Error>;
