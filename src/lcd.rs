//! Text output for HD44780 character LCDs behind the `lcd_drv` kernel driver.
//!
//! The driver exposes an I2C-attached 16x2 display as a sysfs device directory (for example
//! `/sys/bus/i2c/devices/1-0027`) with a handful of write-only attributes. Writing up to two
//! newline-terminated lines to `content` replaces the displayed text; the other attributes toggle
//! the backlight, cursor and display, or clear the screen.
//!
//! The [`DisplayWriter`] runs the clock demo against any [`Sink`]: it shows a greeting, then the
//! local date and time once a second, and repeats until cancelled.
//!
//! # Example
//!
//! ```no_run
//! # use lcd_demo::lcd::{DisplayWriter, LocalClock, Panel, WriterConfig};
//! # use tokio_util::sync::CancellationToken;
//! # async fn demo() -> lcd_demo::lcd::Result<()> {
//! let panel = Panel::new("/sys/bus/i2c/devices/1-0027");
//! let sink = panel.open_content()?;
//! let mut writer = DisplayWriter::new(sink, LocalClock, WriterConfig::default());
//! writer.run(&CancellationToken::new()).await?;
//! # Ok(()) }
//! ```

#[doc(inline)]
pub use clock::*;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use frame::*;

#[doc(inline)]
pub use panel::*;

#[doc(inline)]
pub use sink::*;

#[doc(inline)]
pub use writer::*;

mod clock;
mod error;
mod frame;
mod panel;
mod sink;
mod writer;
