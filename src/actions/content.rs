use clap::Parser;
use miette::{Result, WrapErr};
use tracing::info;

use crate::lcd::{Frame, Sink};

use super::{Context, DeviceArgs};

/// Show some text on the display.
///
/// Writes one or two lines, replacing whatever was displayed. Lines shorter than the display are
/// padded with spaces by the driver.
#[derive(Debug, Clone, Parser)]
pub struct ContentArgs {
	#[command(flatten)]
	pub device: DeviceArgs,

	/// Lines to show, at most two of 16 ASCII characters each.
	#[arg(required = true, num_args = 1..=2, value_name = "LINE")]
	pub lines: Vec<String>,
}

pub async fn run(ctx: Context<ContentArgs>) -> Result<()> {
	let ContentArgs { device, lines } = ctx.args_top;

	let frame = Frame::new(lines).wrap_err("invalid display text")?;
	let mut sink = device.sink()?;
	sink.send(&frame).wrap_err("writing to display")?;

	info!(lines = ?frame.lines(), "display updated");
	Ok(())
}
