use clap::Parser;
use miette::{bail, Result, WrapErr};

use crate::lcd::Attribute;

use super::{Context, DeviceArgs, Toggle};

/// Change display settings.
///
/// Settings not given are left as they are. Clearing happens after the other settings.
#[derive(Debug, Clone, Parser)]
pub struct SetArgs {
	#[command(flatten)]
	pub device: DeviceArgs,

	/// Turn the backlight on or off.
	#[arg(long, value_name = "STATE")]
	pub backlight: Option<Toggle>,

	/// Show or hide the underline cursor.
	#[arg(long, value_name = "STATE")]
	pub cursor: Option<Toggle>,

	/// Make the cursor blink. Overrides '--cursor'.
	#[arg(long, value_name = "STATE")]
	pub blink: Option<Toggle>,

	/// Turn the display on or off. Text is kept while off.
	#[arg(long, value_name = "STATE")]
	pub display: Option<Toggle>,

	/// Clear the display.
	#[arg(long)]
	pub clear: bool,
}

impl SetArgs {
	/// Attribute writes in the order they should be applied.
	pub fn changes(&self) -> Vec<(Attribute, bool)> {
		[
			(Attribute::DisplayState, self.display),
			(Attribute::Backlight, self.backlight),
			(Attribute::CursorState, self.cursor),
			(Attribute::CursorBlink, self.blink),
		]
		.into_iter()
		.filter_map(|(attribute, toggle)| toggle.map(|t| (attribute, t.into())))
		.chain(self.clear.then_some((Attribute::DisplayClear, true)))
		.collect()
	}
}

pub async fn run(ctx: Context<SetArgs>) -> Result<()> {
	let args = ctx.args_top;
	if args.device.stdout {
		bail!("--stdout only applies to text, display settings need a device");
	}

	let changes = args.changes();
	if changes.is_empty() {
		bail!("nothing to set, see --help for the available settings");
	}

	let panel = args.device.panel();
	for (attribute, on) in changes {
		panel
			.set(attribute, on)
			.wrap_err(format!("setting {}", attribute.file_name()))?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse(args: &[&str]) -> SetArgs {
		SetArgs::parse_from(std::iter::once("set").chain(args.iter().copied()))
	}

	#[test]
	fn nothing_given() {
		assert!(parse(&[]).changes().is_empty());
	}

	#[test]
	fn order_and_values() {
		let args = parse(&["--clear", "--blink", "off", "--backlight", "on", "--display", "on"]);
		assert_eq!(
			args.changes(),
			vec![
				(Attribute::DisplayState, true),
				(Attribute::Backlight, true),
				(Attribute::CursorBlink, false),
				(Attribute::DisplayClear, true),
			]
		);
	}
}
