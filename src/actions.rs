use std::path::PathBuf;

use clap::{Subcommand, ValueEnum, ValueHint};
use miette::Result;
use tracing::{debug, trace};

use crate::lcd::{Panel, Sink, WriterSink, DEFAULT_DEVICE};

pub use context::Context;
pub mod context;

macro_rules! commands {
	(
		[$argtype:ty => $ctxcode:block]
		$(
			$modname:ident => $enumname:ident($argname:ident)
		),+
	) => {
		$(
			pub mod $modname;
		)*

		#[derive(Debug, Clone, Subcommand)]
		pub enum Action {
			$(
				$enumname($modname::$argname),
			)*
		}

		pub async fn run(ctx: $argtype) -> Result<()> {
			let ctxfn = $ctxcode;
			match ctxfn(ctx)? {
				$(
					(Action::$enumname(args), ctx) => $modname::run(ctx.with_top(args)).await,
				)*
			}
		}
	};
}

use crate::args::Args;

commands! {
	[Args => {|args: Args| -> Result<(Action, Context)> {
		let ctx = Context::new().with_top(args.action);
		debug!(version=%env!("CARGO_PKG_VERSION"), "starting up");
		trace!(?ctx, "context");
		ctx.listen_for_shutdown();
		Ok(ctx.take_top())
	}}]

	content => Content(ContentArgs),
	demo => Demo(DemoArgs),
	set => Set(SetArgs)
}

/// Which display to talk to.
#[derive(Debug, Clone, clap::Args)]
pub struct DeviceArgs {
	/// Sysfs directory of the display.
	///
	/// This is the I2C device the lcd_drv driver bound to, containing the 'content', 'backlight',
	/// and other control attributes.
	#[arg(
		long,
		env = "LCD_DEVICE",
		default_value = DEFAULT_DEVICE,
		value_hint = ValueHint::DirPath,
		value_name = "DIR",
	)]
	pub device: PathBuf,

	/// Print frames to stdout instead of the display.
	///
	/// Useful to preview output on a machine without the display.
	#[arg(long)]
	pub stdout: bool,
}

impl DeviceArgs {
	pub fn panel(&self) -> Panel {
		Panel::new(&self.device)
	}

	/// Open where text frames go.
	pub fn sink(&self) -> Result<Box<dyn Sink + Send>> {
		if self.stdout {
			debug!("writing frames to stdout");
			Ok(Box::new(WriterSink::new(std::io::stdout())))
		} else {
			debug!(device=?self.device, "writing frames to display");
			Ok(Box::new(self.panel().open_content()?))
		}
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Toggle {
	On,
	Off,
}

impl From<Toggle> for bool {
	fn from(toggle: Toggle) -> Self {
		toggle == Toggle::On
	}
}
