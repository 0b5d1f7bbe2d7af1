use clap::{Parser, ValueEnum};
use miette::{Result, WrapErr};
use tracing::{info, warn};

use crate::lcd::{
	self, DisplayWriter, FailurePolicy, Frame, LocalClock, Panel, Stats, WriterConfig, GREETING,
};

use super::{Context, DeviceArgs};

/// Run the clock demo.
///
/// Shows a greeting for a few seconds, then the local date and time once a second for a while,
/// then starts over. Runs until interrupted (Ctrl-C or SIGTERM), which takes effect at the next
/// pause without cutting a frame short.
#[derive(Debug, Clone, Parser)]
pub struct DemoArgs {
	#[command(flatten)]
	pub device: DeviceArgs,

	/// Greeting line, at most 16 ASCII characters.
	///
	/// Give once or twice for one or two lines.
	#[arg(long, value_name = "LINE", default_values = GREETING)]
	pub greeting: Vec<String>,

	/// How many date/time updates to show after each greeting.
	#[arg(long, default_value = "15", value_name = "N")]
	pub ticks: u32,

	/// How long to show the greeting.
	///
	/// Syntax is a number followed by a unit, such as "3s" or "500ms".
	#[arg(long, default_value = "3s", value_name = "DURATION")]
	pub greeting_pause: humantime::Duration,

	/// How long to wait between date/time updates.
	#[arg(long, default_value = "1s", value_name = "DURATION")]
	pub tick_pause: humantime::Duration,

	/// What to do when writing to the display fails.
	#[arg(long, default_value = "abort", value_name = "POLICY")]
	pub on_failure: OnFailure,

	/// Give up after this many consecutive failures with '--on-failure=retry'.
	#[arg(long, value_name = "N")]
	pub max_failures: Option<u32>,

	/// Stop after this many greeting + date/time cycles.
	#[arg(long, value_name = "N")]
	pub cycles: Option<u64>,

	/// Clear the display when stopping.
	#[arg(long)]
	pub clear_on_exit: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OnFailure {
	/// Stop with an error.
	Abort,

	/// Log, skip the frame, and try again with the next one.
	Retry,
}

impl From<OnFailure> for FailurePolicy {
	fn from(policy: OnFailure) -> Self {
		match policy {
			OnFailure::Abort => Self::Abort,
			OnFailure::Retry => Self::Retry,
		}
	}
}

impl DemoArgs {
	pub fn config(&self) -> Result<WriterConfig> {
		let greeting = Frame::new(&self.greeting).wrap_err("invalid --greeting")?;
		Ok(WriterConfig {
			greeting,
			ticks: self.ticks,
			greeting_pause: *self.greeting_pause,
			tick_pause: *self.tick_pause,
			on_failure: self.on_failure.into(),
			max_failures: self.max_failures,
			cycles: self.cycles,
		})
	}
}

pub async fn run(ctx: Context<DemoArgs>) -> Result<()> {
	let args = &ctx.args_top;
	if args.max_failures.is_some() && args.on_failure == OnFailure::Abort {
		warn!("--max-failures has no effect without --on-failure=retry");
	}

	let config = args.config()?;
	let sink = args.device.sink()?;

	let mut writer = DisplayWriter::new(sink, LocalClock, config);
	let result = writer.run(&ctx.shutdown).await;

	let panel = (args.clear_on_exit && !args.device.stdout).then(|| args.device.panel());
	let stats = finish(result, panel.as_ref())?;
	info!(?stats, "demo finished");
	Ok(())
}

/// Clear the display if asked, without letting that hide how the run ended.
fn finish(result: lcd::Result<Stats>, clear: Option<&Panel>) -> Result<Stats> {
	if let Some(panel) = clear {
		info!("clearing display");
		if let Err(err) = panel.clear() {
			warn!("failed to clear display on exit: {err}");
		}
	}

	result.wrap_err("running demo")
}

#[cfg(test)]
mod tests {
	use std::{fs, io, time::Duration};

	use tempfile::TempDir;

	use super::*;

	fn parse(args: &[&str]) -> DemoArgs {
		DemoArgs::parse_from(std::iter::once("demo").chain(args.iter().copied()))
	}

	#[test]
	fn default_config_matches_writer_default() {
		let config = parse(&[]).config().unwrap();
		let default = WriterConfig::default();

		assert_eq!(config.greeting, default.greeting);
		assert_eq!(config.ticks, default.ticks);
		assert_eq!(config.greeting_pause, default.greeting_pause);
		assert_eq!(config.tick_pause, default.tick_pause);
		assert_eq!(config.on_failure, FailurePolicy::Abort);
		assert_eq!(config.cycles, None);
	}

	#[test]
	fn overrides() {
		let config = parse(&[
			"--greeting",
			"Hello",
			"--ticks",
			"3",
			"--greeting-pause",
			"500ms",
			"--tick-pause",
			"2s",
			"--on-failure",
			"retry",
			"--max-failures",
			"5",
			"--cycles",
			"1",
		])
		.config()
		.unwrap();

		assert_eq!(config.greeting.lines(), ["Hello"]);
		assert_eq!(config.ticks, 3);
		assert_eq!(config.greeting_pause, Duration::from_millis(500));
		assert_eq!(config.tick_pause, Duration::from_secs(2));
		assert_eq!(config.on_failure, FailurePolicy::Retry);
		assert_eq!(config.max_failures, Some(5));
		assert_eq!(config.cycles, Some(1));
	}

	#[test]
	fn rejects_greeting_that_does_not_fit() {
		assert!(parse(&["--greeting", "this greeting is far too long"])
			.config()
			.is_err());
		assert!(parse(&["--greeting", "a", "--greeting", "b", "--greeting", "c"])
			.config()
			.is_err());
	}

	#[test]
	fn failed_clear_keeps_the_write_error() {
		let dir = TempDir::with_prefix("lcd-demo-").unwrap();
		let panel = Panel::new(dir.path());
		let result = Err(lcd::Error::Write(io::Error::new(
			io::ErrorKind::BrokenPipe,
			"device gone",
		)));

		let err = finish(result, Some(&panel)).unwrap_err();
		assert!(err
			.chain()
			.any(|cause| cause.to_string() == "failed to write to display"));
	}

	#[test]
	fn clears_after_a_clean_run() {
		let dir = TempDir::with_prefix("lcd-demo-").unwrap();
		fs::write(dir.path().join("display_clear"), "").unwrap();
		let panel = Panel::new(dir.path());

		let stats = finish(Ok(Stats::default()), Some(&panel)).unwrap();
		assert_eq!(stats, Stats::default());
		assert_eq!(fs::read(dir.path().join("display_clear")).unwrap(), b"1");
	}

	#[test]
	fn failed_clear_after_a_clean_run_is_not_fatal() {
		let dir = TempDir::with_prefix("lcd-demo-").unwrap();
		let panel = Panel::new(dir.path());

		assert!(finish(Ok(Stats::default()), Some(&panel)).is_ok());
	}
}
